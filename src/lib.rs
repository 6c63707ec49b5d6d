//! glyph-loop (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and holds the host
//! configuration shared by the terminal binary.
//!
//! - [`types`]: grid, color and input records
//! - [`core`]: engine trait, input queue and simulation driver
//! - [`engine`]: the dungeon engine
//! - [`input`]: input normalizer and crossterm mapping
//! - [`term`]: frame renderer, sinks and schedulers

pub mod config;

pub use glyph_loop_core as core;
pub use glyph_loop_engine as engine;
pub use glyph_loop_input as input;
pub use glyph_loop_term as term;
pub use glyph_loop_types as types;

pub use config::HostConfig;
