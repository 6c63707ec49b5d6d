//! Terminal host (default binary).
//!
//! Runs the dungeon engine in the terminal: crossterm input feeds the input
//! normalizer, and a fixed-interval scheduler paces one step-then-render
//! frame at a time. Ctrl+C quits.
//!
//! Configuration comes from `GLYPH_LOOP_*` environment variables, see
//! [`HostConfig`].

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::info;
use tracing_subscriber::EnvFilter;

use glyph_loop::core::SimulationDriver;
use glyph_loop::engine::Dungeon;
use glyph_loop::input::{
    key_event_to_raw, mouse_event_to_raw, should_quit, CellMapper, InputNormalizer, RawMouseInput,
};
use glyph_loop::term::{FrameLoop, IntervalScheduler, TerminalRenderer};
use glyph_loop::HostConfig;

fn main() -> Result<()> {
    let config = HostConfig::from_env();
    init_tracing(&config)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut term = TerminalRenderer::new(config.size);
    term.enter()?;

    let result = run(&mut term, &config, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    eprintln!("game seed: {seed}");
    result
}

/// Log to the configured file. Stdout is the game surface, so without a
/// path nothing is installed.
fn init_tracing(config: &HostConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {path}"))?;
    let filter = config
        .log_filter
        .as_deref()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))
}

enum Flow {
    Continue,
    Quit,
}

fn run(term: &mut TerminalRenderer, config: &HostConfig, seed: u32) -> Result<()> {
    let mut normalizer = InputNormalizer::new();

    // Input that arrived before the engine exists is dropped.
    while event::poll(Duration::ZERO)? {
        if let Flow::Quit = feed(&mut normalizer, &*term, event::read()?) {
            return Ok(());
        }
    }

    let mut frames = FrameLoop::new(SimulationDriver::<Dungeon>::launch(seed, config.size));
    normalizer.attach(frames.input_queue());

    let mut scheduler = IntervalScheduler::new(config.frame_interval);
    scheduler.request_now(Instant::now());
    info!(
        interval_ms = config.frame_interval.as_millis() as u64,
        "frame loop started"
    );

    loop {
        if scheduler.fire(Instant::now()) {
            frames.tick(Some(&mut *term), &mut scheduler)?;
        }

        let timeout = scheduler
            .time_until(Instant::now())
            .unwrap_or(config.frame_interval);
        if event::poll(timeout)? {
            if let Flow::Quit = feed(&mut normalizer, &*term, event::read()?) {
                info!(steps = frames.driver().steps(), "quit requested");
                return Ok(());
            }
        }
    }
}

/// Hand one terminal event to the normalizer. Terminals have no default
/// actions to suppress, so the returned decisions are not used.
fn feed(normalizer: &mut InputNormalizer, mapper: &impl CellMapper, event: Event) -> Flow {
    match event {
        Event::Key(key) => {
            if should_quit(key) {
                return Flow::Quit;
            }
            if let Some(raw) = key_event_to_raw(key) {
                if let Some(down) = &raw.down {
                    normalizer.key_down(down);
                }
                if let Some(press) = &raw.press {
                    normalizer.key_press(press);
                }
            }
        }
        Event::Mouse(mouse) => match mouse_event_to_raw(mouse) {
            Some(RawMouseInput::Down(raw)) => {
                normalizer.mouse_down(&raw, mapper);
            }
            Some(RawMouseInput::Up(raw)) => {
                normalizer.mouse_up(&raw, mapper);
            }
            Some(RawMouseInput::Wheel(raw)) => {
                normalizer.wheel(&raw, mapper);
            }
            None => {}
        },
        _ => {}
    }
    Flow::Continue
}
