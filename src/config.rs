//! Host configuration from environment variables.

use std::time::Duration;

use glyph_loop_types::{GridSize, DEFAULT_HEIGHT, DEFAULT_WIDTH, FRAME_MS};

/// Terminal host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub size: GridSize,
    /// Fixed session seed. Random when unset.
    pub seed: Option<u32>,
    pub frame_interval: Duration,
    /// File receiving `tracing` output. No logging when unset.
    pub log_path: Option<String>,
    /// `EnvFilter` directives.
    pub log_filter: Option<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            size: GridSize::new(DEFAULT_WIDTH, DEFAULT_HEIGHT),
            seed: None,
            frame_interval: Duration::from_millis(FRAME_MS as u64),
            log_path: None,
            log_filter: None,
        }
    }
}

impl HostConfig {
    /// Read `GLYPH_LOOP_*` variables. Unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());
        let text = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let dimension = |key: &str, default: u16| {
            parse(key)
                .map(|v| v.clamp(1, u16::MAX as u64) as u16)
                .unwrap_or(default)
        };

        let size = GridSize::new(
            dimension("GLYPH_LOOP_WIDTH", defaults.size.width),
            dimension("GLYPH_LOOP_HEIGHT", defaults.size.height),
        );
        let seed = parse("GLYPH_LOOP_SEED").and_then(|v| u32::try_from(v).ok());
        let frame_interval = parse("GLYPH_LOOP_FRAME_MS")
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.frame_interval);

        Self {
            size,
            seed,
            frame_interval,
            log_path: text("GLYPH_LOOP_LOG_PATH"),
            log_filter: text("GLYPH_LOOP_LOG"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> HostConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        HostConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config(&[]), HostConfig::default());
        assert_eq!(HostConfig::default().size, GridSize::new(80, 36));
    }

    #[test]
    fn test_values_are_parsed() {
        let c = config(&[
            ("GLYPH_LOOP_WIDTH", "100"),
            ("GLYPH_LOOP_HEIGHT", " 40 "),
            ("GLYPH_LOOP_SEED", "42"),
            ("GLYPH_LOOP_FRAME_MS", "33"),
            ("GLYPH_LOOP_LOG_PATH", "/tmp/glyph.log"),
            ("GLYPH_LOOP_LOG", "glyph_loop_core=debug"),
        ]);
        assert_eq!(c.size, GridSize::new(100, 40));
        assert_eq!(c.seed, Some(42));
        assert_eq!(c.frame_interval, Duration::from_millis(33));
        assert_eq!(c.log_path.as_deref(), Some("/tmp/glyph.log"));
        assert_eq!(c.log_filter.as_deref(), Some("glyph_loop_core=debug"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let c = config(&[
            ("GLYPH_LOOP_WIDTH", "0"),
            ("GLYPH_LOOP_HEIGHT", "tall"),
            ("GLYPH_LOOP_SEED", "99999999999"),
            ("GLYPH_LOOP_FRAME_MS", "0"),
            ("GLYPH_LOOP_LOG_PATH", "   "),
        ]);
        assert_eq!(c.size, GridSize::new(1, 36));
        assert_eq!(c.seed, None);
        assert_eq!(c.frame_interval, Duration::from_millis(16));
        assert_eq!(c.log_path, None);
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = HostConfig::from_env();
    }
}
