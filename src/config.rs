/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::weather::Weather;
use crate::sim::clock::DEFAULT_TICK_MS;

// ── Public config struct ──

#[derive(Clone, Debug)]
pub struct ForecastConfig {
    /// Logical tick period in milliseconds (~30 ticks/sec).
    pub tick_ms: u64,
    /// Seconds between data feed polls.
    pub poll_secs: u64,
    /// Master animation seed. 0 = seed from entropy.
    pub seed: u64,
    /// Start with the data feed enabled.
    pub data_enabled: bool,
    /// Pin the starting weather (switches the mode to manual).
    pub weather_override: Option<Weather>,
}

// ── TOML schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    scene: TomlScene,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_tick_ms")]
    tick_ms: u64,
    #[serde(default = "default_poll_secs")]
    poll_secs: u64,
}

#[derive(Deserialize, Debug)]
struct TomlScene {
    #[serde(default)]
    seed: u64,
    #[serde(default = "default_data_enabled")]
    data_feed: bool,
    #[serde(default)]
    weather: String,
}

// ── Defaults ──

fn default_tick_ms() -> u64 {
    DEFAULT_TICK_MS
}
fn default_poll_secs() -> u64 {
    30
}
fn default_data_enabled() -> bool {
    true
}

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming {
            tick_ms: default_tick_ms(),
            poll_secs: default_poll_secs(),
        }
    }
}

impl Default for TomlScene {
    fn default() -> Self {
        TomlScene {
            seed: 0,
            data_feed: default_data_enabled(),
            weather: String::new(),
        }
    }
}

// ── Loading ──

impl ForecastConfig {
    /// Load config from `config.toml`, searching the exe directory first
    /// and then the CWD. Missing file or keys fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());
        Self::from_toml(toml_cfg)
    }

    /// Parse a config document directly (exposed for tests).
    pub fn from_str(text: &str) -> Self {
        let toml_cfg = match toml::from_str::<TomlConfig>(text) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Warning: config parse error: {e}");
                eprintln!("Using default settings.");
                TomlConfig::default()
            }
        };
        Self::from_toml(toml_cfg)
    }

    fn from_toml(toml_cfg: TomlConfig) -> Self {
        let weather_override = if toml_cfg.scene.weather.is_empty() {
            None
        } else {
            let parsed = Weather::parse(&toml_cfg.scene.weather);
            if parsed.is_none() {
                eprintln!(
                    "Warning: unknown weather {:?} in config, ignoring.",
                    toml_cfg.scene.weather
                );
            }
            parsed
        };

        ForecastConfig {
            tick_ms: toml_cfg.timing.tick_ms.clamp(10, 1000),
            poll_secs: toml_cfg.timing.poll_secs.max(1),
            seed: toml_cfg.scene.seed,
            data_enabled: toml_cfg.scene.data_feed,
            weather_override,
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path: &Path = &dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = ForecastConfig::from_str("");
        assert_eq!(cfg.tick_ms, 33);
        assert_eq!(cfg.poll_secs, 30);
        assert_eq!(cfg.seed, 0);
        assert!(cfg.data_enabled);
        assert!(cfg.weather_override.is_none());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let cfg = ForecastConfig::from_str("[timing]\ntick_ms = 50\n");
        assert_eq!(cfg.tick_ms, 50);
        assert_eq!(cfg.poll_secs, 30);
    }

    #[test]
    fn full_document() {
        let cfg = ForecastConfig::from_str(
            "[timing]\ntick_ms = 40\npoll_secs = 10\n\n[scene]\nseed = 7\ndata_feed = false\nweather = \"rain\"\n",
        );
        assert_eq!(cfg.tick_ms, 40);
        assert_eq!(cfg.poll_secs, 10);
        assert_eq!(cfg.seed, 7);
        assert!(!cfg.data_enabled);
        assert_eq!(cfg.weather_override, Some(Weather::Rain));
    }

    #[test]
    fn corrupt_document_falls_back() {
        let cfg = ForecastConfig::from_str("this is { not toml");
        assert_eq!(cfg.tick_ms, 33);
        assert!(cfg.data_enabled);
    }

    #[test]
    fn unknown_weather_is_ignored() {
        let cfg = ForecastConfig::from_str("[scene]\nweather = \"hail\"\n");
        assert!(cfg.weather_override.is_none());
    }

    #[test]
    fn tick_ms_is_clamped() {
        let cfg = ForecastConfig::from_str("[timing]\ntick_ms = 2\n");
        assert_eq!(cfg.tick_ms, 10);
    }
}
