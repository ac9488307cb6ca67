use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use match_core::ScoreRules;
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_SETTINGS_FILE: &str = "match_it.toml";
const ENV_PREFIX: &str = "MATCH_IT__";
const MIN_TILE_SIZE: f32 = 48.0;
const MAX_TILE_SIZE: f32 = 400.0;
/// Gap between a tile's border and its image.
const TILE_IMAGE_MARGIN: f32 = 8.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fast_delay_ms: u64,
    pub slow_delay_ms: u64,
    pub tile_size: f32,
    pub starting_score: i32,
    pub free_turns: u32,
    pub turn_penalty: i32,
}

impl Default for Settings {
    fn default() -> Self {
        let rules = ScoreRules::default();
        Self {
            fast_delay_ms: 1000,
            slow_delay_ms: 3000,
            tile_size: 150.0,
            starting_score: rules.starting_score,
            free_turns: rules.free_turns,
            turn_penalty: rules.turn_penalty,
        }
    }
}

impl Settings {
    pub fn reveal_delay(&self, fast: bool) -> Duration {
        Duration::from_millis(if fast {
            self.fast_delay_ms
        } else {
            self.slow_delay_ms
        })
    }

    pub fn score_rules(&self) -> ScoreRules {
        ScoreRules {
            starting_score: self.starting_score,
            free_turns: self.free_turns,
            turn_penalty: self.turn_penalty,
        }
    }

    /// Largest side an image may have and still fit inside a tile.
    pub fn image_max_side(&self) -> u32 {
        (self.tile_size - 2.0 * TILE_IMAGE_MARGIN).max(1.0) as u32
    }

    fn sanitized(mut self) -> Self {
        let defaults = Settings::default();
        if self.fast_delay_ms == 0 {
            warn!("fast_delay_ms must be positive; using default");
            self.fast_delay_ms = defaults.fast_delay_ms;
        }
        if self.slow_delay_ms == 0 {
            warn!("slow_delay_ms must be positive; using default");
            self.slow_delay_ms = defaults.slow_delay_ms;
        }
        if !(MIN_TILE_SIZE..=MAX_TILE_SIZE).contains(&self.tile_size) {
            warn!(
                tile_size = self.tile_size,
                "tile_size out of range; using default"
            );
            self.tile_size = defaults.tile_size;
        }
        if self.turn_penalty < 0 {
            warn!(
                turn_penalty = self.turn_penalty,
                "turn_penalty cannot be negative; using default"
            );
            self.turn_penalty = defaults.turn_penalty;
        }
        self
    }
}

/// Defaults, then the settings file, then `MATCH_IT__*` environment overrides.
///
/// An explicitly requested file must exist; the default file is optional.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = match explicit_path {
        Some(path) => read_settings_file(path)?,
        None => {
            let default_path = PathBuf::from(DEFAULT_SETTINGS_FILE);
            if default_path.is_file() {
                read_settings_file(&default_path)?
            } else {
                Settings::default()
            }
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings.sanitized())
}

fn read_settings_file(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    parse_settings(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))
}

fn parse_settings(raw: &str) -> anyhow::Result<Settings> {
    Ok(toml::from_str::<Settings>(raw)?)
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    override_from(&lookup, "FAST_DELAY_MS", &mut settings.fast_delay_ms);
    override_from(&lookup, "SLOW_DELAY_MS", &mut settings.slow_delay_ms);
    override_from(&lookup, "TILE_SIZE", &mut settings.tile_size);
    override_from(&lookup, "STARTING_SCORE", &mut settings.starting_score);
    override_from(&lookup, "FREE_TURNS", &mut settings.free_turns);
    override_from(&lookup, "TURN_PENALTY", &mut settings.turn_penalty);
}

fn override_from<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    slot: &mut T,
) {
    let key = format!("{ENV_PREFIX}{name}");
    let Some(raw) = lookup(&key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => *slot = value,
        Err(_) => warn!(key = %key, value = %raw, "ignoring unparsable environment override"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
