//! Engine configuration from environment variables.
//!
//! - `TETRIS_GRAVITY_MS`: gravity interval (default 500)
//! - `TETRIS_FRAME_MS`: loop throttle slice (default 50)
//! - `TETRIS_SEED`: piece RNG seed (default derived from the clock)
//! - `TETRIS_LOG_PATH`: log file for the binary (default: no logging)

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::types::{FRAME_MS, GRAVITY_MS, INPUT_POLL_MS};

pub const GRAVITY_VAR: &str = "TETRIS_GRAVITY_MS";
pub const FRAME_VAR: &str = "TETRIS_FRAME_MS";
pub const SEED_VAR: &str = "TETRIS_SEED";
pub const LOG_PATH_VAR: &str = "TETRIS_LOG_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must be greater than zero")]
    ZeroInterval { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Time between forced downward steps
    pub gravity: Duration,
    /// Sleep between ticks
    pub frame: Duration,
    /// How long the input task and the game-over wait sleep when idle
    pub input_poll: Duration,
    pub seed: u32,
    pub log_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: Duration::from_millis(GRAVITY_MS as u64),
            frame: Duration::from_millis(FRAME_MS as u64),
            input_poll: Duration::from_millis(INPUT_POLL_MS as u64),
            seed: 1,
            log_path: None,
        }
    }
}

impl EngineConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Unset or blank variables fall back to defaults; anything else must parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut config = Self {
            seed: clock_seed(),
            ..Self::default()
        };

        if let Some(ms) = parse_u32(GRAVITY_VAR, var(GRAVITY_VAR))? {
            config.gravity = non_zero_ms(GRAVITY_VAR, ms)?;
        }
        if let Some(ms) = parse_u32(FRAME_VAR, var(FRAME_VAR))? {
            config.frame = non_zero_ms(FRAME_VAR, ms)?;
        }
        if let Some(seed) = parse_u32(SEED_VAR, var(SEED_VAR))? {
            config.seed = seed;
        }
        config.log_path = var(LOG_PATH_VAR).map(PathBuf::from);

        Ok(config)
    }
}

fn parse_u32(var: &'static str, value: Option<String>) -> Result<Option<u32>, ConfigError> {
    value
        .map(|s| {
            s.parse::<u32>()
                .map_err(|_| ConfigError::InvalidNumber { var, value: s })
        })
        .transpose()
}

fn non_zero_ms(var: &'static str, ms: u32) -> Result<Duration, ConfigError> {
    if ms == 0 {
        return Err(ConfigError::ZeroInterval { var });
    }
    Ok(Duration::from_millis(ms as u64))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
