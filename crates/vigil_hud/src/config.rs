//! Indicator configuration
//!
//! Read from a TOML file by the host; every key is optional.
//!
//! ```toml
//! battle_only = true       # fade creature indicators out when their battle ends
//! prefer_battle_ui = true  # use the extension's battle UI values when shown
//! lerp_speed = 0.15        # fraction of the remaining distance covered per tick
//! fade_out_ticks = 20      # ticks from fully opaque to gone
//! snap_epsilon = 0.01      # snap to target when closer than this
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables for the animation and fade state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Fade a creature's indicator out when it leaves a battle
    pub battle_only: bool,
    /// Prefer the extension's battle UI values over server-side battle values
    pub prefer_battle_ui: bool,
    /// Interpolation blend factor per tick, in (0, 1]
    pub lerp_speed: f32,
    /// Length of a fade episode in ticks
    pub fade_out_ticks: u32,
    /// Distance below which the displayed value snaps to its target
    pub snap_epsilon: f32,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            battle_only: false,
            prefer_battle_ui: true,
            lerp_speed: 0.15,
            fade_out_ticks: 20, // one second at 20 TPS
            snap_epsilon: 0.01,
        }
    }
}

impl IndicatorConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded indicator config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_lerp_speed(self.lerp_speed)?;
        check_fade_out_ticks(self.fade_out_ticks)?;
        check_snap_epsilon(self.snap_epsilon)
    }

    /// This config with every invalid value replaced by its default
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if let Err(err) = check_lerp_speed(self.lerp_speed) {
            log::warn!("{}; using {}", err, defaults.lerp_speed);
            self.lerp_speed = defaults.lerp_speed;
        }
        if let Err(err) = check_fade_out_ticks(self.fade_out_ticks) {
            log::warn!("{}; using {}", err, defaults.fade_out_ticks);
            self.fade_out_ticks = defaults.fade_out_ticks;
        }
        if let Err(err) = check_snap_epsilon(self.snap_epsilon) {
            log::warn!("{}; using {}", err, defaults.snap_epsilon);
            self.snap_epsilon = defaults.snap_epsilon;
        }
        self
    }

    pub fn with_battle_only(mut self, enabled: bool) -> Self {
        self.battle_only = enabled;
        self
    }

    pub fn with_battle_ui(mut self, enabled: bool) -> Self {
        self.prefer_battle_ui = enabled;
        self
    }

    pub fn with_lerp_speed(mut self, speed: f32) -> Self {
        self.lerp_speed = speed;
        self
    }

    pub fn with_fade_out_ticks(mut self, ticks: u32) -> Self {
        self.fade_out_ticks = ticks;
        self
    }
}

fn check_lerp_speed(speed: f32) -> Result<(), ConfigError> {
    if speed > 0.0 && speed <= 1.0 {
        return Ok(());
    }
    Err(ConfigError::Invalid {
        field: "lerp_speed",
        reason: format!("{} is outside (0, 1]", speed),
    })
}

fn check_fade_out_ticks(ticks: u32) -> Result<(), ConfigError> {
    if ticks > 0 {
        return Ok(());
    }
    Err(ConfigError::Invalid {
        field: "fade_out_ticks",
        reason: "must be at least 1".into(),
    })
}

fn check_snap_epsilon(epsilon: f32) -> Result<(), ConfigError> {
    if epsilon.is_finite() && epsilon > 0.0 {
        return Ok(());
    }
    Err(ConfigError::Invalid {
        field: "snap_epsilon",
        reason: format!("{} is not a positive number", epsilon),
    })
}
