//! Vigil HUD - health indicator state
//!
//! Tracks, per subject, the health value an indicator should display and
//! how opaque it should be. The host drives [`HealthIndicatorTracker::tick`]
//! once per simulation tick; the renderer reads values between ticks.
//!
//! # Features
//!
//! - Smoothed health values that ease toward the authoritative reading
//! - Fade-out episodes on death or, in battle-only mode, when a battle ends
//! - TOML configuration
//!
//! # Example
//!
//! ```ignore
//! use vigil_hud::prelude::*;
//!
//! let tracker = HealthIndicatorTracker::new(resolver)
//!     .with_config(IndicatorConfig::load("indicators.toml")?);
//!
//! // Simulation thread
//! tracker.tick(Some(&world));
//!
//! // Render thread
//! let health = tracker.displayed_health(subject);
//! let alpha = tracker.alpha(subject.id());
//! ```

pub mod animation;
pub mod config;
pub mod fade;
pub mod tracker;

pub mod prelude {
    pub use crate::animation::AnimatedHealth;
    pub use crate::config::{ConfigError, IndicatorConfig};
    pub use crate::fade::{FadeCause, FadeState};
    pub use crate::tracker::{HealthIndicatorTracker, IndicatorSnapshot};
}

pub use prelude::*;
