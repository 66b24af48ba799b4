//! Vigil Health - authoritative health resolution
//!
//! Decides, for one subject at one tick, which health reading should be
//! shown. Stateless: every function takes the subject and a
//! [`CapabilityResolver`](vigil_capability::CapabilityResolver) and returns a
//! best-effort answer.
//!
//! # Resolution order
//!
//! 1. Not an extension creature: the engine's own values
//! 2. Creature in a battle: the battle clone's values (damage lands on the clone)
//! 3. Creature out of battle: the base creature's values
//!
//! A separate path reads the extension's battle UI mirror, for indicators
//! that must match the extension's own on-screen bars exactly.

pub mod battle_ui;
pub mod health;

#[cfg(test)]
pub(crate) mod testutil;

pub mod prelude {
    pub use crate::battle_ui::{effective_health, resolve_battle_ui_health, BattleUiHealth};
    pub use crate::health::{
        resolve_current_health, resolve_health, resolve_max_health, HealthReading, HealthSource,
        NOT_APPLICABLE,
    };
}

pub use prelude::*;
