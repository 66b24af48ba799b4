//! Tier 0/1 health resolution

use vigil_capability::{CapabilityResolver, CreatureStats};
use vigil_core::Subject;

/// Returned by the single-value helpers when no reading exists
pub const NOT_APPLICABLE: f32 = -1.0;

/// Where a health reading came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthSource {
    /// The engine's own health values
    Native,
    /// The extension's base creature object
    Creature,
    /// The battle clone the extension applies damage to
    BattleClone,
    /// The extension's client battle UI mirror
    BattleUi,
}

/// Current and maximum health for one subject at one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthReading {
    pub current: f32,
    pub max: f32,
    pub source: HealthSource,
}

impl HealthReading {
    pub fn new(current: f32, max: f32, source: HealthSource) -> Self {
        Self { current, max, source }
    }

    /// The engine's reading, unless the engine could not produce one
    pub fn native(subject: &dyn Subject) -> Option<Self> {
        let current = subject.native_current_health();
        let max = subject.native_max_health();
        if !current.is_finite() || !max.is_finite() {
            log::trace!("Native health read failed for {}", subject.id());
            return None;
        }
        Some(Self::new(current, max, HealthSource::Native))
    }

    /// Extension stats as a reading; non-finite stats count as a miss
    fn from_stats(stats: &CreatureStats, source: HealthSource) -> Option<Self> {
        if !stats.current_health.is_finite() || !stats.max_health.is_finite() {
            log::trace!("Discarding non-finite {:?} health for creature {}", source, stats.identity);
            return None;
        }
        Some(Self::new(stats.current_health, stats.max_health, source))
    }

    /// Current health as a fraction of max (0 when max is not positive)
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

/// Resolve the authoritative health of `subject`.
///
/// A non-finite extension value falls through to the next source. `None`
/// only when the engine could not produce a reading either.
pub fn resolve_health(subject: &dyn Subject, resolver: &CapabilityResolver) -> Option<HealthReading> {
    let Some(creature) = resolver.creature(subject) else {
        return HealthReading::native(subject);
    };

    let clone = resolver
        .battle_participant(subject, &creature)
        .and_then(|participant| participant.effected)
        .and_then(|clone| HealthReading::from_stats(&clone, HealthSource::BattleClone));

    clone
        .or_else(|| HealthReading::from_stats(&creature, HealthSource::Creature))
        .or_else(|| HealthReading::native(subject))
}

/// Authoritative current health, or [`NOT_APPLICABLE`]
pub fn resolve_current_health(subject: &dyn Subject, resolver: &CapabilityResolver) -> f32 {
    resolve_health(subject, resolver).map_or(NOT_APPLICABLE, |r| r.current)
}

/// Authoritative max health, or [`NOT_APPLICABLE`]
pub fn resolve_max_health(subject: &dyn Subject, resolver: &CapabilityResolver) -> f32 {
    resolve_health(subject, resolver).map_or(NOT_APPLICABLE, |r| r.max)
}
