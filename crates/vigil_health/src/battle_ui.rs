//! Tier 2 health: values as the extension's battle UI displays them

use vigil_capability::CapabilityResolver;
use vigil_core::Subject;

use crate::health::{resolve_health, HealthReading, HealthSource};

/// Health of a creature shown in the client's active battle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BattleUiHealth {
    /// Exact health when `is_exact_value`, otherwise a 0..1 ratio
    pub value: f32,
    pub max_value: f32,
    /// Allies are displayed with exact values, opponents as a ratio
    pub is_exact_value: bool,
    /// Shown in a live client battle
    pub is_live_in_battle: bool,
}

impl BattleUiHealth {
    /// Health in absolute units regardless of display convention
    pub fn absolute_value(&self) -> f32 {
        if self.is_exact_value {
            self.value
        } else {
            self.value * self.max_value
        }
    }

    /// Health as a 0..1 fraction regardless of display convention
    pub fn ratio(&self) -> f32 {
        let ratio = if self.is_exact_value {
            if self.max_value <= 0.0 {
                0.0
            } else {
                self.value / self.max_value
            }
        } else {
            self.value
        };
        ratio.clamp(0.0, 1.0)
    }
}

/// Read `subject`'s health from the client battle UI mirror.
///
/// `None` means the caller should use [`resolve_health`]: the mirror is
/// unavailable, the subject is not a creature, no client battle is active,
/// the battle does not show this creature, or the shown values are not finite.
pub fn resolve_battle_ui_health(
    subject: &dyn Subject,
    resolver: &CapabilityResolver,
) -> Option<BattleUiHealth> {
    if !resolver.is_battle_ui_available() {
        return None;
    }

    let creature = resolver.creature(subject)?;
    let record = resolver.battle_ui_record(creature.identity)?;
    if !record.hp_value.is_finite() || !record.max_hp.is_finite() {
        log::trace!("Discarding non-finite battle UI health for creature {}", creature.identity);
        return None;
    }

    Some(BattleUiHealth {
        value: record.hp_value,
        max_value: record.max_hp,
        is_exact_value: record.is_hp_flat,
        is_live_in_battle: true,
    })
}

/// The reading an indicator should animate toward.
///
/// With `prefer_battle_ui`, a creature shown in the client battle uses the
/// mirrored value (scaled to absolute health units); everything else goes
/// through [`resolve_health`].
pub fn effective_health(
    subject: &dyn Subject,
    resolver: &CapabilityResolver,
    prefer_battle_ui: bool,
) -> Option<HealthReading> {
    if prefer_battle_ui {
        if let Some(ui) = resolve_battle_ui_health(subject, resolver) {
            return Some(HealthReading::new(
                ui.absolute_value(),
                ui.max_value,
                HealthSource::BattleUi,
            ));
        }
    }

    resolve_health(subject, resolver)
}
