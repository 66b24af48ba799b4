//! Shared fixtures: a mutable world of mobs and creatures, plus an
//! in-process creature-battle extension

#![allow(dead_code)]

use std::any::Any;
use std::sync::Arc;

use vigil_capability::*;
use vigil_core::{BattleId, IdentityToken, Subject, SubjectId, WorldView};
use vigil_hud::{HealthIndicatorTracker, IndicatorConfig};

pub const CREATURE_MAX: f32 = 30.0;

/// A plain engine mob
pub struct Mob {
    pub id: SubjectId,
    pub health: f32,
    pub max: f32,
}

impl Mob {
    pub fn new(health: f32, max: f32) -> Self {
        Self {
            id: SubjectId::new(),
            health,
            max,
        }
    }
}

impl Subject for Mob {
    fn id(&self) -> SubjectId {
        self.id
    }
    fn native_current_health(&self) -> f32 {
        self.health
    }
    fn native_max_health(&self) -> f32 {
        self.max
    }
    fn is_dead_or_dying(&self) -> bool {
        self.health <= 0.0
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A creature owned by the extension; its engine health is never updated
pub struct Creature {
    pub id: SubjectId,
    pub identity: IdentityToken,
    pub health: f32,
    pub battle: Option<BattleId>,
}

impl Creature {
    pub fn new(health: f32) -> Self {
        Self {
            id: SubjectId::new(),
            identity: IdentityToken::new(),
            health,
            battle: None,
        }
    }

    pub fn in_battle(mut self, battle: BattleId) -> Self {
        self.battle = Some(battle);
        self
    }
}

impl Subject for Creature {
    fn id(&self) -> SubjectId {
        self.id
    }
    fn native_current_health(&self) -> f32 {
        CREATURE_MAX
    }
    fn native_max_health(&self) -> f32 {
        CREATURE_MAX
    }
    fn is_dead_or_dying(&self) -> bool {
        false
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Default)]
pub struct World {
    pub mobs: Vec<Mob>,
    pub creatures: Vec<Creature>,
}

impl World {
    pub fn with_mob(mut self, mob: Mob) -> Self {
        self.mobs.push(mob);
        self
    }

    pub fn with_creature(mut self, creature: Creature) -> Self {
        self.creatures.push(creature);
        self
    }
}

impl WorldView for World {
    fn renderable_living_subjects(&self) -> Vec<&dyn Subject> {
        self.mobs
            .iter()
            .map(|m| m as &dyn Subject)
            .chain(self.creatures.iter().map(|c| c as &dyn Subject))
            .collect()
    }
}

struct Model;

impl CreatureModel for Model {
    fn creature(&self, subject: &dyn Subject) -> ProbeResult<Option<CreatureStats>> {
        Ok(subject
            .as_any()
            .downcast_ref::<Creature>()
            .map(|c| CreatureStats::new(c.identity, c.health, CREATURE_MAX)))
    }
}

struct Battles(Vec<BattleSnapshot>);

impl BattleRegistry for Battles {
    fn battle_id(&self, subject: &dyn Subject) -> ProbeResult<Option<BattleId>> {
        Ok(subject
            .as_any()
            .downcast_ref::<Creature>()
            .and_then(|c| c.battle))
    }

    fn battle(&self, id: BattleId) -> ProbeResult<Option<BattleSnapshot>> {
        Ok(self.0.iter().find(|b| b.id == id).cloned())
    }
}

struct Mirror(Option<ClientBattle>);

impl BattleUiMirror for Mirror {
    fn active_battle(&self) -> ProbeResult<Option<ClientBattle>> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
pub struct BattleExtension {
    battles: Vec<BattleSnapshot>,
    client: Option<ClientBattle>,
}

impl BattleExtension {
    /// A battle in which `original` fights as a clone with `clone_health`
    pub fn with_battle(mut self, id: BattleId, original: IdentityToken, clone_health: f32) -> Self {
        self.battles.push(BattleSnapshot {
            id,
            actors: vec![BattleActor {
                roster: vec![BattleParticipant {
                    original: Some(CreatureStats::new(original, CREATURE_MAX, CREATURE_MAX)),
                    effected: Some(CreatureStats::new(
                        IdentityToken::new(),
                        clone_health,
                        CREATURE_MAX,
                    )),
                }],
            }],
        });
        self
    }

    pub fn with_client_record(mut self, record: ClientBattleRecord) -> Self {
        self.client
            .get_or_insert_with(ClientBattle::default)
            .side1
            .get_or_insert_with(ClientBattleSide::default)
            .active
            .push(Some(record));
        self
    }
}

impl Extension for BattleExtension {
    fn id(&self) -> ExtensionId {
        ExtensionId::new(ExtensionId::CREATURE_BATTLES)
    }

    fn creature_model(&self) -> ProbeResult<Arc<dyn CreatureModel>> {
        Ok(Arc::new(Model))
    }

    fn battle_registry(&self) -> ProbeResult<Arc<dyn BattleRegistry>> {
        Ok(Arc::new(Battles(self.battles.clone())))
    }

    fn battle_ui_mirror(&self) -> ProbeResult<Arc<dyn BattleUiMirror>> {
        Ok(Arc::new(Mirror(self.client.clone())))
    }
}

/// Tracker with no extension loaded
pub fn plain_tracker(config: IndicatorConfig) -> HealthIndicatorTracker {
    HealthIndicatorTracker::new(Arc::new(CapabilityResolver::unavailable())).with_config(config)
}

pub fn extension_tracker(extension: BattleExtension, config: IndicatorConfig) -> HealthIndicatorTracker {
    let resolver = CapabilityResolver::for_extension(Arc::new(extension));
    HealthIndicatorTracker::new(Arc::new(resolver)).with_config(config)
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}
