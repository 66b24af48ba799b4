//! Test doubles: plain mobs, extension creatures and a configurable extension

use std::any::Any;
use std::sync::Arc;

use vigil_capability::*;
use vigil_core::{BattleId, IdentityToken, Subject, SubjectId};

pub struct Mob {
    pub id: SubjectId,
    pub health: f32,
    pub max: f32,
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

pub fn mob(health: f32, max: f32) -> Mob {
    Mob {
        id: SubjectId::new(),
        health,
        max,
    }
}

pub struct Creature {
    pub id: SubjectId,
    pub identity: IdentityToken,
    pub health: f32,
    pub battle: Option<BattleId>,
}

impl Subject for Creature {
    fn id(&self) -> SubjectId {
        self.id
    }
    fn native_current_health(&self) -> f32 {
        self.health
    }
    fn native_max_health(&self) -> f32 {
        30.0
    }
    fn is_dead_or_dying(&self) -> bool {
        false
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn creature(identity: IdentityToken, health: f32, battle: Option<BattleId>) -> Creature {
    Creature {
        id: SubjectId::new(),
        identity,
        health,
        battle,
    }
}

struct Model;

impl CreatureModel for Model {
    fn creature(&self, subject: &dyn Subject) -> ProbeResult<Option<CreatureStats>> {
        Ok(subject
            .as_any()
            .downcast_ref::<Creature>()
            .map(|c| CreatureStats::new(c.identity, c.health, 30.0)))
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
pub struct TestExtension {
    pub no_battles: bool,
    pub no_ui: bool,
    pub battles: Vec<BattleSnapshot>,
    pub client: Option<ClientBattle>,
}

impl TestExtension {
    /// Add a battle whose only roster entry clones `original` at `clone_health`
    pub fn with_battle(mut self, id: BattleId, original: IdentityToken, clone_health: f32) -> Self {
        self.battles.push(BattleSnapshot {
            id,
            actors: vec![BattleActor {
                roster: vec![BattleParticipant {
                    original: Some(CreatureStats::new(original, 30.0, 30.0)),
                    effected: Some(CreatureStats::new(IdentityToken::new(), clone_health, 30.0)),
                }],
            }],
        });
        self
    }

    /// Show `record` on side 1 of the client battle
    pub fn with_client_record(mut self, record: ClientBattleRecord) -> Self {
        let battle = self.client.get_or_insert_with(ClientBattle::default);
        battle
            .side1
            .get_or_insert_with(ClientBattleSide::default)
            .active
            .push(Some(record));
        self
    }
}

impl Extension for TestExtension {
    fn id(&self) -> ExtensionId {
        ExtensionId::new(ExtensionId::CREATURE_BATTLES)
    }

    fn creature_model(&self) -> ProbeResult<Arc<dyn CreatureModel>> {
        Ok(Arc::new(Model))
    }

    fn battle_registry(&self) -> ProbeResult<Arc<dyn BattleRegistry>> {
        if self.no_battles {
            return Err(ProbeError::missing("BattleRegistry"));
        }
        Ok(Arc::new(Battles(self.battles.clone())))
    }

    fn battle_ui_mirror(&self) -> ProbeResult<Arc<dyn BattleUiMirror>> {
        if self.no_ui {
            return Err(ProbeError::missing("CobblemonClient"));
        }
        Ok(Arc::new(Mirror(self.client.clone())))
    }
}

pub fn resolver_with(extension: TestExtension) -> CapabilityResolver {
    CapabilityResolver::for_extension(Arc::new(extension))
}
