//! Scripted world and in-process creature-battle extension

use std::any::Any;
use std::sync::Arc;

use parking_lot::RwLock;
use vigil_capability::*;
use vigil_core::{BattleId, IdentityToken, Subject, SubjectId, WorldView};

const PARTNER_MAX: f32 = 30.0;

/// Tick at which the partner creature is sent into battle
pub const BATTLE_START: u32 = 20;
/// Tick at which the battle ends
pub const BATTLE_END: u32 = 50;

pub struct Mob {
    pub id: SubjectId,
    pub name: &'static str,
    pub health: f32,
    pub max: f32,
    dead_since: Option<u32>,
}

impl Mob {
    fn new(name: &'static str, health: f32, max: f32) -> Self {
        Self {
            id: SubjectId::new(),
            name,
            health,
            max,
            dead_since: None,
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

/// A creature owned by the extension. The engine keeps reporting full
/// health; real values live in the extension.
pub struct Creature {
    pub id: SubjectId,
    pub identity: IdentityToken,
    pub battle: Option<BattleId>,
}

impl Subject for Creature {
    fn id(&self) -> SubjectId {
        self.id
    }

    fn native_current_health(&self) -> f32 {
        PARTNER_MAX
    }

    fn native_max_health(&self) -> f32 {
        PARTNER_MAX
    }

    fn is_dead_or_dying(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Battle state shared between the script and the extension
#[derive(Debug, Default)]
struct BattleState {
    base_health: f32,
    active: Option<ActiveBattle>,
}

#[derive(Debug, Clone, Copy)]
struct ActiveBattle {
    id: BattleId,
    original: IdentityToken,
    clone: IdentityToken,
    clone_health: f32,
}

type SharedBattles = Arc<RwLock<BattleState>>;

/// Extension backed by the script's battle state
pub struct SimExtension {
    state: SharedBattles,
}

impl Extension for SimExtension {
    fn id(&self) -> ExtensionId {
        ExtensionId::new(ExtensionId::CREATURE_BATTLES)
    }

    fn creature_model(&self) -> ProbeResult<Arc<dyn CreatureModel>> {
        Ok(Arc::new(SimModel(self.state.clone())))
    }

    fn battle_registry(&self) -> ProbeResult<Arc<dyn BattleRegistry>> {
        Ok(Arc::new(SimRegistry(self.state.clone())))
    }

    fn battle_ui_mirror(&self) -> ProbeResult<Arc<dyn BattleUiMirror>> {
        Ok(Arc::new(SimMirror(self.state.clone())))
    }
}

struct SimModel(SharedBattles);

impl CreatureModel for SimModel {
    fn creature(&self, subject: &dyn Subject) -> ProbeResult<Option<CreatureStats>> {
        let Some(creature) = subject.as_any().downcast_ref::<Creature>() else {
            return Ok(None);
        };
        let base = self.0.read().base_health;
        Ok(Some(CreatureStats::new(creature.identity, base, PARTNER_MAX)))
    }
}

struct SimRegistry(SharedBattles);

impl BattleRegistry for SimRegistry {
    fn battle_id(&self, subject: &dyn Subject) -> ProbeResult<Option<BattleId>> {
        Ok(subject
            .as_any()
            .downcast_ref::<Creature>()
            .and_then(|creature| creature.battle))
    }

    fn battle(&self, id: BattleId) -> ProbeResult<Option<BattleSnapshot>> {
        let state = self.0.read();
        let Some(battle) = state.active.filter(|battle| battle.id == id) else {
            return Ok(None);
        };

        Ok(Some(BattleSnapshot {
            id,
            actors: vec![BattleActor {
                roster: vec![BattleParticipant {
                    original: Some(CreatureStats::new(
                        battle.original,
                        state.base_health,
                        PARTNER_MAX,
                    )),
                    effected: Some(CreatureStats::new(
                        battle.clone,
                        battle.clone_health,
                        PARTNER_MAX,
                    )),
                }],
            }],
        }))
    }
}

struct SimMirror(SharedBattles);

impl BattleUiMirror for SimMirror {
    fn active_battle(&self) -> ProbeResult<Option<ClientBattle>> {
        let Some(battle) = self.0.read().active else {
            return Ok(None);
        };

        let ally = ClientBattleRecord {
            identity: battle.original,
            hp_value: battle.clone_health,
            max_hp: PARTNER_MAX,
            is_hp_flat: true,
        };
        Ok(Some(ClientBattle {
            side1: Some(ClientBattleSide {
                active: vec![Some(ally)],
            }),
            side2: None,
        }))
    }
}

/// A small world that changes on a fixed script
pub struct Scenario {
    pub mobs: Vec<Mob>,
    pub partner: Creature,
    battles: SharedBattles,
}

impl Scenario {
    pub fn new() -> Self {
        let battles = Arc::new(RwLock::new(BattleState {
            base_health: PARTNER_MAX,
            active: None,
        }));

        Self {
            mobs: vec![Mob::new("zombie", 20.0, 20.0), Mob::new("cow", 10.0, 10.0)],
            partner: Creature {
                id: SubjectId::new(),
                identity: IdentityToken::new(),
                battle: None,
            },
            battles,
        }
    }

    /// The extension to register for this world
    pub fn extension(&self) -> SimExtension {
        SimExtension {
            state: self.battles.clone(),
        }
    }

    /// Ids of every subject the script ever shows
    pub fn subject_ids(&self) -> Vec<(&'static str, SubjectId)> {
        self.mobs
            .iter()
            .map(|mob| (mob.name, mob.id))
            .chain(std::iter::once(("partner", self.partner.id)))
            .collect()
    }

    /// Apply the script for `tick`
    pub fn advance(&mut self, tick: u32) {
        for mob in &mut self.mobs {
            if mob.name == "zombie" && tick >= 10 && tick % 5 == 0 {
                mob.health = (mob.health - 4.0).max(0.0);
            }
            if mob.health <= 0.0 && mob.dead_since.is_none() {
                log::info!("[tick {}] {} died", tick, mob.name);
                mob.dead_since = Some(tick);
            }
        }

        // Corpses despawn after a short while; the cow wanders off
        self.mobs.retain(|mob| {
            let despawn = mob.dead_since.is_some_and(|since| tick >= since + 8)
                || (mob.name == "cow" && tick >= 30);
            if despawn {
                log::info!("[tick {}] {} left the world", tick, mob.name);
            }
            !despawn
        });

        let mut state = self.battles.write();
        if tick == BATTLE_START {
            let battle = ActiveBattle {
                id: BattleId::new(),
                original: self.partner.identity,
                clone: IdentityToken::new(),
                clone_health: state.base_health,
            };
            log::info!("[tick {}] partner entered battle {}", tick, battle.id);
            self.partner.battle = Some(battle.id);
            state.active = Some(battle);
        } else if tick == BATTLE_END {
            if let Some(battle) = state.active.take() {
                log::info!("[tick {}] battle {} ended", tick, battle.id);
                state.base_health = battle.clone_health;
            }
            self.partner.battle = None;
        } else if let Some(battle) = state.active.as_mut() {
            if tick % 4 == 0 {
                battle.clone_health = (battle.clone_health - 3.0).max(1.0);
            }
        }
    }
}

impl WorldView for Scenario {
    fn renderable_living_subjects(&self) -> Vec<&dyn Subject> {
        self.mobs
            .iter()
            .map(|mob| mob as &dyn Subject)
            .chain(std::iter::once(&self.partner as &dyn Subject))
            .collect()
    }
}
