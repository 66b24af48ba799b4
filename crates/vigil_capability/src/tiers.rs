//! Capability tier traits and the records they return
//!
//! Extensions hand back plain snapshots rather than live objects, so the
//! resolver never holds on to extension state between calls.

use vigil_core::{BattleId, IdentityToken, ProbeResult, Subject};

/// Health and identity of one creature as the extension stores it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreatureStats {
    /// Identity token of this creature object
    pub identity: IdentityToken,
    /// Current health
    pub current_health: f32,
    /// Maximum health
    pub max_health: f32,
}

impl CreatureStats {
    pub fn new(identity: IdentityToken, current_health: f32, max_health: f32) -> Self {
        Self {
            identity,
            current_health,
            max_health,
        }
    }
}

/// Tier 0: the extension's base creature model
pub trait CreatureModel: Send + Sync {
    /// The creature behind `subject`, or `None` if the subject is not one
    /// of the extension's creatures.
    fn creature(&self, subject: &dyn Subject) -> ProbeResult<Option<CreatureStats>>;
}

/// One roster entry of a battle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BattleParticipant {
    /// The creature as it entered the battle (stable identity)
    pub original: Option<CreatureStats>,
    /// The battle clone that receives in-battle damage
    pub effected: Option<CreatureStats>,
}

/// One side's participant roster
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BattleActor {
    pub roster: Vec<BattleParticipant>,
}

/// A battle as held by the server-side registry
#[derive(Debug, Clone, PartialEq)]
pub struct BattleSnapshot {
    pub id: BattleId,
    pub actors: Vec<BattleActor>,
}

impl BattleSnapshot {
    /// Find the roster entry whose *original* creature carries `identity`.
    ///
    /// Clones are recreated for every battle, so only the original token
    /// can be known before the lookup.
    pub fn participant(&self, identity: IdentityToken) -> Option<&BattleParticipant> {
        self.actors
            .iter()
            .flat_map(|actor| actor.roster.iter())
            .find(|entry| entry.original.is_some_and(|o| o.identity == identity))
    }
}

/// Tier 1: the server-side battle registry
pub trait BattleRegistry: Send + Sync {
    /// Id of the battle `subject` is currently in, if any
    fn battle_id(&self, subject: &dyn Subject) -> ProbeResult<Option<BattleId>>;

    /// Look a battle up by id
    fn battle(&self, id: BattleId) -> ProbeResult<Option<BattleSnapshot>>;
}

/// A creature as mirrored by the client battle UI
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientBattleRecord {
    pub identity: IdentityToken,
    /// Exact health when `is_hp_flat`, otherwise a 0..1 ratio
    pub hp_value: f32,
    pub max_hp: f32,
    /// Allies are shown with exact values, opponents as a ratio
    pub is_hp_flat: bool,
}

/// One side of the client battle; slots may be empty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientBattleSide {
    pub active: Vec<Option<ClientBattleRecord>>,
}

impl ClientBattleSide {
    pub fn find(&self, identity: IdentityToken) -> Option<&ClientBattleRecord> {
        self.active
            .iter()
            .flatten()
            .find(|record| record.identity == identity)
    }
}

/// The battle currently shown by the client
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientBattle {
    pub side1: Option<ClientBattleSide>,
    pub side2: Option<ClientBattleSide>,
}

impl ClientBattle {
    /// Search side 1, then side 2
    pub fn find(&self, identity: IdentityToken) -> Option<&ClientBattleRecord> {
        self.side1
            .as_ref()
            .and_then(|side| side.find(identity))
            .or_else(|| self.side2.as_ref().and_then(|side| side.find(identity)))
    }
}

/// Tier 2: the client-local battle UI mirror
pub trait BattleUiMirror: Send + Sync {
    /// The battle the client is displaying right now, if any
    fn active_battle(&self) -> ProbeResult<Option<ClientBattle>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(id: u128, hp: f32) -> CreatureStats {
        CreatureStats::new(IdentityToken::from_u128(id), hp, 30.0)
    }

    #[test]
    fn test_participant_matches_original_identity() {
        let battle = BattleSnapshot {
            id: BattleId::from_u128(1),
            actors: vec![
                BattleActor {
                    roster: vec![BattleParticipant {
                        original: Some(stats(10, 30.0)),
                        effected: Some(stats(11, 25.0)),
                    }],
                },
                BattleActor {
                    roster: vec![
                        BattleParticipant {
                            original: None,
                            effected: Some(stats(20, 1.0)),
                        },
                        BattleParticipant {
                            original: Some(stats(20, 30.0)),
                            effected: Some(stats(21, 12.0)),
                        },
                    ],
                },
            ],
        };

        let found = battle.participant(IdentityToken::from_u128(20)).unwrap();
        assert_eq!(found.effected.unwrap().current_health, 12.0);

        // Clone tokens are not lookup keys
        assert!(battle.participant(IdentityToken::from_u128(21)).is_none());
    }

    #[test]
    fn test_client_battle_searches_both_sides() {
        let record = ClientBattleRecord {
            identity: IdentityToken::from_u128(5),
            hp_value: 0.5,
            max_hp: 40.0,
            is_hp_flat: false,
        };
        let battle = ClientBattle {
            side1: Some(ClientBattleSide { active: vec![None] }),
            side2: Some(ClientBattleSide {
                active: vec![Some(record)],
            }),
        };

        assert_eq!(battle.find(IdentityToken::from_u128(5)), Some(&record));
        assert!(battle.find(IdentityToken::from_u128(6)).is_none());
        assert!(ClientBattle::default().find(IdentityToken::from_u128(5)).is_none());
    }
}
