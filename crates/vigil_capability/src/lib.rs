//! # vigil_capability - Optional Extension Capabilities
//!
//! Discovers, once per process, whether a creature-battle extension is
//! loaded and exposes what it can answer as three independently gated tiers:
//!
//! | Tier | Trait | Answers |
//! |------|-------|---------|
//! | 0 | [`CreatureModel`] | is this subject a creature, its health and identity |
//! | 1 | [`BattleRegistry`] | battle membership and the battle clone's health |
//! | 2 | [`BattleUiMirror`] | health as the extension's own battle UI shows it |
//!
//! Tier 1 is only probed when tier 0 was found, tier 2 only when tier 1 was
//! found. Every query is total: a missing extension, a missing tier or a
//! failed lookup all read as "no answer".
//!
//! ```ignore
//! use vigil_capability::prelude::*;
//!
//! let mut registry = ExtensionRegistry::new();
//! registry.register(MyBattleExtension::default())?;
//!
//! let resolver = CapabilityResolver::from_registry(&registry, ExtensionId::CREATURE_BATTLES);
//! if let Some(creature) = resolver.creature(subject) {
//!     println!("{} / {}", creature.current_health, creature.max_health);
//! }
//! ```

pub mod extension;
pub mod resolver;
pub mod tiers;

pub mod prelude {
    pub use crate::extension::{Extension, ExtensionRegistry};
    pub use crate::resolver::{CapabilityResolver, DiscoveryReport, TierStatus};
    pub use crate::tiers::{
        BattleActor, BattleParticipant, BattleRegistry, BattleSnapshot, BattleUiMirror,
        ClientBattle, ClientBattleRecord, ClientBattleSide, CreatureModel, CreatureStats,
    };
    pub use vigil_core::{ExtensionId, ProbeError, ProbeResult, Version};
}

pub use prelude::*;
