//! Once-only capability discovery and total, best-effort queries

use std::fmt;
use std::sync::{Arc, OnceLock};

use vigil_core::{BattleId, ExtensionId, IdentityToken, ProbeError, ProbeResult, Subject, Version};

use crate::extension::{Extension, ExtensionRegistry};
use crate::tiers::{
    BattleParticipant, BattleRegistry, BattleUiMirror, ClientBattleRecord, CreatureModel,
    CreatureStats,
};

/// Outcome of probing one tier
#[derive(Debug, Clone, PartialEq)]
pub enum TierStatus {
    /// Probe succeeded; queries will be answered
    Available,
    /// Probe ran and failed
    Unavailable(String),
    /// Not probed because a lower tier is missing
    Skipped,
}

impl TierStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, TierStatus::Available)
    }
}

/// Per-tier result of discovery, for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryReport {
    pub extension: ExtensionId,
    pub creature_model: TierStatus,
    pub battle_registry: TierStatus,
    pub battle_ui: TierStatus,
}

struct Discovered {
    creature: Option<Arc<dyn CreatureModel>>,
    battles: Option<Arc<dyn BattleRegistry>>,
    battle_ui: Option<Arc<dyn BattleUiMirror>>,
    report: DiscoveryReport,
}

impl Discovered {
    fn nothing(extension: ExtensionId) -> Self {
        Self {
            creature: None,
            battles: None,
            battle_ui: None,
            report: DiscoveryReport {
                extension,
                creature_model: TierStatus::Skipped,
                battle_registry: TierStatus::Skipped,
                battle_ui: TierStatus::Skipped,
            },
        }
    }
}

/// Resolves what the optional extension can answer.
///
/// Discovery happens on the first query and never again; concurrent first
/// queries block on the same discovery instead of repeating it. Every query
/// is total: probe errors are logged at trace level and read as "no answer".
pub struct CapabilityResolver {
    target: ExtensionId,
    source: Option<Arc<dyn Extension>>,
    required: Version,
    discovered: OnceLock<Discovered>,
}

impl CapabilityResolver {
    /// Accessor surface version this resolver was written against
    pub const REQUIRED_VERSION: Version = Version::new(1, 0, 0);

    /// Resolve against whatever is registered under `target`
    pub fn from_registry(registry: &ExtensionRegistry, target: impl Into<ExtensionId>) -> Self {
        let target = target.into();
        let source = registry.get(&target);
        Self {
            target,
            source,
            required: Self::REQUIRED_VERSION,
            discovered: OnceLock::new(),
        }
    }

    /// Resolve against a specific extension instance
    pub fn for_extension(extension: Arc<dyn Extension>) -> Self {
        Self {
            target: extension.id(),
            source: Some(extension),
            required: Self::REQUIRED_VERSION,
            discovered: OnceLock::new(),
        }
    }

    /// A resolver for which every tier is unavailable
    pub fn unavailable() -> Self {
        Self {
            target: ExtensionId::new(ExtensionId::CREATURE_BATTLES),
            source: None,
            required: Self::REQUIRED_VERSION,
            discovered: OnceLock::new(),
        }
    }

    /// Require a different extension API version
    pub fn with_required_version(mut self, required: Version) -> Self {
        self.required = required;
        self
    }

    fn discovered(&self) -> &Discovered {
        self.discovered.get_or_init(|| self.discover())
    }

    fn discover(&self) -> Discovered {
        let mut found = Discovered::nothing(self.target.clone());

        let Some(extension) = self.source.as_ref() else {
            log::info!(
                "Extension '{}' not detected - using native health values for all subjects",
                self.target
            );
            found.report.creature_model = TierStatus::Unavailable("extension not registered".into());
            return found;
        };

        let version = extension.version();
        let creature = if version.satisfies(&self.required) {
            extension.creature_model()
        } else {
            Err(ProbeError::VersionMismatch {
                required: self.required,
                found: version,
            })
        };

        match creature {
            Ok(model) => {
                log::info!("Extension '{}' v{} creature integration initialized", self.target, version);
                found.creature = Some(model);
                found.report.creature_model = TierStatus::Available;
            }
            Err(err) => {
                log::info!(
                    "Extension '{}' not usable ({}) - using native health values for all subjects",
                    self.target,
                    err
                );
                found.report.creature_model = TierStatus::Unavailable(err.to_string());
                return found;
            }
        }

        match extension.battle_registry() {
            Ok(battles) => {
                log::info!("Extension '{}' battle system integration initialized", self.target);
                found.battles = Some(battles);
                found.report.battle_registry = TierStatus::Available;
            }
            Err(err) => {
                log::info!(
                    "Extension '{}' battle system not accessible ({}) - battle-only mode may not work correctly",
                    self.target,
                    err
                );
                found.report.battle_registry = TierStatus::Unavailable(err.to_string());
                return found;
            }
        }

        match extension.battle_ui_mirror() {
            Ok(mirror) => {
                log::info!("Extension '{}' battle UI sync enabled", self.target);
                found.battle_ui = Some(mirror);
                found.report.battle_ui = TierStatus::Available;
            }
            Err(err) => {
                log::info!(
                    "Extension '{}' battle UI not accessible ({}) - falling back to battle registry health",
                    self.target,
                    err
                );
                found.report.battle_ui = TierStatus::Unavailable(err.to_string());
            }
        }

        found
    }

    /// Swallow a probe error, keeping a trace of it
    fn answer<T>(&self, what: &str, result: ProbeResult<Option<T>>) -> Option<T> {
        match result {
            Ok(value) => value,
            Err(err) => {
                log::trace!("{} lookup via '{}' failed: {}", what, self.target, err);
                None
            }
        }
    }

    /// Per-tier discovery outcome (runs discovery if it has not run yet)
    pub fn discovery(&self) -> &DiscoveryReport {
        &self.discovered().report
    }

    /// Tier 0 is usable
    pub fn is_extension_available(&self) -> bool {
        self.discovered().creature.is_some()
    }

    /// Tier 1 is usable
    pub fn is_battle_system_available(&self) -> bool {
        self.discovered().battles.is_some()
    }

    /// Tier 2 is usable
    pub fn is_battle_ui_available(&self) -> bool {
        self.discovered().battle_ui.is_some()
    }

    /// Tier 0: the extension creature behind `subject`
    pub fn creature(&self, subject: &dyn Subject) -> Option<CreatureStats> {
        let model = self.discovered().creature.as_ref()?;
        self.answer("creature", model.creature(subject))
    }

    pub fn is_extension_creature(&self, subject: &dyn Subject) -> bool {
        self.creature(subject).is_some()
    }

    /// Tier 1: the battle `subject` is in
    pub fn battle_id(&self, subject: &dyn Subject) -> Option<BattleId> {
        let battles = self.discovered().battles.as_ref()?;
        self.answer("battle id", battles.battle_id(subject))
    }

    /// Whether `subject` is an extension creature with a live battle id
    pub fn is_in_battle(&self, subject: &dyn Subject) -> bool {
        self.is_battle_system_available()
            && self.is_extension_creature(subject)
            && self.battle_id(subject).is_some()
    }

    /// Tier 1: the roster entry for `creature`, matched on its original identity
    pub fn battle_participant(
        &self,
        subject: &dyn Subject,
        creature: &CreatureStats,
    ) -> Option<BattleParticipant> {
        let battles = self.discovered().battles.as_ref()?;
        let battle_id = self.answer("battle id", battles.battle_id(subject))?;
        let battle = self.answer("battle", battles.battle(battle_id))?;
        let participant = battle.participant(creature.identity).copied();
        if participant.is_none() {
            log::trace!(
                "No roster entry for creature {} in battle {}",
                creature.identity,
                battle_id
            );
        }
        participant
    }

    /// Tier 2: the client UI record for a creature identity
    pub fn battle_ui_record(&self, identity: IdentityToken) -> Option<ClientBattleRecord> {
        let mirror = self.discovered().battle_ui.as_ref()?;
        let battle = self.answer("client battle", mirror.active_battle())?;
        battle.find(identity).copied()
    }
}

impl Default for CapabilityResolver {
    fn default() -> Self {
        Self::unavailable()
    }
}

impl fmt::Debug for CapabilityResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityResolver")
            .field("target", &self.target)
            .field("registered", &self.source.is_some())
            .field("required", &self.required)
            .field("discovery", &self.discovered.get().map(|d| &d.report))
            .finish()
    }
}
