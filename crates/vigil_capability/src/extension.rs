//! Extension registration
//!
//! The host registers whatever optional integrations it was built or loaded
//! with. Vigil looks its target extension up by id the first time a
//! capability is needed; an id nobody registered is the "extension absent"
//! case, not an error.

use std::collections::BTreeMap;
use std::sync::Arc;

use vigil_core::{ExtensionId, ProbeError, ProbeResult, RegistryError, Version};

use crate::tiers::{BattleRegistry, BattleUiMirror, CreatureModel};

/// An optional integration that can supply capability tiers.
///
/// Each probe is called at most once per resolver. Returning an error means
/// the tier is not supported by this build of the extension.
pub trait Extension: Send + Sync {
    /// Identifier the extension registers under
    fn id(&self) -> ExtensionId;

    /// Version of the accessor surface this extension implements
    fn version(&self) -> Version {
        Version::new(1, 0, 0)
    }

    /// Tier 0
    fn creature_model(&self) -> ProbeResult<Arc<dyn CreatureModel>>;

    /// Tier 1
    fn battle_registry(&self) -> ProbeResult<Arc<dyn BattleRegistry>> {
        Err(ProbeError::missing("battle registry"))
    }

    /// Tier 2
    fn battle_ui_mirror(&self) -> ProbeResult<Arc<dyn BattleUiMirror>> {
        Err(ProbeError::missing("battle UI mirror"))
    }
}

/// Registry of available extensions
#[derive(Default)]
pub struct ExtensionRegistry {
    extensions: BTreeMap<String, Arc<dyn Extension>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self {
            extensions: BTreeMap::new(),
        }
    }

    /// Register an extension under its own id
    pub fn register<E: Extension + 'static>(&mut self, extension: E) -> Result<(), RegistryError> {
        self.register_arc(Arc::new(extension))
    }

    /// Register an already shared extension
    pub fn register_arc(&mut self, extension: Arc<dyn Extension>) -> Result<(), RegistryError> {
        let name = extension.id().name().to_string();
        if self.extensions.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered(name));
        }

        log::debug!("Registered extension '{}' v{}", name, extension.version());
        self.extensions.insert(name, extension);
        Ok(())
    }

    pub fn get(&self, id: &ExtensionId) -> Option<Arc<dyn Extension>> {
        self.extensions.get(id.name()).cloned()
    }

    pub fn contains(&self, id: &ExtensionId) -> bool {
        self.extensions.contains_key(id.name())
    }

    /// Registered ids in name order
    pub fn ids(&self) -> impl Iterator<Item = ExtensionId> + '_ {
        self.extensions.keys().map(|name| ExtensionId::new(name))
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}
