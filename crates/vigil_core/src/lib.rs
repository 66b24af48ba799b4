//! # vigil_core - Vigil Core
//!
//! Primitives shared by every Vigil crate:
//! - **Identifiers**: subject ids, creature identity tokens, battle ids and
//!   extension ids
//! - **Subjects**: the narrow read-only view of a living entity the health
//!   indicator core observes
//! - **Probe errors**: the failure taxonomy of optional extension lookups
//!
//! Nothing in this crate owns game state. Subjects belong to the host world;
//! Vigil only reads them.

pub mod error;
pub mod id;
pub mod subject;
pub mod version;

pub use error::*;
pub use id::*;
pub use subject::*;
pub use version::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{ProbeError, ProbeResult, RegistryError};
    pub use crate::id::{BattleId, ExtensionId, IdentityToken, SubjectId};
    pub use crate::subject::{Subject, WorldView};
    pub use crate::version::Version;
}
