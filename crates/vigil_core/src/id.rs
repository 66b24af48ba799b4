//! Identifiers for subjects, creatures, battles and extensions

use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random id
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID
            #[inline]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Build from a raw 128-bit value
            #[inline]
            pub const fn from_u128(value: u128) -> Self {
                Self(Uuid::from_u128(value))
            }

            /// The wrapped UUID
            #[inline]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Stable, process-unique id of a subject in the host world
    SubjectId,
    "SubjectId"
);

uuid_id!(
    /// A creature's identity inside an extension.
    ///
    /// The original creature keeps its token for the whole battle episode.
    /// Battle clones carry their own token, which is never known in advance.
    IdentityToken,
    "IdentityToken"
);

uuid_id!(
    /// Id of a battle in an extension's battle registry
    BattleId,
    "BattleId"
);

/// Identifier under which an optional extension registers itself
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ExtensionId(Box<str>);

impl ExtensionId {
    /// Id of the creature-battle extension Vigil integrates with by default
    pub const CREATURE_BATTLES: &'static str = "cobblemon";

    pub fn new(name: &str) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ExtensionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ExtensionId {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}
