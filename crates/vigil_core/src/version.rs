//! Extension API versions

use std::cmp::Ordering;
use std::fmt;

/// Version of the accessor surface an extension exposes.
///
/// Vigil declares the version it was written against; an extension whose
/// version is incompatible is treated exactly like a missing extension.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl Version {
    #[inline]
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self { major, minor, patch }
    }

    /// Whether an extension at `self` can serve a consumer that requires `required`
    /// (same major, at least the required minor/patch).
    pub fn satisfies(&self, required: &Version) -> bool {
        self.major == required.major && self >= required
    }

    #[inline]
    const fn key(&self) -> u64 {
        (self.major as u64) << 32 | (self.minor as u64) << 16 | self.patch as u64
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version({})", self)
    }
}
