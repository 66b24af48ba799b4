//! The read-only view of living entities observed by Vigil

use std::any::Any;

use crate::id::SubjectId;

/// A renderable living entity in the host world.
///
/// Implemented by the host. Vigil never mutates a subject and never keeps a
/// reference to one past the call it was handed in.
pub trait Subject {
    /// Stable id, unique for the lifetime of the process
    fn id(&self) -> SubjectId;

    /// Health as the engine itself reports it.
    ///
    /// A non-finite value means the engine could not produce a reading.
    fn native_current_health(&self) -> f32;

    /// Maximum health as the engine itself reports it
    fn native_max_health(&self) -> f32;

    /// Engine-side death flag (dead, or playing its death animation)
    fn is_dead_or_dying(&self) -> bool;

    /// Type erasure so an extension can recognize its own creature type
    fn as_any(&self) -> &dyn Any;
}

/// The host world as seen once per tick
pub trait WorldView {
    /// Every living subject currently eligible for an indicator
    fn renderable_living_subjects(&self) -> Vec<&dyn Subject>;
}
