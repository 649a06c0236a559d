use glam::{IVec3, UVec3};

/// Raw lattice coordinate, each axis in `[0, size)`.
///
/// This is what [`crate::engine::Engine::step`] reports and what the
/// lattice is indexed with.
pub type RawPos = UVec3;

/// Caller-facing coordinate, centered on the middle cell of the lattice.
///
/// Converts to a [`RawPos`] by adding the engine margin on every axis.
pub type CenteredPos = IVec3;
