//! Core 3-D diffusion-limited aggregation library.
//!
//! Main components:
//! - [`engine`] — the aggregation engine driven one `step()` per tick.
//! - [`lattice`] — the cubic occupancy grid.
//! - [`particle`] — walk directions and boundary injection.
//! - [`config`] — construction parameters.
//! - [`error`] — precondition errors.
//! - [`types`] — raw and centered coordinate aliases.

pub mod config;
pub mod engine;
pub mod error;
pub mod lattice;
pub mod particle;
pub mod types;

pub use engine::Engine;
