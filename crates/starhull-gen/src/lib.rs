#![warn(missing_docs)]

//! Seed-deterministic spaceship hull generation.
//!
//! A single integer seed drives the whole pipeline: a unit cube grows
//! hull segments face by face, sprouts asymmetric protrusions, then
//! every remaining face is classified by orientation and decorated
//! (engine exhausts, surface grids, antennas, weapon turrets, spheres,
//! discs, cylinder clusters). Every random draw comes from one ordered
//! stream, and the draw order is part of the output contract: the same
//! seed always produces byte-identical geometry.

mod config;
mod generator;
mod rng;

pub use config::{GenConfig, RotationAxis};
pub use generator::ShipGenerator;
pub use rng::GenRng;

use starhull_mesh::MeshError;
use thiserror::Error;

/// Errors from ship generation.
#[derive(Error, Debug)]
pub enum GenError {
    /// A mesh operator hit a corrupted invariant.
    #[error(transparent)]
    Mesh(#[from] MeshError),
    /// A face frame collapsed and could not be inverted for scaling.
    #[error("face basis is degenerate and cannot be inverted")]
    DegenerateFaceBasis,
}
