#![warn(missing_docs)]

//! starhull — procedural spaceship hulls in Rust.
//!
//! One integer seed in, one render-ready mesh buffer out: a unit cube is
//! grown, perturbed and decorated through a long, seed-deterministic
//! sequence of extrusions, subdivisions and primitive placements.
//!
//! # Example
//!
//! ```rust,no_run
//! let buffer = starhull::generate(844_483_692).unwrap();
//! starhull::export::write_obj_file(&buffer, "ship.obj").unwrap();
//! ```

pub mod export;

pub use starhull_delaunay as delaunay;
pub use starhull_gen::{GenConfig, GenError, GenRng, RotationAxis, ShipGenerator};
pub use starhull_math as math;
pub use starhull_mesh::{primitives, Face, Material, Mesh, MeshBuffer, MeshError};

/// Generate a ship with the default configuration.
pub fn generate(seed: i32) -> Result<MeshBuffer, GenError> {
    generate_with(seed, &GenConfig::default())
}

/// Generate a ship with an explicit configuration.
pub fn generate_with(seed: i32, config: &GenConfig) -> Result<MeshBuffer, GenError> {
    ShipGenerator::new(seed, config.clone()).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default() {
        let buffer = generate(844_483_692).unwrap();
        assert!(buffer.num_triangles() > 12);
        assert_eq!(buffer.materials.len(), buffer.num_triangles());
    }

    #[test]
    fn test_generate_with_matches_default() {
        let a = generate(31).unwrap();
        let b = generate_with(31, &GenConfig::default()).unwrap();
        assert_eq!(a, b);
    }
}
