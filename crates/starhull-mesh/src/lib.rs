#![warn(missing_docs)]

//! Growable quad/triangle mesh model for the starhull generator.
//!
//! The mesh is a face list over a vertex arena. Faces reference vertices
//! by key; shared corners are shared keys until an operation (extrude,
//! subdivide, flat export) deliberately duplicates them to produce hard
//! shading seams. The live vertex set is always derived from the faces —
//! a vertex exists exactly as long as some face references it.

mod buffer;
mod face;
mod mesh;
pub mod primitives;

pub use buffer::MeshBuffer;
pub use face::{Face, FaceKey, Material, QuadGeometry, Vertex, VertexKey};
pub use mesh::Mesh;

use starhull_delaunay::DelaunayError;
use thiserror::Error;

/// Errors from mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A face key no longer resolves to a live face.
    #[error("face key does not resolve to a live face")]
    FaceNotFound,
    /// The operation requires a quad face.
    #[error("operation requires a quad face")]
    NotAQuad,
    /// Polygon faces carry a fixed triangle list and cannot be subdivided.
    #[error("polygon faces cannot be subdivided")]
    UnsupportedSubdivision,
    /// Grid subdivision could not intersect its boundary line families.
    ///
    /// Geometrically impossible for a convex planar quad; triggering this
    /// means the input face was corrupted upstream.
    #[error("subdivision grid lines failed to intersect (corrupt quad)")]
    SubdivisionIntersection,
    /// End-cap triangulation failed.
    #[error("cap triangulation failed: {0}")]
    Delaunay(#[from] DelaunayError),
}
