//! Vertices, faces, and quad geometry queries.

use slotmap::new_key_type;
use starhull_math::{normalize_or_zero, Point3, Transform, Vec3};

new_key_type! {
    /// Arena key for a mesh vertex.
    pub struct VertexKey;
    /// Arena key for a mesh face.
    pub struct FaceKey;
}

/// A mesh vertex: a position in the owning mesh's arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// World-space position.
    pub position: Point3,
}

impl Vertex {
    /// Create a vertex at `position`.
    pub fn new(position: Point3) -> Self {
        Self { position }
    }
}

/// Material tag carried by every face. Export-only; no geometric effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Material {
    /// Base hull plating.
    #[default]
    Hull = 0,
    /// Lit hull panels.
    HullLights = 1,
    /// Dark hull plating.
    HullDark = 2,
    /// Glowing engine-exhaust interior.
    ExhaustBurn = 3,
    /// Glowing disc trim.
    GlowDisc = 4,
}

impl Material {
    /// The small-integer tag emitted into mesh buffers.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Recover a material from its buffer tag.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Material::Hull),
            1 => Some(Material::HullLights),
            2 => Some(Material::HullDark),
            3 => Some(Material::ExhaustBurn),
            4 => Some(Material::GlowDisc),
            _ => None,
        }
    }

    /// Human-readable name, used by text exports.
    pub fn name(self) -> &'static str {
        match self {
            Material::Hull => "hull",
            Material::HullLights => "hull_lights",
            Material::HullDark => "hull_dark",
            Material::ExhaustBurn => "exhaust_burn",
            Material::GlowDisc => "glow_disc",
        }
    }
}

/// A mesh face.
///
/// Quads are the workhorse: extrusion and grid subdivision operate on
/// them, and their fixed winding order (left-top, left-bottom,
/// right-bottom, right-top) is the invariant every operator preserves.
/// Triangles exist only for icospheres and support recursive
/// quadrisection. Polygons carry an explicit triangle-index list fixed at
/// construction (triangulated cylinder caps) and answer no geometric
/// queries.
#[derive(Debug, Clone)]
pub enum Face {
    /// Four corners in [LT, LB, RB, RT] winding.
    Quad {
        /// Corner keys.
        verts: [VertexKey; 4],
        /// Export material.
        material: Material,
    },
    /// Three corners.
    Triangle {
        /// Corner keys.
        verts: [VertexKey; 3],
        /// Export material.
        material: Material,
    },
    /// Arbitrary corner list plus a fixed triangulation into it.
    Polygon {
        /// Corner keys.
        verts: Vec<VertexKey>,
        /// Triangle corner indices into `verts`, flat, multiple of 3.
        triangles: Vec<u32>,
        /// Export material.
        material: Material,
    },
}

impl Face {
    /// Quad from corners in [LT, LB, RB, RT] order.
    pub fn quad(
        left_top: VertexKey,
        left_bottom: VertexKey,
        right_bottom: VertexKey,
        right_top: VertexKey,
    ) -> Self {
        Face::Quad {
            verts: [left_top, left_bottom, right_bottom, right_top],
            material: Material::default(),
        }
    }

    /// Triangle from three corners.
    pub fn triangle(a: VertexKey, b: VertexKey, c: VertexKey) -> Self {
        Face::Triangle {
            verts: [a, b, c],
            material: Material::default(),
        }
    }

    /// Polygon from a corner list and a flat triangle-index list into it.
    pub fn polygon(verts: Vec<VertexKey>, triangles: Vec<u32>) -> Self {
        Face::Polygon {
            verts,
            triangles,
            material: Material::default(),
        }
    }

    /// The face's corner keys in winding order.
    pub fn vertices(&self) -> &[VertexKey] {
        match self {
            Face::Quad { verts, .. } => verts,
            Face::Triangle { verts, .. } => verts,
            Face::Polygon { verts, .. } => verts,
        }
    }

    /// Export material tag.
    pub fn material(&self) -> Material {
        match self {
            Face::Quad { material, .. }
            | Face::Triangle { material, .. }
            | Face::Polygon { material, .. } => *material,
        }
    }

    /// Set the export material tag.
    pub fn set_material(&mut self, new: Material) {
        match self {
            Face::Quad { material, .. }
            | Face::Triangle { material, .. }
            | Face::Polygon { material, .. } => *material = new,
        }
    }

    /// Number of triangles this face contributes to an export buffer.
    pub fn triangle_count(&self) -> usize {
        match self {
            Face::Quad { .. } => 2,
            Face::Triangle { .. } => 1,
            Face::Polygon { triangles, .. } => triangles.len() / 3,
        }
    }
}

/// Position snapshot of a quad for geometric queries.
///
/// Taken from the live mesh at query time; operators that move vertices
/// invalidate previously taken snapshots.
#[derive(Debug, Clone, Copy)]
pub struct QuadGeometry {
    /// Left-top corner position.
    pub left_top: Point3,
    /// Left-bottom corner position.
    pub left_bottom: Point3,
    /// Right-bottom corner position.
    pub right_bottom: Point3,
    /// Right-top corner position.
    pub right_top: Point3,
}

impl QuadGeometry {
    /// Outward unit normal derived from the winding order.
    pub fn normal(&self) -> Vec3 {
        let a = self.right_bottom - self.left_bottom;
        let b = self.left_top - self.left_bottom;
        normalize_or_zero(&a.cross(&-b))
    }

    /// Length of the top edge.
    pub fn width(&self) -> f32 {
        (self.right_top - self.left_top).norm()
    }

    /// Length of the left edge.
    pub fn height(&self) -> f32 {
        (self.left_bottom - self.left_top).norm()
    }

    /// Width over height, mirrored above 1 so a 1:4 face and a 4:1 face
    /// both report 4. Degenerate edges push the ratio toward the skip
    /// thresholds rather than producing NaN.
    pub fn aspect_ratio(&self) -> f32 {
        let ratio = (self.width() / self.height()).max(0.01);
        if ratio < 1.0 {
            1.0 / ratio
        } else {
            ratio
        }
    }

    /// Surface area (width times height; quads stay near-rectangular).
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Bounds center: the mean of the four corners.
    pub fn center(&self) -> Point3 {
        let sum = self.left_top.coords
            + self.left_bottom.coords
            + self.right_bottom.coords
            + self.right_top.coords;
        Point3::from(sum / 4.0)
    }

    /// Face-space placement frame.
    ///
    /// X runs along the top edge, Z points into the face (against the
    /// normal), Y completes the basis; the origin is `position` or the
    /// bounds center. Decorations are built in this frame.
    pub fn face_matrix(&self, position: Option<Point3>) -> Transform {
        let x_axis = normalize_or_zero(&(self.right_top - self.left_top));
        let z_axis = -self.normal();
        let y_axis = z_axis.cross(&x_axis);
        let origin = position.unwrap_or_else(|| self.center());
        Transform::from_basis(x_axis, y_axis, z_axis, origin)
    }
}
