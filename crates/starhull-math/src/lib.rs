#![warn(missing_docs)]

//! Math types for the starhull mesh generator.
//!
//! Thin wrappers around nalgebra providing domain-specific types for
//! runtime mesh geometry: points, vectors, rotations, placement
//! transforms, and tolerance constants. Everything is f32 — the output
//! of the generator is a render-ready vertex buffer and there is no
//! point carrying double precision through it.

use nalgebra::{Matrix4, Unit, UnitQuaternion, Vector2, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f32>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f32>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f32>>;

/// A point in 2D space (triangulation plane).
pub type Point2 = nalgebra::Point2<f32>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f32>;

/// A rotation, stored as a unit quaternion.
pub type Rotation = UnitQuaternion<f32>;

/// A 4x4 affine placement transform.
///
/// Used to position decoration sub-meshes (cylinders, spheres) on a host
/// face: a basis built from the face's own axes plus an origin, composed
/// with local rotations and translations.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f32>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `delta`.
    pub fn translation(delta: Vec3) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = delta.x;
        m[(1, 3)] = delta.y;
        m[(2, 3)] = delta.z;
        Self { matrix: m }
    }

    /// Rotation transform from a unit quaternion.
    pub fn rotation(rot: &Rotation) -> Self {
        Self {
            matrix: rot.to_homogeneous(),
        }
    }

    /// Build a frame from three basis axes and an origin.
    ///
    /// The axes become the columns of the upper-left 3x3, so applying the
    /// transform maps local (x, y, z) coordinates into the frame.
    pub fn from_basis(x_axis: Vec3, y_axis: Vec3, z_axis: Vec3, origin: Point3) -> Self {
        let mut m = Matrix4::identity();
        for i in 0..3 {
            m[(i, 0)] = x_axis[i];
            m[(i, 1)] = y_axis[i];
            m[(i, 2)] = z_axis[i];
            m[(i, 3)] = origin[i];
        }
        Self { matrix: m }
    }

    /// Compose: apply `other` first, then `self` (self * other).
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance.
    pub linear: f32,
}

impl Tolerance {
    /// Default tolerances for generator-scale geometry (unit-cube hulls).
    pub const DEFAULT: Self = Self { linear: 1e-5 };

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f32) -> bool {
        d.abs() < self.linear
    }

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Normalize a vector, or return zero when its length is negligible.
///
/// Degenerate faces (zero-length edges after a zero-distance extrusion)
/// must yield a well-defined zero normal instead of NaN components.
pub fn normalize_or_zero(v: &Vec3) -> Vec3 {
    let norm = v.norm();
    if norm > 1e-5 {
        v / norm
    } else {
        Vec3::zeros()
    }
}

/// Intersect two coplanar 3D lines.
///
/// Each line is given as a point and a direction (not necessarily unit
/// length). Returns the intersection point when the lines are coplanar
/// (within a small epsilon) and not parallel, `None` otherwise.
///
/// The coplanarity test is deliberately loose (1e-4): the caller feeds in
/// line families interpolated across an almost-planar quad, and the tiny
/// out-of-plane drift from float interpolation must not reject them.
pub fn line_line_intersection(
    point1: &Point3,
    dir1: &Vec3,
    point2: &Point3,
    dir2: &Vec3,
) -> Option<Point3> {
    let between = point2 - point1;
    let cross12 = dir1.cross(dir2);
    let cross_b2 = between.cross(dir2);

    let planar_factor = between.dot(&cross12);

    if planar_factor.abs() < 1e-4 && cross12.norm_squared() > 1e-4 {
        let s = cross_b2.dot(&cross12) / cross12.norm_squared();
        Some(point1 + dir1 * s)
    } else {
        None
    }
}
