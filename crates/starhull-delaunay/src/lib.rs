#![warn(missing_docs)]

//! Planar Delaunay triangulation for the starhull mesh generator.
//!
//! Implements the incremental Bowyer-Watson algorithm over a 2D point
//! set. The generator uses this to cap the end circles of cylinder
//! sub-meshes; callers pass points pre-scaled (x100) so the fixed
//! floating-point epsilons stay meaningful at geometry scale.
//!
//! All point comparisons are exact f32 equality. That is safe here —
//! every compared value is a copy of the same upstream float, never a
//! recomputation — and it is what makes the shared-edge test in the
//! retriangulation step exact.

use std::collections::HashMap;

use starhull_math::Point2;
use thiserror::Error;

/// Errors from triangulation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelaunayError {
    /// Fewer than three input points.
    #[error("need at least 3 points to triangulate, got {0}")]
    TooFewPoints(usize),
    /// The circumcircle denominator vanished: collinear or coincident points.
    #[error("degenerate point configuration (collinear or coincident points)")]
    DegeneratePoints,
    /// An output triangle references a point missing from the input slice.
    #[error("triangulation produced a vertex not present in the input point set")]
    UnknownVertex,
}

/// Winding order for emitted triangle index lists.
///
/// Cylinder caps need both: the lower cap keeps the input winding, the
/// upper cap reverses it so both faces point outward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    /// Emit triangles as constructed (A, B, C).
    Forward,
    /// Emit triangles reversed (C, B, A).
    Reversed,
}

/// An undirected 2D segment between two triangle corners.
///
/// Equality is order-independent point-pair equality (exact f32).
#[derive(Debug, Clone, Copy)]
pub struct TriangleEdge {
    /// First endpoint.
    pub a: Point2,
    /// Second endpoint.
    pub b: Point2,
}

impl TriangleEdge {
    /// Create an edge between two points.
    pub fn new(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }

    /// True if this edge also appears in any triangle of `others` except
    /// the one at `excluding`.
    fn is_shared_with(&self, triangles: &[Triangle2], others: &[usize], excluding: usize) -> bool {
        others.iter().any(|&idx| {
            idx != excluding && triangles[idx].edges().iter().any(|edge| edge == self)
        })
    }
}

impl PartialEq for TriangleEdge {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

/// A 2D triangle with its circumcircle precomputed at construction.
///
/// The circumcircle is derived once so the containment test during
/// insertion is O(1) per triangle.
#[derive(Debug, Clone)]
pub struct Triangle2 {
    /// First corner.
    pub a: Point2,
    /// Second corner.
    pub b: Point2,
    /// Third corner.
    pub c: Point2,
    circumcenter: Point2,
    circumradius: f32,
}

impl Triangle2 {
    /// Denominator threshold below which the circumcircle is undefined.
    const DEGENERATE_EPS: f32 = 1e-6;

    /// Build a triangle and its circumcircle.
    ///
    /// # Errors
    ///
    /// [`DelaunayError::DegeneratePoints`] when the three points are
    /// collinear or coincident.
    pub fn new(a: Point2, b: Point2, c: Point2) -> Result<Self, DelaunayError> {
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        if d.abs() < Self::DEGENERATE_EPS {
            return Err(DelaunayError::DegeneratePoints);
        }

        let aa = a.x * a.x + a.y * a.y;
        let bb = b.x * b.x + b.y * b.y;
        let cc = c.x * c.x + c.y * c.y;

        let ux = (aa * (b.y - c.y) + bb * (c.y - a.y) + cc * (a.y - b.y)) / d;
        let uy = (aa * (c.x - b.x) + bb * (a.x - c.x) + cc * (b.x - a.x)) / d;

        let circumcenter = Point2::new(ux, uy);
        let circumradius = (circumcenter - a).norm();

        Ok(Self {
            a,
            b,
            c,
            circumcenter,
            circumradius,
        })
    }

    /// The three edges of this triangle.
    pub fn edges(&self) -> [TriangleEdge; 3] {
        [
            TriangleEdge::new(self.a, self.b),
            TriangleEdge::new(self.b, self.c),
            TriangleEdge::new(self.a, self.c),
        ]
    }

    /// Boundary-inclusive circumcircle containment test.
    pub fn circumcircle_contains(&self, p: &Point2) -> bool {
        (self.circumcenter - p).norm() <= self.circumradius
    }

    /// True if this triangle shares any corner (exact equality) with `other`.
    pub fn shares_vertex_with(&self, other: &Triangle2) -> bool {
        let mine = [self.a, self.b, self.c];
        let theirs = [other.a, other.b, other.c];
        mine.iter().any(|p| theirs.iter().any(|q| p == q))
    }

    /// Build a triangle guaranteed to contain every input point.
    ///
    /// Spans the point set's centroid and the points most distant from it
    /// along X and Y, expanded by a factor of 100.
    fn containing(points: &[Point2]) -> Result<Self, DelaunayError> {
        let mut center = Point2::origin();
        for p in points {
            center.coords += p.coords;
        }
        center.coords /= points.len() as f32;

        let mut x_scale = 0.0f32;
        let mut y_scale = 0.0f32;
        for p in points {
            x_scale = x_scale.max((center.x - p.x).abs());
            y_scale = y_scale.max((center.y - p.y).abs());
        }

        Self::new(
            Point2::new(center.x - x_scale * 100.0, center.y + y_scale * 100.0),
            Point2::new(center.x, center.y - y_scale * 100.0),
            Point2::new(center.x + x_scale * 100.0, center.y + y_scale * 100.0),
        )
    }
}

/// Triangulate a 2D point set with incremental Bowyer-Watson.
///
/// Points are inserted in input order. For each point: every triangle
/// whose circumcircle contains it is marked bad; the edges of the bad set
/// not shared between two bad triangles form the retained boundary
/// polygon; the bad triangles are removed and one new triangle is fanned
/// from each boundary edge to the point. Triangles still touching the
/// super-triangle are discarded at the end.
///
/// # Errors
///
/// [`DelaunayError::TooFewPoints`] for inputs under 3 points,
/// [`DelaunayError::DegeneratePoints`] when a circumcircle denominator
/// vanishes (e.g. fully collinear input).
pub fn triangulate(points: &[Point2]) -> Result<Vec<Triangle2>, DelaunayError> {
    if points.len() < 3 {
        return Err(DelaunayError::TooFewPoints(points.len()));
    }

    let super_triangle = Triangle2::containing(points)?;
    let mut triangulation = vec![super_triangle.clone()];

    for point in points {
        let bad: Vec<usize> = (0..triangulation.len())
            .filter(|&i| triangulation[i].circumcircle_contains(point))
            .collect();

        let mut polygon: Vec<TriangleEdge> = Vec::new();
        for &i in &bad {
            for edge in triangulation[i].edges() {
                if !edge.is_shared_with(&triangulation, &bad, i) {
                    polygon.push(edge);
                }
            }
        }

        for &i in bad.iter().rev() {
            triangulation.remove(i);
        }

        for edge in polygon {
            triangulation.push(Triangle2::new(*point, edge.a, edge.b)?);
        }
    }

    triangulation.retain(|t| !t.shares_vertex_with(&super_triangle));

    Ok(triangulation)
}

/// Triangulate and emit a flat triangle-index list into `points`.
///
/// Index `i` refers to `points[i]`; lookup is by exact f32 bit pattern,
/// first occurrence wins for duplicated input points.
///
/// # Errors
///
/// Everything [`triangulate`] returns, plus
/// [`DelaunayError::UnknownVertex`] if an output corner cannot be mapped
/// back to the input slice.
pub fn triangle_indices(points: &[Point2], winding: Winding) -> Result<Vec<u32>, DelaunayError> {
    let triangulation = triangulate(points)?;

    let mut lookup: HashMap<[u32; 2], u32> = HashMap::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        lookup.entry([p.x.to_bits(), p.y.to_bits()]).or_insert(i as u32);
    }
    let index_of = |p: &Point2| -> Result<u32, DelaunayError> {
        lookup
            .get(&[p.x.to_bits(), p.y.to_bits()])
            .copied()
            .ok_or(DelaunayError::UnknownVertex)
    };

    let mut indices = Vec::with_capacity(triangulation.len() * 3);
    for triangle in &triangulation {
        match winding {
            Winding::Forward => {
                indices.push(index_of(&triangle.a)?);
                indices.push(index_of(&triangle.b)?);
                indices.push(index_of(&triangle.c)?);
            }
            Winding::Reversed => {
                indices.push(index_of(&triangle.c)?);
                indices.push(index_of(&triangle.b)?);
                indices.push(index_of(&triangle.a)?);
            }
        }
    }

    Ok(indices)
}
