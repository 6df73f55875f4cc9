//! Primitive sub-mesh builders: cube, cylinder, icosphere.
//!
//! Cylinders and icospheres are built in their own local frame; callers
//! apply a placement transform ([`Mesh::transform_all`]) and merge the
//! result into a host mesh.

use std::f32::consts::PI;

use starhull_delaunay::{triangle_indices, Winding};
use starhull_math::{Point2, Point3, Tolerance};

use crate::face::Face;
use crate::{Mesh, MeshError};

/// Axis-aligned cube centered on the origin with half-extent `size`.
///
/// Six quads with outward normals, corners shared between adjacent
/// faces. Face order: top, left, right, front, back, bottom.
pub fn cube(size: f32) -> Mesh {
    let mut mesh = Mesh::new();

    // Corner naming is side-top/bottom-front/back: LTB is the corner on
    // the left (x-), top (y+), back (z+) of the cube.
    let ltt = mesh.add_vertex(Point3::new(-size, size, -size));
    let rtt = mesh.add_vertex(Point3::new(size, size, -size));
    let rtb = mesh.add_vertex(Point3::new(size, size, size));
    let ltb = mesh.add_vertex(Point3::new(-size, size, size));

    let lbt = mesh.add_vertex(Point3::new(-size, -size, -size));
    let rbt = mesh.add_vertex(Point3::new(size, -size, -size));
    let rbb = mesh.add_vertex(Point3::new(size, -size, size));
    let lbb = mesh.add_vertex(Point3::new(-size, -size, size));

    mesh.add_face(Face::quad(rtt, rtb, ltb, ltt)); // top
    mesh.add_face(Face::quad(ltb, lbb, lbt, ltt)); // left
    mesh.add_face(Face::quad(rtt, rbt, rbb, rtb)); // right
    mesh.add_face(Face::quad(rtb, rbb, lbb, ltb)); // front
    mesh.add_face(Face::quad(ltt, lbt, rbt, rtt)); // back
    mesh.add_face(Face::quad(lbt, lbb, rbb, rbt)); // bottom

    mesh
}

/// Cylinder (or truncated cone) along Z.
///
/// `size1` and `size2` are the end-circle diameters at `z = -depth / 2`
/// and `z = +depth / 2`. Each end is capped with a polygon face whose
/// triangulation comes from Bowyer-Watson over the circle's 2D points,
/// scaled x100 so the triangulator's epsilons stay meaningful; the lower
/// cap keeps forward winding, the upper is reversed so both face
/// outward. An end circle with negligible radius (the apex of a spire
/// cone) has no cap area and is skipped.
pub fn cylinder(segments: u32, size1: f32, size2: f32, depth: f32) -> Result<Mesh, MeshError> {
    let mut mesh = Mesh::new();
    let tol = Tolerance::DEFAULT;

    let mut lower = Vec::with_capacity(segments as usize);
    let mut upper = Vec::with_capacity(segments as usize);

    for i in 0..segments {
        let angle = i as f32 / segments as f32 * PI * 2.0;
        lower.push(mesh.add_vertex(Point3::new(
            angle.cos() * size1 / 2.0,
            angle.sin() * size1 / 2.0,
            -depth / 2.0,
        )));
        upper.push(mesh.add_vertex(Point3::new(
            angle.cos() * size2 / 2.0,
            angle.sin() * size2 / 2.0,
            depth / 2.0,
        )));
    }

    let n = segments as usize;
    for i in 0..n {
        mesh.add_face(Face::quad(
            upper[i],
            upper[(i + 1) % n],
            lower[(i + 1) % n],
            lower[i],
        ));
    }

    if !tol.is_zero(size1 / 2.0) {
        let points: Vec<Point2> = lower
            .iter()
            .map(|&v| {
                let p = mesh.position(v);
                Point2::new(p.x * 100.0, p.y * 100.0)
            })
            .collect();
        let tris = triangle_indices(&points, Winding::Forward)?;
        mesh.add_face(Face::polygon(lower, tris));
    }

    if !tol.is_zero(size2 / 2.0) {
        let points: Vec<Point2> = upper
            .iter()
            .map(|&v| {
                let p = mesh.position(v);
                Point2::new(p.x * 100.0, p.y * 100.0)
            })
            .collect();
        let tris = triangle_indices(&points, Winding::Reversed)?;
        mesh.add_face(Face::polygon(upper, tris));
    }

    Ok(mesh)
}

/// Icosphere: a unit icosahedron recursively quadrisected `subdivisions`
/// times (midpoints re-projected onto the unit sphere), then scaled so
/// the radius is `size / 2`.
pub fn icosphere(subdivisions: u32, size: f32) -> Result<Mesh, MeshError> {
    let mut mesh = Mesh::new();

    let t = (1.0 + 5.0f32.sqrt()) / 2.0;
    let raw = [
        Point3::new(-1.0, t, 0.0),
        Point3::new(1.0, t, 0.0),
        Point3::new(-1.0, -t, 0.0),
        Point3::new(1.0, -t, 0.0),
        Point3::new(0.0, -1.0, t),
        Point3::new(0.0, 1.0, t),
        Point3::new(0.0, -1.0, -t),
        Point3::new(0.0, 1.0, -t),
        Point3::new(t, 0.0, -1.0),
        Point3::new(t, 0.0, 1.0),
        Point3::new(-t, 0.0, -1.0),
        Point3::new(-t, 0.0, 1.0),
    ];
    let v: Vec<_> = raw
        .iter()
        .map(|p| mesh.add_vertex(Point3::from(p.coords / p.coords.norm())))
        .collect();

    const FACES: [(usize, usize, usize); 20] = [
        (0, 11, 5),
        (0, 5, 1),
        (0, 1, 7),
        (0, 7, 10),
        (0, 10, 11),
        (1, 5, 9),
        (5, 11, 4),
        (11, 10, 2),
        (10, 7, 6),
        (7, 1, 8),
        (3, 9, 4),
        (3, 4, 2),
        (3, 2, 6),
        (3, 6, 8),
        (3, 8, 9),
        (4, 9, 5),
        (2, 4, 11),
        (6, 2, 10),
        (8, 6, 7),
        (9, 8, 1),
    ];
    for (a, b, c) in FACES {
        mesh.add_face(Face::triangle(v[a], v[b], v[c]));
    }

    for face in mesh.face_keys() {
        mesh.subdivide(face, subdivisions)?;
    }

    for key in mesh.vertex_keys() {
        let p = mesh.position(key);
        mesh.set_position(key, Point3::from(p.coords * size / 2.0));
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cylinder_face_counts() {
        let mesh = cylinder(6, 1.0, 1.0, 1.0).unwrap();
        // 6 side quads + 2 polygon caps
        assert_eq!(mesh.face_count(), 8);

        // Each cap triangulates a 6-gon into 4 triangles.
        let caps: Vec<_> = mesh
            .iter_faces()
            .filter(|(_, f)| matches!(f, Face::Polygon { .. }))
            .collect();
        assert_eq!(caps.len(), 2);
        for (_, cap) in caps {
            assert_eq!(cap.triangle_count(), 4);
        }
    }

    #[test]
    fn test_cylinder_truncated_cone_radii() {
        let mesh = cylinder(8, 1.0, 2.0, 3.0).unwrap();
        let mut lower_max = 0.0f32;
        let mut upper_max = 0.0f32;
        for key in mesh.vertex_keys() {
            let p = mesh.position(key);
            let r = (p.x * p.x + p.y * p.y).sqrt();
            if p.z < 0.0 {
                lower_max = lower_max.max(r);
            } else {
                upper_max = upper_max.max(r);
            }
        }
        assert!((lower_max - 0.5).abs() < 1e-5);
        assert!((upper_max - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_spire_cone_skips_degenerate_cap() {
        let mesh = cylinder(6, 0.0, 1.0, 1.0).unwrap();
        // 6 side quads + upper cap only
        assert_eq!(mesh.face_count(), 7);
    }

    #[test]
    fn test_icosphere_base_counts_and_radius() {
        let mesh = icosphere(0, 2.0).unwrap();
        assert_eq!(mesh.face_count(), 20);
        assert_eq!(mesh.vertex_keys().len(), 12);
        for key in mesh.vertex_keys() {
            // size = 2 leaves the unit radius in place
            assert!((mesh.position(key).coords.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_icosphere_subdivided_counts_and_radius() {
        let mesh = icosphere(1, 1.0).unwrap();
        assert_eq!(mesh.face_count(), 80);
        for key in mesh.vertex_keys() {
            assert!((mesh.position(key).coords.norm() - 0.5).abs() < 1e-5);
        }
    }
}
