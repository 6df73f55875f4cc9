//! Conversion of a mesh into a flat render buffer.

use serde::{Deserialize, Serialize};
use slotmap::SecondaryMap;
use starhull_math::{normalize_or_zero, Vec3};
use tracing::debug;

use crate::face::Face;
use crate::Mesh;

/// A finalized mesh, flattened for a host renderer.
///
/// Positions are recentered on the mesh's centroid of mass. Triangle
/// indices wind the way the faces do; `materials` carries one tag per
/// triangle, pre-expanded from the per-face tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshBuffer {
    /// Flat vertex positions `[x0, y0, z0, x1, y1, z1, ...]`.
    pub vertices: Vec<f32>,
    /// Flat triangle indices `[i0, i1, i2, ...]`.
    pub indices: Vec<u32>,
    /// Flat per-vertex normals, same length as `vertices`.
    pub normals: Vec<f32>,
    /// One material tag per triangle.
    pub materials: Vec<u8>,
}

impl MeshBuffer {
    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Per-face triangle corner slots, as offsets into the face's own
/// vertex list. Quads split along the LT-RB diagonal.
fn face_triangle_slots(face: &Face) -> Vec<u32> {
    match face {
        Face::Quad { .. } => vec![0, 2, 1, 0, 3, 2],
        Face::Triangle { .. } => vec![0, 1, 2],
        Face::Polygon { triangles, .. } => triangles.clone(),
    }
}

impl Mesh {
    /// Flatten the mesh into a render buffer.
    ///
    /// Every face-vertex occurrence gets its own position entry, in face
    /// order. With `smooth` off (the default look) each occurrence also
    /// gets its own index, so every seam shades hard. With `smooth` on,
    /// occurrences of the same vertex share one index — the last
    /// occurrence's slot — and corners shade averaged across faces.
    pub fn to_buffer(&self, smooth: bool) -> MeshBuffer {
        let mut positions: Vec<Vec3> = Vec::new();
        let mut shared: SecondaryMap<crate::VertexKey, u32> = SecondaryMap::new();

        // Pass 1: lay out position slots and index assignments.
        for (_, face) in self.iter_faces() {
            for &v in face.vertices() {
                let slot = positions.len() as u32;
                positions.push(self.position(v).coords);
                shared.insert(v, slot);
            }
        }

        // Pass 2: emit triangles against either the shared or the
        // per-occurrence slots.
        let mut indices: Vec<u32> = Vec::new();
        let mut materials: Vec<u8> = Vec::new();
        let mut base = 0u32;
        for (_, face) in self.iter_faces() {
            let verts = face.vertices();
            for slot in face_triangle_slots(face) {
                if smooth {
                    indices.push(shared[verts[slot as usize]]);
                } else {
                    indices.push(base + slot);
                }
            }
            materials.extend(std::iter::repeat(face.material().tag()).take(face.triangle_count()));
            base += verts.len() as u32;
        }

        // Recenter on the centroid of mass.
        let count = positions.len().max(1) as f32;
        let center: Vec3 = positions.iter().sum::<Vec3>() / count;
        for p in &mut positions {
            *p -= center;
        }

        // Area-weighted normal accumulation per index slot, the way a
        // host engine would recalculate them.
        let mut normals = vec![Vec3::zeros(); positions.len()];
        for tri in indices.chunks(3) {
            let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let n = (positions[i1] - positions[i0]).cross(&(positions[i2] - positions[i0]));
            normals[i0] += n;
            normals[i1] += n;
            normals[i2] += n;
        }
        for n in &mut normals {
            *n = normalize_or_zero(n);
        }

        debug!(
            vertices = positions.len(),
            triangles = indices.len() / 3,
            smooth,
            "flattened mesh buffer"
        );

        MeshBuffer {
            vertices: positions.iter().flat_map(|p| [p.x, p.y, p.z]).collect(),
            indices,
            normals: normals.iter().flat_map(|n| [n.x, n.y, n.z]).collect(),
            materials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives;
    use crate::Material;
    use starhull_math::{Transform, Vec3};
    use std::collections::BTreeSet;

    #[test]
    fn test_flat_buffer_shape() {
        let mesh = primitives::cube(1.0);
        let buf = mesh.to_buffer(false);

        assert_eq!(buf.num_vertices(), 24); // 6 faces x 4 occurrences
        assert_eq!(buf.num_triangles(), 12);
        assert_eq!(buf.normals.len(), buf.vertices.len());
        assert_eq!(buf.materials.len(), buf.num_triangles());
        assert!(buf.indices.iter().all(|&i| (i as usize) < buf.num_vertices()));

        // Hard edges: every occurrence keeps its own slot.
        let distinct: BTreeSet<u32> = buf.indices.iter().copied().collect();
        assert_eq!(distinct.len(), 24);
    }

    #[test]
    fn test_smooth_buffer_shares_corners() {
        let mesh = primitives::cube(1.0);
        let buf = mesh.to_buffer(true);

        // Same occupancy layout, but only 8 distinct index slots.
        assert_eq!(buf.num_vertices(), 24);
        let distinct: BTreeSet<u32> = buf.indices.iter().copied().collect();
        assert_eq!(distinct.len(), 8);
    }

    #[test]
    fn test_export_recenters_on_centroid() {
        let mut mesh = primitives::cube(1.0);
        mesh.transform_all(&Transform::translation(Vec3::new(3.0, -2.0, 7.0)));
        let buf = mesh.to_buffer(false);

        let mut mean = [0.0f32; 3];
        for chunk in buf.vertices.chunks(3) {
            mean[0] += chunk[0];
            mean[1] += chunk[1];
            mean[2] += chunk[2];
        }
        let n = buf.num_vertices() as f32;
        for m in mean {
            assert!((m / n).abs() < 1e-5);
        }
    }

    #[test]
    fn test_materials_expand_per_triangle() {
        let mut mesh = primitives::cube(1.0);
        let face = mesh.face_keys()[0];
        mesh.face_mut(face).unwrap().set_material(Material::ExhaustBurn);
        let buf = mesh.to_buffer(false);

        assert_eq!(buf.materials[0], Material::ExhaustBurn.tag());
        assert_eq!(buf.materials[1], Material::ExhaustBurn.tag());
        assert!(buf.materials[2..].iter().all(|&m| m == Material::Hull.tag()));
    }

    #[test]
    fn test_flat_cube_normals_match_faces() {
        let mesh = primitives::cube(1.0);
        let buf = mesh.to_buffer(false);

        // First face is the top (+Y): its four occurrence slots all get
        // the face normal under flat shading.
        for slot in 0..4 {
            let n = &buf.normals[slot * 3..slot * 3 + 3];
            assert!((n[0]).abs() < 1e-5);
            assert!((n[1] - 1.0).abs() < 1e-5);
            assert!((n[2]).abs() < 1e-5);
        }
    }
}
