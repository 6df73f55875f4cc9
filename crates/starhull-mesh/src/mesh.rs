//! The mesh container and its structural operators.

use slotmap::{SecondaryMap, SlotMap};
use starhull_math::{line_line_intersection, Point3, Rotation, Transform, Vec3};

use crate::face::{Face, FaceKey, QuadGeometry, Vertex, VertexKey};
use crate::MeshError;

/// A growable mesh: a vertex arena plus an ordered face list.
///
/// Face order is List-like — removals close the gap, insertions append —
/// and that order is load-bearing: the generator's snapshots, the
/// decorator passes and the export index assignment all walk it, so the
/// same seed walks the same faces in the same order every run.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: SlotMap<VertexKey, Vertex>,
    faces: SlotMap<FaceKey, Face>,
    order: Vec<FaceKey>,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a vertex.
    pub fn add_vertex(&mut self, position: Point3) -> VertexKey {
        self.vertices.insert(Vertex::new(position))
    }

    /// Position of a vertex.
    pub fn position(&self, vertex: VertexKey) -> Point3 {
        self.vertices[vertex].position
    }

    /// Move a vertex.
    pub fn set_position(&mut self, vertex: VertexKey, position: Point3) {
        self.vertices[vertex].position = position;
    }

    /// Append a face.
    pub fn add_face(&mut self, face: Face) -> FaceKey {
        let key = self.faces.insert(face);
        self.order.push(key);
        key
    }

    /// Remove a face, closing the gap in the face order.
    ///
    /// Vertices referenced only by the removed face simply stop being
    /// part of the derived vertex set; there is no separate delete step.
    pub fn remove_face(&mut self, face: FaceKey) {
        if self.faces.remove(face).is_some() {
            if let Some(pos) = self.order.iter().position(|&k| k == face) {
                self.order.remove(pos);
            }
        }
    }

    /// Borrow a face.
    pub fn face(&self, face: FaceKey) -> Result<&Face, MeshError> {
        self.faces.get(face).ok_or(MeshError::FaceNotFound)
    }

    /// Mutably borrow a face.
    pub fn face_mut(&mut self, face: FaceKey) -> Result<&mut Face, MeshError> {
        self.faces.get_mut(face).ok_or(MeshError::FaceNotFound)
    }

    /// Number of live faces.
    pub fn face_count(&self) -> usize {
        self.order.len()
    }

    /// Snapshot of the face keys in order.
    ///
    /// The generator iterates snapshots while mutating the live list;
    /// faces appended mid-pass are not revisited.
    pub fn face_keys(&self) -> Vec<FaceKey> {
        self.order.clone()
    }

    /// Iterate faces in order.
    pub fn iter_faces(&self) -> impl Iterator<Item = (FaceKey, &Face)> {
        self.order.iter().map(move |&k| (k, &self.faces[k]))
    }

    /// The derived vertex set: every key referenced by a live face, in
    /// face order, first occurrence wins.
    pub fn vertex_keys(&self) -> Vec<VertexKey> {
        let mut seen: SecondaryMap<VertexKey, ()> = SecondaryMap::new();
        let mut keys = Vec::new();
        for &face in &self.order {
            for &v in self.faces[face].vertices() {
                if seen.insert(v, ()).is_none() {
                    keys.push(v);
                }
            }
        }
        keys
    }

    /// The corner keys of a face, cloned.
    pub fn face_vertices(&self, face: FaceKey) -> Result<Vec<VertexKey>, MeshError> {
        Ok(self.face(face)?.vertices().to_vec())
    }

    /// Position snapshot of a quad face.
    pub fn quad_geometry(&self, face: FaceKey) -> Result<QuadGeometry, MeshError> {
        match self.face(face)? {
            Face::Quad { verts, .. } => Ok(QuadGeometry {
                left_top: self.position(verts[0]),
                left_bottom: self.position(verts[1]),
                right_bottom: self.position(verts[2]),
                right_top: self.position(verts[3]),
            }),
            _ => Err(MeshError::NotAQuad),
        }
    }

    // ------------------------------------------------------------------
    // Vertex-subset operators
    // ------------------------------------------------------------------

    /// Per-axis scale about the centroid of `verts`.
    pub fn scale(&mut self, factor: Vec3, verts: &[VertexKey]) {
        if verts.is_empty() {
            return;
        }
        let center = self.centroid(verts);
        for &v in verts {
            let centered = self.position(v) - center;
            self.set_position(
                v,
                center + centered.component_mul(&factor),
            );
        }
    }

    /// Per-axis scale in a caller-supplied space.
    ///
    /// `space` maps world coordinates into the scaling frame (typically
    /// an inverted face matrix, so the axes are the face's own
    /// width/height/depth); scaling happens about the frame origin.
    pub fn scale_in_space(&mut self, factor: Vec3, space: &Transform, verts: &[VertexKey]) {
        let Some(back) = space.inverse() else {
            // Degenerate frame: nothing sensible to scale along.
            return;
        };
        for &v in verts {
            let local = space.apply_point(&self.position(v));
            let scaled = Point3::from(local.coords.component_mul(&factor));
            self.set_position(v, back.apply_point(&scaled));
        }
    }

    /// Unconditional translation.
    pub fn translate(&mut self, delta: Vec3, verts: &[VertexKey]) {
        for &v in verts {
            let p = self.position(v);
            self.set_position(v, p + delta);
        }
    }

    /// Rotate `verts` about `center`.
    pub fn rotate(&mut self, verts: &[VertexKey], center: Point3, rotation: &Rotation) {
        for &v in verts {
            let centered = self.position(v) - center;
            self.set_position(v, center + rotation * centered);
        }
    }

    /// Apply a placement transform to every arena vertex.
    ///
    /// Used on freshly built primitive sub-meshes before merging them
    /// into a host mesh.
    pub fn transform_all(&mut self, transform: &Transform) {
        for vertex in self.vertices.values_mut() {
            vertex.position = transform.apply_point(&vertex.position);
        }
    }

    fn centroid(&self, verts: &[VertexKey]) -> Point3 {
        let mut sum = Vec3::zeros();
        for &v in verts {
            sum += self.position(v).coords;
        }
        Point3::from(sum / verts.len() as f32)
    }

    // ------------------------------------------------------------------
    // Structural operators
    // ------------------------------------------------------------------

    /// Extrude a quad into a closed box extension.
    ///
    /// The quad is cloned verbatim as the new front face (fresh vertices,
    /// so the seam shades hard), four side quads bridge the original ring
    /// to the clone with outward winding, the operand face is removed and
    /// the five new faces are appended. Returns
    /// `[front, left, top, right, bottom]`; callers chain extrusions
    /// through index 0.
    pub fn extrude_quad(&mut self, face: FaceKey) -> Result<[FaceKey; 5], MeshError> {
        let verts = match self.face(face)? {
            Face::Quad { verts, .. } => *verts,
            _ => return Err(MeshError::NotAQuad),
        };
        let [lt, lb, rb, rt] = verts;

        let f_lt = self.add_vertex(self.position(lt));
        let f_lb = self.add_vertex(self.position(lb));
        let f_rb = self.add_vertex(self.position(rb));
        let f_rt = self.add_vertex(self.position(rt));

        let front = self.add_face(Face::quad(f_lt, f_lb, f_rb, f_rt));
        let left = self.add_face(Face::quad(lt, lb, f_lb, f_lt));
        let top = self.add_face(Face::quad(lt, f_lt, f_rt, rt));
        let right = self.add_face(Face::quad(f_rt, f_rb, rb, rt));
        let bottom = self.add_face(Face::quad(f_lb, lb, rb, f_rb));

        self.remove_face(face);

        Ok([front, left, top, right, bottom])
    }

    /// Subdivide a face in place.
    ///
    /// Quads become a `(cuts + 1)²` grid of quads; triangles are
    /// quadrisected `cuts` times with midpoints re-projected onto the
    /// unit sphere (icosphere construction). The operand face is replaced
    /// by its successors; polygons are rejected.
    pub fn subdivide(&mut self, face: FaceKey, cuts: u32) -> Result<Vec<FaceKey>, MeshError> {
        let is_quad = matches!(self.face(face)?, Face::Quad { .. });
        let is_triangle = matches!(self.face(face)?, Face::Triangle { .. });
        if is_quad {
            self.subdivide_quad(face, cuts)
        } else if is_triangle {
            Ok(self.subdivide_triangle(face, cuts))
        } else {
            Err(MeshError::UnsupportedSubdivision)
        }
    }

    fn subdivide_quad(&mut self, face: FaceKey, cuts: u32) -> Result<Vec<FaceKey>, MeshError> {
        let q = self.quad_geometry(face)?;
        let steps = (cuts + 2) as usize;

        let mut top_points = Vec::with_capacity(steps);
        let mut bottom_points = Vec::with_capacity(steps);
        let mut left_points = Vec::with_capacity(steps);
        let mut right_points = Vec::with_capacity(steps);

        for i in 0..steps {
            let t = i as f32 / (steps - 1) as f32;
            top_points.push(lerp(&q.left_top, &q.right_top, t));
            bottom_points.push(lerp(&q.left_bottom, &q.right_bottom, t));
            left_points.push(lerp(&q.left_top, &q.left_bottom, t));
            right_points.push(lerp(&q.right_top, &q.right_bottom, t));
        }

        // Intersect the vertical line family (top[x] -> bottom[x]) with
        // the horizontal one (left[y] -> right[y]) to place interior grid
        // points. For a convex near-planar quad these always meet.
        let mut points = vec![Point3::origin(); steps * steps];
        for x in 0..steps {
            for y in 0..steps {
                let top = top_points[x];
                let bottom = bottom_points[x];
                let left = left_points[y];
                let right = right_points[y];

                let hit = line_line_intersection(&top, &(bottom - top), &left, &(right - left))
                    .ok_or(MeshError::SubdivisionIntersection)?;
                points[x * steps + y] = hit;
            }
        }

        let mut result = Vec::with_capacity((steps - 1) * (steps - 1));
        for x in 0..steps - 1 {
            for y in 0..steps - 1 {
                let lt = self.add_vertex(points[x * steps + y]);
                let lb = self.add_vertex(points[x * steps + y + 1]);
                let rb = self.add_vertex(points[(x + 1) * steps + y + 1]);
                let rt = self.add_vertex(points[(x + 1) * steps + y]);
                result.push(self.add_face(Face::quad(lt, lb, rb, rt)));
            }
        }

        self.remove_face(face);

        Ok(result)
    }

    fn subdivide_triangle(&mut self, face: FaceKey, cuts: u32) -> Vec<FaceKey> {
        let mut current = vec![face];

        for _ in 0..cuts {
            let mut next = Vec::with_capacity(current.len() * 4);
            for key in current {
                let verts = match &self.faces[key] {
                    Face::Triangle { verts, .. } => *verts,
                    _ => unreachable!("triangle subdivision only ever produces triangles"),
                };
                let [v0, v1, v2] = verts;

                let a = self.sphere_midpoint(v1, v0);
                let b = self.sphere_midpoint(v2, v1);
                let c = self.sphere_midpoint(v0, v2);

                // Every midpoint occurrence gets its own vertex: the
                // icosphere shades flat across child triangles.
                let children = [
                    (v0, a, c),
                    (v1, b, a),
                    (v2, c, b),
                ];
                for (corner, p, q) in children {
                    let pv = self.add_vertex(p);
                    let qv = self.add_vertex(q);
                    next.push(self.add_face(Face::triangle(corner, pv, qv)));
                }
                let av = self.add_vertex(a);
                let bv = self.add_vertex(b);
                let cv = self.add_vertex(c);
                next.push(self.add_face(Face::triangle(av, bv, cv)));

                self.remove_face(key);
            }
            current = next;
        }

        current
    }

    /// Midpoint of two vertices re-projected onto the unit sphere.
    fn sphere_midpoint(&self, a: VertexKey, b: VertexKey) -> Point3 {
        let mid = (self.position(a).coords + self.position(b).coords) / 2.0;
        Point3::from(mid / mid.norm())
    }

    /// Append another mesh's faces, remapping its vertices into this
    /// arena. Face order and shared-corner structure are preserved.
    pub fn merge(&mut self, sub: Mesh) {
        let mut remap: SecondaryMap<VertexKey, VertexKey> = SecondaryMap::new();
        for key in sub.face_keys() {
            let face = sub.faces[key].clone();
            let mapped = match face {
                Face::Quad { verts, material } => Face::Quad {
                    verts: verts.map(|v| self.remap_vertex(&sub, &mut remap, v)),
                    material,
                },
                Face::Triangle { verts, material } => Face::Triangle {
                    verts: verts.map(|v| self.remap_vertex(&sub, &mut remap, v)),
                    material,
                },
                Face::Polygon {
                    verts,
                    triangles,
                    material,
                } => Face::Polygon {
                    verts: verts
                        .into_iter()
                        .map(|v| self.remap_vertex(&sub, &mut remap, v))
                        .collect(),
                    triangles,
                    material,
                },
            };
            self.add_face(mapped);
        }
    }

    fn remap_vertex(
        &mut self,
        sub: &Mesh,
        remap: &mut SecondaryMap<VertexKey, VertexKey>,
        v: VertexKey,
    ) -> VertexKey {
        if let Some(&mapped) = remap.get(v) {
            return mapped;
        }
        let mapped = self.add_vertex(sub.position(v));
        remap.insert(v, mapped);
        mapped
    }
}

fn lerp(a: &Point3, b: &Point3, t: f32) -> Point3 {
    Point3::from(a.coords + (b.coords - a.coords) * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives;
    use starhull_math::Vec3;

    fn unit_cube() -> Mesh {
        primitives::cube(1.0)
    }

    #[test]
    fn test_cube_face_and_vertex_counts() {
        let mesh = unit_cube();
        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.vertex_keys().len(), 8);
    }

    #[test]
    fn test_cube_normals_are_outward_unit_axes() {
        let mesh = unit_cube();
        let expected = [
            Vec3::new(0.0, 1.0, 0.0),  // top
            Vec3::new(-1.0, 0.0, 0.0), // left
            Vec3::new(1.0, 0.0, 0.0),  // right
            Vec3::new(0.0, 0.0, 1.0),  // front
            Vec3::new(0.0, 0.0, -1.0), // back
            Vec3::new(0.0, -1.0, 0.0), // bottom
        ];
        for (i, face) in mesh.face_keys().into_iter().enumerate() {
            let normal = mesh.quad_geometry(face).unwrap().normal();
            assert!(
                (normal - expected[i]).norm() < 1e-6,
                "face {i}: {normal:?} != {:?}",
                expected[i]
            );
        }
    }

    #[test]
    fn test_extrude_returns_five_faces_front_first() {
        let mut mesh = unit_cube();
        let face = mesh.face_keys()[2]; // +X face
        let before = mesh.quad_geometry(face).unwrap();
        let normal = before.normal();

        let faces = mesh.extrude_quad(face).unwrap();
        assert_eq!(mesh.face_count(), 10); // 6 - 1 + 5

        // Front clone sits exactly on the original quad.
        let front = mesh.quad_geometry(faces[0]).unwrap();
        assert!((front.left_top - before.left_top).norm() < 1e-6);
        assert!((front.right_bottom - before.right_bottom).norm() < 1e-6);

        // Translate the front by d * normal, as the generator does.
        let d = 0.75;
        let verts = mesh.face_vertices(faces[0]).unwrap();
        mesh.translate(normal * d, &verts);
        let moved = mesh.quad_geometry(faces[0]).unwrap();
        assert!((moved.left_top - (before.left_top + normal * d)).norm() < 1e-5);
        assert!((moved.right_top - (before.right_top + normal * d)).norm() < 1e-5);
    }

    #[test]
    fn test_extrude_leaves_no_hole() {
        // Every edge of the removed quad must be covered by a side face:
        // each side face shares exactly two corners (by position) with
        // the original ring and two with the front clone.
        let mut mesh = unit_cube();
        let face = mesh.face_keys()[0];
        let before = mesh.quad_geometry(face).unwrap();
        let ring = [
            before.left_top,
            before.left_bottom,
            before.right_bottom,
            before.right_top,
        ];

        let faces = mesh.extrude_quad(face).unwrap();
        for &side in &faces[1..] {
            let q = mesh.quad_geometry(side).unwrap();
            let corners = [q.left_top, q.left_bottom, q.right_bottom, q.right_top];
            let on_ring = corners
                .iter()
                .filter(|c| ring.iter().any(|r| (*c - r).norm() < 1e-6))
                .count();
            assert_eq!(on_ring, 4, "pre-translation side face lies on the ring");
        }
    }

    #[test]
    fn test_subdivide_zero_cuts_is_identity_grid() {
        let mut mesh = unit_cube();
        let face = mesh.face_keys()[2]; // +X face
        let before = mesh.quad_geometry(face).unwrap();

        let result = mesh.subdivide(face, 0).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(mesh.face_count(), 6);

        let after = mesh.quad_geometry(result[0]).unwrap();
        assert!((after.left_top - before.left_top).norm() < 1e-5);
        assert!((after.left_bottom - before.left_bottom).norm() < 1e-5);
        assert!((after.right_bottom - before.right_bottom).norm() < 1e-5);
        assert!((after.right_top - before.right_top).norm() < 1e-5);
    }

    #[test]
    fn test_subdivide_one_cut_gives_four_quads() {
        let mut mesh = unit_cube();
        let face = mesh.face_keys()[0];
        let center = mesh.quad_geometry(face).unwrap().center();

        let result = mesh.subdivide(face, 1).unwrap();
        assert_eq!(result.len(), 4);
        assert_eq!(mesh.face_count(), 9);

        // All four sub-quads meet at the original center.
        for key in &result {
            let q = mesh.quad_geometry(*key).unwrap();
            let corners = [q.left_top, q.left_bottom, q.right_bottom, q.right_top];
            assert!(
                corners.iter().any(|c| (c - center).norm() < 1e-4),
                "sub-quad misses the center point"
            );
        }
    }

    #[test]
    fn test_subdivide_polygon_rejected() {
        let mut mesh = Mesh::new();
        let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        let face = mesh.add_face(Face::polygon(vec![a, b, c], vec![0, 1, 2]));
        assert!(matches!(
            mesh.subdivide(face, 1),
            Err(MeshError::UnsupportedSubdivision)
        ));
    }

    #[test]
    fn test_scale_about_subset_centroid() {
        let mut mesh = unit_cube();
        let face = mesh.face_keys()[2]; // +X face at x = 1
        let verts = mesh.face_vertices(face).unwrap();
        mesh.scale(Vec3::new(1.0, 2.0, 2.0), &verts);

        let q = mesh.quad_geometry(face).unwrap();
        // Face centroid is (1, 0, 0); corners double their y/z offsets.
        assert!((q.left_top.x - 1.0).abs() < 1e-6);
        assert!((q.left_top.y.abs() - 2.0).abs() < 1e-5);
        assert!((q.left_top.z.abs() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_scale_in_space_uses_frame_axes() {
        let mut mesh = unit_cube();
        let face = mesh.face_keys()[2]; // +X face
        let q = mesh.quad_geometry(face).unwrap();
        let space = q.face_matrix(None).inverse().unwrap();
        let verts = mesh.face_vertices(face).unwrap();

        // Scale along the face's local X (its top edge) only.
        mesh.scale_in_space(Vec3::new(2.0, 1.0, 1.0), &space, &verts);
        let after = mesh.quad_geometry(face).unwrap();
        assert!((after.width() - 2.0 * q.width()).abs() < 1e-4);
        assert!((after.height() - q.height()).abs() < 1e-4);
    }

    #[test]
    fn test_rotate_about_center() {
        let mut mesh = Mesh::new();
        let v = mesh.add_vertex(Point3::new(2.0, 0.0, 0.0));
        let rot = Rotation::from_axis_angle(&Vec3::z_axis(), std::f32::consts::PI / 2.0);
        mesh.rotate(&[v], Point3::new(1.0, 0.0, 0.0), &rot);
        assert!((mesh.position(v) - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_merge_remaps_and_preserves_counts() {
        let mut mesh = unit_cube();
        let mut sub = unit_cube();
        sub.transform_all(&Transform::translation(Vec3::new(5.0, 0.0, 0.0)));
        mesh.merge(sub);

        assert_eq!(mesh.face_count(), 12);
        assert_eq!(mesh.vertex_keys().len(), 16);

        // The merged cube really moved.
        let far = mesh.face_keys()[8]; // merged cube's +X face
        let q = mesh.quad_geometry(far).unwrap();
        assert!((q.center().x - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_removing_last_face_removes_vertices_from_derived_set() {
        let mut mesh = Mesh::new();
        let a = mesh.add_vertex(Point3::origin());
        let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        let face = mesh.add_face(Face::triangle(a, b, c));
        assert_eq!(mesh.vertex_keys().len(), 3);

        mesh.remove_face(face);
        assert!(mesh.vertex_keys().is_empty());
    }
}
