//! Text export of finished mesh buffers.
//!
//! Wavefront OBJ is enough to drop a generated ship into any viewer or
//! DCC tool. Triangles are grouped into `usemtl` runs by their material
//! tag; positions and flat normals come straight from the buffer.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use starhull_mesh::{Material, MeshBuffer};

fn material_name(tag: u8) -> &'static str {
    Material::from_tag(tag).map_or("hull", Material::name)
}

/// Write a buffer as Wavefront OBJ text.
pub fn write_obj<W: Write>(buffer: &MeshBuffer, out: &mut W) -> io::Result<()> {
    writeln!(out, "# starhull generated hull")?;
    writeln!(
        out,
        "# {} vertices, {} triangles",
        buffer.num_vertices(),
        buffer.num_triangles()
    )?;

    for v in buffer.vertices.chunks(3) {
        writeln!(out, "v {} {} {}", v[0], v[1], v[2])?;
    }
    for n in buffer.normals.chunks(3) {
        writeln!(out, "vn {} {} {}", n[0], n[1], n[2])?;
    }

    let mut current: Option<u8> = None;
    for (tri, &mat) in buffer.indices.chunks(3).zip(&buffer.materials) {
        if current != Some(mat) {
            writeln!(out, "usemtl {}", material_name(mat))?;
            current = Some(mat);
        }
        // OBJ indices are 1-based; normals share the position indices.
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }

    Ok(())
}

/// Write a buffer as an OBJ file at `path`.
pub fn write_obj_file(buffer: &MeshBuffer, path: impl AsRef<Path>) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write_obj(buffer, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use starhull_mesh::primitives;

    #[test]
    fn test_obj_line_counts() {
        let buffer = primitives::cube(1.0).to_buffer(false);
        let mut text = Vec::new();
        write_obj(&buffer, &mut text).unwrap();
        let text = String::from_utf8(text).unwrap();

        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 24);
        assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 24);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 12);
        assert!(text.contains("usemtl hull"));
    }

    #[test]
    fn test_obj_indices_are_one_based() {
        let buffer = primitives::cube(1.0).to_buffer(false);
        let mut text = Vec::new();
        write_obj(&buffer, &mut text).unwrap();
        let text = String::from_utf8(text).unwrap();

        for line in text.lines().filter(|l| l.starts_with("f ")) {
            for corner in line.split_whitespace().skip(1) {
                let index: usize = corner.split("//").next().unwrap().parse().unwrap();
                assert!(index >= 1 && index <= buffer.num_vertices());
            }
        }
    }
}
