//! Wavefront OBJ format support.
//!
//! Only geometry is read: `v` lines give positions and `f` lines give
//! polygons of any size. Face tokens may carry texture and normal references
//! (`v/vt/vn`, `v//vn`); those are ignored. Negative (relative) indices are
//! resolved against the vertices read so far.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::{build_from_polygons, HalfEdgeMesh, MeshIndex};

/// Load a polygon mesh from an OBJ file.
///
/// # Example
///
/// ```no_run
/// use fastpatch::io::obj;
/// use fastpatch::mesh::HalfEdgeMesh;
///
/// let mesh: HalfEdgeMesh = obj::load("model.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<HalfEdgeMesh<I>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let (vertices, faces) = parse(BufReader::new(file)).map_err(|message| MeshError::LoadError {
        path: path.to_path_buf(),
        message,
    })?;

    log::debug!(
        "Read {} vertices and {} faces from {}",
        vertices.len(),
        faces.len(),
        path.display()
    );

    build_from_polygons(&vertices, &faces)
}

/// Parsed OBJ geometry: positions and zero-based polygons.
pub(crate) type Geometry = (Vec<Point3<f64>>, Vec<Vec<usize>>);

pub(crate) fn parse<R: BufRead>(reader: R) -> std::result::Result<Geometry, String> {
    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut faces: Vec<Vec<usize>> = Vec::new();

    for (line_index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| e.to_string())?;
        let line_number = line_index + 1;

        let content = match line.find('#') {
            Some(pos) => &line[..pos],
            None => &line,
        };
        let mut tokens = content.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let mut coords = [0.0f64; 3];
                for c in coords.iter_mut() {
                    let token = tokens
                        .next()
                        .ok_or_else(|| format!("line {}: vertex needs three coordinates", line_number))?;
                    *c = token
                        .parse()
                        .map_err(|_| format!("line {}: invalid coordinate '{}'", line_number, token))?;
                }
                vertices.push(Point3::new(coords[0], coords[1], coords[2]));
            }
            Some("f") => {
                let face = tokens
                    .map(|token| resolve_index(token, vertices.len(), line_number))
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                if face.len() < 3 {
                    return Err(format!("line {}: face needs at least three vertices", line_number));
                }
                faces.push(face);
            }
            // Normals, texture coordinates, groups, materials
            _ => {}
        }
    }

    Ok((vertices, faces))
}

fn resolve_index(token: &str, num_vertices: usize, line_number: usize) -> std::result::Result<usize, String> {
    let position = token.split('/').next().unwrap_or(token);
    let raw: i64 = position
        .parse()
        .map_err(|_| format!("line {}: invalid face index '{}'", line_number, token))?;

    let resolved = match raw {
        0 => None,
        r if r > 0 => Some(r as usize - 1),
        r => num_vertices.checked_sub(r.unsigned_abs() as usize),
    };

    resolved.ok_or_else(|| format!("line {}: face index {} out of range", line_number, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const QUAD_STRIP: &str = "\
# two quads sharing an edge
v 0 0 0
v 1 0 0
v 2 0 0
v 0 1 0
v 1 1 0
v 2 1 0
vn 0 0 1
vt 0 0
f 1/1/1 2/1/1 5/1/1 4/1/1
f 2//1 3//1 6//1 5//1
";

    #[test]
    fn test_parse_quads_with_attributes() {
        let (vertices, faces) = parse(Cursor::new(QUAD_STRIP)).unwrap();
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[5], Point3::new(2.0, 1.0, 0.0));
        assert_eq!(faces, vec![vec![0, 1, 4, 3], vec![1, 2, 5, 4]]);
    }

    #[test]
    fn test_parse_relative_indices() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nf -3 -2 -1\n";
        let (_, faces) = parse(Cursor::new(src)).unwrap();
        assert_eq!(faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(Cursor::new("v 0 0\n")).is_err());
        assert!(parse(Cursor::new("v 0 0 x\n")).is_err());
        assert!(parse(Cursor::new("v 0 0 0\nv 1 0 0\nf 1 2\n")).is_err());
        assert!(parse(Cursor::new("v 0 0 0\nf 0 1 1\n")).is_err());
        assert!(parse(Cursor::new("v 0 0 0\nf -2 1 1\n")).is_err());

        let err = parse(Cursor::new("v 0 0 0\nv 1 0 0\nv 1 1 0\nf 1 2 q\n")).unwrap_err();
        assert!(err.starts_with("line 4"), "{}", err);
    }

    #[test]
    fn test_load_builds_mesh() {
        let path = std::env::temp_dir().join(format!("fastpatch-obj-{}.obj", std::process::id()));
        std::fs::write(&path, QUAD_STRIP).unwrap();

        let mesh: HalfEdgeMesh = load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(mesh.num_vertices(), 6);
        assert_eq!(mesh.num_faces(), 2);
        assert!(mesh.is_quad_mesh());
    }

    #[test]
    fn test_load_missing_file() {
        let result: Result<HalfEdgeMesh> = load("/nonexistent/fastpatch.obj");
        assert!(matches!(result, Err(MeshError::Io(_))));
    }
}
