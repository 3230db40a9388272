//! Fixture meshes shared by unit tests.

use nalgebra::Point3;

use super::{build_from_quads, FaceId, HalfEdgeMesh, VertexId};

/// Vertex at column `i`, row `j` of an `n x n` quad grid.
pub fn grid_vertex(n: usize, i: usize, j: usize) -> VertexId {
    VertexId::new(j * (n + 1) + i)
}

/// Face at column `i`, row `j` of an `n x n` quad grid.
pub fn grid_face(n: usize, i: usize, j: usize) -> FaceId {
    FaceId::new(j * n + i)
}

/// A planar `n x n` grid of counter-clockwise quads.
///
/// Vertex `(i, j)` has id `j * (n + 1) + i`, face `(i, j)` has id `j * n + i`
/// and its vertex loop starts at its lower-left corner.
pub fn grid(n: usize) -> HalfEdgeMesh {
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }

    let mut faces = Vec::with_capacity(n * n);
    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;
            faces.push([v00, v10, v11, v01]);
        }
    }

    build_from_quads(&vertices, &faces).unwrap()
}

/// A closed unit cube made of six outward-facing quads.
pub fn cube() -> HalfEdgeMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];
    let faces = vec![
        [0, 3, 2, 1], // bottom
        [4, 5, 6, 7], // top
        [0, 1, 5, 4], // front
        [1, 2, 6, 5], // right
        [2, 3, 7, 6], // back
        [3, 0, 4, 7], // left
    ];

    build_from_quads(&vertices, &faces).unwrap()
}
