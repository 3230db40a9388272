//! # Fastpatch
//!
//! Topology queries for hardware patch rendering of quad-dominant
//! subdivision meshes.
//!
//! Fastpatch builds a half-edge graph from a polygon mesh and answers the
//! questions a patch renderer asks about it: which rule applies to every
//! vertex, where creases run, which faces sit on the boundary or border a
//! finer level, and which control points feed each patch.
//!
//! ## Features
//!
//! - **Half-edge data structure**: O(1) adjacency queries with type-safe indices
//! - **Valence codes**: interior, boundary and corner vertices in one signed integer
//! - **Crease handling**: per-edge sharpness, straight-crease detection
//! - **Index extraction**: vertex one-rings and 16-point quad patches
//! - **Parallel passes**: whole-mesh classification with rayon
//!
//! ## Quick Start
//!
//! ```no_run
//! use fastpatch::prelude::*;
//! use fastpatch::algo::batch::{classify_vertices, ClassStatistics};
//! use fastpatch::algo::ClassifyOptions;
//!
//! let mesh: HalfEdgeMesh = fastpatch::io::load("cage.obj").unwrap();
//!
//! let summaries = classify_vertices(&mesh, &ClassifyOptions::default());
//! let stats = ClassStatistics::from_vertices(&summaries);
//! println!("{} regular, {} extraordinary", stats.regular, stats.extraordinary);
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use fastpatch::prelude::*;
//! use fastpatch::algo::vertex::{classify_one_ring, VertexClass};
//! use nalgebra::Point3;
//!
//! // A 2x2 grid of quads
//! let vertices: Vec<Point3<f64>> = (0..9)
//!     .map(|k| Point3::new((k % 3) as f64, (k / 3) as f64, 0.0))
//!     .collect();
//! let faces = vec![[0, 1, 4, 3], [1, 2, 5, 4], [3, 4, 7, 6], [4, 5, 8, 7]];
//!
//! let mut mesh: HalfEdgeMesh = build_from_quads(&vertices, &faces).unwrap();
//! assert_eq!(mesh.valence(VertexId::new(0)), -2);
//! assert_eq!(mesh.valence(VertexId::new(1)), -3);
//! assert_eq!(mesh.valence(VertexId::new(4)), 4);
//!
//! // A straight crease through the center
//! mesh.set_crease(VertexId::new(3), VertexId::new(4), 2.0).unwrap();
//! mesh.set_crease(VertexId::new(4), VertexId::new(5), 2.0).unwrap();
//!
//! let center = classify_one_ring(&mesh, VertexId::new(4));
//! assert_eq!(center.class, VertexClass::Interior { valence: 4 });
//! assert_eq!(center.crease_count, 2);
//! assert_eq!(center.average_sharpness, 2.0);
//! ```
//!
//! ## Mesh Traversal
//!
//! ```
//! use fastpatch::prelude::*;
//! use nalgebra::Point3;
//!
//! # let vertices: Vec<Point3<f64>> = (0..9)
//! #     .map(|k| Point3::new((k % 3) as f64, (k / 3) as f64, 0.0))
//! #     .collect();
//! # let faces = vec![[0, 1, 4, 3], [1, 2, 5, 4], [3, 4, 7, 6], [4, 5, 8, 7]];
//! # let mesh: HalfEdgeMesh = build_from_quads(&vertices, &faces).unwrap();
//! // Iterate over neighbors of a vertex
//! let v = VertexId::new(4);
//! for neighbor in mesh.vertex_neighbors(v) {
//!     println!("Neighbor: {:?}", neighbor);
//! }
//!
//! // Get the corners of a face
//! let corners: Vec<VertexId> = mesh.face_vertices(FaceId::new(0)).collect();
//! assert_eq!(corners.len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use fastpatch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_polygons, build_from_quads, to_face_vertex_polygons, Face, FaceId, HalfEdge,
        HalfEdgeId, HalfEdgeMesh, MeshIndex, Vertex, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    #[test]
    fn test_single_quad() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];

        let mesh: HalfEdgeMesh = build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 1);
        // No face-less half-edges: an open quad has exactly four
        assert_eq!(mesh.num_halfedges(), 4);
        assert!(mesh.is_valid());

        for v in mesh.vertex_ids() {
            assert!(mesh.is_boundary_vertex(v), "vertex {:?} should be on boundary", v);
            assert_eq!(mesh.valence(v), -2);
        }
    }
}
