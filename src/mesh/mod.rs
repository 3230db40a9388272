//! Core mesh data structures.
//!
//! This module provides the half-edge graph that the patch classifiers read,
//! together with its typed indices and the builder that creates it.
//!
//! # Overview
//!
//! The primary type is [`HalfEdgeMesh`], an arena of vertices, half-edges and
//! faces linked by index. Unlike a triangle-only structure it accepts any
//! polygon, but the patch queries are designed around quads.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`FaceId`] - Identifies a face
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`] trait),
//! allowing you to choose `u16`, `u32`, or `u64` based on mesh size.
//!
//! # Construction
//!
//! ```
//! use fastpatch::mesh::{HalfEdgeMesh, build_from_quads};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2, 3]];
//!
//! let mesh: HalfEdgeMesh = build_from_quads(&vertices, &faces).unwrap();
//! assert!(mesh.is_valid());
//! ```

mod builder;
mod halfedge;
mod index;

#[cfg(test)]
pub(crate) mod test_meshes;

pub use builder::{build_from_polygons, build_from_quads, to_face_vertex_polygons};
pub use halfedge::{
    Face, FaceHalfEdgeIter, HalfEdge, HalfEdgeMesh, Vertex, VertexHalfEdgeIter, CORNER_VALENCE,
};
pub use index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
