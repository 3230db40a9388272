//! Per-face patch classification.
//!
//! Each predicate walks the face boundary once, so all queries here are
//! linear in the face valence, except [`one_ring_neighbour_faces`] which
//! also rotates around every corner.
//!
//! # Transition Patches
//!
//! A quad next to a finer subdivision level is split into triangular
//! sub-patches at its *triangle-head* edges. [`transition_patch_info`]
//! reports how many such edges a quad has and whether two of them are
//! adjacent.

use std::collections::HashSet;

use crate::mesh::{FaceId, HalfEdgeId, HalfEdgeMesh, MeshIndex, VertexId, CORNER_VALENCE};

use super::Reporter;

/// Count the face corners that lie on the mesh boundary.
pub fn boundary_vertex_count<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, f: FaceId<I>) -> usize {
    mesh.face_vertices(f)
        .filter(|&v| mesh.vertex(v).is_boundary())
        .count()
}

/// Count the face edges that are creases or lie on the mesh boundary.
pub fn crease_edge_count<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, f: FaceId<I>) -> usize {
    mesh.face_halfedges(f)
        .filter(|&he| {
            let edge = mesh.halfedge(he);
            edge.is_crease() || edge.is_boundary()
        })
        .count()
}

/// Check whether any corner is a corner vertex or an irregular boundary
/// vertex (more than two incident faces on the boundary).
pub fn has_nonregular_boundary<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, f: FaceId<I>) -> bool {
    mesh.face_vertices(f).any(|v| {
        let valence = mesh.valence(v);
        valence == CORNER_VALENCE || valence < -3
    })
}

/// Check whether any edge of the face is a triangle head.
pub fn has_triangle_head<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, f: FaceId<I>) -> bool {
    mesh.face_halfedges(f)
        .any(|he| mesh.halfedge(he).triangle_head)
}

/// The corners of a face in walk order.
pub fn vertices<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, f: FaceId<I>) -> Vec<VertexId<I>> {
    mesh.face_vertices(f).collect()
}

/// The corners of a face as a set.
pub fn vertex_set<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, f: FaceId<I>) -> HashSet<VertexId<I>> {
    mesh.face_vertices(f).collect()
}

/// The half-edges bounding a face in walk order.
pub fn edges<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, f: FaceId<I>) -> Vec<HalfEdgeId<I>> {
    mesh.face_halfedges(f).collect()
}

/// The half-edges bounding a face as a set.
pub fn edge_set<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, f: FaceId<I>) -> HashSet<HalfEdgeId<I>> {
    mesh.face_halfedges(f).collect()
}

/// Collect every face touching a corner of `f`, including `f` itself.
///
/// The neighbourhood of a face is the union of the fans of its corners, so
/// this rotates fully around each corner and gathers the faces on both
/// sides of every outgoing edge.
pub fn one_ring_neighbour_faces<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, f: FaceId<I>) -> HashSet<FaceId<I>> {
    let mut neighbours = HashSet::new();

    for corner in mesh.face_vertices(f) {
        for he in mesh.vertex_halfedges(corner) {
            neighbours.insert(mesh.left_face(he));
            if let Some(right) = mesh.right_face(he) {
                neighbours.insert(right);
            }
        }
    }

    neighbours
}

/// Triangle-head layout of a transition patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPatchInfo {
    /// Number of triangle-head edges on the quad.
    pub triangle_heads: u32,

    /// True when there are exactly two triangle heads on adjacent edges.
    pub connected: bool,
}

/// Analyse the triangle heads of a transition patch.
///
/// Transition patches must be quads. For any other face the violation is
/// handed to `reporter` and `None` is returned; callers should treat the
/// information as unavailable.
pub fn transition_patch_info<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    f: FaceId<I>,
    reporter: &Reporter,
) -> Option<TransitionPatchInfo> {
    let valence = mesh.face(f).valence as usize;
    if valence != 4 {
        reporter.report("Transition patch is not quad");
        return None;
    }

    let mut triangle_heads = 0u32;
    let mut positions = [0usize; 2];

    for (idx, he) in mesh.face_halfedges(f).enumerate() {
        if mesh.halfedge(he).triangle_head {
            if (triangle_heads as usize) < positions.len() {
                positions[triangle_heads as usize] = idx;
            }
            triangle_heads += 1;
        }
    }

    let connected = triangle_heads == 2 && {
        let gap = positions[1] - positions[0];
        gap == 1 || gap == valence - 1
    };

    Some(TransitionPatchInfo {
        triangle_heads,
        connected,
    })
}
