//! One-ring index extraction for patch rendering.
//!
//! The renderer reads control points through index buffers. This module
//! produces the index layouts it expects:
//!
//! - [`vertex_one_ring_indices`]: the one-ring of a vertex as a lazy sequence
//! - [`quad_one_ring_indices`]: the 16 control points of a regular quad patch
//!
//! All indices are offset by a caller-supplied base so several meshes can
//! share one buffer. Positions within the output are significant.

use std::iter::FusedIterator;

use crate::mesh::{FaceId, HalfEdgeId, HalfEdgeMesh, MeshIndex, VertexId};

/// Number of control points of a regular quad patch.
pub const QUAD_PATCH_SIZE: usize = 16;

/// Output slot of every gathered control point in a quad patch.
///
/// Control points are gathered four per face corner; the point gathered at
/// position `i` is written to slot `QUAD_ONE_RING_ORDER[i]`.
pub const QUAD_ONE_RING_ORDER: [usize; QUAD_PATCH_SIZE] =
    [6, 7, 2, 3, 10, 14, 11, 15, 9, 8, 13, 12, 5, 1, 4, 0];

/// Iterate over the one-ring indices of a vertex.
///
/// For every outgoing half-edge, in rotation order, yields the destination
/// vertex and the vertex diagonally across the incident face. Boundary
/// vertices start at their outgoing boundary half-edge and finish with one
/// extra index, the far end of the incoming boundary edge.
///
/// The incident faces are expected to be quads.
pub fn vertex_one_ring_indices<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    v: VertexId<I>,
    offset: u32,
) -> VertexOneRingIndices<'_, I> {
    VertexOneRingIndices::new(mesh, v, offset)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Destination,
    Diagonal,
    Trailing,
    Done,
}

/// Lazy one-ring index sequence of a vertex.
///
/// Created by [`vertex_one_ring_indices`].
pub struct VertexOneRingIndices<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    offset: u32,
    boundary: bool,
    step: Step,
}

impl<'a, I: MeshIndex> VertexOneRingIndices<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, v: VertexId<I>, offset: u32) -> Self {
        let boundary = mesh.vertex(v).is_boundary();
        let mut start = mesh.vertex(v).halfedge;

        if boundary {
            while mesh.twin(start).is_some() {
                start = mesh.vertex_next(start);
            }
        }

        Self {
            mesh,
            start,
            current: start,
            offset,
            boundary,
            step: Step::Destination,
        }
    }
}

impl<'a, I: MeshIndex> Iterator for VertexOneRingIndices<'a, I> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        let mesh = self.mesh;
        match self.step {
            Step::Destination => {
                debug_assert_eq!(mesh.face(mesh.left_face(self.current)).valence, 4);
                self.step = Step::Diagonal;
                Some(mesh.dest(self.current).render_index(self.offset))
            }
            Step::Diagonal => {
                let diagonal = mesh.dest(mesh.face_next(self.current));
                self.current = mesh.vertex_next(self.current);
                self.step = if self.current != self.start {
                    Step::Destination
                } else if self.boundary {
                    Step::Trailing
                } else {
                    Step::Done
                };
                Some(diagonal.render_index(self.offset))
            }
            Step::Trailing => {
                self.step = Step::Done;
                let incoming = mesh.face_prev(mesh.vertex_prev(self.current));
                Some(mesh.origin(incoming).render_index(self.offset))
            }
            Step::Done => None,
        }
    }
}

impl<'a, I: MeshIndex> FusedIterator for VertexOneRingIndices<'a, I> {}

/// Gather the 16 control point indices of a quad patch.
///
/// Walks the four corners of the face; each corner contributes itself and
/// three neighbouring points. The gathered points are then placed in the
/// output according to [`QUAD_ONE_RING_ORDER`].
///
/// The face must be a quad whose corners are regular (valence 4); boundary
/// corners are also accepted and fill missing neighbours by repeating
/// known indices. Use the classification queries to check this first.
///
/// # Example
///
/// ```
/// use fastpatch::prelude::*;
/// use fastpatch::algo::one_ring::quad_one_ring_indices;
/// use nalgebra::Point3;
///
/// let n = 3;
/// let vertices: Vec<Point3<f64>> = (0..16)
///     .map(|k| Point3::new((k % 4) as f64, (k / 4) as f64, 0.0))
///     .collect();
/// let faces: Vec<[usize; 4]> = (0..n * n)
///     .map(|f| {
///         let v = (f / n) * (n + 1) + f % n;
///         [v, v + 1, v + n + 2, v + n + 1]
///     })
///     .collect();
/// let mesh: HalfEdgeMesh = build_from_quads(&vertices, &faces).unwrap();
///
/// let patch = quad_one_ring_indices(&mesh, FaceId::new(4), 0);
/// assert_eq!(patch, [12, 8, 4, 0, 13, 9, 5, 1, 14, 10, 6, 2, 15, 11, 7, 3]);
/// ```
pub fn quad_one_ring_indices<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    f: FaceId<I>,
    offset: u32,
) -> [u32; QUAD_PATCH_SIZE] {
    debug_assert_eq!(mesh.face(f).valence, 4, "quad patch on a non-quad face");

    let mut gathered = [0u32; QUAD_PATCH_SIZE];
    let index = |v: VertexId<I>| v.render_index(offset);

    for (corner, he) in mesh.face_halfedges(f).take(4).enumerate() {
        let origin = mesh.origin(he);
        let valence = mesh.valence(origin);
        debug_assert!(valence == 4 || valence < 0, "irregular corner {:?}", origin);

        let points = if valence < 0 {
            if mesh.halfedge(he).sharpness < 0.0 {
                let across = index(mesh.origin(mesh.face_prev(mesh.vertex_next(he))));
                [index(origin), index(origin), across, across]
            } else {
                let prev = index(mesh.dest(mesh.vertex_prev(he)));
                [index(origin), prev, index(origin), prev]
            }
        } else {
            let prev = mesh.vertex_prev(he);
            let prev_prev = mesh.vertex_prev(prev);
            [
                index(origin),
                index(mesh.dest(prev)),
                index(mesh.dest(prev_prev)),
                index(mesh.dest(mesh.face_next(prev_prev))),
            ]
        };

        gathered[corner * 4..corner * 4 + 4].copy_from_slice(&points);
    }

    let mut out = [0u32; QUAD_PATCH_SIZE];
    for (i, &slot) in QUAD_ONE_RING_ORDER.iter().enumerate() {
        out[slot] = gathered[i];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::test_meshes::{grid, grid_face, grid_vertex};

    #[test]
    fn test_order_is_a_permutation() {
        let mut seen = [false; QUAD_PATCH_SIZE];
        for &slot in &QUAD_ONE_RING_ORDER {
            assert!(!seen[slot]);
            seen[slot] = true;
        }
    }

    #[test]
    fn test_interior_vertex_one_ring() {
        let mesh = grid(2);
        let indices: Vec<u32> = vertex_one_ring_indices(&mesh, grid_vertex(2, 1, 1), 0).collect();
        assert_eq!(indices, vec![3, 0, 1, 2, 5, 8, 7, 6]);
    }

    #[test]
    fn test_vertex_one_ring_offset() {
        let mesh = grid(2);
        let indices: Vec<u32> = vertex_one_ring_indices(&mesh, grid_vertex(2, 1, 1), 10).collect();
        assert_eq!(indices, vec![13, 10, 11, 12, 15, 18, 17, 16]);
    }

    #[test]
    fn test_boundary_vertex_one_ring() {
        let mesh = grid(2);
        let indices: Vec<u32> = vertex_one_ring_indices(&mesh, grid_vertex(2, 1, 0), 0).collect();
        // Two (neighbour, diagonal) pairs, then the far end of the incoming
        // boundary edge
        assert_eq!(indices, vec![2, 5, 4, 3, 0]);
    }

    #[test]
    fn test_corner_vertex_one_ring() {
        let mesh = grid(2);
        let indices: Vec<u32> = vertex_one_ring_indices(&mesh, grid_vertex(2, 0, 0), 0).collect();
        assert_eq!(indices, vec![1, 4, 3]);
    }

    #[test]
    fn test_vertex_one_ring_is_fused() {
        let mesh = grid(2);
        let mut iter = vertex_one_ring_indices(&mesh, grid_vertex(2, 0, 0), 0);
        assert_eq!(iter.by_ref().count(), 3);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_regular_quad_patch() {
        let mesh = grid(3);
        let patch = quad_one_ring_indices(&mesh, grid_face(3, 1, 1), 0);

        // The full 4x4 block of grid vertices, one column per group of four
        assert_eq!(patch, [12, 8, 4, 0, 13, 9, 5, 1, 14, 10, 6, 2, 15, 11, 7, 3]);

        let mut sorted = patch;
        sorted.sort_unstable();
        assert_eq!(sorted, core::array::from_fn::<u32, 16, _>(|i| i as u32));
    }

    #[test]
    fn test_quad_patch_offset_and_idempotence() {
        let mesh = grid(3);
        let f = grid_face(3, 1, 1);
        let first = quad_one_ring_indices(&mesh, f, 100);
        let second = quad_one_ring_indices(&mesh, f, 100);

        assert_eq!(first, second);
        assert_eq!(first[0], 112);
        assert_eq!(first[15], 103);
    }

    #[test]
    fn test_boundary_quad_patch() {
        let mesh = grid(2);
        let patch = quad_one_ring_indices(&mesh, grid_face(2, 0, 0), 0);
        assert_eq!(patch, [4, 4, 0, 1, 3, 3, 0, 1, 7, 4, 1, 1, 8, 5, 2, 2]);
    }

    #[test]
    fn test_boundary_quad_patch_with_negative_sharpness() {
        let mut mesh = grid(2);
        // The half-edge 3 -> 0 is the last corner walked in face (0, 0)
        let he = mesh
            .find_halfedge(grid_vertex(2, 0, 1), grid_vertex(2, 0, 0))
            .unwrap();
        mesh.set_halfedge_sharpness(he, -1.0);

        let patch = quad_one_ring_indices(&mesh, grid_face(2, 0, 0), 0);
        assert_eq!([patch[5], patch[1], patch[4], patch[0]], [3, 3, 6, 6]);
        // Other corners are unaffected
        assert_eq!(patch[6..12], [0, 1, 7, 4, 1, 1]);
    }
}
