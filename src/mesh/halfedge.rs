//! Half-edge mesh data structure.
//!
//! This module provides the half-edge (doubly-connected edge list) graph that
//! all patch queries read. Vertices, half-edges and faces are stored in three
//! arenas and refer to each other by typed index.
//!
//! # Structure
//!
//! - Every half-edge bounds exactly one face (its *left* face) and knows the
//!   next and previous half-edge around that face
//! - Interior half-edges know their **twin**; half-edges on the mesh boundary
//!   have no twin, and therefore no *right* face
//! - Each vertex stores one outgoing half-edge; for boundary vertices this is
//!   the outgoing half-edge without a twin
//! - Each face stores one half-edge on its boundary
//!
//! # Rotation Around a Vertex
//!
//! [`HalfEdgeMesh::vertex_next`] and [`HalfEdgeMesh::vertex_prev`] step between
//! the outgoing half-edges of a vertex. On the boundary the fan is open, so
//! the rotation wraps from the last outgoing half-edge back to the boundary
//! start (and vice versa). Every vertex rotation is therefore a closed cycle
//! whose length is the number of incident faces.
//!
//! # Patch Attributes
//!
//! Besides connectivity the graph carries the per-element data the patch
//! classifiers need: the signed vertex valence code, edge sharpness, the
//! triangle-head marker and the face renumbering used to exclude faces from
//! the active patch set.

use nalgebra::Point3;

use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};

/// Valence code of a corner vertex (a boundary vertex with one face).
pub const CORNER_VALENCE: i32 = -2;

/// A vertex in the half-edge mesh.
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// One outgoing half-edge from this vertex.
    /// For boundary vertices, this is the outgoing half-edge with no twin.
    pub halfedge: HalfEdgeId<I>,

    /// Signed valence code.
    ///
    /// Positive for interior vertices (number of incident faces). Boundary
    /// vertices store minus their edge count, so a corner is `-2` and a
    /// regular boundary vertex `-3`.
    pub valence: i32,
}

impl<I: MeshIndex> Vertex<I> {
    /// Whether the valence code marks this vertex as lying on the boundary.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.valence < 0
    }

    /// Whether this is a corner vertex.
    #[inline]
    pub fn is_corner(&self) -> bool {
        self.valence == CORNER_VALENCE
    }
}

/// A half-edge in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The vertex this half-edge originates from.
    pub origin: VertexId<I>,

    /// The opposite half-edge, absent on the mesh boundary.
    pub twin: Option<HalfEdgeId<I>>,

    /// The next half-edge around the face (counter-clockwise).
    pub next: HalfEdgeId<I>,

    /// The previous half-edge around the face (clockwise).
    pub prev: HalfEdgeId<I>,

    /// The face this half-edge bounds.
    pub face: FaceId<I>,

    /// Crease weight. Positive values mark a semantic crease.
    pub sharpness: f32,

    /// Marks an edge that originates a triangular sub-patch in a transition
    /// patch.
    pub triangle_head: bool,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Check if this half-edge is on the boundary.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.twin.is_none()
    }

    /// Check if this half-edge is a crease.
    #[inline]
    pub fn is_crease(&self) -> bool {
        self.sharpness > 0.0
    }
}

/// A face in the half-edge mesh.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// One half-edge on the boundary of this face.
    pub halfedge: HalfEdgeId<I>,

    /// Number of sides.
    pub valence: u32,

    /// Index of this face in the active patch set, or `None` when the face
    /// has been excluded from it.
    pub new_index: Option<u32>,
}

impl<I: MeshIndex> Face<I> {
    /// Check whether the face is excluded from the active patch set.
    #[inline]
    pub fn is_excluded(&self) -> bool {
        self.new_index.is_none()
    }
}

/// A half-edge mesh for quad-dominant polygon meshes.
///
/// The mesh is built once by [`build_from_polygons`](super::build_from_polygons)
/// and is read-only afterwards apart from patch attributes; every query in
/// [`crate::algo`] takes it by shared reference.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh<I: MeshIndex = u32> {
    /// All vertices in the mesh.
    pub(crate) vertices: Vec<Vertex<I>>,

    /// All half-edges in the mesh.
    pub(crate) halfedges: Vec<HalfEdge<I>>,

    /// All faces in the mesh.
    pub(crate) faces: Vec<Face<I>>,
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of half-edges.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    /// Get a half-edge by ID.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    pub(crate) fn halfedge_mut(&mut self, id: HalfEdgeId<I>) -> &mut HalfEdge<I> {
        &mut self.halfedges[id.index()]
    }

    pub(crate) fn face_mut(&mut self, id: FaceId<I>) -> &mut Face<I> {
        &mut self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Get the signed valence code of a vertex.
    #[inline]
    pub fn valence(&self, v: VertexId<I>) -> i32 {
        self.vertex(v).valence
    }

    // ==================== Topology Queries ====================

    /// Get the twin (opposite) half-edge, if the edge is interior.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId<I>) -> Option<HalfEdgeId<I>> {
        self.halfedge(he).twin
    }

    /// Get the next half-edge around the face.
    #[inline]
    pub fn face_next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// Get the previous half-edge around the face.
    #[inline]
    pub fn face_prev(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).prev
    }

    /// Get the next outgoing half-edge around the origin vertex.
    ///
    /// Steps across the previous edge of the face. At the end of a boundary
    /// fan this wraps to the outgoing boundary half-edge.
    pub fn vertex_next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        if let Some(twin) = self.twin(self.face_prev(he)) {
            return twin;
        }

        let mut cur = he;
        while let Some(twin) = self.twin(cur) {
            cur = self.face_next(twin);
        }
        cur
    }

    /// Get the previous outgoing half-edge around the origin vertex.
    ///
    /// Inverse of [`vertex_next`](Self::vertex_next), wrapping from the
    /// outgoing boundary half-edge to the last half-edge of the fan.
    pub fn vertex_prev(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        if let Some(twin) = self.twin(he) {
            return self.face_next(twin);
        }

        let mut cur = he;
        while let Some(twin) = self.twin(self.face_prev(cur)) {
            cur = twin;
        }
        cur
    }

    /// Get the origin vertex of a half-edge.
    #[inline]
    pub fn origin(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).origin
    }

    /// Get the destination vertex of a half-edge.
    #[inline]
    pub fn dest(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.origin(self.face_next(he))
    }

    /// Get the face this half-edge bounds.
    #[inline]
    pub fn left_face(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    /// Get the face across the edge, absent on the boundary.
    #[inline]
    pub fn right_face(&self, he: HalfEdgeId<I>) -> Option<FaceId<I>> {
        self.twin(he).map(|twin| self.left_face(twin))
    }

    /// Check if a half-edge is on the boundary.
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        self.halfedge(he).is_boundary()
    }

    /// Check if a vertex is on the boundary by walking its fan.
    pub fn is_boundary_vertex(&self, v: VertexId<I>) -> bool {
        self.vertex_halfedges(v)
            .any(|he| self.is_boundary_halfedge(he) || self.is_boundary_halfedge(self.face_prev(he)))
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all vertices with their IDs.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId<I>, &Vertex<I>)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId::new(i), v))
    }

    /// Iterate over all half-edge IDs.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        (0..self.halfedges.len()).map(HalfEdgeId::new)
    }

    /// Iterate over all half-edges with their IDs.
    pub fn halfedges(&self) -> impl Iterator<Item = (HalfEdgeId<I>, &HalfEdge<I>)> + '_ {
        self.halfedges
            .iter()
            .enumerate()
            .map(|(i, he)| (HalfEdgeId::new(i), he))
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over all faces with their IDs.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId<I>, &Face<I>)> + '_ {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, f)| (FaceId::new(i), f))
    }

    /// Iterate over outgoing half-edges around a vertex, starting at its
    /// anchor half-edge.
    pub fn vertex_halfedges(&self, v: VertexId<I>) -> VertexHalfEdgeIter<'_, I> {
        VertexHalfEdgeIter::new(self, self.vertex(v).halfedge)
    }

    /// Iterate over outgoing half-edges around the origin of `start`,
    /// beginning with `start` itself.
    pub fn vertex_halfedges_from(&self, start: HalfEdgeId<I>) -> VertexHalfEdgeIter<'_, I> {
        VertexHalfEdgeIter::new(self, start)
    }

    /// Iterate over vertices adjacent to a vertex.
    pub fn vertex_neighbors(&self, v: VertexId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertex_halfedges(v).map(|he| self.dest(he))
    }

    /// Iterate over faces incident to a vertex.
    pub fn vertex_faces(&self, v: VertexId<I>) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.vertex_halfedges(v).map(|he| self.left_face(he))
    }

    /// Iterate over half-edges around a face.
    pub fn face_halfedges(&self, f: FaceId<I>) -> FaceHalfEdgeIter<'_, I> {
        FaceHalfEdgeIter::new(self, self.face(f).halfedge)
    }

    /// Iterate over vertices of a face.
    pub fn face_vertices(&self, f: FaceId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.face_halfedges(f).map(|he| self.origin(he))
    }

    /// Check if every face is a quad.
    pub fn is_quad_mesh(&self) -> bool {
        self.faces.iter().all(|f| f.valence == 4)
    }

    // ==================== Validation ====================

    /// Check if the mesh is valid (all connectivity is consistent).
    pub fn is_valid(&self) -> bool {
        for (vid, v) in self.vertices() {
            if self.origin(v.halfedge) != vid {
                return false;
            }
            if v.is_boundary() && !self.is_boundary_halfedge(v.halfedge) {
                return false;
            }
        }

        for (heid, he) in self.halfedges() {
            if let Some(twin) = he.twin {
                let t = self.halfedge(twin);
                if t.twin != Some(heid) {
                    return false;
                }
                if t.origin != self.dest(heid) || self.dest(twin) != he.origin {
                    return false;
                }
            }

            if self.halfedge(he.next).prev != heid || self.halfedge(he.prev).next != heid {
                return false;
            }
            if self.halfedge(he.next).face != he.face {
                return false;
            }
        }

        for (fid, f) in self.faces() {
            if self.left_face(f.halfedge) != fid {
                return false;
            }
            if self.face_halfedges(fid).count() != f.valence as usize {
                return false;
            }
        }

        true
    }
}

/// Iterator over the outgoing half-edges of a vertex.
///
/// Yields each half-edge of the rotation exactly once and stops when the
/// rotation returns to the start.
pub struct VertexHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> VertexHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, start: HalfEdgeId<I>) -> Self {
        Self {
            mesh,
            start,
            current: start,
            done: false,
        }
    }
}

impl<'a, I: MeshIndex> Iterator for VertexHalfEdgeIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.vertex_next(self.current);

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}

/// Iterator over half-edges around a face.
pub struct FaceHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> FaceHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, start: HalfEdgeId<I>) -> Self {
        Self {
            mesh,
            start,
            current: start,
            done: false,
        }
    }
}

impl<'a, I: MeshIndex> Iterator for FaceHalfEdgeIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.face_next(self.current);

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}
