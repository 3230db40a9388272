//! Mesh construction utilities.
//!
//! This module builds the half-edge graph from face-vertex lists and assigns
//! the patch attributes (creases, triangle heads, face renumbering) that the
//! classifiers in [`crate::algo`] read. Connectivity is fixed once the mesh
//! is built; only attributes can be changed afterwards.

use std::collections::HashMap;

use nalgebra::Point3;

use super::halfedge::{Face, HalfEdge, HalfEdgeMesh, Vertex};
use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// Build a half-edge mesh from vertices and polygon faces.
///
/// Faces are given as counter-clockwise vertex index loops of any length
/// `>= 3`. Every vertex must be used by at least one face and every
/// directed edge may be used by one face only.
///
/// Vertex valence codes are derived from the finished connectivity:
/// interior vertices get their face count, boundary vertices minus their
/// edge count (`-2` for a corner).
///
/// # Example
/// ```
/// use fastpatch::mesh::{build_from_polygons, HalfEdgeMesh, VertexId};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let faces = vec![vec![0, 1, 2, 3]];
///
/// let mesh: HalfEdgeMesh = build_from_polygons(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_faces(), 1);
/// assert_eq!(mesh.valence(VertexId::new(0)), -2);
/// ```
pub fn build_from_polygons<I: MeshIndex, F: AsRef<[usize]>>(
    vertices: &[Point3<f64>],
    faces: &[F],
) -> Result<HalfEdgeMesh<I>> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    // Validate vertex indices and reject degenerate polygons
    let mut num_halfedges = 0;
    for (fi, face) in faces.iter().enumerate() {
        let face = face.as_ref();
        if face.len() < 3 {
            return Err(MeshError::DegenerateFace { face: fi });
        }
        for (k, &vi) in face.iter().enumerate() {
            if vi >= vertices.len() {
                return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
            }
            if face[..k].contains(&vi) {
                return Err(MeshError::DegenerateFace { face: fi });
            }
        }
        num_halfedges += face.len();
    }

    let mut halfedges: Vec<HalfEdge<I>> = Vec::with_capacity(num_halfedges);
    let mut mesh_faces: Vec<Face<I>> = Vec::with_capacity(faces.len());
    let mut anchors: Vec<Option<HalfEdgeId<I>>> = vec![None; vertices.len()];
    let mut face_counts: Vec<usize> = vec![0; vertices.len()];

    // Map from directed edge (v0, v1) to half-edge ID
    let mut edge_map: HashMap<(usize, usize), HalfEdgeId<I>> = HashMap::with_capacity(num_halfedges);

    // First pass: create all half-edges and faces
    for (fi, face) in faces.iter().enumerate() {
        let face = face.as_ref();
        let n = face.len();
        let first = halfedges.len();
        let face_id = FaceId::<I>::new(fi);

        for (k, &v0) in face.iter().enumerate() {
            let v1 = face[(k + 1) % n];
            let he = HalfEdgeId::<I>::new(first + k);

            halfedges.push(HalfEdge {
                origin: VertexId::new(v0),
                twin: None,
                next: HalfEdgeId::new(first + (k + 1) % n),
                prev: HalfEdgeId::new(first + (k + n - 1) % n),
                face: face_id,
                sharpness: 0.0,
                triangle_head: false,
            });

            if edge_map.insert((v0, v1), he).is_some() {
                return Err(MeshError::NonManifoldEdge { v0, v1 });
            }
            if anchors[v0].is_none() {
                anchors[v0] = Some(he);
            }
            face_counts[v0] += 1;
        }

        mesh_faces.push(Face {
            halfedge: HalfEdgeId::new(first),
            valence: n as u32,
            new_index: Some(fi as u32),
        });
    }

    // Second pass: link twins and record the outgoing boundary half-edge
    // of every boundary vertex
    let mut boundary_starts: Vec<Option<HalfEdgeId<I>>> = vec![None; vertices.len()];
    for (&(v0, v1), &he) in &edge_map {
        if let Some(&twin) = edge_map.get(&(v1, v0)) {
            halfedges[he.index()].twin = Some(twin);
        } else if boundary_starts[v0].replace(he).is_some() {
            return Err(MeshError::NonManifold {
                details: format!("vertex {} has more than one outgoing boundary edge", v0),
            });
        }
    }

    // Third pass: vertices, valence codes and boundary anchors
    let mut mesh_vertices: Vec<Vertex<I>> = Vec::with_capacity(vertices.len());
    for (vi, &position) in vertices.iter().enumerate() {
        let anchor = anchors[vi].ok_or(MeshError::IsolatedVertex { vertex: vi })?;
        mesh_vertices.push(Vertex {
            position,
            halfedge: anchor,
            valence: face_counts[vi] as i32,
        });
    }

    let mut mesh = HalfEdgeMesh {
        vertices: mesh_vertices,
        halfedges,
        faces: mesh_faces,
    };

    assign_valence_codes(&mut mesh, &face_counts, &boundary_starts)?;

    debug_assert!(mesh.is_valid());
    log::debug!(
        "built half-edge mesh: {} vertices, {} half-edges, {} faces",
        mesh.num_vertices(),
        mesh.num_halfedges(),
        mesh.num_faces()
    );

    Ok(mesh)
}

/// Build a half-edge mesh from vertices and quad faces.
///
/// # Arguments
/// * `vertices` - List of vertex positions
/// * `faces` - List of quad faces, each as [v0, v1, v2, v3] indices (counter-clockwise)
pub fn build_from_quads<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 4]],
) -> Result<HalfEdgeMesh<I>> {
    build_from_polygons(vertices, faces)
}

/// Point boundary vertices at their outgoing boundary half-edge and store
/// the signed valence codes.
///
/// Fails if the rotation around a vertex does not reach all of its faces,
/// which happens when several fans meet at one vertex.
fn assign_valence_codes<I: MeshIndex>(
    mesh: &mut HalfEdgeMesh<I>,
    face_counts: &[usize],
    boundary_starts: &[Option<HalfEdgeId<I>>],
) -> Result<()> {
    for vi in 0..mesh.num_vertices() {
        let start = boundary_starts[vi].unwrap_or(mesh.vertices[vi].halfedge);
        let fan = mesh.vertex_halfedges_from(start).count();
        if fan != face_counts[vi] {
            return Err(MeshError::NonManifold {
                details: format!("vertex {} has {} faces but a fan of {}", vi, face_counts[vi], fan),
            });
        }

        if boundary_starts[vi].is_some() {
            let vertex = &mut mesh.vertices[vi];
            vertex.halfedge = start;
            vertex.valence = -(face_counts[vi] as i32 + 1);
        }
    }

    Ok(())
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    // ==================== Patch Attributes ====================

    /// Find the half-edge running from `v0` to `v1`.
    pub fn find_halfedge(&self, v0: VertexId<I>, v1: VertexId<I>) -> Option<HalfEdgeId<I>> {
        self.vertex_halfedges(v0).find(|&he| self.dest(he) == v1)
    }

    /// Find either half-edge of the edge between `v0` and `v1`.
    fn find_edge(&self, v0: VertexId<I>, v1: VertexId<I>) -> Result<HalfEdgeId<I>> {
        self.find_halfedge(v0, v1)
            .or_else(|| self.find_halfedge(v1, v0))
            .ok_or(MeshError::UnknownEdge {
                v0: v0.index(),
                v1: v1.index(),
            })
    }

    /// Set the sharpness of a single half-edge.
    pub fn set_halfedge_sharpness(&mut self, he: HalfEdgeId<I>, sharpness: f32) {
        self.halfedge_mut(he).sharpness = sharpness;
    }

    /// Mark the edge between `v0` and `v1` as a crease of the given
    /// sharpness. Both half-edges of an interior edge are updated.
    pub fn set_crease(&mut self, v0: VertexId<I>, v1: VertexId<I>, sharpness: f32) -> Result<()> {
        if !sharpness.is_finite() {
            return Err(MeshError::invalid_param("sharpness", sharpness, "must be finite"));
        }

        let he = self.find_edge(v0, v1)?;
        self.set_halfedge_sharpness(he, sharpness);
        if let Some(twin) = self.twin(he) {
            self.set_halfedge_sharpness(twin, sharpness);
        }
        Ok(())
    }

    /// Mark the half-edge from `v0` to `v1` as a triangle head.
    pub fn set_triangle_head(&mut self, v0: VertexId<I>, v1: VertexId<I>) -> Result<()> {
        let he = self.find_halfedge(v0, v1).ok_or(MeshError::UnknownEdge {
            v0: v0.index(),
            v1: v1.index(),
        })?;
        self.halfedge_mut(he).triangle_head = true;
        Ok(())
    }

    /// Assign the index of a face in the active patch set.
    pub fn set_face_new_index(&mut self, f: FaceId<I>, new_index: Option<u32>) {
        self.face_mut(f).new_index = new_index;
    }

    /// Exclude a face from the active patch set.
    pub fn exclude_face(&mut self, f: FaceId<I>) {
        log::trace!("excluding face {:?} from the patch set", f);
        self.set_face_new_index(f, None);
    }
}

/// Convert a half-edge mesh back to a face-vertex representation.
///
/// Returns (vertices, faces) tuple with one vertex loop per face.
pub fn to_face_vertex_polygons<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
) -> (Vec<Point3<f64>>, Vec<Vec<usize>>) {
    let vertices: Vec<Point3<f64>> = mesh.vertex_ids().map(|v| *mesh.position(v)).collect();

    let faces: Vec<Vec<usize>> = mesh
        .face_ids()
        .map(|f| mesh.face_vertices(f).map(|v| v.index()).collect())
        .collect();

    (vertices, faces)
}
