//! Whole-mesh classification passes.
//!
//! The patch-type dispatch decides a rendering rule for every vertex and
//! face. These passes run the per-element queries over the whole mesh, in
//! parallel when [`ClassifyOptions::parallel`] is set. Queries only read the
//! mesh, so the result does not depend on the execution mode.
//!
//! # Example
//!
//! ```
//! use fastpatch::prelude::*;
//! use fastpatch::algo::batch::{classify_vertices, ClassStatistics};
//! use fastpatch::algo::ClassifyOptions;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mesh: HalfEdgeMesh = build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap();
//!
//! let summaries = classify_vertices(&mesh, &ClassifyOptions::default());
//! let stats = ClassStatistics::from_vertices(&summaries);
//! assert_eq!(stats.corner, 4);
//! ```

use rayon::prelude::*;

use crate::mesh::{FaceId, HalfEdgeMesh, MeshIndex, VertexId};

use super::face::{self, TransitionPatchInfo};
use super::vertex::{self, VertexClass};
use super::{ClassifyOptions, Reporter};

/// Classification of one vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexSummary {
    /// Valence class, including the excluded-face fallback.
    pub class: VertexClass,

    /// Number of crease edges around the vertex.
    pub crease_count: u32,

    /// Mean crease sharpness, see
    /// [`OneRingClassification`](super::vertex::OneRingClassification).
    pub average_sharpness: f32,

    /// Whether the vertex has no direct evaluation rule.
    pub unevaluable: bool,
}

/// Classification of one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceSummary {
    /// Number of sides.
    pub valence: u32,

    /// Number of corners on the mesh boundary.
    pub boundary_vertices: usize,

    /// Number of crease or boundary edges.
    pub crease_edges: usize,

    /// Whether a corner is a corner vertex or an irregular boundary vertex.
    pub nonregular_boundary: bool,

    /// Triangle-head layout, for faces with at least one triangle head.
    pub transition: Option<TransitionPatchInfo>,
}

/// Classify every vertex of the mesh.
pub fn classify_vertices<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, options: &ClassifyOptions) -> Vec<VertexSummary> {
    let summarize = |i: usize| summarize_vertex(mesh, VertexId::new(i), options.sharpness_epsilon);

    if options.parallel {
        (0..mesh.num_vertices()).into_par_iter().map(summarize).collect()
    } else {
        (0..mesh.num_vertices()).map(summarize).collect()
    }
}

/// Classify every face of the mesh.
///
/// Faces carrying a triangle head are analysed as transition patches;
/// non-quad ones are reported through `reporter`.
pub fn classify_faces<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    options: &ClassifyOptions,
    reporter: &Reporter,
) -> Vec<FaceSummary> {
    let summarize = |i: usize| summarize_face(mesh, FaceId::new(i), reporter);

    if options.parallel {
        (0..mesh.num_faces()).into_par_iter().map(summarize).collect()
    } else {
        (0..mesh.num_faces()).map(summarize).collect()
    }
}

fn summarize_vertex<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, v: VertexId<I>, epsilon: f32) -> VertexSummary {
    let one_ring = vertex::classify_one_ring(mesh, v);
    VertexSummary {
        class: one_ring.class,
        crease_count: one_ring.crease_count,
        average_sharpness: one_ring.average_sharpness,
        unevaluable: vertex::is_unevaluable_with(mesh, v, epsilon),
    }
}

fn summarize_face<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, f: FaceId<I>, reporter: &Reporter) -> FaceSummary {
    let transition = if face::has_triangle_head(mesh, f) {
        face::transition_patch_info(mesh, f, reporter)
    } else {
        None
    };

    FaceSummary {
        valence: mesh.face(f).valence,
        boundary_vertices: face::boundary_vertex_count(mesh, f),
        crease_edges: face::crease_edge_count(mesh, f),
        nonregular_boundary: face::has_nonregular_boundary(mesh, f),
        transition,
    }
}

/// Counts of vertex classes over a mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassStatistics {
    /// Interior vertices of valence 4.
    pub regular: usize,
    /// Interior vertices of any other valence.
    pub extraordinary: usize,
    /// Generic boundary vertices.
    pub boundary: usize,
    /// Corner vertices.
    pub corner: usize,
    /// Interior vertices that fell back to the corner rule.
    pub excluded: usize,
    /// Vertices without a direct evaluation rule.
    pub unevaluable: usize,
}

impl ClassStatistics {
    /// Tally vertex summaries.
    pub fn from_vertices(summaries: &[VertexSummary]) -> Self {
        let mut stats = Self::default();
        for s in summaries {
            match s.class {
                VertexClass::Interior { valence: 4 } => stats.regular += 1,
                VertexClass::Interior { .. } => stats.extraordinary += 1,
                VertexClass::Boundary { .. } => stats.boundary += 1,
                VertexClass::Corner => stats.corner += 1,
                VertexClass::ExcludedFallback => stats.excluded += 1,
            }
            if s.unevaluable {
                stats.unevaluable += 1;
            }
        }
        stats
    }
}
