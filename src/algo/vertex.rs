//! Per-vertex patch classification.
//!
//! The patch renderer picks a rule for every vertex from its valence class
//! and the creases running through it. This module answers those questions:
//!
//! - [`vertex_class`]: interior, boundary or corner, from the valence code
//! - [`classify_one_ring`]: one-ring neighbours plus crease information
//! - [`boundary_endpoints`]: the two boundary neighbours of a boundary vertex
//! - [`is_unevaluable`]: whether a crease configuration has no direct
//!   evaluation rule
//!
//! # Example
//!
//! ```
//! use fastpatch::prelude::*;
//! use fastpatch::algo::vertex::{classify_one_ring, VertexClass};
//! use nalgebra::Point3;
//!
//! let vertices: Vec<Point3<f64>> = (0..9)
//!     .map(|k| Point3::new((k % 3) as f64, (k / 3) as f64, 0.0))
//!     .collect();
//! let faces = vec![[0, 1, 4, 3], [1, 2, 5, 4], [3, 4, 7, 6], [4, 5, 8, 7]];
//! let mesh: HalfEdgeMesh = build_from_quads(&vertices, &faces).unwrap();
//!
//! let center = classify_one_ring(&mesh, VertexId::new(4));
//! assert_eq!(center.class, VertexClass::Interior { valence: 4 });
//! assert_eq!(center.neighbours.len(), 8);
//! ```

use crate::mesh::{HalfEdgeMesh, MeshIndex, VertexId, CORNER_VALENCE};

/// Valence class of a vertex as seen by the patch renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexClass {
    /// Interior vertex with the given number of incident faces.
    Interior {
        /// Number of incident faces.
        valence: u32,
    },
    /// Boundary vertex handled by the generic boundary rule.
    Boundary {
        /// Signed valence code (minus the edge count).
        valence: i32,
    },
    /// Boundary vertex with a single incident face.
    Corner,
    /// Interior vertex next to a face outside the active patch set; it is
    /// rendered with the corner rule.
    ExcludedFallback,
}

impl VertexClass {
    /// The integer code used by the patch renderer.
    ///
    /// Interior and boundary vertices report their valence code, corners and
    /// the excluded fallback both report `-2`.
    pub fn code(self) -> i32 {
        match self {
            VertexClass::Interior { valence } => valence as i32,
            VertexClass::Boundary { valence } => valence,
            VertexClass::Corner | VertexClass::ExcludedFallback => CORNER_VALENCE,
        }
    }

    /// Whether the corner rule applies.
    pub fn uses_corner_rule(self) -> bool {
        matches!(self, VertexClass::Corner | VertexClass::ExcludedFallback)
    }
}

/// Result of [`classify_one_ring`].
#[derive(Debug, Clone, PartialEq)]
pub struct OneRingClassification {
    /// Valence class of the vertex.
    pub class: VertexClass,

    /// Interleaved neighbour vertex indices and incident face indices (the
    /// face's index in the active patch set), in rotation order. Empty unless
    /// the vertex is interior.
    pub neighbours: Vec<u32>,

    /// Number of crease edges around an interior vertex.
    pub crease_count: u32,

    /// Mean sharpness of the crease edges; zero with fewer than two creases.
    pub average_sharpness: f32,

    /// The two vertices a crease runs to, for an interior vertex with exactly
    /// two creases. For boundary vertices this holds the two boundary
    /// neighbours instead.
    pub crease_pair: Option<[u32; 2]>,
}

impl OneRingClassification {
    fn corner_rule(class: VertexClass) -> Self {
        Self {
            class,
            neighbours: Vec::new(),
            crease_count: 0,
            average_sharpness: 0.0,
            crease_pair: None,
        }
    }

    /// Shorthand for `self.class.code()`.
    pub fn code(&self) -> i32 {
        self.class.code()
    }

    /// The crease pair with `-1, -1` standing in for "no usable pair".
    pub fn crease_indices(&self) -> [i64; 2] {
        match self.crease_pair {
            Some([a, b]) => [a as i64, b as i64],
            None => [-1, -1],
        }
    }
}

/// Classify a vertex from its valence code alone.
///
/// Unlike [`classify_one_ring`] this does not look at neighbouring faces, so
/// it never reports [`VertexClass::ExcludedFallback`].
pub fn vertex_class<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, v: VertexId<I>) -> VertexClass {
    match mesh.valence(v) {
        valence if valence < CORNER_VALENCE => VertexClass::Boundary { valence },
        CORNER_VALENCE => VertexClass::Corner,
        _ => VertexClass::Interior {
            valence: outgoing_edge_count(mesh, v) as u32,
        },
    }
}

/// Count the outgoing half-edges reachable by rotating around a vertex.
///
/// This is the degree found by walking the graph, independent of the stored
/// valence code. On the boundary it equals the number of incident faces.
pub fn outgoing_edge_count<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, v: VertexId<I>) -> usize {
    mesh.vertex_halfedges(v).count()
}

/// Classify the one-ring of a vertex.
///
/// - Generic boundary vertices (valence code below `-2`) get no neighbour
///   list; their `crease_pair` holds the two boundary neighbours.
/// - Corners get the empty corner result.
/// - Interior vertices list `(neighbour, face)` pairs in rotation order and
///   collect their creases. If any incident face is excluded from the patch
///   set, the whole result collapses to the corner result with
///   [`VertexClass::ExcludedFallback`].
///
/// A crease pair is only reported for exactly two creases.
pub fn classify_one_ring<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, v: VertexId<I>) -> OneRingClassification {
    let valence = mesh.valence(v);

    if valence < CORNER_VALENCE {
        return OneRingClassification {
            crease_pair: boundary_endpoints(mesh, v).map(|[a, b]| [raw(a), raw(b)]),
            ..OneRingClassification::corner_rule(VertexClass::Boundary { valence })
        };
    }

    if valence == CORNER_VALENCE {
        return OneRingClassification::corner_rule(VertexClass::Corner);
    }

    let mut neighbours = Vec::with_capacity(2 * valence.max(0) as usize);
    let mut creases: Vec<u32> = Vec::new();
    let mut total_sharpness = 0.0f32;

    for he in mesh.vertex_halfedges(v) {
        let dest = raw(mesh.dest(he));
        neighbours.push(dest);

        let Some(face_index) = mesh.face(mesh.left_face(he)).new_index else {
            return OneRingClassification::corner_rule(VertexClass::ExcludedFallback);
        };
        neighbours.push(face_index);

        let sharpness = mesh.halfedge(he).sharpness;
        if sharpness > 0.0 {
            creases.push(dest);
            total_sharpness += sharpness;
        }
    }

    debug_assert!(valence <= 0 || neighbours.len() == 2 * valence as usize);

    let crease_count = creases.len() as u32;
    let average_sharpness = if crease_count < 2 {
        0.0
    } else {
        total_sharpness / crease_count as f32
    };
    let crease_pair = match creases.as_slice() {
        &[a, b] => Some([a, b]),
        _ => None,
    };

    OneRingClassification {
        class: VertexClass::Interior {
            valence: (neighbours.len() / 2) as u32,
        },
        neighbours,
        crease_count,
        average_sharpness,
        crease_pair,
    }
}

/// The two boundary neighbours of a generic boundary vertex.
///
/// The first is the destination of the outgoing boundary half-edge, the
/// second the origin of the incoming one. Returns `None` for corners and
/// interior vertices.
pub fn boundary_endpoints<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, v: VertexId<I>) -> Option<[VertexId<I>; 2]> {
    if mesh.valence(v) >= CORNER_VALENCE {
        return None;
    }

    let out = mesh
        .vertex_halfedges(v)
        .find(|&he| mesh.is_boundary_halfedge(he))?;
    debug_assert_eq!(mesh.origin(out), v);

    let incoming = mesh.face_prev(mesh.vertex_prev(out));
    debug_assert_eq!(mesh.dest(incoming), v);

    Some([mesh.dest(out), mesh.origin(incoming)])
}

/// Check whether a vertex has no direct evaluation rule.
///
/// Uses [`f32::EPSILON`] to compare crease sharpness; see
/// [`is_unevaluable_with`].
pub fn is_unevaluable<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, v: VertexId<I>) -> bool {
    is_unevaluable_with(mesh, v, f32::EPSILON)
}

/// Check whether a vertex has no direct evaluation rule.
///
/// - Boundary vertices are always evaluable.
/// - Interior vertices of valence other than 4 are not.
/// - A valence-4 vertex is evaluable with zero or one crease, or with two
///   creases of equal sharpness on opposite edges (a straight crease).
///   Creases of differing sharpness, a bent crease, or three or more creases
///   make it unevaluable.
pub fn is_unevaluable_with<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, v: VertexId<I>, epsilon: f32) -> bool {
    let valence = mesh.valence(v);
    if valence < 0 {
        return false;
    }
    if valence != 4 {
        return true;
    }

    let mut first_sharpness: Option<f32> = None;
    let mut positions = [0usize; 2];
    let mut num_creases = 0;

    for (index, he) in mesh.vertex_halfedges(v).enumerate() {
        let sharpness = mesh.halfedge(he).sharpness;
        if sharpness <= 0.0 {
            continue;
        }

        match first_sharpness {
            None => first_sharpness = Some(sharpness),
            Some(first) if (first - sharpness).abs() > epsilon => return true,
            Some(_) => {}
        }

        if num_creases < 2 {
            positions[num_creases] = index;
        }
        num_creases += 1;
    }

    match num_creases {
        0 | 1 => false,
        2 => positions[1] - positions[0] != 2,
        _ => true,
    }
}

#[inline]
fn raw<I: MeshIndex>(v: VertexId<I>) -> u32 {
    v.render_index(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::test_meshes::{cube, grid, grid_face, grid_vertex};

    fn center() -> VertexId {
        grid_vertex(2, 1, 1)
    }

    fn v(i: usize, j: usize) -> VertexId {
        grid_vertex(2, i, j)
    }

    #[test]
    fn test_outgoing_edge_count() {
        let mesh = grid(2);
        assert_eq!(outgoing_edge_count(&mesh, center()), 4);
        assert_eq!(outgoing_edge_count(&mesh, v(1, 0)), 2);
        assert_eq!(outgoing_edge_count(&mesh, v(0, 0)), 1);

        let cube = cube();
        for vid in cube.vertex_ids() {
            assert_eq!(outgoing_edge_count(&cube, vid), 3);
        }
    }

    #[test]
    fn test_vertex_class() {
        let mesh = grid(2);
        assert_eq!(vertex_class(&mesh, center()), VertexClass::Interior { valence: 4 });
        assert_eq!(vertex_class(&mesh, v(1, 0)), VertexClass::Boundary { valence: -3 });
        assert_eq!(vertex_class(&mesh, v(0, 0)), VertexClass::Corner);
        assert_eq!(VertexClass::Corner.code(), -2);
        assert_eq!(VertexClass::ExcludedFallback.code(), -2);
        assert!(VertexClass::ExcludedFallback.uses_corner_rule());
    }

    #[test]
    fn test_interior_without_creases() {
        let mesh = grid(2);
        let result = classify_one_ring(&mesh, center());

        assert_eq!(result.class, VertexClass::Interior { valence: 4 });
        assert_eq!(result.code(), 4);
        // (neighbour, face) pairs in rotation order
        assert_eq!(result.neighbours, vec![3, 0, 1, 1, 5, 3, 7, 2]);
        assert_eq!(result.crease_count, 0);
        assert_eq!(result.average_sharpness, 0.0);
        assert_eq!(result.crease_pair, None);
        assert_eq!(result.crease_indices(), [-1, -1]);
    }

    #[test]
    fn test_neighbour_list_is_twice_valence() {
        let cube = cube();
        for vid in cube.vertex_ids() {
            let result = classify_one_ring(&cube, vid);
            assert_eq!(result.neighbours.len(), 2 * 3);
            assert_eq!(result.code(), 3);
        }
    }

    #[test]
    fn test_straight_crease() {
        let mut mesh = grid(2);
        mesh.set_crease(v(0, 1), center(), 1.0).unwrap();
        mesh.set_crease(center(), v(2, 1), 1.0).unwrap();

        let result = classify_one_ring(&mesh, center());
        assert_eq!(result.crease_count, 2);
        assert_eq!(result.average_sharpness, 1.0);
        assert_eq!(result.crease_pair, Some([3, 5]));
        assert_eq!(result.crease_indices(), [3, 5]);
        assert!(!is_unevaluable(&mesh, center()));
    }

    #[test]
    fn test_unequal_crease_sharpness() {
        let mut mesh = grid(2);
        mesh.set_crease(v(0, 1), center(), 1.0).unwrap();
        mesh.set_crease(center(), v(2, 1), 3.0).unwrap();

        let result = classify_one_ring(&mesh, center());
        assert_eq!(result.crease_count, 2);
        assert_eq!(result.average_sharpness, 2.0);
        assert_eq!(result.crease_pair, Some([3, 5]));
        assert!(is_unevaluable(&mesh, center()));

        // A loose tolerance accepts the pair
        assert!(!is_unevaluable_with(&mesh, center(), 2.5));
    }

    #[test]
    fn test_bent_crease() {
        let mut mesh = grid(2);
        mesh.set_crease(v(0, 1), center(), 1.0).unwrap();
        mesh.set_crease(center(), v(1, 0), 1.0).unwrap();

        let result = classify_one_ring(&mesh, center());
        assert_eq!(result.crease_pair, Some([3, 1]));
        assert!(is_unevaluable(&mesh, center()));
    }

    #[test]
    fn test_three_creases() {
        let mut mesh = grid(2);
        mesh.set_crease(v(0, 1), center(), 1.0).unwrap();
        mesh.set_crease(center(), v(1, 0), 1.0).unwrap();
        mesh.set_crease(center(), v(2, 1), 1.0).unwrap();

        let result = classify_one_ring(&mesh, center());
        assert_eq!(result.crease_count, 3);
        assert_eq!(result.crease_pair, None);
        assert_eq!(result.crease_indices(), [-1, -1]);
        assert_eq!(result.average_sharpness, 1.0);
        assert!(is_unevaluable(&mesh, center()));
    }

    #[test]
    fn test_single_crease() {
        let mut mesh = grid(2);
        mesh.set_crease(center(), v(1, 2), 4.0).unwrap();

        let result = classify_one_ring(&mesh, center());
        assert_eq!(result.crease_count, 1);
        assert_eq!(result.average_sharpness, 0.0);
        assert_eq!(result.crease_pair, None);
        assert!(!is_unevaluable(&mesh, center()));
    }

    #[test]
    fn test_excluded_face_falls_back_to_corner_rule() {
        let corner = OneRingClassification {
            class: VertexClass::ExcludedFallback,
            neighbours: Vec::new(),
            crease_count: 0,
            average_sharpness: 0.0,
            crease_pair: None,
        };

        // The result must not depend on where in the walk the face is met
        for (i, j) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let mut mesh = grid(2);
            mesh.set_crease(v(0, 1), center(), 1.0).unwrap();
            mesh.set_crease(center(), v(2, 1), 1.0).unwrap();
            mesh.exclude_face(grid_face(2, i, j));

            let result = classify_one_ring(&mesh, center());
            assert_eq!(result, corner, "excluded face ({}, {})", i, j);
            assert_eq!(result.code(), -2);
            assert_eq!(result.crease_indices(), [-1, -1]);
        }
    }

    #[test]
    fn test_corner_vertex() {
        let mesh = grid(2);
        let result = classify_one_ring(&mesh, v(0, 0));

        assert_eq!(result.class, VertexClass::Corner);
        assert_eq!(result.code(), -2);
        assert!(result.neighbours.is_empty());
        assert_eq!(result.crease_count, 0);
        assert_eq!(result.average_sharpness, 0.0);
        assert_eq!(result.crease_indices(), [-1, -1]);
    }

    #[test]
    fn test_boundary_vertex() {
        let mut mesh = grid(2);
        // Creases are ignored on the boundary
        mesh.set_crease(v(1, 0), center(), 2.0).unwrap();

        let result = classify_one_ring(&mesh, v(1, 0));
        assert_eq!(result.class, VertexClass::Boundary { valence: -3 });
        assert_eq!(result.code(), -3);
        assert!(result.neighbours.is_empty());
        assert_eq!(result.crease_count, 0);
        assert_eq!(result.average_sharpness, 0.0);
        assert_eq!(result.crease_pair, Some([2, 0]));
    }

    #[test]
    fn test_boundary_endpoints() {
        let mesh = grid(2);
        assert_eq!(boundary_endpoints(&mesh, v(1, 0)), Some([v(2, 0), v(0, 0)]));
        assert_eq!(boundary_endpoints(&mesh, v(2, 1)), Some([v(2, 2), v(2, 0)]));
        assert_eq!(boundary_endpoints(&mesh, v(0, 1)), Some([v(0, 0), v(0, 2)]));

        // Not a generic boundary vertex
        assert_eq!(boundary_endpoints(&mesh, v(0, 0)), None);
        assert_eq!(boundary_endpoints(&mesh, center()), None);
    }

    #[test]
    fn test_is_unevaluable_by_valence() {
        let mesh = grid(3);
        for vid in mesh.vertex_ids() {
            // Boundary vertices are evaluable, plain valence-4 vertices too
            assert!(!is_unevaluable(&mesh, vid), "{:?}", vid);
        }

        let cube = cube();
        for vid in cube.vertex_ids() {
            assert!(is_unevaluable(&cube, vid));
        }
    }

    #[test]
    fn test_boundary_creases_stay_evaluable() {
        let mut mesh = grid(2);
        mesh.set_crease(v(1, 0), center(), 1.0).unwrap();
        mesh.set_crease(v(0, 0), v(1, 0), 5.0).unwrap();
        assert!(!is_unevaluable(&mesh, v(1, 0)));
    }
}
