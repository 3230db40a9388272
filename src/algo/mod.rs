//! Patch classification and index extraction.
//!
//! Every query in this module reads an already-built [`HalfEdgeMesh`] and
//! never changes it, so queries can run in any order and from several
//! threads at once.
//!
//! - [`vertex`]: valence classes, crease detection, one-ring classification
//! - [`face`]: per-face predicates, transition patches, neighbourhoods
//! - [`one_ring`]: index layouts consumed by the patch renderer
//! - [`batch`]: whole-mesh passes feeding a patch-type dispatch
//!
//! [`HalfEdgeMesh`]: crate::mesh::HalfEdgeMesh

pub mod batch;
pub mod face;
pub mod one_ring;
mod report;
pub mod vertex;

pub use report::Reporter;

/// Options for classification passes.
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    /// Largest difference between two crease sharpness values that still
    /// counts as equal.
    pub sharpness_epsilon: f32,

    /// Whether to use parallel execution (default: true).
    pub parallel: bool,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifyOptions {
    /// Create options with the default sharpness tolerance.
    pub fn new() -> Self {
        Self {
            sharpness_epsilon: f32::EPSILON,
            parallel: true,
        }
    }

    /// Set the sharpness comparison tolerance.
    pub fn with_sharpness_epsilon(mut self, epsilon: f32) -> Self {
        self.sharpness_epsilon = epsilon;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
