//! Error types for deviation handling.

use thiserror::Error;

use gauge_types::{MeshTopology, TriMesh};

/// Result type alias for deviation operations.
pub type DeviationResult<T> = Result<T, DeviationError>;

/// Errors that can occur when consuming a deviation result.
///
/// Note that *computing* deviations never errors: empty input is a
/// legitimate state that yields an empty result. Errors only arise when a
/// deviation array is combined with a mesh it does not belong to.
#[derive(Debug, Error)]
pub enum DeviationError {
    /// Deviation count does not match the target mesh's vertex count.
    #[error("deviation count mismatch: expected {expected} (target vertices), got {got}")]
    CountMismatch {
        /// The target mesh's vertex count.
        expected: usize,
        /// The length of the deviation array.
        got: usize,
    },
}

/// Check that a deviation array belongs to the given target mesh.
///
/// Writers and re-coloring paths call this before combining the two;
/// a mismatch aborts the operation before any partial output is produced.
///
/// # Errors
///
/// Returns [`DeviationError::CountMismatch`] when the lengths disagree.
pub fn check_deviation_count(target: &TriMesh, deviations: &[f32]) -> DeviationResult<()> {
    let expected = target.vertex_count();
    let got = deviations.len();
    if expected == got {
        Ok(())
    } else {
        Err(DeviationError::CountMismatch { expected, got })
    }
}
