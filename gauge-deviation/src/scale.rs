//! Normalization scale (σ) helpers.
//!
//! Raw deviations are absolute distances in mesh units. Dividing them by
//! the source mesh's median triangle edge length brings them into a
//! roughly `[0, 1]` range that colors meaningfully across meshes of very
//! different tessellation densities.

use gauge_types::{MeshTopology, TriMesh};
use tracing::warn;

/// Median triangle edge length of a mesh.
///
/// Collects all three edge lengths of every face (shared edges counted
/// once per adjacent face, as the inspection workflow has always done) and
/// returns the middle element. Returns `1.0` for a mesh without faces so
/// downstream division is always safe.
///
/// # Example
///
/// ```
/// use gauge_types::unit_cube;
/// use gauge_deviation::median_edge_length;
///
/// // Cube faces are right triangles with legs 1 and hypotenuse sqrt(2);
/// // the median over all 36 edge entries is 1.0.
/// assert!((median_edge_length(&unit_cube()) - 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn median_edge_length(mesh: &TriMesh) -> f32 {
    let mut edges = Vec::with_capacity(mesh.face_count() * 3);
    for tri in mesh.triangles() {
        edges.extend(tri.edge_lengths());
    }

    if edges.is_empty() {
        return 1.0;
    }

    edges.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    edges[edges.len() / 2]
}

/// Divide every deviation by the scale factor, in place.
///
/// A scale at or near zero would blow the values up to infinity, so it is
/// rejected with a warning and the deviations stay untouched.
pub fn normalize_deviations(deviations: &mut [f32], sigma: f32) {
    if sigma.abs() < f32::EPSILON {
        warn!(sigma, "normalization scale is degenerate, skipping");
        return;
    }
    for d in deviations {
        *d /= sigma;
    }
}
