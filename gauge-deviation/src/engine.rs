//! The dual-backend deviation engines.

use gauge_spatial::Bvh;
use gauge_types::{MeshTopology, Point3, TriMesh, Triangle};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Execution backend for the per-vertex query loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Single-threaded: one query after another, fully synchronous.
    Sequential,
    /// Data-parallel: vertices are distributed across all available cores.
    /// Each query reads the shared index and writes its own output slot,
    /// so no ordering or synchronization is involved.
    #[default]
    Parallel,
}

/// The deviation computation contract shared by both backends.
///
/// An engine is constructed from a source and a target mesh; no work happens
/// at construction. [`compute_deviation`](Self::compute_deviation) fills the
/// result, and [`deviations`](Self::deviations) exposes it.
pub trait DeviationCompute {
    /// Compute one deviation value per target vertex.
    ///
    /// Builds a spatial index over the source mesh's triangles, then stores
    /// the distance from each target vertex to the closest point on the
    /// source surface, in target vertex order. Recomputation replaces the
    /// previous result wholesale.
    ///
    /// If the source mesh has no vertices or no triangles, or the target
    /// mesh has no vertices, this is a no-op and the result stays empty;
    /// callers detect the condition by checking the result length, not by
    /// an error. (A target *without faces* is still queryable: it is a
    /// point set, and each point gauges against the source surface.)
    ///
    /// Should a query against a non-empty index ever report no result, the
    /// affected slot is filled with `f32::NAN` and a warning is logged. The
    /// sentinel is the same for both backends.
    fn compute_deviation(&mut self);

    /// The computed deviations, one per target vertex.
    ///
    /// Empty before the first [`compute_deviation`](Self::compute_deviation)
    /// call, never stale.
    fn deviations(&self) -> &[f32];
}

/// Construct the engine for the given backend.
///
/// # Example
///
/// ```
/// use gauge_types::unit_cube;
/// use gauge_deviation::{new_engine, Backend, DeviationCompute};
///
/// let mut engine = new_engine(Backend::Parallel, unit_cube(), unit_cube());
/// engine.compute_deviation();
/// assert_eq!(engine.deviations().len(), 8);
/// ```
#[must_use]
pub fn new_engine(
    backend: Backend,
    source: TriMesh,
    target: TriMesh,
) -> Box<dyn DeviationCompute + Send> {
    match backend {
        Backend::Sequential => Box::new(SequentialDeviation::new(source, target)),
        Backend::Parallel => Box::new(ParallelDeviation::new(source, target)),
    }
}

/// Sequential (host-style) deviation engine.
#[derive(Debug)]
pub struct SequentialDeviation {
    source: TriMesh,
    target: TriMesh,
    deviations: Vec<f32>,
}

impl SequentialDeviation {
    /// Create an engine over the given meshes. No computation happens here.
    #[must_use]
    pub const fn new(source: TriMesh, target: TriMesh) -> Self {
        Self {
            source,
            target,
            deviations: Vec::new(),
        }
    }
}

impl DeviationCompute for SequentialDeviation {
    fn compute_deviation(&mut self) {
        let Some((triangles, bvh)) = prepare(&self.source, &self.target) else {
            self.deviations.clear();
            return;
        };

        info!(
            source_faces = triangles.len(),
            target_vertices = self.target.vertex_count(),
            "computing deviation (sequential)"
        );

        self.deviations = self
            .target
            .vertices
            .iter()
            .map(|v| query_distance(&bvh, &triangles, v.position))
            .collect();
    }

    fn deviations(&self) -> &[f32] {
        &self.deviations
    }
}

/// Data-parallel deviation engine.
///
/// Identical to [`SequentialDeviation`] except that the per-vertex query
/// loop runs as a rayon parallel iterator. The index and triangle data are
/// shared read-only; each vertex produces exactly one output slot.
#[derive(Debug)]
pub struct ParallelDeviation {
    source: TriMesh,
    target: TriMesh,
    deviations: Vec<f32>,
}

impl ParallelDeviation {
    /// Create an engine over the given meshes. No computation happens here.
    #[must_use]
    pub const fn new(source: TriMesh, target: TriMesh) -> Self {
        Self {
            source,
            target,
            deviations: Vec::new(),
        }
    }
}

impl DeviationCompute for ParallelDeviation {
    fn compute_deviation(&mut self) {
        let Some((triangles, bvh)) = prepare(&self.source, &self.target) else {
            self.deviations.clear();
            return;
        };

        info!(
            source_faces = triangles.len(),
            target_vertices = self.target.vertex_count(),
            "computing deviation (parallel)"
        );

        self.deviations = self
            .target
            .vertices
            .par_iter()
            .map(|v| query_distance(&bvh, &triangles, v.position))
            .collect();
    }

    fn deviations(&self) -> &[f32] {
        &self.deviations
    }
}

/// Resolve the source triangles and build the index, or report degenerate
/// input. Shared verbatim by both backends so they cannot drift apart.
fn prepare(source: &TriMesh, target: &TriMesh) -> Option<(Vec<Triangle>, Bvh)> {
    if source.is_empty() || target.vertex_count() == 0 {
        debug!(
            source_vertices = source.vertex_count(),
            source_faces = source.face_count(),
            target_vertices = target.vertex_count(),
            target_faces = target.face_count(),
            "degenerate input mesh, leaving deviation result empty"
        );
        return None;
    }

    let triangles: Vec<Triangle> = source.triangles().collect();
    let bvh = Bvh::build(&triangles);
    Some((triangles, bvh))
}

/// One closest-point query, shared by both backends.
fn query_distance(bvh: &Bvh, triangles: &[Triangle], point: Point3<f32>) -> f32 {
    match bvh.closest(triangles, point) {
        Some(hit) => hit.distance_squared.sqrt(),
        None => {
            warn!("closest-point query returned no result, writing NaN sentinel");
            f32::NAN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauge_types::{unit_cube, Vertex};

    /// Target mesh holding a single vertex and no faces: a point being
    /// gauged against the source surface.
    fn single_vertex_target(x: f32, y: f32, z: f32) -> TriMesh {
        let mut mesh = TriMesh::new();
        mesh.vertices.push(Vertex::from_coords(x, y, z));
        mesh
    }

    fn compute_both(source: &TriMesh, target: &TriMesh) -> (Vec<f32>, Vec<f32>) {
        let mut seq = SequentialDeviation::new(source.clone(), target.clone());
        seq.compute_deviation();
        let mut par = ParallelDeviation::new(source.clone(), target.clone());
        par.compute_deviation();
        (seq.deviations().to_vec(), par.deviations().to_vec())
    }

    #[test]
    fn self_deviation_is_zero() {
        let cube = unit_cube();
        let (seq, par) = compute_both(&cube, &cube);

        assert_eq!(seq.len(), 8);
        assert!(seq.iter().all(|&d| d.abs() < 1e-6), "{seq:?}");
        assert!(par.iter().all(|&d| d.abs() < 1e-6), "{par:?}");
    }

    #[test]
    fn deviations_are_non_negative() {
        let cube = unit_cube();
        let mut target = unit_cube();
        // Push the target around a bit
        for v in &mut target.vertices {
            v.position.x += 0.21;
            v.position.y -= 0.07;
            v.position.z += 0.4;
        }

        let (seq, _) = compute_both(&cube, &target);
        assert!(seq.iter().all(|&d| d >= 0.0));
    }

    #[test]
    fn backends_are_equivalent() {
        let cube = unit_cube();
        let mut target = unit_cube();
        for (i, v) in target.vertices.iter_mut().enumerate() {
            let i = i as f32;
            v.position.x += 0.11 * i;
            v.position.y += 0.05 * (7.0 - i);
            v.position.z -= 0.3;
        }

        let (seq, par) = compute_both(&cube, &target);
        assert_eq!(seq.len(), par.len());
        for (i, (a, b)) in seq.iter().zip(par.iter()).enumerate() {
            assert!((a - b).abs() < 1e-4, "vertex {i}: {a} vs {b}");
        }
    }

    #[test]
    fn empty_source_is_a_noop() {
        let target = unit_cube();
        let mut engine = SequentialDeviation::new(TriMesh::new(), target);
        engine.compute_deviation();
        assert!(engine.deviations().is_empty());
    }

    #[test]
    fn empty_target_is_a_noop() {
        let mut engine = ParallelDeviation::new(unit_cube(), TriMesh::new());
        engine.compute_deviation();
        assert!(engine.deviations().is_empty());
    }

    #[test]
    fn source_without_faces_is_a_noop() {
        let mut source = TriMesh::new();
        source.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));

        let mut engine = SequentialDeviation::new(source, unit_cube());
        engine.compute_deviation();
        assert!(engine.deviations().is_empty());
    }

    #[test]
    fn deviations_empty_before_compute() {
        let engine = SequentialDeviation::new(unit_cube(), unit_cube());
        assert!(engine.deviations().is_empty());
    }

    #[test]
    fn recompute_replaces_result() {
        let mut engine = SequentialDeviation::new(unit_cube(), unit_cube());
        engine.compute_deviation();
        let first = engine.deviations().to_vec();
        engine.compute_deviation();
        assert_eq!(engine.deviations(), first.as_slice());
    }

    #[test]
    fn single_triangle_height_query() {
        // A point at height h above the triangle's centroid along its
        // normal must be exactly h away.
        let mut source = TriMesh::new();
        source.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        source.vertices.push(Vertex::from_coords(2.0, 0.0, 0.0));
        source.vertices.push(Vertex::from_coords(0.0, 2.0, 0.0));
        source.faces.push([0, 1, 2]);

        let h = 0.75;
        let target = single_vertex_target(2.0 / 3.0, 2.0 / 3.0, h);

        let (seq, par) = compute_both(&source, &target);
        assert!((seq[0] - h).abs() < 1e-5, "sequential: {}", seq[0]);
        assert!((par[0] - h).abs() < 1e-5, "parallel: {}", par[0]);
    }

    #[test]
    fn cube_face_offset_scenario() {
        // Target vertex 0.3 outside the center of the +X face of the
        // unit cube.
        let source = unit_cube();
        let target = single_vertex_target(1.3, 0.5, 0.5);

        let (seq, par) = compute_both(&source, &target);
        assert!((seq[0] - 0.3).abs() < 1e-5, "sequential: {}", seq[0]);
        assert!((par[0] - 0.3).abs() < 1e-5, "parallel: {}", par[0]);
    }

    #[test]
    fn factory_dispatches_both_backends() {
        let cube = unit_cube();
        for backend in [Backend::Sequential, Backend::Parallel] {
            let mut engine = new_engine(backend, cube.clone(), cube.clone());
            engine.compute_deviation();
            assert_eq!(engine.deviations().len(), 8, "{backend:?}");
        }
    }

    #[test]
    fn default_backend_is_parallel() {
        assert_eq!(Backend::default(), Backend::Parallel);
    }
}
