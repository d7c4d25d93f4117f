//! End-to-end pipeline test: compute, normalize, colorize, write, reload.

use gauge_colormap::Palette;
use gauge_deviation::{
    median_edge_length, new_engine, normalize_deviations, Backend, DeviationCompute,
};
use gauge_io::{load_ply, save_colored_ply};
use gauge_types::{unit_cube, MeshTopology, TriMesh, Vertex};

/// Unit cube inflated outward by `offset` along each axis direction from
/// the cube center, so every vertex is a known distance from the surface.
fn inflated_cube(offset: f32) -> TriMesh {
    let mut mesh = unit_cube();
    for v in &mut mesh.vertices {
        for c in 0..3 {
            if v.position[c] > 0.5 {
                v.position[c] += offset;
            } else {
                v.position[c] -= offset;
            }
        }
    }
    mesh
}

#[test]
fn full_inspection_pipeline() {
    let source = unit_cube();
    let target = inflated_cube(0.1);

    // Corner vertices move diagonally by 0.1 per axis; the closest surface
    // point is the original corner, sqrt(3 * 0.1^2) away.
    let expected = (3.0f32 * 0.01).sqrt();

    for backend in [Backend::Sequential, Backend::Parallel] {
        let mut engine = new_engine(backend, source.clone(), target.clone());
        engine.compute_deviation();

        let mut deviations = engine.deviations().to_vec();
        assert_eq!(deviations.len(), target.vertex_count());
        for &d in &deviations {
            assert!((d - expected).abs() < 1e-5, "{backend:?}: {d} vs {expected}");
        }

        // Normalize by the source's median edge length (1.0 for the cube)
        let sigma = median_edge_length(&source);
        assert!((sigma - 1.0).abs() < 1e-6);
        normalize_deviations(&mut deviations, sigma);

        // Write and reload the colored result
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deviation.ply");
        save_colored_ply(&target, &deviations, 4, &Palette::classic(), &path).unwrap();

        let reloaded = load_ply(&path).unwrap();
        assert_eq!(reloaded.vertex_count(), target.vertex_count());
        assert_eq!(reloaded.face_count(), target.face_count());
        assert!(reloaded.vertices.iter().all(|v| v.color.is_some()));
    }
}

#[test]
fn point_probe_against_reference() {
    // A lone probe point 0.3 above the top face center of the reference
    // cube: the classic single-point inspection scenario.
    let source = unit_cube();
    let mut target = TriMesh::new();
    target.vertices.push(Vertex::from_coords(0.5, 0.5, 1.3));

    let mut engine = new_engine(Backend::Parallel, source, target);
    engine.compute_deviation();

    let deviations = engine.deviations();
    assert_eq!(deviations.len(), 1);
    assert!((deviations[0] - 0.3).abs() < 1e-5);
}

#[test]
fn empty_source_yields_empty_result_and_no_output() {
    let mut engine = new_engine(Backend::Sequential, TriMesh::new(), unit_cube());
    engine.compute_deviation();
    assert!(engine.deviations().is_empty());
}
