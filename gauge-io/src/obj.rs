//! OBJ (Wavefront) format support.
//!
//! ASCII only. The loader accepts the subset the inspection workflow
//! produces and consumes:
//!
//! - `v x y z` with optional inline `r g b` vertex colors
//! - `vn` / `vt` statements, attached to vertices through face references
//! - `f` statements in the `v`, `v/vt`, `v/vt/vn` and `v//vn` forms,
//!   1-based or negative (relative) indices, **triangles only**
//!
//! The colored writer emits `v x y z r g b` lines (color components as
//! floats in `[0, 1]`) and 1-based triangular faces, which round-trips
//! through the loader.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use gauge_colormap::{deviation_to_color, Palette};
use gauge_deviation::check_deviation_count;
use gauge_types::{TriMesh, Vertex, VertexColor};

use crate::error::{IoError, IoResult};

/// Load a mesh from an ASCII OBJ file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - A `v`/`f` statement is malformed or indexes out of range
/// - Any face has more or fewer than three vertices
///   ([`IoError::NonTriangularFace`])
pub fn load_obj<P: AsRef<Path>>(path: P) -> IoResult<TriMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;
    let reader = BufReader::new(file);

    let mut mesh = TriMesh::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut texcoords: Vec<(f32, f32)> = Vec::new();
    let mut face_index = 0usize;

    for line in reader.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword {
            "v" => {
                let fields: Vec<&str> = parts.collect();
                if fields.len() < 3 {
                    return Err(IoError::invalid_content(format!(
                        "vertex statement with {} coordinates",
                        fields.len()
                    )));
                }
                let x: f32 = fields[0].parse()?;
                let y: f32 = fields[1].parse()?;
                let z: f32 = fields[2].parse()?;
                let mut vertex = Vertex::from_coords(x, y, z);

                // Optional inline vertex color
                if fields.len() >= 6 {
                    let r: f32 = fields[3].parse()?;
                    let g: f32 = fields[4].parse()?;
                    let b: f32 = fields[5].parse()?;
                    vertex.color = Some(VertexColor::from_float(r, g, b));
                }

                mesh.vertices.push(vertex);
            }
            "vn" => {
                let fields: Vec<&str> = parts.collect();
                if fields.len() >= 3 {
                    normals.push([fields[0].parse()?, fields[1].parse()?, fields[2].parse()?]);
                }
            }
            "vt" => {
                let fields: Vec<&str> = parts.collect();
                if fields.len() >= 2 {
                    texcoords.push((fields[0].parse()?, fields[1].parse()?));
                }
            }
            "f" => {
                let refs: Vec<&str> = parts.collect();
                if refs.len() != 3 {
                    return Err(IoError::NonTriangularFace {
                        face_index,
                        vertex_count: refs.len(),
                    });
                }

                let mut face = [0u32; 3];
                for (slot, r) in face.iter_mut().zip(&refs) {
                    let vi = parse_face_ref(r, &mut mesh, &normals, &texcoords)?;
                    *slot = vi;
                }
                mesh.faces.push(face);
                face_index += 1;
            }
            // Groups, objects, materials and comments are irrelevant here.
            _ => {}
        }
    }

    if !mesh.validate() {
        return Err(IoError::invalid_content(
            "face index out of range".to_string(),
        ));
    }

    Ok(mesh)
}

/// Parse one `f` vertex reference and attach any referenced normal/texcoord
/// to the vertex. Returns the zero-based vertex index.
#[allow(clippy::cast_possible_truncation)]
fn parse_face_ref(
    r: &str,
    mesh: &mut TriMesh,
    normals: &[[f32; 3]],
    texcoords: &[(f32, f32)],
) -> IoResult<u32> {
    let mut pieces = r.split('/');

    let vi = resolve_index(
        pieces
            .next()
            .ok_or_else(|| IoError::invalid_content("empty face reference"))?,
        mesh.vertices.len(),
    )?;

    let ti = match pieces.next() {
        Some("") | None => None,
        Some(s) => Some(resolve_index(s, texcoords.len())?),
    };
    let ni = match pieces.next() {
        Some("") | None => None,
        Some(s) => Some(resolve_index(s, normals.len())?),
    };

    if let Some(vertex) = mesh.vertices.get_mut(vi) {
        if let Some(ti) = ti {
            if let Some(&uv) = texcoords.get(ti) {
                vertex.uv = Some(uv);
            }
        }
        if let Some(ni) = ni {
            if let Some(&[nx, ny, nz]) = normals.get(ni) {
                vertex.normal = Some(gauge_types::Vector3::new(nx, ny, nz));
            }
        }
    }

    Ok(vi as u32)
}

/// Resolve a 1-based (or negative, relative) OBJ index to zero-based.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn resolve_index(s: &str, len: usize) -> IoResult<usize> {
    let raw: i64 = s.parse()?;
    let resolved = if raw < 0 { len as i64 + raw } else { raw - 1 };
    if resolved < 0 || resolved as usize >= len {
        Err(IoError::invalid_content(format!(
            "index {s} out of range for {len} elements"
        )))
    } else {
        Ok(resolved as usize)
    }
}

/// Write a mesh as a colored ASCII OBJ.
///
/// Each vertex line carries its deviation color inline
/// (`v x y z r g b`, components as floats in `[0, 1]`); faces are written
/// 1-based. Deviations are expected to be normalized (roughly `[0, 1]`)
/// and are clamped before the palette lookup.
///
/// # Errors
///
/// Returns an error if the deviation count does not match the mesh's
/// vertex count (nothing is written in that case) or if the file cannot
/// be created.
pub fn save_colored_obj<P: AsRef<Path>>(
    mesh: &TriMesh,
    deviations: &[f32],
    segments: u32,
    palette: &Palette,
    path: P,
) -> IoResult<()> {
    check_deviation_count(mesh, deviations)?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for (vertex, &d) in mesh.vertices.iter().zip(deviations) {
        let [r, g, b] = deviation_to_color(d.clamp(0.0, 1.0), segments, palette);
        let p = vertex.position;
        writeln!(
            writer,
            "v {:.6} {:.6} {:.6} {:.6} {:.6} {:.6}",
            p.x, p.y, p.z, r, g, b
        )?;
    }

    for &[i0, i1, i2] in &mesh.faces {
        writeln!(writer, "f {} {} {}", i0 + 1, i1 + 1, i2 + 1)?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use gauge_types::{unit_cube, MeshTopology};
    use std::io::Write as _;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".obj")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_simple_triangle() {
        let file = write_temp("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        let mesh = load_obj(file.path()).unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.faces[0], [0, 1, 2]);
    }

    #[test]
    fn load_vertex_colors() {
        let file = write_temp("v 0 0 0 1 0 0\nv 1 0 0 0 1 0\nv 0 1 0 0 0 1\nf 1 2 3\n");
        let mesh = load_obj(file.path()).unwrap();

        assert_eq!(mesh.vertices[0].color, Some(VertexColor::new(255, 0, 0)));
        assert_eq!(mesh.vertices[2].color, Some(VertexColor::new(0, 0, 255)));
    }

    #[test]
    fn load_face_with_normals_and_texcoords() {
        let file = write_temp(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nvn 0 0 1\nf 1/1/1 2/2/1 3/3/1\n",
        );
        let mesh = load_obj(file.path()).unwrap();

        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.vertices[1].uv, Some((1.0, 0.0)));
        let n = mesh.vertices[0].normal;
        assert!(n.is_some());
        if let Some(n) = n {
            assert!((n.z - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn negative_indices_resolve_from_end() {
        let file = write_temp("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n");
        let mesh = load_obj(file.path()).unwrap();
        assert_eq!(mesh.faces[0], [0, 1, 2]);
    }

    #[test]
    fn quad_face_is_rejected() {
        let file = write_temp("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n");
        let err = load_obj(file.path());
        assert!(matches!(
            err,
            Err(IoError::NonTriangularFace {
                face_index: 0,
                vertex_count: 4
            })
        ));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let file = write_temp("v 0 0 0\nv 1 0 0\nf 1 2 5\n");
        assert!(load_obj(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_obj("/definitely/not/here.obj");
        assert!(matches!(err, Err(IoError::FileNotFound { .. })));
    }

    #[test]
    fn colored_obj_round_trip() {
        let cube = unit_cube();
        let deviations = vec![0.0; 8];
        let palette = Palette::classic();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.obj");
        save_colored_obj(&cube, &deviations, 4, &palette, &path).unwrap();

        let loaded = load_obj(&path).unwrap();
        assert_eq!(loaded.vertex_count(), 8);
        assert_eq!(loaded.face_count(), 12);
        // Zero deviation paints the first palette entry (blue)
        assert_eq!(loaded.vertices[0].color, Some(VertexColor::new(0, 0, 255)));
    }

    #[test]
    fn colored_obj_count_mismatch_aborts() {
        let cube = unit_cube();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.obj");

        let err = save_colored_obj(&cube, &[0.0; 3], 4, &Palette::classic(), &path);
        assert!(matches!(err, Err(IoError::Deviation(_))));
        assert!(!path.exists(), "no partial output on mismatch");
    }
}
