//! PLY (Polygon File Format) support.
//!
//! The loader handles ASCII, binary little-endian, and binary big-endian
//! variants and picks up `uchar` vertex colors when present. Faces must be
//! triangles.
//!
//! The colored writer emits the exact layout the inspection workflow has
//! always produced: binary little-endian, `float x/y/z`,
//! `uchar red/green/blue`, and `uchar`-counted `int` face index lists.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use gauge_colormap::{colorize, Palette};
use gauge_deviation::check_deviation_count;
use gauge_types::{TriMesh, Vertex, VertexColor};
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use crate::error::{IoError, IoResult};

/// Load a mesh from a PLY file.
///
/// Supports ASCII, binary little-endian, and binary big-endian formats.
/// Vertex positions are required; `uchar` red/green/blue properties are
/// picked up as vertex colors when present.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file is not valid PLY
/// - Any face is not a triangle ([`IoError::NonTriangularFace`])
/// - A face indexes a vertex that does not exist
pub fn load_ply<P: AsRef<Path>>(path: P) -> IoResult<TriMesh> {
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
    let mut reader = BufReader::new(file);

    // Generic DefaultElement parser works for all element layouts.
    let parser = Parser::<DefaultElement>::new();

    let header = parser
        .read_header(&mut reader)
        .map_err(|e| IoError::invalid_content(format!("failed to parse PLY header: {e}")))?;

    let payload = parser
        .read_payload(&mut reader, &header)
        .map_err(|e| IoError::invalid_content(format!("failed to read PLY payload: {e}")))?;

    let mut mesh = TriMesh::new();

    if let Some(vertex_elements) = payload.get("vertex") {
        mesh.vertices.reserve(vertex_elements.len());
        for element in vertex_elements {
            let x = get_float_property(element, "x").unwrap_or(0.0);
            let y = get_float_property(element, "y").unwrap_or(0.0);
            let z = get_float_property(element, "z").unwrap_or(0.0);

            let mut vertex = Vertex::from_coords(x, y, z);
            if let (Some(r), Some(g), Some(b)) = (
                get_uchar_property(element, "red"),
                get_uchar_property(element, "green"),
                get_uchar_property(element, "blue"),
            ) {
                vertex.color = Some(VertexColor::new(r, g, b));
            }
            mesh.vertices.push(vertex);
        }
    }

    if let Some(face_elements) = payload.get("face") {
        mesh.faces.reserve(face_elements.len());
        for (face_index, element) in face_elements.iter().enumerate() {
            let indices = get_index_list(element);
            if indices.len() != 3 {
                return Err(IoError::NonTriangularFace {
                    face_index,
                    vertex_count: indices.len(),
                });
            }
            #[allow(clippy::cast_possible_truncation)]
            mesh.faces
                .push([indices[0] as u32, indices[1] as u32, indices[2] as u32]);
        }
    }

    if !mesh.validate() {
        return Err(IoError::invalid_content(
            "face index out of range".to_string(),
        ));
    }

    Ok(mesh)
}

/// Extract a float property from a PLY element.
fn get_float_property(element: &DefaultElement, key: &str) -> Option<f32> {
    match element.get(key)? {
        Property::Float(v) => Some(*v),
        Property::Double(v) =>
        {
            #[allow(clippy::cast_possible_truncation)]
            Some(*v as f32)
        }
        _ => None,
    }
}

/// Extract a uchar property from a PLY element.
fn get_uchar_property(element: &DefaultElement, key: &str) -> Option<u8> {
    match element.get(key)? {
        Property::UChar(v) => Some(*v),
        _ => None,
    }
}

/// Extract the vertex index list from a face element.
#[allow(clippy::cast_sign_loss)]
fn get_index_list(element: &DefaultElement) -> Vec<usize> {
    // Try the common property names for face indices
    for key in &["vertex_indices", "vertex_index"] {
        if let Some(prop) = element.get(*key) {
            return match prop {
                Property::ListInt(v) => v.iter().map(|&i| i as usize).collect(),
                Property::ListUInt(v) => v.iter().map(|&i| i as usize).collect(),
                Property::ListUChar(v) => v.iter().map(|&i| usize::from(i)).collect(),
                Property::ListChar(v) => v.iter().map(|&i| i as usize).collect(),
                Property::ListShort(v) => v.iter().map(|&i| i as usize).collect(),
                Property::ListUShort(v) => v.iter().map(|&i| usize::from(i)).collect(),
                _ => continue,
            };
        }
    }
    Vec::new()
}

/// Write a mesh as a colored binary little-endian PLY.
///
/// Deviations are expected to be normalized (roughly `[0, 1]`); each is
/// clamped, quantized through the palette, and written as `uchar` RGB next
/// to its vertex. Faces are written as `uchar`-counted `int` lists, always
/// of length 3.
///
/// The binary body is written by hand rather than through ply-rs, whose
/// binary list writer emits the wrong count byte.
///
/// # Errors
///
/// Returns an error if the deviation count does not match the mesh's
/// vertex count (nothing is written in that case) or if the file cannot
/// be created.
pub fn save_colored_ply<P: AsRef<Path>>(
    mesh: &TriMesh,
    deviations: &[f32],
    segments: u32,
    palette: &Palette,
    path: P,
) -> IoResult<()> {
    check_deviation_count(mesh, deviations)?;

    let colors = colorize(deviations, segments, palette);

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "ply")?;
    writeln!(writer, "format binary_little_endian 1.0")?;
    writeln!(writer, "comment generated by meshgauge")?;
    writeln!(writer, "element vertex {}", mesh.vertices.len())?;
    writeln!(writer, "property float x")?;
    writeln!(writer, "property float y")?;
    writeln!(writer, "property float z")?;
    writeln!(writer, "property uchar red")?;
    writeln!(writer, "property uchar green")?;
    writeln!(writer, "property uchar blue")?;
    writeln!(writer, "element face {}", mesh.faces.len())?;
    writeln!(writer, "property list uchar int vertex_indices")?;
    writeln!(writer, "end_header")?;

    for (vertex, color) in mesh.vertices.iter().zip(&colors) {
        let p = vertex.position;
        writer.write_all(&p.x.to_le_bytes())?;
        writer.write_all(&p.y.to_le_bytes())?;
        writer.write_all(&p.z.to_le_bytes())?;
        writer.write_all(&[color.r, color.g, color.b])?;
    }

    #[allow(clippy::cast_possible_wrap)]
    for &[i0, i1, i2] in &mesh.faces {
        // List count: always 3 for triangles
        writer.write_all(&[3u8])?;
        writer.write_all(&(i0 as i32).to_le_bytes())?;
        writer.write_all(&(i1 as i32).to_le_bytes())?;
        writer.write_all(&(i2 as i32).to_le_bytes())?;
    }

    Ok(())
}
