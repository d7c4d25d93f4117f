//! Mesh file I/O for meshgauge.
//!
//! This crate provides the loading and writing collaborators around the
//! deviation core:
//!
//! - **OBJ** (Wavefront) - ASCII, with optional inline vertex colors
//! - **PLY** (Polygon File Format) - ASCII and binary variants
//!
//! Both loaders accept triangle faces only: a face with any other vertex
//! count is a hard load-time failure, surfaced before the deviation core
//! ever runs.
//!
//! The writers combine a mesh with its (normalized) deviation array and a
//! color palette, producing a colored binary PLY or a colored ASCII OBJ
//! for visual inspection.
//!
//! # Example
//!
//! ```no_run
//! use gauge_io::{load_mesh, save_colored_ply};
//! use gauge_colormap::Palette;
//!
//! let mesh = load_mesh("scan.ply").unwrap();
//! let deviations = vec![0.0; mesh.vertices.len()];
//! save_colored_ply(&mesh, &deviations, 4, &Palette::classic(), "out.ply").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod obj;
mod ply;

pub use error::{IoError, IoResult};
pub use obj::{load_obj, save_colored_obj};
pub use ply::{load_ply, save_colored_ply};

use std::path::Path;

use gauge_types::TriMesh;

/// Load a mesh, detecting the format from the file extension.
///
/// # Errors
///
/// Returns [`IoError::UnknownFormat`] for extensions other than `obj` and
/// `ply`, plus whatever the format loader itself reports.
///
/// # Example
///
/// ```no_run
/// use gauge_io::load_mesh;
///
/// let mesh = load_mesh("model.obj").unwrap();
/// println!("loaded {} vertices", mesh.vertices.len());
/// ```
pub fn load_mesh<P: AsRef<Path>>(path: P) -> IoResult<TriMesh> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "obj" => load_obj(path),
        "ply" => load_ply(path),
        _ => Err(IoError::UnknownFormat { extension }),
    }
}
