//! Core mesh types for meshgauge.
//!
//! This crate provides the foundational types for mesh inspection:
//!
//! - [`Vertex`] - A point in 3D space with optional attributes
//! - [`TriMesh`] - A triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Precision
//!
//! All coordinates are `f32`. Deviation gauging compares scan data that is
//! produced and stored in single precision; the whole pipeline stays in
//! `f32` so the two execution backends can be compared bit-for-bit-close.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**. Face winding is
//! **counter-clockwise (CCW) when viewed from outside**; normals point
//! outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use gauge_types::{Vertex, TriMesh, Point3, MeshTopology};
//!
//! // Create a simple triangle mesh
//! let mut mesh = TriMesh::new();
//! mesh.vertices.push(Vertex::new(Point3::new(0.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(1.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(0.5, 1.0, 0.0)));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(!mesh.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod mesh;
mod traits;
mod triangle;
mod vertex;

// Re-export core types
pub use bounds::Aabb;
pub use mesh::{unit_cube, TriMesh};
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;
pub use vertex::{Vertex, VertexColor};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
