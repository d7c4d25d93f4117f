//! Spatial acceleration for closest-point queries over triangle soups.
//!
//! This crate provides the two pieces the deviation engines share:
//!
//! - [`Bvh`] - a bounding volume hierarchy over triangle bounding boxes,
//!   built once per source mesh and read-only afterwards
//! - [`closest_point_on_triangle`] - exact point-to-triangle projection
//!
//! # Query model
//!
//! [`Bvh::closest`] returns the exact minimum squared distance from a query
//! point to any triangle in the indexed set, never a sampled or approximate
//! answer. Traversal prunes subtrees whose box cannot beat the current best
//! and descends the nearer child first, which is an optimization only: the
//! numeric result is identical to brute force over all triangles.
//!
//! # Example
//!
//! ```
//! use gauge_types::{unit_cube, MeshTopology, Point3, Triangle};
//! use gauge_spatial::Bvh;
//!
//! let cube = unit_cube();
//! let triangles: Vec<Triangle> = cube.triangles().collect();
//! let bvh = Bvh::build(&triangles);
//!
//! // A point 0.5 above the top face
//! let hit = bvh.closest(&triangles, Point3::new(0.5, 0.5, 1.5)).unwrap();
//! assert!((hit.distance_squared.sqrt() - 0.5).abs() < 1e-5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bvh;
mod query;

pub use bvh::{Bvh, BvhStats, ClosestHit};
pub use query::closest_point_on_triangle;
