//! Per-vertex geometric deviation between two triangle meshes.
//!
//! For every vertex of a *target* mesh, finds the closest point on a
//! *source* mesh's surface and reports the Euclidean distance. This is the
//! computational core of a mesh-inspection workflow: comparing a scan
//! against a reference, or two scans against each other.
//!
//! # Backends
//!
//! Two interchangeable engines implement the same [`DeviationCompute`]
//! contract:
//!
//! - [`SequentialDeviation`] - single-threaded, one query after another
//! - [`ParallelDeviation`] - the same per-vertex kernel fanned out across
//!   all cores with rayon
//!
//! Both build the same spatial index and run the same per-query algorithm,
//! so for the same input meshes their results match element-wise within
//! floating-point tolerance. [`Backend`] plus [`new_engine`] select one at
//! run time.
//!
//! # Example
//!
//! ```
//! use gauge_types::unit_cube;
//! use gauge_deviation::{DeviationCompute, SequentialDeviation};
//!
//! // A mesh deviates from itself by zero everywhere.
//! let cube = unit_cube();
//! let mut engine = SequentialDeviation::new(cube.clone(), cube);
//! engine.compute_deviation();
//!
//! assert!(engine.deviations().iter().all(|&d| d < 1e-6));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod engine;
mod error;
mod scale;
mod summary;

pub use engine::{new_engine, Backend, DeviationCompute, ParallelDeviation, SequentialDeviation};
pub use error::{check_deviation_count, DeviationError, DeviationResult};
pub use scale::{median_edge_length, normalize_deviations};
pub use summary::DeviationSummary;
