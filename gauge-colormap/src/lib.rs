//! Color ramps and deviation-to-color quantization.
//!
//! Turns a normalized deviation (roughly `[0, 1]` after dividing by the
//! normalization scale) into an RGB color for inspection output:
//!
//! - [`Palette`] - an ordered color ramp sampled over `[0, 1]`
//! - [`Ramp`] - the named perceptual ramp generators (turbo, viridis, ...)
//! - [`deviation_to_color`] - quantized lookup with interpolation
//! - [`colorize`] - bulk conversion of a deviation slice to vertex colors
//!
//! # Quantization model
//!
//! The quantization resolution (`segments`) is decoupled from the palette's
//! sample resolution: callers can request coarse visible banding while still
//! sourcing colors from a smooth 256-entry ramp. The input is rounded to the
//! nearest of `segments` equally spaced levels *before* the two neighboring
//! palette samples are interpolated; this banding behavior is part of the
//! output contract and is kept exactly as-is.
//!
//! # Example
//!
//! ```
//! use gauge_colormap::{deviation_to_color, Ramp};
//!
//! let palette = Ramp::Turbo.palette(256);
//! let low = deviation_to_color(0.0, 4, &palette);
//! let high = deviation_to_color(1.0, 4, &palette);
//! assert_ne!(low, high);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod palette;
mod quantize;

pub use palette::{Palette, Ramp};
pub use quantize::{colorize, deviation_to_color};
