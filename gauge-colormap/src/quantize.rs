//! Deviation-to-color quantization.

// Quantization math converts between float levels and palette indices.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use gauge_types::VertexColor;

use crate::palette::Palette;

/// Map a normalized deviation to an RGB color.
///
/// The input is quantized to the nearest of `segments` equally spaced levels
/// in `[0, 1]`, the quantized level is mapped onto palette index space, and
/// the two neighboring palette samples are linearly interpolated. Rounding
/// happens *before* the palette lookup, so the visible output is banded at
/// `segments` resolution even when the palette itself is smooth.
///
/// Inputs below zero signal "below range" and return the palette's first
/// entry unchanged. Inputs above one are clamped.
///
/// # Arguments
///
/// * `nd` - Normalized deviation (deviation divided by the scale factor)
/// * `segments` - Number of quantization levels, at least 1
/// * `palette` - The color ramp to sample
///
/// # Example
///
/// ```
/// use gauge_colormap::{deviation_to_color, Palette};
///
/// let palette = Palette::classic();
/// assert_eq!(deviation_to_color(0.0, 4, &palette), [0.0, 0.0, 1.0]);
/// assert_eq!(deviation_to_color(1.0, 4, &palette), [1.0, 0.0, 0.0]);
/// assert_eq!(deviation_to_color(-0.5, 4, &palette), [0.0, 0.0, 1.0]);
/// ```
#[must_use]
pub fn deviation_to_color(nd: f32, segments: u32, palette: &Palette) -> [f32; 3] {
    if nd < 0.0 {
        return palette.first();
    }

    let nd = nd.clamp(0.0, 1.0);

    // Need at least two colors to interpolate; otherwise return the sole entry.
    if palette.len() == 1 {
        return palette.first();
    }

    let segments = segments.max(1);
    let seg_count = segments as f32;

    // Quantize to the requested number of segments. Rounding may overshoot
    // 1.0 for inputs just under a level boundary, hence the re-clamp.
    let step = 1.0 / seg_count;
    let nd = ((nd / step).round() * step).clamp(0.0, 1.0);

    // Map the quantized level onto palette index space.
    let pos_seg = nd * seg_count;
    let seg_idx = (pos_seg as u32).min(segments - 1);
    let local_t = pos_seg - seg_idx as f32;

    let idx_from_seg = |seg: u32| -> usize {
        let ratio = seg as f32 / seg_count;
        let mi = (ratio * (palette.len() - 1) as f32).round() as usize;
        mi.min(palette.len() - 1)
    };

    let c0 = palette.get_clamped(idx_from_seg(seg_idx));
    let c1 = palette.get_clamped(idx_from_seg(seg_idx + 1));

    [
        (c1[0] - c0[0]).mul_add(local_t, c0[0]),
        (c1[1] - c0[1]).mul_add(local_t, c0[1]),
        (c1[2] - c0[2]).mul_add(local_t, c0[2]),
    ]
}

/// Convert a slice of normalized deviations to per-vertex colors.
///
/// Each deviation is clamped to `[0, 1]` before lookup, matching what the
/// colored writers do. The output is in the same order as the input.
#[must_use]
pub fn colorize(deviations: &[f32], segments: u32, palette: &Palette) -> Vec<VertexColor> {
    deviations
        .iter()
        .map(|&d| {
            let [r, g, b] = deviation_to_color(d.clamp(0.0, 1.0), segments, palette);
            VertexColor::from_float(r, g, b)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Ramp;

    /// Segment index the quantizer lands on, for monotonicity checks.
    fn quantized_segment(nd: f32, segments: u32) -> u32 {
        let step = 1.0 / segments as f32;
        let q = ((nd.clamp(0.0, 1.0) / step).round() * step).clamp(0.0, 1.0);
        ((q * segments as f32) as u32).min(segments - 1)
    }

    #[test]
    fn zero_maps_to_first_palette_index() {
        let palette = Palette::classic();
        assert_eq!(deviation_to_color(0.0, 4, &palette), palette.first());
    }

    #[test]
    fn one_maps_to_last_palette_index() {
        let palette = Palette::classic();
        // nd=1 quantizes to the top level; seg_idx clamps to segments-1 with
        // local_t=1, so the interpolation lands exactly on the last entry.
        assert_eq!(deviation_to_color(1.0, 4, &palette), palette.last());

        let turbo = Ramp::Turbo.palette(256);
        assert_eq!(deviation_to_color(1.0, 8, &turbo), turbo.last());
    }

    #[test]
    fn negative_returns_first_entry() {
        let palette = Ramp::Turbo.palette(64);
        assert_eq!(deviation_to_color(-0.5, 4, &palette), palette.first());
        assert_eq!(deviation_to_color(-1e-6, 4, &palette), palette.first());
    }

    #[test]
    fn above_one_clamps() {
        let palette = Palette::classic();
        assert_eq!(
            deviation_to_color(5.0, 4, &palette),
            deviation_to_color(1.0, 4, &palette)
        );
    }

    #[test]
    fn single_entry_palette_is_constant() {
        let palette = Palette::custom(vec![[0.25, 0.5, 0.75]]);
        assert!(palette.is_some());
        if let Some(palette) = palette {
            for nd in [-1.0, 0.0, 0.3, 0.9, 1.0, 2.0] {
                assert_eq!(deviation_to_color(nd, 4, &palette), [0.25, 0.5, 0.75]);
            }
        }
    }

    #[test]
    fn quantization_bands_are_flat() {
        let palette = Ramp::Viridis.palette(256);
        // Inputs that round to the same level must produce the same color.
        let a = deviation_to_color(0.26, 4, &palette);
        let b = deviation_to_color(0.24, 4, &palette);
        assert_eq!(a, b);
    }

    #[test]
    fn segment_index_is_monotonic() {
        for segments in [1, 2, 4, 7, 16] {
            let mut prev = 0;
            for i in 0..=1000 {
                let nd = i as f32 / 1000.0;
                let seg = quantized_segment(nd, segments);
                assert!(seg >= prev, "segments={segments}, nd={nd}, seg={seg}, prev={prev}");
                prev = seg;
            }
        }
    }

    #[test]
    fn one_segment_still_works() {
        let palette = Palette::classic();
        let low = deviation_to_color(0.0, 1, &palette);
        let high = deviation_to_color(1.0, 1, &palette);
        assert_eq!(low, palette.first());
        assert_eq!(high, palette.last());
    }

    #[test]
    fn colorize_preserves_order_and_length() {
        let palette = Palette::classic();
        let colors = colorize(&[0.0, 0.5, 1.0], 4, &palette);
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0], gauge_types::VertexColor::new(0, 0, 255));
        assert_eq!(colors[2], gauge_types::VertexColor::new(255, 0, 0));
    }
}
