//! Summary statistics over a deviation result.

use std::fmt;

/// Aggregate statistics for a deviation array.
///
/// NaN sentinel entries (degenerate queries) are excluded from the
/// statistics and counted separately.
///
/// # Example
///
/// ```
/// use gauge_deviation::DeviationSummary;
///
/// let summary = DeviationSummary::from_deviations(&[0.0, 0.5, 1.0]);
/// assert_eq!(summary.count, 3);
/// assert!((summary.max - 1.0).abs() < 1e-6);
/// assert!((summary.mean - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeviationSummary {
    /// Number of finite deviation values.
    pub count: usize,
    /// Number of NaN sentinel entries.
    pub invalid: usize,
    /// Smallest deviation.
    pub min: f32,
    /// Largest deviation.
    pub max: f32,
    /// Arithmetic mean.
    pub mean: f32,
}

impl DeviationSummary {
    /// Compute statistics over a deviation slice.
    ///
    /// An empty slice (or one that is all sentinels) yields a summary with
    /// `count == 0` and zeroed statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_deviations(deviations: &[f32]) -> Self {
        let mut count = 0usize;
        let mut invalid = 0usize;
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;

        for &d in deviations {
            if d.is_nan() {
                invalid += 1;
                continue;
            }
            count += 1;
            min = min.min(d);
            max = max.max(d);
            sum += f64::from(d);
        }

        if count == 0 {
            return Self {
                invalid,
                ..Self::default()
            };
        }

        Self {
            count,
            invalid,
            min,
            max,
            mean: (sum / count as f64) as f32,
        }
    }
}

impl fmt::Display for DeviationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deviation summary:")?;
        writeln!(f, "  Vertices: {}", self.count)?;
        if self.invalid > 0 {
            writeln!(f, "  Invalid (no query result): {}", self.invalid)?;
        }
        writeln!(f, "  Min: {:.6}", self.min)?;
        writeln!(f, "  Max: {:.6}", self.max)?;
        writeln!(f, "  Mean: {:.6}", self.mean)?;
        Ok(())
    }
}
