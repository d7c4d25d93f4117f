//! Color palettes sampled from perceptual ramps.

// Palette indices stay well inside usize; ramp sampling needs the casts.
#![allow(clippy::cast_precision_loss)]

/// An ordered sequence of RGB triples sampled across a color gradient.
///
/// A palette always holds at least one entry; constructors enforce this.
/// Components are linear floats in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<[f32; 3]>,
}

impl Palette {
    /// Create a palette from explicit colors.
    ///
    /// Returns `None` for an empty list (a palette must have at least one
    /// entry to be usable as a lookup table).
    #[must_use]
    pub fn custom(colors: Vec<[f32; 3]>) -> Option<Self> {
        if colors.is_empty() {
            None
        } else {
            Some(Self { colors })
        }
    }

    /// The legacy five-color ramp: blue, cyan, green, yellow, red.
    ///
    /// This is the default inspection ramp; deviations near zero map to
    /// blue and deviations at or above the scale map to red.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            colors: vec![
                [0.0, 0.0, 1.0],
                [0.0, 1.0, 1.0],
                [0.0, 1.0, 0.0],
                [1.0, 1.0, 0.0],
                [1.0, 0.0, 0.0],
            ],
        }
    }

    /// Number of color samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// A palette is never empty; this exists for the conventional pairing
    /// with [`Palette::len`] and always returns `false`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Color at `index`, clamped into range.
    #[must_use]
    pub fn get_clamped(&self, index: usize) -> [f32; 3] {
        self.colors[index.min(self.colors.len() - 1)]
    }

    /// First color of the ramp.
    #[must_use]
    pub fn first(&self) -> [f32; 3] {
        self.colors[0]
    }

    /// Last color of the ramp.
    #[must_use]
    pub fn last(&self) -> [f32; 3] {
        self.colors[self.colors.len() - 1]
    }

    /// All samples in order.
    #[must_use]
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::classic()
    }
}

/// Named perceptual color ramps.
///
/// Each ramp is a pure generator producing `n` colors monotonically sampled
/// over `[0, 1]` from a closed-form polynomial or piecewise formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ramp {
    /// Legacy blue-cyan-green-yellow-red five-color ramp.
    Classic,
    /// Polynomial fit of Google's Turbo ramp (no blacks/whites at the ends).
    Turbo,
    /// Viridis-style dark-to-light ramp.
    Viridis,
    /// Black-red-yellow-white heat ramp.
    Hot,
    /// Cyan-to-magenta ramp.
    Cool,
    /// Linear grayscale.
    Gray,
    /// Classic blue-to-red jet ramp.
    Jet,
    /// Inferno-style dark-to-bright ramp.
    Inferno,
}

impl Ramp {
    /// Generate a palette of `n` samples.
    ///
    /// `n` is floored at 2 so interpolation always has two distinct ends,
    /// except for [`Ramp::Classic`] (fixed at 5 samples) and [`Ramp::Jet`],
    /// whose piecewise formula divides by `n` rather than `n - 1` and
    /// accepts any `n >= 1`.
    #[must_use]
    pub fn palette(self, n: usize) -> Palette {
        let colors = match self {
            Self::Classic => return Palette::classic(),
            Self::Turbo => turbo(n),
            Self::Viridis => viridis(n),
            Self::Hot => hot(n),
            Self::Cool => cool(n),
            Self::Gray => gray(n),
            Self::Jet => jet(n),
            Self::Inferno => inferno(n),
        };
        Palette { colors }
    }
}

fn jet(n: usize) -> Vec<[f32; 3]> {
    let n = n.max(1);
    (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            [
                (1.5 - (4.0 * (t - 0.75)).abs()).clamp(0.0, 1.0),
                (1.5 - (4.0 * (t - 0.5)).abs()).clamp(0.0, 1.0),
                (1.5 - (4.0 * (t - 0.25)).abs()).clamp(0.0, 1.0),
            ]
        })
        .collect()
}

fn hot(n: usize) -> Vec<[f32; 3]> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let t = i as f32 / (n - 1) as f32;
            [
                (3.0 * t).clamp(0.0, 1.0),
                (3.0f32).mul_add(t, -1.0).clamp(0.0, 1.0),
                (3.0f32).mul_add(t, -2.0).clamp(0.0, 1.0),
            ]
        })
        .collect()
}

fn cool(n: usize) -> Vec<[f32; 3]> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let t = i as f32 / (n - 1) as f32;
            [t, 1.0 - t, 1.0]
        })
        .collect()
}

fn gray(n: usize) -> Vec<[f32; 3]> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let v = i as f32 / (n - 1) as f32;
            [v, v, v]
        })
        .collect()
}

fn turbo(n: usize) -> Vec<[f32; 3]> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let t = i as f32 / (n - 1) as f32;
            let t2 = t * t;
            let t3 = t2 * t;
            let t4 = t3 * t;
            let t5 = t4 * t;
            // 5th-order polynomial fit of Google Turbo
            let r = 0.1357 + 4.6154 * t - 42.6603 * t2 + 132.1311 * t3 - 152.9424 * t4
                + 59.2864 * t5;
            let g = 0.0917 + 2.1946 * t + 4.8429 * t2 - 14.1850 * t3 + 4.2773 * t4 + 2.8295 * t5;
            let b = 0.1067 + 12.6419 * t - 60.5821 * t2 + 145.9810 * t3 - 131.2412 * t4
                + 41.5549 * t5;
            [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)]
        })
        .collect()
}

fn viridis(n: usize) -> Vec<[f32; 3]> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let t = i as f32 / (n - 1) as f32;
            let t2 = t * t;
            let t3 = t2 * t;
            let r = 0.280_268 + 0.165_56 * t + 0.476_484 * t2 - 0.813_533 * t3;
            let g = 0.165_56 + 0.476_484 * t + 0.813_533 * t2 - 0.280_268 * t3;
            let b = 0.476_484 + 0.813_533 * t + 0.280_268 * t2 - 0.165_56 * t3;
            [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)]
        })
        .collect()
}

fn inferno(n: usize) -> Vec<[f32; 3]> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let t = i as f32 / (n - 1) as f32;
            let t2 = t * t;
            let t3 = t2 * t;
            let t4 = t3 * t;
            let r = 0.000_218 + 0.106_513 * t + 2.224_347 * t2 - 5.077_576 * t3 + 4.493_337 * t4;
            let g = 0.000_217 + 0.106_514 * t + 2.224_348 * t2 - 5.077_577 * t3 + 4.493_338 * t4;
            let b = 0.000_215 + 0.106_515 * t + 2.224_349 * t2 - 5.077_578 * t3 + 4.493_339 * t4;
            [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)]
        })
        .collect()
}
