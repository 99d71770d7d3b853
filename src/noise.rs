//! # Photometric noise models
//!
//! Maps apparent magnitude to a one-hour-equivalent photometric noise level in ppm. Two
//! strategies are provided, selected by name in the survey configuration:
//!
//! - [`NoiseModelKind::TessPhotometric`]: three noise sources (stellar shot noise, zodiacal
//!   background, read noise), each a straight-line fit in (magnitude, log10 noise) space
//!   through three calibration points, combined in quadrature with a constant systematic
//!   floor.
//! - [`NoiseModelKind::KeplerQuiet1h`]: piecewise-linear interpolation over an empirical
//!   magnitude to 6-hour CDPP table for photometrically quiet stars, rescaled to one hour.
//!
//! Fits and tables are materialized once when the model is built; evaluation is pure.

use std::fmt;
use std::str::FromStr;

use crate::constants::Ppm;
use crate::yieldsim_errors::YieldSimError;

/// Constant systematic noise floor of the three-source model, in ppm per hour.
const SYSTEMATIC_FLOOR_PPM: f64 = 59.785;

/// (magnitude, noise ppm) calibration points of the stellar shot-noise source.
const STAR_CALIBRATION: [(f64, f64); 3] = [
    (4.3885191347753745, 12.090570910640581),
    (12.023294509151416, 467.96434635620614),
    (17.753743760399338, 7779.603209291808),
];

/// (magnitude, noise ppm) calibration points of the zodiacal-background source.
const ZODI_CALIBRATION: [(f64, f64); 3] = [
    (8.686356073211314, 18.112513551189224),
    (13.08901830282862, 688.2812796087189),
    (16.68801996672213, 19493.670323892282),
];

/// (magnitude, noise ppm) calibration points of the read-noise source.
const READ_CALIBRATION: [(f64, f64); 3] = [
    (8.476705490848586, 12.31474807751376),
    (13.019134775374376, 522.4985702369348),
    (17.841098169717142, 46226.777232915076),
];

/// Empirical 6-hour CDPP of quiet stars against apparent magnitude, in ppm.
const QUIET_CDPP_6H: [(f64, f64); 12] = [
    (6.0, 7.8),
    (7.0, 9.2),
    (8.0, 11.6),
    (9.0, 15.0),
    (10.0, 20.4),
    (11.0, 29.6),
    (12.0, 45.3),
    (13.0, 75.2),
    (14.0, 138.0),
    (15.0, 270.0),
    (16.0, 553.0),
    (17.0, 1190.0),
];

/// Noise-model selector, configured by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseModelKind {
    /// Three-source quadrature model with a systematic floor.
    TessPhotometric,
    /// Quiet-star CDPP interpolation table, one-hour equivalent.
    KeplerQuiet1h,
}

impl FromStr for NoiseModelKind {
    type Err = YieldSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tess-photometric" => Ok(NoiseModelKind::TessPhotometric),
            "kepler-quiet-1h" => Ok(NoiseModelKind::KeplerQuiet1h),
            other => Err(YieldSimError::InvalidNoiseModel(other.to_string())),
        }
    }
}

impl fmt::Display for NoiseModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoiseModelKind::TessPhotometric => write!(f, "tess-photometric"),
            NoiseModelKind::KeplerQuiet1h => write!(f, "kepler-quiet-1h"),
        }
    }
}

/// Straight-line least-squares fit of log10(noise) against magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LogLinearFit {
    slope: f64,
    intercept: f64,
}

impl LogLinearFit {
    /// Ordinary least squares through the calibration points, in (mag, log10 ppm) space.
    fn from_points(points: &[(f64, f64)]) -> Self {
        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p.1.log10()).sum::<f64>() / n;
        let sxy = points
            .iter()
            .map(|p| (p.0 - mean_x) * (p.1.log10() - mean_y))
            .sum::<f64>();
        let sxx = points.iter().map(|p| (p.0 - mean_x) * (p.0 - mean_x)).sum::<f64>();
        let slope = sxy / sxx;
        LogLinearFit {
            slope,
            intercept: mean_y - slope * mean_x,
        }
    }

    fn eval(&self, mag: f64) -> f64 {
        10f64.powf(self.slope * mag + self.intercept)
    }
}

/// Built three-source photometric model.
#[derive(Debug, Clone, PartialEq)]
pub struct TessPhotometricNoise {
    star: LogLinearFit,
    zodi: LogLinearFit,
    read: LogLinearFit,
    zodi_mod: f64,
    read_mod: f64,
}

impl TessPhotometricNoise {
    /// Build with unit per-source modifiers.
    pub fn new() -> Self {
        Self::with_modifiers(1.0, 1.0)
    }

    /// Build with explicit multiplicative modifiers on the zodiacal and read sources.
    /// Each modifier scales its own source before the quadrature sum.
    pub fn with_modifiers(zodi_mod: f64, read_mod: f64) -> Self {
        TessPhotometricNoise {
            star: LogLinearFit::from_points(&STAR_CALIBRATION),
            zodi: LogLinearFit::from_points(&ZODI_CALIBRATION),
            read: LogLinearFit::from_points(&READ_CALIBRATION),
            zodi_mod,
            read_mod,
        }
    }

    /// One-hour-equivalent noise in ppm at the given magnitude.
    pub fn per_hour(&self, mag: f64) -> Ppm {
        let star = self.star.eval(mag);
        let zodi = self.zodi_mod * self.zodi.eval(mag);
        let read = self.read_mod * self.read.eval(mag);
        (star * star + zodi * zodi + read * read + SYSTEMATIC_FLOOR_PPM * SYSTEMATIC_FLOOR_PPM)
            .sqrt()
    }
}

impl Default for TessPhotometricNoise {
    fn default() -> Self {
        Self::new()
    }
}

/// Built quiet-star CDPP table, already scaled to a one-hour equivalent.
#[derive(Debug, Clone, PartialEq)]
pub struct QuietCdppTable {
    mags: Vec<f64>,
    noise: Vec<f64>,
}

impl QuietCdppTable {
    /// Scale the 6-hour calibration to one hour: white noise grows as sqrt(6) when the
    /// averaging window shrinks from six hours to one.
    pub fn new() -> Self {
        let mags = QUIET_CDPP_6H.iter().map(|p| p.0).collect();
        let noise = QUIET_CDPP_6H.iter().map(|p| p.1 * 6f64.sqrt()).collect();
        QuietCdppTable { mags, noise }
    }

    /// One-hour-equivalent noise in ppm at the given magnitude. Magnitudes beyond either
    /// end of the table extrapolate along the terminal segment.
    pub fn per_hour(&self, mag: f64) -> Ppm {
        interp_extrapolate(mag, &self.mags, &self.noise)
    }
}

impl Default for QuietCdppTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Piecewise-linear interpolation with linear extrapolation on both ends.
/// `xs` must be strictly increasing with at least two nodes.
fn interp_extrapolate(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len();
    let i = if x <= xs[0] {
        0
    } else if x >= xs[n - 2] {
        n - 2
    } else {
        xs.partition_point(|&v| v <= x) - 1
    };
    let t = (x - xs[i]) / (xs[i + 1] - xs[i]);
    ys[i] + t * (ys[i + 1] - ys[i])
}

/// A built noise model, ready for per-star evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum NoiseModel {
    TessPhotometric(TessPhotometricNoise),
    KeplerQuiet1h(QuietCdppTable),
}

impl NoiseModel {
    /// Materialize the model selected by `kind`.
    pub fn from_kind(kind: NoiseModelKind) -> Self {
        match kind {
            NoiseModelKind::TessPhotometric => {
                NoiseModel::TessPhotometric(TessPhotometricNoise::new())
            }
            NoiseModelKind::KeplerQuiet1h => NoiseModel::KeplerQuiet1h(QuietCdppTable::new()),
        }
    }

    /// One-hour-equivalent noise in ppm at the given magnitude.
    pub fn per_hour(&self, mag: f64) -> Ppm {
        match self {
            NoiseModel::TessPhotometric(m) => m.per_hour(mag),
            NoiseModel::KeplerQuiet1h(m) => m.per_hour(mag),
        }
    }
}
