//! # Planet occurrence calibrations
//!
//! This module provides tools to **draw planet radii and orbital periods** from
//! published occurrence-rate measurements. Each calibration is a table of
//! rectangular bins in the (radius, period) plane carrying an integer weight,
//! sampled with a weighted draw and then spread uniformly inside the winning
//! bin (giant-planet bins replace the uniform radius with a power-law tail).
//!
//! ## Public API
//!
//! ### [`crate::occurrence::Calibration`]
//! Enumeration of the supported FGK-dwarf calibrations:
//!
//! - `Calibration::Petigura18` – Petigura et al. (2018), CKS occurrence grid
//! - `Calibration::Fressin13` – Fressin et al. (2013), with long-period extrapolation
//! - `Calibration::Burke15` – SAG13 power-law grid, Burke & Christiansen (2015) normalization
//! - `Calibration::Bryson20` – SAG13 power-law grid, Bryson et al. (2020) normalization
//! - `Calibration::Luvoir` – SAG13 power-law grid, LUVOIR study normalization
//!
//! You can create a [`crate::occurrence::Calibration`] from a string with:
//!
//! ```rust
//! use yieldsim::occurrence::Calibration;
//! let calibration: Calibration = "petigura18".parse().unwrap();
//! ```
//!
//! M dwarfs always follow Dressing & Charbonneau (2015), available through
//! [`crate::occurrence::Calibration::m_dwarf_sampler`].
//!
//! ### [`crate::occurrence::BinSampler`]
//! The weighted sampler itself. Bins with zero weight are removed at
//! construction, so a zero-weight cell can never produce a planet no matter
//! how many draws are made.
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use yieldsim::occurrence::Calibration;
//!
//! let sampler = Calibration::Petigura18.fgk_sampler().unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//! let (radius, period) = sampler.sample(&mut rng);
//! assert!(radius > 0.0 && period > 0.0);
//! ```
//!
//! ## References
//!
//! - Dressing, C. D., & Charbonneau, D. (2015)
//! - Fressin, F., et al. (2013)
//! - Petigura, E. A., et al. (2018)
//! - Burke, C. J., & Christiansen, J. (2015, SAG13 submission)
//! - Bryson, S., et al. (2020)
mod dressing15;
mod fressin13;
pub mod grid;
mod petigura18;

use std::fmt;
use std::str::FromStr;

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

use crate::constants::{Days, EarthRadius, Kelvin};
use crate::yieldsim_errors::YieldSimError;

pub use grid::OccurrenceGrid;

/// Average number of planets per M dwarf, Dressing & Charbonneau (2015).
pub const M_DWARF_PLANET_RATE: f64 = 2.96;

/// Radius power-law slope shared by every giant-planet tail,
/// calibrated on the Fressin et al. (2013) giant bins.
pub const GIANT_TAIL_EXPONENT: f64 = -1.7;

/// A truncated power law in planet radius, `p(r) ∝ r^(exponent - 1)`
/// on `[lower, upper]`.
///
/// Giant-planet bins carry one of these instead of a uniform radius draw,
/// so that the largest planets stay rare inside their wide radius bins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawTail {
    pub lower: EarthRadius,
    pub upper: EarthRadius,
    pub exponent: f64,
}

impl PowerLawTail {
    /// Inverse CDF of the truncated power law.
    ///
    /// Arguments
    /// -----------------
    /// * `u`: a probability in `[0, 1]`.
    ///
    /// Return
    /// ----------
    /// * The radius whose CDF value is `u`, in Earth radii.
    pub(crate) fn quantile(&self, u: f64) -> EarthRadius {
        let ag = self.lower.powf(self.exponent);
        let bg = self.upper.powf(self.exponent);
        (ag + (bg - ag) * u).powf(self.exponent.recip())
    }

    /// Draw one radius from the tail.
    pub fn sample(&self, rng: &mut impl Rng) -> EarthRadius {
        self.quantile(rng.random::<f64>())
    }
}

/// One rectangular cell of an occurrence table.
///
/// The weight is an integer ticket count proportional to the published
/// occurrence rate for the cell. Cells with `radius_tail` set draw their
/// radius from the tail instead of uniformly in `[radius_lo, radius_hi)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateBin {
    pub radius_lo: EarthRadius,
    pub radius_hi: EarthRadius,
    pub period_lo: Days,
    pub period_hi: Days,
    pub weight: u32,
    pub radius_tail: Option<PowerLawTail>,
}

/// Weighted (radius, period) sampler over the selectable bins of a table.
///
/// Construction filters out zero-weight bins, so the sampler only ever picks
/// among cells the calibration actually populates.
#[derive(Debug, Clone)]
pub struct BinSampler {
    bins: Vec<RateBin>,
    picker: WeightedIndex<u32>,
}

impl BinSampler {
    /// Build a sampler from a full bin table.
    ///
    /// Arguments
    /// -----------------
    /// * `name`: table name used in error messages.
    /// * `bins`: the table, zero-weight cells included.
    ///
    /// Return
    /// ----------
    /// * A ready-to-use sampler, or an error if no bin is selectable or a
    ///   selectable bin has an empty extent.
    pub fn from_bins(name: &str, bins: Vec<RateBin>) -> Result<Self, YieldSimError> {
        let selectable: Vec<RateBin> = bins.into_iter().filter(|bin| bin.weight > 0).collect();
        if selectable.is_empty() {
            return Err(YieldSimError::EmptyOccurrenceTable(name.to_string()));
        }
        for (idx, bin) in selectable.iter().enumerate() {
            if !(bin.radius_hi > bin.radius_lo) || !(bin.period_hi > bin.period_lo) {
                return Err(YieldSimError::MalformedOccurrenceTable(format!(
                    "`{name}` selectable bin {idx} has an empty radius or period extent"
                )));
            }
        }
        let total: u64 = selectable.iter().map(|bin| u64::from(bin.weight)).sum();
        if total > u64::from(u32::MAX) {
            return Err(YieldSimError::MalformedOccurrenceTable(format!(
                "`{name}` total weight {total} overflows the weighted sampler"
            )));
        }
        let picker = WeightedIndex::new(selectable.iter().map(|bin| bin.weight))
            .map_err(|e| YieldSimError::MalformedOccurrenceTable(format!("`{name}`: {e}")))?;
        Ok(Self {
            bins: selectable,
            picker,
        })
    }

    /// Draw one (radius, period) pair.
    ///
    /// The bin is picked in proportion to its weight, the period uniformly
    /// inside the bin, and the radius uniformly inside the bin unless the bin
    /// carries a giant tail.
    pub fn sample(&self, rng: &mut impl Rng) -> (EarthRadius, Days) {
        let bin = &self.bins[self.picker.sample(rng)];
        let radius = match bin.radius_tail {
            Some(tail) => tail.sample(rng),
            None => rng.random_range(bin.radius_lo..bin.radius_hi),
        };
        let period = rng.random_range(bin.period_lo..bin.period_hi);
        (radius, period)
    }

    /// Draw `n` (radius, period) pairs.
    pub fn sample_many(&self, n: usize, rng: &mut impl Rng) -> Vec<(EarthRadius, Days)> {
        let mut draws = Vec::with_capacity(n);
        for _ in 0..n {
            draws.push(self.sample(rng));
        }
        draws
    }

    /// Selectable bins, in table order.
    pub fn bins(&self) -> &[RateBin] {
        &self.bins
    }

    /// Sum of the selectable bin weights.
    pub fn total_weight(&self) -> u64 {
        self.bins.iter().map(|bin| u64::from(bin.weight)).sum()
    }
}

/// FGK occurrence calibration used by a survey configuration.
///
/// The M-dwarf side of the population is the same for every variant
/// (Dressing & Charbonneau 2015); the calibration selects the FGK table,
/// the FGK planet rate, and an optional effective-temperature gate on which
/// FGK stars receive planets at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Calibration {
    Petigura18,
    Fressin13,
    Burke15,
    Bryson20,
    Luvoir,
}

impl Calibration {
    /// Build the FGK-dwarf (radius, period) sampler for this calibration.
    pub fn fgk_sampler(&self) -> Result<BinSampler, YieldSimError> {
        match self {
            Calibration::Petigura18 => petigura18::sampler(),
            Calibration::Fressin13 => fressin13::sampler(),
            Calibration::Burke15 => grid::preset_sampler(grid::GridPreset::Burke15),
            Calibration::Bryson20 => grid::preset_sampler(grid::GridPreset::Bryson20),
            Calibration::Luvoir => grid::preset_sampler(grid::GridPreset::Luvoir),
        }
    }

    /// Build the M-dwarf (radius, period) sampler, shared by every calibration.
    pub fn m_dwarf_sampler(&self) -> Result<BinSampler, YieldSimError> {
        dressing15::sampler()
    }

    /// Average number of planets per FGK dwarf under this calibration.
    pub fn fgk_planet_rate(&self) -> f64 {
        match self {
            Calibration::Petigura18 | Calibration::Fressin13 => 1.10,
            Calibration::Burke15 => 2.5,
            Calibration::Bryson20 => 0.69,
            Calibration::Luvoir => 0.05,
        }
    }

    /// Effective-temperature window restricting which FGK dwarfs receive
    /// planets, if the calibration defines one.
    ///
    /// The LUVOIR normalization is measured on a narrow solar-analog sample,
    /// so only stars inside its window are planted.
    pub fn fgk_teff_window(&self) -> Option<(Kelvin, Kelvin)> {
        match self {
            Calibration::Luvoir => Some((5300.0, 6000.0)),
            _ => None,
        }
    }
}

impl FromStr for Calibration {
    type Err = YieldSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "petigura18" => Ok(Calibration::Petigura18),
            "fressin13" => Ok(Calibration::Fressin13),
            "burke15" => Ok(Calibration::Burke15),
            "bryson20" => Ok(Calibration::Bryson20),
            "luvoir" => Ok(Calibration::Luvoir),
            _ => Err(YieldSimError::InvalidCalibration(format!(
                "Invalid occurrence calibration: {s}"
            ))),
        }
    }
}

impl TryFrom<&str> for Calibration {
    type Error = YieldSimError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Calibration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Calibration::Petigura18 => "petigura18",
            Calibration::Fressin13 => "fressin13",
            Calibration::Burke15 => "burke15",
            Calibration::Bryson20 => "bryson20",
            Calibration::Luvoir => "luvoir",
        };
        write!(f, "{name}")
    }
}
