//! # Survey configuration and simulation driver
//!
//! The entry point of the crate: a [`SurveyParams`] value describes one survey
//! (cadence, detection thresholds, population conventions), and a
//! [`Survey`](crate::simulation::driver::Survey) built from it runs Monte Carlo
//! realizations against a catalog and a coverage matrix.
//!
//! ## Public API
//!
//! - [`SurveyParams`] – immutable, validated configuration with named presets
//!   ([`SurveyParams::tess_extended`], [`SurveyParams::kepler`]).
//! - [`SurveyParamsBuilder`] – fluent builder, validation on `build()`.
//! - [`Survey`](driver::Survey) – the built engine, `run_once` /
//!   `run_realizations`.
//! - [`YieldSummary`](summary::YieldSummary) / [`YieldStats`](summary::YieldStats)
//!   – per-realization tallies and their distribution across realizations.

use std::cmp::Ordering::Greater;
use std::fmt;

use crate::catalog::mission_duration;
use crate::constants::Days;
use crate::detection::DetectionCriteria;
use crate::noise::NoiseModelKind;
use crate::occurrence::Calibration;
use crate::population::DilutionModel;
use crate::transit::EccentricityPrescription;
use crate::yieldsim_errors::YieldSimError;

pub mod driver;
pub mod summary;

pub use driver::{Realization, Survey};
pub use summary::{YieldStats, YieldSummary};

/// Configuration of one transit survey.
///
/// Groups the observing cadence, the detection thresholds, and the population
/// conventions a yield simulation needs. Values are validated on construction
/// through [`SurveyParams::builder`]; the presets are valid by construction.
///
/// Overview
/// -----------------
/// **Observing cadence**
/// * `epoch_length` – length of one contiguous coverage interval
///   (sector, quarter) in days.
/// * `epoch_count` – number of epochs in the full survey.
/// * `primary_epoch_count` – leading epochs attributed to the primary
///   mission; must not exceed `epoch_count`.
///
/// **Detection thresholds**
/// * `sigma_threshold` – statistical threshold on the folded signal.
/// * `min_transits` – minimum number of recorded transit events.
///
/// **Population conventions**
/// * `occurrence` – occurrence-rate calibration, see [`Calibration`].
/// * `noise` – photometric noise strategy, see [`NoiseModelKind`].
/// * `dilution` – interpretation of the catalog dilution column.
/// * `eccentricity` – eccentricity factor entering the impact parameter;
///   `Winn2010` is the corrected quotient form, `LegacyLinear` reproduces
///   catalogs produced with the literal published expression.
/// * `subgiant_fraction` – probability for a non-M-dwarf star to be an
///   unrecognized subgiant with its radius doubled; 0 disables the pass.
///   Catalogs with reliable evolved-star radii keep it at 0.
///
/// Defaults
/// -----------------
/// [`Default`] is the TESS extended-mission preset:
///
/// ```rust,no_run
/// use yieldsim::simulation::SurveyParams;
/// let params = SurveyParams::default();
/// assert_eq!(params.epoch_count, 114);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyParams {
    // --- Observing cadence ---
    pub epoch_length: Days,
    pub epoch_count: usize,
    pub primary_epoch_count: usize,

    // --- Detection thresholds ---
    pub sigma_threshold: f64,
    pub min_transits: u32,

    // --- Population conventions ---
    pub occurrence: Calibration,
    pub noise: NoiseModelKind,
    pub dilution: DilutionModel,
    pub eccentricity: EccentricityPrescription,
    pub subgiant_fraction: f64,
}

impl SurveyParams {
    /// Construct a new [`SurveyParams`] with the default preset.
    ///
    /// This is equivalent to calling [`SurveyParams::default()`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`SurveyParamsBuilder`] to configure a custom survey.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use yieldsim::occurrence::Calibration;
    /// use yieldsim::simulation::SurveyParams;
    ///
    /// let params = SurveyParams::builder()
    ///     .epoch_length(27.4)
    ///     .epoch_count(57)
    ///     .primary_epoch_count(26)
    ///     .occurrence(Calibration::Fressin13)
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn builder() -> SurveyParamsBuilder {
        SurveyParamsBuilder::new()
    }

    /// TESS extended-mission preset: 114 sectors of 13.7 d, the first 52
    /// forming the primary window, 10 sigma and 3 transits required,
    /// petigura18 occurrence with TESS photometric noise and
    /// contamination-ratio dilution.
    pub fn tess_extended() -> Self {
        SurveyParams {
            epoch_length: 13.7,
            epoch_count: 114,
            primary_epoch_count: 52,
            sigma_threshold: 10.0,
            min_transits: 3,
            occurrence: Calibration::Petigura18,
            noise: NoiseModelKind::TessPhotometric,
            dilution: DilutionModel::ContaminationRatio,
            eccentricity: EccentricityPrescription::Winn2010,
            subgiant_fraction: 0.0,
        }
    }

    /// Kepler preset over the 124-quarter grid: quarters of 91.3125 d, an
    /// 18-quarter primary window, 7.1 sigma and 3 transits required,
    /// quiet-star CDPP noise and crowding-factor dilution. The occurrence
    /// calibration is chosen by the caller (`burke15`, `bryson20`, `luvoir`).
    pub fn kepler(occurrence: Calibration) -> Self {
        SurveyParams {
            epoch_length: 91.3125,
            epoch_count: 124,
            primary_epoch_count: 18,
            sigma_threshold: 7.1,
            min_transits: 3,
            occurrence,
            noise: NoiseModelKind::KeplerQuiet1h,
            dilution: DilutionModel::CrowdingFactor,
            eccentricity: EccentricityPrescription::Winn2010,
            subgiant_fraction: 0.0,
        }
    }

    /// The detection thresholds and windows of this survey, in the form the
    /// detection engine consumes.
    pub fn criteria(&self) -> DetectionCriteria {
        DetectionCriteria {
            epoch_length: self.epoch_length,
            epoch_count: self.epoch_count,
            primary_epoch_count: self.primary_epoch_count,
            sigma_threshold: self.sigma_threshold,
            min_transits: self.min_transits,
        }
    }

    /// Total duration covered by the epoch grid, in days.
    pub fn mission_duration(&self) -> Days {
        mission_duration(self.epoch_length, self.epoch_count)
    }
}

impl Default for SurveyParams {
    fn default() -> Self {
        Self::tess_extended()
    }
}

/// Builder for [`SurveyParams`], with validation.
#[derive(Debug, Clone)]
pub struct SurveyParamsBuilder {
    params: SurveyParams,
}

impl Default for SurveyParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SurveyParamsBuilder {
    /// Create a new builder initialized with the default preset.
    pub fn new() -> Self {
        Self {
            params: SurveyParams::default(),
        }
    }

    /// Start the builder from an existing configuration, preset or custom.
    pub fn from_params(params: SurveyParams) -> Self {
        Self { params }
    }

    // --- Observing cadence ---
    pub fn epoch_length(mut self, v: Days) -> Self {
        self.params.epoch_length = v;
        self
    }
    pub fn epoch_count(mut self, v: usize) -> Self {
        self.params.epoch_count = v;
        self
    }
    pub fn primary_epoch_count(mut self, v: usize) -> Self {
        self.params.primary_epoch_count = v;
        self
    }

    // --- Detection thresholds ---
    pub fn sigma_threshold(mut self, v: f64) -> Self {
        self.params.sigma_threshold = v;
        self
    }
    pub fn min_transits(mut self, v: u32) -> Self {
        self.params.min_transits = v;
        self
    }

    // --- Population conventions ---
    pub fn occurrence(mut self, v: Calibration) -> Self {
        self.params.occurrence = v;
        self
    }
    pub fn noise(mut self, v: NoiseModelKind) -> Self {
        self.params.noise = v;
        self
    }
    pub fn dilution(mut self, v: DilutionModel) -> Self {
        self.params.dilution = v;
        self
    }
    pub fn eccentricity(mut self, v: EccentricityPrescription) -> Self {
        self.params.eccentricity = v;
        self
    }
    pub fn subgiant_fraction(mut self, v: f64) -> Self {
        self.params.subgiant_fraction = v;
        self
    }

    /// Return true iff x > 0.0, finite and comparable (i.e., not NaN).
    #[inline]
    fn finite_gt0(x: f64) -> bool {
        x.is_finite() && x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Finalize the builder and produce a [`SurveyParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `epoch_length > 0` and finite.
    /// * `epoch_count >= 1`.
    /// * `1 <= primary_epoch_count <= epoch_count`.
    /// * `sigma_threshold > 0` and finite.
    /// * `min_transits >= 1`.
    /// * `subgiant_fraction` in `[0, 1]` (NaN rejected).
    ///
    /// Returns
    /// -----------------
    /// * `Ok(SurveyParams)` if all values are valid.
    /// * `Err(YieldSimError::InvalidSurveyParameter)` describing the first
    ///   violated rule otherwise.
    pub fn build(self) -> Result<SurveyParams, YieldSimError> {
        let p = &self.params;

        if !Self::finite_gt0(p.epoch_length) {
            return Err(YieldSimError::InvalidSurveyParameter(
                "epoch_length must be positive and finite".into(),
            ));
        }
        if p.epoch_count == 0 {
            return Err(YieldSimError::InvalidSurveyParameter(
                "epoch_count must be >= 1".into(),
            ));
        }
        if p.primary_epoch_count == 0 {
            return Err(YieldSimError::InvalidSurveyParameter(
                "primary_epoch_count must be >= 1".into(),
            ));
        }
        if p.primary_epoch_count > p.epoch_count {
            return Err(YieldSimError::InvalidSurveyParameter(
                "primary_epoch_count must not exceed epoch_count".into(),
            ));
        }
        if !Self::finite_gt0(p.sigma_threshold) {
            return Err(YieldSimError::InvalidSurveyParameter(
                "sigma_threshold must be positive and finite".into(),
            ));
        }
        if p.min_transits == 0 {
            return Err(YieldSimError::InvalidSurveyParameter(
                "min_transits must be >= 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&p.subgiant_fraction) {
            return Err(YieldSimError::InvalidSurveyParameter(
                "subgiant_fraction must lie in [0, 1]".into(),
            ));
        }

        Ok(self.params)
    }
}

impl fmt::Display for SurveyParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            const PARAM_COL: usize = 46; // width reserved for "name = value"
            writeln!(f, "Survey Parameters")?;
            writeln!(f, "-----------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.len() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.len())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            writeln!(f, "[Observing cadence]")?;
            line!(
                "epoch_length         = {:.4} d",
                self.epoch_length,
                "Length of one coverage epoch"
            )?;
            line!(
                "epoch_count          = {}",
                self.epoch_count,
                "Epochs in the full survey"
            )?;
            line!(
                "primary_epoch_count  = {}",
                self.primary_epoch_count,
                "Leading epochs of the primary mission"
            )?;
            line!(
                "mission_duration     = {:.1} d",
                self.mission_duration(),
                "Total span of the epoch grid"
            )?;

            writeln!(f, "\n[Detection thresholds]")?;
            line!(
                "sigma_threshold      = {:.2}",
                self.sigma_threshold,
                "Required significance of the folded signal"
            )?;
            line!(
                "min_transits         = {}",
                self.min_transits,
                "Minimum recorded transit events"
            )?;

            writeln!(f, "\n[Population conventions]")?;
            line!(
                "occurrence           = {}",
                self.occurrence,
                "Occurrence-rate calibration"
            )?;
            line!(
                "noise                = {}",
                self.noise,
                "Photometric noise strategy"
            )?;
            line!(
                "dilution             = {}",
                self.dilution,
                "Catalog dilution convention"
            )?;
            line!(
                "eccentricity         = {}",
                self.eccentricity,
                "Impact-parameter eccentricity factor"
            )?;
            line!(
                "subgiant_fraction    = {:.2}",
                self.subgiant_fraction,
                "Radius-inflation probability, 0 disables"
            )?;

            Ok(())
        } else {
            write!(
                f,
                "SurveyParams(L={:.2}d x {} epochs, primary={}, sigma={:.1}, min_transits={}, occurrence={}, noise={}, dilution={}, eccentricity={}, subgiants={:.2})",
                self.epoch_length,
                self.epoch_count,
                self.primary_epoch_count,
                self.sigma_threshold,
                self.min_transits,
                self.occurrence,
                self.noise,
                self.dilution,
                self.eccentricity,
                self.subgiant_fraction,
            )
        }
    }
}
