//! # Transit counting and detection classification
//!
//! Second stage of the yield pipeline: given a synthetic [`Planet`] population and a
//! [`CoverageMatrix`], count how many transit events each survey actually records and decide
//! which planets clear the detection threshold.
//!
//! Epochs are right-closed intervals of length `epoch_length`: epoch `n` covers times in
//! `((n-1) * L, n * L]`, so a transit falling exactly on an epoch boundary belongs to the epoch
//! that just ended and a transit at `t = 0` precedes the survey entirely. Every transit *event*
//! is counted, not every distinct epoch; short-period planets can contribute several transits
//! to the same epoch and each one adds depth to the folded signal.
//!
//! The primary-mission figures reuse the same machinery restricted to the leading
//! `primary_epoch_count` epochs of the coverage matrix.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{
    Days, Ppm, EARTH_ANALOG_PERIOD, EARTH_ANALOG_RADIUS, HABITABLE_ZONE_INSOLATION,
};
use crate::coverage::CoverageMatrix;
use crate::population::Planet;

/// Thresholds and windows applied when classifying a planet as detected.
///
/// Values are lifted from the survey configuration; see
/// [`SurveyParams::criteria`](crate::simulation::SurveyParams::criteria).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionCriteria {
    /// Length of one coverage epoch in days.
    pub epoch_length: Days,
    /// Number of epochs in the full survey.
    pub epoch_count: usize,
    /// Number of leading epochs attributed to the primary mission.
    pub primary_epoch_count: usize,
    /// Statistical threshold the folded signal must exceed, in sigma.
    pub sigma_threshold: f64,
    /// Minimum number of recorded transit events.
    pub min_transits: u32,
}

/// Per-planet outcome of the detection stage.
///
/// `detected` and `detected_primary` apply the full criteria over the whole survey and over
/// the primary window respectively. `in_habitable_zone` and `earth_analog` are properties of
/// the planet alone and are reported independently of detectability so that yields can be
/// cross-tabulated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Transit events recorded over the full survey.
    pub n_transits: u32,
    /// Transit events recorded within the primary window.
    pub n_transits_primary: u32,
    /// Folded signal-to-noise ratio over the full survey.
    pub snr: f64,
    /// Folded signal-to-noise ratio within the primary window.
    pub snr_primary: f64,
    /// The host star has at least one observed epoch.
    pub observed: bool,
    /// The planet passes the detection criteria over the full survey.
    pub detected: bool,
    /// The planet passes the detection criteria within the primary window.
    pub detected_primary: bool,
    /// Insolation falls inside the optimistic habitable zone (bounds included).
    pub in_habitable_zone: bool,
    /// Radius and period fall inside the Earth-analog box (bounds included).
    pub earth_analog: bool,
}

/// Count the transit events a star's coverage actually records.
///
/// Transit times are enumerated as `t0 + k * period` for `k = 0, 1, ...` strictly below the
/// window horizon `epoch_length * window`, where `window` is `epoch_window` clamped to the
/// width of the coverage matrix. Each time is bucketed into its right-closed epoch
/// `ceil(t / epoch_length)` and counted when that epoch is observed for the star. Times at or
/// before `t = 0` land in no epoch and never count.
///
/// Arguments
/// -----------------
/// * `t0`: time of the first transit in days
/// * `period`: orbital period in days
/// * `coverage`: per-star, per-epoch observation mask
/// * `star_row`: row of the host star in the coverage matrix
/// * `epoch_length`: length of one epoch in days
/// * `epoch_window`: number of leading epochs to consider
///
/// Return
/// ----------
/// * Number of transit events falling in observed epochs. Zero for non-positive periods or
///   epoch lengths, or a non-finite `t0`.
pub fn count_transits(
    t0: Days,
    period: Days,
    coverage: &CoverageMatrix,
    star_row: usize,
    epoch_length: Days,
    epoch_window: usize,
) -> u32 {
    if !(period > 0.0) || !(epoch_length > 0.0) || !t0.is_finite() {
        return 0;
    }
    let window = epoch_window.min(coverage.n_epochs());
    if window == 0 {
        return 0;
    }
    let horizon = epoch_length * window as f64;

    let mut count = 0u32;
    let mut k = 0u64;
    loop {
        // Multiplied rather than accumulated so long series do not drift.
        let t = t0 + k as f64 * period;
        if t >= horizon {
            break;
        }
        let epoch = (t / epoch_length).ceil() as i64;
        if epoch >= 1
            && epoch <= window as i64
            && coverage.is_observed(star_row, epoch as usize - 1)
        {
            count += 1;
        }
        k += 1;
    }
    count
}

/// Folded signal-to-noise ratio of `n_transits` stacked transit events.
///
/// The diluted depth is scaled by the square root of the transit duration in hours, matching
/// the hourly normalization of the noise models, then grows with the square root of the number
/// of stacked events.
pub fn signal_to_noise(planet: &Planet, n_transits: u32) -> f64 {
    scaled_signal(planet, n_transits) / planet.noise_level_ppm
}

fn scaled_signal(planet: &Planet, n_transits: u32) -> Ppm {
    planet.depth_diluted_ppm * (planet.duration * 24.0).sqrt() * f64::from(n_transits).sqrt()
}

/// Detection rule: the star's noise must sit below the level at which the folded signal
/// reaches the sigma threshold, with enough transit events, a physical radius, and a
/// transiting geometry. A NaN duration (non-transiting chord) propagates to a false
/// comparison.
fn passes_threshold(planet: &Planet, n_transits: u32, criteria: &DetectionCriteria) -> bool {
    let needed = scaled_signal(planet, n_transits) / criteria.sigma_threshold;
    planet.noise_level_ppm < needed
        && n_transits >= criteria.min_transits
        && planet.radius > 0.0
        && planet.has_transits
}

/// Classify one planet against the survey coverage and detection criteria.
///
/// Arguments
/// -----------------
/// * `planet`: synthetic planet with its geometry and noise level resolved
/// * `coverage`: per-star, per-epoch observation mask
/// * `criteria`: thresholds and windows, see [`DetectionCriteria`]
///
/// Return
/// ----------
/// * A [`Detection`] record with the full-survey and primary-window outcomes.
pub fn evaluate(
    planet: &Planet,
    coverage: &CoverageMatrix,
    criteria: &DetectionCriteria,
) -> Detection {
    let n_transits = count_transits(
        planet.t0,
        planet.period,
        coverage,
        planet.star_row,
        criteria.epoch_length,
        criteria.epoch_count,
    );
    let n_transits_primary = count_transits(
        planet.t0,
        planet.period,
        coverage,
        planet.star_row,
        criteria.epoch_length,
        criteria.primary_epoch_count,
    );

    let in_habitable_zone = planet.insolation >= HABITABLE_ZONE_INSOLATION.0
        && planet.insolation <= HABITABLE_ZONE_INSOLATION.1;
    let earth_analog = planet.radius >= EARTH_ANALOG_RADIUS.0
        && planet.radius <= EARTH_ANALOG_RADIUS.1
        && planet.period >= EARTH_ANALOG_PERIOD.0
        && planet.period <= EARTH_ANALOG_PERIOD.1;

    Detection {
        n_transits,
        n_transits_primary,
        snr: signal_to_noise(planet, n_transits),
        snr_primary: signal_to_noise(planet, n_transits_primary),
        observed: coverage.observed_epochs(planet.star_row) > 0,
        detected: passes_threshold(planet, n_transits, criteria),
        detected_primary: passes_threshold(planet, n_transits_primary, criteria),
        in_habitable_zone,
        earth_analog,
    }
}

/// Classify a whole population in parallel.
///
/// Results are returned in the order of `planets`.
pub fn evaluate_all(
    planets: &[Planet],
    coverage: &CoverageMatrix,
    criteria: &DetectionCriteria,
) -> Vec<Detection> {
    planets
        .par_iter()
        .map(|planet| evaluate(planet, coverage, criteria))
        .collect()
}
