//! Per-realization yield tallies and their distribution across realizations.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::detection::Detection;
use crate::population::Planet;

/// Counts of one Monte Carlo realization.
///
/// `earth_analogs`, `earth_analogs_primary` and `in_habitable_zone` count
/// *detected* planets carrying the interest flag, so they can be read directly
/// as survey yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldSummary {
    /// Planets drawn for the catalog.
    pub planets: usize,
    /// Planets with a transiting geometry.
    pub transiting: usize,
    /// Planets whose host star has at least one observed epoch.
    pub observed: usize,
    /// Planets detected over the full survey.
    pub detected: usize,
    /// Planets detected within the primary window.
    pub detected_primary: usize,
    /// Detected planets inside the Earth-analog radius/period box.
    pub earth_analogs: usize,
    /// Primary-window detections inside the Earth-analog box.
    pub earth_analogs_primary: usize,
    /// Detected planets inside the optimistic habitable zone.
    pub in_habitable_zone: usize,
    /// Seed of the generator stream that produced this realization; zero when
    /// the caller supplied the generator directly.
    pub seed: u64,
}

impl YieldSummary {
    /// Tally a population and its detection records.
    ///
    /// `planets` and `detections` must be index-aligned with equal lengths,
    /// as produced by the driver; a length mismatch panics.
    pub fn tally(planets: &[Planet], detections: &[Detection], seed: u64) -> Self {
        let mut summary = YieldSummary {
            planets: planets.len(),
            transiting: 0,
            observed: 0,
            detected: 0,
            detected_primary: 0,
            earth_analogs: 0,
            earth_analogs_primary: 0,
            in_habitable_zone: 0,
            seed,
        };
        for (planet, det) in planets.iter().zip_eq(detections) {
            if planet.has_transits {
                summary.transiting += 1;
            }
            if det.observed {
                summary.observed += 1;
            }
            if det.detected {
                summary.detected += 1;
                if det.earth_analog {
                    summary.earth_analogs += 1;
                }
                if det.in_habitable_zone {
                    summary.in_habitable_zone += 1;
                }
            }
            if det.detected_primary {
                summary.detected_primary += 1;
                if det.earth_analog {
                    summary.earth_analogs_primary += 1;
                }
            }
        }
        summary
    }
}

impl fmt::Display for YieldSummary {
    /// Compact by default; pretty multi-line when using the alternate flag (`{:#}`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Realization yield")?;
            writeln!(f, "-----------------")?;
            writeln!(f, "planets                 : {}", self.planets)?;
            writeln!(f, "transiting              : {}", self.transiting)?;
            writeln!(f, "observed                : {}", self.observed)?;
            writeln!(f, "detected                : {}", self.detected)?;
            writeln!(f, "detected (primary)      : {}", self.detected_primary)?;
            writeln!(f, "earth analogs           : {}", self.earth_analogs)?;
            writeln!(f, "earth analogs (primary) : {}", self.earth_analogs_primary)?;
            writeln!(f, "in habitable zone       : {}", self.in_habitable_zone)?;
            write!(f, "seed                    : {}", self.seed)
        } else {
            write!(
                f,
                "planets={}, transiting={}, observed={}, detected={}, detected_primary={}, earth_analogs={}, earth_analogs_primary={}, hz={}, seed={}",
                self.planets,
                self.transiting,
                self.observed,
                self.detected,
                self.detected_primary,
                self.earth_analogs,
                self.earth_analogs_primary,
                self.in_habitable_zone,
                self.seed
            )
        }
    }
}

/// Distribution of the detected count across realizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldStats {
    pub min: usize,
    pub p25: usize,
    pub median: usize,
    pub p95: usize,
    pub max: usize,
}

impl YieldStats {
    /// Summarize the detected counts of a batch of realizations.
    ///
    /// Percentiles are computed using the *nearest-rank* method:
    /// the index is `round(q x (N-1))` for quantile `q` in [0,1], clamped to
    /// the valid range. This makes results robust even for small batches.
    ///
    /// Return
    /// ----------
    /// * `None` if the batch is empty.
    /// * `Some(YieldStats)` containing the summary statistics otherwise.
    pub fn from_summaries(summaries: &[YieldSummary]) -> Option<Self> {
        let mut counts: Vec<usize> = summaries.iter().map(|s| s.detected).collect();
        if counts.is_empty() {
            return None;
        }

        counts.sort_unstable();

        #[inline]
        fn q_index(n: usize, q: f64) -> usize {
            let pos = q * (n as f64 - 1.0);
            let idx = pos.round() as isize;
            idx.clamp(0, (n as isize) - 1) as usize
        }

        let n = counts.len();
        Some(YieldStats {
            min: counts[0],
            p25: counts[q_index(n, 0.25)],
            median: counts[q_index(n, 0.50)],
            p95: counts[q_index(n, 0.95)],
            max: counts[n - 1],
        })
    }
}

impl fmt::Display for YieldStats {
    /// Compact by default; pretty multi-line when using the alternate flag (`{:#}`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Detected planets per realization")?;
            writeln!(f, "--------------------------------")?;
            writeln!(f, "min    : {}", self.min)?;
            writeln!(f, "p25    : {}", self.p25)?;
            writeln!(f, "median : {}", self.median)?;
            writeln!(f, "p95    : {}", self.p95)?;
            write!(f, "max    : {}", self.max)
        } else {
            write!(
                f,
                "min={}, p25={}, median={}, p95={}, max={}",
                self.min, self.p25, self.median, self.p95, self.max
            )
        }
    }
}

#[cfg(test)]
mod test_summary {
    use super::*;

    fn planet(has_transits: bool) -> Planet {
        Planet {
            star_id: 1,
            star_row: 0,
            radius: 1.0,
            period: 365.25,
            t0: 50.0,
            eccentricity: 0.0,
            omega: 0.0,
            cos_incl: 0.0,
            a_over_rstar: 215.1,
            radius_ratio: 0.009155,
            impact: 0.0,
            duration: 0.5,
            depth_ppm: 83.8,
            depth_diluted_ppm: 83.8,
            noise_level_ppm: 60.0,
            insolation: 1.0,
            has_transits,
        }
    }

    fn detection(detected: bool, primary: bool, analog: bool, hz: bool) -> Detection {
        Detection {
            n_transits: 5,
            n_transits_primary: 2,
            snr: 12.0,
            snr_primary: 7.0,
            observed: true,
            detected,
            detected_primary: primary,
            in_habitable_zone: hz,
            earth_analog: analog,
        }
    }

    #[test]
    fn test_tally_counts_detected_flags_only() {
        let planets = vec![planet(true), planet(true), planet(false), planet(true)];
        let detections = vec![
            detection(true, true, true, true),
            detection(true, false, false, true),
            // Interest flags on an undetected planet do not count as yield.
            detection(false, false, true, true),
            detection(false, true, true, false),
        ];
        let summary = YieldSummary::tally(&planets, &detections, 77);

        assert_eq!(summary.planets, 4);
        assert_eq!(summary.transiting, 3);
        assert_eq!(summary.observed, 4);
        assert_eq!(summary.detected, 2);
        assert_eq!(summary.detected_primary, 2);
        assert_eq!(summary.earth_analogs, 1);
        assert_eq!(summary.earth_analogs_primary, 2);
        assert_eq!(summary.in_habitable_zone, 2);
        assert_eq!(summary.seed, 77);
    }

    #[test]
    fn test_tally_empty() {
        let summary = YieldSummary::tally(&[], &[], 0);
        assert_eq!(summary.planets, 0);
        assert_eq!(summary.detected, 0);
    }

    fn with_detected(detected: usize) -> YieldSummary {
        let mut s = YieldSummary::tally(&[], &[], 0);
        s.detected = detected;
        s
    }

    #[test]
    fn test_stats_nearest_rank() {
        let summaries: Vec<YieldSummary> = [3, 9, 5, 1, 7].map(with_detected).to_vec();
        let stats = YieldStats::from_summaries(&summaries).unwrap();
        // Sorted counts 1 3 5 7 9; indices round(q * 4).
        assert_eq!(stats.min, 1);
        assert_eq!(stats.p25, 3);
        assert_eq!(stats.median, 5);
        assert_eq!(stats.p95, 9);
        assert_eq!(stats.max, 9);
    }

    #[test]
    fn test_stats_single_realization() {
        let stats = YieldStats::from_summaries(&[with_detected(4)]).unwrap();
        assert_eq!(
            stats,
            YieldStats {
                min: 4,
                p25: 4,
                median: 4,
                p95: 4,
                max: 4
            }
        );
    }

    #[test]
    fn test_stats_empty_batch() {
        assert!(YieldStats::from_summaries(&[]).is_none());
    }

    #[test]
    fn test_display_formats() {
        let stats = YieldStats {
            min: 1,
            p25: 2,
            median: 3,
            p95: 8,
            max: 9,
        };
        assert_eq!(stats.to_string(), "min=1, p25=2, median=3, p95=8, max=9");
        let pretty = format!("{stats:#}");
        assert!(pretty.contains("median : 3"));

        let summary = with_detected(6);
        assert!(summary.to_string().contains("detected=6"));
        assert!(format!("{summary:#}").contains("detected                : 6"));
    }
}
