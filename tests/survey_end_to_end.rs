mod common;

use rand::rngs::StdRng;
use rand::SeedableRng;
use yieldsim::coverage::{
    CoverageMatrix, CoverageResolver, EclipticRectangles, KeplerEra, KEPLER_QUARTERS,
};
use yieldsim::occurrence::Calibration;
use yieldsim::simulation::{Survey, SurveyParams, YieldStats};

use crate::common::mixed_catalog;

#[test]
fn test_tess_extended_realizations_reproducible() {
    let survey = Survey::new(SurveyParams::tess_extended()).unwrap();
    let catalog = mixed_catalog(60, 60);
    let coverage = CoverageMatrix::uniform(catalog.len(), 114, 1);

    let first = survey.run_realizations(&catalog, &coverage, 8, 42).unwrap();
    let second = survey.run_realizations(&catalog, &coverage, 8, 42).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 8);

    for summary in &first {
        assert!(summary.planets > 0);
        assert!(summary.transiting <= summary.planets);
        // Uniform coverage: every host star is observed.
        assert_eq!(summary.observed, summary.planets);
        assert!(summary.detected <= summary.transiting);
        assert!(summary.detected_primary <= summary.detected);
        assert!(summary.earth_analogs <= summary.detected);
        assert!(summary.earth_analogs_primary <= summary.earth_analogs);
        assert!(summary.in_habitable_zone <= summary.detected);
    }

    let stats = YieldStats::from_summaries(&first).unwrap();
    assert!(stats.min <= stats.p25);
    assert!(stats.p25 <= stats.median);
    assert!(stats.median <= stats.p95);
    assert!(stats.p95 <= stats.max);
}

#[test]
fn test_distinct_seeds_give_distinct_realizations() {
    let survey = Survey::new(SurveyParams::tess_extended()).unwrap();
    let catalog = mixed_catalog(40, 40);
    let coverage = CoverageMatrix::uniform(catalog.len(), 114, 1);

    let a = survey.run_realizations(&catalog, &coverage, 4, 1).unwrap();
    let b = survey.run_realizations(&catalog, &coverage, 4, 1000).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_kepler_prime_mission_scenario() {
    let survey = Survey::new(SurveyParams::kepler(Calibration::Burke15)).unwrap();
    let mut catalog = mixed_catalog(40, 40);
    for star in &mut catalog {
        // Crowding convention: all flux belongs to the target.
        star.dilution = 1.0;
    }
    let coverage = KeplerEra::K1K2.coverage(catalog.len());
    assert_eq!(coverage.n_epochs(), KEPLER_QUARTERS);

    let realization = survey
        .run_once(&catalog, &coverage, &mut StdRng::seed_from_u64(2024))
        .unwrap();
    assert!(realization.summary.planets > 0);
    assert_eq!(realization.planets.len(), realization.detections.len());
    // The k1k2 union observes every star.
    assert_eq!(realization.summary.observed, realization.summary.planets);

    for (planet, det) in realization.planets.iter().zip(&realization.detections) {
        assert!(det.n_transits_primary <= det.n_transits);
        if det.detected {
            assert!(planet.has_transits);
            assert!(det.n_transits >= survey.params().min_transits);
        }
        if det.detected_primary {
            assert!(det.detected);
        }
    }
}

#[test]
fn test_scanning_coverage_blinds_high_latitude_stars() {
    let survey = Survey::new(SurveyParams::tess_extended()).unwrap();
    let mut catalog = mixed_catalog(30, 30);
    let n = catalog.len();
    for star in catalog.iter_mut().skip(n / 2) {
        star.ecl_lat = 40.0;
    }
    let coverage = EclipticRectangles::default()
        .resolve(&catalog, survey.params().epoch_count)
        .unwrap();

    let realization = survey
        .run_once(&catalog, &coverage, &mut StdRng::seed_from_u64(5))
        .unwrap();
    let mut low_latitude_observed = false;
    for (planet, det) in realization.planets.iter().zip(&realization.detections) {
        if planet.star_row >= n / 2 {
            // Outside the scanned band: never observed, never detected.
            assert!(!det.observed);
            assert_eq!(det.n_transits, 0);
            assert!(!det.detected);
        } else {
            low_latitude_observed |= det.observed;
        }
    }
    assert!(low_latitude_observed);
}
