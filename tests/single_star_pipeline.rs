use approx::assert_relative_eq;
use yieldsim::catalog::Star;
use yieldsim::coverage::CoverageMatrix;
use yieldsim::detection::{self, DetectionCriteria};
use yieldsim::noise::{NoiseModel, NoiseModelKind};
use yieldsim::occurrence::Calibration;
use yieldsim::population::{DilutionModel, PopulationModel};
use yieldsim::transit::EccentricityPrescription;

fn quiet_sun() -> Star {
    Star {
        id: 7,
        ra: 290.0,
        dec: 44.5,
        ecl_lon: 300.0,
        ecl_lat: 2.0,
        mag: 12.0,
        teff: 5771.0,
        radius: 1.0,
        mass: 1.0,
        // Crowding convention: all flux belongs to the target.
        dilution: 1.0,
        giant: false,
    }
}

fn kepler_criteria() -> DetectionCriteria {
    DetectionCriteria {
        epoch_length: 91.3125,
        epoch_count: 124,
        primary_epoch_count: 18,
        sigma_threshold: 7.1,
        min_transits: 3,
    }
}

fn kepler_population() -> PopulationModel {
    PopulationModel::new(
        Calibration::Burke15,
        EccentricityPrescription::Winn2010,
        DilutionModel::CrowdingFactor,
    )
    .unwrap()
}

#[test]
fn test_injected_earth_is_recovered() {
    let model = kepler_population();
    let noise = NoiseModel::from_kind(NoiseModelKind::KeplerQuiet1h);
    let star = quiet_sun();
    let noise_level = noise.per_hour(star.mag);
    assert_relative_eq!(noise_level, 110.96188534807796, epsilon = 1e-9);

    // Earth-like planet seen edge-on, first transit 100 days in.
    let planet = model.synthesize(&star, 0, 1.0, 365.25, 100.0, 0.0, 0.0, 0.0, noise_level);
    assert!(planet.has_transits);
    assert_eq!(planet.impact, 0.0);
    assert_relative_eq!(planet.a_over_rstar, 215.11122203472868, epsilon = 1e-9);
    assert_relative_eq!(planet.depth_ppm, 83.814025, epsilon = 1e-9);
    assert_relative_eq!(planet.depth_diluted_ppm, 83.814025, epsilon = 1e-9);
    assert_relative_eq!(planet.duration, 0.5454271519515641, epsilon = 1e-12);
    assert_relative_eq!(planet.insolation, 0.9998956656756066, epsilon = 1e-12);

    let coverage = CoverageMatrix::uniform(1, 124, 1);
    let det = detection::evaluate(&planet, &coverage, &kepler_criteria());

    assert_eq!(det.n_transits, 31);
    assert_eq!(det.n_transits_primary, 5);
    assert_relative_eq!(det.snr, 15.215902429792106, epsilon = 1e-9);
    assert_relative_eq!(det.snr_primary, 6.110853469151759, epsilon = 1e-9);
    assert!(det.observed);
    assert!(det.detected);
    // Five transits at this noise level sit below the 7.1 sigma threshold.
    assert!(!det.detected_primary);
    assert!(det.in_habitable_zone);
    assert!(det.earth_analog);
}

#[test]
fn test_inclined_orbit_is_rejected() {
    let model = kepler_population();
    let noise = NoiseModel::from_kind(NoiseModelKind::KeplerQuiet1h);
    let star = quiet_sun();
    let noise_level = noise.per_hour(star.mag);

    // cos(i) = 0.5 puts the chord far off the stellar disk.
    let planet = model.synthesize(&star, 0, 1.0, 365.25, 100.0, 0.0, 0.0, 0.5, noise_level);
    assert!(!planet.has_transits);
    assert!(planet.impact > 1.0);
    assert!(planet.duration.is_nan());

    let coverage = CoverageMatrix::uniform(1, 124, 1);
    let det = detection::evaluate(&planet, &coverage, &kepler_criteria());
    assert!(!det.detected);
    assert!(!det.detected_primary);
}

#[test]
fn test_eccentricity_prescriptions_diverge() {
    let noise_level = 45.3;
    let star = quiet_sun();
    let winn = kepler_population();
    let legacy = PopulationModel::new(
        Calibration::Burke15,
        EccentricityPrescription::LegacyLinear,
        DilutionModel::CrowdingFactor,
    )
    .unwrap();

    // Same orbital draws, eccentric orbit: the impact parameter differs.
    let (ecc, omega, cos_incl) = (0.2, std::f64::consts::PI / 6.0, 0.004);
    let pw = winn.synthesize(&star, 0, 1.0, 365.25, 100.0, ecc, omega, cos_incl, noise_level);
    let pl = legacy.synthesize(&star, 0, 1.0, 365.25, 100.0, ecc, omega, cos_incl, noise_level);
    assert!(pw.impact != pl.impact);
    assert!(pw.has_transits && pl.has_transits);

    // Circular orbit: the prescriptions agree.
    let cw = winn.synthesize(&star, 0, 1.0, 365.25, 100.0, 0.0, 1.3, 0.004, noise_level);
    let cl = legacy.synthesize(&star, 0, 1.0, 365.25, 100.0, 0.0, 1.3, 0.004, noise_level);
    assert_relative_eq!(cw.impact, cl.impact, epsilon = 1e-15);
}
