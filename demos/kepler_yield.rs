use std::env;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use yieldsim::catalog::{Star, StarCatalog, StarCatalogExt};
use yieldsim::coverage::KeplerEra;
use yieldsim::occurrence::Calibration;
use yieldsim::simulation::{Survey, SurveyParams, YieldStats};
use yieldsim::yieldsim_errors::YieldSimError;

/// Remove `flag` and its value from `args`, returning the value if present.
fn take_value_flag(args: &mut Vec<String>, flag: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == flag)?;
    args.remove(pos);
    if pos < args.len() {
        Some(args.remove(pos))
    } else {
        None
    }
}

/// Draw a synthetic Kepler-field dwarf catalog.
///
/// Arguments
/// -----------------
/// * `n_stars`: Number of catalog rows.
/// * `rng`: Seeded generator, so a rerun rebuilds the identical catalog.
///
/// Return
/// ----------
/// * The catalog, mostly FGK dwarfs with a small M-dwarf tail, with the
///   dilution column holding a crowding factor near one.
fn synthetic_catalog(n_stars: usize, rng: &mut StdRng) -> StarCatalog {
    (0..n_stars as u64)
        .map(|id| {
            let ecl_lon = rng.random_range(0.0..360.0);
            let ecl_lat = rng.random_range(-60.0..60.0);
            let (teff, radius, mag) = if rng.random::<f64>() < 0.9 {
                (
                    rng.random_range(4800.0..6400.0),
                    rng.random_range(0.7..1.2),
                    rng.random_range(11.0..16.0),
                )
            } else {
                (
                    rng.random_range(3000.0..3900.0),
                    rng.random_range(0.2..0.55),
                    rng.random_range(13.0..16.5),
                )
            };
            Star {
                id,
                // Era coverage ignores coordinates; they only fill the record.
                ra: ecl_lon,
                dec: ecl_lat,
                ecl_lon,
                ecl_lat,
                mag,
                teff,
                radius,
                // Dwarf sequence: mass tracks radius.
                mass: radius,
                dilution: rng.random_range(0.9..=1.0),
                giant: false,
            }
        })
        .collect()
}

/// Kepler-era yield estimate over a synthetic field catalog.
/// Usage:
///   kepler_yield [N_STARS] [N_REALIZATIONS] [--era k1|k2|k1k2]
///                [--calibration NAME] [--seed S] [--verbose]
/// Example:
///   kepler_yield 50000 16 --era k1 --calibration burke15 --verbose
fn main() -> Result<(), YieldSimError> {
    let mut args = env::args().skip(1).collect::<Vec<_>>();
    let verbose = if let Some(pos) = args.iter().position(|a| a == "--verbose") {
        args.remove(pos);
        true
    } else {
        false
    };
    let era = match take_value_flag(&mut args, "--era") {
        Some(v) => v.parse::<KeplerEra>()?,
        None => KeplerEra::K1,
    };
    let calibration = match take_value_flag(&mut args, "--calibration") {
        Some(v) => v.parse::<Calibration>()?,
        None => Calibration::Burke15,
    };
    let seed = match take_value_flag(&mut args, "--seed") {
        Some(v) => v.parse::<u64>().map_err(|_| {
            YieldSimError::InvalidSurveyParameter("--seed expects an integer".to_string())
        })?,
        None => 42,
    };
    let n_stars = args
        .first()
        .and_then(|a| a.parse().ok())
        .unwrap_or(50_000usize);
    let n_realizations = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(16usize);

    let params = SurveyParams::kepler(calibration);
    println!("{params:#}");

    let mut rng = StdRng::seed_from_u64(seed);
    let catalog = synthetic_catalog(n_stars, &mut rng);
    let coverage = era.coverage(catalog.len());
    println!(
        "catalog: {} stars ({} M dwarfs), era {era}: {} of {} quarters observed",
        catalog.len(),
        catalog.m_dwarf_count(),
        era.epoch_mask().iter().filter(|&&q| q).count(),
        coverage.n_epochs()
    );

    let survey = Survey::new(params)?;

    if verbose {
        let mut once_rng = StdRng::seed_from_u64(seed);
        let realization = survey.run_once(&catalog, &coverage, &mut once_rng)?;
        for (planet, det) in realization.planets.iter().zip(&realization.detections) {
            if det.detected {
                eprintln!(
                    "[kepler_yield] star {:>7}  P = {:8.2} d  Rp = {:5.2} Re  \
                     snr = {:8.1}  transits = {:3}",
                    planet.star_id, planet.period, planet.radius, det.snr, det.n_transits
                );
            }
        }
        eprintln!("[kepler_yield] single realization: {}", realization.summary);
    }

    let summaries = survey.run_realizations(&catalog, &coverage, n_realizations, seed)?;
    if let Some(stats) = YieldStats::from_summaries(&summaries) {
        println!("detected planets over {n_realizations} realizations:");
        println!("{stats:#}");
    }

    Ok(())
}
