use std::env;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use yieldsim::catalog::{Star, StarCatalog, StarCatalogExt};
use yieldsim::coverage::{CoverageResolver, EclipticRectangles};
use yieldsim::simulation::{Survey, SurveyParams, YieldStats};
use yieldsim::yieldsim_errors::YieldSimError;

/// Draw a synthetic all-sky dwarf catalog.
///
/// Arguments
/// -----------------
/// * `n_stars`: Number of catalog rows.
/// * `rng`: Seeded generator, so a rerun rebuilds the identical catalog.
///
/// Return
/// ----------
/// * The catalog, roughly 70% FGK dwarfs and 30% M dwarfs, with the dilution
///   column holding a contamination ratio.
fn synthetic_catalog(n_stars: usize, rng: &mut StdRng) -> StarCatalog {
    (0..n_stars as u64)
        .map(|id| {
            let ecl_lon = rng.random_range(0.0..360.0);
            let ecl_lat = rng.random_range(-60.0..60.0);
            let (teff, radius, mag) = if rng.random::<f64>() < 0.7 {
                (
                    rng.random_range(4100.0..6600.0),
                    rng.random_range(0.7..1.3),
                    rng.random_range(8.0..13.0),
                )
            } else {
                (
                    rng.random_range(2800.0..3900.0),
                    rng.random_range(0.15..0.55),
                    rng.random_range(10.0..15.0),
                )
            };
            Star {
                id,
                // The scanning resolver only reads the ecliptic pair.
                ra: ecl_lon,
                dec: ecl_lat,
                ecl_lon,
                ecl_lat,
                mag,
                teff,
                radius,
                // Dwarf sequence: mass tracks radius.
                mass: radius,
                dilution: rng.random_range(0.0..0.3),
                giant: false,
            }
        })
        .collect()
}

/// Yield estimate for the TESS extended-mission configuration over a
/// synthetic catalog and an idealized scanning law.
/// Usage:
///   tess_extended_yield [N_STARS] [N_REALIZATIONS] [--seed S] [--verbose]
/// Example:
///   tess_extended_yield 20000 32 --seed 7 --verbose
fn main() -> Result<(), YieldSimError> {
    let mut args = env::args().skip(1).collect::<Vec<_>>();
    let verbose = if let Some(pos) = args.iter().position(|a| a == "--verbose") {
        args.remove(pos);
        true
    } else {
        false
    };
    let mut seed = 42u64;
    if let Some(pos) = args.iter().position(|a| a == "--seed") {
        args.remove(pos);
        if pos < args.len() {
            seed = args.remove(pos).parse().map_err(|_| {
                YieldSimError::InvalidSurveyParameter("--seed expects an integer".to_string())
            })?;
        }
    }
    let n_stars = args
        .first()
        .and_then(|a| a.parse().ok())
        .unwrap_or(20_000usize);
    let n_realizations = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(32usize);

    let params = SurveyParams::tess_extended();
    println!("{params:#}");

    let mut rng = StdRng::seed_from_u64(seed);
    let catalog = synthetic_catalog(n_stars, &mut rng);
    let coverage = EclipticRectangles::default().resolve(&catalog, params.epoch_count)?;
    println!(
        "catalog: {} stars ({} M dwarfs)",
        catalog.len(),
        catalog.m_dwarf_count()
    );

    let survey = Survey::new(params)?;
    let summaries = survey.run_realizations(&catalog, &coverage, n_realizations, seed)?;

    if verbose {
        for summary in &summaries {
            eprintln!("[tess_extended_yield] {summary}");
        }
    }

    if let Some(stats) = YieldStats::from_summaries(&summaries) {
        println!("detected planets over {n_realizations} realizations:");
        println!("{stats:#}");
    }

    Ok(())
}
