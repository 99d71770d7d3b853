//! # Realization driver
//!
//! [`Survey`] binds a validated [`SurveyParams`] to its constructed population
//! generator and noise model, then runs Monte Carlo realizations against a
//! catalog and a coverage matrix.
//!
//! A realization is sequential in one generator stream (so a recorded seed
//! replays it exactly); independent realizations run in parallel with seeds
//! derived from a base seed, and results come back in realization order
//! whatever the thread count.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};
#[cfg(feature = "progress")]
use std::time::Duration;

use crate::catalog::{StarCatalog, StarCatalogExt};
use crate::coverage::CoverageMatrix;
use crate::detection::{self, Detection};
use crate::noise::NoiseModel;
use crate::population::{Planet, PopulationModel};
use crate::simulation::{SurveyParams, SurveyParamsBuilder, YieldSummary};
use crate::yieldsim_errors::YieldSimError;

/// One fully expanded realization: the drawn population, its detection
/// records (index-aligned with the planets), and the tallied summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Realization {
    pub planets: Vec<Planet>,
    pub detections: Vec<Detection>,
    pub summary: YieldSummary,
}

/// A survey engine built from validated parameters.
///
/// Construction materializes everything that can fail (occurrence samplers,
/// count and eccentricity distributions, noise fits); running realizations is
/// then infallible apart from the catalog physicality and coverage shape
/// checks on its inputs.
#[derive(Debug, Clone)]
pub struct Survey {
    params: SurveyParams,
    population: PopulationModel,
    noise: NoiseModel,
}

impl Survey {
    /// Build the engine for a configuration.
    ///
    /// The parameters are re-validated, so a hand-assembled [`SurveyParams`]
    /// goes through the same checks as one from the builder.
    ///
    /// Arguments
    /// -----------------
    /// * `params`: survey configuration, preset or custom.
    ///
    /// Return
    /// ----------
    /// * The engine, or the first configuration or construction error.
    pub fn new(params: SurveyParams) -> Result<Self, YieldSimError> {
        let params = SurveyParamsBuilder::from_params(params).build()?;
        let population =
            PopulationModel::new(params.occurrence, params.eccentricity, params.dilution)?;
        let noise = NoiseModel::from_kind(params.noise);
        Ok(Survey {
            params,
            population,
            noise,
        })
    }

    /// The validated configuration this engine runs.
    pub fn params(&self) -> &SurveyParams {
        &self.params
    }

    /// Run one realization with a caller-supplied generator.
    ///
    /// The catalog must pass the physicality check and the coverage matrix
    /// must match the catalog length and the configured epoch count. The
    /// summary's `seed` field is zero here; the caller owns the generator.
    ///
    /// Arguments
    /// -----------------
    /// * `catalog`: host stars, row-aligned with `coverage`
    /// * `coverage`: per-star, per-epoch observation mask
    /// * `rng`: generator driving every draw of the realization
    ///
    /// Return
    /// ----------
    /// * The full [`Realization`] (planets, detections, summary).
    pub fn run_once(
        &self,
        catalog: &StarCatalog,
        coverage: &CoverageMatrix,
        rng: &mut impl Rng,
    ) -> Result<Realization, YieldSimError> {
        self.check_inputs(catalog, coverage)?;
        self.realize(catalog, coverage, rng, 0)
    }

    /// Run `n` independent realizations in parallel.
    ///
    /// Realization `i` runs in its own `StdRng` stream seeded with
    /// `seed + i` (wrapping); the generator's seed expansion decorrelates
    /// consecutive stream seeds. Summaries are returned in realization order
    /// and each records its stream seed, so any realization can be replayed
    /// through [`Survey::run_once`]. Identical inputs produce identical
    /// output regardless of the thread count.
    ///
    /// Arguments
    /// -----------------
    /// * `catalog`: host stars, row-aligned with `coverage`
    /// * `coverage`: per-star, per-epoch observation mask
    /// * `n`: number of realizations
    /// * `seed`: base seed of the realization streams
    ///
    /// Return
    /// ----------
    /// * One [`YieldSummary`] per realization, in realization order.
    #[cfg(not(feature = "progress"))]
    pub fn run_realizations(
        &self,
        catalog: &StarCatalog,
        coverage: &CoverageMatrix,
        n: usize,
        seed: u64,
    ) -> Result<Vec<YieldSummary>, YieldSimError> {
        self.check_inputs(catalog, coverage)?;

        (0..n)
            .into_par_iter()
            .map(|index| {
                let stream = seed.wrapping_add(index as u64);
                let mut rng = StdRng::seed_from_u64(stream);
                let realization = self.realize(catalog, coverage, &mut rng, stream)?;
                Ok(realization.summary)
            })
            .collect()
    }

    /// Run `n` independent realizations in parallel, with a progress bar.
    ///
    /// Identical to the non-`progress` build apart from the bar; see that
    /// version for the seeding and ordering contract.
    #[cfg(feature = "progress")]
    pub fn run_realizations(
        &self,
        catalog: &StarCatalog,
        coverage: &CoverageMatrix,
        n: usize,
        seed: u64,
    ) -> Result<Vec<YieldSummary>, YieldSimError> {
        self.check_inputs(catalog, coverage)?;

        let pb = ProgressBar::new(n.max(1) as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{bar:40.cyan/blue} {pos}/{len} ({percent:>3}%) | {per_sec} | ETA {eta_precise}",
            )
            .expect("indicatif template"),
        );
        pb.enable_steady_tick(Duration::from_millis(200));

        let summaries: Result<Vec<YieldSummary>, YieldSimError> = (0..n)
            .into_par_iter()
            .map(|index| {
                let stream = seed.wrapping_add(index as u64);
                let mut rng = StdRng::seed_from_u64(stream);
                let realization = self.realize(catalog, coverage, &mut rng, stream)?;
                pb.inc(1);
                Ok(realization.summary)
            })
            .collect();

        pb.finish_and_clear();
        summaries
    }

    fn check_inputs(
        &self,
        catalog: &StarCatalog,
        coverage: &CoverageMatrix,
    ) -> Result<(), YieldSimError> {
        catalog.ensure_physical()?;
        coverage.validate(catalog, self.params.epoch_count)
    }

    /// Shape checks already done; the population draw re-validates star
    /// physicality. One generator stream drives the subgiant pass and the
    /// population draw, in that order.
    fn realize(
        &self,
        catalog: &StarCatalog,
        coverage: &CoverageMatrix,
        rng: &mut impl Rng,
        seed: u64,
    ) -> Result<Realization, YieldSimError> {
        let planets = if self.params.subgiant_fraction > 0.0 {
            let mut working = catalog.clone();
            working.inflate_subgiants(self.params.subgiant_fraction, rng);
            self.population.generate(&working, &self.noise, rng)?
        } else {
            self.population.generate(catalog, &self.noise, rng)?
        };
        let detections = detection::evaluate_all(&planets, coverage, &self.params.criteria());
        let summary = YieldSummary::tally(&planets, &detections, seed);
        Ok(Realization {
            planets,
            detections,
            summary,
        })
    }
}
