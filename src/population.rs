//! # Synthetic planet population
//!
//! This module expands a star catalog into a table of synthetic planets.
//! Planet counts are Poisson draws at the calibration's per-class rates,
//! (radius, period) pairs come from the occurrence samplers, and every
//! derived transit quantity (geometry, depth, dilution, insolation) is
//! attached to the planet record at generation time. Sibling planets of one
//! star share the star's line-of-sight inclination draw.
//!
//! Draw order is fixed: for each star in catalog order, one `cos i` draw,
//! one planet-count draw, then per planet its (radius, period), epoch,
//! eccentricity and argument of periastron. Two generators seeded alike
//! produce identical tables.
use std::f64::consts::PI;

use rand::Rng;
use rand_distr::{Beta, Distribution, Poisson};
use serde::{Deserialize, Serialize};

use crate::catalog::{Star, StarCatalog, StarCatalogExt};
use crate::constants::{Days, EarthRadius, Kelvin, Ppm, Radian};
use crate::noise::NoiseModel;
use crate::occurrence::{BinSampler, Calibration, M_DWARF_PLANET_RATE};
use crate::transit;
use crate::transit::EccentricityPrescription;
use crate::yieldsim_errors::YieldSimError;

/// Eccentricity Beta-distribution shape, Van Eylen & Albrecht (2015).
const ECCENTRICITY_ALPHA: f64 = 1.03;
const ECCENTRICITY_BETA: f64 = 13.6;

/// Convention used to read the catalog's per-star dilution column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DilutionModel {
    /// Dilution is a contamination ratio; the observed depth is
    /// `depth / (1 + dilution)`.
    #[default]
    ContaminationRatio,
    /// Dilution is a crowding factor; the observed depth is
    /// `depth * dilution`.
    CrowdingFactor,
}

impl DilutionModel {
    /// Apply the convention to an undiluted depth.
    pub fn diluted_depth(&self, depth_ppm: Ppm, dilution: f64) -> Ppm {
        match self {
            DilutionModel::ContaminationRatio => depth_ppm / (1.0 + dilution),
            DilutionModel::CrowdingFactor => depth_ppm * dilution,
        }
    }
}

impl std::str::FromStr for DilutionModel {
    type Err = YieldSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contamination-ratio" => Ok(DilutionModel::ContaminationRatio),
            "crowding-factor" => Ok(DilutionModel::CrowdingFactor),
            _ => Err(YieldSimError::InvalidSurveyParameter(format!(
                "Invalid dilution model: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for DilutionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DilutionModel::ContaminationRatio => "contamination-ratio",
            DilutionModel::CrowdingFactor => "crowding-factor",
        };
        write!(f, "{name}")
    }
}

/// One synthetic planet with its transit quantities.
///
/// `star_row` indexes the catalog (and the coverage matrix row); `star_id`
/// echoes the catalog identifier for output tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub star_id: u64,
    pub star_row: usize,
    pub radius: EarthRadius,
    pub period: Days,
    pub t0: Days,
    pub eccentricity: f64,
    pub omega: Radian,
    pub cos_incl: f64,
    pub a_over_rstar: f64,
    pub radius_ratio: f64,
    pub impact: f64,
    pub duration: Days,
    pub depth_ppm: Ppm,
    pub depth_diluted_ppm: Ppm,
    pub noise_level_ppm: Ppm,
    pub insolation: f64,
    pub has_transits: bool,
}

/// Planet generator for one survey configuration.
///
/// Samplers and distributions are built once at construction; generation
/// validates the catalog up front and is then deterministic in the
/// supplied generator.
#[derive(Debug, Clone)]
pub struct PopulationModel {
    m_dwarf_sampler: BinSampler,
    fgk_sampler: BinSampler,
    m_dwarf_counts: Poisson<f64>,
    fgk_counts: Poisson<f64>,
    eccentricity: Beta<f64>,
    fgk_teff_window: Option<(Kelvin, Kelvin)>,
    eccentricity_prescription: EccentricityPrescription,
    dilution: DilutionModel,
}

impl PopulationModel {
    /// Build the generator for a calibration and the survey's conventions.
    ///
    /// Arguments
    /// -----------------
    /// * `calibration`: occurrence calibration selecting the FGK table, the
    ///   FGK planet rate and any effective-temperature gate.
    /// * `eccentricity_prescription`: impact-parameter eccentricity factor.
    /// * `dilution`: convention for the catalog dilution column.
    ///
    /// Return
    /// ----------
    /// * The generator, or an error if a sampler or distribution cannot be
    ///   constructed.
    pub fn new(
        calibration: Calibration,
        eccentricity_prescription: EccentricityPrescription,
        dilution: DilutionModel,
    ) -> Result<Self, YieldSimError> {
        Ok(Self {
            m_dwarf_sampler: calibration.m_dwarf_sampler()?,
            fgk_sampler: calibration.fgk_sampler()?,
            m_dwarf_counts: Poisson::new(M_DWARF_PLANET_RATE)?,
            fgk_counts: Poisson::new(calibration.fgk_planet_rate())?,
            eccentricity: Beta::new(ECCENTRICITY_ALPHA, ECCENTRICITY_BETA)?,
            fgk_teff_window: calibration.fgk_teff_window(),
            eccentricity_prescription,
            dilution,
        })
    }

    /// Number of planets granted to `star`.
    ///
    /// M dwarfs always draw at the M rate. FGK dwarfs draw at the
    /// calibration rate unless the calibration gates them behind an
    /// effective-temperature window they fall outside of.
    fn planet_count(&self, star: &Star, rng: &mut impl Rng) -> usize {
        if star.is_m_dwarf() {
            return self.m_dwarf_counts.sample(rng) as usize;
        }
        if let Some((teff_lo, teff_hi)) = self.fgk_teff_window {
            if !(star.teff > teff_lo && star.teff < teff_hi) {
                return 0;
            }
        }
        self.fgk_counts.sample(rng) as usize
    }

    /// Expand a catalog into its synthetic planet table.
    ///
    /// The catalog is validated before anything is drawn: a star whose mass
    /// or radius makes the orbital geometry meaningless fails the whole call
    /// instead of yielding non-finite planet records. The per-star noise
    /// level is evaluated once from the star magnitude and copied onto each
    /// of the star's planets.
    ///
    /// Return
    /// ----------
    /// * The planet table, or [`YieldSimError::NonPhysicalStar`] for the
    ///   first star failing the physicality check.
    pub fn generate(
        &self,
        catalog: &StarCatalog,
        noise: &NoiseModel,
        rng: &mut impl Rng,
    ) -> Result<Vec<Planet>, YieldSimError> {
        catalog.ensure_physical()?;
        let mut planets = Vec::new();
        for (star_row, star) in catalog.iter().enumerate() {
            let cos_incl: f64 = rng.random();
            let noise_level_ppm = noise.per_hour(star.mag);
            let count = self.planet_count(star, rng);
            for _ in 0..count {
                let (radius, period) = if star.is_m_dwarf() {
                    self.m_dwarf_sampler.sample(rng)
                } else {
                    self.fgk_sampler.sample(rng)
                };
                let t0 = rng.random::<f64>() * period;
                let eccentricity = self.eccentricity.sample(rng);
                let omega = rng.random_range(-PI..PI);
                planets.push(self.synthesize(
                    star,
                    star_row,
                    radius,
                    period,
                    t0,
                    eccentricity,
                    omega,
                    cos_incl,
                    noise_level_ppm,
                ));
            }
        }
        Ok(planets)
    }

    /// Assemble one planet record from its orbital draws.
    ///
    /// Public so that known planets can be injected into a catalog star and
    /// pushed through the same geometry as generated ones. The star must
    /// pass the physicality check that [`generate`](Self::generate) applies
    /// to whole catalogs; a degenerate mass or radius propagates non-finite
    /// geometry into the record.
    #[allow(clippy::too_many_arguments)]
    pub fn synthesize(
        &self,
        star: &Star,
        star_row: usize,
        radius: EarthRadius,
        period: Days,
        t0: Days,
        eccentricity: f64,
        omega: Radian,
        cos_incl: f64,
        noise_level_ppm: Ppm,
    ) -> Planet {
        let a_over_rstar = transit::semi_major_axis_ratio(period, star.mass, star.radius);
        let radius_ratio = transit::radius_ratio(radius, star.radius);
        let impact = transit::impact_parameter(
            cos_incl,
            a_over_rstar,
            eccentricity,
            omega,
            self.eccentricity_prescription,
        );
        let duration = transit::transit_duration(period, a_over_rstar, cos_incl, impact, radius_ratio);
        let depth_ppm = transit::transit_depth_ppm(radius, star.radius);
        let depth_diluted_ppm = self.dilution.diluted_depth(depth_ppm, star.dilution);
        let insolation = transit::insolation(star.teff, a_over_rstar);
        let has_transits = transit::has_transits(a_over_rstar, impact);
        Planet {
            star_id: star.id,
            star_row,
            radius,
            period,
            t0,
            eccentricity,
            omega,
            cos_incl,
            a_over_rstar,
            radius_ratio,
            impact,
            duration,
            depth_ppm,
            depth_diluted_ppm,
            noise_level_ppm,
            insolation,
            has_transits,
        }
    }
}
