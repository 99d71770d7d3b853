//! # Stellar catalogs
//!
//! Input side of the simulation: a [`StarCatalog`] is an ordered vector of [`Star`] records
//! whose row order must line up with the rows of the epoch-coverage matrix. The
//! [`StarCatalogExt`] trait adds catalog-level operations: physics validation, class counting,
//! and the optional subgiant radius-inflation pass applied before a realization.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    Days, Degree, Kelvin, SolarMass, SolarRadius, M_DWARF_RADIUS_MAX, M_DWARF_TEFF_MAX,
};
use crate::yieldsim_errors::YieldSimError;

/// One catalog star.
///
/// `dilution` is the per-star flux-dilution figure; whether it is a contamination ratio
/// (divide the depth by `1 + dilution`) or a crowding factor (multiply the depth by it) is
/// decided by the survey configuration, not by the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    /// Catalog identifier.
    pub id: u64,
    /// Right ascension in degrees.
    pub ra: Degree,
    /// Declination in degrees.
    pub dec: Degree,
    /// Ecliptic longitude in degrees (consumed by scanning-law coverage builders).
    pub ecl_lon: Degree,
    /// Ecliptic latitude in degrees.
    pub ecl_lat: Degree,
    /// Apparent magnitude in the survey bandpass.
    pub mag: f64,
    /// Effective temperature in Kelvin.
    pub teff: Kelvin,
    /// Stellar radius in solar radii.
    pub radius: SolarRadius,
    /// Stellar mass in solar masses.
    pub mass: SolarMass,
    /// Flux dilution figure, interpreted per the survey's dilution convention.
    pub dilution: f64,
    /// Evolved-star flag carried over from catalog preparation; not used in selection.
    pub giant: bool,
}

impl Star {
    /// M-dwarf classification used to pick the occurrence-rate table and planet
    /// multiplicity rate.
    ///
    /// Both comparisons are strict: a 3900 K star or a 0.6 Rsun star is not an M dwarf.
    pub fn is_m_dwarf(&self) -> bool {
        self.teff < M_DWARF_TEFF_MAX && self.radius < M_DWARF_RADIUS_MAX
    }

    /// None if the star can host the transit geometry computation, otherwise the reason
    /// it cannot.
    pub(crate) fn physical_flaw(&self) -> Option<String> {
        if !(self.mass > 0.0) || !self.mass.is_finite() {
            return Some(format!("stellar mass {} must be positive", self.mass));
        }
        if !(self.radius > 0.0) || !self.radius.is_finite() {
            return Some(format!("stellar radius {} must be positive", self.radius));
        }
        None
    }
}

/// An ordered stellar catalog, row-aligned with the coverage matrix.
pub type StarCatalog = Vec<Star>;

/// Catalog-level operations on [`StarCatalog`].
pub trait StarCatalogExt {
    /// Fail with [`YieldSimError::NonPhysicalStar`] on the first star whose mass or radius
    /// makes the orbital geometry meaningless.
    fn ensure_physical(&self) -> Result<(), YieldSimError>;

    /// Number of stars classified as M dwarfs.
    fn m_dwarf_count(&self) -> usize;

    /// Subgiant contamination pass: each non-M-dwarf star is flagged with probability
    /// `fraction` and has its radius doubled, modeling evolved stars hiding in the dwarf
    /// sample. One uniform draw is consumed per star regardless of class. Returns the
    /// number of inflated stars.
    fn inflate_subgiants(&mut self, fraction: f64, rng: &mut impl Rng) -> usize;
}

impl StarCatalogExt for StarCatalog {
    fn ensure_physical(&self) -> Result<(), YieldSimError> {
        for star in self {
            if let Some(reason) = star.physical_flaw() {
                return Err(YieldSimError::NonPhysicalStar {
                    star_id: star.id,
                    reason,
                });
            }
        }
        Ok(())
    }

    fn m_dwarf_count(&self) -> usize {
        self.iter().filter(|s| s.is_m_dwarf()).count()
    }

    fn inflate_subgiants(&mut self, fraction: f64, rng: &mut impl Rng) -> usize {
        let mut inflated = 0;
        for star in self.iter_mut() {
            let flagged = rng.random::<f64>() < fraction;
            if flagged && !star.is_m_dwarf() {
                star.radius *= 2.0;
                inflated += 1;
            }
        }
        inflated
    }
}

/// Mission timeline: total duration covered by the epoch grid, in days.
pub fn mission_duration(epoch_length: Days, epoch_count: usize) -> Days {
    epoch_length * epoch_count as f64
}
