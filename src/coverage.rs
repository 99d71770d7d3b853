//! # Sky coverage
//!
//! This module holds the **star-by-epoch coverage matrix**: one row per
//! catalog star, one column per observing epoch, a nonzero entry meaning the
//! star is on silicon during that epoch. Coverage is either supplied directly
//! (row-major values, a shared epoch mask, or the built-in Kepler quarter
//! masks) or computed from star coordinates by a [`CoverageResolver`].
//!
//! The entry values themselves are opaque to the detection engine; only
//! zero versus nonzero matters. Resolvers are free to store a camera number
//! or any other footprint tag.
use nalgebra::DMatrix;

use crate::catalog::StarCatalog;
use crate::constants::Degree;
use crate::yieldsim_errors::YieldSimError;

/// Quarters in the Kepler coverage grid, Q1 2009 through Q4 2030.
pub const KEPLER_QUARTERS: usize = 4 * 31;

/// Entry written by [`EclipticRectangles`] for an observed (star, epoch).
const OBSERVED_MARK: u8 = 9;

/// Star-by-epoch observation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageMatrix {
    observed: DMatrix<u8>,
}

impl CoverageMatrix {
    /// Build a coverage matrix from row-major entries.
    ///
    /// Arguments
    /// -----------------
    /// * `n_stars`: number of rows (stars).
    /// * `n_epochs`: number of columns (epochs).
    /// * `values`: `n_stars * n_epochs` entries, star-major.
    ///
    /// Return
    /// ----------
    /// * The matrix, or [`YieldSimError::CoverageShapeMismatch`] when the
    ///   value count does not match the requested shape.
    pub fn from_row_major(
        n_stars: usize,
        n_epochs: usize,
        values: Vec<u8>,
    ) -> Result<Self, YieldSimError> {
        if values.len() != n_stars * n_epochs {
            return Err(YieldSimError::CoverageShapeMismatch {
                values: values.len(),
                stars: n_stars,
                epochs: n_epochs,
            });
        }
        Ok(Self {
            observed: DMatrix::from_row_slice(n_stars, n_epochs, &values),
        })
    }

    /// Every star observed in every epoch with the same entry value.
    pub fn uniform(n_stars: usize, n_epochs: usize, value: u8) -> Self {
        Self {
            observed: DMatrix::from_element(n_stars, n_epochs, value),
        }
    }

    /// Tile a single epoch mask over all stars: the whole catalog shares the
    /// same observing seasons.
    pub fn from_epoch_mask(n_stars: usize, mask: &[bool]) -> Self {
        let observed = DMatrix::from_fn(n_stars, mask.len(), |_, epoch| u8::from(mask[epoch]));
        Self { observed }
    }

    pub fn n_stars(&self) -> usize {
        self.observed.nrows()
    }

    pub fn n_epochs(&self) -> usize {
        self.observed.ncols()
    }

    /// Is `star` on silicon during `epoch`?
    #[inline]
    pub fn is_observed(&self, star: usize, epoch: usize) -> bool {
        self.observed[(star, epoch)] != 0
    }

    /// Number of epochs in which `star` is observed.
    pub fn observed_epochs(&self, star: usize) -> usize {
        self.observed.row(star).iter().filter(|&&v| v != 0).count()
    }

    /// Check this matrix against a catalog and an epoch count.
    pub fn validate(
        &self,
        catalog: &StarCatalog,
        epoch_count: usize,
    ) -> Result<(), YieldSimError> {
        if self.n_stars() != catalog.len() {
            return Err(YieldSimError::CoverageRowMismatch {
                rows: self.n_stars(),
                stars: catalog.len(),
            });
        }
        if self.n_epochs() != epoch_count {
            return Err(YieldSimError::CoverageEpochMismatch {
                cols: self.n_epochs(),
                expected: epoch_count,
            });
        }
        Ok(())
    }
}

/// Kepler observing eras over the [`KEPLER_QUARTERS`] grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeplerEra {
    /// Prime mission, grid quarters 1 through 17.
    K1,
    /// K2 campaigns, the last 20 grid quarters.
    K2,
    /// Both eras.
    K1K2,
}

impl KeplerEra {
    /// The quarters this era observes, as an epoch mask of length
    /// [`KEPLER_QUARTERS`].
    pub fn epoch_mask(self) -> Vec<bool> {
        let mut mask = vec![false; KEPLER_QUARTERS];
        if matches!(self, KeplerEra::K1 | KeplerEra::K1K2) {
            for active in mask.iter_mut().take(18).skip(1) {
                *active = true;
            }
        }
        if matches!(self, KeplerEra::K2 | KeplerEra::K1K2) {
            let n = mask.len();
            for active in mask.iter_mut().skip(n - 20) {
                *active = true;
            }
        }
        mask
    }

    /// Tile this era's mask over a catalog.
    pub fn coverage(self, n_stars: usize) -> CoverageMatrix {
        CoverageMatrix::from_epoch_mask(n_stars, &self.epoch_mask())
    }
}

impl std::str::FromStr for KeplerEra {
    type Err = YieldSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "k1" => Ok(KeplerEra::K1),
            "k2" => Ok(KeplerEra::K2),
            "k1k2" => Ok(KeplerEra::K1K2),
            _ => Err(YieldSimError::InvalidSurveyParameter(format!(
                "Invalid Kepler era: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for KeplerEra {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            KeplerEra::K1 => "k1",
            KeplerEra::K2 => "k2",
            KeplerEra::K1K2 => "k1k2",
        };
        write!(f, "{name}")
    }
}

/// Strategy computing a coverage matrix from star coordinates.
///
/// The built-in [`EclipticRectangles`] resolver covers idealized scanning
/// surveys; pointing tables from external footprint tools plug in through the
/// same seam.
pub trait CoverageResolver {
    fn resolve(
        &self,
        catalog: &StarCatalog,
        epoch_count: usize,
    ) -> Result<CoverageMatrix, YieldSimError>;
}

/// Idealized scanning survey: each epoch observes one rectangle of ecliptic
/// longitude within a latitude band, and the rectangle advances by a fixed
/// longitude step per epoch, wrapping at 360 degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct EclipticRectangles {
    /// Leading longitude edge of the first epoch's rectangle, degrees.
    pub start_longitude: Degree,
    /// Longitude width of the rectangle, degrees.
    pub sector_width: Degree,
    /// Half-height of the covered latitude band, degrees.
    pub latitude_band: Degree,
    /// Longitude advance between consecutive epochs, degrees.
    pub advance_per_epoch: Degree,
}

impl Default for EclipticRectangles {
    fn default() -> Self {
        Self {
            start_longitude: 0.0,
            sector_width: 96.0,
            latitude_band: 12.0,
            advance_per_epoch: 27.7,
        }
    }
}

impl CoverageResolver for EclipticRectangles {
    fn resolve(
        &self,
        catalog: &StarCatalog,
        epoch_count: usize,
    ) -> Result<CoverageMatrix, YieldSimError> {
        if !(self.sector_width > 0.0 && self.sector_width <= 360.0) {
            return Err(YieldSimError::InvalidSurveyParameter(format!(
                "sector width must be in (0, 360] degrees, got {}",
                self.sector_width
            )));
        }
        if !(self.latitude_band >= 0.0) || !self.start_longitude.is_finite()
            || !self.advance_per_epoch.is_finite()
        {
            return Err(YieldSimError::InvalidSurveyParameter(
                "ecliptic rectangle parameters must be finite with a non-negative latitude band"
                    .to_string(),
            ));
        }

        let mut values = vec![0u8; catalog.len() * epoch_count];
        for (star_row, star) in catalog.iter().enumerate() {
            if star.ecl_lat.abs() > self.latitude_band {
                continue;
            }
            for epoch in 0..epoch_count {
                let leading_edge = (self.start_longitude
                    + self.advance_per_epoch * epoch as f64)
                    .rem_euclid(360.0);
                let relative_lon = (star.ecl_lon - leading_edge).rem_euclid(360.0);
                if relative_lon < self.sector_width {
                    values[star_row * epoch_count + epoch] = OBSERVED_MARK;
                }
            }
        }
        CoverageMatrix::from_row_major(catalog.len(), epoch_count, values)
    }
}

#[cfg(test)]
mod test_coverage {
    use super::*;
    use crate::catalog::Star;

    fn star_at(ecl_lon: f64, ecl_lat: f64) -> Star {
        Star {
            id: 1,
            ra: 0.0,
            dec: 0.0,
            ecl_lon,
            ecl_lat,
            mag: 10.0,
            teff: 5700.0,
            radius: 1.0,
            mass: 1.0,
            dilution: 0.0,
            giant: false,
        }
    }

    #[test]
    fn test_from_row_major_shape() {
        let matrix = CoverageMatrix::from_row_major(2, 3, vec![1, 0, 9, 0, 0, 1]).unwrap();
        assert_eq!(matrix.n_stars(), 2);
        assert_eq!(matrix.n_epochs(), 3);
        assert!(matrix.is_observed(0, 0));
        assert!(!matrix.is_observed(0, 1));
        assert!(matrix.is_observed(0, 2));
        assert_eq!(matrix.observed_epochs(0), 2);
        assert_eq!(matrix.observed_epochs(1), 1);

        let bad = CoverageMatrix::from_row_major(2, 3, vec![1, 0]);
        assert_eq!(
            bad.unwrap_err(),
            YieldSimError::CoverageShapeMismatch {
                values: 2,
                stars: 2,
                epochs: 3
            }
        );
    }

    #[test]
    fn test_epoch_mask_is_tiled_over_stars() {
        let matrix = CoverageMatrix::from_epoch_mask(3, &[true, false, true, false]);
        for star in 0..3 {
            assert!(matrix.is_observed(star, 0));
            assert!(!matrix.is_observed(star, 1));
            assert_eq!(matrix.observed_epochs(star), 2);
        }
    }

    #[test]
    fn test_validate_against_catalog() {
        let catalog = vec![star_at(0.0, 0.0), star_at(10.0, 0.0)];
        let matrix = CoverageMatrix::uniform(2, 5, 1);
        assert!(matrix.validate(&catalog, 5).is_ok());
        assert_eq!(
            matrix.validate(&catalog, 6).unwrap_err(),
            YieldSimError::CoverageEpochMismatch {
                cols: 5,
                expected: 6
            }
        );
        let short = vec![star_at(0.0, 0.0)];
        assert_eq!(
            matrix.validate(&short, 5).unwrap_err(),
            YieldSimError::CoverageRowMismatch { rows: 2, stars: 1 }
        );
    }

    #[test]
    fn test_kepler_era_masks() {
        let k1 = KeplerEra::K1.epoch_mask();
        assert_eq!(k1.len(), KEPLER_QUARTERS);
        assert_eq!(k1.iter().filter(|&&q| q).count(), 17);
        assert!(!k1[0]);
        assert!(k1[1] && k1[17]);
        assert!(!k1[18]);

        let k2 = KeplerEra::K2.epoch_mask();
        assert_eq!(k2.iter().filter(|&&q| q).count(), 20);
        assert!(k2[KEPLER_QUARTERS - 20] && k2[KEPLER_QUARTERS - 1]);
        assert!(!k2[KEPLER_QUARTERS - 21]);

        let both = KeplerEra::K1K2.epoch_mask();
        assert_eq!(both.iter().filter(|&&q| q).count(), 37);

        let coverage = KeplerEra::K1K2.coverage(4);
        assert_eq!(coverage.n_stars(), 4);
        assert_eq!(coverage.n_epochs(), KEPLER_QUARTERS);
        assert_eq!(coverage.observed_epochs(3), 37);
    }

    #[test]
    fn test_kepler_era_round_trip() {
        for name in ["k1", "k2", "k1k2"] {
            let era: KeplerEra = name.parse().unwrap();
            assert_eq!(era.to_string(), name);
        }
        assert!("k3".parse::<KeplerEra>().is_err());
    }

    #[test]
    fn test_ecliptic_rectangles_follow_the_scan() {
        let catalog = vec![
            star_at(10.0, 0.0),
            star_at(200.0, 5.0),
            star_at(10.0, 20.0),
            star_at(10.0, -20.0),
            star_at(10.0, 12.0),
        ];
        let resolver = EclipticRectangles::default();
        let coverage = resolver.resolve(&catalog, 13).unwrap();

        // Epoch 0 covers longitudes [0, 96).
        assert!(coverage.is_observed(0, 0));
        assert!(!coverage.is_observed(1, 0));
        // The rectangle reaches longitude 200 once it has advanced far enough.
        assert!((0..13).any(|epoch| coverage.is_observed(1, epoch)));
        // Outside the latitude band on either side, never observed.
        assert_eq!(coverage.observed_epochs(2), 0);
        assert_eq!(coverage.observed_epochs(3), 0);
        // The band edge itself is covered.
        assert!(coverage.is_observed(4, 0));
    }

    #[test]
    fn test_ecliptic_rectangles_wrap_at_360() {
        let resolver = EclipticRectangles {
            start_longitude: 312.0,
            ..EclipticRectangles::default()
        };
        let catalog = vec![star_at(30.0, 0.0), star_at(250.0, 0.0)];
        let coverage = resolver.resolve(&catalog, 1).unwrap();
        // [312, 360) U [0, 48) contains 30 but not 250.
        assert!(coverage.is_observed(0, 0));
        assert!(!coverage.is_observed(1, 0));
    }

    #[test]
    fn test_ecliptic_rectangles_reject_bad_width() {
        let resolver = EclipticRectangles {
            sector_width: 0.0,
            ..EclipticRectangles::default()
        };
        assert!(matches!(
            resolver.resolve(&vec![star_at(0.0, 0.0)], 1),
            Err(YieldSimError::InvalidSurveyParameter(_))
        ));
    }
}
