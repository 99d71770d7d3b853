//! # Transit geometry
//!
//! Closed-form relations between a planet's orbit, its host star, and the photometric transit
//! signature. All functions are pure and operate on scalar `f64` inputs; units follow the
//! aliases in [`crate::constants`] (periods and durations in days, radii in solar or Earth
//! units, depths in ppm).
//!
//! The semi-major axis is computed in SI internally from Kepler's third law and immediately
//! normalized by the stellar radius, so no length unit ever escapes this module.

use crate::constants::{
    Days, EarthRadius, Kelvin, Ppm, SolarMass, SolarRadius, EARTH_RADIUS_SOLAR,
    EARTH_SEMI_MAJOR_AXIS_RATIO, GRAV, MSUN, RSUN, SECONDS_PER_DAY, TEFF_SUN,
};
use crate::yieldsim_errors::YieldSimError;

/// Which eccentricity correction enters the impact parameter.
///
/// The reference survey code computed the correction as `(1 - e^2) + e sin(omega)` where the
/// accompanying citation intends the quotient `(1 - e^2) / (1 + e sin(omega))`. Both forms are
/// available so that catalogs produced with the earlier expression can be reproduced bit for
/// bit; they agree at `e = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EccentricityPrescription {
    /// Quotient form `(1 - e^2) / (1 + e sin(omega))` (Winn 2010, eq. 7).
    #[default]
    Winn2010,
    /// Additive form `(1 - e^2) + e sin(omega)`, as published.
    LegacyLinear,
}

impl std::str::FromStr for EccentricityPrescription {
    type Err = YieldSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "winn2010" => Ok(EccentricityPrescription::Winn2010),
            "legacy-linear" => Ok(EccentricityPrescription::LegacyLinear),
            _ => Err(YieldSimError::InvalidSurveyParameter(format!(
                "Invalid eccentricity prescription: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for EccentricityPrescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EccentricityPrescription::Winn2010 => "winn2010",
            EccentricityPrescription::LegacyLinear => "legacy-linear",
        };
        write!(f, "{name}")
    }
}

/// Orbital semi-major axis in units of the stellar radius.
///
/// Kepler's third law evaluated in SI: `a^3 = P^2 G M / (4 pi^2)`, then divided by the stellar
/// radius.
///
/// Arguments
/// -----------------
/// * `period`: orbital period in days
/// * `mass`: stellar mass in solar masses
/// * `rstar`: stellar radius in solar radii
///
/// Return
/// ----------
/// * `a / R_star`, dimensionless
pub fn semi_major_axis_ratio(period: Days, mass: SolarMass, rstar: SolarRadius) -> f64 {
    let period_si = period * SECONDS_PER_DAY;
    let mass_si = mass * MSUN;
    let a3 = period_si * period_si * GRAV * mass_si / (4.0 * std::f64::consts::PI.powi(2));
    a3.powf(1.0 / 3.0) / (rstar * RSUN)
}

/// Planet-to-star radius ratio `Rp / R_star`.
pub fn radius_ratio(planet_radius: EarthRadius, rstar: SolarRadius) -> f64 {
    planet_radius * EARTH_RADIUS_SOLAR / rstar
}

/// Transit depth in parts per million, `(Rp / R_star)^2 * 1e6`.
pub fn transit_depth_ppm(planet_radius: EarthRadius, rstar: SolarRadius) -> Ppm {
    let rprs = radius_ratio(planet_radius, rstar);
    rprs * rprs * 1e6
}

/// Impact parameter of the transit chord, in stellar radii.
///
/// `b = cos(i) * (a / R_star) * f(e, omega)` with `f` selected by the prescription.
///
/// Arguments
/// -----------------
/// * `cos_incl`: cosine of the orbital inclination
/// * `ars`: semi-major axis over stellar radius
/// * `ecc`: orbital eccentricity
/// * `omega`: argument of periastron in radians
/// * `prescription`: eccentricity correction form, see [`EccentricityPrescription`]
///
/// See also
/// ------------
/// * [`transit_duration`] – consumes the impact parameter
pub fn impact_parameter(
    cos_incl: f64,
    ars: f64,
    ecc: f64,
    omega: f64,
    prescription: EccentricityPrescription,
) -> f64 {
    let correction = match prescription {
        EccentricityPrescription::Winn2010 => (1.0 - ecc * ecc) / (1.0 + ecc * omega.sin()),
        EccentricityPrescription::LegacyLinear => (1.0 - ecc * ecc) + ecc * omega.sin(),
    };
    cos_incl * ars * correction
}

/// Transit duration in days.
///
/// `T = (P / pi) * asin((1 / ars) * sqrt((1 + Rp/Rs)^2 - b^2) / sin(i))`
///
/// The expression is only meaningful for transiting geometries (`ars > 1`, `b < 1`); outside
/// that domain the square roots go imaginary and the result is NaN. Callers gate on the
/// transit condition before using the value.
///
/// Arguments
/// -----------------
/// * `period`: orbital period in days
/// * `ars`: semi-major axis over stellar radius
/// * `cos_incl`: cosine of the orbital inclination
/// * `b`: impact parameter in stellar radii
/// * `rprs`: planet-to-star radius ratio
pub fn transit_duration(period: Days, ars: f64, cos_incl: f64, b: f64, rprs: f64) -> Days {
    let chord = ((1.0 + rprs) * (1.0 + rprs) - b * b).sqrt();
    let sin_incl = (1.0 - cos_incl * cos_incl).sqrt();
    (period / std::f64::consts::PI) * ((1.0 / ars) * chord / sin_incl).asin()
}

/// Bolometric insolation received by the planet, in Earth units.
///
/// `S = (Teff / 5771)^4 * (215.1 / ars)^2`, so a planet at 1 au around a solar twin
/// receives 1.0.
pub fn insolation(teff: Kelvin, ars: f64) -> f64 {
    let t = (teff / TEFF_SUN).powi(4);
    let d = (EARTH_SEMI_MAJOR_AXIS_RATIO / ars).powi(2);
    t * d
}

/// Transit condition: the planet's disk crosses the stellar limb.
///
/// Both comparisons are strict; a grazing configuration with `b == 1` or an orbit skimming
/// the photosphere with `ars == 1` does not transit.
pub fn has_transits(ars: f64, impact: f64) -> bool {
    ars > 1.0 && impact < 1.0
}

#[cfg(test)]
mod test_transit {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_earth_sun_semi_major_axis_ratio() {
        let ars = semi_major_axis_ratio(365.25, 1.0, 1.0);
        assert_relative_eq!(ars, 215.11122203472868, epsilon = 1e-9);
    }

    #[test]
    fn test_semi_major_axis_scaling() {
        // a/Rs scales as P^(2/3) M^(1/3) / Rs
        let base = semi_major_axis_ratio(10.0, 1.0, 1.0);
        assert_relative_eq!(
            semi_major_axis_ratio(80.0, 1.0, 1.0),
            base * 4.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            semi_major_axis_ratio(10.0, 8.0, 1.0),
            base * 2.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            semi_major_axis_ratio(10.0, 1.0, 2.0),
            base / 2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_earth_sun_depth_and_ratio() {
        assert_relative_eq!(radius_ratio(1.0, 1.0), 0.009155, epsilon = 1e-15);
        assert_relative_eq!(transit_depth_ppm(1.0, 1.0), 83.814025, epsilon = 1e-9);
        // Depth scales with the inverse square of the stellar radius.
        assert_relative_eq!(
            transit_depth_ppm(1.0, 2.0),
            83.814025 / 4.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_earth_sun_duration() {
        let ars = semi_major_axis_ratio(365.25, 1.0, 1.0);
        let dur = transit_duration(365.25, ars, 0.0, 0.0, 0.009155);
        assert_relative_eq!(dur, 0.5454271519515641, epsilon = 1e-12);
    }

    #[test]
    fn test_duration_off_center_chord() {
        let dur = transit_duration(3.0, 8.0, 0.05, 0.4, 0.1);
        assert_relative_eq!(dur, 0.12280536435395988, epsilon = 1e-12);
    }

    #[test]
    fn test_impact_prescriptions() {
        let (cosi, ars, e, w) = (0.3, 10.0, 0.2, std::f64::consts::PI / 6.0);
        let linear = impact_parameter(cosi, ars, e, w, EccentricityPrescription::LegacyLinear);
        let winn = impact_parameter(cosi, ars, e, w, EccentricityPrescription::Winn2010);
        assert_relative_eq!(linear, 3.18, epsilon = 1e-12);
        assert_relative_eq!(winn, 2.6181818181818177, epsilon = 1e-12);
        assert!(linear != winn);
    }

    #[test]
    fn test_impact_prescriptions_agree_for_circular_orbits() {
        let linear = impact_parameter(0.4, 12.0, 0.0, 1.3, EccentricityPrescription::LegacyLinear);
        let winn = impact_parameter(0.4, 12.0, 0.0, 1.3, EccentricityPrescription::Winn2010);
        assert_relative_eq!(linear, winn, epsilon = 1e-15);
        assert_relative_eq!(linear, 0.4 * 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_prescription_names_round_trip() {
        for p in [
            EccentricityPrescription::Winn2010,
            EccentricityPrescription::LegacyLinear,
        ] {
            assert_eq!(p.to_string().parse::<EccentricityPrescription>().unwrap(), p);
        }
        assert!("winn".parse::<EccentricityPrescription>().is_err());
    }

    #[test]
    fn test_earth_insolation() {
        let ars = semi_major_axis_ratio(365.25, 1.0, 1.0);
        assert_relative_eq!(insolation(5771.0, ars), 0.9998956656756066, epsilon = 1e-12);
        // Hotter star at the same separation: S scales as Teff^4.
        assert_relative_eq!(
            insolation(2.0 * 5771.0, ars),
            16.0 * 0.9998956656756066,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_transit_condition_is_strict() {
        assert!(!has_transits(1.0, 0.0));
        assert!(!has_transits(215.1, 1.0));
        assert!(!has_transits(0.9, 0.5));
        assert!(has_transits(1.0000001, 0.999999));
    }
}
