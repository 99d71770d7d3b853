//! # Constants and type definitions for yieldsim
//!
//! This module centralizes the **physical constants**, **survey reference values**, and **common
//! type definitions** used throughout the `yieldsim` library.
//!
//! ## Overview
//!
//! - Solar and gravitational constants (SI), matching the values the yield calibrations were
//!   derived with
//! - Reference values for insolation and habitability bookkeeping
//! - Unit-documenting type aliases used across the crate
//!
//! These definitions are used by all main modules, including transit geometry, population
//! generation, and detection.

// -------------------------------------------------------------------------------------------------
// Physical constants (SI unless stated otherwise)
// -------------------------------------------------------------------------------------------------

/// Gravitational constant in m^3 kg^-1 s^-2 (CODATA 2010, as used by the yield calibrations)
pub const GRAV: f64 = 6.67384e-11;

/// Solar mass in kilograms
pub const MSUN: f64 = 1.9891e30;

/// Solar radius in meters
pub const RSUN: f64 = 695_500_000.0;

/// Astronomical Unit in meters
pub const AU: f64 = 149_597_870_700.0;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Earth radius expressed in solar radii (R_earth / R_sun)
pub const EARTH_RADIUS_SOLAR: f64 = 0.009155;

// -------------------------------------------------------------------------------------------------
// Survey reference values
// -------------------------------------------------------------------------------------------------

/// Solar effective temperature in Kelvin, reference point of the insolation scaling
pub const TEFF_SUN: f64 = 5771.0;

/// Earth's orbital distance in units of the solar radius, reference point of the insolation scaling
pub const EARTH_SEMI_MAJOR_AXIS_RATIO: f64 = 215.1;

/// Optimistic habitable-zone insolation bounds, in Earth units (inner, outer edge)
pub const HABITABLE_ZONE_INSOLATION: (f64, f64) = (0.32, 1.78);

/// Earth-analog search box: planet radius bounds in Earth radii
pub const EARTH_ANALOG_RADIUS: (f64, f64) = (0.8, 1.2);

/// Earth-analog search box: orbital period bounds in days
pub const EARTH_ANALOG_PERIOD: (f64, f64) = (292.2, 438.3);

/// M-dwarf classification: effective temperature upper bound in Kelvin (strict)
pub const M_DWARF_TEFF_MAX: f64 = 3900.0;

/// M-dwarf classification: stellar radius upper bound in solar radii (strict)
pub const M_DWARF_RADIUS_MAX: f64 = 0.6;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Duration or epoch expressed in days
pub type Days = f64;
/// Effective temperature in Kelvin
pub type Kelvin = f64;
/// Stellar radius in solar radii
pub type SolarRadius = f64;
/// Stellar mass in solar masses
pub type SolarMass = f64;
/// Planet radius in Earth radii
pub type EarthRadius = f64;
/// Photometric signal amplitude in parts per million
pub type Ppm = f64;
