//! Conversions from the internal SI representation to the public units.
//!
//! Every function is total over `Option`: a value that is not available
//! stays not available.

use std::f64::consts::PI;

pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;
pub const KNOTS_PER_MS: f64 = 3600.0 / METERS_PER_NAUTICAL_MILE;
pub const KELVIN_OFFSET: f64 = 273.15;
pub const RAD_TO_DEG: f64 = 180.0 / PI;

pub fn rad_to_deg(value: Option<f64>) -> Option<f64> {
    value.map(|v| v * RAD_TO_DEG)
}

pub fn ms_to_knots(value: Option<f64>) -> Option<f64> {
    value.map(|v| v * KNOTS_PER_MS)
}

pub fn meters_to_nm(value: Option<f64>) -> Option<f64> {
    meters_to_scaled_nm(value, METERS_PER_NAUTICAL_MILE)
}

/// Distance divided by `meters_per_mile`, for odometers that count in a
/// legacy mile length.
pub fn meters_to_scaled_nm(value: Option<f64>, meters_per_mile: f64) -> Option<f64> {
    value.map(|v| v / meters_per_mile)
}

pub fn kelvin_to_celsius(value: Option<f64>) -> Option<f64> {
    value.map(|v| v - KELVIN_OFFSET)
}

// wrap an angle in degrees into [0, 360)
pub fn normalize0_360(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Wrap an angle in radians into [0, 2π), going through degrees like every
/// published angle.
pub fn normalize_radians(angle: f64) -> f64 {
    normalize0_360(angle * RAD_TO_DEG).to_radians()
}
