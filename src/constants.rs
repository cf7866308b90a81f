//! # Constants and type definitions for Skywatch
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `skywatch` library.
//!
//! ## Overview
//!
//! - Geophysical constants (WGS84 ellipsoid axes)
//! - Unit conversions (degrees ↔ radians, days ↔ seconds)
//! - Core type aliases used across the crate
//!
//! These definitions are used by all main modules, including frame conversion, the neighbor
//! selector, the conjunction search and the launch risk estimator.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of seconds in a minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Numerical epsilon used for floating-point comparisons
pub const EPS: f64 = 1e-6;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Earth equatorial radius in kilometers (GRS1980/WGS84)
pub const EARTH_MAJOR_AXIS_KM: f64 = 6_378.137;

/// Earth polar radius in kilometers (GRS1980/WGS84)
pub const EARTH_MINOR_AXIS_KM: f64 = 6_356.7523;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Speed in kilometers per second
pub type KilometerPerSecond = f64;
/// Cross-sectional area in square meters
pub type SquareMeter = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
