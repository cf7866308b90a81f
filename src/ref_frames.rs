//! # Reference frame conversion helpers
//!
//! Conversions from the SGP4-native inertial frame (TEME) to the Earth-fixed rotating
//! frame and to geodetic coordinates, plus the single distance metric used by the
//! conjunction engine.
//!
//! ## Overview
//! -----------------
//! - [`gmst`] — Greenwich Mean Sidereal Time from a Modified Julian Date (IAU 1982).
//! - [`eci_to_ecf`] — rotate an inertial state into the Earth-fixed frame.
//! - [`eci_to_geodetic`] — geodetic latitude/longitude/altitude on the WGS84 ellipsoid.
//! - [`separation_km`] — straight-line Euclidean separation in kilometers. This is the
//!   only distance metric used; no great-circle or relative-orbit-frame corrections.

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::constants::{
    Degree, Kilometer, Radian, DPI, EARTH_MAJOR_AXIS_KM, EARTH_MINOR_AXIS_KM, RADEG, T2000,
};
use crate::propagation::{Frame, StateVector};

/// Geodetic coordinates on the WGS84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    pub latitude_deg: Degree,
    pub longitude_deg: Degree,
    pub altitude_km: Kilometer,
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// This function implements the IAU 1982/2000 polynomial formula
/// for the mean sidereal time at 0h UT1, plus the fractional-day
/// correction term due to Earth's rotation rate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
///
/// # References
/// * IAU 1982, IERS Conventions 1996/2000.
/// * Explanatory Supplement to the Astronomical Almanac (1992).
pub fn gmst(tjm: f64) -> Radian {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    // Extract the integer MJD (0h UT1) and compute centuries since J2000.0
    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    // GMST at 0h UT1 using the polynomial expression, converted to radians
    let mut gmst0 = ((C3 * t + C2) * t + C1) * t + C0;
    gmst0 *= DPI / 86400.0;

    // Add the contribution from the fraction of the day, scaled by the
    // sidereal/solar rotation ratio.
    let h = tjm.fract() * DPI;
    let mut gmst = gmst0 + h * RAP;

    // Normalize to [0, 2π)
    let mut i: i64 = (gmst / DPI).floor() as i64;
    if gmst < 0.0 {
        i -= 1;
    }
    gmst -= i as f64 * DPI;

    gmst
}

/// GMST at a hifitime epoch.
///
/// UTC is used as a stand-in for UT1; the sub-second difference is far below the
/// discretization error of the conjunction search steps.
pub fn gmst_at_epoch(epoch: Epoch) -> Radian {
    gmst(epoch.to_mjd_utc_days())
}

/// Rotate an inertial state into the Earth-fixed frame.
///
/// Only the position is rotated; the velocity is dropped because the Earth-fixed frame
/// is used exclusively for separation distances, while relative velocities are always
/// taken in the inertial frame.
///
/// Arguments
/// -----------------
/// * `state`: an inertial (TEME) state vector.
///
/// Return
/// ----------
/// * The Earth-fixed equivalent at the same epoch.
pub fn eci_to_ecf(state: &StateVector) -> StateVector {
    let theta = gmst_at_epoch(state.epoch);
    let (sin_t, cos_t) = theta.sin_cos();
    let p = &state.position;
    StateVector {
        frame: Frame::EarthFixed,
        epoch: state.epoch,
        position: Vector3::new(
            p.x * cos_t + p.y * sin_t,
            -p.x * sin_t + p.y * cos_t,
            p.z,
        ),
        velocity: None,
    }
}

/// Convert an inertial state to geodetic latitude/longitude/altitude (WGS84).
///
/// Uses the standard iterative latitude refinement on the ellipsoid; five iterations
/// are ample at LEO altitudes.
///
/// Arguments
/// -----------------
/// * `state`: an inertial (TEME) state vector.
///
/// Return
/// ----------
/// * [`Geodetic`] coordinates, longitude normalized to (-180°, 180°].
pub fn eci_to_geodetic(state: &StateVector) -> Geodetic {
    let theta = gmst_at_epoch(state.epoch);
    let p = &state.position;

    let mut longitude = p.y.atan2(p.x) - theta;
    while longitude > std::f64::consts::PI {
        longitude -= DPI;
    }
    while longitude <= -std::f64::consts::PI {
        longitude += DPI;
    }

    let a = EARTH_MAJOR_AXIS_KM;
    let f = (EARTH_MAJOR_AXIS_KM - EARTH_MINOR_AXIS_KM) / EARTH_MAJOR_AXIS_KM;
    let e2 = 2.0 * f - f * f;

    let r = (p.x * p.x + p.y * p.y).sqrt();
    let mut latitude = p.z.atan2(r);
    let mut c = 1.0;
    for _ in 0..5 {
        let sin_lat = latitude.sin();
        c = 1.0 / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        latitude = (p.z + a * c * e2 * sin_lat).atan2(r);
    }
    let altitude = r / latitude.cos() - a * c;

    Geodetic {
        latitude_deg: latitude / RADEG,
        longitude_deg: longitude / RADEG,
        altitude_km: altitude,
    }
}

/// Straight-line separation between two state vectors, in kilometers.
///
/// Both states must be expressed in the same frame; the conjunction engine always
/// compares Earth-fixed positions.
pub fn separation_km(a: &StateVector, b: &StateVector) -> Kilometer {
    debug_assert_eq!(a.frame, b.frame);
    (a.position - b.position).norm()
}
