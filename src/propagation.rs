//! # Propagator seam and state vectors
//!
//! The orbit propagator is an external collaborator: anything that can turn an epoch into
//! a Cartesian state implements [`Propagator`]. The production implementation is the
//! SGP4-backed [`ElementSet`](crate::elements::ElementSet); tests substitute synthetic
//! trajectories with analytically known geometry.
//!
//! ## Units & Conventions
//! -----------------
//! - Positions in **kilometers**, velocities in **kilometers per second**.
//! - The inertial frame is TEME (the frame native to SGP4); the Earth-fixed frame is
//!   obtained by the sidereal-time rotation in [`crate::ref_frames`].
//! - State vectors are never mutated: they are recomputed per query.

use hifitime::{Duration, Epoch};
use nalgebra::Vector3;

use crate::constants::KilometerPerSecond;
use crate::skywatch_errors::SkywatchError;

/// Reference frame tag carried by every [`StateVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// True Equator Mean Equinox inertial frame (SGP4 native output).
    Teme,
    /// Earth-fixed rotating frame (TEME rotated by GMST).
    EarthFixed,
}

/// Cartesian position (km) and optional velocity (km/s), tagged with its frame and the
/// epoch it was computed for.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    pub frame: Frame,
    pub epoch: Epoch,
    pub position: Vector3<f64>,
    pub velocity: Option<Vector3<f64>>,
}

/// Anything that can produce an inertial state at a requested epoch.
///
/// Implementations must return positions in the TEME frame in kilometers. A failed
/// propagation is reported through the `Result`; batch callers treat it as a skippable
/// per-step condition, never as a reason to abort the whole batch.
pub trait Propagator: Sync {
    /// Inertial state of the object at `epoch`.
    fn state_at(&self, epoch: Epoch) -> Result<StateVector, SkywatchError>;
}

/// Time base used by the finite-difference velocity fallback.
const FINITE_DIFFERENCE_DT_S: f64 = 10.0;

/// Magnitude of the relative velocity between two objects at `epoch`, in km/s.
///
/// Prefers the propagator-native velocities of the two states, differenced
/// component-wise. When either state lacks a velocity, falls back to a finite-difference
/// estimate: both objects are propagated at `epoch` and again 10 seconds later, each
/// object's velocity is approximated from the position difference, and the two estimates
/// are differenced. The fallback returns `0.0` rather than failing if any of the four
/// propagation calls fails.
///
/// Arguments
/// -----------------
/// * `state_a`, `state_b`: inertial states of the two objects at `epoch`.
/// * `a`, `b`: the propagators, used only by the fallback path.
/// * `epoch`: the query epoch.
///
/// Return
/// ----------
/// * Relative speed in km/s (`0.0` when no velocity information is recoverable).
pub fn relative_velocity(
    state_a: &StateVector,
    state_b: &StateVector,
    a: &dyn Propagator,
    b: &dyn Propagator,
    epoch: Epoch,
) -> KilometerPerSecond {
    match (&state_a.velocity, &state_b.velocity) {
        (Some(va), Some(vb)) => (va - vb).norm(),
        _ => finite_difference_relative_velocity(a, b, epoch),
    }
}

/// Finite-difference relative velocity estimator (fallback path only).
///
/// Propagates both objects at `epoch` and at `epoch + 10 s` in the inertial frame and
/// differences the per-object velocity estimates. Any propagation failure yields `0.0`.
pub(crate) fn finite_difference_relative_velocity(
    a: &dyn Propagator,
    b: &dyn Propagator,
    epoch: Epoch,
) -> KilometerPerSecond {
    let later = epoch + Duration::from_seconds(FINITE_DIFFERENCE_DT_S);

    let (Ok(a1), Ok(a2), Ok(b1), Ok(b2)) = (
        a.state_at(epoch),
        a.state_at(later),
        b.state_at(epoch),
        b.state_at(later),
    ) else {
        return 0.0;
    };

    let va = (a2.position - a1.position) / FINITE_DIFFERENCE_DT_S;
    let vb = (b2.position - b1.position) / FINITE_DIFFERENCE_DT_S;
    (va - vb).norm()
}
