//! # Conjunction search
//!
//! For one (target, neighbor) pair, locate the epoch within a bounded horizon that
//! minimizes Earth-fixed separation, together with the relative velocity at that epoch,
//! and convert the geometry into a bounded risk score.
//!
//! ## Algorithm
//! -----------------
//! A two-phase sampled local minimization, not a global optimization:
//!
//! 1. **Coarse pass** — step from the reference epoch across the horizon (default 48 h)
//!    at a fixed coarse step (default 5 min), tracking the strict minimum separation.
//!    First-seen minimum wins on exact ties, which keeps results reproducible.
//! 2. **Refine pass** — re-scan a symmetric window (default ±30 min) around the coarse
//!    candidate at a finer step (default 30 s) with the same tie-break, updating the
//!    minimum if a refined sample beats the coarse one.
//!
//! A horizon containing multiple close passes reports only the first-encountered
//! minimum at coarse resolution, sharpened by the refine pass; the true global closest
//! approach is not guaranteed to be found outside this resolution.
//!
//! ## Failure policy
//! -----------------
//! Steps where either propagation fails are skipped. If **no** step in either pass
//! yields a finite separation, the result is the sentinel (`tca = None`, zero distance
//! and velocity, zero risk) — callers must treat it as "no usable sample", never as
//! "objects are touching".

use hifitime::{Duration, Epoch};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::cancel::CancelToken;
use crate::constants::{Kilometer, KilometerPerSecond, SECONDS_PER_MINUTE};
use crate::propagation::{relative_velocity, Propagator};
use crate::ref_frames::{eci_to_ecf, separation_km};
use crate::risk::{score_risk, RiskParams};
use crate::skywatch_errors::SkywatchError;

/// Time parameters of the coarse/refine search. All fields are configuration, with the
/// documented defaults matching the interactive 48-hour use case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchParams {
    /// Length of the forward search horizon, in minutes.
    pub horizon_minutes: f64,
    /// Coarse sampling step, in minutes.
    pub coarse_step_minutes: f64,
    /// Half-width of the refine window around the coarse candidate, in minutes.
    pub refine_window_minutes: f64,
    /// Refine sampling step, in seconds.
    pub refine_step_seconds: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            horizon_minutes: 48.0 * 60.0,
            coarse_step_minutes: 5.0,
            refine_window_minutes: 30.0,
            refine_step_seconds: 30.0,
        }
    }
}

/// Outcome of one (target, neighbor) conjunction search.
///
/// `tca == None` is the sentinel for "search produced no usable sample": the distance
/// and velocity then read zero and must not be interpreted as a contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConjunctionResult {
    pub neighbor_name: String,
    pub min_distance_km: Kilometer,
    pub relative_velocity_km_s: KilometerPerSecond,
    pub tca: Option<Epoch>,
    pub risk_score: f64,
}

/// Running strict minimum over sampled steps.
struct BestSample {
    min_distance_km: Kilometer,
    rel_vel_km_s: KilometerPerSecond,
    tca: Option<Epoch>,
}

impl BestSample {
    fn new() -> Self {
        BestSample {
            min_distance_km: f64::INFINITY,
            rel_vel_km_s: 0.0,
            tca: None,
        }
    }

    /// Sample both trajectories at `epoch` and fold the step into the running minimum.
    /// A failed propagation on either side skips the step.
    fn observe(&mut self, target: &dyn Propagator, neighbor: &dyn Propagator, epoch: Epoch) {
        let (Ok(target_state), Ok(neighbor_state)) =
            (target.state_at(epoch), neighbor.state_at(epoch))
        else {
            return;
        };

        let distance = separation_km(&eci_to_ecf(&target_state), &eci_to_ecf(&neighbor_state));
        if !distance.is_finite() {
            return;
        }

        // Strict less-than: the first-seen minimum wins on exact ties.
        if distance < self.min_distance_km {
            let rel_vel =
                relative_velocity(&target_state, &neighbor_state, target, neighbor, epoch);
            self.min_distance_km = distance;
            // A zero estimate (fallback with failed propagations) keeps the last
            // known velocity rather than erasing it.
            if rel_vel > 0.0 {
                self.rel_vel_km_s = rel_vel;
            }
            self.tca = Some(epoch);
        }
    }
}

/// Search the closest approach between a target and one neighbor over a bounded horizon.
///
/// Arguments
/// -----------------
/// * `target`, `neighbor`: the two trajectories (pure given their element sets; the
///   search shares no mutable state and is safe to run per-pair in parallel).
/// * `neighbor_name`: label carried into the result.
/// * `epoch`: start of the forward horizon, typically "now".
/// * `search`: horizon and step configuration.
/// * `risk`: risk scorer configuration.
/// * `density_factor`: pre-clamped local density factor (see [`crate::neighbors`]).
/// * `token`: cancellation token, checked between steps.
///
/// Return
/// ----------
/// * A [`ConjunctionResult`] (possibly the sentinel), or
///   [`SkywatchError::Cancelled`] if the token tripped mid-search.
#[allow(clippy::too_many_arguments)]
pub fn search_conjunction(
    target: &dyn Propagator,
    neighbor: &dyn Propagator,
    neighbor_name: &str,
    epoch: Epoch,
    search: &SearchParams,
    risk: &RiskParams,
    density_factor: f64,
    token: &CancelToken,
) -> Result<ConjunctionResult, SkywatchError> {
    let mut best = BestSample::new();

    // Coarse pass across the whole horizon.
    let coarse_steps = (search.horizon_minutes / search.coarse_step_minutes).floor() as u64;
    for k in 0..=coarse_steps {
        if token.is_cancelled() {
            return Err(SkywatchError::Cancelled);
        }
        let step_epoch = epoch
            + Duration::from_seconds(k as f64 * search.coarse_step_minutes * SECONDS_PER_MINUTE);
        best.observe(target, neighbor, step_epoch);
    }

    // Refine pass around the coarse candidate.
    if let Some(coarse_tca) = best.tca {
        let window_s = search.refine_window_minutes * SECONDS_PER_MINUTE;
        let start = coarse_tca - Duration::from_seconds(window_s);
        let refine_steps = (2.0 * window_s / search.refine_step_seconds).floor() as u64;
        for k in 0..=refine_steps {
            if token.is_cancelled() {
                return Err(SkywatchError::Cancelled);
            }
            let step_epoch = start + Duration::from_seconds(k as f64 * search.refine_step_seconds);
            best.observe(target, neighbor, step_epoch);
        }
    }

    let result = match best.tca {
        Some(tca) => {
            let rel_vel = best.rel_vel_km_s;
            let scored_vel = if rel_vel > 0.0 {
                rel_vel
            } else {
                risk.nominal_velocity_km_s
            };
            ConjunctionResult {
                neighbor_name: neighbor_name.to_string(),
                min_distance_km: best.min_distance_km,
                relative_velocity_km_s: rel_vel,
                tca: Some(tca),
                risk_score: score_risk(best.min_distance_km, scored_vel, density_factor, risk),
            }
        }
        None => {
            debug!("conjunction search against {neighbor_name} produced no usable sample");
            ConjunctionResult {
                neighbor_name: neighbor_name.to_string(),
                min_distance_km: 0.0,
                relative_velocity_km_s: 0.0,
                tca: None,
                risk_score: 0.0,
            }
        }
    };
    Ok(result)
}
