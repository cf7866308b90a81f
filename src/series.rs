//! # Risk time series resampling
//!
//! Recomputes the conjunction risk heuristic at fixed intervals inside a window
//! centered on a TCA, producing an ordered series suitable for charting. A synthetic
//! variant generates the same shape for a hypothetical pair with a prescribed miss
//! distance, used when no real neighbor trajectory exists.

use hifitime::{Duration, Epoch};
use serde::{Deserialize, Serialize};

use crate::constants::SECONDS_PER_MINUTE;
use crate::propagation::{relative_velocity, Propagator};
use crate::ref_frames::{eci_to_ecf, separation_km};
use crate::risk::{score_risk, RiskParams};

/// Sampling window configuration: a `±window_minutes` span around the TCA, sampled
/// every `step_minutes`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeriesParams {
    pub window_minutes: f64,
    pub step_minutes: f64,
}

impl Default for SeriesParams {
    /// 12-hour window centered on the TCA, sampled every 5 minutes.
    fn default() -> Self {
        SeriesParams {
            window_minutes: 6.0 * 60.0,
            step_minutes: 5.0,
        }
    }
}

/// One sample of the resampled series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskSample {
    pub epoch: Epoch,
    pub risk: f64,
}

/// Re-evaluate the risk heuristic around a TCA for a real (target, neighbor) pair.
///
/// At each step both objects are propagated, the Earth-fixed separation and inertial
/// relative velocity are computed, and the same scorer used by the conjunction search
/// produces the sample. Steps where either propagation fails are skipped, so the
/// series may contain gaps.
///
/// Arguments
/// -----------------
/// * `target`, `neighbor`: the two trajectories.
/// * `tca`: center of the sampling window.
/// * `series`: window and step configuration.
/// * `density_factor`: pre-clamped local density factor.
/// * `risk`: risk scorer configuration.
///
/// Return
/// ----------
/// * Samples ordered by epoch.
pub fn resample_risk_series(
    target: &dyn Propagator,
    neighbor: &dyn Propagator,
    tca: Epoch,
    series: &SeriesParams,
    density_factor: f64,
    risk: &RiskParams,
) -> Vec<RiskSample> {
    let window_s = series.window_minutes * SECONDS_PER_MINUTE;
    let step_s = series.step_minutes * SECONDS_PER_MINUTE;
    let start = tca - Duration::from_seconds(window_s);
    let steps = (2.0 * window_s / step_s).floor() as u64;

    let mut samples = Vec::with_capacity(steps as usize + 1);
    for k in 0..=steps {
        let epoch = start + Duration::from_seconds(k as f64 * step_s);
        let (Ok(target_state), Ok(neighbor_state)) =
            (target.state_at(epoch), neighbor.state_at(epoch))
        else {
            continue;
        };
        let distance = separation_km(&eci_to_ecf(&target_state), &eci_to_ecf(&neighbor_state));
        let rel_vel = relative_velocity(&target_state, &neighbor_state, target, neighbor, epoch);
        samples.push(RiskSample {
            epoch,
            risk: score_risk(distance, rel_vel, density_factor, risk),
        });
    }
    samples
}

/// Miss distance of the synthetic pair at the TCA, in km.
const SYNTHETIC_MISS_KM: f64 = 0.2;
/// Synthetic separation growth away from the TCA: 10 km per 30 minutes.
const SYNTHETIC_GROWTH_KM_PER_MIN: f64 = 10.0 / 30.0;
/// Closing speed assumed for the synthetic pair, in km/s.
const SYNTHETIC_REL_VEL_KM_S: f64 = 7.6;

/// Generate the risk series of a hypothetical close pair with no real trajectories.
///
/// The separation model is piecewise linear in time: `0.2 km` at the TCA, growing by
/// `10 km` per `30 min` of offset on either side, scored with the same heuristic as
/// real pairs.
pub fn synthetic_risk_series(
    tca: Epoch,
    series: &SeriesParams,
    density_factor: f64,
    risk: &RiskParams,
) -> Vec<RiskSample> {
    let window_s = series.window_minutes * SECONDS_PER_MINUTE;
    let step_s = series.step_minutes * SECONDS_PER_MINUTE;
    let start = tca - Duration::from_seconds(window_s);
    let steps = (2.0 * window_s / step_s).floor() as u64;

    (0..=steps)
        .map(|k| {
            let epoch = start + Duration::from_seconds(k as f64 * step_s);
            let offset_min = (epoch - tca).to_seconds().abs() / SECONDS_PER_MINUTE;
            let distance = SYNTHETIC_MISS_KM + offset_min * SYNTHETIC_GROWTH_KM_PER_MIN;
            RiskSample {
                epoch,
                risk: score_risk(distance, SYNTHETIC_REL_VEL_KM_S, density_factor, risk),
            }
        })
        .collect()
}
