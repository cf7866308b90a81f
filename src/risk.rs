//! # Conjunction risk scoring
//!
//! A deterministic heuristic mapping encounter geometry and local object density to a
//! bounded score. The hard cap below 1.0 signals that this is a heuristic, not a
//! calibrated collision probability.

use serde::{Deserialize, Serialize};

use crate::constants::{Kilometer, KilometerPerSecond};

/// Tuning constants for [`score_risk`].
///
/// All values are configuration, not literals baked into the formula, so the scorer is
/// independently testable against known input/output pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskParams {
    /// Distance at which severity has fallen to one half, in km.
    pub reference_distance_km: Kilometer,
    /// Exponent of the severity falloff with distance.
    pub distance_exponent: f64,
    /// Nominal closing speed used to normalize the velocity factor, in km/s.
    pub nominal_velocity_km_s: KilometerPerSecond,
    /// Clamp bounds for the velocity factor, so extreme speeds do not dominate.
    pub speed_factor_bounds: (f64, f64),
    /// Global calibration applied to the severity × speed × density product.
    pub global_scale: f64,
    /// Hard cap on the returned score.
    pub max_risk: f64,
}

impl Default for RiskParams {
    fn default() -> Self {
        RiskParams {
            reference_distance_km: 80.0,
            distance_exponent: 1.7,
            nominal_velocity_km_s: 7.5,
            speed_factor_bounds: (0.6, 1.3),
            global_scale: 0.45,
            max_risk: 0.98,
        }
    }
}

/// Clamp `x` into `[lo, hi]`.
pub(crate) fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    x.max(lo).min(hi)
}

/// Score the risk of one encounter.
///
/// The score is the product of three factors, calibrated and clamped:
/// - `severity = 1 / (1 + (max(d, 1e-6) / reference)^exponent)` — monotonically
///   decreasing in distance, → 1 as d → 0 and → 0 as d → ∞;
/// - a speed factor `rel_vel / nominal`, clamped into `speed_factor_bounds`;
/// - the caller-supplied density factor (already clamped by the neighbor selector).
///
/// Arguments
/// -----------------
/// * `distance_km`: miss distance of the encounter.
/// * `rel_vel_km_s`: relative speed at closest approach.
/// * `density_factor`: local object density factor (dimensionless, pre-clamped).
/// * `params`: scorer tuning constants.
///
/// Return
/// ----------
/// * A score in `[0, params.max_risk]`.
pub fn score_risk(
    distance_km: Kilometer,
    rel_vel_km_s: KilometerPerSecond,
    density_factor: f64,
    params: &RiskParams,
) -> f64 {
    let severity = 1.0
        / (1.0
            + (distance_km.max(1e-6) / params.reference_distance_km)
                .powf(params.distance_exponent));
    let (lo, hi) = params.speed_factor_bounds;
    let speed_factor = clamp(rel_vel_km_s / params.nominal_velocity_km_s, lo, hi);
    clamp(
        severity * speed_factor * density_factor * params.global_scale,
        0.0,
        params.max_risk,
    )
}

#[cfg(test)]
mod risk_test {
    use super::*;

    #[test]
    fn test_risk_bounded() {
        let params = RiskParams::default();
        for d in [0.0, 1e-9, 0.5, 10.0, 80.0, 5000.0, 1e9] {
            for v in [0.0, 0.1, 7.5, 15.0, 100.0] {
                for dens in [0.2, 1.0, 2.0] {
                    let r = score_risk(d, v, dens, &params);
                    assert!((0.0..=0.98).contains(&r), "risk {r} out of bounds");
                }
            }
        }
    }

    #[test]
    fn test_risk_monotone_in_distance() {
        let params = RiskParams::default();
        let mut last = f64::INFINITY;
        for d in [0.0, 1.0, 10.0, 80.0, 500.0, 5000.0, 50000.0] {
            let r = score_risk(d, 7.5, 1.0, &params);
            assert!(r <= last, "risk increased at distance {d}");
            last = r;
        }
    }

    #[test]
    fn test_close_encounter_outranks_distant_one() {
        let params = RiskParams::default();
        assert!(score_risk(10.0, 7.5, 1.0, &params) > score_risk(5000.0, 7.5, 1.0, &params));
    }

    #[test]
    fn test_known_values() {
        let params = RiskParams::default();
        // At d = reference distance and nominal speed, severity is exactly 1/2 and the
        // speed factor exactly 1, so risk = 0.5 * density * global_scale.
        let r = score_risk(80.0, 7.5, 1.0, &params);
        assert!((r - 0.5 * 0.45).abs() < 1e-12);

        // Point-blank encounter saturates severity at ~1.
        let r0 = score_risk(0.0, 7.5, 2.0, &params);
        assert!((r0 - 0.9).abs() < 1e-3);
    }

    #[test]
    fn test_speed_factor_clamped() {
        let params = RiskParams::default();
        // Far below and far above the nominal speed hit the clamp bounds.
        let slow = score_risk(80.0, 0.01, 1.0, &params);
        let fast = score_risk(80.0, 1000.0, 1.0, &params);
        assert!((slow - 0.5 * 0.6 * 0.45).abs() < 1e-12);
        assert!((fast - 0.5 * 1.3 * 0.45).abs() < 1e-12);
    }
}
