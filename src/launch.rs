//! # Launch collision risk estimation
//!
//! Probability that a newly launched object suffers at least one encounter over its
//! mission lifetime, under a homogeneous Poisson-process assumption: object density,
//! cross-section and relative velocity are held constant over the whole duration.
//!
//! Two models are provided:
//! - **Analytic** — rate `λ = density · velocity · calibration · area · duration`,
//!   probability `P = 1 − e^(−λ)`.
//! - **Monte Carlo** — N independent trials, each perturbing λ by a uniform
//!   multiplicative factor to represent parameter uncertainty; the hit fraction
//!   converges to the analytic `P` as the perturbation shrinks and N grows.
//!
//! The density input comes either from the live catalog (the density-band count in
//! [`crate::neighbors`]) or from [`heuristic_density`], a static table keyed by
//! altitude and inclination bands for when no live data is available.

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Kilometer, KilometerPerSecond, SquareMeter, SECONDS_PER_DAY};
use crate::risk::clamp;

/// Declared spacecraft size class, mapped to a reference cross-sectional area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    CubeSat3U,
    CubeSat6U,
    CubeSat12U,
    SmallSat,
    MicroSat,
    SmallBus,
}

impl SizeClass {
    /// Reference cross-sectional area of the class, in m².
    pub fn reference_area_m2(&self) -> SquareMeter {
        match self {
            SizeClass::CubeSat3U => 0.03,
            SizeClass::CubeSat6U => 0.06,
            SizeClass::CubeSat12U => 0.12,
            SizeClass::SmallSat => 0.5,
            SizeClass::MicroSat => 1.0,
            SizeClass::SmallBus => 2.5,
        }
    }
}

/// Estimate an effective cross-section from a size class and a mass.
///
/// The class reference area is scaled by a monotonic function of mass,
/// `clamp(0.7 + log10(max(1, m)) / 3, 0.7, 1.6)`, so heavier builds of the same class
/// present a moderately larger cross-section without ever dominating the class choice.
pub fn estimate_cross_section(size: SizeClass, mass_kg: f64) -> SquareMeter {
    let scale = clamp(0.7 + mass_kg.max(1.0).log10() / 3.0, 0.7, 1.6);
    size.reference_area_m2() * scale
}

/// Configuration of the launch risk models.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LaunchRiskParams {
    /// Calibration constant of the encounter rate (demo scaling).
    pub calibration: f64,
    /// Nominal relative velocity of encounters, in km/s.
    pub nominal_velocity_km_s: KilometerPerSecond,
    /// Number of Monte Carlo trials.
    pub trials: usize,
    /// Half-width of the uniform multiplicative λ perturbation (0.2 ⇒ ±20 %).
    pub perturbation: f64,
}

impl Default for LaunchRiskParams {
    fn default() -> Self {
        LaunchRiskParams {
            calibration: 1.2e-10,
            nominal_velocity_km_s: 7.5,
            trials: 4000,
            perturbation: 0.20,
        }
    }
}

/// Combined output of the analytic and Monte Carlo models.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LaunchRiskEstimate {
    /// Expected number of encounters over the mission.
    pub lambda: f64,
    /// Analytic Poisson probability of at least one encounter.
    pub analytic_p: f64,
    /// Simulated probability of at least one encounter.
    pub monte_carlo_p: f64,
}

/// Analytic Poisson model.
///
/// Arguments
/// -----------------
/// * `density`: relative object density (dimensionless, pre-clamped).
/// * `area_m2`: candidate cross-sectional area.
/// * `duration_days`: mission duration.
/// * `params`: model configuration.
///
/// Return
/// ----------
/// * `(lambda, probability)` — the encounter rate and `1 − e^(−λ)`.
pub fn poisson_probability(
    density: f64,
    area_m2: SquareMeter,
    duration_days: f64,
    params: &LaunchRiskParams,
) -> (f64, f64) {
    let duration_s = duration_days * SECONDS_PER_DAY;
    let lambda =
        density * params.nominal_velocity_km_s * params.calibration * area_m2 * duration_s;
    (lambda, 1.0 - (-lambda).exp())
}

/// Monte Carlo model: hit fraction over `params.trials` independent trials, each with a
/// uniform ±`params.perturbation` multiplicative λ noise.
///
/// Converges to [`poisson_probability`]'s result as the perturbation shrinks to zero and
/// the trial count grows — a property exercised by the tests.
pub fn monte_carlo_probability(
    density: f64,
    area_m2: SquareMeter,
    duration_days: f64,
    params: &LaunchRiskParams,
    rng: &mut impl Rng,
) -> f64 {
    let (lambda, _) = poisson_probability(density, area_m2, duration_days, params);
    let noise = Uniform::new_inclusive(1.0 - params.perturbation, 1.0 + params.perturbation);
    let mut hits = 0usize;
    for _ in 0..params.trials {
        let perturbed = lambda * noise.sample(rng);
        if rng.gen::<f64>() < 1.0 - (-perturbed).exp() {
            hits += 1;
        }
    }
    hits as f64 / params.trials as f64
}

/// Run both models and bundle their outputs.
pub fn estimate_launch_risk(
    density: f64,
    area_m2: SquareMeter,
    duration_days: f64,
    params: &LaunchRiskParams,
    rng: &mut impl Rng,
) -> LaunchRiskEstimate {
    let (lambda, analytic_p) = poisson_probability(density, area_m2, duration_days, params);
    let monte_carlo_p = monte_carlo_probability(density, area_m2, duration_days, params, rng);
    LaunchRiskEstimate {
        lambda,
        analytic_p,
        monte_carlo_p,
    }
}

/// Static relative-density heuristic keyed by altitude and inclination bands.
///
/// Used when no live catalog is available. The altitude profile peaks in the
/// 450–550 km shell; the inclination profile favors the crowded high-inclination
/// regimes. The combined factor is clamped into [0.1, 1.2].
pub fn heuristic_density(altitude_km: Kilometer, inclination_deg: Degree) -> f64 {
    let f_alt = match altitude_km {
        a if a < 300.0 => 0.2,
        a if a < 450.0 => 0.4,
        a if a < 550.0 => 1.0,
        a if a < 650.0 => 0.9,
        a if a < 800.0 => 0.6,
        a if a < 1000.0 => 0.4,
        _ => 0.2,
    };
    let inc = inclination_deg.abs();
    let f_inc = match inc {
        i if i > 70.0 => 0.9,
        i if i > 50.0 => 0.7,
        i if i > 30.0 => 0.5,
        _ => 0.4,
    };
    clamp(0.1 + 1.2 * (0.6 * f_alt + 0.4 * f_inc), 0.1, 1.2)
}
