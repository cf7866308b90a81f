use rand::rngs::StdRng;
use rand::SeedableRng;
use skywatch::{
    estimate_cross_section, estimate_launch_risk, heuristic_density, LaunchRiskParams, SizeClass,
};

#[test]
fn test_launch_risk_from_heuristic_density() {
    // A 200 kg smallsat at 550 km / 53°, one year on orbit: the full estimator path
    // the simulator form drives when no live catalog is available.
    let density = heuristic_density(550.0, 53.0);
    let area = estimate_cross_section(SizeClass::SmallSat, 200.0);
    let params = LaunchRiskParams::default();
    let mut rng = StdRng::seed_from_u64(99);

    let estimate = estimate_launch_risk(density, area, 365.0, &params, &mut rng);

    assert!(estimate.lambda > 0.0);
    assert!(estimate.analytic_p > 0.0 && estimate.analytic_p < 1.0);
    assert!((0.0..=1.0).contains(&estimate.monte_carlo_p));
    // At the default ±20 % perturbation both models still agree loosely.
    assert!((estimate.monte_carlo_p - estimate.analytic_p).abs() < 0.05);
}

#[test]
fn test_longer_missions_are_riskier() {
    let density = heuristic_density(550.0, 53.0);
    let area = estimate_cross_section(SizeClass::SmallSat, 200.0);
    let params = LaunchRiskParams::default();

    let mut rng = StdRng::seed_from_u64(3);
    let one_year = estimate_launch_risk(density, area, 365.0, &params, &mut rng);
    let mut rng = StdRng::seed_from_u64(3);
    let five_years = estimate_launch_risk(density, area, 5.0 * 365.0, &params, &mut rng);

    assert!(five_years.lambda > one_year.lambda);
    assert!(five_years.analytic_p > one_year.analytic_p);
}
