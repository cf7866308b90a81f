mod common;

use common::*;
use hifitime::Duration;
use skywatch::{
    resample_risk_series, search_conjunction, CancelToken, ElementSet, RiskParams, SearchParams,
    SeriesParams,
};

#[test]
fn test_search_against_identical_elements() {
    // A target searched against its own element set stays at zero separation at every
    // step; the first-seen strict minimum pins the TCA to the start of the horizon.
    let target = ElementSet::from_tle(ISS_NAME, ISS_LINE1, ISS_LINE2).unwrap();
    let shadow = ElementSet::from_tle("ISS SHADOW", ISS_LINE1, ISS_LINE2).unwrap();
    let start = target.epoch + Duration::from_seconds(3600.0);

    let result = search_conjunction(
        &target,
        &shadow,
        "ISS SHADOW",
        start,
        &SearchParams::default(),
        &RiskParams::default(),
        1.0,
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!(result.tca, Some(start));
    assert!(result.min_distance_km < 1e-9);
    assert_eq!(result.relative_velocity_km_s, 0.0);
    // Zero distance saturates severity; zero measured velocity falls back to the
    // nominal closing speed, so risk = 1 * 1 * density * global_scale.
    assert!((result.risk_score - 0.45).abs() < 1e-3);
}

#[test]
fn test_search_between_distinct_objects() {
    let target = ElementSet::from_tle(ISS_NAME, ISS_LINE1, ISS_LINE2).unwrap();
    let neighbor = ElementSet::from_tle(VANGUARD_NAME, VANGUARD_LINE1, VANGUARD_LINE2).unwrap();
    let start = target.epoch;

    let shorter = SearchParams {
        horizon_minutes: 12.0 * 60.0,
        ..SearchParams::default()
    };
    let result = search_conjunction(
        &target,
        &neighbor,
        VANGUARD_NAME,
        start,
        &shorter,
        &RiskParams::default(),
        1.0,
        &CancelToken::new(),
    )
    .unwrap();

    let tca = result.tca.expect("both objects propagate fine");
    assert!(tca >= start);
    assert!(tca <= start + Duration::from_seconds(12.5 * 3600.0));
    assert!(result.min_distance_km.is_finite() && result.min_distance_km > 0.0);
    assert!(result.relative_velocity_km_s > 0.0);
    assert!((0.0..=0.98).contains(&result.risk_score));
}

#[test]
fn test_series_around_real_tca() {
    let target = ElementSet::from_tle(ISS_NAME, ISS_LINE1, ISS_LINE2).unwrap();
    let neighbor = ElementSet::from_tle(VANGUARD_NAME, VANGUARD_LINE1, VANGUARD_LINE2).unwrap();
    let start = target.epoch;

    let shorter = SearchParams {
        horizon_minutes: 6.0 * 60.0,
        ..SearchParams::default()
    };
    let result = search_conjunction(
        &target,
        &neighbor,
        VANGUARD_NAME,
        start,
        &shorter,
        &RiskParams::default(),
        1.0,
        &CancelToken::new(),
    )
    .unwrap();
    let tca = result.tca.unwrap();

    let series = resample_risk_series(
        &target,
        &neighbor,
        tca,
        &SeriesParams::default(),
        1.0,
        &RiskParams::default(),
    );

    assert_eq!(series.len(), 145);
    assert!(series.windows(2).all(|w| w[0].epoch < w[1].epoch));
    assert!(series.iter().all(|s| (0.0..=0.98).contains(&s.risk)));
}
