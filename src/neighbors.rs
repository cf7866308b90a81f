//! # Neighbor selection and local density estimation
//!
//! Ranks every catalog object by its instantaneous Earth-fixed separation from a target
//! at a reference epoch, and optionally counts how many objects sit inside a
//! [`DensityBand`] around the target's shell — a proxy for local object density.
//!
//! ## Failure policy
//! -----------------
//! A catalog entry whose element lines fail to parse, or whose propagation fails at the
//! reference epoch, is skipped; the scan continues and reports the skip count in
//! [`NeighborScan::skipped`] so callers can observe data-quality degradation.
//!
//! ## Ordering
//! -----------------
//! Records are sorted ascending by separation with a **stable** sort, so exact ties keep
//! their catalog order. Callers typically take a prefix (commonly the nearest 20),
//! excluding the target itself when it appears in its own catalog.

use hifitime::Epoch;
use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cancel::CancelToken;
use crate::catalog::CatalogEntry;
use crate::constants::{Degree, Kilometer};
use crate::elements::ElementSet;
use crate::propagation::{Propagator, StateVector};
use crate::ref_frames::{eci_to_ecf, eci_to_geodetic, separation_km};
use crate::risk::clamp;
use crate::skywatch_errors::SkywatchError;

/// Tolerance window in altitude and inclination defining which catalog members count as
/// "locally co-orbital" for density estimation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DensityBand {
    pub altitude_km: Kilometer,
    pub inclination_deg: Degree,
    pub alt_tolerance_km: Kilometer,
    pub inc_tolerance_deg: Degree,
}

impl DensityBand {
    /// Band centered on a target shell with the conventional ±50 km / ±10° tolerances.
    pub fn around(altitude_km: Kilometer, inclination_deg: Degree) -> Self {
        DensityBand {
            altitude_km,
            inclination_deg,
            alt_tolerance_km: 50.0,
            inc_tolerance_deg: 10.0,
        }
    }

    /// Whether an object at the given altitude and inclination falls inside the band.
    pub fn contains(&self, altitude_km: Kilometer, inclination_deg: Degree) -> bool {
        (altitude_km - self.altitude_km).abs() <= self.alt_tolerance_km
            && (inclination_deg - self.inclination_deg).abs() <= self.inc_tolerance_deg
    }
}

/// Mapping from a live in-band object count to a clamped density factor.
///
/// `factor = clamp(baseline + live_count / count_scale, min_factor, max_factor)`.
/// The factor is never negative: `min_factor` bounds it from below.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DensityParams {
    pub baseline: f64,
    pub count_scale: f64,
    pub min_factor: f64,
    pub max_factor: f64,
}

impl Default for DensityParams {
    /// Defaults used by the conjunction risk scorer.
    fn default() -> Self {
        DensityParams {
            baseline: 0.2,
            count_scale: 80.0,
            min_factor: 0.2,
            max_factor: 2.0,
        }
    }
}

impl DensityParams {
    /// Gentler ramp used by the launch risk estimator, which feeds a Poisson rate
    /// rather than a bounded heuristic.
    pub fn launch_defaults() -> Self {
        DensityParams {
            baseline: 0.1,
            count_scale: 120.0,
            min_factor: 0.1,
            max_factor: 1.5,
        }
    }
}

/// Derive a clamped density factor from a live in-band count.
pub fn density_factor(live_count: usize, params: &DensityParams) -> f64 {
    clamp(
        params.baseline + live_count as f64 / params.count_scale,
        params.min_factor,
        params.max_factor,
    )
}

/// One ranked catalog object: its name, separation from the target at the reference
/// epoch, and the element set derived while scanning. Lifetime is one computation
/// cycle; records are discarded after the per-neighbor searches complete.
#[derive(Debug)]
pub struct NeighborRecord {
    pub name: String,
    pub distance_km: Kilometer,
    pub elements: ElementSet,
}

/// Result of a catalog-wide neighbor scan.
#[derive(Debug)]
pub struct NeighborScan {
    /// Records sorted ascending by separation (stable on ties).
    pub records: Vec<NeighborRecord>,
    /// Entries dropped because element parsing or propagation failed.
    pub skipped: usize,
    /// Number of scanned objects inside the supplied [`DensityBand`], if one was given.
    pub live_count_in_band: Option<usize>,
}

impl NeighborScan {
    /// The nearest `n` records, optionally excluding one object by exact name (the
    /// target itself, when it appears in its own catalog).
    pub fn nearest(&self, n: usize, exclude: Option<&str>) -> Vec<&NeighborRecord> {
        self.records
            .iter()
            .filter(|r| exclude != Some(r.name.as_str()))
            .take(n)
            .collect()
    }
}

/// Scan the whole catalog and rank every object by separation from the target.
///
/// Each entry is handled independently (the scan is data-parallel): its element lines
/// are parsed, the object is propagated to `epoch`, and its Earth-fixed separation from
/// the target is computed. Entries failing at any of those steps are counted and
/// skipped, never aborting the batch. When `band` is supplied, the entry's geodetic
/// altitude and mean inclination are additionally tested for band membership.
///
/// Arguments
/// -----------------
/// * `target_state`: inertial state of the target at the reference epoch.
/// * `catalog`: parsed catalog entries (order defines tie-break ranking).
/// * `epoch`: reference epoch, typically "now".
/// * `band`: optional density band to count co-orbital objects against.
/// * `token`: cancellation token, checked per entry.
///
/// Return
/// ----------
/// * A [`NeighborScan`] with sorted records, or [`SkywatchError::Cancelled`] if the
///   token tripped mid-scan (partial results are discarded).
pub fn find_neighbors(
    target_state: &StateVector,
    catalog: &[CatalogEntry],
    epoch: Epoch,
    band: Option<&DensityBand>,
    token: &CancelToken,
) -> Result<NeighborScan, SkywatchError> {
    let target_ecf = eci_to_ecf(target_state);

    let scanned: Vec<Option<(NeighborRecord, bool)>> = catalog
        .par_iter()
        .map(|entry| -> Result<Option<(NeighborRecord, bool)>, SkywatchError> {
            if token.is_cancelled() {
                return Err(SkywatchError::Cancelled);
            }
            let Ok(elements) = ElementSet::from_catalog_entry(entry) else {
                return Ok(None);
            };
            let Ok(state) = elements.state_at(epoch) else {
                return Ok(None);
            };

            let in_band = band.is_some_and(|band| {
                let geodetic = eci_to_geodetic(&state);
                band.contains(geodetic.altitude_km, elements.inclination_deg)
            });

            let ecf = eci_to_ecf(&state);
            Ok(Some((
                NeighborRecord {
                    name: entry.name.clone(),
                    distance_km: separation_km(&ecf, &target_ecf),
                    elements,
                },
                in_band,
            )))
        })
        .collect::<Result<_, _>>()?;

    let skipped = scanned.iter().filter(|r| r.is_none()).count();
    if skipped > 0 {
        warn!("neighbor scan skipped {skipped} of {} catalog entries", catalog.len());
    }

    let mut live_count = 0usize;
    let mut records: Vec<NeighborRecord> = Vec::with_capacity(catalog.len() - skipped);
    for item in scanned.into_iter().flatten() {
        let (record, in_band) = item;
        if in_band {
            live_count += 1;
        }
        records.push(record);
    }

    sort_records(&mut records);

    debug!(
        "neighbor scan ranked {} objects at {epoch} ({} in band)",
        records.len(),
        live_count
    );

    Ok(NeighborScan {
        records,
        skipped,
        live_count_in_band: band.map(|_| live_count),
    })
}

/// Rank records ascending by separation. The sort is stable, so exact ties keep their
/// catalog order — the tie-break contract callers rely on for reproducibility.
fn sort_records(records: &mut [NeighborRecord]) {
    records.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
}

#[cfg(test)]
mod neighbors_test {
    use super::*;

    #[test]
    fn test_density_factor_clamped() {
        let params = DensityParams::default();
        assert_eq!(density_factor(0, &params), 0.2);
        assert!((density_factor(40, &params) - 0.7).abs() < 1e-12);
        // Saturation at the configured maximum.
        assert_eq!(density_factor(100_000, &params), 2.0);

        let launch = DensityParams::launch_defaults();
        assert_eq!(density_factor(0, &launch), 0.1);
        assert_eq!(density_factor(100_000, &launch), 1.5);
    }

    #[test]
    fn test_band_membership() {
        let band = DensityBand::around(550.0, 53.0);
        assert!(band.contains(550.0, 53.0));
        assert!(band.contains(599.9, 62.9));
        assert!(band.contains(500.1, 43.1));
        assert!(!band.contains(601.0, 53.0));
        assert!(!band.contains(550.0, 64.0));
    }

    #[test]
    fn test_ranking_ascending_with_stable_ties() {
        let mut records = vec![
            record("FAR", 5000.0),
            record("TIE FIRST", 10.0),
            record("MID", 500.0),
            record("TIE SECOND", 10.0),
        ];
        sort_records(&mut records);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        // Exact ties keep catalog order: TIE FIRST stays ahead of TIE SECOND.
        assert_eq!(names, ["TIE FIRST", "TIE SECOND", "MID", "FAR"]);
    }

    #[test]
    fn test_nearest_excludes_target() {
        let scan = NeighborScan {
            records: vec![
                record("TARGET", 0.0),
                record("A", 10.0),
                record("B", 500.0),
                record("C", 5000.0),
            ],
            skipped: 0,
            live_count_in_band: None,
        };
        let nearest = scan.nearest(2, Some("TARGET"));
        assert_eq!(nearest.len(), 2);
        assert_eq!(nearest[0].name, "A");
        assert_eq!(nearest[1].name, "B");
    }

    fn record(name: &str, distance_km: f64) -> NeighborRecord {
        NeighborRecord {
            name: name.to_string(),
            distance_km,
            elements: ElementSet::from_tle(
                name,
                "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927",
                "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537",
            )
            .unwrap(),
        }
    }
}
