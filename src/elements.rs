//! # SGP4-backed orbital element sets
//!
//! [`ElementSet`] wraps the external SGP4 propagator (`sgp4` crate): it owns the parsed
//! mean elements of one object together with the precomputed propagation constants, and
//! exposes them through the [`Propagator`] seam. The handle is immutable after creation
//! and cheap to query; each query recomputes a fresh [`StateVector`].

use chrono::{Datelike, Timelike};
use hifitime::Epoch;
use nalgebra::Vector3;

use crate::catalog::CatalogEntry;
use crate::constants::Degree;
use crate::propagation::{Frame, Propagator, StateVector};
use crate::skywatch_errors::SkywatchError;

/// Opaque handle over one object's mean orbital elements.
pub struct ElementSet {
    /// Object name as it appeared in the catalog.
    pub name: String,
    /// Epoch of the element set.
    pub epoch: Epoch,
    /// Mean inclination from line 2, in degrees. Used by the density-band test.
    pub inclination_deg: Degree,
    constants: sgp4::Constants,
}

impl std::fmt::Debug for ElementSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementSet")
            .field("name", &self.name)
            .field("epoch", &self.epoch)
            .field("inclination_deg", &self.inclination_deg)
            .finish_non_exhaustive()
    }
}

impl ElementSet {
    /// Build an element set from two raw TLE lines.
    ///
    /// Arguments
    /// -----------------
    /// * `name`: object name (kept for result labelling).
    /// * `line1`, `line2`: the raw element lines, `"1 "`/`"2 "` framed.
    ///
    /// Return
    /// ----------
    /// * A ready-to-propagate [`ElementSet`], or a [`SkywatchError`] if the lines fail
    ///   element parsing or SGP4 initialization.
    pub fn from_tle(name: &str, line1: &str, line2: &str) -> Result<Self, SkywatchError> {
        let elements =
            sgp4::Elements::from_tle(Some(name.to_owned()), line1.as_bytes(), line2.as_bytes())
                .map_err(|e| SkywatchError::TleParsing(e.to_string()))?;
        let constants = sgp4::Constants::from_elements(&elements)
            .map_err(|e| SkywatchError::TleParsing(e.to_string()))?;
        Ok(ElementSet {
            name: name.to_owned(),
            epoch: epoch_from_datetime(&elements.datetime),
            inclination_deg: elements.inclination,
            constants,
        })
    }

    /// Build an element set from a parsed [`CatalogEntry`].
    pub fn from_catalog_entry(entry: &CatalogEntry) -> Result<Self, SkywatchError> {
        Self::from_tle(&entry.name, &entry.line1, &entry.line2)
    }
}

impl Propagator for ElementSet {
    fn state_at(&self, epoch: Epoch) -> Result<StateVector, SkywatchError> {
        let minutes = (epoch - self.epoch).to_seconds() / 60.0;
        let prediction = self
            .constants
            .propagate(sgp4::MinutesSinceEpoch(minutes))
            .map_err(|e| SkywatchError::Propagation(e.to_string()))?;
        Ok(StateVector {
            frame: Frame::Teme,
            epoch,
            position: Vector3::from(prediction.position),
            velocity: Some(Vector3::from(prediction.velocity)),
        })
    }
}

/// Convert the chrono element-set epoch reported by the `sgp4` crate into a hifitime
/// [`Epoch`] (UTC).
fn epoch_from_datetime(datetime: &chrono::NaiveDateTime) -> Epoch {
    Epoch::from_gregorian_utc(
        datetime.year(),
        datetime.month() as u8,
        datetime.day() as u8,
        datetime.hour() as u8,
        datetime.minute() as u8,
        datetime.second() as u8,
        datetime.nanosecond(),
    )
}
