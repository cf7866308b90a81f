//! # Skywatch: conjunction search and collision risk scoring
//!
//! Given the propagated trajectories of a target object and a set of catalog neighbors,
//! this crate locates the time and distance of closest approach over a bounded horizon,
//! computes the relative velocity at that instant, and converts geometry plus local
//! object density into a bounded risk figure. A companion model estimates the
//! Poisson/Monte-Carlo encounter probability of a hypothetical launch over its mission
//! lifetime.
//!
//! ## Pipeline
//!
//! ```text
//! catalog text ──> catalog ──> neighbors ──> conjunction ──> risk
//!                                 │
//!                                 └──> density factor ──> launch (independent)
//! ```
//!
//! The orbit propagator is an external collaborator (the `sgp4` crate) behind the
//! [`Propagator`] trait, so every search routine is testable against synthetic
//! trajectories with analytically known geometry.

pub mod cancel;
pub mod catalog;
pub mod conjunction;
pub mod constants;
pub mod elements;
pub mod launch;
pub mod neighbors;
pub mod propagation;
pub mod ref_frames;
pub mod risk;
pub mod series;
pub mod skywatch_errors;
pub mod transport;

pub use cancel::CancelToken;
pub use catalog::{extract_first_tle, parse_catalog_text, CatalogEntry, CatalogParse};
pub use conjunction::{search_conjunction, ConjunctionResult, SearchParams};
pub use elements::ElementSet;
pub use launch::{
    estimate_cross_section, estimate_launch_risk, heuristic_density, monte_carlo_probability,
    poisson_probability, LaunchRiskEstimate, LaunchRiskParams, SizeClass,
};
pub use neighbors::{
    density_factor, find_neighbors, DensityBand, DensityParams, NeighborRecord, NeighborScan,
};
pub use propagation::{relative_velocity, Frame, Propagator, StateVector};
pub use ref_frames::{eci_to_ecf, eci_to_geodetic, gmst, gmst_at_epoch, separation_km, Geodetic};
pub use risk::{score_risk, RiskParams};
pub use series::{resample_risk_series, synthetic_risk_series, RiskSample, SeriesParams};
pub use skywatch_errors::SkywatchError;
pub use transport::SkywatchEnv;
