//! # Skywatch environment and catalog transport
//!
//! This module defines [`SkywatchEnv`], the shared environment object holding the
//! persistent HTTP client used to reach the element-set provider. It is designed to be
//! cheaply cloneable and passed to orchestration code that needs catalog data.
//!
//! ## Structure
//!
//! ```text
//! SkywatchEnv
//! └── http_client (ureq::Agent)
//! ```
//!
//! ## Failure policy
//! -----------------
//! Transport failures are terminal for the request that triggered them and surface
//! immediately as [`SkywatchError`]; retry policy, if any, belongs to the caller.

use std::time::Duration;

use log::debug;
use ureq::Agent;

use crate::catalog::{extract_first_tle, parse_catalog_text, CatalogEntry, CatalogParse};
use crate::skywatch_errors::SkywatchError;

/// CelesTrak GP endpoint serving the full "active" group as TLE text.
const CELESTRAK_ACTIVE_URL: &str =
    "https://celestrak.org/NORAD/elements/gp.php?GROUP=active&FORMAT=tle";

/// CelesTrak GP endpoint for a single named object.
const CELESTRAK_BY_NAME_URL: &str = "https://celestrak.org/NORAD/elements/gp.php";

/// Shared environment: persistent HTTP client with sensible default settings.
#[derive(Debug, Clone)]
pub struct SkywatchEnv {
    pub http_client: Agent,
}

impl Default for SkywatchEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl SkywatchEnv {
    /// Create a new environment with a 20-second global request timeout.
    pub fn new() -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(20)))
            .build();
        SkywatchEnv {
            http_client: config.into(),
        }
    }

    /// Fetch the raw active-catalog TLE dump and parse it into entries.
    ///
    /// Return
    /// ----------
    /// * The parsed catalog (with its dropped-group count), or a [`SkywatchError`] on
    ///   transport failure.
    pub fn fetch_active_catalog(&self) -> Result<CatalogParse, SkywatchError> {
        let text = self.get_text(CELESTRAK_ACTIVE_URL)?;
        let parse = parse_catalog_text(&text);
        debug!(
            "fetched active catalog: {} entries, {} dropped groups",
            parse.entries.len(),
            parse.skipped_groups
        );
        Ok(parse)
    }

    /// Fetch the element set of a single object by name.
    ///
    /// Arguments
    /// -----------------
    /// * `name`: the object name as known to the provider (e.g. `"ISS (ZARYA)"`).
    ///
    /// Return
    /// ----------
    /// * The first element set of the response, or [`SkywatchError::EmptyTleResponse`] /
    ///   [`SkywatchError::MalformedTleResponse`] when the provider returns nothing usable.
    pub fn fetch_elements_by_name(&self, name: &str) -> Result<CatalogEntry, SkywatchError> {
        let url = format!("{CELESTRAK_BY_NAME_URL}?NAME={}&FORMAT=TLE", urlencode(name));
        let text = self.get_text(&url)?;
        if text.trim().is_empty() {
            return Err(SkywatchError::EmptyTleResponse(name.to_string()));
        }
        extract_first_tle(&text, name)
    }

    fn get_text(&self, url: &str) -> Result<String, SkywatchError> {
        Ok(self.http_client.get(url).call()?.body_mut().read_to_string()?)
    }
}

/// Minimal percent-encoding for the query value (space and reserved characters only;
/// catalog names are plain ASCII).
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
