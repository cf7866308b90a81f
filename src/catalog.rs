//! # TLE catalog parsing
//!
//! Utilities to turn a raw multi-object two-line-element text dump into structured
//! [`CatalogEntry`] records, and to extract a single element set from a lookup response.
//!
//! ## Wire format
//! -----------------
//! The catalog text is UTF-8, with logical records of exactly three non-empty lines:
//! object name, then a line beginning with the literal two characters `"1 "`, then a line
//! beginning with `"2 "`. Blank lines are stripped before grouping.
//!
//! ## Malformed records
//! -----------------
//! A group failing the `"1 "`/`"2 "` prefix check is dropped and the parse advances by
//! three lines regardless — malformed groups are **not** realigned. A single corrupt line
//! therefore desynchronizes every subsequent group-of-three for the remainder of the
//! text. This mirrors the upstream catalog producers' framing assumption; the number of
//! dropped groups is reported in [`CatalogParse::skipped_groups`] so callers can observe
//! the degradation instead of it being invisible.

use itertools::Itertools;
use log::warn;

use crate::skywatch_errors::SkywatchError;

/// One raw catalog record: object name plus its two element lines.
///
/// Entries are immutable after parsing; insertion order from the source text carries no
/// meaning downstream (the neighbor selector re-ranks by separation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

/// Outcome of a catalog parse: the accepted records and the count of dropped groups.
#[derive(Debug, Clone, Default)]
pub struct CatalogParse {
    pub entries: Vec<CatalogEntry>,
    pub skipped_groups: usize,
}

/// Parse a raw multi-object TLE text dump into catalog entries.
///
/// Arguments
/// -----------------
/// * `text`: the raw catalog body (name + line 1 + line 2, repeating).
///
/// Return
/// ----------
/// * A [`CatalogParse`] with all well-formed records in source order and the number of
///   three-line groups dropped by the prefix check. A trailing partial group (fewer than
///   three lines) is ignored.
pub fn parse_catalog_text(text: &str) -> CatalogParse {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut parse = CatalogParse::default();
    for (name, line1, line2) in lines.iter().tuples() {
        if line1.starts_with("1 ") && line2.starts_with("2 ") {
            parse.entries.push(CatalogEntry {
                name: name.to_string(),
                line1: line1.to_string(),
                line2: line2.to_string(),
            });
        } else {
            parse.skipped_groups += 1;
        }
    }
    if parse.skipped_groups > 0 {
        warn!(
            "catalog parse dropped {} malformed group(s) out of {}",
            parse.skipped_groups,
            parse.entries.len() + parse.skipped_groups
        );
    }
    parse
}

/// Extract the **first** element set from a single-object lookup response.
///
/// Unlike [`parse_catalog_text`], this scans for the first adjacent `"1 "`/`"2 "` line
/// pair instead of marching in groups of three, so it tolerates responses with or
/// without a leading name line (including the `0 SATNAME` convention).
///
/// Arguments
/// -----------------
/// * `text`: the raw lookup response body.
/// * `fallback_name`: name to use when the response carries no name line (typically the
///   query string).
///
/// Return
/// ----------
/// * The first [`CatalogEntry`] found, or [`SkywatchError::MalformedTleResponse`] if no
///   adjacent line pair exists.
pub fn extract_first_tle(text: &str, fallback_name: &str) -> Result<CatalogEntry, SkywatchError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    for i in 0..lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            let name = if i > 0 && !lines[i - 1].starts_with("1 ") && !lines[i - 1].starts_with("2 ")
            {
                lines[i - 1].trim_start_matches("0 ").trim().to_string()
            } else {
                fallback_name.to_string()
            };
            return Ok(CatalogEntry {
                name,
                line1: lines[i].to_string(),
                line2: lines[i + 1].to_string(),
            });
        }
    }
    Err(SkywatchError::MalformedTleResponse)
}

#[cfg(test)]
mod catalog_test {
    use super::*;

    fn record(name: &str) -> String {
        format!("{name}\n1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927\n2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537\n")
    }

    #[test]
    fn test_well_formed_catalog() {
        let text = format!("{}{}{}", record("SAT A"), record("SAT B"), record("SAT C"));
        let parse = parse_catalog_text(&text);
        assert_eq!(parse.entries.len(), 3);
        assert_eq!(parse.skipped_groups, 0);
        assert_eq!(parse.entries[0].name, "SAT A");
        assert_eq!(parse.entries[2].name, "SAT C");
        assert!(parse.entries[1].line1.starts_with("1 "));
    }

    #[test]
    fn test_blank_lines_stripped_before_grouping() {
        let text = format!("\n{}\n\n{}\n", record("SAT A"), record("SAT B"));
        let parse = parse_catalog_text(&text);
        assert_eq!(parse.entries.len(), 2);
        assert_eq!(parse.skipped_groups, 0);
    }

    #[test]
    fn test_malformed_group_drops_without_realigning() {
        // One stray line inserted before the second record shifts every subsequent
        // group-of-three: the parser drops groups, it never rescans for a "1 " line.
        let text = format!("{}GARBAGE LINE\n{}{}", record("SAT A"), record("SAT B"), record("SAT C"));
        let parse = parse_catalog_text(&text);
        assert_eq!(parse.entries.len(), 1);
        assert_eq!(parse.entries[0].name, "SAT A");
        assert_eq!(parse.skipped_groups, 2);
    }

    #[test]
    fn test_trailing_partial_group_ignored() {
        let text = format!("{}LONE NAME\n1 00005U 58002B", record("SAT A"));
        let parse = parse_catalog_text(&text);
        assert_eq!(parse.entries.len(), 1);
        assert_eq!(parse.skipped_groups, 0);
    }

    #[test]
    fn test_extract_first_tle_with_name_line() {
        let entry = extract_first_tle(&record("ISS (ZARYA)"), "fallback").unwrap();
        assert_eq!(entry.name, "ISS (ZARYA)");
        assert!(entry.line1.starts_with("1 25544"));
        assert!(entry.line2.starts_with("2 25544"));
    }

    #[test]
    fn test_extract_first_tle_zero_prefixed_name() {
        let entry = extract_first_tle(&record("0 ISS (ZARYA)"), "fallback").unwrap();
        assert_eq!(entry.name, "ISS (ZARYA)");
    }

    #[test]
    fn test_extract_first_tle_without_name_line() {
        let text = record("SAT A");
        let bare: String = text.lines().skip(1).collect::<Vec<_>>().join("\n");
        let entry = extract_first_tle(&bare, "QUERY NAME").unwrap();
        assert_eq!(entry.name, "QUERY NAME");
    }

    #[test]
    fn test_extract_first_tle_malformed() {
        let res = extract_first_tle("no elements here\nat all", "x");
        assert!(matches!(res, Err(SkywatchError::MalformedTleResponse)));
    }
}
