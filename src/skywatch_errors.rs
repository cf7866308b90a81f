use thiserror::Error;

/// Crate-level error type.
///
/// Failure modes are scoped to a single request: a per-step propagation failure inside a
/// batch (neighbor scan, conjunction search) is *not* surfaced through this type — the
/// policy there is skip-and-continue, with the skip count reported in the result value.
/// This enum covers the terminal failures: element-set construction, transport, and an
/// explicitly cancelled request.
#[derive(Error, Debug)]
pub enum SkywatchError {
    #[error("TLE element parsing failed: {0}")]
    TleParsing(String),

    #[error("SGP4 propagation failed: {0}")]
    Propagation(String),

    #[error("HTTP ureq error: {0}")]
    UreqHttpError(#[from] ureq::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty TLE response for object: {0}")]
    EmptyTleResponse(String),

    #[error("Malformed TLE response: no adjacent '1 '/'2 ' line pair found")]
    MalformedTleResponse,

    #[error("Request cancelled before completion")]
    Cancelled,
}
