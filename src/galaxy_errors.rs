use thiserror::Error;

/// Reason attached to a [`GalaxyError::FetchFailed`].
///
/// Every way a catalog request can go wrong collapses into a single
/// `FetchFailed` error for the caller; this enum only keeps the cause
/// for diagnostics.
#[derive(Error, Debug)]
pub enum FetchFailure {
    #[error("sample size {0} outside the accepted range {1}..={2}")]
    InvalidLimit(u32, u32, u32),

    #[error("HTTP reqwest error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TAP service answered with status {0}")]
    Status(u16),

    #[error("TAP service error: {0}")]
    ServiceError(String),

    #[error("Unable to decode the TAP CSV response: {0}")]
    Decode(#[from] csv::Error),

    #[error("TAP service returned no rows")]
    EmptyResult,

    #[error("Unable to start the async runtime: {0}")]
    Runtime(std::io::Error),
}

#[derive(Error, Debug)]
pub enum GalaxyError {
    #[error("Gaia fetch failed: {0}")]
    FetchFailed(#[from] FetchFailure),

    #[error("Invalid dashboard control: {0}")]
    InvalidControl(String),

    #[error("Invalid star record at row {0}: {1}")]
    InvalidRecord(usize, String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("UTF-8 Path error: {0}")]
    Utf8PathError(String),

    #[error("Unable to draw chart {0}: {1}")]
    ChartError(String, String),
}

impl PartialEq for FetchFailure {
    fn eq(&self, other: &Self) -> bool {
        use FetchFailure::*;
        match (self, other) {
            (InvalidLimit(a, b, c), InvalidLimit(x, y, z)) => a == x && b == y && c == z,
            (Status(a), Status(b)) => a == b,
            (ServiceError(a), ServiceError(b)) => a == b,

            // Not comparable: equal when the variant matches
            (Http(_), Http(_)) => true,
            (Decode(_), Decode(_)) => true,
            (Runtime(_), Runtime(_)) => true,

            (EmptyResult, EmptyResult) => true,

            _ => false,
        }
    }
}

impl PartialEq for GalaxyError {
    fn eq(&self, other: &Self) -> bool {
        use GalaxyError::*;
        match (self, other) {
            (FetchFailed(a), FetchFailed(b)) => a == b,
            (InvalidControl(a), InvalidControl(b)) => a == b,
            (InvalidRecord(a, b), InvalidRecord(x, y)) => a == x && b == y,
            (Utf8PathError(a), Utf8PathError(b)) => a == b,
            (ChartError(a, b), ChartError(x, y)) => a == x && b == y,

            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            _ => false,
        }
    }
}
