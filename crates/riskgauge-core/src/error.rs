use thiserror::Error;

/// Validation and contract errors exposed by `riskgauge-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("trading day must be an ISO calendar date (YYYY-MM-DD): '{value}'")]
    InvalidDay { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("bar high must be >= low")]
    InvalidBarRange,
    #[error("bar open/close must be within high/low range")]
    InvalidBarBounds,

    #[error("price series must contain at least one bar")]
    EmptySeries,
    #[error("price series days must be strictly increasing (violation at index {index})")]
    UnorderedSeries { index: usize },
    #[error("price series contains duplicate day '{day}'")]
    DuplicateDay { day: String },

    #[error("window '{field}' must be greater than zero")]
    InvalidWindow { field: &'static str },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Failures surfaced by the analytics pipeline itself.
///
/// `InsufficientData` aborts the affected request; per-field gaps such as an
/// unavailable beta are carried as `Option::None` inside the result instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("insufficient data: need at least {required} observations, have {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
