use thiserror::Error;

/// Validation and contract errors exposed by `tickerbrief-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("query cannot be empty")]
    EmptyQuery,
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains control character at index {index}")]
    SymbolControlChar { index: usize },

    #[error("timestamp must be YYYY-MM-DD or YYYY-MM-DD HH:MM[:SS]: '{value}'")]
    InvalidTimestamp { value: String },

    #[error("field '{field}' is not a number: '{value}'")]
    NotANumber { field: &'static str, value: String },
    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
}
