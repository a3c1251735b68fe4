//! Outbound collaborator contracts and the pipeline error type.
//!
//! # Calls
//!
//! | Call | Request | Response |
//! |------|---------|----------|
//! | Symbol search | keywords | ranked [`SymbolMatch`] list |
//! | Time series | [`SeriesRequest`] | [`TimeSeriesPayload`] |
//! | Company overview | [`Symbol`] | [`CompanyOverview`] |
//!
//! Providers only transport and decode. Deciding what an error field or a missing series means
//! is left to the normalizer, so fakes can exercise those paths without a network.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{CompanyOverview, RangeSpec, RawSeries, SeriesShape, Symbol, SymbolMatch};

/// Pipeline failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceErrorKind {
    InvalidRequest,
    SymbolNotFound,
    InvalidSymbol,
    NoDataAvailable,
    DivisionByZero,
    UpstreamUnavailable,
    MalformedResponse,
    TextGenerationUnavailable,
}

/// Structured error carried through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn new(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::InvalidRequest, message)
    }

    pub fn symbol_not_found(query: &str) -> Self {
        Self::new(
            SourceErrorKind::SymbolNotFound,
            format!("Could not find a ticker symbol for \"{query}\""),
        )
    }

    pub fn invalid_symbol(symbol: &Symbol) -> Self {
        Self::new(
            SourceErrorKind::InvalidSymbol,
            format!("Invalid ticker symbol: {symbol}"),
        )
    }

    pub fn no_data(symbol: &Symbol) -> Self {
        Self::new(
            SourceErrorKind::NoDataAvailable,
            format!("No data available for ticker {symbol}"),
        )
    }

    pub fn division_by_zero(symbol: &Symbol) -> Self {
        Self::new(
            SourceErrorKind::DivisionByZero,
            format!("Previous close for {symbol} is zero; percent change is undefined"),
        )
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::UpstreamUnavailable, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::MalformedResponse, message)
    }

    pub fn text_generation(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::TextGenerationUnavailable, message)
    }

    /// Prefixes the message with the user-facing failure context. The kind is preserved.
    pub fn with_context(self, context: impl Display) -> Self {
        Self {
            kind: self.kind,
            message: format!("{context}: {}", self.message),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::InvalidRequest => "stock.invalid_request",
            SourceErrorKind::SymbolNotFound => "stock.symbol_not_found",
            SourceErrorKind::InvalidSymbol => "stock.invalid_symbol",
            SourceErrorKind::NoDataAvailable => "stock.no_data_available",
            SourceErrorKind::DivisionByZero => "stock.division_by_zero",
            SourceErrorKind::UpstreamUnavailable => "upstream.unavailable",
            SourceErrorKind::MalformedResponse => "upstream.malformed_response",
            SourceErrorKind::TextGenerationUnavailable => "text.unavailable",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Parameters of one time-series fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    pub symbol: Symbol,
    pub shape: SeriesShape,
    pub interval: Option<&'static str>,
    pub full_output: bool,
}

impl SeriesRequest {
    pub fn for_range(symbol: Symbol, spec: &RangeSpec) -> Self {
        Self {
            symbol,
            shape: spec.shape,
            interval: spec.interval,
            full_output: spec.wants_full_output(),
        }
    }

    pub fn series_key(&self) -> String {
        self.shape.series_key(self.interval)
    }
}

/// Decoded time-series response before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSeriesPayload {
    /// Explicit upstream rejection, e.g. an unknown symbol.
    pub error_message: Option<String>,
    /// Series under the key expected for the requested shape, if present.
    pub series: Option<RawSeries>,
}

impl TimeSeriesPayload {
    pub fn with_series(series: RawSeries) -> Self {
        Self {
            error_message: None,
            series: Some(series),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            series: None,
        }
    }
}

type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Market-data provider contract.
///
/// Implementations must be `Send + Sync`; one instance serves concurrent requests and holds no
/// per-request state.
pub trait MarketDataProvider: Send + Sync {
    /// Ranked matches for free-text keywords, best first.
    fn search_symbols<'a>(&'a self, keywords: &'a str) -> ProviderFuture<'a, Vec<SymbolMatch>>;

    /// Raw series for one symbol and shape.
    fn time_series<'a>(&'a self, req: SeriesRequest) -> ProviderFuture<'a, TimeSeriesPayload>;

    /// Company overview for a symbol.
    fn company_overview<'a>(&'a self, symbol: &'a Symbol) -> ProviderFuture<'a, CompanyOverview>;
}
