//! # Tickerbrief Core
//!
//! Range-aware stock series acquisition and normalization.
//!
//! ## Overview
//!
//! Given a ticker or company name and a range key, the pipeline:
//!
//! - resolves the query to a canonical [`Symbol`] (symbol search only for name-like queries)
//! - picks the upstream query shape, window length and date formatter from [`RANGE_TABLE`]
//! - fetches the raw series, sorts it by calendar time and keeps the newest window
//! - computes current/previous/percent change over exactly that window
//! - enriches with a display name and a generated prose summary, both best-effort
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Alpha Vantage market data and Gemini text generation |
//! | [`analysis`] | Prompt construction and fallback-on-failure summaries |
//! | [`change`] | Window-over-window change figures |
//! | [`config`] | Explicit adapter credentials and endpoints |
//! | [`domain`] | Request-scoped domain types |
//! | [`error`] | Validation errors |
//! | [`format`] | Per-granularity date formatters |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`normalize`] | Payload validation, ordering and windowing |
//! | [`pipeline`] | [`StockService`] orchestration |
//! | [`provider`] | Provider contract and [`SourceError`] |
//! | [`resolver`] | Ticker/company-name resolution |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickerbrief_core::{
//!     AlphaVantageAdapter, AlphaVantageConfig, GeminiAdapter, GeminiConfig, StockService,
//! };
//!
//! let service = StockService::new(
//!     Arc::new(AlphaVantageAdapter::new(AlphaVantageConfig::new("av-key"))),
//!     Arc::new(GeminiAdapter::new(GeminiConfig::new("gemini-key"))),
//! );
//! let report = service.report("IBM", "1w").await?;
//! println!("{} {:+.2}%", report.stock_data.symbol, report.stock_data.percent_change);
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use tickerbrief_core::{SourceError, SourceErrorKind};
//!
//! fn describe(error: &SourceError) -> &'static str {
//!     match error.kind() {
//!         SourceErrorKind::SymbolNotFound | SourceErrorKind::InvalidSymbol => "unknown ticker",
//!         SourceErrorKind::NoDataAvailable => "no series for this range",
//!         SourceErrorKind::UpstreamUnavailable => "provider unreachable",
//!         _ => "request failed",
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - API keys are passed in explicitly and never appear in `Debug` output or logs

pub mod adapters;
pub mod analysis;
pub mod change;
pub mod config;
pub mod domain;
pub mod error;
pub mod format;
pub mod http_client;
pub mod normalize;
pub mod pipeline;
pub mod provider;
pub mod resolver;

pub use adapters::{AlphaVantageAdapter, GeminiAdapter};

pub use analysis::{build_prompt, summarize, TextGenerator, FALLBACK_ANALYSIS};

pub use config::{AlphaVantageConfig, ApiKey, GeminiConfig};

pub use domain::{
    CompanyOverview, Ohlcv, PriceChange, RangeSpec, RawSeries, RawSeriesPoint, SeriesShape,
    SeriesTimestamp, StockReport, StockSummary, Symbol, SymbolMatch, TimedPoint,
    DEFAULT_RANGE_KEY, RANGE_TABLE,
};

pub use error::ValidationError;

pub use format::DateFormat;

pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
};

pub use normalize::{normalize_series, NormalizedSeries};

pub use pipeline::StockService;

pub use provider::{
    MarketDataProvider, SeriesRequest, SourceError, SourceErrorKind, TimeSeriesPayload,
};

pub use resolver::{looks_like_company_name, resolve_symbol};
