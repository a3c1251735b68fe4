//! # Domain Models
//!
//! Request-scoped types for the series pipeline. Nothing here outlives a single request.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Canonical ticker sent upstream |
//! | [`RangeSpec`] | Range key → upstream shape, window length, formatter |
//! | [`SeriesTimestamp`] | Parsed calendar key of a raw series point |
//! | [`RawSeriesPoint`] | Provider-encoded OHLCV strings |
//! | [`Ohlcv`] | Canonical per-period record |
//! | [`StockSummary`] | Window + change figures for one symbol |
//! | [`StockReport`] | Summary plus generated prose |

mod models;
mod range;
mod symbol;
mod timestamp;

pub use models::{
    CompanyOverview, Ohlcv, PriceChange, RawSeries, RawSeriesPoint, StockReport, StockSummary,
    SymbolMatch, TimedPoint,
};
pub use range::{RangeSpec, SeriesShape, DEFAULT_RANGE_KEY, RANGE_TABLE};
pub use symbol::Symbol;
pub use timestamp::SeriesTimestamp;
