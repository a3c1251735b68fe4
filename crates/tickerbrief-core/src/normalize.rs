//! Raw provider series → ordered, windowed OHLCV.

use tracing::{debug, warn};

use crate::change::compute_change;
use crate::provider::{SourceError, TimeSeriesPayload};
use crate::{Ohlcv, PriceChange, RangeSpec, RawSeries, SeriesTimestamp, Symbol, TimedPoint};

/// Display window plus the change figures computed over the full history.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeries {
    /// Oldest first, at most `point_count` entries.
    pub window: Vec<Ohlcv>,
    pub change: PriceChange,
}

/// Checks an upstream payload: an explicit error is `InvalidSymbol`, a missing series is
/// `NoDataAvailable`.
pub fn validate_payload(
    symbol: &Symbol,
    payload: TimeSeriesPayload,
) -> Result<RawSeries, SourceError> {
    if let Some(message) = payload.error_message {
        debug!(%symbol, upstream = %message, "provider rejected symbol");
        return Err(SourceError::invalid_symbol(symbol));
    }

    payload.series.ok_or_else(|| SourceError::no_data(symbol))
}

/// Decodes every entry and sorts ascending by calendar time.
///
/// Provider iteration order is never trusted. Entries with a malformed timestamp or price are
/// dropped with a warning.
pub fn collect_points(symbol: &Symbol, series: RawSeries, spec: &RangeSpec) -> Vec<TimedPoint> {
    let mut points = Vec::with_capacity(series.len());

    for (key, raw) in series {
        let ts = match SeriesTimestamp::parse(&key) {
            Ok(ts) => ts,
            Err(error) => {
                warn!(%symbol, %error, "dropping series entry");
                continue;
            }
        };

        match Ohlcv::from_raw(spec.format_date(ts), &raw) {
            Ok(bar) => points.push(TimedPoint { key, ts, bar }),
            Err(error) => warn!(%symbol, key = %key, %error, "dropping series entry"),
        }
    }

    points.sort_by(|left, right| left.ts.cmp(&right.ts).then_with(|| left.key.cmp(&right.key)));
    points
}

/// Last `point_count` bars of an ascending point list.
pub fn display_window(points: &[TimedPoint], point_count: usize) -> Vec<Ohlcv> {
    let start = points.len().saturating_sub(point_count);
    points[start..].iter().map(|point| point.bar.clone()).collect()
}

/// Validates, orders and windows one payload, then computes the change over that window.
pub fn normalize_series(
    symbol: &Symbol,
    payload: TimeSeriesPayload,
    spec: &RangeSpec,
) -> Result<NormalizedSeries, SourceError> {
    let series = validate_payload(symbol, payload)?;
    let points = collect_points(symbol, series, spec);
    if points.is_empty() {
        return Err(SourceError::no_data(symbol));
    }

    let change = compute_change(symbol, &points, spec.point_count)?;
    let window = display_window(&points, spec.point_count);

    Ok(NormalizedSeries { window, change })
}
