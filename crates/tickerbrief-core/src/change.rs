//! Window-over-window change figures.

use crate::provider::SourceError;
use crate::{PriceChange, Symbol, TimedPoint};

/// Index of the point just before a `point_count` window at the end of `total` points.
pub const fn previous_anchor_index(total: usize, point_count: usize) -> usize {
    total.saturating_sub(point_count.saturating_add(1))
}

/// Computes current/previous/change/percent over the full ascending point list.
///
/// `current` is the newest close. `previous` is the close just before the display window, or
/// the earliest close when history is shorter than the window. A zero previous close is
/// `DivisionByZero`; no NaN or infinity is ever returned.
pub fn compute_change(
    symbol: &Symbol,
    points: &[TimedPoint],
    point_count: usize,
) -> Result<PriceChange, SourceError> {
    let newest = points.last().ok_or_else(|| SourceError::no_data(symbol))?;
    let anchor = points
        .get(previous_anchor_index(points.len(), point_count))
        .or_else(|| points.first())
        .ok_or_else(|| SourceError::no_data(symbol))?;

    let current = newest.bar.close;
    let previous = anchor.bar.close;
    if previous == 0.0 {
        return Err(SourceError::division_by_zero(symbol));
    }

    let change = current - previous;
    let percent_change = change / previous * 100.0;
    if !percent_change.is_finite() {
        return Err(SourceError::division_by_zero(symbol));
    }

    Ok(PriceChange {
        current,
        previous,
        change,
        percent_change,
    })
}
