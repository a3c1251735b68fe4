use std::fmt::{Display, Formatter};

use crate::format::DateFormat;
use crate::SeriesTimestamp;

/// Category of upstream time-series query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesShape {
    Intraday,
    Daily,
    Weekly,
    Monthly,
}

impl SeriesShape {
    /// Alpha Vantage `function=` value for this shape.
    pub const fn function(self) -> &'static str {
        match self {
            Self::Intraday => "TIME_SERIES_INTRADAY",
            Self::Daily => "TIME_SERIES_DAILY",
            Self::Weekly => "TIME_SERIES_WEEKLY",
            Self::Monthly => "TIME_SERIES_MONTHLY",
        }
    }

    /// Top-level response key holding the series for this shape.
    pub fn series_key(self, interval: Option<&str>) -> String {
        match self {
            Self::Intraday => format!("Time Series ({})", interval.unwrap_or("60min")),
            Self::Daily => String::from("Time Series (Daily)"),
            Self::Weekly => String::from("Weekly Time Series"),
            Self::Monthly => String::from("Monthly Time Series"),
        }
    }
}

impl Display for SeriesShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.function())
    }
}

/// One row of the range dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    pub key: &'static str,
    pub shape: SeriesShape,
    pub point_count: usize,
    pub date_format: DateFormat,
    /// Only set for intraday shapes.
    pub interval: Option<&'static str>,
    /// Human phrase used in generated summaries.
    pub label: &'static str,
}

const fn row(
    key: &'static str,
    shape: SeriesShape,
    point_count: usize,
    date_format: DateFormat,
    label: &'static str,
) -> RangeSpec {
    RangeSpec {
        key,
        shape,
        point_count,
        date_format,
        interval: None,
        label,
    }
}

/// Range key → upstream query shape, window length and formatter.
///
/// Adding a range is a one-row change here.
pub static RANGE_TABLE: [RangeSpec; 7] = [
    RangeSpec {
        interval: Some("60min"),
        ..row("1d", SeriesShape::Intraday, 24, DateFormat::Intraday, "past day")
    },
    row("1w", SeriesShape::Daily, 7, DateFormat::Daily, "past week"),
    row("1m", SeriesShape::Daily, 30, DateFormat::Daily, "past month"),
    row("3m", SeriesShape::Daily, 90, DateFormat::Daily, "past 3 months"),
    row("6m", SeriesShape::Daily, 180, DateFormat::Daily, "past 6 months"),
    row("1y", SeriesShape::Weekly, 52, DateFormat::Weekly, "past year"),
    row("5y", SeriesShape::Monthly, 60, DateFormat::Monthly, "past 5 years"),
];

const DEFAULT_RANGE_INDEX: usize = 1;

/// Range key used by the HTTP surface when the caller omits `range`.
pub const DEFAULT_RANGE_KEY: &str = "1d";

impl RangeSpec {
    /// Looks up a range key. Unknown keys resolve to the one-week daily row.
    pub fn resolve(key: &str) -> &'static RangeSpec {
        RANGE_TABLE
            .iter()
            .find(|spec| spec.key == key)
            .unwrap_or(&RANGE_TABLE[DEFAULT_RANGE_INDEX])
    }

    pub fn format_date(&self, ts: SeriesTimestamp) -> String {
        self.date_format.format(ts)
    }

    pub fn series_key(&self) -> String {
        self.shape.series_key(self.interval)
    }

    pub const fn wants_full_output(&self) -> bool {
        matches!(self.shape, SeriesShape::Intraday)
    }
}
