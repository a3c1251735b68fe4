//! Display formatting for series timestamps.
//!
//! One pure function per upstream granularity. Calendar fields are used exactly as the provider
//! encoded them; nothing is shifted into a local timezone.
//!
//! | Format | Example input | Output |
//! |--------|---------------|--------|
//! | [`DateFormat::Intraday`] | `2024-04-15 14:00:00` | `2PM` |
//! | [`DateFormat::Daily`] | `2024-04-15` | `4/15` |
//! | [`DateFormat::Weekly`] | `2024-04-12` | `4/12` |
//! | [`DateFormat::Monthly`] | `2024-03-28` | `3/2024` |

use crate::SeriesTimestamp;

/// Formatter selector carried by each range row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    Intraday,
    Daily,
    Weekly,
    Monthly,
}

impl DateFormat {
    pub fn format(self, ts: SeriesTimestamp) -> String {
        match self {
            Self::Intraday => format_intraday(ts),
            Self::Daily => format_daily(ts),
            Self::Weekly => format_weekly(ts),
            Self::Monthly => format_monthly(ts),
        }
    }
}

/// 12-hour clock hour with AM/PM suffix, e.g. `2PM`, `12AM`.
pub fn format_intraday(ts: SeriesTimestamp) -> String {
    let hour = ts.hour();
    let display_hour = match hour % 12 {
        0 => 12,
        other => other,
    };
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    format!("{display_hour}{suffix}")
}

/// `month/day` without zero padding.
pub fn format_daily(ts: SeriesTimestamp) -> String {
    format!("{}/{}", ts.month(), ts.day())
}

/// Weekly bars are labelled by the bar's own date, same shape as daily.
pub fn format_weekly(ts: SeriesTimestamp) -> String {
    format_daily(ts)
}

/// `month/year` without zero padding.
pub fn format_monthly(ts: SeriesTimestamp) -> String {
    format!("{}/{}", ts.month(), ts.year())
}
