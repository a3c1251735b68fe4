use std::fmt::{Display, Formatter};

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

use crate::ValidationError;

const DATE_ONLY: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DATE_TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const DATE_TIME_MINUTES: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

/// Calendar timestamp of a raw series point, exactly as the provider encoded it.
///
/// No timezone is attached. Ordering is plain calendar ordering, which is what windowing needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesTimestamp(PrimitiveDateTime);

impl SeriesTimestamp {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let invalid = || ValidationError::InvalidTimestamp {
            value: input.to_owned(),
        };

        let parsed = match trimmed.len() {
            10 => Date::parse(trimmed, DATE_ONLY)
                .map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT)),
            16 => PrimitiveDateTime::parse(trimmed, DATE_TIME_MINUTES),
            _ => PrimitiveDateTime::parse(trimmed, DATE_TIME),
        };

        parsed.map(Self).map_err(|_| invalid())
    }

    pub const fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u8 {
        u8::from(self.0.month())
    }

    pub const fn day(self) -> u8 {
        self.0.day()
    }

    pub const fn hour(self) -> u8 {
        self.0.hour()
    }
}

impl Display for SeriesTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0.format(DATE_TIME) {
            Ok(value) => f.write_str(&value),
            Err(_) => Err(std::fmt::Error),
        }
    }
}
