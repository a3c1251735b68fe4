use std::collections::HashMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{SeriesTimestamp, Symbol, ValidationError};

/// One upstream series entry, still in the provider's string encoding.
///
/// Numbers are accepted in place of strings. A missing price decodes as an empty string and is
/// rejected later by [`Ohlcv::from_raw`], so one bad entry never fails the whole series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSeriesPoint {
    #[serde(rename = "1. open", default, deserialize_with = "text_or_number")]
    pub open: String,
    #[serde(rename = "2. high", default, deserialize_with = "text_or_number")]
    pub high: String,
    #[serde(rename = "3. low", default, deserialize_with = "text_or_number")]
    pub low: String,
    #[serde(rename = "4. close", default, deserialize_with = "text_or_number")]
    pub close: String,
    #[serde(rename = "5. volume", default, deserialize_with = "optional_text_or_number")]
    pub volume: Option<String>,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    optional_text_or_number(deserializer).map(Option::unwrap_or_default)
}

fn optional_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        other => Err(D::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

/// Timestamp key → raw point. Iteration order carries no meaning.
pub type RawSeries = HashMap<String, RawSeriesPoint>;

/// Canonical per-period price record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ohlcv {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Ohlcv {
    pub fn new(
        date: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        Ok(Self {
            date: date.into(),
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Decodes a raw point, labelling it with an already formatted date.
    pub fn from_raw(
        date: impl Into<String>,
        raw: &RawSeriesPoint,
    ) -> Result<Self, ValidationError> {
        Self::new(
            date,
            parse_price("open", &raw.open)?,
            parse_price("high", &raw.high)?,
            parse_price("low", &raw.low)?,
            parse_price("close", &raw.close)?,
            parse_volume(raw.volume.as_deref())?,
        )
    }
}

/// Validated point with its parsed timestamp, the unit the normalizer sorts and slices.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedPoint {
    /// Provider key, kept as a tie-breaker for identical calendar times.
    pub key: String,
    pub ts: SeriesTimestamp,
    pub bar: Ohlcv,
}

/// Window-over-window price movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChange {
    pub current: f64,
    pub previous: f64,
    pub change: f64,
    pub percent_change: f64,
}

/// Normalized series plus change figures for one symbol and range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub symbol: Symbol,
    pub name: String,
    pub current: f64,
    pub previous: f64,
    pub change: f64,
    pub percent_change: f64,
    /// Oldest first.
    pub time_series: Vec<Ohlcv>,
}

impl StockSummary {
    pub fn new(symbol: Symbol, name: String, change: PriceChange, time_series: Vec<Ohlcv>) -> Self {
        Self {
            symbol,
            name,
            current: change.current,
            previous: change.previous,
            change: change.change,
            percent_change: change.percent_change,
            time_series,
        }
    }
}

/// Endpoint payload: the summary plus its generated prose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    pub stock_data: StockSummary,
    pub ai_analysis: String,
}

/// Ranked symbol-search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMatch {
    pub symbol: String,
    pub name: String,
}

/// Company overview; only the display name is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyOverview {
    pub name: Option<String>,
}

impl CompanyOverview {
    /// Non-blank display name, if the provider sent one.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

fn parse_price(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    let parsed = value
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: value.to_owned(),
        })?;
    validate_non_negative(field, parsed)?;
    Ok(parsed)
}

fn parse_volume(value: Option<&str>) -> Result<u64, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(0),
        Some(text) => text.parse::<u64>().map_err(|_| ValidationError::NotANumber {
            field: "volume",
            value: text.to_owned(),
        }),
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
