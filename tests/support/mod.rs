//! In-memory collaborators shared by the behavior tests.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tickerbrief_core::{
    CompanyOverview, MarketDataProvider, RawSeries, RawSeriesPoint, SeriesRequest, SeriesShape,
    SourceError, StockService, Symbol, SymbolMatch, TextGenerator, TimeSeriesPayload,
};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Market data provider answering from fixtures and recording every call in order.
#[derive(Default)]
pub struct InMemoryProvider {
    search_results: Vec<SymbolMatch>,
    series: HashMap<(String, SeriesShape), TimeSeriesPayload>,
    series_error: Option<SourceError>,
    overviews: HashMap<String, CompanyOverview>,
    calls: Mutex<Vec<String>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_result(mut self, symbol: &str, name: &str) -> Self {
        self.search_results.push(SymbolMatch {
            symbol: symbol.to_owned(),
            name: name.to_owned(),
        });
        self
    }

    pub fn with_series(mut self, symbol: &str, shape: SeriesShape, series: RawSeries) -> Self {
        self.series.insert(
            (symbol.to_owned(), shape),
            TimeSeriesPayload::with_series(series),
        );
        self
    }

    pub fn with_rejection(mut self, symbol: &str, shape: SeriesShape, message: &str) -> Self {
        self.series.insert(
            (symbol.to_owned(), shape),
            TimeSeriesPayload::rejected(message),
        );
        self
    }

    pub fn with_series_error(mut self, error: SourceError) -> Self {
        self.series_error = Some(error);
        self
    }

    pub fn with_overview(mut self, symbol: &str, name: &str) -> Self {
        self.overviews.insert(
            symbol.to_owned(),
            CompanyOverview {
                name: Some(name.to_owned()),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl MarketDataProvider for InMemoryProvider {
    fn search_symbols<'a>(&'a self, keywords: &'a str) -> BoxFuture<'a, Vec<SymbolMatch>> {
        Box::pin(async move {
            self.record(format!("search:{keywords}"));
            Ok(self.search_results.clone())
        })
    }

    fn time_series<'a>(&'a self, req: SeriesRequest) -> BoxFuture<'a, TimeSeriesPayload> {
        Box::pin(async move {
            self.record(format!("series:{}:{}", req.symbol, req.shape.function()));
            if let Some(error) = &self.series_error {
                return Err(error.clone());
            }
            Ok(self
                .series
                .get(&(req.symbol.to_string(), req.shape))
                .cloned()
                .unwrap_or_default())
        })
    }

    fn company_overview<'a>(&'a self, symbol: &'a Symbol) -> BoxFuture<'a, CompanyOverview> {
        Box::pin(async move {
            self.record(format!("overview:{symbol}"));
            self.overviews
                .get(symbol.as_str())
                .cloned()
                .ok_or_else(|| SourceError::unavailable("overview lookup failed"))
        })
    }
}

/// Text generator returning a canned answer (or failing) and keeping the prompts it saw.
pub struct StubGenerator {
    answer: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn answering(text: &str) -> Self {
        Self {
            answer: Some(text.to_owned()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|prompts| prompts.clone()).unwrap_or_default()
    }
}

impl TextGenerator for StubGenerator {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, String> {
        Box::pin(async move {
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.push(prompt.to_owned());
            }
            self.answer
                .clone()
                .ok_or_else(|| SourceError::text_generation("generator offline"))
        })
    }
}

pub fn service(provider: Arc<InMemoryProvider>, generator: Arc<StubGenerator>) -> StockService {
    StockService::new(provider, generator)
}

pub fn point(close: f64) -> RawSeriesPoint {
    RawSeriesPoint {
        open: format!("{close:.4}"),
        high: format!("{:.4}", close + 1.0),
        low: format!("{:.4}", (close - 1.0).max(0.0)),
        close: format!("{close:.4}"),
        volume: Some(String::from("1000")),
    }
}

/// Date-only keys on consecutive trading days, oldest first. Months are capped at 28 days.
pub fn daily_keys(count: usize) -> Vec<String> {
    (0..count)
        .map(|index| format!("2024-{:02}-{:02}", index / 28 + 1, index % 28 + 1))
        .collect()
}

/// Hourly keys starting at midnight on 2024-04-15, oldest first.
pub fn hourly_keys(count: usize) -> Vec<String> {
    (0..count)
        .map(|index| format!("2024-04-{:02} {:02}:00:00", 15 + index / 24, index % 24))
        .collect()
}

/// Series with one close per key, in the key order given.
pub fn series(keys: &[String], closes: &[f64]) -> RawSeries {
    keys.iter()
        .zip(closes)
        .map(|(key, close)| (key.clone(), point(*close)))
        .collect()
}

/// Daily series with closes `start, start + 1, ...`.
pub fn rising_daily(count: usize, start: f64) -> RawSeries {
    let closes: Vec<f64> = (0..count).map(|index| start + index as f64).collect();
    series(&daily_keys(count), &closes)
}
