use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::AlphaVantageConfig;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::provider::{MarketDataProvider, SeriesRequest, SourceError, TimeSeriesPayload};
use crate::{CompanyOverview, RawSeries, RawSeriesPoint, Symbol, SymbolMatch};

const ERROR_FIELD: &str = "Error Message";
const NOTICE_FIELDS: [&str; 2] = ["Note", "Information"];

/// Alpha Vantage market-data adapter.
#[derive(Clone)]
pub struct AlphaVantageAdapter {
    http_client: Arc<dyn HttpClient>,
    config: AlphaVantageConfig,
}

impl AlphaVantageAdapter {
    pub fn new(config: AlphaVantageConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::default()), config)
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: AlphaVantageConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &AlphaVantageConfig {
        &self.config
    }

    fn endpoint(&self, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}?", self.config.base_url);
        for (name, value) in params {
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
            url.push('&');
        }
        url.push_str("apikey=");
        url.push_str(&urlencoding::encode(self.config.api_key.expose()));
        url
    }

    async fn fetch<T>(&self, params: &[(&str, &str)]) -> Result<T, SourceError>
    where
        T: DeserializeOwned,
    {
        debug!(?params, "alphavantage request");

        let timeout_ms = self.config.timeout_ms;
        let request = HttpRequest::get(self.endpoint(params)).with_timeout_ms(timeout_ms);
        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.timed_out() {
                SourceError::unavailable(format!(
                    "alphavantage request timed out after {timeout_ms} ms"
                ))
            } else {
                SourceError::unavailable(format!(
                    "alphavantage transport error: {}",
                    error.message()
                ))
            }
        })?;

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "alphavantage returned status {}",
                response.status
            )));
        }

        serde_json::from_str(&response.body).map_err(|error| {
            SourceError::malformed(format!("failed to parse alphavantage response: {error}"))
        })
    }

    async fn fetch_symbol_matches(&self, keywords: &str) -> Result<Vec<SymbolMatch>, SourceError> {
        let response: AlphaVantageSearchResponse = self
            .fetch(&[("function", "SYMBOL_SEARCH"), ("keywords", keywords)])
            .await?;

        Ok(response
            .best_matches
            .into_iter()
            .map(AlphaVantageSearchMatch::into_match)
            .collect())
    }

    async fn fetch_time_series(
        &self,
        req: &SeriesRequest,
    ) -> Result<TimeSeriesPayload, SourceError> {
        let mut params = vec![
            ("function", req.shape.function()),
            ("symbol", req.symbol.as_str()),
        ];
        if let Some(interval) = req.interval {
            params.push(("interval", interval));
        }
        if req.full_output {
            params.push(("outputsize", "full"));
        }

        let body: Map<String, Value> = self.fetch(&params).await?;
        decode_time_series(body, &req.series_key())
    }

    async fn fetch_overview(&self, symbol: &Symbol) -> Result<CompanyOverview, SourceError> {
        let response: AlphaVantageOverviewResponse = self
            .fetch(&[("function", "OVERVIEW"), ("symbol", symbol.as_str())])
            .await?;

        Ok(CompanyOverview {
            name: response.name,
        })
    }
}

impl MarketDataProvider for AlphaVantageAdapter {
    fn search_symbols<'a>(
        &'a self,
        keywords: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SymbolMatch>, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            if keywords.trim().is_empty() {
                return Err(SourceError::invalid_request(
                    "alphavantage search keywords must not be empty",
                ));
            }
            self.fetch_symbol_matches(keywords).await
        })
    }

    fn time_series<'a>(
        &'a self,
        req: SeriesRequest,
    ) -> Pin<Box<dyn Future<Output = Result<TimeSeriesPayload, SourceError>> + Send + 'a>> {
        Box::pin(async move { self.fetch_time_series(&req).await })
    }

    fn company_overview<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<CompanyOverview, SourceError>> + Send + 'a>> {
        Box::pin(async move { self.fetch_overview(symbol).await })
    }
}

fn decode_time_series(
    mut body: Map<String, Value>,
    series_key: &str,
) -> Result<TimeSeriesPayload, SourceError> {
    if let Some(message) = body.get(ERROR_FIELD).and_then(Value::as_str) {
        return Ok(TimeSeriesPayload::rejected(message));
    }

    for field in NOTICE_FIELDS {
        if let Some(notice) = body.get(field).and_then(Value::as_str) {
            warn!(notice, "alphavantage returned a notice instead of data");
        }
    }

    let series = match body.remove(series_key) {
        None => None,
        Some(Value::Object(entries)) => Some(decode_entries(entries)),
        Some(other) => {
            return Err(SourceError::malformed(format!(
                "'{series_key}' is not an object: {other}"
            )))
        }
    };

    Ok(TimeSeriesPayload {
        error_message: None,
        series,
    })
}

/// Decodes entries one by one. An entry that is not an object of scalars is dropped here;
/// bad values inside an entry are left to the normalizer.
fn decode_entries(entries: Map<String, Value>) -> RawSeries {
    let mut series = RawSeries::with_capacity(entries.len());
    for (key, value) in entries {
        match serde_json::from_value::<RawSeriesPoint>(value) {
            Ok(point) => {
                series.insert(key, point);
            }
            Err(error) => warn!(key = %key, %error, "dropping undecodable series entry"),
        }
    }
    series
}

#[derive(Debug, Clone, Deserialize)]
struct AlphaVantageSearchResponse {
    #[serde(rename = "bestMatches", default)]
    best_matches: Vec<AlphaVantageSearchMatch>,
}

#[derive(Debug, Clone, Deserialize)]
struct AlphaVantageSearchMatch {
    #[serde(rename = "1. symbol")]
    symbol: String,
    #[serde(rename = "2. name", default)]
    name: String,
}

impl AlphaVantageSearchMatch {
    fn into_match(self) -> SymbolMatch {
        SymbolMatch {
            symbol: self.symbol,
            name: self.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct AlphaVantageOverviewResponse {
    #[serde(rename = "Name", default)]
    name: Option<String>,
}
