//! Contract tests for the Alpha Vantage adapter wired into `StockService`.
//!
//! A scripted transport answers by the `function=` query parameter with payloads shaped like the
//! real service, so the adapter, normalizer and change calculation run end to end.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use serde_json::{json, Map, Value};
use tickerbrief_core::{
    AlphaVantageAdapter, AlphaVantageConfig, HttpClient, HttpError, HttpRequest, HttpResponse,
    SourceErrorKind, StockService,
};
use tickerbrief_tests::support::StubGenerator;

struct ScriptedHttpClient {
    routes: HashMap<String, Result<HttpResponse, HttpError>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    fn new() -> Self {
        Self {
            routes: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn route(mut self, function: &str, body: Value) -> Self {
        self.routes.insert(
            function.to_owned(),
            Ok(HttpResponse::ok_json(body.to_string())),
        );
        self
    }

    fn route_response(
        mut self,
        function: &str,
        response: Result<HttpResponse, HttpError>,
    ) -> Self {
        self.routes.insert(function.to_owned(), response);
        self
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("not poisoned").clone()
    }

    fn functions(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|request| request.query_param("function"))
            .collect()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let function = request.query_param("function").unwrap_or_default();
        self.requests.lock().expect("not poisoned").push(request);
        let response = self
            .routes
            .get(&function)
            .cloned()
            .unwrap_or_else(|| Ok(HttpResponse::with_status(404, "")));
        Box::pin(async move { response })
    }
}

fn service_over(client: Arc<ScriptedHttpClient>) -> StockService {
    let adapter = AlphaVantageAdapter::with_http_client(
        client,
        AlphaVantageConfig::new("contract-key").with_base_url("https://av.test/query"),
    );
    StockService::new(Arc::new(adapter), Arc::new(StubGenerator::answering("<p>ok</p>")))
}

fn bar(close: f64) -> Value {
    json!({
        "1. open": format!("{close:.4}"),
        "2. high": format!("{:.4}", close + 1.0),
        "3. low": format!("{:.4}", close - 1.0),
        "4. close": format!("{close:.4}"),
        "5. volume": "250000"
    })
}

/// Series object keyed by `keys`, closes rising from `start`. Inserted newest first, the way the
/// provider lists them.
fn series_body(series_key: &str, keys: &[String], start: f64) -> Value {
    let mut entries = Map::new();
    for (index, key) in keys.iter().enumerate().rev() {
        entries.insert(key.clone(), bar(start + index as f64));
    }
    let mut body = Map::new();
    body.insert(String::from("Meta Data"), json!({ "2. Symbol": "IBM" }));
    body.insert(series_key.to_owned(), Value::Object(entries));
    Value::Object(body)
}

fn daily_keys(count: usize) -> Vec<String> {
    (0..count)
        .map(|index| format!("2024-03-{:02}", index + 1))
        .collect()
}

fn overview(name: &str) -> Value {
    json!({
        "Symbol": "IBM",
        "Name": name,
        "Exchange": "NYSE",
        "Currency": "USD",
        "Sector": "TECHNOLOGY",
        "Industry": "COMPUTER & OFFICE EQUIPMENT"
    })
}

#[tokio::test]
async fn daily_range_flows_from_raw_payload_to_summary() {
    let client = Arc::new(
        ScriptedHttpClient::new()
            .route(
                "TIME_SERIES_DAILY",
                series_body("Time Series (Daily)", &daily_keys(10), 100.0),
            )
            .route("OVERVIEW", overview("International Business Machines")),
    );
    let service = service_over(client.clone());

    let summary = service.fetch_stock_data("ibm", "1w").await.expect("summary");

    assert_eq!(summary.symbol.as_str(), "IBM");
    assert_eq!(summary.name, "International Business Machines");
    assert_eq!(summary.time_series.len(), 7);
    assert_eq!(summary.time_series[0].date, "3/4");
    assert_eq!(summary.time_series[0].volume, 250_000);
    assert_eq!(summary.current, 109.0);
    assert_eq!(summary.previous, 102.0);

    assert_eq!(client.functions(), vec!["TIME_SERIES_DAILY", "OVERVIEW"]);
    let requests = client.requests();
    let series_request = &requests[0];
    assert_eq!(series_request.query_param("symbol").as_deref(), Some("IBM"));
    assert_eq!(series_request.query_param("apikey").as_deref(), Some("contract-key"));
    assert_eq!(series_request.query_param("outputsize"), None);
    assert!(series_request.url.starts_with("https://av.test/query?"));
}

#[tokio::test]
async fn company_name_is_searched_then_intraday_is_fetched_in_full() {
    let hourly: Vec<String> = (0..30)
        .map(|index| format!("2024-04-{:02} {:02}:00:00", 15 + index / 24, index % 24))
        .collect();
    let client = Arc::new(
        ScriptedHttpClient::new()
            .route(
                "SYMBOL_SEARCH",
                json!({
                    "bestMatches": [
                        {
                            "1. symbol": "AAPL",
                            "2. name": "Apple Inc",
                            "3. type": "Equity",
                            "4. region": "United States",
                            "8. currency": "USD",
                            "9. matchScore": "0.8889"
                        },
                        {
                            "1. symbol": "APLE",
                            "2. name": "Apple Hospitality REIT Inc",
                            "9. matchScore": "0.6000"
                        }
                    ]
                }),
            )
            .route(
                "TIME_SERIES_INTRADAY",
                series_body("Time Series (60min)", &hourly, 180.0),
            )
            .route("OVERVIEW", overview("Apple Inc")),
    );
    let service = service_over(client.clone());

    let summary = service
        .fetch_stock_data("Apple Inc", "1d")
        .await
        .expect("summary");

    assert_eq!(summary.symbol.as_str(), "AAPL");
    assert_eq!(summary.time_series.len(), 24);
    assert_eq!(summary.time_series[23].date, "5AM");

    assert_eq!(
        client.functions(),
        vec!["SYMBOL_SEARCH", "TIME_SERIES_INTRADAY", "OVERVIEW"]
    );
    let requests = client.requests();
    assert_eq!(requests[0].query_param("keywords").as_deref(), Some("Apple Inc"));
    assert_eq!(requests[1].query_param("symbol").as_deref(), Some("AAPL"));
    assert_eq!(requests[1].query_param("interval").as_deref(), Some("60min"));
    assert_eq!(requests[1].query_param("outputsize").as_deref(), Some("full"));
}

#[tokio::test]
async fn weekly_and_monthly_ranges_read_their_own_series_keys() {
    let weekly_keys: Vec<String> = (1..=5).map(|day| format!("2024-02-{:02}", day * 5)).collect();
    let monthly_keys = vec![String::from("2023-12-29"), String::from("2024-01-31")];
    let client = Arc::new(
        ScriptedHttpClient::new()
            .route(
                "TIME_SERIES_WEEKLY",
                series_body("Weekly Time Series", &weekly_keys, 50.0),
            )
            .route(
                "TIME_SERIES_MONTHLY",
                series_body("Monthly Time Series", &monthly_keys, 40.0),
            )
            .route("OVERVIEW", overview("IBM")),
    );
    let service = service_over(client);

    let weekly = service.fetch_stock_data("IBM", "1y").await.expect("weekly");
    assert_eq!(weekly.time_series.len(), 5);
    assert_eq!(weekly.time_series[4].date, "2/25");

    let monthly = service.fetch_stock_data("IBM", "5y").await.expect("monthly");
    let dates: Vec<&str> = monthly.time_series.iter().map(|bar| bar.date.as_str()).collect();
    assert_eq!(dates, vec!["12/2023", "1/2024"]);
}

#[tokio::test]
async fn error_message_field_becomes_invalid_symbol() {
    let client = Arc::new(ScriptedHttpClient::new().route(
        "TIME_SERIES_DAILY",
        json!({ "Error Message": "Invalid API call. Please retry or visit the documentation." }),
    ));
    let service = service_over(client);

    let error = service
        .fetch_stock_data("NOPE", "1m")
        .await
        .expect_err("must fail");

    assert_eq!(error.kind(), SourceErrorKind::InvalidSymbol);
    assert_eq!(
        error.message(),
        "Failed to fetch stock data for \"NOPE\": Invalid ticker symbol: NOPE"
    );
}

#[tokio::test]
async fn rate_limit_notice_without_series_is_no_data() {
    let client = Arc::new(ScriptedHttpClient::new().route(
        "TIME_SERIES_DAILY",
        json!({ "Note": "Our standard API rate limit is 25 requests per day." }),
    ));
    let service = service_over(client);

    let error = service
        .fetch_stock_data("IBM", "1w")
        .await
        .expect_err("must fail");

    assert_eq!(error.kind(), SourceErrorKind::NoDataAvailable);
}

#[tokio::test]
async fn malformed_entries_are_skipped() {
    let mut body = series_body("Time Series (Daily)", &daily_keys(5), 10.0);
    body["Time Series (Daily)"]["2024-03-02"]["4. close"] = json!("n/a");
    body["Time Series (Daily)"]["not-a-date"] = bar(999.0);
    let client = Arc::new(
        ScriptedHttpClient::new()
            .route("TIME_SERIES_DAILY", body)
            .route("OVERVIEW", overview("IBM")),
    );
    let service = service_over(client);

    let summary = service.fetch_stock_data("IBM", "1w").await.expect("summary");

    let closes: Vec<f64> = summary.time_series.iter().map(|bar| bar.close).collect();
    assert_eq!(closes, vec![10.0, 12.0, 13.0, 14.0]);
}

#[tokio::test]
async fn entry_without_close_is_dropped_and_numeric_values_are_read() {
    let mut body = series_body("Time Series (Daily)", &daily_keys(5), 10.0);
    let series = &mut body["Time Series (Daily)"];
    series["2024-03-02"]
        .as_object_mut()
        .expect("entry object")
        .remove("4. close");
    series["2024-03-04"]["4. close"] = json!(13.0);
    series["2024-03-04"]["5. volume"] = json!(300000);
    let client = Arc::new(
        ScriptedHttpClient::new()
            .route("TIME_SERIES_DAILY", body)
            .route("OVERVIEW", overview("IBM")),
    );
    let service = service_over(client);

    let summary = service.fetch_stock_data("IBM", "1w").await.expect("summary");

    let closes: Vec<f64> = summary.time_series.iter().map(|bar| bar.close).collect();
    assert_eq!(closes, vec![10.0, 12.0, 13.0, 14.0]);
    assert_eq!(summary.time_series[2].volume, 300_000);
    assert_eq!(summary.previous, 10.0);
    assert_eq!(summary.current, 14.0);
}

#[tokio::test]
async fn empty_overview_falls_back_to_ticker_name() {
    let client = Arc::new(
        ScriptedHttpClient::new()
            .route(
                "TIME_SERIES_DAILY",
                series_body("Time Series (Daily)", &daily_keys(8), 20.0),
            )
            .route("OVERVIEW", json!({})),
    );
    let service = service_over(client);

    let summary = service.fetch_stock_data("IBM", "1w").await.expect("summary");

    assert_eq!(summary.name, "IBM");
}

#[tokio::test]
async fn transport_timeout_and_bad_status_are_upstream_unavailable() {
    let timeout = Arc::new(ScriptedHttpClient::new().route_response(
        "TIME_SERIES_DAILY",
        Err(HttpError::timeout("request timeout")),
    ));
    let error = service_over(timeout)
        .fetch_stock_data("IBM", "1w")
        .await
        .expect_err("must fail");
    assert_eq!(error.kind(), SourceErrorKind::UpstreamUnavailable);
    assert!(error.message().ends_with("timed out after 10000 ms"), "{}", error.message());

    let bad_status = Arc::new(ScriptedHttpClient::new().route_response(
        "TIME_SERIES_DAILY",
        Ok(HttpResponse::with_status(502, "Bad Gateway")),
    ));
    let error = service_over(bad_status)
        .fetch_stock_data("IBM", "1w")
        .await
        .expect_err("must fail");
    assert_eq!(error.kind(), SourceErrorKind::UpstreamUnavailable);
    assert!(error.message().contains("status 502"));
}
