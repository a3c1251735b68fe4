//! Stock report endpoint.
//!
//! - `GET /api/stock/{ticker}?range=<key>` returns `{"stockData": ..., "aiAnalysis": ...}`

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tickerbrief_core::{StockReport, DEFAULT_RANGE_KEY};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StockQuery {
    pub range: Option<String>,
}

impl StockQuery {
    /// Requested range key. Missing or empty means the default.
    pub fn range_key(&self) -> &str {
        self.range
            .as_deref()
            .filter(|range| !range.is_empty())
            .unwrap_or(DEFAULT_RANGE_KEY)
    }
}

pub async fn get_stock(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
    Query(query): Query<StockQuery>,
) -> Result<Json<StockReport>, ApiError> {
    let range = query.range_key();
    debug!(ticker = %ticker, range, "stock report requested");

    let report = state.service.report(&ticker, range).await?;
    Ok(Json(report))
}

pub fn stock_router() -> Router<Arc<AppState>> {
    Router::new().route("/api/stock/{ticker}", get(get_stock))
}
