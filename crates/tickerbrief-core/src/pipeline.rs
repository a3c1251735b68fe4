//! Request orchestration: resolve → fetch → normalize → enrich → summarize.
//!
//! ```text
//! query ──▶ resolve_symbol ──▶ RangeSpec::resolve ──▶ time_series ──▶ normalize_series
//!                                                                        │
//!                                  StockReport ◀── summarize ◀── company_overview (best-effort)
//! ```
//!
//! Outbound calls run strictly one after another. The service holds no per-request state, so a
//! single instance is shared across concurrent requests.

use std::sync::Arc;

use tracing::{info, warn};

use crate::analysis::{summarize, TextGenerator};
use crate::normalize::normalize_series;
use crate::provider::{MarketDataProvider, SeriesRequest, SourceError};
use crate::resolver::resolve_symbol;
use crate::{RangeSpec, StockReport, StockSummary, Symbol};

#[derive(Clone)]
pub struct StockService {
    provider: Arc<dyn MarketDataProvider>,
    generator: Arc<dyn TextGenerator>,
}

impl StockService {
    pub fn new(provider: Arc<dyn MarketDataProvider>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            provider,
            generator,
        }
    }

    /// Normalized summary for a ticker or company name over the given range key.
    ///
    /// Every failure carries the original query in its message.
    pub async fn fetch_stock_data(
        &self,
        query: &str,
        range_key: &str,
    ) -> Result<StockSummary, SourceError> {
        self.build_summary(query, RangeSpec::resolve(range_key))
            .await
            .map_err(|error| {
                error.with_context(format!(
                    "Failed to fetch stock data for \"{}\"",
                    query.trim()
                ))
            })
    }

    /// Summary plus generated prose. Text generation never fails the request.
    pub async fn report(&self, query: &str, range_key: &str) -> Result<StockReport, SourceError> {
        let spec = RangeSpec::resolve(range_key);
        let stock_data = self.fetch_stock_data(query, range_key).await?;
        let ai_analysis = summarize(self.generator.as_ref(), &stock_data, spec).await;

        Ok(StockReport {
            stock_data,
            ai_analysis,
        })
    }

    async fn build_summary(
        &self,
        query: &str,
        spec: &RangeSpec,
    ) -> Result<StockSummary, SourceError> {
        let symbol = resolve_symbol(self.provider.as_ref(), query).await?;

        let payload = self
            .provider
            .time_series(SeriesRequest::for_range(symbol.clone(), spec))
            .await?;
        let normalized = normalize_series(&symbol, payload, spec)?;

        let name = self.display_name(&symbol).await;

        info!(
            %symbol,
            range = spec.key,
            points = normalized.window.len(),
            percent_change = normalized.change.percent_change,
            "stock data normalized"
        );

        Ok(StockSummary::new(
            symbol,
            name,
            normalized.change,
            normalized.window,
        ))
    }

    /// Company name from the overview lookup, or the ticker itself on any failure.
    async fn display_name(&self, symbol: &Symbol) -> String {
        match self.provider.company_overview(symbol).await {
            Ok(overview) => overview
                .display_name()
                .map(str::to_owned)
                .unwrap_or_else(|| symbol.to_string()),
            Err(error) => {
                warn!(%symbol, %error, "could not fetch company name");
                symbol.to_string()
            }
        }
    }
}
