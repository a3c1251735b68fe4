use std::sync::Arc;

use tickerbrief_core::{
    AlphaVantageAdapter, AlphaVantageConfig, GeminiAdapter, GeminiConfig, StockService,
};

/// Shared handler state. Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    pub service: StockService,
}

impl AppState {
    pub fn new(service: StockService) -> Self {
        Self { service }
    }

    /// Wires the live Alpha Vantage and Gemini adapters.
    pub fn from_configs(market: AlphaVantageConfig, gemini: GeminiConfig) -> Self {
        let service = StockService::new(
            Arc::new(AlphaVantageAdapter::new(market)),
            Arc::new(GeminiAdapter::new(gemini)),
        );
        Self::new(service)
    }
}
