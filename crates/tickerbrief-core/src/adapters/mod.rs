mod alphavantage;
mod gemini;

pub use alphavantage::AlphaVantageAdapter;
pub use gemini::GeminiAdapter;
