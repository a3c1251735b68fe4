//! Prose summary of a normalized series.
//!
//! Generation is best-effort: any failure of the text collaborator is logged and replaced by
//! [`FALLBACK_ANALYSIS`], never surfaced to the caller.

use std::fmt::Write as _;
use std::future::Future;
use std::pin::Pin;

use tracing::warn;

use crate::provider::SourceError;
use crate::{RangeSpec, StockSummary};

/// Text returned when the generator is unavailable.
pub const FALLBACK_ANALYSIS: &str = concat!(
    "<p>Unable to generate AI analysis at this time. Please try again later.</p>\n",
    "<p>Stock data is still available for your review.</p>",
);

/// Text-generation collaborator. Output is treated as opaque text.
pub trait TextGenerator: Send + Sync {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, SourceError>> + Send + 'a>>;
}

/// Builds the prompt for one summary and range.
pub fn build_prompt(summary: &StockSummary, range: &RangeSpec) -> String {
    let sign = if summary.percent_change > 0.0 { "+" } else { "" };
    let mut closes = String::new();
    for point in &summary.time_series {
        let _ = writeln!(closes, "{}: ${:.2}", point.date, point.close);
    }

    format!(
        "Please analyze the following stock data for {symbol} ({name}) over the {period}:\n\
         \n\
         Current Price: ${current:.2}\n\
         Price Change: {sign}{percent:.2}%\n\
         \n\
         Closing prices (from oldest to newest):\n\
         {closes}\n\
         Based on this data, provide a concise analysis (about 150 words) of {symbol}'s \
         performance over the {period}.\n\
         Include key patterns, significant price movements, and potential factors that might \
         have influenced the stock.\n\
         Format your response in HTML paragraphs (<p> tags) for direct display on a webpage.\n",
        symbol = summary.symbol,
        name = summary.name,
        period = range.label,
        current = summary.current,
        percent = summary.percent_change,
    )
}

/// Generates prose for a summary, degrading to [`FALLBACK_ANALYSIS`] on any failure.
pub async fn summarize<G>(generator: &G, summary: &StockSummary, range: &RangeSpec) -> String
where
    G: TextGenerator + ?Sized,
{
    let prompt = build_prompt(summary, range);
    match generator.generate(&prompt).await {
        Ok(text) => text,
        Err(error) => {
            warn!(symbol = %summary.symbol, %error, "text generation failed; using fallback");
            String::from(FALLBACK_ANALYSIS)
        }
    }
}
