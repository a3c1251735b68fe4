//! Free-text query → canonical ticker.

use tracing::info;

use crate::provider::{MarketDataProvider, SourceError};
use crate::{Symbol, ValidationError};

const TICKER_MAX_LEN: usize = 5;

/// True when the query should go through symbol search instead of being used as a ticker.
///
/// Longer than five characters once trimmed AND containing a
/// space. `"Apple Inc"` searches; `"AAPL"`, `"BRK.B"` and `"Microsoft"` do not.
pub fn looks_like_company_name(query: &str) -> bool {
    let normalized = query.trim().to_uppercase();
    normalized.chars().count() > TICKER_MAX_LEN && normalized.contains(' ')
}

/// Resolves a query to a ticker, searching upstream only for name-like queries.
///
/// The first ranked match wins. An empty match list is `SymbolNotFound`.
pub async fn resolve_symbol<P>(provider: &P, query: &str) -> Result<Symbol, SourceError>
where
    P: MarketDataProvider + ?Sized,
{
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(SourceError::invalid_request(
            ValidationError::EmptyQuery.to_string(),
        ));
    }

    if !looks_like_company_name(trimmed) {
        return Symbol::parse(trimmed)
            .map_err(|error| SourceError::invalid_request(error.to_string()));
    }

    let matches = provider.search_symbols(trimmed).await?;
    let best = matches
        .into_iter()
        .next()
        .ok_or_else(|| SourceError::symbol_not_found(query))?;

    let symbol = Symbol::parse(&best.symbol).map_err(|error| {
        SourceError::malformed(format!(
            "search returned unusable symbol '{}': {error}",
            best.symbol
        ))
    })?;
    info!(query = trimmed, %symbol, name = %best.name, "resolved company name to ticker");
    Ok(symbol)
}
