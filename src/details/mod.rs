//! Stock details: quote, company profile and valuation metrics for one symbol.

mod api;
mod format;
mod model;
mod wire;

pub use format::{format_change_percent, format_market_cap_value, format_price};
pub use model::StockDetails;

use crate::core::{FinnhubClient, RequestContext, SignalistError, Symbol};

/// Fetches details for `symbol`, memoized for the lifetime of `ctx`.
///
/// # Errors
///
/// Returns [`SignalistError::StockDetails`] wrapping the cause when any of the three upstream
/// calls fails, the quote has no current price, or the profile has no name.
#[tracing::instrument(skip(client, ctx), err)]
pub async fn get_stock_details(
    client: &FinnhubClient,
    ctx: &RequestContext,
    symbol: &str,
) -> Result<StockDetails, SignalistError> {
    let wrap = |symbol: &str, e: SignalistError| SignalistError::StockDetails {
        symbol: symbol.to_string(),
        source: Box::new(e),
    };

    let sym = Symbol::parse(symbol)
        .ok_or_else(|| wrap(symbol, SignalistError::Data("empty symbol".into())))?;

    ctx.memo()
        .get_or_try_init("stock_details", &sym, || api::fetch_details(client, &sym))
        .await
        .map_err(|e| {
            tracing::error!(symbol = %sym, error = %e, "error fetching stock details");
            wrap(sym.as_str(), e)
        })
}
