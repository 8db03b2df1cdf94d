//! Stock search: popular symbols for an empty query, the upstream symbol search otherwise,
//! each hit annotated with the caller's watchlist membership.

mod api;
mod model;
mod wire;

pub use model::StockWithWatchlistStatus;
pub use wire::StockSearchResult;

use crate::core::{FinnhubClient, RequestContext, SignalistError};
use crate::watchlist::{WatchlistStore, get_watchlist_symbols};

/// Searches for stocks matching `query`, memoized for the lifetime of `ctx`.
///
/// A missing or blank query lists well-known symbols instead. Results keep upstream order and
/// are capped at fifteen.
///
/// # Errors
///
/// Only [`SignalistError::Unauthenticated`], when `ctx` has no session. Every other failure
/// (missing API key, upstream errors) is logged and yields an empty list.
#[tracing::instrument(skip(client, store, ctx))]
pub async fn search_stocks(
    client: &FinnhubClient,
    store: &dyn WatchlistStore,
    ctx: &RequestContext,
    query: Option<&str>,
) -> Result<Vec<StockWithWatchlistStatus>, SignalistError> {
    let session = ctx.require_session()?;
    let trimmed = query.map(str::trim).unwrap_or_default();

    ctx.memo()
        .get_or_try_init("search_stocks", trimmed, || async {
            let watched = get_watchlist_symbols(store, &session.user.email).await;
            Ok(api::resolve(client, trimmed, &watched).await)
        })
        .await
}
