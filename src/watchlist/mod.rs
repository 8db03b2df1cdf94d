//! Per-user watchlists: membership lookup for search annotation, and the add/remove/list
//! operations behind the watchlist page.

mod api;
mod model;
mod store;

pub use model::{WatchlistEntry, WatchlistItem, WatchlistOutcome};
pub use store::{InMemoryWatchlistStore, WatchlistStore};

use std::collections::HashSet;

use crate::core::{FinnhubClient, RequestContext, SignalistError, Symbol};

/// The upper-cased symbols watched by the account with `email`.
///
/// Never fails: an unknown email, a user without a watchlist, or a store error all yield an
/// empty set.
pub async fn get_watchlist_symbols(store: &dyn WatchlistStore, email: &str) -> HashSet<Symbol> {
    api::symbols_by_email(store, email).await
}

/// Adds `symbol` to the caller's watchlist.
///
/// An already-watched symbol is reported as `success: false` and nothing is written.
///
/// # Errors
///
/// `Unauthenticated` without a session; `Watchlist` if the store fails.
#[tracing::instrument(skip(store, ctx), err)]
pub async fn add_to_watchlist(
    store: &dyn WatchlistStore,
    ctx: &RequestContext,
    symbol: &str,
    company: &str,
) -> Result<WatchlistOutcome, SignalistError> {
    api::add(store, ctx, symbol, company).await
}

/// Removes `symbol` from the caller's watchlist. Removing an absent symbol succeeds.
///
/// # Errors
///
/// `Unauthenticated` without a session; `Watchlist` if the store fails.
#[tracing::instrument(skip(store, ctx), err)]
pub async fn remove_from_watchlist(
    store: &dyn WatchlistStore,
    ctx: &RequestContext,
    symbol: &str,
) -> Result<WatchlistOutcome, SignalistError> {
    api::remove(store, ctx, symbol).await
}

/// The caller's watchlist rows, newest first.
///
/// # Errors
///
/// `Unauthenticated` without a session; `Watchlist` if the store fails.
pub async fn get_user_watchlist(
    store: &dyn WatchlistStore,
    ctx: &RequestContext,
) -> Result<Vec<WatchlistItem>, SignalistError> {
    api::list(store, ctx).await
}

/// The caller's watchlist with quote, profile and metric data attached to each row.
///
/// Rows whose market data cannot be fetched are returned with `details: None`.
///
/// # Errors
///
/// `Unauthenticated` without a session; `Watchlist` if the store fails.
#[tracing::instrument(skip_all, err)]
pub async fn get_watchlist_with_data(
    client: &FinnhubClient,
    store: &dyn WatchlistStore,
    ctx: &RequestContext,
) -> Result<Vec<WatchlistEntry>, SignalistError> {
    api::with_data(client, store, ctx).await
}
