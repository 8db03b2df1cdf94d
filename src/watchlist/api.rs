use std::collections::HashSet;

use chrono::Utc;
use futures::future::join_all;

use super::{WatchlistEntry, WatchlistItem, WatchlistOutcome, WatchlistStore};
use crate::core::{FinnhubClient, RequestContext, SignalistError, Symbol};
use crate::details;

pub(super) async fn symbols_by_email(store: &dyn WatchlistStore, email: &str) -> HashSet<Symbol> {
    if email.trim().is_empty() {
        return HashSet::new();
    }

    let lookup = async {
        let Some(user_id) = store.user_id_for_email(email).await? else {
            return Ok(Vec::new());
        };
        store.symbols_for_user(&user_id).await
    };

    match lookup.await {
        Ok(symbols) => symbols.into_iter().collect(),
        Err(e) => {
            tracing::error!(error = %e, "error fetching watchlist symbols");
            HashSet::new()
        }
    }
}

pub(super) async fn add(
    store: &dyn WatchlistStore,
    ctx: &RequestContext,
    symbol: &str,
    company: &str,
) -> Result<WatchlistOutcome, SignalistError> {
    let session = ctx.require_session()?;
    let Some(symbol) = Symbol::parse(symbol) else {
        return Ok(WatchlistOutcome::rejected("Invalid stock symbol"));
    };
    let user_id = session.user.id.as_str();

    let result = async {
        if store.find(user_id, &symbol).await?.is_some() {
            return Ok(WatchlistOutcome::rejected("Stock already added to watchlist"));
        }

        store
            .insert(WatchlistItem {
                user_id: user_id.to_string(),
                symbol: symbol.clone(),
                company: company.trim().to_string(),
                added_at: Utc::now(),
            })
            .await?;
        Ok::<_, SignalistError>(WatchlistOutcome::ok("Stock added to watchlist"))
    }
    .await;

    result.map_err(|e| {
        tracing::error!(symbol = %symbol, error = %e, "error adding to watchlist");
        SignalistError::watchlist("Failed to add stock to watchlist", e)
    })
}

pub(super) async fn remove(
    store: &dyn WatchlistStore,
    ctx: &RequestContext,
    symbol: &str,
) -> Result<WatchlistOutcome, SignalistError> {
    let session = ctx.require_session()?;
    let Some(symbol) = Symbol::parse(symbol) else {
        return Ok(WatchlistOutcome::ok("Stock removed from watchlist"));
    };

    match store.delete(&session.user.id, &symbol).await {
        Ok(removed) => {
            tracing::debug!(symbol = %symbol, removed, "watchlist delete");
            Ok(WatchlistOutcome::ok("Stock removed from watchlist"))
        }
        Err(e) => {
            tracing::error!(symbol = %symbol, error = %e, "error deleting stock");
            Err(SignalistError::watchlist("Failed to delete stock", e))
        }
    }
}

pub(super) async fn list(
    store: &dyn WatchlistStore,
    ctx: &RequestContext,
) -> Result<Vec<WatchlistItem>, SignalistError> {
    let session = ctx.require_session()?;
    store.list_for_user(&session.user.id).await.map_err(|e| {
        tracing::error!(error = %e, "error fetching user watchlist");
        SignalistError::watchlist("Failed to fetch user watchlist", e)
    })
}

pub(super) async fn with_data(
    client: &FinnhubClient,
    store: &dyn WatchlistStore,
    ctx: &RequestContext,
) -> Result<Vec<WatchlistEntry>, SignalistError> {
    let items = list(store, ctx).await.map_err(|e| match e {
        SignalistError::Watchlist { source, .. } => {
            SignalistError::watchlist("Failed to fetch watchlist data", *source)
        }
        other => other,
    })?;

    let enriched = items.into_iter().map(|item| async move {
        let details = match details::get_stock_details(client, ctx, item.symbol.as_str()).await {
            Ok(d) => Some(d),
            Err(e) => {
                tracing::warn!(
                    symbol = %item.symbol,
                    error = %e,
                    "failed to fetch data for watchlist item"
                );
                None
            }
        };
        WatchlistEntry { item, details }
    });

    Ok(join_all(enriched).await)
}
