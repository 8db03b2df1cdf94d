use std::collections::HashSet;

use futures::future::join_all;

use crate::{
    core::{
        FetchOptions, FinnhubClient, SignalistError, Symbol,
        client::constants::{
            MAX_SEARCH_RESULTS, POPULAR_SEARCH_COUNT, POPULAR_STOCK_SYMBOLS, SEARCH_TTL,
        },
    },
    profile::fetch_profile,
    search::{
        StockWithWatchlistStatus,
        wire::{SearchResponse, StockSearchResult},
    },
};

const DEFAULT_EXCHANGE: &str = "US";
const DEFAULT_KIND: &str = "Stock";
const POPULAR_KIND: &str = "Common Stock";

/// Resolves `query` against the API and annotates with `watched`. Never fails: every error is
/// logged and turned into an empty list.
pub(super) async fn resolve(
    client: &FinnhubClient,
    query: &str,
    watched: &HashSet<Symbol>,
) -> Vec<StockWithWatchlistStatus> {
    if !client.has_credentials() {
        tracing::error!(error = %SignalistError::CredentialMissing, "error in stock search");
        return Vec::new();
    }

    let matches = if query.is_empty() {
        Ok(popular(client).await)
    } else {
        search(client, query).await
    };

    match matches {
        Ok(matches) => annotate(matches, watched),
        Err(e) => {
            tracing::error!(query, error = %e, "error in stock search");
            Vec::new()
        }
    }
}

/// Profiles the leading popular symbols concurrently; symbols without a usable name are dropped.
async fn popular(client: &FinnhubClient) -> Vec<StockSearchResult> {
    let top = POPULAR_STOCK_SYMBOLS
        .iter()
        .take(POPULAR_SEARCH_COUNT)
        .filter_map(|s| Symbol::parse(s));

    let lookups = top.map(|sym| async move {
        match fetch_profile(client, &sym).await {
            Ok(profile) => Some((sym, profile)),
            Err(e) => {
                tracing::warn!(symbol = %sym, error = %e, "profile lookup failed");
                None
            }
        }
    });

    join_all(lookups)
        .await
        .into_iter()
        .flatten()
        .filter_map(|(sym, profile)| {
            let name = profile.display_name()?.to_string();
            Some(StockSearchResult {
                symbol: sym.to_string(),
                description: Some(name),
                display_symbol: Some(sym.into_string()),
                kind: Some(POPULAR_KIND.to_string()),
                exchange: profile.exchange().map(str::to_string),
            })
        })
        .collect()
}

async fn search(
    client: &FinnhubClient,
    query: &str,
) -> Result<Vec<StockSearchResult>, SignalistError> {
    let url = client.endpoint("search", &[("q", query)])?;
    let resp: SearchResponse = client
        .fetch_json_with(
            &url,
            FetchOptions {
                ttl: Some(SEARCH_TTL),
                endpoint: "search",
                key: query,
                ..FetchOptions::default()
            },
        )
        .await?;
    Ok(resp.result.unwrap_or_default())
}

fn present(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|v| !v.is_empty())
}

/// Maps matches to output records in upstream order, capped at the search limit.
fn annotate(
    matches: Vec<StockSearchResult>,
    watched: &HashSet<Symbol>,
) -> Vec<StockWithWatchlistStatus> {
    matches
        .into_iter()
        .filter_map(|m| {
            let symbol = Symbol::parse(&m.symbol)?;
            let name = present(m.description.as_deref()).unwrap_or(symbol.as_str());
            let exchange = present(m.exchange.as_deref()).unwrap_or(DEFAULT_EXCHANGE);
            let kind = present(m.kind.as_deref()).unwrap_or(DEFAULT_KIND);
            Some(StockWithWatchlistStatus {
                name: name.to_string(),
                exchange: exchange.to_string(),
                kind: kind.to_string(),
                is_in_watchlist: watched.contains(&symbol),
                symbol,
            })
        })
        .take(MAX_SEARCH_RESULTS)
        .collect()
}
