use std::collections::{HashSet, VecDeque};

use chrono::{Duration as ChronoDuration, Utc};
use futures::future::join_all;

use crate::{
    core::{
        FetchOptions, FinnhubClient, SignalistError, Symbol,
        client::{
            CacheMode, RetryConfig,
            constants::{GENERAL_NEWS_POOL, MAX_NEWS_ARTICLES, NEWS_TTL, NEWS_WINDOW_DAYS},
        },
    },
    news::{MarketNewsArticle, RawNewsArticle, format_article, validate_article, wire},
};

/// `(from, to)` as `YYYY-MM-DD`, ending today (UTC).
fn date_range(days: i64) -> (String, String) {
    let to = Utc::now().date_naive();
    let from = to - ChronoDuration::days(days);
    (
        from.format("%Y-%m-%d").to_string(),
        to.format("%Y-%m-%d").to_string(),
    )
}

pub(super) async fn fetch_news(
    client: &FinnhubClient,
    symbols: &[Symbol],
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<MarketNewsArticle>, SignalistError> {
    let result = async {
        client.require_credentials()?;

        if !symbols.is_empty() {
            let collected = company_tier(client, symbols, cache_mode, retry_override).await;
            if !collected.is_empty() {
                return Ok(collected);
            }
            tracing::debug!(
                symbols = symbols.len(),
                "no company news collected; falling back to general news"
            );
        }

        general_tier(client, cache_mode, retry_override).await
    }
    .await;

    result.map_err(|e| {
        tracing::error!(error = %e, "get_news failed");
        SignalistError::news(e)
    })
}

async fn company_tier(
    client: &FinnhubClient,
    symbols: &[Symbol],
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Vec<MarketNewsArticle> {
    let (from, to) = date_range(NEWS_WINDOW_DAYS);

    let fetches = symbols.iter().map(|sym| {
        let (from, to) = (from.as_str(), to.as_str());
        async move {
            let fetched = company_news(client, sym, from, to, cache_mode, retry_override).await;
            let articles: VecDeque<RawNewsArticle> = match fetched {
                Ok(list) => list.into_iter().filter(validate_article).collect(),
                Err(e) => {
                    tracing::warn!(symbol = %sym, error = %e, "company news fetch failed");
                    VecDeque::new()
                }
            };
            (sym.clone(), articles)
        }
    });

    let per_symbol = join_all(fetches).await;
    let mut collected = merge_round_robin(per_symbol, MAX_NEWS_ARTICLES);

    // Stable sort: equal timestamps keep their merge order.
    collected.sort_by(|a, b| b.datetime.cmp(&a.datetime));
    collected.truncate(MAX_NEWS_ARTICLES);
    collected
}

async fn company_news(
    client: &FinnhubClient,
    symbol: &Symbol,
    from: &str,
    to: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<RawNewsArticle>, SignalistError> {
    let url = client.endpoint(
        "company-news",
        &[("symbol", symbol.as_str()), ("from", from), ("to", to)],
    )?;
    // Finnhub may answer `null` instead of an empty list.
    let items: Option<Vec<serde_json::Value>> = client
        .fetch_json_with(
            &url,
            FetchOptions {
                ttl: Some(NEWS_TTL),
                cache_mode,
                retry_override,
                endpoint: "company-news",
                key: symbol.as_str(),
            },
        )
        .await?;
    Ok(wire::decode_articles(items.unwrap_or_default()))
}

/// Takes at most one article per symbol per round, symbols in their given order, for at most
/// `cap` rounds, stopping as soon as `cap` articles are collected.
fn merge_round_robin(
    mut per_symbol: Vec<(Symbol, VecDeque<RawNewsArticle>)>,
    cap: usize,
) -> Vec<MarketNewsArticle> {
    let mut collected = Vec::with_capacity(cap);

    'rounds: for round in 0..cap {
        for (sym, queue) in &mut per_symbol {
            let Some(article) = queue.pop_front() else {
                continue;
            };
            if !validate_article(&article) {
                continue;
            }
            collected.push(format_article(&article, true, Some(sym), round));
            if collected.len() >= cap {
                break 'rounds;
            }
        }
    }

    collected
}

async fn general_tier(
    client: &FinnhubClient,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<MarketNewsArticle>, SignalistError> {
    let url = client.endpoint("news", &[("category", "general")])?;
    let items: Option<Vec<serde_json::Value>> = client
        .fetch_json_with(
            &url,
            FetchOptions {
                ttl: Some(NEWS_TTL),
                cache_mode,
                retry_override,
                endpoint: "news",
                key: "general",
            },
        )
        .await?;

    let unique = dedup_general(
        wire::decode_articles(items.unwrap_or_default()),
        GENERAL_NEWS_POOL,
    );

    Ok(unique
        .iter()
        .take(MAX_NEWS_ARTICLES)
        .enumerate()
        .map(|(idx, a)| format_article(a, false, None, idx))
        .collect())
}

/// Valid articles in arrival order, first occurrence of each `id-url-headline` key, at most `pool`.
fn dedup_general(articles: Vec<RawNewsArticle>, pool: usize) -> Vec<RawNewsArticle> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for art in articles {
        if !validate_article(&art) {
            continue;
        }
        let key = format!(
            "{}-{}-{}",
            art.id.map(|id| id.to_string()).unwrap_or_default(),
            art.url.as_deref().unwrap_or_default(),
            art.headline.as_deref().unwrap_or_default(),
        );
        if !seen.insert(key) {
            continue;
        }
        unique.push(art);
        if unique.len() >= pool {
            break;
        }
    }

    unique
}
