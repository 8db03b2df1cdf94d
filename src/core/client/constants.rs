//! Centralized constants for default endpoints, UA and aggregation limits.

use std::time::Duration;

/// Identifies this crate to the upstream API.
pub(crate) const USER_AGENT: &str = concat!("signalist/", env!("CARGO_PKG_VERSION"));

/// Finnhub REST base. Endpoint paths are joined onto it, so the trailing slash matters.
pub(crate) const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1/";

/// Env vars consulted by `FinnhubClientBuilder::from_env`, in priority order.
pub(crate) const API_KEY_ENV_VARS: [&str; 2] = ["FINNHUB_API_KEY", "NEXT_PUBLIC_FINNHUB_API_KEY"];
pub(crate) const BASE_URL_ENV_VAR: &str = "FINNHUB_BASE_URL";

/// Upper bound on articles returned by `get_news`; also the number of round-robin rounds.
pub const MAX_NEWS_ARTICLES: usize = 6;
/// Trailing window for company news, in days.
pub const NEWS_WINDOW_DAYS: i64 = 5;
/// Size of the deduplicated general-news pool.
pub const GENERAL_NEWS_POOL: usize = 20;
/// How many popular symbols are profiled for an empty search query.
pub const POPULAR_SEARCH_COUNT: usize = 10;
/// Upper bound on search results.
pub const MAX_SEARCH_RESULTS: usize = 15;

pub(crate) const NEWS_TTL: Duration = Duration::from_secs(300);
pub(crate) const PROFILE_TTL: Duration = Duration::from_secs(3600);
pub(crate) const SEARCH_TTL: Duration = Duration::from_secs(1800);
pub(crate) const METRIC_TTL: Duration = Duration::from_secs(1800);

/// Well-known symbols used when the search box is empty. Order is significant.
pub const POPULAR_STOCK_SYMBOLS: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "TSLA", "META", "NVDA", "NFLX", "ORCL", "CRM", "ADBE",
    "INTC", "AMD", "PYPL", "UBER", "ZOOM", "SPOT", "SQ", "SHOP", "ROKU", "SNOW", "PLTR", "COIN",
    "JPM", "BAC", "V", "MA", "DIS", "KO", "PEP", "WMT", "COST", "NKE", "SBUX", "MCD",
];
