#![allow(dead_code)]

use futures::future::BoxFuture;
use httpmock::{Method::GET, Mock, MockServer};
use serde_json::{Value, json};
use signalist::{
    FinnhubClient, InMemoryWatchlistStore, RequestContext, Session, SignalistError, Symbol,
    WatchlistItem, WatchlistStore,
};
use std::{fs, path::Path};
use url::Url;

pub const TOKEN: &str = "test-token";
pub const USER_ID: &str = "user-1";
pub const EMAIL: &str = "trader@example.com";

pub fn fixture(endpoint: &str, key: &str) -> String {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let path = dir.join(format!("{endpoint}_{key}.json"));
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn client(server: &MockServer) -> FinnhubClient {
    FinnhubClient::builder()
        .api_key(TOKEN)
        .base_url(Url::parse(&server.base_url()).unwrap())
        .build()
        .unwrap()
}

/// A client whose TTL cache is off, so every call reaches the mock server.
pub fn uncached_client(server: &MockServer) -> FinnhubClient {
    FinnhubClient::builder()
        .api_key(TOKEN)
        .base_url(Url::parse(&server.base_url()).unwrap())
        .cache(false)
        .build()
        .unwrap()
}

pub fn keyless_client(server: &MockServer) -> FinnhubClient {
    FinnhubClient::builder()
        .base_url(Url::parse(&server.base_url()).unwrap())
        .build()
        .unwrap()
}

pub fn signed_in() -> RequestContext {
    RequestContext::authenticated(Session::new(USER_ID, EMAIL))
}

pub fn article(id: i64, headline: &str, url: &str, datetime: i64) -> Value {
    json!({
        "id": id,
        "category": "company",
        "headline": headline,
        "url": url,
        "datetime": datetime,
        "summary": format!("summary of {headline}"),
        "source": "Reuters",
        "image": "",
        "related": ""
    })
}

/// `count` valid articles for `symbol`, headlines `{symbol}-0..`, datetimes descending from `newest`.
pub fn articles_for(symbol: &str, count: usize, newest: i64) -> Value {
    let items: Vec<Value> = (0..count)
        .map(|i| {
            let i64_i = i64::try_from(i).unwrap();
            article(
                newest - i64_i,
                &format!("{symbol}-{i}"),
                &format!("https://news.example.com/{symbol}/{i}"),
                newest - i64_i,
            )
        })
        .collect();
    Value::Array(items)
}

pub fn mock_company_news<'a>(server: &'a MockServer, symbol: &str, body: Value) -> Mock<'a> {
    let symbol = symbol.to_string();
    server.mock(move |when, then| {
        when.method(GET)
            .path("/company-news")
            .query_param("symbol", symbol)
            .query_param("token", TOKEN);
        then.status(200)
            .header("content-type", "application/json")
            .json_body(body);
    })
}

pub fn mock_company_news_status<'a>(server: &'a MockServer, symbol: &str, status: u16) -> Mock<'a> {
    let symbol = symbol.to_string();
    server.mock(move |when, then| {
        when.method(GET)
            .path("/company-news")
            .query_param("symbol", symbol);
        then.status(status).body("upstream unavailable");
    })
}

pub fn mock_general_news(server: &MockServer, body: Value) -> Mock<'_> {
    server.mock(move |when, then| {
        when.method(GET)
            .path("/news")
            .query_param("category", "general")
            .query_param("token", TOKEN);
        then.status(200)
            .header("content-type", "application/json")
            .json_body(body);
    })
}

pub fn mock_profile<'a>(server: &'a MockServer, symbol: &str, body: Value) -> Mock<'a> {
    let symbol = symbol.to_string();
    server.mock(move |when, then| {
        when.method(GET)
            .path("/stock/profile2")
            .query_param("symbol", symbol);
        then.status(200)
            .header("content-type", "application/json")
            .json_body(body);
    })
}

pub fn mock_search<'a>(server: &'a MockServer, query: &str, body: Value) -> Mock<'a> {
    let query = query.to_string();
    server.mock(move |when, then| {
        when.method(GET).path("/search").query_param("q", query);
        then.status(200)
            .header("content-type", "application/json")
            .json_body(body);
    })
}

pub fn mock_quote<'a>(server: &'a MockServer, symbol: &str, body: Value) -> Mock<'a> {
    let symbol = symbol.to_string();
    server.mock(move |when, then| {
        when.method(GET).path("/quote").query_param("symbol", symbol);
        then.status(200)
            .header("content-type", "application/json")
            .json_body(body);
    })
}

pub fn mock_metric<'a>(server: &'a MockServer, symbol: &str, body: Value) -> Mock<'a> {
    let symbol = symbol.to_string();
    server.mock(move |when, then| {
        when.method(GET)
            .path("/stock/metric")
            .query_param("symbol", symbol)
            .query_param("metric", "all");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(body);
    })
}

pub async fn store_watching(symbols: &[&str]) -> InMemoryWatchlistStore {
    let store = InMemoryWatchlistStore::new();
    store.register_user(USER_ID, EMAIL).await;
    for (i, s) in symbols.iter().enumerate() {
        store
            .insert(WatchlistItem {
                user_id: USER_ID.to_string(),
                symbol: Symbol::parse(s).unwrap(),
                company: format!("{s} Corp"),
                added_at: chrono::Utc::now() + chrono::Duration::seconds(i64::try_from(i).unwrap()),
            })
            .await
            .unwrap();
    }
    store
}

/// A store whose every call fails, standing in for an unreachable database.
pub struct UnreachableStore;

fn down<T>() -> Result<T, SignalistError> {
    Err(SignalistError::Store("connection refused".into()))
}

impl WatchlistStore for UnreachableStore {
    fn user_id_for_email<'a>(
        &'a self,
        _email: &'a str,
    ) -> BoxFuture<'a, Result<Option<String>, SignalistError>> {
        Box::pin(async { down() })
    }

    fn symbols_for_user<'a>(
        &'a self,
        _user_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Symbol>, SignalistError>> {
        Box::pin(async { down() })
    }

    fn find<'a>(
        &'a self,
        _user_id: &'a str,
        _symbol: &'a Symbol,
    ) -> BoxFuture<'a, Result<Option<WatchlistItem>, SignalistError>> {
        Box::pin(async { down() })
    }

    fn insert(&self, _item: WatchlistItem) -> BoxFuture<'_, Result<(), SignalistError>> {
        Box::pin(async { down() })
    }

    fn delete<'a>(
        &'a self,
        _user_id: &'a str,
        _symbol: &'a Symbol,
    ) -> BoxFuture<'a, Result<bool, SignalistError>> {
        Box::pin(async { down() })
    }

    fn list_for_user<'a>(
        &'a self,
        _user_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<WatchlistItem>, SignalistError>> {
        Box::pin(async { down() })
    }
}
