use serde_json::json;
use signalist::search_stocks;

use crate::common::{client, mock_profile, mock_search, signed_in, store_watching};

#[tokio::test]
async fn empty_query_lists_profiled_popular_symbols() {
    let server = httpmock::MockServer::start();
    mock_profile(
        &server,
        "AAPL",
        json!({ "name": "Apple Inc", "ticker": "AAPL", "exchange": "NASDAQ NMS - GLOBAL MARKET" }),
    );
    // Blank name falls back to the ticker.
    mock_profile(&server, "MSFT", json!({ "name": "", "ticker": "MSFT" }));
    // No name at all: dropped.
    mock_profile(&server, "GOOGL", json!({}));
    mock_profile(&server, "AMZN", json!({ "name": "Amazon.com Inc" }));
    // Every other popular symbol gets a 404 from the mock server: dropped.
    let search = mock_search(&server, "", json!({ "count": 0, "result": [] }));
    let store = store_watching(&["amzn"]).await;

    let results = search_stocks(&client(&server), &store, &signed_in(), None)
        .await
        .unwrap();

    search.assert_calls(0);
    let got: Vec<(&str, &str)> = results
        .iter()
        .map(|r| (r.symbol.as_str(), r.name.as_str()))
        .collect();
    assert_eq!(
        got,
        vec![("AAPL", "Apple Inc"), ("MSFT", "MSFT"), ("AMZN", "Amazon.com Inc")]
    );
    assert_eq!(results[0].exchange, "NASDAQ NMS - GLOBAL MARKET");
    assert_eq!(results[1].exchange, "US");
    assert!(results.iter().all(|r| r.kind == "Common Stock"));
    assert!(results[2].is_in_watchlist);
    assert!(!results[0].is_in_watchlist);
}

#[tokio::test]
async fn whitespace_query_is_popular_mode_and_capped_at_ten() {
    let server = httpmock::MockServer::start();
    let profiles = server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/stock/profile2");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({ "name": "Some Company" }));
    });
    let store = store_watching(&[]).await;

    let results = search_stocks(&client(&server), &store, &signed_in(), Some("   "))
        .await
        .unwrap();

    profiles.assert_calls(10);
    assert_eq!(results.len(), 10);
    assert_eq!(results[0].symbol, "AAPL");
    assert!(results.iter().all(|r| !r.name.is_empty()));
}
