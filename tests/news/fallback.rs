use std::collections::HashSet;

use serde_json::{Value, json};
use signalist::{SignalistError, get_news};

use crate::common::{
    article, client, keyless_client, mock_company_news, mock_company_news_status,
    mock_general_news,
};

fn general_feed() -> Value {
    let mut items = vec![
        article(1, "Markets rally", "https://g/1", 1_700_000_010),
        article(1, "Markets rally", "https://g/1", 1_700_000_010),
        article(2, "", "https://g/2", 1_700_000_009),
        article(3, "Fed holds rates", "https://g/3", 1_700_000_008),
        article(3, "Fed holds rates", "https://g/3", 1_700_000_008),
        article(3, "Fed holds rates (updated)", "https://g/3", 1_700_000_008),
    ];
    for i in 10..40 {
        items.push(article(i, &format!("story {i}"), &format!("https://g/{i}"), 1_600_000_000 + i));
    }
    Value::Array(items)
}

#[tokio::test]
async fn no_symbols_uses_general_news_in_arrival_order() {
    let server = httpmock::MockServer::start();
    let general = mock_general_news(&server, general_feed());

    let news = get_news::<&str>(&client(&server), &[]).await.unwrap();

    general.assert();
    let heads: Vec<&str> = news.iter().map(|n| n.headline.as_str()).collect();
    assert_eq!(
        heads,
        vec![
            "Markets rally",
            "Fed holds rates",
            "Fed holds rates (updated)",
            "story 10",
            "story 11",
            "story 12",
        ]
    );
    assert!(news.iter().all(|n| !n.is_company_news && n.related_symbol.is_none()));
}

#[tokio::test]
async fn general_news_never_repeats_an_entry() {
    let server = httpmock::MockServer::start();
    mock_general_news(&server, general_feed());

    let news = get_news::<&str>(&client(&server), &[]).await.unwrap();

    let keys: HashSet<(String, String)> = news
        .iter()
        .map(|n| (n.url.clone(), n.headline.clone()))
        .collect();
    assert_eq!(keys.len(), news.len());
}

#[tokio::test]
async fn every_symbol_failing_falls_back_to_general_news() {
    let server = httpmock::MockServer::start();
    mock_company_news_status(&server, "AAA", 502);
    mock_company_news(&server, "BBB", json!([]));
    let general = mock_general_news(&server, general_feed());

    let news = get_news(&client(&server), &["AAA", "BBB"]).await.unwrap();

    general.assert();
    assert_eq!(news.len(), 6);
    assert!(news.iter().all(|n| !n.is_company_news));
}

#[tokio::test]
async fn null_general_feed_yields_no_articles() {
    let server = httpmock::MockServer::start();
    let general = mock_general_news(&server, Value::Null);

    let news = get_news::<&str>(&client(&server), &[]).await.unwrap();

    general.assert();
    assert!(news.is_empty());
}

#[tokio::test]
async fn null_company_feed_counts_as_empty_and_falls_back() {
    let server = httpmock::MockServer::start();
    let company = mock_company_news(&server, "AAA", Value::Null);
    let general = mock_general_news(&server, general_feed());

    let news = get_news(&client(&server), &["AAA"]).await.unwrap();

    company.assert();
    general.assert();
    assert_eq!(news.len(), 6);
    assert!(news.iter().all(|n| !n.is_company_news));
}

#[tokio::test]
async fn general_failure_surfaces_as_news_fetch_error() {
    let server = httpmock::MockServer::start();
    server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/news");
        then.status(503).body("maintenance");
    });

    let err = get_news::<&str>(&client(&server), &[]).await.unwrap_err();

    match err {
        SignalistError::NewsFetch(source) => match *source {
            SignalistError::Fetch { status, body, url } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
                assert!(!url.contains("token="), "token leaked into {url}");
            }
            other => panic!("expected Fetch source, got {other:?}"),
        },
        other => panic!("expected NewsFetch, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_api_key_fails_without_touching_the_network() {
    let server = httpmock::MockServer::start();
    let any = server.mock(|when, then| {
        when.method(httpmock::Method::GET);
        then.status(200).body("[]");
    });

    let err = get_news(&keyless_client(&server), &["AAPL"]).await.unwrap_err();

    any.assert_calls(0);
    assert!(matches!(
        err,
        SignalistError::NewsFetch(ref source) if matches!(**source, SignalistError::CredentialMissing)
    ));
    assert_eq!(err.to_string(), "Failed to fetch news");
}
