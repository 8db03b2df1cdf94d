use signalist::{NewsBuilder, Symbol, get_news};

use serde_json::Value;

use crate::common::{
    article, articles_for, client, mock_company_news, mock_company_news_status,
};

fn headlines(articles: &[signalist::MarketNewsArticle]) -> Vec<&str> {
    articles.iter().map(|a| a.headline.as_str()).collect()
}

#[tokio::test]
async fn round_robin_takes_one_article_per_symbol_per_round() {
    let server = httpmock::MockServer::start();
    let a = mock_company_news(&server, "AAA", articles_for("AAA", 8, 1_700_000_300));
    let b = mock_company_news(&server, "BBB", articles_for("BBB", 8, 1_700_000_200));
    let c = mock_company_news(&server, "CCC", articles_for("CCC", 8, 1_700_000_100));

    let news = get_news(&client(&server), &["AAA", "BBB", "CCC"]).await.unwrap();

    a.assert();
    b.assert();
    c.assert();

    // Two full rounds, then sorted newest first.
    assert_eq!(
        headlines(&news),
        vec!["AAA-0", "AAA-1", "BBB-0", "BBB-1", "CCC-0", "CCC-1"]
    );
    assert!(news.iter().all(|n| n.is_company_news));
}

/// `count` articles for `symbol` that all share one timestamp.
fn same_time_articles(symbol: &str, count: usize, datetime: i64) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                article(
                    i64::try_from(i).unwrap(),
                    &format!("{symbol}-{i}"),
                    &format!("https://news.example.com/{symbol}/{i}"),
                    datetime,
                )
            })
            .collect(),
    )
}

#[tokio::test]
async fn equal_timestamps_keep_strict_rotation_order() {
    let server = httpmock::MockServer::start();
    for sym in ["AAA", "BBB", "CCC"] {
        mock_company_news(&server, sym, same_time_articles(sym, 8, 1_700_000_000));
    }

    let news = get_news(&client(&server), &["AAA", "BBB", "CCC"]).await.unwrap();

    assert_eq!(
        headlines(&news),
        vec!["AAA-0", "BBB-0", "CCC-0", "AAA-1", "BBB-1", "CCC-1"]
    );
}

#[tokio::test]
async fn short_lists_do_not_stop_other_symbols() {
    let server = httpmock::MockServer::start();
    mock_company_news(&server, "AAA", articles_for("AAA", 1, 1_700_000_300));
    mock_company_news(&server, "BBB", articles_for("BBB", 8, 1_700_000_200));
    mock_company_news(&server, "CCC", articles_for("CCC", 8, 1_700_000_100));

    let news = get_news(&client(&server), &["AAA", "BBB", "CCC"]).await.unwrap();

    assert_eq!(
        headlines(&news),
        vec!["AAA-0", "BBB-0", "BBB-1", "BBB-2", "CCC-0", "CCC-1"]
    );
}

#[tokio::test]
async fn final_order_is_newest_first_across_symbols() {
    let server = httpmock::MockServer::start();
    // BBB is fresher than AAA even though AAA comes first in the merge.
    mock_company_news(&server, "AAA", articles_for("AAA", 3, 1_700_000_000));
    mock_company_news(&server, "BBB", articles_for("BBB", 3, 1_700_009_000));

    let news = get_news(&client(&server), &["AAA", "BBB"]).await.unwrap();

    assert_eq!(news.len(), 6);
    assert!(news.windows(2).all(|w| w[0].datetime >= w[1].datetime));
    assert_eq!(news[0].headline, "BBB-0");
}

#[tokio::test]
async fn failed_symbol_is_skipped_and_others_still_fill() {
    let server = httpmock::MockServer::start();
    let failing = mock_company_news_status(&server, "AAA", 500);
    mock_company_news(&server, "BBB", articles_for("BBB", 8, 1_700_000_200));
    mock_company_news(&server, "CCC", articles_for("CCC", 8, 1_700_000_100));

    let news = get_news(&client(&server), &["AAA", "BBB", "CCC"]).await.unwrap();

    failing.assert();
    assert_eq!(news.len(), 6);
    let allowed = [Symbol::parse("BBB").unwrap(), Symbol::parse("CCC").unwrap()];
    for n in &news {
        assert!(n.is_company_news);
        let related = n.related_symbol.as_ref().expect("company news carries its symbol");
        assert!(allowed.contains(related), "unexpected symbol {related}");
    }
}

#[tokio::test]
async fn symbols_are_normalized_and_deduplicated() {
    let server = httpmock::MockServer::start();
    let mock = mock_company_news(&server, "AAPL", articles_for("AAPL", 2, 1_700_000_000));

    let news = get_news(&client(&server), &[" aapl ", "AAPL", "", "   "])
        .await
        .unwrap();

    mock.assert_calls(1);
    assert_eq!(news.len(), 2);
    assert!(
        news.iter()
            .all(|n| n.related_symbol.as_ref().is_some_and(|s| s == "AAPL"))
    );
}

#[tokio::test]
async fn malformed_records_are_dropped() {
    let server = httpmock::MockServer::start();
    let body = serde_json::json!([
        { "id": 1, "headline": "", "url": "https://x/1", "datetime": 1_700_000_000 },
        { "id": 2, "headline": "no url", "datetime": 1_700_000_000 },
        { "id": 3, "headline": "zero time", "url": "https://x/3", "datetime": 0 },
        { "id": 4, "headline": "wrong type", "url": "https://x/4", "datetime": "yesterday" },
        { "id": 5, "headline": "good", "url": "https://x/5", "datetime": 1_700_000_000 }
    ]);
    mock_company_news(&server, "MSFT", body);

    let news = get_news(&client(&server), &["msft"]).await.unwrap();

    assert_eq!(headlines(&news), vec!["good"]);
    assert_eq!(news[0].source, "Finnhub");
    assert_eq!(news[0].summary, "");
}

#[tokio::test]
async fn company_news_is_cached_between_calls() {
    let server = httpmock::MockServer::start();
    let mock = mock_company_news(&server, "NVDA", articles_for("NVDA", 3, 1_700_000_000));
    let client = client(&server);

    let first = NewsBuilder::new(&client).symbols(["NVDA"]).fetch().await.unwrap();
    let second = NewsBuilder::new(&client).symbols(["nvda"]).fetch().await.unwrap();

    mock.assert_calls(1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn bypass_mode_always_hits_the_network() {
    let server = httpmock::MockServer::start();
    let mock = mock_company_news(&server, "NVDA", articles_for("NVDA", 3, 1_700_000_000));
    let client = client(&server);

    for _ in 0..2 {
        NewsBuilder::new(&client)
            .symbols(["NVDA"])
            .cache_mode(signalist::CacheMode::Bypass)
            .fetch()
            .await
            .unwrap();
    }

    mock.assert_calls(2);
}
