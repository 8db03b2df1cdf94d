use std::sync::Arc;

use signalist::{FinnhubClientBuilder, InMemoryWatchlistStore, RequestContext, Session, Signalist};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    signalist::init_tracing();

    // Reads FINNHUB_API_KEY (or NEXT_PUBLIC_FINNHUB_API_KEY) and FINNHUB_BASE_URL.
    let client = FinnhubClientBuilder::from_env()?.build()?;
    let store = Arc::new(InMemoryWatchlistStore::new());
    store.register_user("demo-user", "demo@example.com").await;
    let app = Signalist::new(client, store);

    // One context per request.
    let ctx = RequestContext::authenticated(Session::new("demo-user", "demo@example.com"));
    app.add_to_watchlist(&ctx, "msft", "Microsoft Corp").await?;

    // --- Part 1: News for a watchlist ---
    println!("--- News for AAPL, MSFT, NVDA ---");
    for article in app.news(&["AAPL", "MSFT", "NVDA"]).await? {
        println!(
            "  [{}] {} ({})",
            article
                .related_symbol
                .as_ref()
                .map_or("general", |s| s.as_str()),
            article.headline,
            article.source
        );
    }

    // --- Part 2: Search ---
    println!("--- Search: \"micro\" ---");
    for hit in app.search_stocks(&ctx, Some("micro")).await? {
        let star = if hit.is_in_watchlist { "*" } else { " " };
        println!("  {star} {:<8} {} ({}, {})", hit.symbol, hit.name, hit.exchange, hit.kind);
    }

    // --- Part 3: Watchlist with market data ---
    println!("--- Watchlist ---");
    for entry in app.watchlist_with_data(&ctx).await? {
        match entry.details {
            Some(d) => println!(
                "  {:<6} {:>12} {:>8} P/E {:>6} cap {}",
                d.symbol, d.price_formatted, d.change_formatted, d.pe_ratio, d.market_cap_formatted
            ),
            None => println!("  {:<6} (no data)", entry.item.symbol),
        }
    }

    Ok(())
}
