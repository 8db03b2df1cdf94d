use crate::{
    core::{
        FetchOptions, FinnhubClient, SignalistError, Symbol, client::constants::METRIC_TTL,
    },
    details::{
        StockDetails,
        format::{format_change_percent, format_market_cap_value, format_pe_ratio, format_price},
        wire::{FinancialsData, QuoteData},
    },
    profile::fetch_profile,
};

pub(super) async fn fetch_details(
    client: &FinnhubClient,
    symbol: &Symbol,
) -> Result<StockDetails, SignalistError> {
    let quote_url = client.endpoint("quote", &[("symbol", symbol.as_str())])?;
    let metric_url = client.endpoint(
        "stock/metric",
        &[("symbol", symbol.as_str()), ("metric", "all")],
    )?;

    // Quotes are never cached; profile and metrics are.
    let (quote, profile, financials) = tokio::try_join!(
        client.fetch_json::<QuoteData>(&quote_url, None),
        fetch_profile(client, symbol),
        client.fetch_json_with::<FinancialsData>(
            &metric_url,
            FetchOptions {
                ttl: Some(METRIC_TTL),
                endpoint: "stock/metric",
                key: symbol.as_str(),
                ..FetchOptions::default()
            },
        ),
    )?;

    let current_price = quote
        .c
        .filter(|c| *c != 0.0)
        .ok_or_else(|| SignalistError::Data("quote has no current price".into()))?;
    let company = profile
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| SignalistError::Data("profile has no company name".into()))?
        .to_string();

    let change_percent = quote.dp.unwrap_or_default();
    let pe = financials.metric.and_then(|m| m.pe_normalized_annual);

    Ok(StockDetails {
        symbol: symbol.clone(),
        company,
        current_price,
        change_percent,
        price_formatted: format_price(current_price),
        change_formatted: format_change_percent(change_percent),
        pe_ratio: format_pe_ratio(pe),
        market_cap_formatted: format_market_cap_value(
            profile.market_capitalization.unwrap_or_default(),
        ),
    })
}
