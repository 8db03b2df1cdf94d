//! Company profiles (`/stock/profile2`).

mod model;

pub use model::CompanyProfile;

use crate::core::{
    FetchOptions, FinnhubClient, SignalistError, Symbol, client::constants::PROFILE_TTL,
};

/// Fetches the profile for `symbol`, served from the shared cache for up to an hour.
///
/// # Errors
///
/// Returns `CredentialMissing` without an API key, `Fetch` on a non-2xx answer, and
/// `Http`/`Json` on transport or decoding failures.
pub async fn fetch_profile(
    client: &FinnhubClient,
    symbol: &Symbol,
) -> Result<CompanyProfile, SignalistError> {
    let url = client.endpoint("stock/profile2", &[("symbol", symbol.as_str())])?;
    client
        .fetch_json_with(
            &url,
            FetchOptions {
                ttl: Some(PROFILE_TTL),
                endpoint: "stock/profile2",
                key: symbol.as_str(),
                ..FetchOptions::default()
            },
        )
        .await
}
