#[cfg(feature = "test-mode")]
use std::env;
use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::core::{
    FinnhubClient, SignalistError,
    client::{CacheMode, RetryConfig},
};

/// Read the response body as text.
/// In `test-mode`, if `SIGNALIST_RECORD=1`, the body is saved as a fixture.
pub(crate) async fn get_text(
    resp: reqwest::Response,
    _endpoint: &str,
    _key: &str,
) -> Result<String, reqwest::Error> {
    let text = resp.text().await?;

    #[cfg(feature = "test-mode")]
    {
        if env::var("SIGNALIST_RECORD").ok().as_deref() == Some("1")
            && let Err(e) = crate::core::fixtures::record_fixture(_endpoint, _key, &text)
        {
            tracing::warn!(error = %e, "SIGNALIST_RECORD: failed to write fixture for {_key}");
        }
    }

    Ok(text)
}

/// Strips the `token` query parameter so URLs can be logged and returned in errors.
pub(crate) fn redact(url: &Url) -> String {
    let mut clean = url.clone();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "token")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if kept.is_empty() {
        clean.set_query(None);
    } else {
        clean.query_pairs_mut().clear().extend_pairs(kept);
    }
    clean.to_string()
}

/// Per-call knobs for [`FinnhubClient::fetch_json_with`].
#[derive(Debug, Clone, Default)]
pub struct FetchOptions<'a> {
    /// How long an identical URL may be served from the shared cache. `None` means never cached.
    pub ttl: Option<Duration>,
    pub cache_mode: CacheMode,
    pub retry_override: Option<&'a RetryConfig>,
    /// Short endpoint label for logs and recorded fixtures.
    pub endpoint: &'a str,
    /// Symbol or query the call is about, for logs and recorded fixtures.
    pub key: &'a str,
}

impl FinnhubClient {
    /// Issues a GET and decodes the JSON body.
    ///
    /// Without `ttl` the cache is neither read nor written. With it, an identical URL may be
    /// answered from the shared cache for up to `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`SignalistError::Fetch`] on a non-2xx status (carrying the body when it could be
    /// read), `Http` on transport failure and `Json` if the body does not decode into `T`.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        ttl: Option<Duration>,
    ) -> Result<T, SignalistError> {
        self.fetch_json_with(
            url,
            FetchOptions {
                ttl,
                endpoint: self.endpoint_label(url),
                ..FetchOptions::default()
            },
        )
        .await
    }

    /// [`fetch_json`](Self::fetch_json) with an explicit cache mode and retry override.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_json`](Self::fetch_json).
    pub async fn fetch_json_with<T: DeserializeOwned>(
        &self,
        url: &Url,
        opts: FetchOptions<'_>,
    ) -> Result<T, SignalistError> {
        let body = self.fetch_text(url, &opts).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_text(&self, url: &Url, opts: &FetchOptions<'_>) -> Result<String, SignalistError> {
        let ttl = match opts.cache_mode {
            CacheMode::Bypass => None,
            CacheMode::Use | CacheMode::Refresh => opts.ttl,
        };

        if ttl.is_some()
            && opts.cache_mode == CacheMode::Use
            && let Some(body) = self.cache_get(url).await
        {
            tracing::debug!(endpoint = opts.endpoint, key = opts.key, "served from cache");
            return Ok(body);
        }

        let req = self
            .http()
            .get(url.clone())
            .header("accept", "application/json");
        let resp = self.send_with_retry(req, opts.retry_override).await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SignalistError::Fetch {
                status: status.as_u16(),
                url: redact(url),
                body,
            });
        }

        let body = get_text(resp, opts.endpoint, opts.key).await?;
        if let Some(ttl) = ttl {
            self.cache_put(url, &body, ttl).await;
        }
        Ok(body)
    }
}
