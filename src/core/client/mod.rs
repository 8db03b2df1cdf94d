//! Public client surface + builder.
//! Internals are split into `constants` (endpoints, limits, UA) and `retry` (policy types).

pub(crate) mod constants;
mod retry;

pub use retry::{Backoff, CacheMode, RetryConfig};

use crate::core::SignalistError;
use constants::{API_KEY_ENV_VARS, BASE_URL_ENV_VAR, DEFAULT_BASE_URL, USER_AGENT};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use url::Url;

#[derive(Debug)]
struct CacheEntry {
    body: String,
    expires_at: Instant,
}

/// URL-keyed body cache shared by every clone of a client.
///
/// Writes for the same URL carry the same payload, so last-writer-wins is all the
/// coordination needed.
#[derive(Debug, Default)]
struct CacheStore {
    map: RwLock<HashMap<String, CacheEntry>>,
}

/// A configured Finnhub HTTP client. Cheap to clone; clones share the TTL cache.
#[derive(Clone)]
pub struct FinnhubClient {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
    retry: RetryConfig,
    cache: Option<Arc<CacheStore>>,
}

impl std::fmt::Debug for FinnhubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinnhubClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("retry", &self.retry)
            .field("cache", &self.cache.is_some())
            .finish()
    }
}

impl FinnhubClient {
    /// Create a new builder.
    pub fn builder() -> FinnhubClientBuilder {
        FinnhubClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Whether an API key was configured.
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fails with [`SignalistError::CredentialMissing`] when no key is configured.
    pub(crate) fn require_credentials(&self) -> Result<&str, SignalistError> {
        self.api_key
            .as_deref()
            .ok_or(SignalistError::CredentialMissing)
    }

    /// Builds `{base}/{path}?{params}&token={key}`.
    pub(crate) fn endpoint(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Url, SignalistError> {
        let token = self.require_credentials()?;
        let mut url = self.base_url.join(path)?;
        {
            let mut qp = url.query_pairs_mut();
            for (k, v) in params {
                qp.append_pair(k, v);
            }
            qp.append_pair("token", token);
        }
        Ok(url)
    }

    /// `url`'s path relative to the configured base, e.g. `company-news`.
    pub(crate) fn endpoint_label<'u>(&self, url: &'u Url) -> &'u str {
        let path = url.path();
        path.strip_prefix(self.base_url.path())
            .unwrap_or(path)
            .trim_start_matches('/')
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Drops every cached body. Mostly useful in tests.
    pub async fn clear_cache(&self) {
        if let Some(store) = &self.cache {
            store.map.write().await.clear();
        }
    }

    pub(crate) async fn cache_get(&self, url: &Url) -> Option<String> {
        let store = self.cache.as_ref()?;
        let guard = store.map.read().await;
        if let Some(entry) = guard.get(url.as_str())
            && Instant::now() <= entry.expires_at
        {
            return Some(entry.body.clone());
        }
        None
    }

    pub(crate) async fn cache_put(&self, url: &Url, body: &str, ttl: Duration) {
        let Some(store) = &self.cache else {
            return;
        };
        let now = Instant::now();
        let entry = CacheEntry {
            body: body.to_string(),
            expires_at: now + ttl,
        };
        let mut map = store.map.write().await;
        // Keys include user queries and dated news windows, so stale ones must not linger.
        map.retain(|_, e| e.expires_at > now);
        map.insert(url.as_str().to_string(), entry);
    }

    /// Number of bodies currently held, expired ones included until the next write.
    #[doc(hidden)]
    pub async fn cache_len(&self) -> usize {
        match &self.cache {
            Some(store) => store.map.read().await.len(),
            None => 0,
        }
    }

    /// Sends `req`, retrying according to `override_cfg` or the client's policy.
    pub(crate) async fn send_with_retry(
        &self,
        req: reqwest::RequestBuilder,
        override_cfg: Option<&RetryConfig>,
    ) -> Result<reqwest::Response, SignalistError> {
        let cfg = override_cfg.unwrap_or(&self.retry);
        let mut attempt: u32 = 0;

        loop {
            let Some(this_try) = req.try_clone() else {
                // Streaming bodies cannot be replayed.
                return Ok(req.send().await?);
            };
            let can_retry = cfg.enabled && attempt < cfg.max_retries;

            match this_try.send().await {
                Ok(resp) => {
                    let code = resp.status().as_u16();
                    if can_retry && cfg.retry_on_status.contains(&code) {
                        tracing::debug!(status = code, attempt, "retrying after status");
                    } else {
                        return Ok(resp);
                    }
                }
                Err(e) => {
                    let retryable = (e.is_timeout() && cfg.retry_on_timeout)
                        || (e.is_connect() && cfg.retry_on_connect);
                    if !(can_retry && retryable) {
                        return Err(e.into());
                    }
                    tracing::debug!(error = %e, attempt, "retrying after transport error");
                }
            }

            tokio::time::sleep(cfg.backoff.delay(attempt)).await;
            attempt += 1;
        }
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct FinnhubClientBuilder {
    api_key: Option<String>,
    base_url: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry: Option<RetryConfig>,
    cache: Option<bool>,
}

impl FinnhubClientBuilder {
    /// Seeds the key and base URL from the environment.
    ///
    /// The key comes from `FINNHUB_API_KEY`, then `NEXT_PUBLIC_FINNHUB_API_KEY`. A missing key is
    /// not an error here; operations report it when they need it.
    ///
    /// # Errors
    ///
    /// Returns `SignalistError::Url` if `FINNHUB_BASE_URL` is set but not a valid URL.
    pub fn from_env() -> Result<Self, SignalistError> {
        let api_key = API_KEY_ENV_VARS
            .iter()
            .filter_map(|k| std::env::var(k).ok())
            .find(|v| !v.trim().is_empty());
        let base_url = match std::env::var(BASE_URL_ENV_VAR) {
            Ok(raw) if !raw.trim().is_empty() => {
                Some(with_trailing_slash(Url::parse(raw.trim())?))
            }
            _ => None,
        };
        Ok(Self {
            api_key,
            base_url,
            ..Self::default()
        })
    }

    /// Set the Finnhub API key sent as the `token` query parameter.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the API base (e.g., a mock server in tests).
    ///
    /// A trailing slash is added if missing so endpoint paths join underneath it.
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(with_trailing_slash(url));
        self
    }

    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set a global request timeout (overall). Default: none.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Set the default retry policy for every call made by this client.
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Enable or disable the shared TTL cache. Enabled by default.
    pub fn cache(mut self, enabled: bool) -> Self {
        self.cache = Some(enabled);
        self
    }

    /// # Errors
    ///
    /// Fails if the default base URL cannot be parsed or the HTTP client cannot be built.
    pub fn build(self) -> Result<FinnhubClient, SignalistError> {
        let base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(FinnhubClient {
            http,
            base_url,
            api_key: self.api_key.filter(|k| !k.trim().is_empty()),
            retry: self.retry.unwrap_or_default(),
            cache: self
                .cache
                .unwrap_or(true)
                .then(|| Arc::new(CacheStore::default())),
        })
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
