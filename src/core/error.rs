use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum SignalistError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The response body could not be decoded as JSON of the expected shape.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The upstream API answered with a non-2xx status.
    ///
    /// `body` is best-effort: a failure to read it yields an empty string.
    #[error("Fetch failed {status} at {url}: {body}")]
    Fetch {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error, with the API token redacted.
        url: String,
        /// The response body, if it could be read.
        body: String,
    },

    /// No Finnhub API key was configured.
    #[error("FINNHUB API key is not configured")]
    CredentialMissing,

    /// The operation needs a signed-in caller and none was present.
    #[error("authentication required")]
    Unauthenticated,

    /// The data received from the API was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// The watchlist store failed.
    #[error("watchlist store error: {0}")]
    Store(String),

    /// Any failure while assembling news; callers see this single variant for `get_news`.
    #[error("Failed to fetch news")]
    NewsFetch(#[source] Box<SignalistError>),

    /// Any failure while assembling details for one symbol.
    #[error("Failed to fetch stock details for {symbol}")]
    StockDetails {
        /// The normalized symbol.
        symbol: String,
        /// The underlying failure.
        #[source]
        source: Box<SignalistError>,
    },

    /// A watchlist operation failed for a reason other than authentication.
    #[error("{message}")]
    Watchlist {
        /// The user-facing summary, e.g. "Failed to add stock to watchlist".
        message: &'static str,
        /// The underlying failure.
        #[source]
        source: Box<SignalistError>,
    },
}

impl SignalistError {
    pub(crate) fn news(e: Self) -> Self {
        match e {
            already @ Self::NewsFetch(_) => already,
            other => Self::NewsFetch(Box::new(other)),
        }
    }

    pub(crate) fn watchlist(message: &'static str, e: Self) -> Self {
        match e {
            Self::Unauthenticated => Self::Unauthenticated,
            other => Self::Watchlist {
                message,
                source: Box::new(other),
            },
        }
    }
}
