/// All errors that can occur while loading or looking up showcase data.
#[derive(thiserror::Error, Debug)]
pub enum ShowcaseError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Backend returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The configured base URL cannot be used to build endpoint URLs.
    #[error("invalid base url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The payload was not valid JSON.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// No record matches the requested id or slug.
    #[error("no team or project found for {id}")]
    NotFound { id: String },
}

pub type Result<T> = std::result::Result<T, ShowcaseError>;
