/// Errors surfaced by page extraction.
///
/// Nothing is retried or swallowed inside the crate: every variant reaches
/// the caller of the operation that produced it.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The server answered with a non-2xx status.
    #[error("Failed to request url = {url} (status {status})")]
    FetchFailed { url: String, status: u16 },

    /// The request never produced a response (DNS, TLS, connect, timeout).
    #[error("HTTP request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A target or next-link could not be turned into an absolute URL.
    #[error("Invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The configured encoding label is not a known WHATWG label.
    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),

    /// The body contains bytes that are malformed under the configured encoding.
    #[error("Response body is not valid {encoding}")]
    Decode { encoding: String },

    /// The CSS selector could not be compiled.
    #[error("Invalid CSS selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// A single-element text extraction found nothing to read.
    #[error("No element matches selector {0:?}")]
    NoMatch(String),

    /// Pagination wanted more pages than the configured maximum.
    #[error("Pagination exceeded the limit of {limit} pages")]
    PaginationLimitExceeded { limit: usize },

    /// A next-link pointed back at a page already visited in this run.
    #[error("Pagination cycle detected at {url}")]
    PaginationCycle { url: String },

    /// A header in the request profile is not a valid HTTP header.
    #[error("Invalid header {name}: {value:?}")]
    InvalidHeader { name: String, value: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
