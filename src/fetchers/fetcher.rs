use crate::error::Result;
use async_trait::async_trait;

/// A raw HTTP response as the extractor sees it
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// URL the body was served from, after redirects
    pub url: String,

    /// HTTP status code
    pub status: u16,

    /// Undecoded body
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx class
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of pages for an extractor.
///
/// Implementations perform a single GET per call. A response with any status
/// is `Ok`; only failures to obtain a response at all are `Err`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchResponse>;
}
