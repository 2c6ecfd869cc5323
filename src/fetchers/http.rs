use crate::config::HeaderProfile;
use crate::error::{ExtractError, Result};
use crate::fetchers::fetcher::{FetchResponse, Fetcher};
use async_trait::async_trait;
use reqwest::header::{CONNECTION, HeaderMap, HeaderName, HeaderValue, REFERER, USER_AGENT};
use std::time::Duration;

/// Fetcher backed by a reqwest client.
///
/// The header profile is installed as the client's default headers, so every
/// request carries it without per-call setup.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher sending `headers` with an optional per-request timeout
    pub fn new(headers: &HeaderProfile, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().default_headers(header_map(headers)?);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ExtractError::Client)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        ::log::debug!("GET {}", url);

        let transport = |source: reqwest::Error| ExtractError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        if final_url != url {
            ::log::debug!("{} redirected to {}", url, final_url);
        }

        let body = response.bytes().await.map_err(transport)?;
        ::log::trace!("{} answered {} with {} bytes", final_url, status, body.len());

        Ok(FetchResponse::new(final_url, status, body.to_vec()))
    }
}

/// Convert a header profile into request headers
fn header_map(profile: &HeaderProfile) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, header_value(USER_AGENT.as_str(), &profile.user_agent)?);
    headers.insert(CONNECTION, header_value(CONNECTION.as_str(), &profile.connection)?);
    headers.insert(REFERER, header_value(REFERER.as_str(), &profile.referer)?);

    for (name, value) in &profile.extra {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|_| ExtractError::InvalidHeader {
                name: name.clone(),
                value: value.clone(),
            })?;
        headers.insert(header_name, header_value(name, value)?);
    }

    Ok(headers)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| ExtractError::InvalidHeader {
        name: name.to_string(),
        value: value.to_string(),
    })
}
