use crate::config::ExtractorConfig;
use crate::error::{ExtractError, Result};
use crate::fetchers::{Fetcher, HttpFetcher};
use crate::pagination::{PageGuard, PaginationLimits};
use crate::parsers::html::{self, Document};
use crate::results::Node;
use crate::utils;
use scraper::Selector;
use std::time::Duration;
use url::Url;

/// Attribute read from the next-link element when none is given
pub const DEFAULT_NEXT_ATTR: &str = "href";

/// The page an extractor will fetch next and how to decode it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub url: String,
    pub encoding: String,
}

/// Fetches a page, applies a CSS selector and optionally follows a chain of
/// "next page" links, accumulating matches across pages.
///
/// Every call starts from the configured target URL. Pages are fetched one
/// at a time and in order, since each page's next-link is only known once
/// the page before it has been parsed.
pub struct PageExtractor<F = HttpFetcher> {
    target: Target,
    fetcher: F,
    limits: PaginationLimits,
}

impl PageExtractor<HttpFetcher> {
    /// Create an extractor for `url`, decoding pages as UTF-8
    pub fn new(url: &str) -> Result<Self> {
        Self::from_config(&ExtractorConfig::new(url))
    }

    /// Create an extractor for `url`, decoding pages with `encoding`
    pub fn with_encoding(url: &str, encoding: &str) -> Result<Self> {
        let mut config = ExtractorConfig::new(url);
        config.encoding = encoding.to_string();
        Self::from_config(&config)
    }

    /// Create an extractor from a full configuration
    pub fn from_config(config: &ExtractorConfig) -> Result<Self> {
        let timeout = config.timeout_secs.map(Duration::from_secs);
        let fetcher = HttpFetcher::new(&config.headers, timeout)?;

        let limits = PaginationLimits {
            max_pages: config.max_pages,
            detect_cycles: config.detect_cycles,
        };

        Ok(Self::with_fetcher(fetcher, &config.url, &config.encoding).with_limits(limits))
    }
}

impl<F: Fetcher> PageExtractor<F> {
    /// Create an extractor that obtains pages through `fetcher`
    pub fn with_fetcher(fetcher: F, url: &str, encoding: &str) -> Self {
        Self {
            target: Target {
                url: url.to_string(),
                encoding: encoding.to_string(),
            },
            fetcher,
            limits: PaginationLimits::default(),
        }
    }

    /// Replace the pagination limits
    pub fn with_limits(mut self, limits: PaginationLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn url(&self) -> &str {
        &self.target.url
    }

    pub fn encoding(&self) -> &str {
        &self.target.encoding
    }

    pub fn limits(&self) -> PaginationLimits {
        self.limits
    }

    /// Point the extractor at a different page
    pub fn update_url(&mut self, url: &str) {
        self.target.url = url.to_string();
    }

    /// Decode subsequent pages with a different encoding.
    ///
    /// The label is checked on the next fetch, not here.
    pub fn update_encoding(&mut self, encoding: &str) {
        self.target.encoding = encoding.to_string();
    }

    /// First element matching `selector` on the target page.
    ///
    /// `Ok(None)` means the page was fetched but nothing matched.
    pub async fn fetch_one(&self, selector: &str) -> Result<Option<Node>> {
        let selector = html::compile(selector)?;
        let url = utils::parse_target(&self.target.url)?;
        let (document, _) = self.load(&url).await?;

        Ok(document.first(&selector))
    }

    /// Text of the first element matching `selector` on the target page.
    ///
    /// Unlike [`fetch_one`](Self::fetch_one), a missing match is an error.
    pub async fn fetch_one_text(&self, selector: &str) -> Result<String> {
        match self.fetch_one(selector).await? {
            Some(node) => Ok(node.text),
            None => Err(ExtractError::NoMatch(selector.to_string())),
        }
    }

    /// All elements matching `selector`, following `next` links when given.
    ///
    /// Without `next` only the target page is read. With it, each page's
    /// first `next` element supplies the following page's URL through
    /// `next_attr` (`href` by default). Any failure discards the matches
    /// collected so far.
    pub async fn fetch_all(
        &self,
        selector: &str,
        next: Option<&str>,
        next_attr: Option<&str>,
    ) -> Result<Vec<Node>> {
        self.paginate(selector, next, next_attr, Document::all).await
    }

    /// Text of every element matching `selector` across the `next` chain
    pub async fn fetch_all_text(
        &self,
        selector: &str,
        next: &str,
        next_attr: Option<&str>,
    ) -> Result<Vec<String>> {
        self.paginate(selector, Some(next), next_attr, Document::all_text).await
    }

    async fn paginate<T>(
        &self,
        selector: &str,
        next: Option<&str>,
        next_attr: Option<&str>,
        collect: fn(&Document, &Selector) -> Vec<T>,
    ) -> Result<Vec<T>> {
        let selector = html::compile(selector)?;
        let next = next.map(html::compile).transpose()?;
        let next_attr = next_attr.unwrap_or(DEFAULT_NEXT_ATTR);

        let mut current = if self.target.url.is_empty() {
            None
        } else {
            Some(utils::parse_target(&self.target.url)?)
        };
        let mut guard = PageGuard::new(self.limits);
        let mut results = Vec::new();

        while let Some(page_url) = current.take() {
            guard.admit(&page_url)?;
            let (document, base) = self.load(&page_url).await?;

            let found = collect(&document, &selector);
            ::log::debug!(
                "Page {} ({}) matched {} elements",
                guard.pages(),
                base,
                found.len()
            );
            results.extend(found);

            let Some(next) = &next else {
                break;
            };
            current = match document.first_attr(next, next_attr) {
                Some(Some(link)) => utils::resolve_link(&base, &link)?,
                Some(None) => {
                    ::log::debug!("Next-link on {} has no {} attribute", base, next_attr);
                    None
                }
                None => {
                    ::log::debug!("No next-link on {}", base);
                    None
                }
            };
        }

        ::log::info!(
            "Collected {} results from {} pages starting at {}",
            results.len(),
            guard.pages(),
            self.target.url
        );
        Ok(results)
    }

    /// Fetch and parse one page, returning it with the URL it was served from
    async fn load(&self, url: &Url) -> Result<(Document, Url)> {
        let response = self.fetcher.fetch(url.as_str()).await?;
        if !response.is_success() {
            ::log::info!("Failed to request url = {} (status {})", url, response.status);
            return Err(ExtractError::FetchFailed {
                url: url.to_string(),
                status: response.status,
            });
        }

        let base = Url::parse(&response.url).unwrap_or_else(|_| url.clone());
        let document = Document::parse(&response.body, &self.target.encoding)?;
        Ok((document, base))
    }
}
