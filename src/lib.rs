//! Fetch an HTML page, extract elements with a CSS selector and follow
//! "next page" links, collecting matches across every page visited.

pub mod config;
pub mod error;
pub mod extractor;
pub mod fetchers;
pub mod pagination;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{ExtractorConfig, HeaderProfile};
pub use error::{ExtractError, Result};
pub use extractor::{DEFAULT_NEXT_ATTR, PageExtractor, Target};
pub use fetchers::{FetchResponse, Fetcher, HttpFetcher};
pub use pagination::PaginationLimits;
pub use parsers::Document;
pub use results::Node;
