pub mod fetcher;
pub mod http;

pub use fetcher::{FetchResponse, Fetcher};
pub use http::HttpFetcher;
