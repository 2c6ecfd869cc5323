use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// User-Agent sent when no profile overrides it
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/106.0.0.0 Safari/537.36";

/// Referer sent when no profile overrides it
pub const DEFAULT_REFERER: &str = "https://www.google.com";

/// Encoding used when none is configured
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Headers attached to every request an extractor makes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderProfile {
    /// Value of the User-Agent header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Value of the Connection header
    #[serde(default = "default_connection")]
    pub connection: String,

    /// Value of the Referer header
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Additional headers, sent as-is
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl Default for HeaderProfile {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            connection: default_connection(),
            referer: default_referer(),
            extra: BTreeMap::new(),
        }
    }
}

/// Configuration for a page extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// URL of the first page to fetch
    pub url: String,

    /// Character encoding label used to decode response bodies
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// Request headers
    #[serde(default)]
    pub headers: HeaderProfile,

    /// Per-request timeout in seconds (no timeout when absent)
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Maximum number of pages one pagination run may fetch
    #[serde(default)]
    pub max_pages: Option<usize>,

    /// Whether pagination fails when a next-link revisits a page
    #[serde(default = "default_detect_cycles")]
    pub detect_cycles: bool,
}

impl ExtractorConfig {
    /// Create a new configuration with default values
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            encoding: default_encoding(),
            headers: HeaderProfile::default(),
            timeout_secs: None,
            max_pages: None,
            detect_cycles: default_detect_cycles(),
        }
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_connection() -> String {
    "keep-alive".to_string()
}

fn default_referer() -> String {
    DEFAULT_REFERER.to_string()
}

fn default_encoding() -> String {
    DEFAULT_ENCODING.to_string()
}

/// Cycle detection is on unless explicitly disabled
fn default_detect_cycles() -> bool {
    true
}
