use clap::Parser;
use page_extract::{ExtractorConfig, Result};

#[derive(Parser, Debug)]
#[command(name = "page-extract")]
#[command(about = "Extract elements from a web page, following next-page links")]
#[command(version)]
pub struct Args {
    /// URL of the first page
    pub url: String,

    /// CSS selector for the elements to extract
    pub selector: String,

    /// CSS selector of the element linking to the next page
    #[arg(short, long)]
    pub next: Option<String>,

    /// Attribute of the next-page element holding the URL
    #[arg(short, long, default_value = page_extract::DEFAULT_NEXT_ATTR)]
    pub attr: String,

    /// Character encoding of the pages
    #[arg(short, long)]
    pub encoding: Option<String>,

    /// Print element text instead of HTML
    #[arg(short, long)]
    pub text: bool,

    /// Only extract the first match on the first page
    #[arg(long)]
    pub first: bool,

    /// Stop with an error after this many pages
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Allow next-links that lead back to an already visited page
    #[arg(long)]
    pub no_cycle_check: bool,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// JSON configuration file; command-line options override it
    #[arg(short, long)]
    pub config: Option<String>,
}

impl Args {
    /// Build the extractor configuration from the file (if any) and flags
    pub fn to_config(&self) -> Result<ExtractorConfig> {
        let mut config = match &self.config {
            Some(path) => ExtractorConfig::from_file(path)?,
            None => ExtractorConfig::new(&self.url),
        };

        config.url = self.url.clone();
        if let Some(encoding) = &self.encoding {
            config.encoding = encoding.clone();
        }
        if self.max_pages.is_some() {
            config.max_pages = self.max_pages;
        }
        if self.no_cycle_check {
            config.detect_cycles = false;
        }
        if self.timeout.is_some() {
            config.timeout_secs = self.timeout;
        }

        Ok(config)
    }
}
