use crate::error::{ExtractError, Result};
use url::Url;

/// Parse an absolute target URL
pub fn parse_target(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|source| ExtractError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}

/// Resolve a next-link attribute value against the page it was found on.
///
/// Returns `None` for an empty (or whitespace-only) value, which ends
/// pagination. Absolute values come back unchanged.
pub fn resolve_link(base: &Url, link: &str) -> Result<Option<Url>> {
    let link = link.trim();
    if link.is_empty() {
        return Ok(None);
    }

    base.join(link)
        .map(Some)
        .map_err(|source| ExtractError::InvalidUrl {
            url: link.to_string(),
            source,
        })
}
