use crate::error::{ExtractError, Result};
use crate::parsers::encoding;
use crate::results::Node;
use scraper::{Html, Selector};

/// Compile a CSS selector
pub fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// A parsed HTML page.
///
/// Lives for one extraction call or one pagination step and is never shared
/// between pages.
pub struct Document {
    html: Html,
}

impl Document {
    /// Decode a response body with the named encoding and parse it
    pub fn parse(bytes: &[u8], encoding_label: &str) -> Result<Self> {
        let text = encoding::decode(bytes, encoding_label)?;
        Ok(Self::from_html(&text))
    }

    /// Parse already-decoded HTML
    pub fn from_html(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// First element matching `selector` in document order
    pub fn select_one(&self, selector: &str) -> Result<Option<Node>> {
        let selector = compile(selector)?;
        Ok(self.first(&selector))
    }

    /// All elements matching `selector` in document order
    pub fn select_all(&self, selector: &str) -> Result<Vec<Node>> {
        let selector = compile(selector)?;
        Ok(self.all(&selector))
    }

    pub(crate) fn first(&self, selector: &Selector) -> Option<Node> {
        self.html.select(selector).next().map(Node::from_element)
    }

    pub(crate) fn all(&self, selector: &Selector) -> Vec<Node> {
        self.html.select(selector).map(Node::from_element).collect()
    }

    pub(crate) fn all_text(&self, selector: &Selector) -> Vec<String> {
        self.html
            .select(selector)
            .map(|el| el.text().collect())
            .collect()
    }

    /// Value of `attr` on the first element matching `selector`.
    ///
    /// The outer `Option` is `None` when nothing matches, the inner one when
    /// the element lacks the attribute.
    pub(crate) fn first_attr(&self, selector: &Selector, attr: &str) -> Option<Option<String>> {
        self.html
            .select(selector)
            .next()
            .map(|el| el.value().attr(attr).map(str::to_string))
    }
}
