use crate::error::Result;
use crate::parsers::html;
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

/// An element matched on a fetched page.
///
/// The node is a snapshot taken while the page was parsed, so it stays valid
/// after the page itself is dropped and can be sent across tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Lowercase tag name
    pub name: String,

    /// Attribute name/value pairs
    pub attrs: Vec<(String, String)>,

    /// Serialized element including its own tags
    pub html: String,

    /// Serialized children
    pub inner_html: String,

    /// Concatenated text of all descendants
    pub text: String,
}

impl Node {
    /// Snapshot a matched element
    pub fn from_element(element: ElementRef<'_>) -> Self {
        let value = element.value();
        Self {
            name: value.name().to_string(),
            attrs: value
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            html: element.html(),
            inner_html: element.inner_html(),
            text: element.text().collect(),
        }
    }

    /// Concatenated text of all descendants, whitespace kept as in the source
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text with runs of whitespace collapsed to single spaces
    pub fn normalized_text(&self) -> String {
        self.text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Value of an attribute, if present
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// First descendant matching `selector`
    pub fn select_one(&self, selector: &str) -> Result<Option<Node>> {
        let selector = html::compile(selector)?;
        let parsed = self.reparse();
        Ok(self
            .root(&parsed)
            .select(&selector)
            .next()
            .map(Node::from_element))
    }

    /// All descendants matching `selector`, in document order
    pub fn select_all(&self, selector: &str) -> Result<Vec<Node>> {
        let selector = html::compile(selector)?;
        let parsed = self.reparse();
        Ok(self
            .root(&parsed)
            .select(&selector)
            .map(Node::from_element)
            .collect())
    }

    /// Parse the snapshot again inside the context its tag needs to survive.
    ///
    /// Document-level elements are dropped by fragment parsing, and table
    /// parts lose their tags outside a table.
    fn reparse(&self) -> Html {
        match self.name.as_str() {
            "html" | "head" | "body" => Html::parse_document(&self.html),
            "caption" | "colgroup" | "thead" | "tbody" | "tfoot" => {
                Html::parse_fragment(&format!("<table>{}</table>", self.html))
            }
            "col" => Html::parse_fragment(&format!(
                "<table><colgroup>{}</colgroup></table>",
                self.html
            )),
            "tr" => Html::parse_fragment(&format!("<table><tbody>{}</tbody></table>", self.html)),
            "td" | "th" => Html::parse_fragment(&format!(
                "<table><tbody><tr>{}</tr></tbody></table>",
                self.html
            )),
            _ => Html::parse_fragment(&self.html),
        }
    }

    // The snapshot is the outermost element with its tag name; wrappers added
    // by `reparse` have different names. If parsing dropped it anyway, search
    // the whole parsed tree.
    fn root<'a>(&self, parsed: &'a Html) -> ElementRef<'a> {
        let top = parsed.root_element();
        top.descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == self.name)
            .unwrap_or(top)
    }
}
