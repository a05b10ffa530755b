pub mod html;
pub mod node;

pub use html::HtmlDocument;
pub use node::{ElementNode, PanelNode};

use crate::error::{Error, Result};
use scraper::Selector;
use std::fmt;

/// A parsed CSS selector naming a location in the host document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    css: String,
    selector: Selector,
}

impl Locator {
    /// Parses `css` as a selector
    pub fn new(css: &str) -> Result<Self> {
        let selector = Selector::parse(css).map_err(|e| Error::Selector {
            selector: css.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            css: css.to_string(),
            selector,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.css
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css)
    }
}

/// Refers to a subtree this crate appended to a host document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub(crate) usize);

/// Narrow capability interface over the page being augmented.
///
/// The pipeline only ever reads text at a locator and appends new subtrees
/// under an anchor; it never touches pre-existing content. Any structure that
/// can answer these calls (a parsed HTML document, a live browser session, a
/// test fake) can host the panel.
pub trait HostDocument {
    /// Raw text content of the first element matching `locator`
    fn find_text(&self, locator: &Locator) -> Option<String>;

    /// Whether `locator` resolves to at least one element
    fn contains(&self, locator: &Locator) -> bool;

    /// Appends `node` as the last child of the first match of `anchor`.
    /// Returns `None` without mutating anything when the anchor is missing.
    fn append_child(&mut self, anchor: &Locator, node: PanelNode) -> Option<NodeHandle>;

    /// Mutable access to a subtree previously returned by [`append_child`]
    ///
    /// [`append_child`]: HostDocument::append_child
    fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut PanelNode>;

    /// Adds a page-scoped style block unless one with `id` already exists
    fn inject_style(&mut self, id: &str, css: &str);
}
