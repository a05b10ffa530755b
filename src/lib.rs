//! Outbound search links for film pages.
//!
//! Reads a film's displayed title and release year from its page, builds a
//! fixed set of search-engine links from them, and attaches those links to the
//! page as a panel whose icons fall back to a glyph when they fail to load.

pub mod config;
pub mod document;
pub mod engines;
pub mod error;
pub mod extract;
pub mod filter;
pub mod icons;
pub mod links;
pub mod render;
pub mod sources;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::LbppConfig;
pub use document::{HostDocument, HtmlDocument, Locator};
pub use error::{Error, Result};
pub use extract::{Identity, extract_identity};
pub use icons::{DeferredLoader, HttpIconLoader, IconLoader};
pub use links::{LinkDescriptor, build_links};
pub use render::{IconState, Panel, RenderOptions, render};

use config::PageLocators;
use filter::ActivationFilter;
use std::path::Path;

/// Runs the extract, build and render pipeline against a host document
#[derive(Debug)]
pub struct Augmenter {
    locators: PageLocators,
    activation: ActivationFilter,
    options: RenderOptions,
}

impl Augmenter {
    /// Create an augmenter from a configuration, validating its selectors and
    /// activation patterns
    pub fn new(config: &LbppConfig) -> Result<Self> {
        Ok(Self {
            locators: config.selectors.locators()?,
            activation: ActivationFilter::new(config.activation.clone())?,
            options: RenderOptions::from_config(config),
        })
    }

    /// Load configuration from a file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(&LbppConfig::from_file(path)?)
    }

    /// Whether the page at `url` is one the panel belongs on
    pub fn should_activate(&self, url: &str) -> bool {
        self.activation.matches_str(url)
    }

    /// The links the panel would show for this page, if it has an identity
    pub fn links_for<D: HostDocument + ?Sized>(&self, doc: &D) -> Option<Vec<LinkDescriptor>> {
        let identity = extract_identity(doc, &self.locators)?;
        ::log::info!("Found \"{}\" ({})", identity.title, identity.year);
        Some(build_links(&identity))
    }

    /// Augments the page. Returns `None`, leaving the document untouched, when
    /// the page has no identity or no place to put the panel.
    pub fn augment<D, L>(&self, doc: &mut D, loader: &L) -> Option<Panel>
    where
        D: HostDocument + ?Sized,
        L: IconLoader + ?Sized,
    {
        let links = self.links_for(&*doc)?;
        render(doc, &self.locators.details, &links, loader, &self.options)
    }
}
