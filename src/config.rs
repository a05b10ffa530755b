use crate::document::Locator;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Top-level configuration for page augmentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LbppConfig {
    /// Where the identity fields and the insertion point live on the page
    #[serde(default)]
    pub selectors: SelectorConfig,

    /// Which page URLs the augmentation activates on
    #[serde(default)]
    pub activation: ActivationConfig,

    /// Auto-icon endpoint template; `{domain}` is replaced by the target host
    #[serde(default = "default_icon_endpoint")]
    pub icon_endpoint: String,

    /// Shown in place of an icon that failed or could not be requested
    #[serde(default = "default_fallback_glyph")]
    pub fallback_glyph: String,

    /// URL for the WebDriver instance used to load web sources
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
}

/// CSS selectors for the read and write interface into the film page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Title text inside the heading region
    #[serde(default = "default_title_selector")]
    pub title: String,

    /// Release year text inside the metadata region
    #[serde(default = "default_year_selector")]
    pub year: String,

    /// Details region the link panel is appended under
    #[serde(default = "default_details_selector")]
    pub details: String,
}

/// Page URL gate, equivalent to a userscript `@match` rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationConfig {
    /// Host the page must be served from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_domain: Option<String>,

    /// Path prefix of per-title pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_path_prefix: Option<String>,

    /// Regex patterns for page URLs to include
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns for page URLs to exclude (take precedence over includes)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// Compiled form of [`SelectorConfig`]
#[derive(Debug, Clone)]
pub struct PageLocators {
    pub title: Locator,
    pub year: Locator,
    pub details: Locator,
}

fn default_icon_endpoint() -> String {
    "https://www.google.com/s2/favicons?domain={domain}&sz=32".to_string()
}

fn default_fallback_glyph() -> String {
    "\u{1F50D}".to_string()
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_title_selector() -> String {
    "h1.headline-1.filmtitle .name".to_string()
}

fn default_year_selector() -> String {
    "div.releaseyear a".to_string()
}

fn default_details_selector() -> String {
    "div.details".to_string()
}

impl Default for LbppConfig {
    fn default() -> Self {
        Self {
            selectors: SelectorConfig::default(),
            activation: ActivationConfig::default(),
            icon_endpoint: default_icon_endpoint(),
            fallback_glyph: default_fallback_glyph(),
            webdriver_url: default_webdriver_url(),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            title: default_title_selector(),
            year: default_year_selector(),
            details: default_details_selector(),
        }
    }
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            required_domain: Some("letterboxd.com".to_string()),
            required_path_prefix: Some("/film/".to_string()),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl LbppConfig {
    /// Load configuration from a JSON file
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

    /// Apply environment overrides (currently only `WEBDRIVER_URL`)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }
}

impl SelectorConfig {
    /// Validate and compile the configured selectors
    pub fn locators(&self) -> Result<PageLocators> {
        Ok(PageLocators {
            title: Locator::new(&self.title)?,
            year: Locator::new(&self.year)?,
            details: Locator::new(&self.details)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = LbppConfig::from_json("{}").unwrap();
        assert_eq!(config.selectors.title, "h1.headline-1.filmtitle .name");
        assert_eq!(config.selectors.year, "div.releaseyear a");
        assert_eq!(config.selectors.details, "div.details");
        assert_eq!(config.fallback_glyph, "\u{1F50D}");
        assert_eq!(
            config.activation.required_domain.as_deref(),
            Some("letterboxd.com")
        );
        assert!(config.icon_endpoint.contains("{domain}"));
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "selectors": { "details": "section.extras" },
            "fallback_glyph": "*"
        }"#;
        let config = LbppConfig::from_json(json).unwrap();
        assert_eq!(config.selectors.details, "section.extras");
        assert_eq!(config.selectors.year, "div.releaseyear a");
        assert_eq!(config.fallback_glyph, "*");
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        let selectors = SelectorConfig {
            title: "h1[".to_string(),
            ..SelectorConfig::default()
        };
        assert!(selectors.locators().is_err());
        assert!(SelectorConfig::default().locators().is_ok());
    }
}
