use crate::config::ActivationConfig;
use regex::Regex;
use url::Url;

/// Decides whether a page URL is a per-title film page the panel belongs on
#[derive(Debug)]
pub struct ActivationFilter {
    config: ActivationConfig,
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl Default for ActivationFilter {
    fn default() -> Self {
        Self {
            config: ActivationConfig::default(),
            include_regexes: Vec::new(),
            exclude_regexes: Vec::new(),
        }
    }
}

impl ActivationFilter {
    /// Create a new activation filter from configuration
    pub fn new(config: ActivationConfig) -> Result<Self, regex::Error> {
        let include_regexes = config
            .include_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let exclude_regexes = config
            .exclude_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            include_regexes,
            exclude_regexes,
        })
    }

    /// Determine if the augmentation should run on this page
    pub fn matches(&self, url: &Url) -> bool {
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }

        if !self.is_in_domain_scope(url) {
            return false;
        }

        if !self.is_in_path_scope(url) {
            return false;
        }

        let url_str = url.as_str();
        if self.exclude_regexes.iter().any(|r| r.is_match(url_str)) {
            return false;
        }

        self.include_regexes.is_empty() || self.include_regexes.iter().any(|r| r.is_match(url_str))
    }

    /// Parse and check a page URL; unparseable URLs never activate
    pub fn matches_str(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => self.matches(&parsed),
            Err(e) => {
                ::log::debug!("Not activating on unparseable URL {}: {}", url, e);
                false
            }
        }
    }

    fn is_in_domain_scope(&self, url: &Url) -> bool {
        match &self.config.required_domain {
            Some(required) => url.domain() == Some(required.as_str()),
            None => true,
        }
    }

    fn is_in_path_scope(&self, url: &Url) -> bool {
        match &self.config.required_path_prefix {
            // `/film/` alone is the index, not a title page
            Some(prefix) => url.path().starts_with(prefix) && url.path().len() > prefix.len(),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let filter = ActivationFilter::default();

        assert!(filter.matches_str("https://letterboxd.com/film/se7en/"));
        assert!(filter.matches_str("https://letterboxd.com/film/the-matrix/reviews/"));

        // Other sections of the site and other hosts are ignored
        assert!(!filter.matches_str("https://letterboxd.com/films/popular/"));
        assert!(!filter.matches_str("https://letterboxd.com/film/"));
        assert!(!filter.matches_str("https://example.com/film/se7en/"));
        assert!(!filter.matches_str("ftp://letterboxd.com/film/se7en/"));
        assert!(!filter.matches_str("not a url"));
    }

    #[test]
    fn test_regex_patterns() {
        let config = ActivationConfig {
            include_patterns: vec![r"/film/[^/]+/?$".to_string()],
            exclude_patterns: vec![r"/film/draft-".to_string()],
            ..ActivationConfig::default()
        };
        let filter = ActivationFilter::new(config).unwrap();

        assert!(filter.matches_str("https://letterboxd.com/film/se7en/"));
        assert!(!filter.matches_str("https://letterboxd.com/film/se7en/reviews/"));
        assert!(!filter.matches_str("https://letterboxd.com/film/draft-thing/"));
    }

    #[test]
    fn test_unrestricted() {
        let config = ActivationConfig {
            required_domain: None,
            required_path_prefix: None,
            include_patterns: vec![],
            exclude_patterns: vec![],
        };
        let filter = ActivationFilter::new(config).unwrap();
        assert!(filter.matches_str("https://example.com/anything"));
    }

    #[test]
    fn test_invalid_pattern() {
        let config = ActivationConfig {
            include_patterns: vec!["(".to_string()],
            ..ActivationConfig::default()
        };
        assert!(ActivationFilter::new(config).is_err());
    }
}
