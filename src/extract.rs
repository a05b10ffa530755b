use crate::config::PageLocators;
use crate::document::HostDocument;
use crate::utils::normalize_whitespace;
use serde::{Deserialize, Serialize};

/// The (title, year) pair a film page is about.
///
/// Both fields are non-empty whenever a value exists; there is no partially
/// extracted identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub title: String,
    pub year: String,
}

/// Reads the page's displayed title and release year.
///
/// The title has all whitespace runs collapsed; the year is only trimmed.
/// Returns `None` if either is missing or blank.
pub fn extract_identity<D: HostDocument + ?Sized>(
    doc: &D,
    locators: &PageLocators,
) -> Option<Identity> {
    let title = doc
        .find_text(&locators.title)
        .map(|t| normalize_whitespace(&t))
        .filter(|t| !t.is_empty());
    let year = doc
        .find_text(&locators.year)
        .map(|y| y.trim().to_string())
        .filter(|y| !y.is_empty());

    match (title, year) {
        (Some(title), Some(year)) => Some(Identity { title, year }),
        (title, year) => {
            ::log::debug!(
                "No identity on page (title found: {}, year found: {})",
                title.is_some(),
                year.is_some()
            );
            None
        }
    }
}
