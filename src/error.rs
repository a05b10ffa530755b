use thiserror::Error;

/// Errors raised by the ambient plumbing (config, page sources, icon requests).
///
/// The augmentation pipeline itself never fails: a missing identity or anchor
/// degrades to "nothing happens" and is reported as `None`, not as an error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("WebDriver session error: {0}")]
    Session(String),

    #[error("WebDriver command failed: {0}")]
    Command(#[from] fantoccini::error::CmdError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no async runtime to run icon requests on: {0}")]
    Runtime(#[from] tokio::runtime::TryCurrentError),
}

pub type Result<T> = std::result::Result<T, Error>;
