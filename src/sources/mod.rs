pub mod web;

use crate::error::Result;
use std::path::PathBuf;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Where the film page comes from
#[derive(Debug, Clone)]
pub enum PageSource {
    /// Live page, loaded through a WebDriver session
    Web(String),
    /// Saved HTML file
    File(PathBuf),
    /// HTML on standard input
    Stdin,
}

/// A page's HTML and the URL it was served from, if known
#[derive(Debug, Clone)]
pub struct LoadedPage {
    pub url: Option<String>,
    pub html: String,
}

impl PageSource {
    /// The page URL known before loading, used for activation checks
    pub fn url(&self) -> Option<&str> {
        match self {
            PageSource::Web(url) => Some(url),
            PageSource::File(_) | PageSource::Stdin => None,
        }
    }

    /// Reads the page's HTML
    pub async fn load(&self, webdriver_url: &str) -> Result<LoadedPage> {
        match self {
            PageSource::Web(url) => web::fetch(url, webdriver_url).await,
            PageSource::File(path) => {
                ::log::debug!("Reading page from {}", path.display());
                let html = tokio::fs::read_to_string(path).await?;
                Ok(LoadedPage { url: None, html })
            }
            PageSource::Stdin => {
                ::log::debug!("Reading page from stdin");
                read_page(tokio::io::stdin()).await
            }
        }
    }
}

/// Reads a whole page from `reader`
async fn read_page<R: AsyncRead + Unpin>(mut reader: R) -> Result<LoadedPage> {
    let mut html = String::new();
    reader.read_to_string(&mut html).await?;
    Ok(LoadedPage { url: None, html })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_source() {
        let path = std::env::temp_dir().join(format!("lbpp-source-{}.html", std::process::id()));
        std::fs::write(&path, "<html><body><div class=\"details\"></div></body></html>").unwrap();

        let source = PageSource::File(path.clone());
        assert!(source.url().is_none());
        let page = source.load("http://localhost:4444").await.unwrap();
        assert!(page.html.contains("details"));
        assert!(page.url.is_none());

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_read_page_from_stream() {
        let page = read_page(&b"<html><body>Se7en</body></html>"[..]).await.unwrap();
        assert_eq!(page.html, "<html><body>Se7en</body></html>");
        assert!(page.url.is_none());

        // Not UTF-8
        assert!(read_page(&[0xffu8, 0xfe][..]).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let source = PageSource::File(PathBuf::from("/nonexistent/lbpp/page.html"));
        assert!(source.load("http://localhost:4444").await.is_err());
    }
}
