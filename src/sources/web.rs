use crate::error::{Error, Result};
use crate::sources::LoadedPage;
use fantoccini::{Client, ClientBuilder};
use std::time::Duration;
use tokio::time::timeout;

/// Well-known driver endpoints tried when the configured one is down
const FALLBACK_WEBDRIVER_URLS: &[&str] = &[
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4444", // GeckoDriver / Selenium default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Loads `url` in a WebDriver session and returns the rendered page source.
///
/// Navigation returns once the document has loaded, which is the point where
/// the page structure is stable enough to read.
pub async fn fetch(url: &str, webdriver_url: &str) -> Result<LoadedPage> {
    ::log::info!("Loading {} via WebDriver", url);

    let client = connect(webdriver_url).await?;
    let result = load_page(&client, url).await;

    if let Err(e) = client.close().await {
        ::log::warn!("Failed to close WebDriver session: {}", e);
    }

    result
}

async fn load_page(client: &Client, url: &str) -> Result<LoadedPage> {
    let started = std::time::Instant::now();

    let loaded = timeout(Duration::from_secs(45), async {
        client.goto(url).await?;
        let html = client.source().await?;
        // Redirects (e.g. a slug change) decide which page we actually have
        let final_url = client.current_url().await?;
        Ok::<_, Error>((final_url, html))
    })
    .await;

    let (final_url, html) = match loaded {
        Ok(result) => result?,
        Err(_) => {
            return Err(Error::Session(format!("timed out loading {url}")));
        }
    };

    ::log::debug!(
        "Loaded {} ({} bytes) in {:.2} seconds",
        final_url,
        html.len(),
        started.elapsed().as_secs_f64()
    );

    Ok(LoadedPage {
        url: Some(final_url.to_string()),
        html,
    })
}

/// Connects to the WebDriver instance, falling back to common local ports
async fn connect(webdriver_url: &str) -> Result<Client> {
    let first_error = match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::warn!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
            e.to_string()
        }
    };

    for url in FALLBACK_WEBDRIVER_URLS {
        if *url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(Error::Session(format!(
        "could not connect to {webdriver_url}: {first_error}"
    )))
}
