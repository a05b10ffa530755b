use crate::error::Result;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use url::Url;

/// How an icon request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconOutcome {
    Loaded,
    Failed,
}

/// One-shot completion handle for a single icon request.
///
/// Reporting consumes the signal, so an icon can resolve at most once.
/// Dropping it without reporting leaves the icon pending for good.
#[derive(Debug)]
pub struct IconSignal {
    slot: usize,
    tx: mpsc::UnboundedSender<(usize, IconOutcome)>,
}

impl IconSignal {
    pub(crate) fn new(slot: usize, tx: mpsc::UnboundedSender<(usize, IconOutcome)>) -> Self {
        Self { slot, tx }
    }

    pub fn loaded(self) {
        self.report(IconOutcome::Loaded);
    }

    pub fn failed(self) {
        self.report(IconOutcome::Failed);
    }

    pub fn report(self, outcome: IconOutcome) {
        // A closed receiver means the panel is gone; nothing left to update.
        if self.tx.send((self.slot, outcome)).is_err() {
            ::log::trace!("Icon outcome for slot {} arrived after teardown", self.slot);
        }
    }
}

/// Issues icon image requests on behalf of rendered links
pub trait IconLoader {
    /// Starts loading `src`; the outcome is reported through `signal`.
    /// Must not block waiting for the load.
    fn load(&self, src: &Url, signal: IconSignal);
}

/// Issues no requests. Icons stay pending and are left to whatever
/// eventually displays the output (the image's own error handler takes over
/// there).
#[derive(Debug, Default, Clone, Copy)]
pub struct DeferredLoader;

impl IconLoader for DeferredLoader {
    fn load(&self, src: &Url, signal: IconSignal) {
        ::log::trace!("Deferring icon load for {}", src);
        drop(signal);
    }
}

/// Loads icons over HTTP on background tokio tasks.
///
/// A successful status with a non-empty body counts as loaded; transport
/// errors and error statuses count as failed. There is no retry and no
/// timeout: a request that never answers leaves its icon pending.
#[derive(Debug, Clone)]
pub struct HttpIconLoader {
    client: reqwest::Client,
    runtime: Handle,
}

impl HttpIconLoader {
    /// Create a loader bound to the current tokio runtime
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lbpp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(client)
    }

    /// Create a loader using `client`, bound to the current tokio runtime.
    /// Fails outside of a runtime.
    pub fn with_client(client: reqwest::Client) -> Result<Self> {
        let runtime = Handle::try_current()?;
        Ok(Self { client, runtime })
    }

    async fn fetch(client: &reqwest::Client, src: &Url) -> IconOutcome {
        let response = match client.get(src.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                ::log::debug!("Icon request to {} failed: {}", src, e);
                return IconOutcome::Failed;
            }
        };

        if !response.status().is_success() {
            ::log::debug!("Icon {} answered {}", src, response.status());
            return IconOutcome::Failed;
        }

        match response.bytes().await {
            Ok(body) if !body.is_empty() => IconOutcome::Loaded,
            Ok(_) => {
                ::log::debug!("Icon {} returned an empty body", src);
                IconOutcome::Failed
            }
            Err(e) => {
                ::log::debug!("Icon body from {} failed: {}", src, e);
                IconOutcome::Failed
            }
        }
    }
}

impl IconLoader for HttpIconLoader {
    fn load(&self, src: &Url, signal: IconSignal) {
        let client = self.client.clone();
        let src = src.clone();
        self.runtime.spawn(async move {
            let outcome = Self::fetch(&client, &src).await;
            signal.report(outcome);
        });
    }
}

/// Derives the auto-icon URL for `target_url` from `endpoint`, a template
/// containing `{domain}`. Returns `None` when the target has no host or the
/// result is not a valid URL.
pub fn auto_icon_url(endpoint: &str, target_url: &str) -> Option<Url> {
    let target = Url::parse(target_url).ok()?;
    let host = target.host_str().filter(|h| !h.is_empty())?;
    Url::parse(&endpoint.replace("{domain}", host)).ok()
}

/// The icon a link should request: the explicit one if given, else the
/// auto-derived one
pub fn icon_source(endpoint: &str, target_url: &str, explicit: Option<&str>) -> Option<Url> {
    match explicit {
        Some(explicit) => match Url::parse(explicit) {
            Ok(url) => Some(url),
            Err(e) => {
                ::log::debug!("Ignoring unparseable icon {}: {}", explicit, e);
                None
            }
        },
        None => auto_icon_url(endpoint, target_url),
    }
}
