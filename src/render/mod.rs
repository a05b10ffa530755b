pub mod style;

#[cfg(test)]
mod tests;

use crate::config::LbppConfig;
use crate::document::{ElementNode, HostDocument, Locator, NodeHandle, PanelNode};
use crate::icons::{IconLoader, IconOutcome, IconSignal, icon_source};
use crate::links::LinkDescriptor;
use std::time::Duration;
use tokio::sync::mpsc;
use url::Url;

/// Replaces a failed image with the glyph and label, in the browser that
/// ends up displaying the output. Reads both from the link's data attributes.
const ONERROR_SWAP: &str = "var a=this.parentNode,g=document.createElement('span');\
g.className='lbpp-glyph';g.setAttribute('aria-hidden','true');\
g.textContent=a.dataset.glyph;a.replaceChildren(g,a.dataset.label);";

/// Presentation settings for the panel
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Auto-icon endpoint template containing `{domain}`
    pub icon_endpoint: String,
    pub fallback_glyph: String,
}

impl RenderOptions {
    pub fn from_config(config: &LbppConfig) -> Self {
        Self {
            icon_endpoint: config.icon_endpoint.clone(),
            fallback_glyph: config.fallback_glyph.clone(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&LbppConfig::default())
    }
}

/// Where a link's icon is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconState {
    /// Image rendered, load outcome not known yet
    Pending { src: Url },
    /// Image loaded; the link shows icon and label
    Loaded { src: Url },
    /// Image failed; the link shows glyph and label
    Failed,
    /// No icon source could be derived; glyph shown without any request
    Unavailable,
}

impl IconState {
    pub fn is_pending(&self) -> bool {
        matches!(self, IconState::Pending { .. })
    }
}

/// A rendered link and the state of its icon
#[derive(Debug, Clone)]
pub struct LinkSlot {
    pub label: String,
    pub state: IconState,
}

/// The link panel after it has been attached to a page.
///
/// Icon outcomes arrive asynchronously, independently per link and in no
/// particular order. They are queued until the owner applies them with
/// [`Panel::drain_ready`] or [`Panel::settle`].
#[derive(Debug)]
pub struct Panel {
    handle: NodeHandle,
    slots: Vec<LinkSlot>,
    glyph: String,
    events: mpsc::UnboundedReceiver<(usize, IconOutcome)>,
}

/// Attaches a link panel for `links` under `anchor`.
///
/// Returns `None` without touching the document when the anchor cannot be
/// found. Otherwise the stylesheet is injected, the panel appended, and one
/// icon request issued per link that has an icon source.
pub fn render<D, L>(
    doc: &mut D,
    anchor: &Locator,
    links: &[LinkDescriptor],
    loader: &L,
    options: &RenderOptions,
) -> Option<Panel>
where
    D: HostDocument + ?Sized,
    L: IconLoader + ?Sized,
{
    if !doc.contains(anchor) {
        ::log::debug!("Anchor {} not found, skipping panel", anchor);
        return None;
    }

    style::ensure_injected(doc);

    let mut slots = Vec::with_capacity(links.len());
    let mut flow = ElementNode::new("div").attr("class", "lbpp-links");

    for link in links {
        let src = icon_source(
            &options.icon_endpoint,
            &link.target_url,
            link.explicit_icon_url.as_deref(),
        );

        let element = link_element(link, &options.fallback_glyph);
        let element = match &src {
            Some(src) => with_icon(element, src, &link.label),
            None => with_glyph(element, &options.fallback_glyph, &link.label),
        };
        flow = flow.child(element.into());

        slots.push(LinkSlot {
            label: link.label.clone(),
            state: match src {
                Some(src) => IconState::Pending { src },
                None => IconState::Unavailable,
            },
        });
    }

    let wrapper = ElementNode::new("div")
        .attr("class", "lbpp-panel")
        .child(flow.into());

    let handle = doc.append_child(anchor, wrapper.into())?;
    ::log::debug!("Attached panel with {} links under {}", slots.len(), anchor);

    // Requests go out only once the panel is on the page
    let (tx, events) = mpsc::unbounded_channel();
    for (i, slot) in slots.iter().enumerate() {
        if let IconState::Pending { src } = &slot.state {
            loader.load(src, IconSignal::new(i, tx.clone()));
        }
    }
    drop(tx);

    Some(Panel {
        handle,
        slots,
        glyph: options.fallback_glyph.clone(),
        events,
    })
}

fn link_element(link: &LinkDescriptor, glyph: &str) -> ElementNode {
    ElementNode::new("a")
        .attr("class", "lbpp-link")
        .attr("href", &link.target_url)
        .attr("target", "_blank")
        .attr("rel", "noopener noreferrer")
        .attr("title", &link.label)
        .attr("data-label", &link.label)
        .attr("data-glyph", glyph)
}

fn with_icon(element: ElementNode, src: &Url, label: &str) -> ElementNode {
    element
        .child(
            ElementNode::new("img")
                .attr("class", "lbpp-icon")
                .attr("src", src.as_str())
                .attr("alt", "")
                .attr("width", "16")
                .attr("height", "16")
                .attr("onerror", ONERROR_SWAP)
                .into(),
        )
        .child(PanelNode::text(label))
}

fn with_glyph(element: ElementNode, glyph: &str, label: &str) -> ElementNode {
    element
        .child(glyph_node(glyph))
        .child(PanelNode::text(label))
}

fn glyph_node(glyph: &str) -> PanelNode {
    ElementNode::new("span")
        .attr("class", "lbpp-glyph")
        .attr("aria-hidden", "true")
        .child(PanelNode::text(glyph))
        .into()
}

impl Panel {
    /// Handle of the panel's wrapper element in the host document
    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    pub fn slots(&self) -> &[LinkSlot] {
        &self.slots
    }

    pub fn state(&self, slot: usize) -> Option<&IconState> {
        self.slots.get(slot).map(|s| &s.state)
    }

    /// True once no link is waiting on its icon
    pub fn is_settled(&self) -> bool {
        !self.slots.iter().any(|s| s.state.is_pending())
    }

    /// Applies one icon outcome. Only pending icons change; anything else is
    /// ignored. Returns whether the state changed.
    pub fn apply<D: HostDocument + ?Sized>(
        &mut self,
        doc: &mut D,
        slot: usize,
        outcome: IconOutcome,
    ) -> bool {
        let Some(link) = self.slots.get_mut(slot) else {
            return false;
        };
        let IconState::Pending { src } = &link.state else {
            return false;
        };

        match outcome {
            IconOutcome::Loaded => {
                link.state = IconState::Loaded { src: src.clone() };
            }
            IconOutcome::Failed => {
                ::log::debug!("Icon for {} failed, showing glyph", link.label);
                link.state = IconState::Failed;

                let element = doc
                    .node_mut(self.handle)
                    .and_then(PanelNode::as_element_mut)
                    .and_then(|wrapper| wrapper.child_element_mut(0))
                    .and_then(|flow| flow.child_element_mut(slot));
                match element {
                    Some(element) => {
                        element.children = vec![glyph_node(&self.glyph), PanelNode::text(&link.label)];
                    }
                    None => ::log::warn!("Panel element for {} is gone", link.label),
                }
            }
        }
        true
    }

    /// Applies every outcome that has already arrived, without waiting.
    /// Returns how many links changed state.
    pub fn drain_ready<D: HostDocument + ?Sized>(&mut self, doc: &mut D) -> usize {
        let mut changed = 0;
        while let Ok((slot, outcome)) = self.events.try_recv() {
            if self.apply(doc, slot, outcome) {
                changed += 1;
            }
        }
        changed
    }

    /// Waits for icon outcomes and applies them as they arrive.
    ///
    /// Returns when every link is settled or no request can still report.
    /// With `snapshot_after`, stops waiting after that long; links that are
    /// still pending then stay pending, their requests are not cancelled.
    pub async fn settle<D: HostDocument + ?Sized>(
        &mut self,
        doc: &mut D,
        snapshot_after: Option<Duration>,
    ) {
        let wait = async {
            while !self.is_settled() {
                match self.events.recv().await {
                    Some((slot, outcome)) => {
                        self.apply(doc, slot, outcome);
                    }
                    None => break,
                }
            }
        };

        match snapshot_after {
            Some(limit) => {
                if tokio::time::timeout(limit, wait).await.is_err() {
                    ::log::debug!("Taking snapshot with icons still pending");
                }
            }
            None => wait.await,
        }
    }
}
