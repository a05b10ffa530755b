
use crate::document::{HostDocument, Locator, NodeHandle, PanelNode};
use crate::icons::{IconLoader, IconOutcome, IconSignal};
use std::cell::RefCell;
use std::collections::HashMap;
use url::Url;

/// A film page shaped like the real thing
pub(crate) fn film_page(title: &str, year: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>Film</title></head>\
         <body class=\"film\"><div id=\"content\">\
         <section class=\"film-header-group\">\
         <h1 class=\"headline-1 filmtitle\"><span class=\"name js-widont prettify\">{title}</span></h1>\
         <div class=\"releaseyear\"><a href=\"/films/year/{year}/\">{year}</a></div>\
         </section>\
         <div class=\"details\"><p class=\"credits\">Directed by <a href=\"/director/x/\">Someone</a></p></div>\
         </div></body></html>"
    )
}

/// Holds every icon signal until the test decides how each request ends
#[derive(Default)]
pub(crate) struct ManualLoader {
    requests: RefCell<Vec<(Url, Option<IconSignal>)>>,
}

impl ManualLoader {
    pub(crate) fn requested(&self) -> Vec<Url> {
        self.requests.borrow().iter().map(|(u, _)| u.clone()).collect()
    }

    /// Resolves the `index`-th request
    pub(crate) fn fire(&self, index: usize, outcome: IconOutcome) {
        let signal = self.requests.borrow_mut()[index].1.take().unwrap();
        signal.report(outcome);
    }
}

impl IconLoader for ManualLoader {
    fn load(&self, src: &Url, signal: IconSignal) {
        self.requests.borrow_mut().push((src.clone(), Some(signal)));
    }
}

/// Minimal host with no markup at all: text by locator, appended nodes in a list
#[derive(Default)]
pub(crate) struct FakeDocument {
    pub(crate) texts: HashMap<String, String>,
    pub(crate) anchors: Vec<String>,
    pub(crate) appended: Vec<(String, PanelNode)>,
    pub(crate) styles: Vec<String>,
}

impl HostDocument for FakeDocument {
    fn find_text(&self, locator: &Locator) -> Option<String> {
        self.texts.get(locator.as_str()).cloned()
    }

    fn contains(&self, locator: &Locator) -> bool {
        self.texts.contains_key(locator.as_str())
            || self.anchors.iter().any(|a| a == locator.as_str())
    }

    fn append_child(&mut self, anchor: &Locator, node: PanelNode) -> Option<NodeHandle> {
        if !self.contains(anchor) {
            return None;
        }
        self.appended.push((anchor.to_string(), node));
        Some(NodeHandle(self.appended.len() - 1))
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut PanelNode> {
        self.appended.get_mut(handle.0).map(|(_, n)| n)
    }

    fn inject_style(&mut self, id: &str, _css: &str) {
        if !self.styles.iter().any(|s| s == id) {
            self.styles.push(id.to_string());
        }
    }
}
