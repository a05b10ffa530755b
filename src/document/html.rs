use crate::document::{ElementNode, HostDocument, Locator, NodeHandle, PanelNode};
use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

/// A subtree waiting to be emitted under an element of the parsed page
#[derive(Debug)]
struct Appended {
    anchor: NodeId,
    node: PanelNode,
}

/// Host document backed by a parsed HTML page.
///
/// The parsed tree is never mutated. Appended subtrees and injected style
/// blocks are kept alongside it and grafted onto a copy of the tree when the
/// page is serialized, so everything that was on the page is emitted as it
/// was parsed.
#[derive(Debug)]
pub struct HtmlDocument {
    doc: Html,
    appended: Vec<Appended>,
    styles: Vec<(String, String)>,
}

impl HtmlDocument {
    /// Parses a full HTML document
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Html::parse_document(html),
            appended: Vec::new(),
            styles: Vec::new(),
        }
    }

    /// Subtrees appended so far, in insertion order
    pub fn appended(&self) -> impl Iterator<Item = &PanelNode> {
        self.appended.iter().map(|a| &a.node)
    }

    /// Ids of the style blocks injected so far
    pub fn style_ids(&self) -> impl Iterator<Item = &str> {
        self.styles.iter().map(|(id, _)| id.as_str())
    }

    fn first_match(&self, locator: &Locator) -> Option<ElementRef<'_>> {
        self.doc.select(locator.selector()).next()
    }

    /// The parsed page with every appended subtree and style block in place
    pub fn augmented(&self) -> Html {
        let mut augmented = self.doc.clone();

        if !self.styles.is_empty() {
            let head = Selector::parse("head")
                .ok()
                .and_then(|s| self.doc.select(&s).next())
                .map(|e| e.id());
            if let Some(mut head) = head.and_then(|id| augmented.tree.get_mut(id)) {
                for (id, css) in &self.styles {
                    let style: PanelNode = ElementNode::new("style")
                        .attr("id", id)
                        .child(PanelNode::text(css))
                        .into();
                    style.append_to(&mut head);
                }
            }
        }

        for appended in &self.appended {
            // Node ids carry over to the clone
            if let Some(mut anchor) = augmented.tree.get_mut(appended.anchor) {
                appended.node.append_to(&mut anchor);
            }
        }

        augmented
    }

    /// Serializes the page with every appended subtree and style block in place
    pub fn to_html(&self) -> String {
        self.augmented().html()
    }
}

impl HostDocument for HtmlDocument {
    fn find_text(&self, locator: &Locator) -> Option<String> {
        self.first_match(locator)
            .map(|el| el.text().collect::<String>())
    }

    fn contains(&self, locator: &Locator) -> bool {
        self.first_match(locator).is_some()
    }

    fn append_child(&mut self, anchor: &Locator, node: PanelNode) -> Option<NodeHandle> {
        let anchor = self.first_match(anchor)?.id();
        self.appended.push(Appended { anchor, node });
        Some(NodeHandle(self.appended.len() - 1))
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut PanelNode> {
        self.appended.get_mut(handle.0).map(|a| &mut a.node)
    }

    fn inject_style(&mut self, id: &str, css: &str) {
        if self.styles.iter().any(|(existing, _)| existing == id) {
            return;
        }
        self.styles.push((id.to_string(), css.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<!DOCTYPE html><html><head><title>Film</title></head><body>\
        <h1 class=\"headline-1 filmtitle\"><span class=\"name\">  Se7en </span></h1>\
        <div class=\"details\"><p>Directed by <b>David Fincher</b> &amp; co</p></div>\
        <script>if (a < b && c) {}</script>\
        </body></html>";

    fn locator(css: &str) -> Locator {
        Locator::new(css).unwrap()
    }

    #[test]
    fn test_find_text_and_contains() {
        let doc = HtmlDocument::parse(PAGE);
        assert_eq!(
            doc.find_text(&locator("h1 .name")).as_deref(),
            Some("  Se7en ")
        );
        assert_eq!(
            doc.find_text(&locator("div.details p")).as_deref(),
            Some("Directed by David Fincher & co")
        );
        assert!(doc.contains(&locator("div.details")));
        assert!(!doc.contains(&locator("div.releaseyear")));
        assert_eq!(doc.find_text(&locator("div.releaseyear a")), None);
    }

    #[test]
    fn test_append_missing_anchor_is_noop() {
        let mut doc = HtmlDocument::parse(PAGE);
        let before = doc.to_html();
        let handle = doc.append_child(
            &locator("section.missing"),
            ElementNode::new("div").into(),
        );
        assert!(handle.is_none());
        assert_eq!(doc.appended().count(), 0);
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn test_serialize_with_insertions() {
        let mut doc = HtmlDocument::parse(PAGE);
        let handle = doc
            .append_child(
                &locator("div.details"),
                ElementNode::new("div")
                    .attr("class", "panel")
                    .child(PanelNode::text("links"))
                    .into(),
            )
            .unwrap();
        doc.inject_style("panel-style", ".panel{margin:0}");
        doc.inject_style("panel-style", ".panel{margin:0}");

        let html = doc.to_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(
            "<p>Directed by <b>David Fincher</b> &amp; co</p><div class=\"panel\">links</div></div>"
        ));
        assert_eq!(html.matches("<style id=\"panel-style\">").count(), 1);
        assert!(html.contains(".panel{margin:0}</style></head>"));
        // Script bodies are raw text
        assert!(html.contains("if (a < b && c) {}"));

        // Appended subtrees stay editable after insertion
        let node = doc.node_mut(handle).unwrap().as_element_mut().unwrap();
        node.children = vec![PanelNode::text("changed")];
        assert!(doc.to_html().contains("<div class=\"panel\">changed</div>"));
    }

    #[test]
    fn test_existing_markup_round_trips() {
        let page = "<!DOCTYPE html><html><head></head><body>\
            <svg xmlns:xlink=\"http://www.w3.org/1999/xlink\"><use xlink:href=\"#i\"></use></svg>\
            <div class=\"details\"><p>a&nbsp;b</p></div></body></html>";
        let mut doc = HtmlDocument::parse(page);
        let untouched = doc.to_html();
        assert_eq!(untouched, Html::parse_document(page).html());

        doc.append_child(&locator("div.details"), PanelNode::text("links"));
        let html = doc.to_html();

        assert!(html.contains("<use xlink:href=\"#i\"></use>"));
        assert!(html.contains("xmlns:xlink=\"http://www.w3.org/1999/xlink\""));
        assert!(html.contains("<p>a&nbsp;b</p>links</div>"));
    }
}
