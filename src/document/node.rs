use ego_tree::NodeMut;
use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use scraper::node::{Element, Text};
use scraper::{Html, Node};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// A node in a subtree built by this crate
#[derive(Debug, Clone, PartialEq)]
pub enum PanelNode {
    Element(ElementNode),
    Text(String),
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<PanelNode>,
}

impl ElementNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    /// Builder-style child append
    pub fn child(mut self, node: PanelNode) -> Self {
        self.children.push(node);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    /// The `index`-th child, if it is an element
    pub fn child_element_mut(&mut self, index: usize) -> Option<&mut ElementNode> {
        match self.children.get_mut(index) {
            Some(PanelNode::Element(el)) => Some(el),
            _ => None,
        }
    }

    /// Direct element children
    pub fn element_children(&self) -> impl Iterator<Item = &ElementNode> {
        self.children.iter().filter_map(|c| match c {
            PanelNode::Element(el) => Some(el),
            PanelNode::Text(_) => None,
        })
    }

    /// All descendant elements with `tag`, depth first
    pub fn find_all<'a>(&'a self, tag: &str, out: &mut Vec<&'a ElementNode>) {
        for child in self.element_children() {
            if child.tag == tag {
                out.push(child);
            }
            child.find_all(tag, out);
        }
    }

    /// Concatenated descendant text
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                PanelNode::Text(t) => out.push_str(t),
                PanelNode::Element(el) => out.push_str(&el.text()),
            }
        }
        out
    }

    /// The scraper element for this node, without its children
    fn to_scraper(&self) -> Element {
        let attrs = self
            .attrs
            .iter()
            .map(|(name, value)| Attribute {
                name: QualName::new(None, Namespace::from(""), LocalName::from(name.as_str())),
                value: StrTendril::from(value.as_str()),
            })
            .collect();
        Element::new(
            QualName::new(
                None,
                Namespace::from(HTML_NAMESPACE),
                LocalName::from(self.tag.as_str()),
            ),
            attrs,
        )
    }
}

impl PanelNode {
    pub fn text(text: &str) -> Self {
        PanelNode::Text(text.to_string())
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            PanelNode::Element(el) => Some(el),
            PanelNode::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementNode> {
        match self {
            PanelNode::Element(el) => Some(el),
            PanelNode::Text(_) => None,
        }
    }

    /// Appends the subtree as the last child of `parent` in a scraper tree
    pub fn append_to(&self, parent: &mut NodeMut<'_, Node>) {
        match self {
            PanelNode::Text(text) => {
                parent.append(Node::Text(Text {
                    text: StrTendril::from(text.as_str()),
                }));
            }
            PanelNode::Element(el) => {
                let mut node = parent.append(Node::Element(el.to_scraper()));
                for child in &el.children {
                    child.append_to(&mut node);
                }
            }
        }
    }

    /// Serializes the subtree as HTML
    pub fn to_html(&self) -> String {
        let mut fragment = Html::new_fragment();
        self.append_to(&mut fragment.tree.root_mut());
        fragment.html()
    }
}

impl From<ElementNode> for PanelNode {
    fn from(el: ElementNode) -> Self {
        PanelNode::Element(el)
    }
}
