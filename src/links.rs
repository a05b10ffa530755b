use crate::engines::{ENGINES, Engine, Param};
use crate::extract::Identity;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Everything but the characters a URI component may carry unescaped
/// (`A-Z a-z 0-9 - _ . ! ~ * ' ( )`).
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// One outbound search link, ready to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDescriptor {
    pub label: String,
    /// Fully formed, already percent-encoded
    pub target_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_icon_url: Option<String>,
}

/// Percent-encodes a query value as a URI component
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Builds the URL `engine` expects for `identity`
pub fn engine_url(engine: &Engine, identity: &Identity) -> String {
    let query = encode_component(&engine.form.format(identity));

    let mut url = String::from(engine.endpoint);
    for (i, param) in engine.params.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        match param {
            Param::Query(name) => {
                url.push_str(name);
                url.push('=');
                url.push_str(&query);
            }
            Param::Static(name, value) => {
                url.push_str(name);
                url.push('=');
                url.push_str(value);
            }
        }
    }
    url
}

/// Builds one descriptor per engine, in panel order
pub fn build_links(identity: &Identity) -> Vec<LinkDescriptor> {
    ENGINES
        .iter()
        .map(|engine| LinkDescriptor {
            label: engine.label.to_string(),
            target_url: engine_url(engine, identity),
            explicit_icon_url: engine.icon.map(str::to_string),
        })
        .collect()
}
