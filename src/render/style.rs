use crate::document::HostDocument;

pub const STYLE_ID: &str = "lbpp-style";

pub const PANEL_CSS: &str = "\
.lbpp-panel{margin-top:10px}\
.lbpp-links{display:flex;flex-wrap:wrap;gap:6px 10px;align-items:center}\
.lbpp-link{display:inline-flex;align-items:center;gap:4px;white-space:nowrap;text-decoration:none}\
.lbpp-icon{width:16px;height:16px;flex:none}\
.lbpp-glyph{display:inline-block;width:16px;text-align:center;flex:none}";

/// Adds the panel stylesheet to the page once
pub fn ensure_injected<D: HostDocument + ?Sized>(doc: &mut D) {
    doc.inject_style(STYLE_ID, PANEL_CSS);
}
