//! Markdown -> dictionary markup for definition text.
//!
//! Pass order:
//! 1. tokenize into plain runs and `[label](#id)` links; a link whose id is in
//!    the table becomes an internal `bword://` anchor, anything else stays as
//!    its literal markdown and joins the plain run
//! 2. `_emphasis_` is rewritten in plain runs only, so the injected anchors
//!    are never rescanned

use crate::links::LinkTable;
use crate::syntax::{Syntax, Token};

pub fn convert_definition(syntax: &Syntax, links: &LinkTable, info: &str) -> String {
    let mut out = String::with_capacity(info.len() + info.len() / 4);
    let mut plain = String::new();

    for token in syntax.tokenize(info) {
        match token {
            Token::Text(text) => plain.push_str(text),
            Token::Link { id, raw, .. } => match links.target(id) {
                Some(name) => {
                    emphasize(syntax, &plain, &mut out);
                    plain.clear();
                    push_link(&mut out, name);
                }
                None => {
                    log::debug!("unresolved link #{id}");
                    plain.push_str(raw);
                }
            },
        }
    }
    emphasize(syntax, &plain, &mut out);
    out
}

/// Internal hyperlink to `name`. sdcv and KOReader want the target verbatim,
/// neither html nor url escaped.
pub(crate) fn push_link(out: &mut String, name: &str) {
    out.push_str(r#"<a class="dict-internal-link" href="bword://"#);
    out.push_str(name);
    out.push_str(r#"">"#);
    out.push_str(name);
    out.push_str("</a>");
}

fn emphasize(syntax: &Syntax, text: &str, out: &mut String) {
    let replaced = syntax
        .emphasis
        .replace_all(text, r#"<em class="dict-emphasis">$1</em>"#);
    out.push_str(&replaced);
}
