//! HTML sanitization for CMS-authored article bodies.
//!
//! The CMS hands us an arbitrary rich-text fragment that must be treated as
//! adversarial. This module reduces it to a fixed allow-list of tags,
//! attributes, and URI schemes suitable for magazine prose, and nothing else.
//!
//! Disposition policy per tag:
//!
//! | Tag class                                   | Disposition            |
//! |---------------------------------------------|------------------------|
//! | prose tags on the allow-list (see below)    | keep, scrub attributes |
//! | `script style iframe object embed noscript` | remove with content    |
//! | `form input button select textarea`         | remove with content    |
//! | `template svg math`                         | remove with content    |
//! | any other unknown tag                       | unwrap, keep children  |
//! | comments, doctypes, processing instructions | remove                 |
//!
//! Removal-with-content is the safer default for payload-bearing elements
//! (script bodies, form controls, vector markup that can embed script);
//! unknown inline wrappers are unwrapped so authored structure survives.
//!
//! Sanitization is pure, deterministic, and idempotent. Nothing here ever
//! fails: malformed input is repaired by the fragment parser, and disallowed
//! constructs are stripped silently (logged at debug level only).

use std::fmt;

use markup5ever_rcdom::{Handle, NodeData};
use memchr::memchr;
use percent_encoding::percent_decode_str;

use crate::dom;

/// Tags that survive sanitization.
const ALLOWED_TAGS: &[&str] = &[
    "p", "b", "i", "em", "strong", "u", "s", "small", "sub", "sup", "br", "hr",
    "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "a", "img",
    "blockquote", "code", "pre", "figure", "figcaption", "table", "thead",
    "tbody", "tfoot", "tr", "th", "td", "div", "span",
];

/// Tags removed together with their content.
const DROPPED_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "noscript", "form",
    "input", "button", "select", "textarea", "template", "svg", "math",
];

/// Attributes that survive sanitization. Everything else, including every
/// `on*` event handler, is stripped.
const ALLOWED_ATTRS: &[&str] = &[
    "href", "target", "rel", "src", "alt", "title", "width", "height",
    "class", "id",
];

/// URI schemes permitted in `href`/`src`. Explicit allow-list: `data:` and
/// every unknown scheme are rejected, not just `javascript:`.
const ALLOWED_SCHEMES: &[&str] = &[
    "http", "https", "mailto", "tel", "callto", "sms", "cid", "xmpp",
];

/// Attributes whose values are URIs and need scheme validation.
const URI_ATTRS: &[&str] = &["href", "src"];

/// An HTML fragment that has passed through [`sanitize`].
///
/// This is the only value the extractor and the render path accept, so raw
/// CMS content cannot reach either by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized(String);

impl Sanitized {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Wrap markup that is already known to be safe.
    ///
    /// Only the extractor uses this, for markup it re-serialized from an
    /// already sanitized tree.
    pub(crate) fn from_trusted(html: String) -> Self {
        Sanitized(html)
    }
}

impl fmt::Display for Sanitized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sanitize an untrusted HTML fragment.
///
/// Parses permissively, applies the allow-list policy to the resulting tree,
/// and re-serializes. Identical input always yields identical output, and
/// re-sanitizing sanitized output is a no-op.
pub fn sanitize(raw: &str) -> Sanitized {
    let dom = dom::parse_fragment(raw);
    let Some(body) = dom::body(&dom) else {
        return Sanitized(String::new());
    };
    scrub_children(&body);
    Sanitized(dom::serialize_children(&body))
}

enum Disposition {
    Keep,
    Unwrap,
    Drop,
}

fn disposition(node: &Handle) -> Disposition {
    match node.data {
        NodeData::Text { .. } => Disposition::Keep,
        NodeData::Element { ref name, .. } => {
            let local = name.local.as_ref();
            if ALLOWED_TAGS.contains(&local) {
                Disposition::Keep
            } else if DROPPED_TAGS.contains(&local) {
                Disposition::Drop
            } else {
                Disposition::Unwrap
            }
        }
        // Comments, doctypes, and processing instructions carry no prose.
        _ => Disposition::Drop,
    }
}

/// Rebuild a node's child list according to the policy, recursing first so
/// unwrapped children splice in already-scrubbed grandchildren.
fn scrub_children(parent: &Handle) {
    let old: Vec<Handle> = parent.children.borrow().clone();
    let mut kept: Vec<Handle> = Vec::with_capacity(old.len());

    for child in old {
        match disposition(&child) {
            Disposition::Keep => {
                if matches!(child.data, NodeData::Element { .. }) {
                    scrub_attributes(&child);
                    scrub_children(&child);
                }
                kept.push(child);
            }
            Disposition::Unwrap => {
                log::debug!("sanitize: unwrapping <{}>", describe(&child));
                scrub_children(&child);
                // Move the grandchildren out rather than cloning the
                // handles: rcdom's Drop for Node clears every descendant's
                // child list, so the wrapper must not drop while still
                // listing the subtrees we keep.
                kept.append(&mut child.children.borrow_mut());
            }
            Disposition::Drop => {
                log::debug!("sanitize: dropping {}", describe(&child));
            }
        }
    }

    *parent.children.borrow_mut() = kept;
}

fn scrub_attributes(node: &Handle) {
    let NodeData::Element { ref attrs, .. } = node.data else {
        return;
    };

    attrs.borrow_mut().retain(|attr| {
        let name = attr.name.local.as_ref();
        if !ALLOWED_ATTRS.contains(&name) {
            log::debug!("sanitize: stripping attribute {name}");
            return false;
        }
        if URI_ATTRS.contains(&name) && !uri_allowed(&attr.value) {
            log::debug!("sanitize: rejecting {name} uri {:?}", &*attr.value);
            return false;
        }
        true
    });
}

/// Check a URI attribute value against the scheme allow-list.
///
/// Control characters are stripped and percent-escapes decoded before the
/// scheme test, so `java\tscript:` and `%6Aavascript:` read as `javascript:`.
/// Scheme-relative (`//…`) and relative/fragment references are allowed.
fn uri_allowed(value: &str) -> bool {
    let compact: String = value
        .trim()
        .chars()
        .filter(|c| !c.is_ascii_control())
        .collect();
    let decoded = percent_decode_str(&compact).decode_utf8_lossy();
    let decoded: &str = &decoded;

    if decoded.starts_with("//") {
        return true;
    }

    let bytes = decoded.as_bytes();
    let Some(colon) = memchr(b':', bytes) else {
        // No scheme at all: relative path or fragment.
        return true;
    };

    // A path, query, or fragment delimiter before the colon means the colon
    // is not a scheme separator.
    if bytes[..colon].iter().any(|b| matches!(b, b'/' | b'?' | b'#')) {
        return true;
    }

    let scheme = decoded[..colon].to_ascii_lowercase();
    ALLOWED_SCHEMES.contains(&scheme.as_str())
}

fn describe(node: &Handle) -> String {
    match node.data {
        NodeData::Element { ref name, .. } => name.local.to_string(),
        NodeData::Comment { .. } => "comment".to_string(),
        NodeData::ProcessingInstruction { .. } => "processing instruction".to_string(),
        NodeData::Doctype { .. } => "doctype".to_string(),
        _ => "node".to_string(),
    }
}
