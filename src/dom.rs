//! Internal html5ever/rcdom plumbing shared by the sanitizer and the
//! structural extractor.
//!
//! Everything here operates on HTML *fragments*: CMS bodies arrive without a
//! surrounding document, so we wrap them for parsing and serialize only the
//! body's children on the way out.

use html5ever::parse_document;
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{namespace_url, ns, Attribute, LocalName, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

/// Parse an HTML fragment into a DOM tree.
///
/// The fragment is wrapped in a minimal document so the tree builder can run
/// in its normal (permissive) document mode; unmatched and unknown tags are
/// repaired or dropped by the parser, never reported as errors.
pub(crate) fn parse_fragment(html: &str) -> RcDom {
    let wrapped = format!("<!DOCTYPE html><html><head></head><body>{}</body></html>", html);

    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };

    parse_document(RcDom::default(), opts)
        .from_utf8()
        .one(wrapped.as_bytes())
}

/// Find the `<body>` element the fragment was parsed into.
pub(crate) fn body(dom: &RcDom) -> Option<Handle> {
    find_first(&dom.document, "body")
}

fn find_first(handle: &Handle, name: &str) -> Option<Handle> {
    if let NodeData::Element { name: ref qname, .. } = handle.data {
        if qname.local.as_ref() == name {
            return Some(handle.clone());
        }
    }
    for child in handle.children.borrow().iter() {
        if let Some(found) = find_first(child, name) {
            return Some(found);
        }
    }
    None
}

/// Serialize the children of a node, dropping the node itself.
///
/// This is the inverse of [`parse_fragment`]: serializing the body's children
/// recovers the fragment without the wrapper document.
pub(crate) fn serialize_children(handle: &Handle) -> String {
    let mut out = String::new();
    for child in handle.children.borrow().iter() {
        out.push_str(&serialize_node(child));
    }
    out
}

fn serialize_node(handle: &Handle) -> String {
    let serializable: SerializableHandle = handle.clone().into();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let mut bytes = Vec::new();
    if serialize(&mut bytes, &serializable, opts).is_err() {
        return String::new();
    }
    String::from_utf8(bytes).unwrap_or_default()
}

/// Pre-order walk over every element under (and including) `handle`.
pub(crate) fn for_each_element<F: FnMut(&Handle)>(handle: &Handle, f: &mut F) {
    if matches!(handle.data, NodeData::Element { .. }) {
        f(handle);
    }
    for child in handle.children.borrow().iter() {
        for_each_element(child, f);
    }
}

/// Local tag name of an element node, lowercased by the parser.
pub(crate) fn tag_name(handle: &Handle) -> Option<LocalName> {
    match handle.data {
        NodeData::Element { ref name, .. } => Some(name.local.clone()),
        _ => None,
    }
}

/// Concatenated text content of a node, tags ignored.
pub(crate) fn text_content(handle: &Handle) -> String {
    let mut text = String::new();
    collect_text(handle, &mut text);
    text
}

fn collect_text(handle: &Handle, text: &mut String) {
    match handle.data {
        NodeData::Text { ref contents } => text.push_str(&contents.borrow()),
        NodeData::Element { .. } | NodeData::Document => {
            for child in handle.children.borrow().iter() {
                collect_text(child, text);
            }
        }
        _ => {}
    }
}

/// Get an attribute value from an element.
pub(crate) fn get_attr(handle: &Handle, attr_name: &str) -> Option<String> {
    if let NodeData::Element { ref attrs, .. } = handle.data {
        for attr in attrs.borrow().iter() {
            if attr.name.local.as_ref() == attr_name {
                return Some(attr.value.to_string());
            }
        }
    }
    None
}

/// Set an attribute on an element, replacing any existing value.
pub(crate) fn set_attr(handle: &Handle, attr_name: &str, value: &str) {
    if let NodeData::Element { ref attrs, .. } = handle.data {
        let mut attrs = attrs.borrow_mut();
        for attr in attrs.iter_mut() {
            if attr.name.local.as_ref() == attr_name {
                attr.value = value.into();
                return;
            }
        }
        attrs.push(Attribute {
            name: QualName::new(None, ns!(), attr_name.into()),
            value: value.into(),
        });
    }
}

/// Escape text for inclusion in generated markup.
pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
