//! Structural extraction: headings and images from sanitized content.
//!
//! One pass over the sanitized fragment collects the `h2`/`h3` headings and
//! every image in document order, writes `heading-<n>` ids onto the heading
//! nodes, and re-serializes. The annotated markup is the render payload, so
//! the ids in the outline and the ids in the rendered document cannot
//! disagree, and they exist before any scroll observation starts.

use markup5ever_rcdom::Handle;

use crate::dom;
use crate::sanitize::Sanitized;

/// Fallback alt text for images the CMS author left unlabeled.
pub const DEFAULT_IMAGE_ALT: &str = "Article image";

/// Class token written onto in-content images so the host's stylesheet can
/// give them a pointer-cursor affordance.
pub const ZOOMABLE_CLASS: &str = "zoomable";

/// Heading levels that become ToC entries. The article `h1` is the title,
/// rendered outside this pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum HeadingLevel {
    H2,
    H3,
}

impl HeadingLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

/// A ToC entry derived from an in-article heading.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Heading {
    /// `heading-<n>`, n being the 0-based position among extracted headings.
    /// The same id is written onto the rendered element.
    pub id: String,
    pub text: String,
    pub level: HeadingLevel,
}

/// An in-article image, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
}

/// Ordered structural metadata for one article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Outline {
    pub headings: Vec<Heading>,
    pub images: Vec<ImageRef>,
}

impl Outline {
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty() && self.images.is_empty()
    }
}

/// Extract the outline and annotate the markup in a single pass.
///
/// Returns the render-ready content (heading ids injected, images marked
/// zoomable) together with the outline. Extraction only accepts sanitized
/// content; deriving structure from raw CMS markup would leak unsafe text
/// into heading entries.
pub fn enrich(content: &Sanitized) -> (Sanitized, Outline) {
    let dom = dom::parse_fragment(content.as_str());
    let Some(body) = dom::body(&dom) else {
        return (Sanitized::from_trusted(String::new()), Outline::default());
    };

    let mut outline = Outline::default();

    dom::for_each_element(&body, &mut |el: &Handle| {
        let Some(name) = dom::tag_name(el) else { return };
        match &*name {
            "h2" | "h3" => {
                let index = outline.headings.len();
                let id = format!("heading-{index}");
                dom::set_attr(el, "id", &id);
                let level = if &*name == "h2" {
                    HeadingLevel::H2
                } else {
                    HeadingLevel::H3
                };
                outline.headings.push(Heading {
                    id,
                    text: dom::text_content(el).trim().to_string(),
                    level,
                });
            }
            "img" => {
                let src = dom::get_attr(el, "src").unwrap_or_default();
                let alt = dom::get_attr(el, "alt")
                    .filter(|a| !a.is_empty())
                    .unwrap_or_else(|| DEFAULT_IMAGE_ALT.to_string());
                mark_zoomable(el);
                outline.images.push(ImageRef { src, alt });
            }
            _ => {}
        }
    });

    log::trace!(
        "enrich: {} heading(s), {} image(s)",
        outline.headings.len(),
        outline.images.len()
    );

    (
        Sanitized::from_trusted(dom::serialize_children(&body)),
        outline,
    )
}

fn mark_zoomable(el: &Handle) {
    let class = match dom::get_attr(el, "class") {
        Some(existing) if existing.split_whitespace().any(|t| t == ZOOMABLE_CLASS) => existing,
        Some(existing) if !existing.is_empty() => format!("{existing} {ZOOMABLE_CLASS}"),
        _ => ZOOMABLE_CLASS.to_string(),
    };
    dom::set_attr(el, "class", &class);
}
