//! Delegated image-click resolution.
//!
//! The rendered article body is opaque to the host framework, so a single
//! delegated click listener on the content container is the only interaction
//! point. This module answers the one question that listener has: "which
//! lightbox slide does this click mean, if any?"

use crate::outline::ImageRef;

/// What the delegated click landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// An `<img>` inside the content, identified by its rendered `src`.
    Image { src: String },
    /// Anything else in the content container.
    Other,
}

impl ClickTarget {
    pub fn image(src: impl Into<String>) -> Self {
        ClickTarget::Image { src: src.into() }
    }
}

/// Resolves clicked images to indices in the article's image order.
#[derive(Debug, Default)]
pub struct ImageClickRouter {
    sources: Vec<String>,
}

impl ImageClickRouter {
    pub fn new(images: &[ImageRef]) -> Self {
        ImageClickRouter {
            sources: images.iter().map(|img| img.src.clone()).collect(),
        }
    }

    /// Resolve a click to a lightbox index.
    ///
    /// Non-image targets and images whose `src` no longer matches the
    /// extracted list (a CDN may have rewritten it after extraction) resolve
    /// to `None`: the click is a silent no-op, never the wrong image.
    pub fn resolve(&self, target: &ClickTarget) -> Option<usize> {
        match target {
            ClickTarget::Image { src } => self.sources.iter().position(|s| s == src),
            ClickTarget::Other => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }
}
