//! # folio
//!
//! A content enrichment pipeline for CMS-authored magazine articles.
//!
//! The CMS hands the page an opaque HTML string. Folio turns it into a safe,
//! navigable, interactive document: a sanitizer reduces the markup to a fixed
//! allow-list, a structural extractor derives headings and images while
//! injecting stable anchor ids, and a set of small event-driven state
//! machines track reading position, route image clicks to a lightbox, and
//! manage the fullscreen reading overlay.
//!
//! ## Quick Start
//!
//! ```
//! use folio::{Article, ClickTarget, HeadingPosition, Viewport};
//!
//! let mut article = Article::new(
//!     r#"<h2>Intro</h2><p>Hello</p><img src="a.jpg"><script>alert(1)</script>"#,
//! );
//!
//! // Script is gone, heading ids are injected, the image is interactive.
//! assert!(!article.content().contains("script"));
//! assert!(article.content().contains(r#"<h2 id="heading-0">"#));
//!
//! // The host reports scroll geometry; folio tracks the active section.
//! let generation = article.generation();
//! article.on_scroll(
//!     generation,
//!     Viewport { height: 900.0 },
//!     &[HeadingPosition::new("heading-0", 150.0)],
//! );
//! assert_eq!(article.active_heading(), Some("heading-0"));
//!
//! // A delegated click on a rendered image opens the lightbox.
//! article.on_click(generation, &ClickTarget::image("a.jpg"));
//! assert_eq!(article.lightbox().index(), Some(0));
//! ```
//!
//! Data flows strictly raw HTML → [`sanitize`] → [`enrich`] → interaction
//! state; nothing downstream of the sanitizer ever sees the raw string, and
//! [`Sanitized`] is the only type the render path accepts.

pub mod article;
pub mod error;
pub mod interact;
pub mod outline;
pub mod overlay;
pub mod sanitize;
pub mod scrollspy;
pub mod toc;

pub(crate) mod dom;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use article::Article;
pub use error::{Error, Result};
pub use interact::{ClickTarget, ImageClickRouter};
pub use outline::{enrich, Heading, HeadingLevel, ImageRef, Outline};
pub use overlay::{FullscreenReader, Key, Lightbox, LightboxState, ScrollState};
pub use sanitize::{sanitize, Sanitized};
pub use scrollspy::{HeadingPosition, ScrollSpy, Viewport};
