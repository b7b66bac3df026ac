//! The per-article orchestrator.
//!
//! Ties the pipeline together in its one valid order: sanitize, extract and
//! annotate, then attach the scroll-spy, click router, and overlays to the
//! result. Content changes tear everything down before re-attaching, and
//! every inbound event carries a generation stamp so callbacks queued
//! against a previous article's document are discarded instead of acting on
//! state they no longer describe.

use crate::interact::{ClickTarget, ImageClickRouter};
use crate::outline::{enrich, Outline};
use crate::overlay::{FullscreenReader, Key, Lightbox, ScrollState};
use crate::sanitize::{sanitize, Sanitized};
use crate::scrollspy::{HeadingPosition, ScrollSpy, Viewport};
use crate::toc;

/// One article's enriched content plus all of its interaction state.
#[derive(Debug)]
pub struct Article {
    content: Sanitized,
    outline: Outline,
    scrollspy: ScrollSpy,
    router: ImageClickRouter,
    lightbox: Lightbox,
    reader: FullscreenReader,
    scroll: ScrollState,
    generation: u64,
}

impl Article {
    /// Run the pipeline on a raw CMS fragment and attach everything.
    pub fn new(raw: &str) -> Self {
        let mut article = Article {
            content: sanitize(""),
            outline: Outline::default(),
            scrollspy: ScrollSpy::new(),
            router: ImageClickRouter::default(),
            lightbox: Lightbox::new(0),
            reader: FullscreenReader::new(),
            scroll: ScrollState::new(),
            generation: 0,
        };
        article.install(raw);
        article
    }

    /// Replace the article body.
    ///
    /// Tears down the previous article completely first: scroll-spy
    /// detached, overlays closed, scroll lock released. The generation bump
    /// invalidates any event still in flight against the old content.
    pub fn set_content(&mut self, raw: &str) {
        self.scrollspy.detach();
        self.lightbox.close();
        self.reader.close(&mut self.scroll);
        self.generation += 1;
        self.install(raw);
    }

    fn install(&mut self, raw: &str) {
        let sanitized = sanitize(raw);
        let (content, outline) = enrich(&sanitized);

        self.scrollspy.attach(&outline.headings);
        self.router = ImageClickRouter::new(&outline.images);
        self.lightbox = Lightbox::new(outline.images.len());
        self.content = content;
        self.outline = outline;
    }

    /// Stamp for events produced against the current content.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Render-ready article body: sanitized, heading ids injected, images
    /// marked zoomable. The only value the trusted-HTML injection point may
    /// receive.
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// The fullscreen reader shows the same enriched body in its own
    /// injection point.
    pub fn reader_content(&self) -> &str {
        self.content.as_str()
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn active_heading(&self) -> Option<&str> {
        self.scrollspy.active()
    }

    /// ToC nav for the current outline and active heading, `None` when the
    /// article has no headings.
    pub fn toc_html(&self) -> Option<String> {
        toc::render(&self.outline.headings, self.scrollspy.active())
    }

    /// One scroll tick. Stale-generation ticks are dropped.
    pub fn on_scroll(
        &mut self,
        generation: u64,
        viewport: Viewport,
        positions: &[HeadingPosition],
    ) -> Option<&str> {
        if generation != self.generation {
            log::trace!("dropping stale scroll event (gen {generation})");
            return self.scrollspy.active();
        }
        self.scrollspy.observe(viewport, positions)
    }

    /// One delegated click inside the content container. Opens the lightbox
    /// when the target resolves to a known image; everything else, including
    /// stale generations and rewritten srcs, is a silent no-op.
    pub fn on_click(&mut self, generation: u64, target: &ClickTarget) {
        if generation != self.generation {
            log::trace!("dropping stale click event (gen {generation})");
            return;
        }
        if let Some(index) = self.router.resolve(target) {
            // Router indices come from the same image list the lightbox was
            // sized with, so this cannot be out of range.
            let _ = self.lightbox.open_at(index);
        }
    }

    /// One key event. Only the fullscreen reader owns keys, and only while
    /// open. Returns `true` if the key was consumed.
    pub fn on_key(&mut self, generation: u64, key: Key) -> bool {
        if generation != self.generation {
            log::trace!("dropping stale key event (gen {generation})");
            return false;
        }
        self.reader.on_key(key, &mut self.scroll)
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    /// Mutable lightbox access for the overlay's own controls (next, prev,
    /// close, backdrop click).
    pub fn lightbox_mut(&mut self) -> &mut Lightbox {
        &mut self.lightbox
    }

    pub fn reader_is_open(&self) -> bool {
        self.reader.is_open()
    }

    /// Whether the host page's scroll should currently be suppressed.
    pub fn scroll_locked(&self) -> bool {
        self.scroll.is_locked()
    }

    pub fn open_reader(&mut self) {
        self.reader.open(&mut self.scroll);
    }

    pub fn close_reader(&mut self) {
        self.reader.close(&mut self.scroll);
    }

    pub fn toggle_reader(&mut self) {
        self.reader.toggle(&mut self.scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = concat!(
        r#"<p>Hello</p><h2>Section</h2><img src="a.jpg">"#,
        r#"<h3>Sub</h3><img src="b.jpg">"#,
    );

    #[test]
    fn pipeline_runs_in_order_on_construction() {
        let article = Article::new(CONTENT);
        assert_eq!(article.outline().headings.len(), 2);
        assert_eq!(article.outline().images.len(), 2);
        assert!(article.content().contains(r#"id="heading-0""#));
        assert_eq!(article.active_heading(), None);
    }

    #[test]
    fn click_on_known_image_opens_lightbox_at_index() {
        let mut article = Article::new(CONTENT);
        let generation = article.generation();
        article.on_click(generation, &ClickTarget::image("b.jpg"));
        assert_eq!(article.lightbox().index(), Some(1));
    }

    #[test]
    fn click_on_unknown_image_is_silent() {
        let mut article = Article::new(CONTENT);
        let generation = article.generation();
        article.on_click(generation, &ClickTarget::image("rewritten.jpg"));
        assert!(!article.lightbox().is_open());
    }

    #[test]
    fn set_content_tears_down_and_reinstalls() {
        let mut article = Article::new(CONTENT);
        let old_generation = article.generation();

        let generation = article.generation();
        article.on_click(generation, &ClickTarget::image("a.jpg"));
        article.open_reader();
        assert!(article.lightbox().is_open());
        assert!(article.scroll_locked());

        article.set_content("<h2>Other</h2>");

        assert!(!article.lightbox().is_open());
        assert!(!article.reader_is_open());
        assert!(!article.scroll_locked());
        assert_eq!(article.outline().headings.len(), 1);
        assert_eq!(article.outline().images.len(), 0);
        assert_eq!(article.active_heading(), None);
        assert_ne!(article.generation(), old_generation);
    }

    #[test]
    fn stale_events_are_dropped_after_content_change() {
        let mut article = Article::new(CONTENT);
        let stale = article.generation();
        article.set_content(CONTENT);

        article.on_click(stale, &ClickTarget::image("a.jpg"));
        assert!(!article.lightbox().is_open());

        article.open_reader();
        assert!(!article.on_key(stale, Key::Escape));
        assert!(article.reader_is_open());

        let viewport = Viewport { height: 900.0 };
        article.on_scroll(stale, viewport, &[HeadingPosition::new("heading-0", 200.0)]);
        assert_eq!(article.active_heading(), None);
    }

    #[test]
    fn scroll_updates_active_heading_and_toc() {
        let mut article = Article::new(CONTENT);
        let generation = article.generation();
        let viewport = Viewport { height: 900.0 };

        article.on_scroll(
            generation,
            viewport,
            &[HeadingPosition::new("heading-1", 150.0)],
        );
        assert_eq!(article.active_heading(), Some("heading-1"));
        let toc = article.toc_html().unwrap();
        assert!(toc.contains(r#"aria-current="true""#));
    }

    #[test]
    fn overlays_are_mutually_independent() {
        let mut article = Article::new(CONTENT);
        let generation = article.generation();

        article.on_click(generation, &ClickTarget::image("a.jpg"));
        article.open_reader();
        assert!(article.lightbox().is_open());
        assert!(article.reader_is_open());

        // Closing the reader leaves the lightbox alone and vice versa.
        assert!(article.on_key(generation, Key::Escape));
        assert!(article.lightbox().is_open());

        article.lightbox_mut().on_backdrop_click();
        assert!(!article.lightbox().is_open());
        assert!(!article.reader_is_open());
    }

    #[test]
    fn article_without_headings_has_no_toc() {
        let article = Article::new("<p>Just prose.</p>");
        assert_eq!(article.toc_html(), None);
    }
}
