//! Scroll-spy: tracks which section the reader is currently in.
//!
//! The browser original observed heading elements with an
//! `IntersectionObserver` and a root margin of `-100px 0px -66%`. Without
//! native intersection observation this is explicit geometry: the host
//! reports each heading's offset from the top of the viewport on every
//! scroll tick, and a heading activates once it enters the band biased
//! toward the top third of the viewport. When several headings cross in one
//! tick (fast scroll, anchor jump), the last one reported wins.

use std::collections::HashSet;

use crate::outline::Heading;

/// Band top: headings above this are considered scrolled past.
const BAND_TOP_PX: f64 = 100.0;

/// Band bottom as a fraction of viewport height (the top-third bias).
const BAND_BOTTOM_FRAC: f64 = 0.34;

/// Viewport geometry supplied by the host per scroll tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub height: f64,
}

/// One heading's offset from the viewport top, in px (negative when the
/// heading has scrolled above the viewport).
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingPosition {
    pub id: String,
    pub top: f64,
}

impl HeadingPosition {
    pub fn new(id: impl Into<String>, top: f64) -> Self {
        HeadingPosition { id: id.into(), top }
    }
}

/// Maintains the single active heading id for the current article.
///
/// Mutated only here; the ToC renderer reads the result. Positions reported
/// for ids that are not part of the attached heading set are ignored, which
/// keeps events from a previous article's document from leaking in.
#[derive(Debug, Default)]
pub struct ScrollSpy {
    observed: HashSet<String>,
    active: Option<String>,
    attached: bool,
}

impl ScrollSpy {
    pub fn new() -> Self {
        ScrollSpy::default()
    }

    /// Start observing a new article's headings. Replaces any previous set
    /// and clears the active id.
    pub fn attach(&mut self, headings: &[Heading]) {
        self.observed = headings.iter().map(|h| h.id.clone()).collect();
        self.active = None;
        self.attached = true;
    }

    /// Stop observing. Subsequent scroll ticks are no-ops until the next
    /// [`attach`](Self::attach).
    pub fn detach(&mut self) {
        self.observed.clear();
        self.active = None;
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Process one scroll tick. Every observed heading inside the activation
    /// band becomes active in the order given; out-of-band ticks leave the
    /// active id unchanged. Returns the active id after the tick.
    pub fn observe(&mut self, viewport: Viewport, positions: &[HeadingPosition]) -> Option<&str> {
        if !self.attached {
            return None;
        }

        let band_bottom = viewport.height * BAND_BOTTOM_FRAC;
        for pos in positions {
            if pos.top >= BAND_TOP_PX
                && pos.top <= band_bottom
                && self.observed.contains(&pos.id)
            {
                if self.active.as_deref() != Some(pos.id.as_str()) {
                    log::trace!("scrollspy: active heading -> {}", pos.id);
                }
                self.active = Some(pos.id.clone());
            }
        }
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::HeadingLevel;

    fn headings(ids: &[&str]) -> Vec<Heading> {
        ids.iter()
            .map(|id| Heading {
                id: id.to_string(),
                text: id.to_string(),
                level: HeadingLevel::H2,
            })
            .collect()
    }

    const VIEWPORT: Viewport = Viewport { height: 900.0 };

    #[test]
    fn heading_in_top_band_becomes_active() {
        let mut spy = ScrollSpy::new();
        spy.attach(&headings(&["heading-0", "heading-1"]));

        // 900 * 0.34 = 306, so 200 is inside the band.
        let active = spy.observe(VIEWPORT, &[HeadingPosition::new("heading-0", 200.0)]);
        assert_eq!(active, Some("heading-0"));
    }

    #[test]
    fn heading_below_band_does_not_activate() {
        let mut spy = ScrollSpy::new();
        spy.attach(&headings(&["heading-0"]));

        spy.observe(VIEWPORT, &[HeadingPosition::new("heading-0", 600.0)]);
        assert_eq!(spy.active(), None);
    }

    #[test]
    fn heading_above_band_does_not_activate() {
        let mut spy = ScrollSpy::new();
        spy.attach(&headings(&["heading-0"]));

        spy.observe(VIEWPORT, &[HeadingPosition::new("heading-0", 40.0)]);
        assert_eq!(spy.active(), None);
    }

    #[test]
    fn out_of_band_tick_keeps_previous_active() {
        let mut spy = ScrollSpy::new();
        spy.attach(&headings(&["heading-0", "heading-1"]));

        spy.observe(VIEWPORT, &[HeadingPosition::new("heading-0", 150.0)]);
        spy.observe(VIEWPORT, &[HeadingPosition::new("heading-1", 700.0)]);
        assert_eq!(spy.active(), Some("heading-0"));
    }

    #[test]
    fn last_observed_wins_on_simultaneous_crossing() {
        let mut spy = ScrollSpy::new();
        spy.attach(&headings(&["heading-0", "heading-1", "heading-2"]));

        let active = spy.observe(
            VIEWPORT,
            &[
                HeadingPosition::new("heading-0", 120.0),
                HeadingPosition::new("heading-1", 180.0),
                HeadingPosition::new("heading-2", 250.0),
            ],
        );
        assert_eq!(active, Some("heading-2"));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut spy = ScrollSpy::new();
        spy.attach(&headings(&["heading-0"]));

        // A position from a previous article's document.
        spy.observe(VIEWPORT, &[HeadingPosition::new("heading-7", 200.0)]);
        assert_eq!(spy.active(), None);
    }

    #[test]
    fn detach_clears_state_and_stops_observation() {
        let mut spy = ScrollSpy::new();
        spy.attach(&headings(&["heading-0"]));
        spy.observe(VIEWPORT, &[HeadingPosition::new("heading-0", 200.0)]);
        assert_eq!(spy.active(), Some("heading-0"));

        spy.detach();
        assert_eq!(spy.active(), None);
        assert_eq!(
            spy.observe(VIEWPORT, &[HeadingPosition::new("heading-0", 200.0)]),
            None
        );
    }

    #[test]
    fn reattach_replaces_the_observed_set() {
        let mut spy = ScrollSpy::new();
        spy.attach(&headings(&["heading-0"]));
        spy.observe(VIEWPORT, &[HeadingPosition::new("heading-0", 200.0)]);

        spy.attach(&headings(&["heading-0", "heading-1"]));
        // Active id does not survive a content change.
        assert_eq!(spy.active(), None);
    }
}
