//! Lightbox state machine.

use crate::error::{Error, Result};

/// Lightbox machine state. `index` is only meaningful while open and always
/// stays within the article's image range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxState {
    Closed,
    Open { index: usize },
}

/// Modal image viewer over the article's image sequence.
///
/// Navigation is finite (clamped) when the article has at most one image and
/// wraps around otherwise, matching the gallery behavior of the reading UI.
#[derive(Debug)]
pub struct Lightbox {
    state: LightboxState,
    image_count: usize,
}

impl Lightbox {
    pub fn new(image_count: usize) -> Self {
        Lightbox {
            state: LightboxState::Closed,
            image_count,
        }
    }

    pub fn state(&self) -> LightboxState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, LightboxState::Open { .. })
    }

    /// Index of the slide on display, while open.
    pub fn index(&self) -> Option<usize> {
        match self.state {
            LightboxState::Open { index } => Some(index),
            LightboxState::Closed => None,
        }
    }

    /// Open at a specific slide. With zero images every index is out of
    /// range, so a lightbox over an image-free article can never open.
    pub fn open_at(&mut self, index: usize) -> Result<()> {
        if index >= self.image_count {
            return Err(Error::ImageIndexOutOfRange {
                index,
                count: self.image_count,
            });
        }
        self.state = LightboxState::Open { index };
        Ok(())
    }

    /// Advance to the next slide. No-op while closed; clamps at the end when
    /// navigation is finite.
    pub fn next(&mut self) {
        if let LightboxState::Open { index } = self.state {
            let next = if self.wraps() {
                (index + 1) % self.image_count
            } else {
                index
            };
            self.state = LightboxState::Open { index: next };
        }
    }

    /// Go back one slide. No-op while closed; clamps at the start when
    /// navigation is finite.
    pub fn prev(&mut self) {
        if let LightboxState::Open { index } = self.state {
            let prev = if self.wraps() {
                (index + self.image_count - 1) % self.image_count
            } else {
                index
            };
            self.state = LightboxState::Open { index: prev };
        }
    }

    pub fn close(&mut self) {
        self.state = LightboxState::Closed;
    }

    /// A click on the backdrop closes the lightbox.
    pub fn on_backdrop_click(&mut self) {
        self.close();
    }

    fn wraps(&self) -> bool {
        self.image_count > 1
    }
}
