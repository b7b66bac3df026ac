//! Fullscreen reader state machine.
//!
//! While the reader is open the page behind it must not scroll; on close the
//! suppression must be fully reverted on every exit path, including rapid
//! re-open/close. Key handling is scoped to the open state: the machine
//! processes keys only while open, which is the headless equivalent of
//! attaching the keydown listener on open and removing it on close.

/// Keys the reader responds to. `Escape` and the `f` toggle key close it;
/// no other global shortcuts belong to this subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Char(char),
}

/// Mirror of the host page's scroll suppression.
///
/// Owned by the orchestrator and mutated only through the reader, so
/// `is_locked()` always equals "the reader is open". The host applies the
/// flag to its `overflow` style (or equivalent) after each event.
#[derive(Debug, Default)]
pub struct ScrollState {
    locked: bool,
}

impl ScrollState {
    pub fn new() -> Self {
        ScrollState::default()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    fn lock(&mut self) {
        self.locked = true;
    }

    fn unlock(&mut self) {
        self.locked = false;
    }
}

/// Isolated overlay that renders the full article content.
#[derive(Debug, Default)]
pub struct FullscreenReader {
    open: bool,
}

impl FullscreenReader {
    pub fn new() -> Self {
        FullscreenReader::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the reader and suppress page scroll. Re-opening while already
    /// open is a no-op, never a double-lock.
    pub fn open(&mut self, scroll: &mut ScrollState) {
        if !self.open {
            self.open = true;
            scroll.lock();
            log::trace!("fullscreen reader opened");
        }
    }

    /// Close the reader and release page scroll. Closing while already
    /// closed is a no-op.
    pub fn close(&mut self, scroll: &mut ScrollState) {
        if self.open {
            self.open = false;
            scroll.unlock();
            log::trace!("fullscreen reader closed");
        }
    }

    pub fn toggle(&mut self, scroll: &mut ScrollState) {
        if self.open {
            self.close(scroll);
        } else {
            self.open(scroll);
        }
    }

    /// Handle a key event. Returns `true` if the key closed the reader.
    /// Keys arriving while closed do nothing: the listener only exists while
    /// the overlay is up.
    pub fn on_key(&mut self, key: Key, scroll: &mut ScrollState) -> bool {
        if !self.open {
            return false;
        }
        match key {
            Key::Escape | Key::Char('f') | Key::Char('F') => {
                self.close(scroll);
                true
            }
            Key::Char(_) => false,
        }
    }
}
