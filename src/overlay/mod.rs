//! Modal reading overlays: the image lightbox and the fullscreen reader.
//!
//! Two independent Closed/Open machines. Opening one never forces the other
//! closed, and each owns its teardown: the lightbox's navigation state dies
//! with `close()`, the reader's scroll lock is released on every close path.

mod lightbox;
mod reader;

pub use lightbox::{Lightbox, LightboxState};
pub use reader::{FullscreenReader, Key, ScrollState};
