//! Pointer Module - Gesture resolution and hover tracking.
//!
//! Two small state machines over raw mouse events:
//!
//! - [`GestureTracker`] resolves a press/release pair into a swipe
//!   (horizontal travel beyond the threshold), a click (near-stationary
//!   release), or nothing. Vertical drags never swipe and never click.
//! - [`HoverTracker`] reports enter/leave transitions for a region (the
//!   slide viewport), which the app uses to pause and resume auto-play.
//!
//! # Example
//!
//! ```ignore
//! use deckhand::state::pointer::{Gesture, GestureTracker};
//!
//! let mut tracker = GestureTracker::new(50);
//! tracker.press(120, 10);
//! match tracker.release(40, 11) {
//!     Some(Gesture::SwipeLeft) => { /* next slide */ }
//!     Some(Gesture::SwipeRight) => { /* previous slide */ }
//!     Some(Gesture::Click { x, y }) => { /* hit-test controls */ }
//!     None => {}
//! }
//! ```

use crate::types::Rect;

/// Horizontal travel (in cells) a drag needs to count as a swipe.
pub const SWIPE_THRESHOLD: u16 = 50;

/// Travel at or under this on both axes still reads as a click.
pub const CLICK_SLOP: u16 = 5;

// =============================================================================
// GESTURES
// =============================================================================

/// Resolved pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Leftward swipe: advance.
    SwipeLeft,
    /// Rightward swipe: go back.
    SwipeRight,
    /// Press and release without enough travel; position is the release
    /// point.
    Click { x: u16, y: u16 },
}

/// Tracks one press-to-release pointer gesture at a time.
#[derive(Debug, Clone, Copy)]
pub struct GestureTracker {
    threshold: u16,
    origin: Option<(u16, u16)>,
}

impl GestureTracker {
    pub fn new(threshold: u16) -> Self {
        Self {
            threshold,
            origin: None,
        }
    }

    /// Record a button press. A second press before release restarts the
    /// gesture from the new origin.
    pub fn press(&mut self, x: u16, y: u16) {
        self.origin = Some((x, y));
    }

    /// Resolve the gesture on release. Returns `None` for a release with
    /// no matching press, and for a drag that neither swipes nor stays
    /// near the press point (a mostly-vertical drag is ignored, not a
    /// click).
    pub fn release(&mut self, x: u16, y: u16) -> Option<Gesture> {
        let (start_x, start_y) = self.origin.take()?;
        let dx = start_x.abs_diff(x);
        let dy = start_y.abs_diff(y);

        if dx > self.threshold && dx > dy {
            return Some(if x < start_x {
                Gesture::SwipeLeft
            } else {
                Gesture::SwipeRight
            });
        }
        if dx <= CLICK_SLOP && dy <= CLICK_SLOP {
            return Some(Gesture::Click { x, y });
        }
        None
    }

    /// Whether a press is waiting for its release.
    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }
}

// =============================================================================
// HOVER
// =============================================================================

/// Transition reported by [`HoverTracker::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverChange {
    Entered,
    Left,
}

/// Tracks whether the pointer is inside a region, reporting only the
/// transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoverTracker {
    inside: bool,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a pointer position. Returns a transition when the inside/outside
    /// state flips, `None` while it holds steady.
    pub fn update(&mut self, x: u16, y: u16, region: Rect) -> Option<HoverChange> {
        let now_inside = region.contains(x, y);
        if now_inside == self.inside {
            return None;
        }
        self.inside = now_inside;
        Some(if now_inside {
            HoverChange::Entered
        } else {
            HoverChange::Left
        })
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }
}

// =============================================================================
// TESTS
// =============================================================================
