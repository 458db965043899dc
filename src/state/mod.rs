//! Input adapter state.
//!
//! Thin translation layers between raw terminal events and controller
//! operations. Nothing here mutates deck state directly:
//!
//! - **Keyboard** - event types and the key -> [`Action`](keyboard::Action) map
//! - **Pointer** - swipe/click gesture resolution and hover tracking

pub mod keyboard;
pub mod pointer;

pub use keyboard::{Action, KeyState, KeyboardEvent, Modifiers, action_for};
pub use pointer::{CLICK_SLOP, Gesture, GestureTracker, HoverChange, HoverTracker, SWIPE_THRESHOLD};
