//! # deckhand
//!
//! Terminal slide-deck presenter with auto-advance and mouse gestures.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! reactive presentation state.
//!
//! ## Architecture
//!
//! A [`deck::Deck`] is parsed from a plain-text file and handed to a
//! [`controller::DeckController`], which owns the current-slide and
//! auto-play signals and emits [`types::DeckEvent`]s to subscribers. The
//! auto-advance clock runs on a background thread but only queues ticks;
//! the event loop in [`app`] drains them, so every transition happens on
//! one thread.
//!
//! ```text
//! Deck file → Deck → DeckController → DeckEvent → render frame
//! ```
//!
//! ## Modules
//!
//! - [`deck`] - Deck file format and parser
//! - [`controller`] - Navigation, auto-play and event emission
//! - [`autoplay`] - Background clock for auto-advance
//! - [`state`] - Keyboard map, gesture and hover tracking
//! - [`ui`] - Frame renderer, toasts, help modal
//! - [`app`] - Terminal session and event loop

pub mod app;
pub mod autoplay;
pub mod controller;
pub mod deck;
pub mod error;
pub mod input;
pub mod state;
pub mod types;
pub mod ui;

// Re-export commonly used items
pub use types::*;

pub use deck::{Block, Deck, Slide};

pub use controller::{Controls, DeckController, SlideInfo};

pub use autoplay::{AutoClock, DEFAULT_INTERVAL};

pub use error::{DeckError, LoadWarning};

pub use state::{
    // Keyboard
    action_for, Action, KeyState, KeyboardEvent, Modifiers,
    // Pointer
    CLICK_SLOP, Gesture, GestureTracker, HoverChange, HoverTracker, SWIPE_THRESHOLD,
};

pub use ui::{HelpModal, HitRegions, Toast, ToastHost, ToastPhase};
