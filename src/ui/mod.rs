//! Presentation layer.
//!
//! Consumes controller state and events; owns nothing the state machine
//! needs. Split by collaborator contract:
//!
//! - **render** - slide viewport, announcer line, control bar, hit regions
//! - **toast** - single transient notification with slide-in/hold/slide-out
//! - **modal** - placeholder help overlay that suppresses deck input

pub mod modal;
pub mod render;
pub mod toast;

pub use modal::{HelpModal, ModalLayout};
pub use render::{HitRegions, draw};
pub use toast::{Toast, ToastHost, ToastPhase};
