//! Placeholder help modal.
//!
//! A transient overlay explaining how to replace an image placeholder.
//! Dismissed by the close control, a click outside the box, or Escape.
//! While open it consumes every key and click, suppressing deck input.

use crate::state::keyboard::KeyboardEvent;
use crate::types::Rect;

// =============================================================================
// MODAL
// =============================================================================

/// An open help modal for one placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpModal {
    pub id: String,
    pub instruction: String,
}

/// Computed geometry for hit-testing clicks against the open modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalLayout {
    /// The modal box itself.
    pub frame: Rect,
    /// The `[x]` close control.
    pub close: Rect,
}

impl HelpModal {
    pub fn open(id: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            instruction: instruction.into(),
        }
    }

    /// Text body of the modal.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Placeholder: {}", self.id),
            String::new(),
            self.instruction.clone(),
            String::new(),
            "To replace this placeholder:".to_string(),
            format!("  1. Find the [image:{}] line in the deck file", self.id),
            "  2. Swap it for the content you want on the slide".to_string(),
            "  3. Reload the deck".to_string(),
        ]
    }

    /// Center the modal box in a terminal of the given size.
    pub fn layout(&self, width: u16, height: u16) -> ModalLayout {
        let box_width = 54.min(width.saturating_sub(2)).max(20);
        let box_height = (self.lines().len() as u16 + 4).min(height.saturating_sub(2));
        let x = (width.saturating_sub(box_width)) / 2;
        let y = (height.saturating_sub(box_height)) / 2;

        let frame = Rect::new(x, y, box_width, box_height);
        // Close control sits in the top border, right corner
        let close = Rect::new(x + box_width.saturating_sub(4), y, 3, 1);
        ModalLayout { frame, close }
    }

    /// Handle a key while open. Returns true when the modal dismisses
    /// itself; the key is consumed either way.
    pub fn handle_key(&self, event: &KeyboardEvent) -> bool {
        event.is_press() && event.key == "Escape"
    }

    /// Handle a click while open. Returns true when the modal dismisses
    /// itself (close control, or anywhere outside the box).
    pub fn handle_click(&self, x: u16, y: u16, layout: &ModalLayout) -> bool {
        layout.close.contains(x, y) || !layout.frame.contains(x, y)
    }
}

// =============================================================================
// TESTS
// =============================================================================
