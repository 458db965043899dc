//! Input Module - Event conversion and polling.
//!
//! Bridges crossterm's event system to the deck's input adapters. Raw mouse
//! kinds collapse to the pointer verbs the gesture/hover trackers need, and
//! terminal focus events stand in for tab visibility.
//!
//! # API
//!
//! - [`convert_key_event`] - crossterm KeyEvent to our KeyboardEvent
//! - [`convert_event`] - any crossterm event to an [`InputEvent`]
//! - [`poll_event`] - non-blocking event check with timeout
//!
//! # Example
//!
//! ```ignore
//! use deckhand::input::{poll_event, InputEvent};
//! use std::time::Duration;
//!
//! loop {
//!     if let Ok(Some(event)) = poll_event(Duration::from_millis(16)) {
//!         // route to adapters
//!     }
//! }
//! ```

use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyModifiers,
    MouseButton as CrosstermMouseButton, MouseEvent as CrosstermMouseEvent, MouseEventKind, poll,
    read,
};

use crate::state::keyboard::{KeyState, KeyboardEvent, Modifiers};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Unified event type for the app loop.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Keyboard event.
    Key(KeyboardEvent),
    /// Primary button pressed at a cell.
    PointerDown { x: u16, y: u16 },
    /// Primary button released at a cell.
    PointerUp { x: u16, y: u16 },
    /// Pointer moved (with or without a button held).
    PointerMove { x: u16, y: u16 },
    /// Terminal gained focus (the tab became visible).
    FocusGained,
    /// Terminal lost focus (the tab was hidden).
    FocusLost,
    /// Terminal resized (new width, height).
    Resize(u16, u16),
    /// No event or an event type the deck ignores.
    None,
}

// =============================================================================
// EVENT CONVERSION
// =============================================================================

/// Convert a crossterm KeyEvent to our KeyboardEvent.
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        _ => String::new(),
    };

    let state = match event.kind {
        crossterm::event::KeyEventKind::Press => KeyState::Press,
        crossterm::event::KeyEventKind::Repeat => KeyState::Repeat,
        crossterm::event::KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent {
        key,
        modifiers: convert_modifiers(event.modifiers),
        state,
    }
}

/// Convert a crossterm MouseEvent to a pointer verb.
///
/// Only the primary button gestures matter to the deck; other buttons and
/// scroll collapse to `None`.
pub fn convert_mouse_event(event: CrosstermMouseEvent) -> InputEvent {
    match event.kind {
        MouseEventKind::Down(CrosstermMouseButton::Left) => InputEvent::PointerDown {
            x: event.column,
            y: event.row,
        },
        MouseEventKind::Up(CrosstermMouseButton::Left) => InputEvent::PointerUp {
            x: event.column,
            y: event.row,
        },
        MouseEventKind::Moved | MouseEventKind::Drag(CrosstermMouseButton::Left) => {
            InputEvent::PointerMove {
                x: event.column,
                y: event.row,
            }
        }
        _ => InputEvent::None,
    }
}

/// Convert any crossterm event.
pub fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Key(key) => InputEvent::Key(convert_key_event(key)),
        CrosstermEvent::Mouse(mouse) => convert_mouse_event(mouse),
        CrosstermEvent::FocusGained => InputEvent::FocusGained,
        CrosstermEvent::FocusLost => InputEvent::FocusLost,
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout. Returns `None` if nothing arrived.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(convert_event(read()?)))
    } else {
        Ok(None)
    }
}

// =============================================================================
// TESTS
// =============================================================================
