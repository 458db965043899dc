//! Keyboard Module - Keyboard event types and the deck key map.
//!
//! Does NOT own stdin (that is the input module).
//! Does NOT touch the controller; it only names the action a key asks for.
//!
//! # API
//!
//! - [`KeyboardEvent`] / [`Modifiers`] / [`KeyState`] - event types
//! - [`action_for`] - map a key press to a deck [`Action`]
//!
//! # Key map
//!
//! | Key | Action |
//! |---|---|
//! | ArrowLeft / ArrowRight | previous / next slide |
//! | Space | toggle auto-advance |
//! | Escape | stop auto-advance (only while playing) |
//! | Home / End | first / last slide |
//! | 1-9 | jump to that slide number |
//! | r | restart from the beginning |
//! | q, Ctrl+C | quit |

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// Create empty modifiers.
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl.
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }
}

/// Key event state (press, repeat, release).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g. "a", "Escape", "ArrowLeft").
    pub key: String,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers.
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Check if this is a press event.
    pub fn is_press(&self) -> bool {
        self.state == KeyState::Press
    }
}

/// What a key press asks the deck to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Prev,
    Next,
    ToggleAuto,
    /// Escape: stops auto-play, but only while it is running.
    StopAuto,
    First,
    Last,
    /// 1-based slide number from a digit key.
    Jump(usize),
    Restart,
    Quit,
    /// Key has no deck binding.
    None,
}

// =============================================================================
// KEY MAP
// =============================================================================

/// Map a keyboard event to a deck action.
///
/// Only press events map to anything; repeats and releases are `None`.
/// The caller is responsible for suppressing the whole map while the help
/// modal is open.
pub fn action_for(event: &KeyboardEvent) -> Action {
    if !event.is_press() {
        return Action::None;
    }

    if event.modifiers.ctrl {
        return if event.key == "c" {
            Action::Quit
        } else {
            Action::None
        };
    }

    match event.key.as_str() {
        "ArrowLeft" => Action::Prev,
        "ArrowRight" => Action::Next,
        " " => Action::ToggleAuto,
        "Escape" => Action::StopAuto,
        "Home" => Action::First,
        "End" => Action::Last,
        "r" => Action::Restart,
        "q" => Action::Quit,
        key => match key.parse::<usize>() {
            Ok(n) if (1..=9).contains(&n) => Action::Jump(n),
            _ => Action::None,
        },
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_navigation() {
        assert_eq!(action_for(&KeyboardEvent::new("ArrowLeft")), Action::Prev);
        assert_eq!(action_for(&KeyboardEvent::new("ArrowRight")), Action::Next);
    }

    #[test]
    fn test_space_toggles_auto() {
        assert_eq!(action_for(&KeyboardEvent::new(" ")), Action::ToggleAuto);
    }

    #[test]
    fn test_escape_stops_auto() {
        assert_eq!(action_for(&KeyboardEvent::new("Escape")), Action::StopAuto);
    }

    #[test]
    fn test_home_end() {
        assert_eq!(action_for(&KeyboardEvent::new("Home")), Action::First);
        assert_eq!(action_for(&KeyboardEvent::new("End")), Action::Last);
    }

    #[test]
    fn test_digit_keys_jump() {
        for n in 1..=9 {
            let event = KeyboardEvent::new(n.to_string());
            assert_eq!(action_for(&event), Action::Jump(n));
        }
        assert_eq!(action_for(&KeyboardEvent::new("0")), Action::None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(action_for(&KeyboardEvent::new("q")), Action::Quit);
        assert_eq!(
            action_for(&KeyboardEvent::with_modifiers("c", Modifiers::ctrl())),
            Action::Quit
        );
        // Plain 'c' is not quit
        assert_eq!(action_for(&KeyboardEvent::new("c")), Action::None);
    }

    #[test]
    fn test_restart_key() {
        assert_eq!(action_for(&KeyboardEvent::new("r")), Action::Restart);
        // Ctrl+r has no binding
        assert_eq!(
            action_for(&KeyboardEvent::with_modifiers("r", Modifiers::ctrl())),
            Action::None
        );
    }

    #[test]
    fn test_only_press_maps() {
        let mut event = KeyboardEvent::new("ArrowRight");
        event.state = KeyState::Repeat;
        assert_eq!(action_for(&event), Action::None);
        event.state = KeyState::Release;
        assert_eq!(action_for(&event), Action::None);
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(action_for(&KeyboardEvent::new("x")), Action::None);
        assert_eq!(action_for(&KeyboardEvent::new("Enter")), Action::None);
    }
}
