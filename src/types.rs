//! Core types for deckhand.
//!
//! These types flow between the controller, the input adapters and the
//! presentation layer. The controller never draws; it emits [`DeckEvent`]s
//! and the UI decides what they look like.

use crossterm::style::Color;

// =============================================================================
// Severity
// =============================================================================

/// Severity tag for transient notifications.
///
/// Maps directly to a color token. The mapping is the whole contract:
/// the toast layer does not interpret severities beyond picking a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    /// Color token for this severity.
    pub const fn color(self) -> Color {
        match self {
            Severity::Info => Color::Blue,
            Severity::Success => Color::Green,
            Severity::Error => Color::Red,
        }
    }
}

// =============================================================================
// Rect - hit regions and hover regions
// =============================================================================

/// A rectangle in terminal cell coordinates.
///
/// Used for control-bar hit regions, the slide viewport hover region and
/// the modal box. Zero width or height means the rect contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Check whether a cell coordinate falls inside this rect.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && x < self.x.saturating_add(self.width)
            && y < self.y.saturating_add(self.height)
    }
}

// =============================================================================
// SpanStyle (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes for a styled run, as a bitfield for cheap comparison.
    ///
    /// Combine with bitwise OR: `SpanStyle::BOLD | SpanStyle::DIM`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SpanStyle: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const REVERSE = 1 << 4;
    }
}

// =============================================================================
// DeckEvent
// =============================================================================

/// Events emitted by the controller after state-affecting operations.
///
/// The presentation layer subscribes via `DeckController::on_event` and
/// renders whatever these describe. Every mutation emits `Refresh` so UI
/// indicators (counter, button states, labels) can re-sync.
#[derive(Debug, Clone, PartialEq)]
pub enum DeckEvent {
    /// UI indicators should refresh from the controller's state.
    Refresh,
    /// Position changed. `announcement` is the accessibility line
    /// ("Now showing: {title}").
    SlideChanged { index: usize, announcement: String },
    /// The logical auto-play flag flipped.
    AutoPlay { enabled: bool },
    /// Transient notification for the toast layer.
    Notice { message: String, severity: Severity },
}

// =============================================================================
// TESTS
// =============================================================================
