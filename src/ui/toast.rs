//! Notification toast.
//!
//! At most one toast exists at a time; showing a new one replaces whatever
//! is on screen. A toast slides in, holds for about three seconds, slides
//! back out and expires. Severity maps directly to a color token
//! (see [`Severity::color`](crate::types::Severity::color)).

use std::time::{Duration, Instant};

use crate::types::Severity;

/// How long a toast stays fully visible.
pub const HOLD: Duration = Duration::from_millis(3000);
/// Duration of each slide transition.
pub const SLIDE: Duration = Duration::from_millis(300);

// =============================================================================
// TOAST
// =============================================================================

/// Animation phase, derived from elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    SlideIn,
    Hold,
    SlideOut,
}

/// One transient notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    shown_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            shown_at: Instant::now(),
        }
    }

    /// Current phase, or `None` once the toast has fully slid out.
    pub fn phase(&self, now: Instant) -> Option<ToastPhase> {
        let elapsed = now.saturating_duration_since(self.shown_at);
        if elapsed < SLIDE {
            Some(ToastPhase::SlideIn)
        } else if elapsed < SLIDE + HOLD {
            Some(ToastPhase::Hold)
        } else if elapsed < SLIDE + HOLD + SLIDE {
            Some(ToastPhase::SlideOut)
        } else {
            None
        }
    }

    /// Horizontal offset (cells pushed off the right edge) for the slide
    /// animation. Zero while holding, up to `width` at either end.
    pub fn offset(&self, now: Instant, width: u16) -> u16 {
        let elapsed = now.saturating_duration_since(self.shown_at);
        let fraction = match self.phase(now) {
            Some(ToastPhase::SlideIn) => {
                1.0 - elapsed.as_secs_f32() / SLIDE.as_secs_f32()
            }
            Some(ToastPhase::Hold) => 0.0,
            Some(ToastPhase::SlideOut) => {
                let out = elapsed - SLIDE - HOLD;
                out.as_secs_f32() / SLIDE.as_secs_f32()
            }
            None => 1.0,
        };
        (fraction * width as f32).round() as u16
    }

    #[cfg(test)]
    fn backdate(mut self, by: Duration) -> Self {
        self.shown_at -= by;
        self
    }
}

// =============================================================================
// HOST
// =============================================================================

/// Owns the single toast slot.
#[derive(Debug, Default)]
pub struct ToastHost {
    current: Option<Toast>,
}

impl ToastHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast, replacing any currently visible one.
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) {
        self.current = Some(Toast::new(message, severity));
    }

    /// Drop the toast once it has expired. Returns true when the screen
    /// needs a repaint (the toast is animating or just vanished).
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(toast) => match toast.phase(now) {
                Some(ToastPhase::Hold) => false,
                Some(_) => true,
                None => {
                    self.current = None;
                    true
                }
            },
            None => false,
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}

// =============================================================================
// TESTS
// =============================================================================
