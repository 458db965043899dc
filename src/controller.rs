//! DeckController - position and auto-advance state machine.
//!
//! Owns the current slide index, the logical auto-play flag and the (at
//! most one) armed [`AutoClock`]. Every input source funnels into the
//! operations here; nothing else mutates deck state.
//!
//! Auto-play states: Idle, Playing, Paused.
//! - Idle -> Playing on `start_autoplay`
//! - Playing -> Paused on `pause_autoplay` (hover enter, terminal focus lost)
//! - Paused -> Playing on `resume_autoplay` (hover leave, focus regained),
//!   only while the logical flag is still set
//! - Playing/Paused -> Idle on `stop_autoplay` (explicit toggle, Escape, or
//!   a tick that would run past the last slide)
//!
//! # API
//!
//! - `go_to` / `next` / `prev` / `jump_to` / `jump_to_title` - navigation
//! - `toggle_autoplay` / `start_autoplay` / `stop_autoplay` - logical flag
//! - `pause_autoplay` / `resume_autoplay` - clock only, flag untouched
//! - `tick` / `drain_ticks` - apply elapsed auto-advance intervals
//! - `restart` - back to slide 0, interval restarted
//! - `controls` - pure UI-sync snapshot
//! - `current_info` - index, title, company, kind classification
//! - `on_event(handler)` - subscribe to [`DeckEvent`]s, returns cleanup
//!
//! # Example
//!
//! ```ignore
//! use deckhand::{Deck, DeckController};
//! use std::time::Duration;
//!
//! let (slides, _) = Deck::parse("# One\n---\n# Two\n", None);
//! let controller = DeckController::new(Deck::new(slides).unwrap(), Duration::from_secs(5));
//!
//! let cleanup = controller.on_event(|event| {
//!     // repaint, toast, announce...
//! });
//! controller.next();
//! cleanup();
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use spark_signals::{Signal, signal};

use crate::autoplay::AutoClock;
use crate::deck::{Deck, Slide};
use crate::types::{DeckEvent, Severity};

// =============================================================================
// TYPES
// =============================================================================

/// Snapshot of everything the control surface shows.
///
/// Pure data derived from controller state; recomputed after every
/// state-affecting operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    /// 1-based position, as displayed ("4").
    pub counter: String,
    pub total: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// Accessible labels, reflecting the disabled state.
    pub prev_label: &'static str,
    pub next_label: &'static str,
    /// Toggle face text: "Auto: ON" / "Auto: OFF".
    pub auto_label: &'static str,
    /// Accessible label for the toggle.
    pub auto_hint: &'static str,
    /// Toggle renders emphasized while auto-play is on.
    pub auto_emphasis: bool,
    /// Container-level auto-playing marker.
    pub auto_playing: bool,
}

/// What `current_info` reports about the slide on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideInfo {
    pub index: usize,
    pub title: String,
    pub company: String,
    /// Type classification from the `:kind` directive, "other" when untagged.
    pub kind: String,
}

type Listener = Box<dyn Fn(&DeckEvent)>;

// =============================================================================
// CONTROLLER
// =============================================================================

/// The deck's single source of truth. Constructed once and handed to the
/// input wiring; single-threaded by design (the clock thread only touches
/// atomics, all mutation happens through these methods on one thread).
pub struct DeckController {
    deck: Deck,
    interval: Duration,
    current: Signal<usize>,
    auto: Signal<bool>,
    clock: RefCell<Option<AutoClock>>,
    listeners: Rc<RefCell<Vec<(usize, Listener)>>>,
    next_listener_id: Cell<usize>,
}

impl DeckController {
    /// Create a controller at slide 0, auto-play off.
    pub fn new(deck: Deck, interval: Duration) -> Self {
        Self {
            deck,
            interval,
            current: signal(0),
            auto: signal(false),
            clock: RefCell::new(None),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener_id: Cell::new(0),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current.get()
    }

    /// Logical auto-play flag (true even while paused by hover/focus loss).
    pub fn is_autoplaying(&self) -> bool {
        self.auto.get()
    }

    /// Whether a timer is actually armed right now.
    pub fn is_clock_armed(&self) -> bool {
        self.clock.borrow().is_some()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn current_slide(&self) -> &Slide {
        // current is always in range
        self.deck
            .slide(self.current.get())
            .expect("current index in range")
    }

    /// Index, title, company and kind classification of the current slide.
    pub fn current_info(&self) -> SlideInfo {
        let slide = self.current_slide();
        SlideInfo {
            index: self.current.get(),
            title: slide.title.clone().unwrap_or_default(),
            company: slide.company.clone().unwrap_or_default(),
            kind: slide.kind.clone().unwrap_or_else(|| "other".to_string()),
        }
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Go to a 0-based index. Out-of-range or equal-to-current requests are
    /// silent no-ops: navigation is advisory, not authoritative.
    pub fn go_to(&self, index: usize) {
        let cur = self.current.get();
        if index >= self.deck.len() || index == cur {
            return;
        }

        self.current.set(index);
        self.emit(&DeckEvent::Refresh);

        let announcement = format!("Now showing: {}", self.title_or_number(index));
        self.emit(&DeckEvent::SlideChanged { index, announcement });
    }

    /// Advance one slide. No-op at the last index.
    pub fn next(&self) {
        let cur = self.current.get();
        if cur + 1 < self.deck.len() {
            self.go_to(cur + 1);
        }
    }

    /// Go back one slide. No-op at index 0.
    pub fn prev(&self) {
        let cur = self.current.get();
        if cur > 0 {
            self.go_to(cur - 1);
        }
    }

    /// 1-based jump. Out-of-range is a no-op.
    pub fn jump_to(&self, number: usize) {
        if number >= 1 {
            self.go_to(number - 1);
        }
    }

    /// Navigate to the first slide whose title contains `needle`,
    /// case-insensitively. No-op when nothing matches.
    pub fn jump_to_title(&self, needle: &str) {
        if let Some(index) = self
            .deck
            .slides()
            .iter()
            .position(|slide| slide.title_matches(needle))
        {
            self.go_to(index);
        }
    }

    // -------------------------------------------------------------------------
    // Auto-play
    // -------------------------------------------------------------------------

    pub fn toggle_autoplay(&self) {
        if self.auto.get() {
            self.stop_autoplay();
        } else {
            self.start_autoplay();
        }
    }

    /// Set the logical flag and arm the clock.
    pub fn start_autoplay(&self) {
        self.auto.set(true);
        self.resume_autoplay();
        self.emit(&DeckEvent::Refresh);
        self.emit(&DeckEvent::AutoPlay { enabled: true });
        self.notify(
            "Auto-advance enabled. Press ESC or Space to stop.",
            Severity::Success,
        );
    }

    /// Clear the logical flag and disarm the clock.
    pub fn stop_autoplay(&self) {
        self.auto.set(false);
        self.pause_autoplay();
        self.emit(&DeckEvent::Refresh);
        self.emit(&DeckEvent::AutoPlay { enabled: false });
        self.notify("Auto-advance disabled.", Severity::Info);
    }

    /// Disarm the clock without touching the logical flag.
    pub fn pause_autoplay(&self) {
        if let Some(clock) = self.clock.borrow_mut().take() {
            clock.disarm();
        }
    }

    /// Re-arm the clock if the logical flag is set and no clock is armed.
    /// Idempotent: never arms a second clock.
    pub fn resume_autoplay(&self) {
        if !self.auto.get() {
            return;
        }
        let mut clock = self.clock.borrow_mut();
        if clock.is_none() {
            *clock = Some(AutoClock::arm(self.interval));
        }
    }

    /// Apply one auto-advance tick. Returns false when the tick stopped
    /// auto-play (the deck was already on its last slide).
    pub fn tick(&self) -> bool {
        let cur = self.current.get();
        if cur + 1 < self.deck.len() {
            self.next();
            true
        } else {
            self.stop_autoplay();
            self.notify(
                "Reached end of slideshow. Auto-advance stopped.",
                Severity::Info,
            );
            false
        }
    }

    /// Drain elapsed clock intervals and apply them. Called from the event
    /// loop so every mutation stays on the loop's thread.
    pub fn drain_ticks(&self) {
        // Release the clock borrow before ticking: tick() may disarm.
        let pending = self
            .clock
            .borrow()
            .as_ref()
            .map(AutoClock::take_ticks)
            .unwrap_or(0);
        for _ in 0..pending {
            if !self.tick() {
                break;
            }
        }
    }

    /// Back to slide 0. If playing, the clock is re-armed so the interval
    /// restarts from zero.
    pub fn restart(&self) {
        self.go_to(0);
        if self.auto.get() {
            self.pause_autoplay();
            self.resume_autoplay();
        }
        self.notify("Slideshow restarted", Severity::Info);
    }

    // -------------------------------------------------------------------------
    // UI sync
    // -------------------------------------------------------------------------

    /// Snapshot for the control surface.
    pub fn controls(&self) -> Controls {
        let cur = self.current.get();
        let total = self.deck.len();
        let auto = self.auto.get();
        let at_first = cur == 0;
        let at_last = cur == total - 1;

        Controls {
            counter: (cur + 1).to_string(),
            total,
            prev_enabled: !at_first,
            next_enabled: !at_last,
            prev_label: if at_first {
                "Previous slide (disabled)"
            } else {
                "Previous slide"
            },
            next_label: if at_last {
                "Next slide (disabled)"
            } else {
                "Next slide"
            },
            auto_label: if auto { "Auto: ON" } else { "Auto: OFF" },
            auto_hint: if auto {
                "Disable auto-advance (currently ON)"
            } else {
                "Enable auto-advance (currently OFF)"
            },
            auto_emphasis: auto,
            auto_playing: auto,
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Subscribe to controller events. Returns a cleanup function.
    ///
    /// Handlers may call back into the controller but must not register or
    /// unregister listeners while an event is being dispatched.
    ///
    /// The cleanup closure holds its own handle to the listener list, so it
    /// does not borrow the controller and may outlive callers' borrows.
    pub fn on_event<F>(&self, handler: F) -> impl FnOnce() + use<F>
    where
        F: Fn(&DeckEvent) + 'static,
    {
        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Box::new(handler)));

        let listeners = Rc::clone(&self.listeners);
        move || {
            listeners
                .borrow_mut()
                .retain(|(listener_id, _)| *listener_id != id);
        }
    }

    fn emit(&self, event: &DeckEvent) {
        for (_, listener) in self.listeners.borrow().iter() {
            listener(event);
        }
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.emit(&DeckEvent::Notice {
            message: message.to_string(),
            severity,
        });
    }

    fn title_or_number(&self, index: usize) -> String {
        self.deck
            .slide(index)
            .and_then(|slide| slide.title.clone())
            .unwrap_or_else(|| format!("Slide {}", index + 1))
    }
}

impl Drop for DeckController {
    fn drop(&mut self) {
        // Teardown cancels the timer; nothing persists.
        if let Some(clock) = self.clock.borrow_mut().take() {
            clock.disarm();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// A deck of `n` untitled slides.
    fn deck_of(n: usize) -> Deck {
        let src = vec!["body\n"; n].join("---\n");
        let (slides, _) = Deck::parse(&src, None);
        Deck::new(slides).unwrap()
    }

    fn controller_of(n: usize) -> DeckController {
        DeckController::new(deck_of(n), Duration::from_secs(60))
    }

    const TITLED: &str = "\
# Opening
@ Deep Media
:kind detection
---
# Midjourney v6
:kind generator
---
# DALL-E 3
:kind generator
---
# Closing
";

    fn titled_controller() -> DeckController {
        let (slides, _) = Deck::parse(TITLED, None);
        DeckController::new(Deck::new(slides).unwrap(), Duration::from_secs(60))
    }

    #[test]
    fn test_go_to_reaches_every_valid_index() {
        let c = controller_of(6);
        for index in (0..6).rev() {
            c.go_to(index);
            assert_eq!(c.current_index(), index);
        }
    }

    #[test]
    fn test_out_of_range_and_same_index_are_noops() {
        let c = controller_of(6);
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let _cleanup = c.on_event(move |_| count_clone.set(count_clone.get() + 1));

        c.go_to(6); // out of range
        c.go_to(0); // equal to current
        assert_eq!(c.current_index(), 0);
        assert_eq!(count.get(), 0); // no events fired

        c.go_to(3);
        assert_eq!(c.current_index(), 3);
        assert!(count.get() > 0);
    }

    #[test]
    fn test_next_walks_to_last_then_noops() {
        let c = controller_of(6);
        for _ in 0..5 {
            c.next();
        }
        assert_eq!(c.current_index(), 5);
        c.next(); // one more is a no-op
        assert_eq!(c.current_index(), 5);
    }

    #[test]
    fn test_prev_noop_at_first() {
        let c = controller_of(3);
        c.prev();
        assert_eq!(c.current_index(), 0);
        c.go_to(2);
        c.prev();
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn test_jump_is_one_based() {
        let c = controller_of(6);
        c.jump_to(4);
        assert_eq!(c.current_index(), 3);
        c.jump_to(0); // below range
        assert_eq!(c.current_index(), 3);
        c.jump_to(7); // above range
        assert_eq!(c.current_index(), 3);
    }

    #[test]
    fn test_jump_scenario_controls() {
        // 6 slides, start at 0, jump_to(4): counter "4", both buttons enabled
        let c = controller_of(6);
        c.jump_to(4);
        let controls = c.controls();
        assert_eq!(controls.counter, "4");
        assert!(controls.prev_enabled);
        assert!(controls.next_enabled);
    }

    #[test]
    fn test_last_slide_controls() {
        let c = controller_of(6);
        c.go_to(5);
        c.next();
        let controls = c.controls();
        assert_eq!(c.current_index(), 5);
        assert!(!controls.next_enabled);
        assert_eq!(controls.next_label, "Next slide (disabled)");
        assert_eq!(controls.prev_label, "Previous slide");
    }

    #[test]
    fn test_jump_to_title_case_insensitive() {
        let c = titled_controller();
        c.jump_to_title("midjourney");
        assert_eq!(c.current_index(), 1);
        c.jump_to_title("DALL-E");
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn test_jump_to_title_no_match_is_noop() {
        let c = titled_controller();
        c.go_to(3);
        c.jump_to_title("stable diffusion");
        assert_eq!(c.current_index(), 3);
    }

    #[test]
    fn test_toggle_twice_returns_to_idle() {
        let c = controller_of(6);
        assert!(!c.is_autoplaying());
        c.toggle_autoplay();
        assert!(c.is_autoplaying());
        assert!(c.is_clock_armed());
        c.toggle_autoplay();
        assert!(!c.is_autoplaying());
        assert!(!c.is_clock_armed()); // no live timer after returning to Idle
    }

    #[test]
    fn test_pause_resume_keep_logical_flag() {
        let c = controller_of(6);
        c.start_autoplay();

        c.pause_autoplay();
        assert!(c.is_autoplaying());
        assert!(!c.is_clock_armed());

        c.resume_autoplay();
        assert!(c.is_clock_armed());
    }

    #[test]
    fn test_resume_is_idempotent() {
        let c = controller_of(6);
        c.start_autoplay();
        // Resuming while armed must not replace the clock
        let before = c.clock.borrow().as_ref().map(|clock| clock.is_running());
        c.resume_autoplay();
        c.resume_autoplay();
        let after = c.clock.borrow().as_ref().map(|clock| clock.is_running());
        assert_eq!(before, after);
        assert!(c.is_clock_armed());
    }

    #[test]
    fn test_resume_without_flag_is_noop() {
        let c = controller_of(6);
        c.resume_autoplay();
        assert!(!c.is_clock_armed());
    }

    #[test]
    fn test_three_ticks_advance_three_slides() {
        let c = controller_of(6);
        c.start_autoplay();
        for _ in 0..3 {
            assert!(c.tick());
        }
        assert_eq!(c.current_index(), 3);
        assert!(c.is_autoplaying());
    }

    #[test]
    fn test_drain_applies_queued_ticks_and_stops_at_end() {
        // 6 slides on a 10 ms clock; sleeping queues far more ticks than
        // the deck has slides left
        let c = DeckController::new(deck_of(6), Duration::from_millis(10));
        c.start_autoplay();

        let end_notices = Rc::new(Cell::new(0));
        let end_clone = end_notices.clone();
        let _cleanup = c.on_event(move |event| {
            if let DeckEvent::Notice { message, .. } = event {
                if message.starts_with("Reached end") {
                    end_clone.set(end_clone.get() + 1);
                }
            }
        });

        std::thread::sleep(Duration::from_millis(200));
        c.drain_ticks();

        assert_eq!(c.current_index(), 5);
        assert!(!c.is_autoplaying());
        assert!(!c.is_clock_armed());
        assert_eq!(end_notices.get(), 1);
    }

    #[test]
    fn test_drain_without_clock_is_noop() {
        let c = controller_of(4);
        c.drain_ticks();
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_tick_at_last_slide_stops_with_one_notice() {
        let c = controller_of(2);
        c.go_to(1);
        c.start_autoplay();

        let end_notices = Rc::new(Cell::new(0));
        let end_clone = end_notices.clone();
        let _cleanup = c.on_event(move |event| {
            if let DeckEvent::Notice { message, .. } = event {
                if message.starts_with("Reached end") {
                    end_clone.set(end_clone.get() + 1);
                }
            }
        });

        assert!(!c.tick());
        assert!(!c.is_autoplaying());
        assert!(!c.is_clock_armed());
        assert_eq!(end_notices.get(), 1);
    }

    #[test]
    fn test_restart_goes_home_and_rearms() {
        let c = controller_of(6);
        c.go_to(4);
        c.start_autoplay();

        let restarted = Rc::new(Cell::new(false));
        let restarted_clone = restarted.clone();
        let _cleanup = c.on_event(move |event| {
            if let DeckEvent::Notice { message, .. } = event {
                if message == "Slideshow restarted" {
                    restarted_clone.set(true);
                }
            }
        });

        c.restart();
        assert_eq!(c.current_index(), 0);
        assert!(c.is_autoplaying());
        assert!(c.is_clock_armed());
        assert!(restarted.get());
    }

    #[test]
    fn test_announcement_falls_back_to_slide_number() {
        let c = controller_of(3);
        let announced = Rc::new(RefCell::new(String::new()));
        let announced_clone = announced.clone();
        let _cleanup = c.on_event(move |event| {
            if let DeckEvent::SlideChanged { announcement, .. } = event {
                *announced_clone.borrow_mut() = announcement.clone();
            }
        });

        c.go_to(1);
        assert_eq!(&*announced.borrow(), "Now showing: Slide 2");
    }

    #[test]
    fn test_announcement_uses_title() {
        let c = titled_controller();
        let announced = Rc::new(RefCell::new(String::new()));
        let announced_clone = announced.clone();
        let _cleanup = c.on_event(move |event| {
            if let DeckEvent::SlideChanged { announcement, .. } = event {
                *announced_clone.borrow_mut() = announcement.clone();
            }
        });

        c.go_to(1);
        assert_eq!(&*announced.borrow(), "Now showing: Midjourney v6");
    }

    #[test]
    fn test_controls_auto_labels() {
        let c = controller_of(2);
        assert_eq!(c.controls().auto_label, "Auto: OFF");
        assert_eq!(c.controls().auto_hint, "Enable auto-advance (currently OFF)");
        assert!(!c.controls().auto_playing);

        c.start_autoplay();
        let controls = c.controls();
        assert_eq!(controls.auto_label, "Auto: ON");
        assert_eq!(controls.auto_hint, "Disable auto-advance (currently ON)");
        assert!(controls.auto_emphasis);
        assert!(controls.auto_playing);
    }

    #[test]
    fn test_current_info_classification() {
        let c = titled_controller();
        let info = c.current_info();
        assert_eq!(info.index, 0);
        assert_eq!(info.title, "Opening");
        assert_eq!(info.company, "Deep Media");
        assert_eq!(info.kind, "detection");

        c.go_to(3);
        assert_eq!(c.current_info().kind, "other"); // untagged slide
        assert_eq!(c.current_info().company, "");
    }

    #[test]
    fn test_listener_cleanup_stops_delivery() {
        let c = controller_of(4);
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let cleanup = c.on_event(move |_| count_clone.set(count_clone.get() + 1));

        c.next();
        let seen = count.get();
        assert!(seen > 0);

        cleanup();
        c.next();
        assert_eq!(count.get(), seen);
    }

    #[test]
    fn test_start_and_stop_notices() {
        let c = controller_of(4);
        let notices = Rc::new(RefCell::new(Vec::new()));
        let notices_clone = notices.clone();
        let _cleanup = c.on_event(move |event| {
            if let DeckEvent::Notice { message, severity } = event {
                notices_clone.borrow_mut().push((message.clone(), *severity));
            }
        });

        c.start_autoplay();
        c.stop_autoplay();

        let notices = notices.borrow();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].1, Severity::Success);
        assert!(notices[0].0.starts_with("Auto-advance enabled"));
        assert_eq!(notices[1], ("Auto-advance disabled.".to_string(), Severity::Info));
    }
}
