//! Application shell: terminal session and the event loop.
//!
//! Owns the terminal (raw mode, alternate screen, mouse capture) and routes
//! input to the [`DeckController`]. All deck transitions happen on this
//! thread; the auto-advance clock only queues ticks, which the loop drains
//! between input events.
//!
//! If the terminal refuses mouse capture the app degrades to keyboard-only
//! control and says so once via a toast.

use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, Show},
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute, terminal,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::controller::DeckController;
use crate::deck::Block;
use crate::error::DeckError;
use crate::input::{poll_event, InputEvent};
use crate::state::{action_for, Action, Gesture, GestureTracker, HoverChange, HoverTracker, SWIPE_THRESHOLD};
use crate::types::{DeckEvent, Severity};
use crate::ui::{draw, HelpModal, HitRegions, ToastHost};

/// Input poll timeout. Short enough that queued auto-advance ticks and
/// toast animation stay responsive.
const FRAME: Duration = Duration::from_millis(16);

// =============================================================================
// CLICK ROUTING
// =============================================================================

/// Where a click landed, resolved against the last frame's hit regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Prev,
    Next,
    Auto,
    /// Block index of a placeholder line inside the current slide.
    Placeholder(usize),
    Nothing,
}

pub fn route_click(x: u16, y: u16, regions: &HitRegions) -> ClickTarget {
    if regions.prev.contains(x, y) {
        return ClickTarget::Prev;
    }
    if regions.next.contains(x, y) {
        return ClickTarget::Next;
    }
    if regions.auto.contains(x, y) {
        return ClickTarget::Auto;
    }
    for (rect, block_index) in &regions.placeholders {
        if rect.contains(x, y) {
            return ClickTarget::Placeholder(*block_index);
        }
    }
    ClickTarget::Nothing
}

/// Apply a keyboard action to the controller. Returns `true` to quit.
pub fn dispatch(controller: &DeckController, action: Action) -> bool {
    match action {
        Action::Prev => controller.prev(),
        Action::Next => controller.next(),
        Action::First => controller.go_to(0),
        Action::Last => controller.go_to(controller.len().saturating_sub(1)),
        Action::Jump(number) => controller.jump_to(number),
        Action::ToggleAuto => controller.toggle_autoplay(),
        Action::StopAuto => {
            if controller.is_autoplaying() {
                controller.stop_autoplay();
            }
        }
        Action::Restart => controller.restart(),
        Action::Quit => return true,
        Action::None => {}
    }
    false
}

// =============================================================================
// APP
// =============================================================================

/// Shared state written by the controller's event listener and read by the
/// event loop.
#[derive(Default)]
struct Feed {
    dirty: Cell<bool>,
    announcement: RefCell<String>,
    notices: RefCell<Vec<(String, Severity)>>,
}

pub struct App {
    controller: DeckController,
    toasts: ToastHost,
    modal: Option<HelpModal>,
    gestures: GestureTracker,
    hover: HoverTracker,
    regions: HitRegions,
    feed: Rc<Feed>,
    mouse_capture: bool,
    start_playing: bool,
}

impl App {
    pub fn new(controller: DeckController) -> Self {
        Self {
            controller,
            toasts: ToastHost::new(),
            modal: None,
            gestures: GestureTracker::new(SWIPE_THRESHOLD),
            hover: HoverTracker::new(),
            regions: HitRegions::default(),
            feed: Rc::new(Feed::default()),
            mouse_capture: false,
            start_playing: false,
        }
    }

    /// Queue a toast before the loop starts (deck load warnings).
    pub fn startup_notice(&mut self, message: impl Into<String>, severity: Severity) {
        self.toasts.show(message, severity);
    }

    /// Start auto-play once the event loop is wired, so the "enabled"
    /// notice lands in the feed instead of firing before anyone listens.
    pub fn autoplay_on_start(&mut self) {
        self.start_playing = true;
    }

    /// Subscribe the feed to controller events and apply deferred startup
    /// actions. Returns the listener cleanup.
    fn wire(&mut self) -> impl FnOnce() + use<> {
        let feed = Rc::clone(&self.feed);
        let unsubscribe = self.controller.on_event(move |event| {
            feed.dirty.set(true);
            match event {
                DeckEvent::SlideChanged { announcement, .. } => {
                    *feed.announcement.borrow_mut() = announcement.clone();
                }
                DeckEvent::Notice { message, severity } => {
                    feed.notices.borrow_mut().push((message.clone(), *severity));
                }
                DeckEvent::Refresh | DeckEvent::AutoPlay { .. } => {}
            }
        });

        if std::mem::take(&mut self.start_playing) {
            self.controller.start_autoplay();
        }
        unsubscribe
    }

    pub fn run(mut self) -> Result<(), DeckError> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, Hide, EnableFocusChange)?;

        // Some terminals reject mouse reporting. Keyboard still works.
        self.mouse_capture = execute!(stdout, EnableMouseCapture).is_ok();
        if !self.mouse_capture {
            self.toasts.show(
                "Mouse input unavailable. Keyboard controls remain active.",
                Severity::Info,
            );
        }

        let result = self.event_loop(&mut stdout);

        if self.controller.is_autoplaying() {
            self.controller.stop_autoplay();
        }
        if self.mouse_capture {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        let _ = execute!(stdout, DisableFocusChange, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();

        result
    }

    fn event_loop<W: Write>(&mut self, out: &mut W) -> Result<(), DeckError> {
        let unsubscribe = self.wire();

        let (mut width, mut height) = terminal::size()?;
        self.feed.dirty.set(true);

        loop {
            self.controller.drain_ticks();

            for (message, severity) in self.feed.notices.borrow_mut().drain(..) {
                self.toasts.show(message, severity);
            }

            let now = Instant::now();
            if self.toasts.tick(now) {
                self.feed.dirty.set(true);
            }

            if self.feed.dirty.replace(false) {
                self.regions = draw(
                    out,
                    width,
                    height,
                    self.controller.current_slide(),
                    &self.controller.controls(),
                    &self.feed.announcement.borrow(),
                    self.toasts.current(),
                    self.modal.as_ref(),
                    now,
                )?;
            }

            let Some(event) = poll_event(FRAME)? else {
                continue;
            };

            match event {
                InputEvent::Key(key) => {
                    if let Some(modal) = &self.modal {
                        if modal.handle_key(&key) {
                            self.modal = None;
                            self.feed.dirty.set(true);
                        }
                        continue;
                    }
                    if dispatch(&self.controller, action_for(&key)) {
                        break;
                    }
                }
                InputEvent::PointerDown { x, y } => {
                    if let Some(modal) = &self.modal {
                        let layout = modal.layout(width, height);
                        if modal.handle_click(x, y, &layout) {
                            self.modal = None;
                            self.feed.dirty.set(true);
                        }
                        continue;
                    }
                    self.gestures.press(x, y);
                }
                InputEvent::PointerUp { x, y } => {
                    if self.modal.is_some() {
                        continue;
                    }
                    match self.gestures.release(x, y) {
                        Some(Gesture::SwipeLeft) => self.controller.next(),
                        Some(Gesture::SwipeRight) => self.controller.prev(),
                        Some(Gesture::Click { x, y }) => self.click(x, y),
                        None => {}
                    }
                }
                InputEvent::PointerMove { x, y } => {
                    match self.hover.update(x, y, self.regions.viewport) {
                        Some(HoverChange::Entered) => self.controller.pause_autoplay(),
                        Some(HoverChange::Left) => self.controller.resume_autoplay(),
                        None => {}
                    }
                }
                InputEvent::FocusLost => self.controller.pause_autoplay(),
                InputEvent::FocusGained => self.controller.resume_autoplay(),
                InputEvent::Resize(w, h) => {
                    width = w;
                    height = h;
                    self.feed.dirty.set(true);
                }
                InputEvent::None => {}
            }
        }

        unsubscribe();
        Ok(())
    }

    fn click(&mut self, x: u16, y: u16) {
        match route_click(x, y, &self.regions) {
            ClickTarget::Prev => self.controller.prev(),
            ClickTarget::Next => self.controller.next(),
            ClickTarget::Auto => self.controller.toggle_autoplay(),
            ClickTarget::Placeholder(block_index) => {
                let slide = self.controller.current_slide();
                if let Some(Block::Placeholder { id, instruction }) = slide.blocks.get(block_index)
                {
                    self.modal = Some(HelpModal::open(id.clone(), instruction.clone()));
                    self.feed.dirty.set(true);
                }
            }
            ClickTarget::Nothing => {}
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Deck;
    use crate::state::KeyboardEvent;
    use crate::types::Rect;

    fn controller(slides: usize) -> DeckController {
        let src = vec!["body\n"; slides].join("---\n");
        let (parsed, _) = Deck::parse(&src, None);
        DeckController::new(Deck::new(parsed).unwrap(), Duration::from_secs(5))
    }

    fn regions() -> HitRegions {
        HitRegions {
            viewport: Rect::new(0, 0, 80, 22),
            prev: Rect::new(2, 23, 6, 1),
            next: Rect::new(20, 23, 6, 1),
            auto: Rect::new(30, 23, 9, 1),
            placeholders: vec![(Rect::new(10, 5, 20, 1), 2)],
        }
    }

    #[test]
    fn test_route_click_targets() {
        let r = regions();
        assert_eq!(route_click(3, 23, &r), ClickTarget::Prev);
        assert_eq!(route_click(21, 23, &r), ClickTarget::Next);
        assert_eq!(route_click(30, 23, &r), ClickTarget::Auto);
        assert_eq!(route_click(15, 5, &r), ClickTarget::Placeholder(2));
        assert_eq!(route_click(0, 10, &r), ClickTarget::Nothing);
    }

    #[test]
    fn test_dispatch_navigation() {
        let c = controller(5);
        assert!(!dispatch(&c, Action::Next));
        assert_eq!(c.current_index(), 1);
        dispatch(&c, Action::Last);
        assert_eq!(c.current_index(), 4);
        dispatch(&c, Action::First);
        assert_eq!(c.current_index(), 0);
        dispatch(&c, Action::Jump(3));
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn test_dispatch_quit() {
        let c = controller(2);
        assert!(dispatch(&c, Action::Quit));
    }

    #[test]
    fn test_escape_is_noop_when_not_playing() {
        let c = controller(3);
        dispatch(&c, Action::StopAuto);
        assert!(!c.is_autoplaying());

        dispatch(&c, Action::ToggleAuto);
        assert!(c.is_autoplaying());
        dispatch(&c, Action::StopAuto);
        assert!(!c.is_autoplaying());
    }

    #[test]
    fn test_autoplay_on_start_notice_reaches_feed() {
        let mut app = App::new(controller(3));
        app.autoplay_on_start();
        let _cleanup = app.wire();

        assert!(app.controller.is_autoplaying());
        let notices = app.feed.notices.borrow();
        assert!(
            notices
                .iter()
                .any(|(message, _)| message.starts_with("Auto-advance enabled"))
        );
    }

    #[test]
    fn test_wire_does_not_start_autoplay_by_default() {
        let mut app = App::new(controller(3));
        let _cleanup = app.wire();
        assert!(!app.controller.is_autoplaying());
        assert!(app.feed.notices.borrow().is_empty());
    }

    #[test]
    fn test_cleanup_handle_outlives_controller_borrows() {
        // The listener cleanup must not keep the app borrowed while the
        // loop mutates it
        let mut app = App::new(controller(3));
        let cleanup = app.wire();
        app.click(0, 0);
        app.controller.next();
        cleanup();
        assert_eq!(app.controller.current_index(), 1);
    }

    #[test]
    fn test_escape_key_maps_through_dispatch() {
        let c = controller(3);
        c.start_autoplay();
        let action = action_for(&KeyboardEvent::new("Escape"));
        dispatch(&c, action);
        assert!(!c.is_autoplaying());
        assert!(!c.is_clock_armed());
    }
}
