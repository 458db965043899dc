//! Terminal renderer for the deck.
//!
//! Draws one frame: slide viewport, announcer line, control bar, then any
//! toast or modal overlay. Everything is written through a generic
//! `io::Write`, so frames can be rendered into a buffer for tests.
//!
//! The renderer is a pure consumer: it reads [`Controls`] and [`Slide`]
//! snapshots and reports [`HitRegions`] back so the app can route clicks.
//! It never calls into the controller.

use std::io::{self, Write};
use std::time::Instant;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use unicode_width::UnicodeWidthStr;

use crate::controller::Controls;
use crate::deck::{Block, Slide};
use crate::types::{Rect, SpanStyle};
use crate::ui::modal::HelpModal;
use crate::ui::toast::Toast;

// =============================================================================
// TYPES
// =============================================================================

/// Clickable regions produced by the last frame.
#[derive(Debug, Clone, Default)]
pub struct HitRegions {
    /// The slide viewport (hover over this pauses auto-play).
    pub viewport: Rect,
    pub prev: Rect,
    pub next: Rect,
    pub auto: Rect,
    /// Placeholder lines, paired with the block index inside the slide.
    pub placeholders: Vec<(Rect, usize)>,
}

/// One control-bar segment with its resolved geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
    pub rect: Rect,
    pub enabled: bool,
    pub emphasized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Prev,
    Counter,
    Next,
    Auto,
}

// =============================================================================
// CONTROL BAR LAYOUT
// =============================================================================

/// Lay out the control bar left to right:
/// `◀ Prev   n / N   Next ▶   Auto: ON/OFF`
pub fn control_bar(controls: &Controls, width: u16, y: u16) -> Vec<Segment> {
    let counter_text = format!("{} / {}", controls.counter, controls.total);
    let specs = [
        (SegmentKind::Prev, "◀ Prev".to_string(), controls.prev_enabled, false),
        (SegmentKind::Counter, counter_text, true, false),
        (SegmentKind::Next, "Next ▶".to_string(), controls.next_enabled, false),
        (
            SegmentKind::Auto,
            controls.auto_label.to_string(),
            true,
            controls.auto_emphasis,
        ),
    ];

    let mut segments = Vec::with_capacity(specs.len());
    let mut x: u16 = 2;
    for (kind, text, enabled, emphasized) in specs {
        let text_width = text.width() as u16;
        if x + text_width > width {
            break; // terminal too narrow for the rest of the bar
        }
        segments.push(Segment {
            kind,
            rect: Rect::new(x, y, text_width, 1),
            text,
            enabled,
            emphasized,
        });
        x += text_width + 3;
    }
    segments
}

// =============================================================================
// TEXT HELPERS
// =============================================================================

/// Truncate to a display width, appending an ellipsis when cut.
pub fn truncate(text: &str, max_width: u16) -> String {
    if text.width() as u16 <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(1) as usize;
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.to_string().width();
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Column that centers `text` in a line of `width` cells.
pub fn centered_x(text: &str, width: u16) -> u16 {
    let text_width = text.width() as u16;
    width.saturating_sub(text_width) / 2
}

fn apply_style<W: Write>(out: &mut W, style: SpanStyle) -> io::Result<()> {
    if style.contains(SpanStyle::BOLD) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.contains(SpanStyle::DIM) {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if style.contains(SpanStyle::ITALIC) {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if style.contains(SpanStyle::UNDERLINE) {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if style.contains(SpanStyle::REVERSE) {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

fn print_span<W: Write>(
    out: &mut W,
    x: u16,
    y: u16,
    text: &str,
    style: SpanStyle,
    fg: Option<Color>,
) -> io::Result<()> {
    queue!(out, MoveTo(x, y))?;
    apply_style(out, style)?;
    if let Some(color) = fg {
        queue!(out, SetForegroundColor(color))?;
    }
    queue!(out, Print(text), SetAttribute(Attribute::Reset), ResetColor)?;
    Ok(())
}

// =============================================================================
// FRAME
// =============================================================================

/// Draw one frame and report the clickable regions.
#[allow(clippy::too_many_arguments)]
pub fn draw<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    slide: &Slide,
    controls: &Controls,
    announcement: &str,
    toast: Option<&Toast>,
    modal: Option<&HelpModal>,
    now: Instant,
) -> io::Result<HitRegions> {
    queue!(out, Clear(ClearType::All))?;

    let bar_y = height.saturating_sub(1);
    let announcer_y = height.saturating_sub(2);
    let viewport = Rect::new(0, 0, width, height.saturating_sub(2));

    let mut regions = HitRegions {
        viewport,
        ..HitRegions::default()
    };

    draw_slide(out, slide, viewport, &mut regions)?;

    // Container-level auto-playing marker
    if controls.auto_playing {
        print_span(out, 1, 0, "▶ auto", SpanStyle::NONE, Some(Color::Green))?;
    }

    // Announcer line
    if !announcement.is_empty() {
        let line = truncate(announcement, width.saturating_sub(2));
        print_span(
            out,
            1,
            announcer_y,
            &line,
            SpanStyle::DIM | SpanStyle::ITALIC,
            None,
        )?;
    }

    // Control bar
    for segment in control_bar(controls, width, bar_y) {
        let style = if !segment.enabled {
            SpanStyle::DIM
        } else if segment.emphasized {
            SpanStyle::REVERSE | SpanStyle::BOLD
        } else {
            SpanStyle::NONE
        };
        print_span(out, segment.rect.x, segment.rect.y, &segment.text, style, None)?;
        match segment.kind {
            SegmentKind::Prev => regions.prev = segment.rect,
            SegmentKind::Next => regions.next = segment.rect,
            SegmentKind::Auto => regions.auto = segment.rect,
            SegmentKind::Counter => {}
        }
    }

    if let Some(toast) = toast {
        draw_toast(out, toast, width, now)?;
    }

    if let Some(modal) = modal {
        draw_modal(out, modal, width, height)?;
    }

    out.flush()?;
    Ok(regions)
}

fn draw_slide<W: Write>(
    out: &mut W,
    slide: &Slide,
    viewport: Rect,
    regions: &mut HitRegions,
) -> io::Result<()> {
    let width = viewport.width;
    let mut y = viewport.y + 1;
    let bottom = viewport.y + viewport.height;

    if let Some(title) = &slide.title {
        let title = truncate(title, width.saturating_sub(2));
        print_span(out, centered_x(&title, width), y, &title, SpanStyle::BOLD, None)?;
        y += 1;
    }
    if let Some(company) = &slide.company {
        let company = truncate(company, width.saturating_sub(2));
        print_span(out, centered_x(&company, width), y, &company, SpanStyle::DIM, None)?;
        y += 1;
    }
    y += 1;

    for (block_index, block) in slide.blocks.iter().enumerate() {
        if y >= bottom {
            break;
        }
        match block {
            Block::Text(text) => {
                let line = truncate(text, width.saturating_sub(8));
                print_span(out, 4, y, &line, SpanStyle::NONE, None)?;
            }
            Block::Placeholder { id, .. } => {
                let line = truncate(
                    &format!("[ image: {id} ] (click for replacement help)"),
                    width.saturating_sub(8),
                );
                let x = centered_x(&line, width);
                print_span(out, x, y, &line, SpanStyle::REVERSE, None)?;
                regions
                    .placeholders
                    .push((Rect::new(x, y, line.width() as u16, 1), block_index));
            }
            Block::Fallback(text) => {
                let line = truncate(&format!("! {text}"), width.saturating_sub(8));
                print_span(out, 4, y, &line, SpanStyle::DIM, Some(Color::Red))?;
            }
        }
        y += 1;
    }

    Ok(())
}

fn draw_toast<W: Write>(out: &mut W, toast: &Toast, width: u16, now: Instant) -> io::Result<()> {
    let text = format!(" {} ", toast.message);
    let toast_width = text.width() as u16;
    if toast.phase(now).is_none() || toast_width + 1 > width {
        return Ok(());
    }

    let offset = toast.offset(now, toast_width);
    let visible = toast_width.saturating_sub(offset);
    if visible == 0 {
        return Ok(());
    }
    let x = width.saturating_sub(visible).saturating_sub(1);

    let shown: String = text.chars().take(visible as usize).collect();
    queue!(
        out,
        MoveTo(x, 0),
        SetBackgroundColor(toast.severity.color()),
        SetForegroundColor(Color::White),
        Print(shown),
        ResetColor
    )?;
    Ok(())
}

fn draw_modal<W: Write>(out: &mut W, modal: &HelpModal, width: u16, height: u16) -> io::Result<()> {
    let layout = modal.layout(width, height);
    let frame = layout.frame;
    if frame.width < 4 || frame.height < 3 {
        return Ok(());
    }

    let inner = frame.width as usize - 2;
    let title = truncate(" Image Placeholder Help ", frame.width.saturating_sub(6));

    // Top border with title and close control
    let mut top = format!("┌{title}");
    while top.width() < frame.width as usize - 4 {
        top.push('─');
    }
    top.push_str("[x]┐");
    queue!(out, MoveTo(frame.x, frame.y), Print(top))?;

    // Body
    let lines = modal.lines();
    for row in 1..frame.height - 1 {
        let content = (row as usize)
            .checked_sub(2)
            .and_then(|line| lines.get(line))
            .map(|l| truncate(l, inner as u16 - 2))
            .unwrap_or_default();
        let padding = inner.saturating_sub(1 + content.width());
        let body = format!("│ {content}{}│", " ".repeat(padding));
        queue!(out, MoveTo(frame.x, frame.y + row), Print(body))?;
    }

    // Bottom border
    let bottom = format!("└{}┘", "─".repeat(inner));
    queue!(out, MoveTo(frame.x, frame.y + frame.height - 1), Print(bottom))?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::DeckController;
    use crate::deck::Deck;
    use std::time::Duration;

    fn six_slide_controls(at: usize) -> Controls {
        let src = vec!["# S\n"; 6].join("---\n");
        let (slides, _) = Deck::parse(&src, None);
        let controller = DeckController::new(Deck::new(slides).unwrap(), Duration::from_secs(5));
        controller.go_to(at);
        controller.controls()
    }

    #[test]
    fn test_control_bar_order_and_spacing() {
        let segments = control_bar(&six_slide_controls(2), 120, 30);
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].kind, SegmentKind::Prev);
        assert_eq!(segments[1].kind, SegmentKind::Counter);
        assert_eq!(segments[1].text, "3 / 6");
        assert_eq!(segments[2].kind, SegmentKind::Next);
        assert_eq!(segments[3].kind, SegmentKind::Auto);
        assert_eq!(segments[3].text, "Auto: OFF");

        // Segments never overlap
        for pair in segments.windows(2) {
            assert!(pair[1].rect.x > pair[0].rect.x + pair[0].rect.width);
        }
    }

    #[test]
    fn test_control_bar_disabled_states() {
        let segments = control_bar(&six_slide_controls(0), 120, 30);
        assert!(!segments[0].enabled); // prev disabled at first slide
        assert!(segments[2].enabled);

        let segments = control_bar(&six_slide_controls(5), 120, 30);
        assert!(segments[0].enabled);
        assert!(!segments[2].enabled); // next disabled at last slide
    }

    #[test]
    fn test_control_bar_narrow_terminal() {
        let segments = control_bar(&six_slide_controls(0), 10, 30);
        assert!(segments.len() < 4);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("truncate me", 8), "truncat…");
    }

    #[test]
    fn test_centered_x() {
        assert_eq!(centered_x("1234", 10), 3);
        assert_eq!(centered_x("too wide for this", 4), 0);
    }

    #[test]
    fn test_draw_reports_regions() {
        let (slides, _) = Deck::parse(
            "# One\nBody line.\n[image:pic] Replace me.\n---\n# Two\n",
            None,
        );
        let controller = DeckController::new(Deck::new(slides).unwrap(), Duration::from_secs(5));

        let mut frame: Vec<u8> = Vec::new();
        let regions = draw(
            &mut frame,
            100,
            30,
            controller.current_slide(),
            &controller.controls(),
            "",
            None,
            None,
            Instant::now(),
        )
        .unwrap();

        assert_eq!(regions.viewport, Rect::new(0, 0, 100, 28));
        assert!(regions.prev.width > 0);
        assert!(regions.next.width > 0);
        assert!(regions.auto.width > 0);
        assert_eq!(regions.placeholders.len(), 1);
        assert_eq!(regions.placeholders[0].1, 1); // block index of the placeholder
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_draw_handles_tiny_terminal() {
        let (slides, _) = Deck::parse("# One\n", None);
        let controller = DeckController::new(Deck::new(slides).unwrap(), Duration::from_secs(5));

        let mut frame: Vec<u8> = Vec::new();
        let result = draw(
            &mut frame,
            4,
            2,
            controller.current_slide(),
            &controller.controls(),
            "Now showing: One",
            None,
            None,
            Instant::now(),
        );
        assert!(result.is_ok());
    }
}
