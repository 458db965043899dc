use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use deckhand::app::App;
use deckhand::controller::DeckController;
use deckhand::deck::Deck;
use deckhand::error::LoadWarning;
use deckhand::types::Severity;

/// Terminal slide-deck presenter.
#[derive(Parser, Debug)]
#[command(name = "deckhand", version, about)]
struct Cli {
    /// Path to the deck file.
    deck: PathBuf,

    /// Auto-advance interval in milliseconds.
    #[arg(long, default_value_t = 5000)]
    interval_ms: u64,

    /// Slide to open on, 1-based.
    #[arg(long)]
    start: Option<usize>,

    /// Start with auto-advance enabled.
    #[arg(long)]
    autoplay: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (deck, warnings) = Deck::load(&cli.deck)
        .with_context(|| format!("failed to load deck {}", cli.deck.display()))?;

    let controller = DeckController::new(deck, Duration::from_millis(cli.interval_ms));

    if let Some(start) = cli.start {
        controller.jump_to(start);
    }

    let mut app = App::new(controller);
    if cli.autoplay {
        app.autoplay_on_start();
    }
    for warning in &warnings {
        app.startup_notice(warning_line(warning), Severity::Error);
    }

    app.run()?;
    Ok(())
}

/// Warnings display the same 1-based slide numbering as the counter.
fn warning_line(warning: &LoadWarning) -> String {
    format!("Slide {}: {}", warning.slide + 1, warning.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_line_is_one_based() {
        let warning = LoadWarning {
            slide: 0,
            message: "failed to include 'notes.txt'".to_string(),
        };
        assert_eq!(
            warning_line(&warning),
            "Slide 1: failed to include 'notes.txt'"
        );
    }
}
