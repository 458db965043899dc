//! Error taxonomy for deckhand.
//!
//! Hard errors stop startup: an unreadable deck file, a deck with zero
//! slides, a terminal that cannot be set up. Everything else degrades:
//! include failures become visible fallback blocks, out-of-range navigation
//! is a silent no-op, and a missing mouse backend drops the pointer
//! adapters while keyboard navigation keeps working.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by deck loading and terminal setup.
#[derive(Debug, Error)]
pub enum DeckError {
    /// The deck file could not be read at all.
    #[error("failed to read deck file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The deck parsed but contains no slides. A deck always holds at
    /// least one.
    #[error("deck {path} contains no slides")]
    EmptyDeck { path: PathBuf },

    /// Terminal setup or teardown failed.
    #[error("terminal I/O error: {0}")]
    Terminal(#[from] io::Error),
}

/// Non-fatal problem recorded during deck load.
///
/// Reported once at startup (as a toast), never re-raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// Slide the warning belongs to (0-based).
    pub slide: usize,
    pub message: String,
}

// =============================================================================
// TESTS
// =============================================================================
