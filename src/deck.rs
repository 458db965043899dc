//! Deck model and loader.
//!
//! A deck is a plain-text file, slides separated by `---` lines:
//!
//! ```text
//! # Midjourney v6
//! @ Midjourney Inc
//! :kind generator
//! Photo-real output, strong prompt adherence.
//! [image:mj-sample] Replace with a Midjourney sample render.
//! < notes/midjourney.txt
//! ---
//! # Closing
//! ```
//!
//! - `# Title` sets the slide title (first one wins)
//! - `@ Company` sets the company byline
//! - `:kind tag` sets the free-form type classification (default "other")
//! - `[image:ID] instruction` declares an image placeholder; the instruction
//!   feeds the help modal
//! - `< path` includes an external text file as body lines; if the file
//!   cannot be read the block degrades to a visible fallback marker and a
//!   [`LoadWarning`] is recorded
//! - anything else is body text

use std::fs;
use std::path::Path;

use crate::error::{DeckError, LoadWarning};

// =============================================================================
// TYPES
// =============================================================================

/// One content block inside a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Plain body line.
    Text(String),
    /// Image placeholder with its replacement instruction.
    Placeholder { id: String, instruction: String },
    /// Content that failed to load, rendered as a visible marker.
    Fallback(String),
}

/// A single slide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slide {
    pub title: Option<String>,
    pub company: Option<String>,
    /// Free-form type classification from the `:kind` directive.
    pub kind: Option<String>,
    pub blocks: Vec<Block>,
}

impl Slide {
    /// Case-insensitive substring match against the title.
    /// Slides without a title never match.
    pub fn title_matches(&self, needle: &str) -> bool {
        match &self.title {
            Some(title) => title.to_lowercase().contains(&needle.to_lowercase()),
            None => false,
        }
    }

    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.company.is_none()
            && self.kind.is_none()
            && self.blocks.is_empty()
    }
}

/// A parsed deck: at least one slide, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    slides: Vec<Slide>,
}

// =============================================================================
// PARSING
// =============================================================================

impl Deck {
    /// Build a deck from already-parsed slides. Empty input is rejected.
    pub fn new(slides: Vec<Slide>) -> Option<Self> {
        if slides.is_empty() {
            None
        } else {
            Some(Self { slides })
        }
    }

    /// Load a deck from a file. Includes resolve relative to the deck's
    /// directory. Hard-fails only on an unreadable file or an empty deck;
    /// include failures come back as warnings.
    pub fn load(path: &Path) -> Result<(Self, Vec<LoadWarning>), DeckError> {
        let src = fs::read_to_string(path).map_err(|source| DeckError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let (slides, warnings) = parse_slides(&src, path.parent());
        match Self::new(slides) {
            Some(deck) => Ok((deck, warnings)),
            None => Err(DeckError::EmptyDeck {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Parse deck source. `base_dir` anchors `< path` includes;
    /// `None` turns every include into a fallback block.
    pub fn parse(src: &str, base_dir: Option<&Path>) -> (Vec<Slide>, Vec<LoadWarning>) {
        parse_slides(src, base_dir)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }
}

fn parse_slides(src: &str, base_dir: Option<&Path>) -> (Vec<Slide>, Vec<LoadWarning>) {
    let mut slides = Vec::new();
    let mut warnings = Vec::new();
    let mut current = Slide::default();

    for raw in src.lines() {
        let line = raw.trim_end();
        let trimmed = line.trim_start();

        if trimmed == "---" {
            if !current.is_empty() {
                slides.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("# ") {
            if current.title.is_none() {
                current.title = Some(rest.trim().to_string());
            } else {
                current.blocks.push(Block::Text(line.to_string()));
            }
        } else if let Some(rest) = trimmed.strip_prefix("@ ") {
            current.company = Some(rest.trim().to_string());
        } else if let Some(rest) = trimmed.strip_prefix(":kind ") {
            current.kind = Some(rest.trim().to_string());
        } else if let Some(rest) = trimmed.strip_prefix("[image:") {
            match rest.split_once(']') {
                Some((id, instruction)) => current.blocks.push(Block::Placeholder {
                    id: id.trim().to_string(),
                    instruction: instruction.trim().to_string(),
                }),
                // Unterminated directive: keep it as literal text
                None => current.blocks.push(Block::Text(line.to_string())),
            }
        } else if let Some(rest) = trimmed.strip_prefix("< ") {
            let include = rest.trim();
            match read_include(include, base_dir) {
                Ok(content) => {
                    for body in content.lines() {
                        current.blocks.push(Block::Text(body.to_string()));
                    }
                }
                Err(message) => {
                    warnings.push(LoadWarning {
                        slide: slides.len(),
                        message,
                    });
                    current
                        .blocks
                        .push(Block::Fallback(format!("content not available: {include}")));
                }
            }
        } else if !trimmed.is_empty() {
            current.blocks.push(Block::Text(line.to_string()));
        }
    }

    if !current.is_empty() {
        slides.push(current);
    }

    (slides, warnings)
}

fn read_include(include: &str, base_dir: Option<&Path>) -> Result<String, String> {
    let Some(dir) = base_dir else {
        return Err(format!("include '{include}' has no base directory"));
    };
    fs::read_to_string(dir.join(include))
        .map_err(|err| format!("failed to include '{include}': {err}"))
}

// =============================================================================
// TESTS
// =============================================================================
