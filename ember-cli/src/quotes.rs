//! Motivational quote book and rotation
//!
//! Quotes are loaded once at startup from a static JSON resource (an
//! array of strings). A load failure is recovered locally by
//! substituting a single fixed fallback quote; it is never fatal and
//! never interferes with task operations.
//!
//! The displayed quote rotates on a fixed interval: the current quote
//! and the time it was picked are persisted, and a new one is drawn
//! when the stored one has gone stale or a task completion forces a
//! refresh.

use std::path::Path;

use chrono::{DateTime, Local};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};
use crate::storage::{KEY_QUOTE, KvStore};

/// Shown when the quote list cannot be loaded
pub const FALLBACK_QUOTE: &str = "You got this! 💪";

/// Immutable list of quotes loaded at startup
pub struct QuoteBook {
    quotes: Vec<String>,
}

impl QuoteBook {
    /// Build a book from a quote list; an empty list yields the fallback
    pub fn new(quotes: Vec<String>) -> Self {
        if quotes.is_empty() {
            return Self::fallback();
        }
        Self { quotes }
    }

    /// The single-quote book used when loading fails
    pub fn fallback() -> Self {
        Self {
            quotes: vec![FALLBACK_QUOTE.to_string()],
        }
    }

    /// Load from a JSON array of strings, substituting the fallback on
    /// any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        match Self::try_load(path.as_ref()) {
            Ok(book) => book,
            Err(e) => {
                eprintln!("Warning: failed to load quotes: {e}");
                Self::fallback()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| CliError::io(format!("Failed to read {}", path.display()), e))?;
        let quotes: Vec<String> = serde_json::from_slice(&bytes)?;
        Ok(Self::new(quotes))
    }

    /// Uniform random pick, with replacement
    pub fn pick(&self) -> &str {
        let mut rng = rand::rng();
        &self.quotes[rng.random_range(0..self.quotes.len())]
    }
}

/// Persisted rotation state for the displayed quote
#[derive(Serialize, Deserialize, Debug, Clone)]
struct QuoteState {
    text: String,
    picked_at: DateTime<Local>,
}

impl QuoteState {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            picked_at: Local::now(),
        }
    }

    fn is_stale(&self, interval_secs: u64) -> bool {
        let age = Local::now().signed_duration_since(self.picked_at);
        age.num_seconds() < 0 || age.num_seconds() as u64 >= interval_secs
    }
}

fn load_state(store: &impl KvStore) -> Option<QuoteState> {
    let bytes = match store.get(KEY_QUOTE) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return None,
        Err(e) => {
            eprintln!("Warning: could not read quote state: {e}");
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(state) => Some(state),
        Err(e) => {
            eprintln!("Warning: ignoring corrupt quote state: {e}");
            None
        }
    }
}

/// Current quote for display, re-picked when older than the interval
pub fn current_quote(store: &impl KvStore, book: &QuoteBook, interval_secs: u64) -> String {
    match load_state(store) {
        Some(state) if !state.is_stale(interval_secs) => state.text,
        _ => refresh_quote(store, book),
    }
}

/// Force-pick a fresh quote and persist the rotation state.
///
/// The picked quote is returned even when persisting it fails.
pub fn refresh_quote(store: &impl KvStore, book: &QuoteBook) -> String {
    let state = QuoteState::new(book.pick());
    match serde_json::to_vec(&state) {
        Ok(bytes) => {
            if let Err(e) = store.set(KEY_QUOTE, &bytes) {
                eprintln!("Warning: could not save quote state: {e}");
            }
        }
        Err(e) => eprintln!("Warning: could not encode quote state: {e}"),
    }
    state.text
}
