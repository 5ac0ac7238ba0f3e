//! Progress persistence
//!
//! Features:
//! - Two-line plain-text record (unlock ceiling, best score)
//! - Clamping on load, defaults on any read failure
//! - Best score never decreases except through an explicit reset
//! - Debounced reset

pub mod file;

pub use file::FileProgressStore;

use crate::consts::{LEVEL_COUNT, RESET_DEBOUNCE_MS};

/// The only state that survives between sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressRecord {
    /// Highest level the player may pick (1..=5)
    pub max_unlocked_level: u8,
    pub best_score: u32,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            max_unlocked_level: 1,
            best_score: 0,
        }
    }
}

impl ProgressRecord {
    /// Build a record from raw values, clamping into the valid ranges
    pub fn clamped(max_level: i64, best_score: i64) -> Self {
        Self {
            max_unlocked_level: max_level.clamp(1, LEVEL_COUNT as i64) as u8,
            best_score: best_score.clamp(0, u32::MAX as i64) as u32,
        }
    }

    /// Parse the two-line text form. Never fails: bad input yields the default
    /// and out-of-range numbers saturate.
    pub fn parse(text: &str) -> Self {
        let mut lines = text.lines();
        let level = match lines.next().map(parse_saturating) {
            Some(Some(v)) => v,
            _ => return Self::default(),
        };
        let best = match lines.next().map(parse_saturating) {
            Some(Some(v)) => v,
            Some(None) => return Self::default(),
            None => 0,
        };
        Self::clamped(level, best)
    }

    /// Text form written to disk
    pub fn to_text(&self) -> String {
        format!("{}\n{}", self.max_unlocked_level, self.best_score)
    }
}

/// Integer parse that saturates instead of failing on overflow
fn parse_saturating(line: &str) -> Option<i64> {
    let text = line.trim();
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let overflow = if text.starts_with('-') { i64::MIN } else { i64::MAX };
    Some(text.parse::<i64>().unwrap_or(overflow))
}

/// Storage backend for the progress record
pub trait ProgressStore {
    /// Read the stored record; failures yield the default record
    fn load(&mut self) -> ProgressRecord;
    /// Best-effort write; failures are swallowed
    fn save(&mut self, max_level: u8, best_score: u32);
}

/// Owns the live progress record and enforces its invariants
pub struct ProgressBook {
    store: Box<dyn ProgressStore>,
    record: ProgressRecord,
    /// Highest best score handed to the store so far
    saved_best: u32,
    /// Time since the last accepted reset; `None` if there was none
    since_reset_ms: Option<u32>,
}

impl ProgressBook {
    /// Load the record from `store`
    pub fn open(mut store: Box<dyn ProgressStore>) -> Self {
        let loaded = store.load();
        let record = ProgressRecord::clamped(
            loaded.max_unlocked_level as i64,
            loaded.best_score as i64,
        );
        log::info!(
            "Progress loaded: level {} unlocked, best {}",
            record.max_unlocked_level,
            record.best_score
        );
        Self {
            store,
            record,
            saved_best: record.best_score,
            since_reset_ms: None,
        }
    }

    #[inline]
    pub fn record(&self) -> ProgressRecord {
        self.record
    }

    #[inline]
    pub fn max_unlocked_level(&self) -> u8 {
        self.record.max_unlocked_level
    }

    #[inline]
    pub fn best_score(&self) -> u32 {
        self.record.best_score
    }

    pub fn is_unlocked(&self, level: u8) -> bool {
        level >= 1 && level <= self.record.max_unlocked_level
    }

    /// Raise the best score if `score` beats it
    pub fn observe_score(&mut self, score: u32) {
        if score > self.record.best_score {
            self.record.best_score = score;
        }
    }

    /// Apply the unlock rule for a completed level. Returns true if a new
    /// level was unlocked.
    pub fn complete_level(&mut self, level: u8) -> bool {
        if level == self.record.max_unlocked_level && level < LEVEL_COUNT {
            self.record.max_unlocked_level = level + 1;
            log::info!("Level {} unlocked", level + 1);
            true
        } else {
            false
        }
    }

    /// Persist the current record without ever lowering the saved best score
    pub fn save(&mut self) {
        let best = self.record.best_score.max(self.saved_best);
        self.record.best_score = best;
        self.store.save(self.record.max_unlocked_level, best);
        self.saved_best = best;
        log::info!(
            "Progress saved: level {} unlocked, best {}",
            self.record.max_unlocked_level,
            best
        );
    }

    /// Force the record back to (1, 0). Ignored within the debounce window
    /// of the previous reset; returns whether the reset happened.
    pub fn reset(&mut self) -> bool {
        if matches!(self.since_reset_ms, Some(since) if since <= RESET_DEBOUNCE_MS) {
            return false;
        }
        self.since_reset_ms = Some(0);
        self.record = ProgressRecord::default();
        self.saved_best = 0;
        self.store.save(1, 0);
        log::info!("Progress reset");
        true
    }

    /// Advance the reset debounce timer
    pub fn tick(&mut self, dt_ms: u32) {
        if let Some(since) = self.since_reset_ms.as_mut() {
            *since = since.saturating_add(dt_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::MemoryProgressStore;
    use proptest::prelude::*;

    #[test]
    fn test_parse_and_clamp() {
        assert_eq!(ProgressRecord::parse("3\n42"), ProgressRecord::clamped(3, 42));
        assert_eq!(ProgressRecord::parse(" 9 \n-7\n"), ProgressRecord::clamped(5, 0));
        assert_eq!(ProgressRecord::parse("0\n5"), ProgressRecord::clamped(1, 5));
        assert_eq!(ProgressRecord::parse("4"), ProgressRecord::clamped(4, 0));
        assert_eq!(ProgressRecord::parse(""), ProgressRecord::default());
        assert_eq!(ProgressRecord::parse("x\n10"), ProgressRecord::default());
        assert_eq!(ProgressRecord::parse("2\nlots"), ProgressRecord::default());
    }

    #[test]
    fn test_parse_saturates_huge_numbers() {
        assert_eq!(
            ProgressRecord::parse("99999999999999999999\n7"),
            ProgressRecord::clamped(5, 7)
        );
        assert_eq!(
            ProgressRecord::parse("2\n-99999999999999999999"),
            ProgressRecord::clamped(2, 0)
        );
        assert_eq!(
            ProgressRecord::parse("3\n99999999999999999999"),
            ProgressRecord::clamped(3, u32::MAX as i64)
        );
        assert_eq!(ProgressRecord::parse("-\n7"), ProgressRecord::default());
    }

    #[test]
    fn test_text_form() {
        assert_eq!(ProgressRecord::clamped(3, 42).to_text(), "3\n42");
    }

    #[test]
    fn test_unlock_rule() {
        let mut book = ProgressBook::open(Box::new(MemoryProgressStore::new()));
        assert!(book.complete_level(1));
        assert_eq!(book.max_unlocked_level(), 2);
        // Replaying an earlier level leaves the ceiling alone
        assert!(!book.complete_level(1));
        assert_eq!(book.max_unlocked_level(), 2);
        for level in 2..=5 {
            book.complete_level(level);
        }
        assert_eq!(book.max_unlocked_level(), 5);
        assert!(!book.complete_level(5));
        assert_eq!(book.max_unlocked_level(), 5);
    }

    #[test]
    fn test_reset_debounced() {
        let store = MemoryProgressStore::with_text("4\n90");
        let mut book = ProgressBook::open(Box::new(store.clone()));
        assert!(book.reset());
        assert_eq!(store.record(), Some(ProgressRecord::default()));

        book.observe_score(12);
        book.tick(600);
        assert!(!book.reset());
        assert_eq!(book.best_score(), 12);
        book.tick(400);
        assert!(!book.reset());
        book.tick(1);
        assert!(book.reset());
        assert_eq!(book.best_score(), 0);
        assert_eq!(store.saves(), 2);
    }

    #[test]
    fn test_save_then_reopen() {
        let store = MemoryProgressStore::new();
        let mut book = ProgressBook::open(Box::new(store.clone()));
        assert_eq!(book.record(), ProgressRecord::default());
        book.complete_level(1);
        book.complete_level(2);
        book.observe_score(42);
        book.save();
        let reopened = ProgressBook::open(Box::new(store));
        assert_eq!(reopened.record(), ProgressRecord::clamped(3, 42));
    }

    proptest! {
        #[test]
        fn prop_saved_best_never_decreases(scores in proptest::collection::vec(0u32..500, 1..40)) {
            let store = MemoryProgressStore::new();
            let mut book = ProgressBook::open(Box::new(store.clone()));
            let mut last_saved = 0;
            for score in scores {
                book.observe_score(score);
                book.save();
                let saved = store.record().map(|r| r.best_score).unwrap_or(0);
                prop_assert!(saved >= last_saved);
                last_saved = saved;
            }
        }
    }
}
