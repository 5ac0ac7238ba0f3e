//! Plain-text file backend

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{ProgressRecord, ProgressStore};

/// Stores the progress record as two lines of decimal text
#[derive(Debug, Clone)]
pub struct FileProgressStore {
    path: PathBuf,
}

impl FileProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, text: &str) -> std::io::Result<()> {
        let mut file = fs::File::create(&self.path)?;
        file.write_all(text.as_bytes())?;
        file.flush()
    }
}

impl ProgressStore for FileProgressStore {
    fn load(&mut self) -> ProgressRecord {
        match fs::read_to_string(&self.path) {
            Ok(text) => ProgressRecord::parse(&text),
            Err(e) => {
                log::info!("No progress at {} ({}), starting fresh", self.path.display(), e);
                ProgressRecord::default()
            }
        }
    }

    fn save(&mut self, max_level: u8, best_score: u32) {
        let record = ProgressRecord::clamped(max_level as i64, best_score as i64);
        if let Err(e) = self.write(&record.to_text()) {
            log::warn!("Failed to save progress to {}: {}", self.path.display(), e);
        }
    }
}
