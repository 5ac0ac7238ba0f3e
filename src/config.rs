//! Game configuration
//!
//! Built once at startup and passed down; nothing reads it from a global.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_COUNT;

/// Per-level tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Background and fruit scroll speed (pixels per tick)
    pub ground_speed: f32,
    /// Hazard speed (pixels per tick)
    pub arrow_speed: f32,
    pub fruit_spawn_min_ms: u32,
    pub fruit_spawn_max_ms: u32,
    /// Score that completes the level
    pub target_score: u32,
}

impl LevelConfig {
    const fn new(ground: f32, arrow: f32, min_ms: u32, max_ms: u32, target: u32) -> Self {
        Self {
            ground_speed: ground,
            arrow_speed: arrow,
            fruit_spawn_min_ms: min_ms,
            fruit_spawn_max_ms: max_ms,
            target_score: target,
        }
    }
}

/// Default level table
pub const DEFAULT_LEVELS: [LevelConfig; LEVEL_COUNT as usize] = [
    LevelConfig::new(5.0, 8.0, 6000, 9000, 20),
    LevelConfig::new(6.0, 9.0, 5000, 8000, 30),
    LevelConfig::new(7.0, 10.0, 4000, 7000, 40),
    LevelConfig::new(8.0, 11.0, 3500, 6000, 50),
    LevelConfig::new(9.0, 12.0, 3000, 5500, 60),
];

/// Top-level game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Main loop rate
    pub target_fps: u32,
    /// Pace frames with the wall clock; otherwise fast-forward on a fixed
    /// step with audio muted
    pub real_time: bool,
    pub image_dir: PathBuf,
    pub sound_dir: PathBuf,
    /// Two-line progress file
    pub progress_file: PathBuf,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub effect_volume: f32,
    /// RNG seed; `None` picks one from the wall clock at startup
    pub seed: Option<u64>,
    pub levels: [LevelConfig; LEVEL_COUNT as usize],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            target_fps: 60,
            real_time: false,
            image_dir: PathBuf::from("src").join("images"),
            sound_dir: PathBuf::from("src").join("sounds"),
            progress_file: PathBuf::from("data.txt"),
            music_volume: 0.5,
            effect_volume: 0.5,
            seed: None,
            levels: DEFAULT_LEVELS,
        }
    }
}

impl GameConfig {
    /// Tuning for a level number, clamped to 1..=5
    pub fn level(&self, level: u8) -> &LevelConfig {
        let idx = level.clamp(1, LEVEL_COUNT) as usize - 1;
        &self.levels[idx]
    }

    pub fn image_path(&self, file: &str) -> PathBuf {
        self.image_dir.join(file)
    }

    pub fn sound_path(&self, file: &str) -> PathBuf {
        self.sound_dir.join(file)
    }

    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(json)?;
        config.sanitize();
        Ok(config)
    }

    /// Load a JSON config file, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Invalid config {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read config {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Keep volumes in range and spawn bounds ordered
    fn sanitize(&mut self) {
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.effect_volume = self.effect_volume.clamp(0.0, 1.0);
        self.target_fps = self.target_fps.max(1);
        for level in &mut self.levels {
            if level.fruit_spawn_min_ms > level.fruit_spawn_max_ms {
                std::mem::swap(&mut level.fruit_spawn_min_ms, &mut level.fruit_spawn_max_ms);
            }
        }
    }
}
