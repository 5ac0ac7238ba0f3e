//! Asset handles and the loading contract
//!
//! Decoding lives outside the crate. The core only sees opaque handles with
//! their pixel dimensions, plus the fallback policy:
//! - UI images are required (load failure is fatal)
//! - Sprite sheets degrade to a solid placeholder of one frame
//! - Sounds degrade to silence

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::GameConfig;
use crate::renderer::Color;

/// Opaque image handle owned by the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bitmap {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

/// Opaque sound handle owned by the audio backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("image not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// Backend that turns files into handles
pub trait AssetLoader {
    fn load_image(&mut self, path: &Path) -> Result<Bitmap, AssetError>;
    /// Create a solid-color image (used for placeholders)
    fn solid(&mut self, width: u32, height: u32, color: Color) -> Bitmap;
    fn load_sound(&mut self, path: &Path) -> Option<SoundHandle>;
}

/// A frame sheet plus its slicing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheet {
    pub image: Bitmap,
    pub frame_width: u32,
    pub frame_height: u32,
    pub columns: u32,
}

/// Placeholder color for missing sprite sheets
pub const PLACEHOLDER_COLOR: Color = Color::rgb(255, 0, 255);

/// Everything the game draws or plays, loaded once at startup
#[derive(Debug, Clone)]
pub struct Assets {
    pub background: Bitmap,
    pub interface: Bitmap,
    pub level_bg: Bitmap,
    pub start_up: Bitmap,
    pub start_down: Bitmap,
    pub select_up: Bitmap,
    pub select_down: Bitmap,
    pub level_unlocked: Bitmap,
    pub level_locked: Bitmap,

    pub player: SpriteSheet,
    pub hazard: SpriteSheet,
    pub fruit: SpriteSheet,
    pub explosion: SpriteSheet,
    pub dragon: SpriteSheet,

    pub snd_hit: Option<SoundHandle>,
    pub snd_button: Option<SoundHandle>,
    pub snd_music: Option<SoundHandle>,
    pub snd_arrow: Option<SoundHandle>,
    pub snd_fruit: Option<SoundHandle>,
}

impl Assets {
    /// Load the full asset set. Fails only if a required UI image is missing.
    pub fn load(loader: &mut dyn AssetLoader, config: &GameConfig) -> Result<Self, AssetError> {
        let mut image = |file: &str| -> Result<Bitmap, AssetError> {
            let path = config.image_path(file);
            loader.load_image(&path).inspect_err(|e| {
                log::error!("Required image failed to load: {}", e);
            })
        };

        let background = image("background.png")?;
        let interface = image("interface.png")?;
        let level_bg = image("level_bg.png")?;
        let start_up = image("game_start_up.png")?;
        let start_down = image("game_start_down.png")?;
        let select_up = image("game_select_up.png")?;
        let select_down = image("game_select_down.png")?;
        let level_unlocked = image("level_unlocked.png")?;
        let level_locked = image("level_locked.png")?;

        let player = load_sheet(loader, &config.image_path("sprite.png"), 100, 100, 4);
        let hazard = load_sheet(loader, &config.image_path("flame.png"), 40, 16, 1);
        let fruit = load_sheet(loader, &config.image_path("fruit.png"), 40, 40, 3);
        let explosion = load_sheet(loader, &config.image_path("explosion.png"), 128, 128, 6);
        let dragon = load_sheet(loader, &config.image_path("dragon.png"), 260, 150, 3);

        let mut sound = |file: &str| {
            let path = config.sound_path(file);
            let handle = loader.load_sound(&path);
            if handle.is_none() {
                log::warn!("Sound unavailable, playing silently: {}", path.display());
            }
            handle
        };

        Ok(Self {
            background,
            interface,
            level_bg,
            start_up,
            start_down,
            select_up,
            select_down,
            level_unlocked,
            level_locked,
            player,
            hazard,
            fruit,
            explosion,
            dragon,
            snd_hit: sound("exlposion.wav"),
            snd_button: sound("button.wav"),
            snd_music: sound("background.ogg"),
            snd_arrow: sound("bullet.wav"),
            snd_fruit: sound("fruit.ogg"),
        })
    }
}

/// Load a frame sheet, substituting a one-frame placeholder on failure
pub fn load_sheet(
    loader: &mut dyn AssetLoader,
    path: &Path,
    frame_width: u32,
    frame_height: u32,
    columns: u32,
) -> SpriteSheet {
    let image = match loader.load_image(path) {
        Ok(image) => image,
        Err(e) => {
            log::warn!("Sprite sheet failed ({}), using placeholder", e);
            loader.solid(frame_width, frame_height, PLACEHOLDER_COLOR)
        }
    };
    SpriteSheet {
        image,
        frame_width,
        frame_height,
        columns: columns.max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::HeadlessAssets;

    #[test]
    fn test_missing_sheet_uses_placeholder() {
        let mut loader = HeadlessAssets::new();
        let sheet = load_sheet(&mut loader, Path::new("nope.png"), 40, 16, 1);
        assert_eq!(sheet.image.width, 40);
        assert_eq!(sheet.image.height, 16);
        assert_eq!(loader.solid_count(), 1);
    }

    #[test]
    fn test_undecodable_sheet_uses_placeholder() {
        let mut loader = HeadlessAssets::new();
        loader.register_image("flame.png", 0, 0);
        let sheet = load_sheet(&mut loader, Path::new("flame.png"), 40, 16, 1);
        assert_eq!((sheet.image.width, sheet.image.height), (40, 16));
        assert_eq!(loader.solid_count(), 1);
    }

    #[test]
    fn test_missing_ui_image_is_fatal() {
        let config = GameConfig::default();
        let mut loader = HeadlessAssets::standard(&config);
        loader.forget(&config.image_path("interface.png"));
        assert!(matches!(
            Assets::load(&mut loader, &config),
            Err(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn test_missing_sounds_are_silent() {
        let config = GameConfig::default();
        let mut loader = HeadlessAssets::standard(&config).without_sounds();
        let assets = Assets::load(&mut loader, &config).unwrap();
        assert!(assets.snd_music.is_none());
        assert!(assets.snd_hit.is_none());
    }
}
