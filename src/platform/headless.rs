//! Headless collaborators
//!
//! In-memory stand-ins for every external contract. The demo binary runs on
//! them and the tests use them to observe what the core asked for.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use glam::Vec2;

use super::input::{InputEvent, InputSource, Key};
use super::time::FrameClock;
use crate::Rect;
use crate::assets::{AssetError, AssetLoader, Bitmap, SoundHandle};
use crate::audio::Mixer;
use crate::config::GameConfig;
use crate::persistence::{ProgressRecord, ProgressStore};
use crate::renderer::{Color, FontSize, Fonts, Surface};

/// Full-screen images, sized from the configured screen
const SCREEN_IMAGES: &[&str] = &["background.png", "interface.png", "level_bg.png"];

/// Image sizes of the stock asset set
const STANDARD_IMAGES: &[(&str, u32, u32)] = &[
    ("game_start_up.png", 200, 60),
    ("game_start_down.png", 200, 60),
    ("game_select_up.png", 200, 60),
    ("game_select_down.png", 200, 60),
    ("level_unlocked.png", 100, 100),
    ("level_locked.png", 100, 100),
    ("sprite.png", 400, 200),
    ("flame.png", 40, 64),
    ("fruit.png", 120, 40),
    ("explosion.png", 768, 256),
    ("dragon.png", 780, 150),
];

const STANDARD_SOUNDS: &[&str] = &[
    "exlposion.wav",
    "button.wav",
    "background.ogg",
    "bullet.wav",
    "fruit.ogg",
];

/// Asset loader that knows image sizes instead of decoding files
#[derive(Debug, Default)]
pub struct HeadlessAssets {
    images: HashMap<PathBuf, (u32, u32)>,
    sounds: HashSet<PathBuf>,
    next_id: u32,
    solids: u32,
}

impl HeadlessAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every file the game expects, at plausible sizes
    pub fn standard(config: &GameConfig) -> Self {
        let mut loader = Self::new();
        for &file in SCREEN_IMAGES {
            let path = config.image_path(file);
            loader.register_image(path, config.screen_width, config.screen_height);
        }
        for &(file, w, h) in STANDARD_IMAGES {
            loader.register_image(config.image_path(file), w, h);
        }
        for &file in STANDARD_SOUNDS {
            loader.sounds.insert(config.sound_path(file));
        }
        loader
    }

    pub fn register_image(&mut self, path: impl Into<PathBuf>, width: u32, height: u32) {
        self.images.insert(path.into(), (width, height));
    }

    /// Make a file unavailable
    pub fn forget(&mut self, path: &Path) {
        self.images.remove(path);
        self.sounds.remove(path);
    }

    pub fn without_sounds(mut self) -> Self {
        self.sounds.clear();
        self
    }

    /// How many placeholders were created
    pub fn solid_count(&self) -> u32 {
        self.solids
    }

    fn alloc(&mut self, width: u32, height: u32) -> Bitmap {
        self.next_id += 1;
        Bitmap {
            id: self.next_id,
            width,
            height,
        }
    }
}

impl AssetLoader for HeadlessAssets {
    fn load_image(&mut self, path: &Path) -> Result<Bitmap, AssetError> {
        let (w, h) = *self
            .images
            .get(path)
            .ok_or_else(|| AssetError::NotFound(path.to_path_buf()))?;
        if w == 0 || h == 0 {
            return Err(AssetError::Decode {
                path: path.to_path_buf(),
                reason: format!("empty image ({}x{})", w, h),
            });
        }
        Ok(self.alloc(w, h))
    }

    fn solid(&mut self, width: u32, height: u32, _color: Color) -> Bitmap {
        self.solids += 1;
        self.alloc(width, height)
    }

    fn load_sound(&mut self, path: &Path) -> Option<SoundHandle> {
        if self.sounds.contains(path) {
            self.next_id += 1;
            Some(SoundHandle(self.next_id))
        } else {
            None
        }
    }
}

/// Mixer that records every request
#[derive(Debug, Default)]
pub struct RecordingMixer {
    /// (sound, volume, looped) per play request
    pub plays: Vec<(SoundHandle, f32, bool)>,
    pub looping: HashSet<SoundHandle>,
    pub volume_updates: u32,
}

impl Mixer for RecordingMixer {
    fn play(&mut self, sound: SoundHandle, volume: f32, looped: bool) {
        self.plays.push((sound, volume, looped));
        if looped {
            self.looping.insert(sound);
        }
    }

    fn is_looping(&self, sound: SoundHandle) -> bool {
        self.looping.contains(&sound)
    }

    fn set_volume(&mut self, _sound: SoundHandle, _volume: f32) {
        self.volume_updates += 1;
    }
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub bitmap: Bitmap,
    pub region: Option<Rect>,
    pub top_left: Vec2,
    pub alpha: u8,
}

/// Surface that records draw calls; `present` moves them to the last frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    fills: Vec<Color>,
    draws: Vec<DrawCall>,
    pub last_fills: Vec<Color>,
    pub last_frame: Vec<DrawCall>,
    pub frames: u64,
}

impl Surface for RecordingSurface {
    fn fill(&mut self, color: Color) {
        self.fills.push(color);
    }

    fn draw(&mut self, bitmap: &Bitmap, region: Option<Rect>, top_left: Vec2, alpha: u8) {
        self.draws.push(DrawCall {
            bitmap: *bitmap,
            region,
            top_left,
            alpha,
        });
    }

    fn present(&mut self) {
        self.frames += 1;
        self.last_fills = std::mem::take(&mut self.fills);
        self.last_frame = std::mem::take(&mut self.draws);
    }
}

/// Monospace text metrics; remembers what was rendered
#[derive(Debug, Default)]
pub struct HeadlessFonts {
    next_id: u32,
    pub rendered: Vec<(String, Color)>,
}

impl HeadlessFonts {
    /// Ids are offset so they never collide with image handles
    const ID_BASE: u32 = 1 << 20;
}

impl Fonts for HeadlessFonts {
    fn render(&mut self, text: &str, color: Color, size: FontSize) -> Bitmap {
        self.next_id += 1;
        self.rendered.push((text.to_string(), color));
        let px = size.pixels();
        Bitmap {
            id: Self::ID_BASE + self.next_id,
            width: text.chars().count() as u32 * px / 2,
            height: px,
        }
    }
}

/// One frame worth of scripted input
#[derive(Debug, Clone, Default)]
pub struct ScriptedFrame {
    pub events: Vec<InputEvent>,
    pub held: Vec<Key>,
    pub cursor: Option<Vec2>,
}

/// Input source fed from a queue; empty frames once the script runs out
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<ScriptedFrame>,
    held: Vec<Key>,
    cursor: Vec2,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: ScriptedFrame) {
        self.frames.push_back(frame);
    }
}

impl InputSource for ScriptedInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        match self.frames.pop_front() {
            Some(frame) => {
                self.held = frame.held;
                if let Some(cursor) = frame.cursor {
                    self.cursor = cursor;
                }
                frame.events
            }
            None => {
                self.held.clear();
                Vec::new()
            }
        }
    }

    fn is_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn cursor(&self) -> Vec2 {
        self.cursor
    }
}

/// Clock that advances by exactly 1000/fps ms per frame (rounded so the
/// total never drifts) without sleeping
#[derive(Debug, Default)]
pub struct FixedStepClock {
    frames: u64,
    now: u64,
}

impl FrameClock for FixedStepClock {
    fn tick(&mut self, target_fps: u32) -> u32 {
        self.frames += 1;
        let next = self.frames * 1000 / target_fps.max(1) as u64;
        let dt = next - self.now;
        self.now = next;
        dt as u32
    }

    fn now_ms(&self) -> u64 {
        self.now
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    text: Option<String>,
    saves: u32,
}

/// Progress store kept in memory, shareable between the game and a test
#[derive(Debug, Clone, Default)]
pub struct MemoryProgressStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing file contents
    pub fn with_text(text: &str) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().text = Some(text.to_string());
        store
    }

    /// The stored record, if anything was ever written
    pub fn record(&self) -> Option<ProgressRecord> {
        self.inner.borrow().text.as_deref().map(ProgressRecord::parse)
    }

    pub fn saves(&self) -> u32 {
        self.inner.borrow().saves
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&mut self) -> ProgressRecord {
        self.record().unwrap_or_default()
    }

    fn save(&mut self, max_level: u8, best_score: u32) {
        let mut inner = self.inner.borrow_mut();
        inner.text = Some(ProgressRecord::clamped(max_level as i64, best_score as i64).to_text());
        inner.saves += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_images_follow_config() {
        let config = GameConfig {
            screen_width: 640,
            screen_height: 480,
            ..Default::default()
        };
        let mut loader = HeadlessAssets::standard(&config);
        let bg = loader.load_image(&config.image_path("background.png")).unwrap();
        assert_eq!((bg.width, bg.height), (640, 480));
    }

    #[test]
    fn test_empty_image_fails_to_decode() {
        let mut loader = HeadlessAssets::new();
        loader.register_image("blank.png", 0, 16);
        assert!(matches!(
            loader.load_image(Path::new("blank.png")),
            Err(AssetError::Decode { .. })
        ));
    }

    #[test]
    fn test_fixed_step_clock_does_not_drift() {
        let mut clock = FixedStepClock::default();
        let total: u32 = (0..60).map(|_| clock.tick(60)).sum();
        assert_eq!(total, 1000);
        assert_eq!(clock.now_ms(), 1000);
    }

    #[test]
    fn test_scripted_input_releases_keys() {
        let mut input = ScriptedInput::new();
        input.push(ScriptedFrame {
            events: vec![InputEvent::KeyDown(Key::Tab)],
            held: vec![Key::Space],
            cursor: Some(Vec2::new(5.0, 6.0)),
        });
        assert_eq!(input.poll_events(), vec![InputEvent::KeyDown(Key::Tab)]);
        assert!(input.is_pressed(Key::Space));
        assert!(input.poll_events().is_empty());
        assert!(!input.is_pressed(Key::Space));
        assert_eq!(input.cursor(), Vec2::new(5.0, 6.0));
    }
}
