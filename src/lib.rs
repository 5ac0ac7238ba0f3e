//! Hero Run - a side-scrolling jump-and-dodge arcade game
//!
//! Core modules:
//! - `sim`: Gameplay simulation (sprites, entities, spawning, collisions)
//! - `game`: Mode state machine driving the simulation
//! - `persistence`: Progress record load/save with clamping and reset
//! - `renderer`: Screen composition over an external drawing surface
//! - `ui`: Buttons and input-to-action mapping
//! - `audio`: Sound cues and mixer contract
//! - `assets`: Image/sound handles and the loading fallback policy
//! - `platform`: Input, time and headless collaborators
//! - `config`: Data-driven level table and asset paths

pub mod assets;
pub mod audio;
pub mod config;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod ui;

pub use assets::{AssetError, AssetLoader, Assets, Bitmap, SoundHandle};
pub use config::{GameConfig, LevelConfig};
pub use game::{Flow, Game, GameMode};

/// Gameplay tuning constants
pub mod consts {
    /// Milliseconds between sprite frame advances
    pub const FRAME_RATE_MS: u64 = 30;

    /// Player ground line (top edge of the sprite)
    pub const BASELINE_Y: f32 = 310.0;
    /// Player resting position
    pub const PLAYER_START: (f32, f32) = (400.0, 310.0);
    /// Upward velocity applied on jump
    pub const JUMP_VELOCITY: f32 = -12.0;
    /// Velocity gain per tick while rising
    pub const RISE_DECEL: f32 = 0.6;
    /// Velocity gain per tick while falling
    pub const FALL_ACCEL: f32 = 0.8;

    pub const START_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;
    /// Post-hit grace period
    pub const INVINCIBILITY_MS: i32 = 1500;
    /// Opacity used on the "off" beat of the invincibility blink
    pub const BLINK_ALPHA: u8 = 100;
    pub const BLINK_PERIOD_MS: u64 = 100;

    /// Hazard lane
    pub const HAZARD_START: (f32, f32) = (800.0, 360.0);
    pub const HAZARD_RESPAWN_X: f32 = 800.0;
    pub const HAZARD_EXIT_X: f32 = -40.0;
    pub const HAZARD_MIN_Y: i32 = 310;
    pub const HAZARD_MAX_Y: i32 = 390;

    /// Fruit lane
    pub const FRUIT_SPAWN_X: f32 = 820.0;
    pub const FRUIT_MIN_Y: i32 = 240;
    pub const FRUIT_MAX_Y: i32 = 300;
    pub const FRUIT_EXIT_X: f32 = -50.0;
    pub const FRUIT_TTL_MS: u32 = 12_000;
    pub const FRUIT_WOBBLE: f32 = 0.3;

    pub const ARROW_SCORE: u32 = 1;
    pub const FRUIT_SCORE: u32 = 3;

    pub const LEVEL_COUNT: u8 = 5;

    /// Minimum spacing between accepted progress resets
    pub const RESET_DEBOUNCE_MS: u32 = 1000;
    /// How long the reset confirmation stays on the menu
    pub const RESET_NOTICE_MS: u32 = 2000;

    /// Decorative pursuer sprite position
    pub const DRAGON_POS: (f32, f32) = (100.0, 270.0);
}

/// Axis-aligned rectangle in screen space (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `w`x`h` centred on `(cx, cy)`
    pub fn centered(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap test: touching edges do not collide
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Strict interior containment (edges are outside)
    #[inline]
    pub fn contains_interior(&self, px: f32, py: f32) -> bool {
        self.x < px && px < self.right() && self.y < py && py < self.bottom()
    }
}
