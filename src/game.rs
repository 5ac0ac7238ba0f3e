//! Top-level mode machine
//!
//! `Game` owns every piece of session state and advances it one frame at a
//! time: input actions first, then the level simulation while playing.
//! Audio leaves through a cue queue the caller drains after each tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::assets::{AssetError, AssetLoader, Assets};
use crate::audio::Cue;
use crate::config::GameConfig;
use crate::consts::{LEVEL_COUNT, RESET_NOTICE_MS};
use crate::persistence::{ProgressBook, ProgressStore};
use crate::platform::{InputEvent, InputSource, Key};
use crate::sim::{GameEvent, PlayInput, PlayState, StepContext, tick};
use crate::ui::{Action, Layout};

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Menu,
    LevelSelect,
    Playing,
    LevelComplete,
    GameOver,
}

/// Whether the main loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Input gathered for one frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
    /// Jump key held this frame
    pub jump_held: bool,
    pub cursor: Vec2,
}

impl TickInput {
    /// Poll a backend for this frame's input
    pub fn capture(source: &mut dyn InputSource) -> Self {
        let events = source.poll_events();
        Self {
            events,
            jump_held: source.is_pressed(Key::Space),
            cursor: source.cursor(),
        }
    }
}

pub struct Game {
    config: GameConfig,
    assets: Assets,
    layout: Layout,
    mode: GameMode,
    /// Level being played (or last played)
    level: u8,
    play: PlayState,
    progress: ProgressBook,
    rng: Pcg32,
    /// Sum of all tick durations (ms)
    clock_ms: u64,
    cues: Vec<Cue>,
    /// Remaining display time of the reset confirmation
    reset_notice_ms: u32,
    cursor: Vec2,
}

impl Game {
    /// Load assets and progress and start on the menu.
    ///
    /// Fails only when a required UI image cannot be loaded.
    pub fn new(
        config: GameConfig,
        loader: &mut dyn AssetLoader,
        store: Box<dyn ProgressStore>,
        seed: u64,
    ) -> Result<Self, AssetError> {
        let assets = Assets::load(loader, &config)?;
        let layout = Layout::new(&assets);
        let play = PlayState::new(&assets);
        let progress = ProgressBook::open(store);
        log::info!("Game ready (seed {})", seed);
        Ok(Self {
            config,
            assets,
            layout,
            mode: GameMode::Menu,
            level: 1,
            play,
            progress,
            rng: Pcg32::seed_from_u64(seed),
            clock_ms: 0,
            cues: vec![Cue::Music],
            reset_notice_ms: 0,
            cursor: Vec2::ZERO,
        })
    }

    /// Advance one frame of `dt_ms` milliseconds
    pub fn tick(&mut self, input: &TickInput, dt_ms: u32) -> Flow {
        self.clock_ms += dt_ms as u64;
        self.cursor = input.cursor;
        self.progress.tick(dt_ms);
        self.reset_notice_ms = self.reset_notice_ms.saturating_sub(dt_ms);

        let was_playing = self.mode == GameMode::Playing;
        for event in &input.events {
            let ceiling = self.progress.max_unlocked_level();
            if let Some(action) = self.layout.action_for(self.mode, event, ceiling) {
                if self.apply(action) == Flow::Quit {
                    return Flow::Quit;
                }
            }
        }

        if was_playing && self.mode == GameMode::Playing {
            self.update_playing(input.jump_held, dt_ms);
        }
        Flow::Continue
    }

    /// Apply one action to the mode machine. Actions that do not fit the
    /// current mode are ignored.
    pub fn apply(&mut self, action: Action) -> Flow {
        let accepted = match (self.mode, action) {
            (_, Action::Quit) => {
                log::info!("Quit requested in {:?}", self.mode);
                return Flow::Quit;
            }
            (GameMode::Menu, Action::Start) => {
                self.start_level(1);
                true
            }
            (GameMode::Menu, Action::Select) => {
                self.set_mode(GameMode::LevelSelect);
                true
            }
            (GameMode::Menu, Action::ResetProgress) => {
                let done = self.progress.reset();
                if done {
                    self.reset_notice_ms = RESET_NOTICE_MS;
                }
                done
            }
            (GameMode::LevelSelect, Action::PickLevel(level))
                if self.progress.is_unlocked(level) =>
            {
                self.start_level(level);
                true
            }
            (GameMode::LevelSelect, Action::Cancel) => {
                self.set_mode(GameMode::Menu);
                true
            }
            (GameMode::LevelComplete, Action::Continue) => {
                if self.level < LEVEL_COUNT {
                    self.start_level(self.level + 1);
                } else {
                    self.set_mode(GameMode::LevelSelect);
                }
                true
            }
            (GameMode::GameOver, Action::Retry) => {
                self.start_level(self.level);
                true
            }
            (GameMode::LevelComplete | GameMode::GameOver, Action::Cancel) => {
                self.progress.save();
                self.set_mode(GameMode::Menu);
                true
            }
            _ => false,
        };

        if accepted && action.clicks() {
            self.cues.push(Cue::Button);
        }
        Flow::Continue
    }

    /// Begin a fresh attempt at `level`
    pub fn start_level(&mut self, level: u8) {
        let level = level.clamp(1, LEVEL_COUNT);
        self.level = level;
        let config = *self.config.level(level);
        self.play.reset(&config, &mut self.rng);
        self.cues.push(Cue::Music);
        log::info!(
            "Level {} started (target {}, arrow speed {})",
            level,
            config.target_score,
            config.arrow_speed
        );
        self.set_mode(GameMode::Playing);
    }

    fn set_mode(&mut self, mode: GameMode) {
        if mode != self.mode {
            log::info!("Mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    fn update_playing(&mut self, jump: bool, dt_ms: u32) {
        let level = *self.config.level(self.level);
        let ctx = StepContext {
            now_ms: self.clock_ms,
            dt_ms,
            level,
        };
        tick(&mut self.play, &PlayInput { jump }, &ctx, &mut self.rng);

        for event in self.play.drain_events() {
            match event {
                GameEvent::ArrowDodged => {
                    self.progress.observe_score(self.play.score);
                    self.cues.push(Cue::Arrow);
                }
                GameEvent::FruitCollected => self.cues.push(Cue::Fruit),
                GameEvent::PlayerHit { lives } => {
                    log::debug!("Player hit, {} lives left", lives);
                    self.cues.push(Cue::Hit);
                }
            }
        }

        // Running out of lives wins over reaching the target on the same tick
        if self.play.player.lives == 0 {
            self.progress.observe_score(self.play.score);
            self.progress.save();
            log::info!("Game over on level {} with score {}", self.level, self.play.score);
            self.set_mode(GameMode::GameOver);
        } else if self.play.score >= level.target_score {
            self.progress.observe_score(self.play.score);
            self.progress.complete_level(self.level);
            self.progress.save();
            log::info!("Level {} complete with score {}", self.level, self.play.score);
            self.set_mode(GameMode::LevelComplete);
        }
    }

    /// Take the audio cues raised since the last call
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    #[inline]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.play.score
    }

    pub fn play(&self) -> &PlayState {
        &self.play
    }

    pub fn progress(&self) -> &ProgressBook {
        &self.progress
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Cursor position as of the last tick
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Whether the menu should show the reset confirmation
    pub fn reset_notice_visible(&self) -> bool {
        self.reset_notice_ms > 0
    }
}
