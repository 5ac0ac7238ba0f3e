//! Hero Run demo entry point
//!
//! No windowing backend ships with the crate, so the binary drives the game
//! with headless collaborators and a simple autopilot: click Start, jump when
//! the hazard gets close, retry after a game over, continue after a clear.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use hero_run::audio::AudioManager;
use hero_run::game::TickInput;
use hero_run::persistence::FileProgressStore;
use hero_run::platform::headless::{
    FixedStepClock, HeadlessAssets, HeadlessFonts, RecordingMixer, RecordingSurface, ScriptedFrame,
    ScriptedInput,
};
use hero_run::platform::{FrameClock, InputEvent, Key, MouseButton, SystemClock};
use hero_run::renderer;
use hero_run::{Flow, Game, GameConfig, GameMode};

/// Ten minutes of frames at 60 fps
const DEMO_TICKS: u32 = 60 * 60 * 10;

/// Hazard distance (px from the player's left edge) that triggers a jump
const JUMP_DISTANCE: f32 = 140.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Hero Run (headless demo) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_or_default(Path::new(&path)),
        None => GameConfig::default(),
    };
    let seed = config.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });

    let mut loader = HeadlessAssets::standard(&config);
    let store = FileProgressStore::new(&config.progress_file);
    log::info!("Progress file: {}", store.path().display());
    let target_fps = config.target_fps;
    let real_time = config.real_time;
    let audio_config = config.clone();

    let mut game = match Game::new(config, &mut loader, Box::new(store), seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            std::process::exit(1);
        }
    };

    let mut audio = AudioManager::new(game.assets(), &audio_config);
    audio.set_muted(!real_time);
    let mut mixer = RecordingMixer::default();
    let mut surface = RecordingSurface::default();
    let mut fonts = HeadlessFonts::default();
    let mut clock: Box<dyn FrameClock> = if real_time {
        Box::new(SystemClock::new())
    } else {
        Box::new(FixedStepClock::default())
    };
    let mut input = ScriptedInput::new();

    let mut mode = game.mode();
    for _ in 0..DEMO_TICKS {
        input.push(autopilot(&game));
        let frame = TickInput::capture(&mut input);
        let dt = clock.tick(target_fps);
        if game.tick(&frame, dt) == Flow::Quit {
            break;
        }
        audio.play_all(game.drain_cues(), &mut mixer);
        renderer::render(&game, &mut surface, &mut fonts);
        fonts.rendered.clear();

        if game.mode() != mode {
            mode = game.mode();
            log::info!(
                "[{:>7} ms] {:?} (level {}, score {})",
                clock.now_ms(),
                mode,
                game.level(),
                game.score()
            );
        }
    }

    let progress = game.progress().record();
    log::info!(
        "Demo finished after {} frames: level {} unlocked, best score {}, {} sounds played",
        surface.frames,
        progress.max_unlocked_level,
        progress.best_score,
        mixer.plays.len()
    );
}

/// Decide this frame's input from what is on screen
fn autopilot(game: &Game) -> ScriptedFrame {
    let mut frame = ScriptedFrame::default();
    match game.mode() {
        GameMode::Menu | GameMode::LevelSelect => {
            let pos = game.layout().start.center;
            frame.cursor = Some(pos);
            if game.mode() == GameMode::LevelSelect {
                frame.events.push(InputEvent::KeyDown(Key::Escape));
            } else {
                frame.events.push(InputEvent::MouseDown {
                    button: MouseButton::Left,
                    pos,
                });
            }
        }
        GameMode::Playing => {
            let play = game.play();
            let gap = play.hazard.sprite.x() - play.player.sprite.x();
            if gap > 0.0 && gap < JUMP_DISTANCE {
                frame.held.push(Key::Space);
            }
            frame.cursor = Some(Vec2::ZERO);
        }
        GameMode::LevelComplete | GameMode::GameOver => {
            frame.events.push(InputEvent::KeyDown(Key::Space));
        }
    }
    frame
}

