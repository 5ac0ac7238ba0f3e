//! Screen buttons and input-to-action mapping
//!
//! Raw input events are turned into `Action`s here so the mode machine never
//! sees key codes or cursor coordinates.

use glam::Vec2;

use crate::Rect;
use crate::assets::{Assets, Bitmap};
use crate::consts::LEVEL_COUNT;
use crate::game::GameMode;
use crate::platform::{InputEvent, Key, MouseButton};

/// What the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Menu start button
    Start,
    /// Menu level-select button
    Select,
    /// Unlocked level button
    PickLevel(u8),
    /// Next level after a clear
    Continue,
    /// Replay the level after game over
    Retry,
    /// Back to the menu
    Cancel,
    ResetProgress,
    Quit,
}

impl Action {
    /// Whether accepting this action plays the button cue
    pub fn clicks(self) -> bool {
        matches!(
            self,
            Action::Start | Action::Select | Action::PickLevel(_) | Action::ResetProgress
        )
    }
}

const START_CENTER: Vec2 = Vec2::new(400.0, 450.0);
const SELECT_CENTER: Vec2 = Vec2::new(400.0, 520.0);
const LEVEL_CENTERS: [Vec2; LEVEL_COUNT as usize] = [
    Vec2::new(250.0, 250.0),
    Vec2::new(400.0, 250.0),
    Vec2::new(550.0, 250.0),
    Vec2::new(325.0, 400.0),
    Vec2::new(475.0, 400.0),
];

/// Two-state image button
#[derive(Debug, Clone, Copy)]
pub struct Button {
    pub up: Bitmap,
    /// Shown while hovered
    pub down: Bitmap,
    pub center: Vec2,
}

impl Button {
    pub fn rect(&self) -> Rect {
        Rect::centered(
            self.center.x,
            self.center.y,
            self.up.width as f32,
            self.up.height as f32,
        )
    }

    #[inline]
    pub fn is_over(&self, pos: Vec2) -> bool {
        self.rect().contains_interior(pos.x, pos.y)
    }

    /// Image to draw for the current cursor position
    pub fn image(&self, cursor: Vec2) -> &Bitmap {
        if self.is_over(cursor) { &self.down } else { &self.up }
    }
}

/// One entry of the level grid
#[derive(Debug, Clone, Copy)]
pub struct LevelButton {
    pub level: u8,
    pub center: Vec2,
    /// Button size (both level images share it)
    pub size: Vec2,
}

impl LevelButton {
    pub fn rect(&self) -> Rect {
        Rect::centered(self.center.x, self.center.y, self.size.x, self.size.y)
    }

    #[inline]
    pub fn is_over(&self, pos: Vec2) -> bool {
        self.rect().contains_interior(pos.x, pos.y)
    }
}

/// Clickable layout of the menu and level select screens
#[derive(Debug, Clone)]
pub struct Layout {
    pub start: Button,
    pub select: Button,
    pub levels: [LevelButton; LEVEL_COUNT as usize],
}

impl Layout {
    pub fn new(assets: &Assets) -> Self {
        let size = Vec2::new(
            assets.level_unlocked.width as f32,
            assets.level_unlocked.height as f32,
        );
        let levels = std::array::from_fn(|i| LevelButton {
            level: i as u8 + 1,
            center: LEVEL_CENTERS[i],
            size,
        });
        Self {
            start: Button {
                up: assets.start_up,
                down: assets.start_down,
                center: START_CENTER,
            },
            select: Button {
                up: assets.select_up,
                down: assets.select_down,
                center: SELECT_CENTER,
            },
            levels,
        }
    }

    /// Map one input event to an action for `mode`. Locked levels (above
    /// `max_unlocked`) ignore clicks.
    pub fn action_for(
        &self,
        mode: GameMode,
        event: &InputEvent,
        max_unlocked: u8,
    ) -> Option<Action> {
        match (*event, mode) {
            (InputEvent::Quit, _) => Some(Action::Quit),

            (InputEvent::MouseDown { button: MouseButton::Left, pos }, GameMode::Menu) => {
                if self.start.is_over(pos) {
                    Some(Action::Start)
                } else if self.select.is_over(pos) {
                    Some(Action::Select)
                } else {
                    None
                }
            }
            (InputEvent::KeyDown(Key::Tab), GameMode::Menu) => Some(Action::ResetProgress),
            (InputEvent::KeyDown(Key::Escape), GameMode::Menu | GameMode::Playing) => {
                Some(Action::Quit)
            }

            (InputEvent::MouseDown { button: MouseButton::Left, pos }, GameMode::LevelSelect) => {
                self.levels
                    .iter()
                    .find(|b| b.level <= max_unlocked && b.is_over(pos))
                    .map(|b| Action::PickLevel(b.level))
            }

            (InputEvent::KeyDown(Key::Space), GameMode::LevelComplete) => Some(Action::Continue),
            (InputEvent::KeyDown(Key::Space), GameMode::GameOver) => Some(Action::Retry),
            (
                InputEvent::KeyDown(Key::Escape),
                GameMode::LevelSelect | GameMode::LevelComplete | GameMode::GameOver,
            ) => Some(Action::Cancel),

            _ => None,
        }
    }
}
