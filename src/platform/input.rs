//! Input events

use glam::Vec2;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Escape,
    Tab,
    /// Anything else, by backend key code
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Other(u8),
}

/// A discrete event polled once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window closed
    Quit,
    KeyDown(Key),
    MouseDown { button: MouseButton, pos: Vec2 },
}

/// Backend event source
pub trait InputSource {
    /// Events since the previous poll
    fn poll_events(&mut self) -> Vec<InputEvent>;
    /// Whether `key` is currently held
    fn is_pressed(&self, key: Key) -> bool;
    /// Current mouse position
    fn cursor(&self) -> Vec2;
}
