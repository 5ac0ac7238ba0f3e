//! Platform abstraction layer
//!
//! Contracts the core consumes from the outside world:
//! - Input events and held keys
//! - Frame timing
//! - Headless implementations for tests and the demo binary

pub mod headless;
pub mod input;
pub mod time;

pub use input::{InputEvent, InputSource, Key, MouseButton};
pub use time::{FrameClock, SystemClock};
