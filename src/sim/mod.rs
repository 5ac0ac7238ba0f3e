//! Level simulation module
//!
//! All in-level gameplay lives here. It stays free of platform concerns:
//! - Time arrives as per-tick elapsed milliseconds plus a summed game clock
//! - Randomness comes from a caller-provided RNG
//! - Effects leave as `GameEvent`s, never as direct audio or rendering calls

pub mod background;
pub mod collision;
pub mod entity;
pub mod spawn;
pub mod sprite;
pub mod state;
pub mod tick;

pub use background::ScrollingBackground;
pub use collision::{collect_fruit, entities_overlap, resolve_hazard};
pub use entity::{Entity, ExplosionEffect, FruitPickup, Hazard, Player, StepContext};
pub use spawn::SpawnScheduler;
pub use sprite::{AnimatedSprite, SubImage};
pub use state::{GameEvent, PlayState};
pub use tick::{PlayInput, tick};
