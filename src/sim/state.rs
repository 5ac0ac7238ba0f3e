//! In-level simulation state
//!
//! Player and hazard live for the whole session and are reset per level;
//! fruit and explosions come and go every few seconds.

use rand::Rng;

use super::background::ScrollingBackground;
use super::entity::{ExplosionEffect, FruitPickup, Hazard, Player};
use super::spawn::SpawnScheduler;
use super::sprite::AnimatedSprite;
use crate::assets::{Assets, SpriteSheet};
use crate::config::LevelConfig;
use crate::consts::DRAGON_POS;

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Hazard left the screen and was recycled (+1 score)
    ArrowDodged,
    /// A fruit was picked up (+3 score, +1 life)
    FruitCollected,
    /// Hazard hit the player; `lives` is what remains
    PlayerHit { lives: u8 },
}

/// Everything that moves while a level is being played
#[derive(Debug, Clone)]
pub struct PlayState {
    pub score: u32,
    pub player: Player,
    pub hazard: Hazard,
    /// Decorative pursuer
    pub dragon: AnimatedSprite,
    pub background: ScrollingBackground,
    pub fruits: Vec<FruitPickup>,
    pub explosions: Vec<ExplosionEffect>,
    pub spawner: SpawnScheduler,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    pub fruit_sheet: SpriteSheet,
    pub explosion_sheet: SpriteSheet,
}

impl PlayState {
    pub fn new(assets: &Assets) -> Self {
        let mut dragon = AnimatedSprite::from_sheet(&assets.dragon);
        dragon.set_position(DRAGON_POS.0, DRAGON_POS.1);
        Self {
            score: 0,
            player: Player::new(&assets.player),
            hazard: Hazard::new(&assets.hazard),
            dragon,
            background: ScrollingBackground::new(assets.background),
            fruits: Vec::new(),
            explosions: Vec::new(),
            spawner: SpawnScheduler::default(),
            events: Vec::new(),
            fruit_sheet: assets.fruit,
            explosion_sheet: assets.explosion,
        }
    }

    /// Reset for a fresh attempt at `level`
    pub fn reset(&mut self, level: &LevelConfig, rng: &mut impl Rng) {
        self.score = 0;
        self.player.reset();
        self.hazard.reset(level.arrow_speed);
        self.fruits.clear();
        self.explosions.clear();
        self.events.clear();
        self.spawner.reseed(level, rng);
    }

    /// Take the events raised so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
