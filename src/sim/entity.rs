//! Gameplay entities
//!
//! Every entity embeds one `AnimatedSprite`; behaviour is layered on top
//! through the `Entity` trait.

use rand::Rng;

use super::sprite::AnimatedSprite;
use crate::Rect;
use crate::assets::SpriteSheet;
use crate::config::LevelConfig;
use crate::consts::*;

/// Per-tick inputs shared by all entity updates
#[derive(Debug, Clone, Copy)]
pub struct StepContext {
    /// Game clock (sum of elapsed tick time, ms)
    pub now_ms: u64,
    /// Elapsed time of this tick (ms)
    pub dt_ms: u32,
    pub level: LevelConfig,
}

pub trait Entity {
    /// Advance by one tick
    fn update(&mut self, ctx: &StepContext);

    fn sprite(&self) -> &AnimatedSprite;

    /// Collision rectangle
    fn bounds(&self) -> Rect {
        self.sprite().bounds()
    }

    /// True once the entity should leave the active set
    fn is_expired(&self) -> bool {
        false
    }
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub sprite: AnimatedSprite,
    pub jump_vel: f32,
    pub jumping: bool,
    /// Remaining post-hit grace time (ms); <= 0 means vulnerable
    pub invincible_ms: i32,
    pub lives: u8,
}

impl Player {
    pub fn new(sheet: &SpriteSheet) -> Self {
        let mut sprite = AnimatedSprite::from_sheet(sheet);
        sprite.set_position(PLAYER_START.0, PLAYER_START.1);
        Self {
            sprite,
            jump_vel: 0.0,
            jumping: false,
            invincible_ms: 0,
            lives: START_LIVES,
        }
    }

    /// Restore the start-of-level state
    pub fn reset(&mut self) {
        self.lives = START_LIVES;
        self.invincible_ms = 0;
        self.jumping = false;
        self.jump_vel = 0.0;
        self.sprite.set_y(BASELINE_Y);
        self.sprite.alpha = 255;
    }

    /// Start a jump unless already airborne
    pub fn jump(&mut self) -> bool {
        if self.jumping {
            return false;
        }
        self.jumping = true;
        self.jump_vel = JUMP_VELOCITY;
        true
    }

    /// Integrate the jump curve: slow rise, faster fall
    pub fn step_jump(&mut self) {
        if !self.jumping {
            return;
        }
        if self.jump_vel < 0.0 {
            self.jump_vel += RISE_DECEL;
        } else {
            self.jump_vel += FALL_ACCEL;
        }
        let y = self.sprite.y() + self.jump_vel;
        if y >= BASELINE_Y {
            self.sprite.set_y(BASELINE_Y);
            self.jumping = false;
        } else {
            self.sprite.set_y(y);
        }
    }

    /// Count down invincibility and pick the blink opacity
    pub fn step_invincibility(&mut self, now_ms: u64, dt_ms: u32) {
        if self.invincible_ms > 0 {
            let dt = i32::try_from(dt_ms).unwrap_or(i32::MAX);
            self.invincible_ms = self.invincible_ms.saturating_sub(dt);
        }
        self.sprite.alpha = if self.invincible_ms > 0 && (now_ms / BLINK_PERIOD_MS) % 2 == 0 {
            BLINK_ALPHA
        } else {
            255
        };
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible_ms > 0
    }

    /// Apply a hazard hit. Returns false if the grace period absorbed it.
    pub fn hit(&mut self) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.invincible_ms = INVINCIBILITY_MS;
        true
    }

    /// Gain one life, capped
    pub fn heal(&mut self) {
        self.lives = (self.lives + 1).min(MAX_LIVES);
    }
}

impl Entity for Player {
    fn update(&mut self, ctx: &StepContext) {
        self.step_jump();
        self.sprite.animate(ctx.now_ms);
    }

    fn sprite(&self) -> &AnimatedSprite {
        &self.sprite
    }
}

/// The recycled horizontal projectile
#[derive(Debug, Clone)]
pub struct Hazard {
    pub sprite: AnimatedSprite,
    pub speed: f32,
}

impl Hazard {
    pub fn new(sheet: &SpriteSheet) -> Self {
        let mut sprite = AnimatedSprite::from_sheet(sheet);
        sprite.set_position(HAZARD_START.0, HAZARD_START.1);
        Self { sprite, speed: 0.0 }
    }

    pub fn reset(&mut self, speed: f32) {
        self.speed = speed;
        self.sprite.set_position(HAZARD_START.0, HAZARD_START.1);
    }

    /// Past the left edge and due for recycling
    #[inline]
    pub fn has_exited(&self) -> bool {
        self.sprite.x() < HAZARD_EXIT_X
    }

    /// Send it back to the right edge in a random lane
    pub fn recycle(&mut self, rng: &mut impl Rng) {
        let y = rng.random_range(HAZARD_MIN_Y..=HAZARD_MAX_Y);
        self.sprite.set_position(HAZARD_RESPAWN_X, y as f32);
    }
}

impl Entity for Hazard {
    fn update(&mut self, ctx: &StepContext) {
        self.sprite.pos.x -= self.speed;
        self.sprite.animate(ctx.now_ms);
    }

    fn sprite(&self) -> &AnimatedSprite {
        &self.sprite
    }
}

/// Healing pickup
#[derive(Debug, Clone)]
pub struct FruitPickup {
    pub sprite: AnimatedSprite,
    /// Time alive (ms)
    pub age_ms: u32,
}

impl FruitPickup {
    /// New fruit at the right edge with a random picture and height
    pub fn spawn(sheet: &SpriteSheet, rng: &mut impl Rng) -> Self {
        let mut sprite = AnimatedSprite::from_sheet(sheet);
        let frame = rng.random_range(0..sprite.columns());
        sprite.set_frame(frame);
        let y = rng.random_range(FRUIT_MIN_Y..=FRUIT_MAX_Y);
        sprite.set_position(FRUIT_SPAWN_X, y as f32);
        Self { sprite, age_ms: 0 }
    }
}

impl Entity for FruitPickup {
    fn update(&mut self, ctx: &StepContext) {
        let pos = &mut self.sprite.pos;
        pos.x -= ctx.level.ground_speed;
        // Cosmetic bob
        pos.y += ((ctx.now_ms as f32 / 250.0) + pos.x * 0.05).sin() * FRUIT_WOBBLE;
        self.age_ms = self.age_ms.saturating_add(ctx.dt_ms);
    }

    fn sprite(&self) -> &AnimatedSprite {
        &self.sprite
    }

    fn is_expired(&self) -> bool {
        self.sprite.x() < FRUIT_EXIT_X || self.age_ms > FRUIT_TTL_MS
    }
}

/// One-shot explosion animation
#[derive(Debug, Clone)]
pub struct ExplosionEffect {
    pub sprite: AnimatedSprite,
}

impl ExplosionEffect {
    /// Explosion whose centre matches the centre of `target`
    pub fn centered_on(sheet: &SpriteSheet, target: &AnimatedSprite) -> Self {
        let mut sprite = AnimatedSprite::from_sheet(sheet);
        let x = target.x() - (sprite.frame_width() - target.frame_width()) / 2.0;
        let y = target.y() - (sprite.frame_height() - target.frame_height()) / 2.0;
        sprite.set_position(x, y);
        Self { sprite }
    }
}

impl Entity for ExplosionEffect {
    fn update(&mut self, ctx: &StepContext) {
        self.sprite.animate(ctx.now_ms);
    }

    fn sprite(&self) -> &AnimatedSprite {
        &self.sprite
    }

    fn is_expired(&self) -> bool {
        self.sprite.frame() >= self.sprite.last_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Bitmap;
    use crate::config::DEFAULT_LEVELS;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn sheet(w: u32, h: u32, fw: u32, fh: u32, cols: u32) -> SpriteSheet {
        SpriteSheet {
            image: Bitmap {
                id: 9,
                width: w,
                height: h,
            },
            frame_width: fw,
            frame_height: fh,
            columns: cols,
        }
    }

    fn ctx(now_ms: u64) -> StepContext {
        StepContext {
            now_ms,
            dt_ms: 16,
            level: DEFAULT_LEVELS[0],
        }
    }

    #[test]
    fn test_jump_curve() {
        let mut player = Player::new(&sheet(400, 100, 100, 100, 4));
        assert!(player.jump());
        assert_eq!(player.jump_vel, -12.0);
        assert!(!player.jump());

        player.step_jump();
        assert!((player.jump_vel + 11.4).abs() < 1e-4);
        assert!((player.sprite.y() - (310.0 - 11.4)).abs() < 1e-3);

        // Rise until velocity crosses zero
        while player.jump_vel < 0.0 {
            player.step_jump();
        }
        let v = player.jump_vel;
        player.step_jump();
        assert!((player.jump_vel - (v + 0.8)).abs() < 1e-4);

        // Fall back and land
        while player.jumping {
            player.step_jump();
        }
        assert_eq!(player.sprite.y(), 310.0);
        assert!(player.jump());
    }

    #[test]
    fn test_hit_respects_invincibility() {
        let mut player = Player::new(&sheet(400, 100, 100, 100, 4));
        assert!(player.hit());
        assert_eq!(player.lives, 2);
        assert_eq!(player.invincible_ms, 1500);
        assert!(!player.hit());
        assert_eq!(player.lives, 2);
        assert_eq!(player.invincible_ms, 1500);
    }

    #[test]
    fn test_invincibility_blink_and_expiry() {
        let mut player = Player::new(&sheet(400, 100, 100, 100, 4));
        player.hit();
        player.step_invincibility(1000, 16);
        assert_eq!(player.sprite.alpha, 100);
        player.step_invincibility(1100, 16);
        assert_eq!(player.sprite.alpha, 255);
        player.invincible_ms = 10;
        player.step_invincibility(1200, 16);
        assert!(!player.is_invincible());
        assert_eq!(player.sprite.alpha, 255);
    }

    #[test]
    fn test_huge_tick_ends_invincibility() {
        let mut player = Player::new(&sheet(400, 100, 100, 100, 4));
        player.hit();
        player.step_invincibility(0, u32::MAX);
        assert!(!player.is_invincible());
        assert_eq!(player.sprite.alpha, 255);
    }

    #[test]
    fn test_heal_caps_at_five() {
        let mut player = Player::new(&sheet(400, 100, 100, 100, 4));
        for _ in 0..4 {
            player.heal();
        }
        assert_eq!(player.lives, 5);
    }

    #[test]
    fn test_hazard_recycle_lane() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut hazard = Hazard::new(&sheet(40, 16, 40, 16, 1));
        hazard.reset(8.0);
        for _ in 0..50 {
            hazard.sprite.set_x(-41.0);
            assert!(hazard.has_exited());
            hazard.recycle(&mut rng);
            assert_eq!(hazard.sprite.x(), 800.0);
            assert!((310.0..=390.0).contains(&hazard.sprite.y()));
        }
        hazard.sprite.set_x(-40.0);
        assert!(!hazard.has_exited());
    }

    #[test]
    fn test_fruit_expiry() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut fruit = FruitPickup::spawn(&sheet(120, 40, 40, 40, 3), &mut rng);
        assert!(fruit.sprite.frame() < 3);
        assert!((240.0..=300.0).contains(&fruit.sprite.y()));
        fruit.update(&ctx(100));
        assert_eq!(fruit.sprite.x(), 815.0);
        assert!(!fruit.is_expired());

        fruit.age_ms = 12_001;
        assert!(fruit.is_expired());

        let mut fruit = FruitPickup::spawn(&sheet(120, 40, 40, 40, 3), &mut rng);
        fruit.sprite.set_x(-51.0);
        assert!(fruit.is_expired());
    }

    #[test]
    fn test_explosion_centered_and_expires() {
        let mut hazard = Hazard::new(&sheet(40, 16, 40, 16, 1));
        hazard.sprite.set_position(400.0, 350.0);
        let mut exp = ExplosionEffect::centered_on(&sheet(768, 128, 128, 128, 6), &hazard.sprite);
        assert_eq!(exp.sprite.center(), hazard.sprite.center());

        let mut t = 0;
        while !exp.is_expired() {
            t += 31;
            exp.update(&ctx(t));
        }
        assert_eq!(exp.sprite.frame(), 5);
    }
}
