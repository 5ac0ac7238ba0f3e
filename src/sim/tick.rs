//! One gameplay tick
//!
//! Order matters and is fixed: jump input, scrolling, movement, hazard
//! recycling, animation, spawning, fruit, invincibility, explosion cleanup,
//! hazard collision.

use rand::Rng;

use super::collision::{collect_fruit, resolve_hazard};
use super::entity::{Entity, ExplosionEffect, StepContext};
use super::state::{GameEvent, PlayState};
use crate::consts::{ARROW_SCORE, FRUIT_SCORE};

/// Input relevant to the simulation for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayInput {
    /// Jump key is held
    pub jump: bool,
}

/// Advance the level simulation by one tick
pub fn tick(state: &mut PlayState, input: &PlayInput, ctx: &StepContext, rng: &mut impl Rng) {
    if input.jump {
        state.player.jump();
    }

    state.background.scroll(ctx.level.ground_speed);

    state.player.update(ctx);
    state.hazard.update(ctx);
    if state.hazard.has_exited() {
        state.hazard.recycle(rng);
        state.score += ARROW_SCORE;
        state.events.push(GameEvent::ArrowDodged);
    }

    state.dragon.animate(ctx.now_ms);
    for explosion in &mut state.explosions {
        explosion.update(ctx);
    }

    if let Some(fruit) = state.spawner.tick(ctx.dt_ms, &state.fruit_sheet, rng) {
        state.fruits.push(fruit);
    }
    for fruit in &mut state.fruits {
        fruit.update(ctx);
    }
    state.fruits.retain(|fruit| !fruit.is_expired());

    let collected = collect_fruit(&mut state.player, &mut state.fruits);
    for _ in 0..collected {
        state.score += FRUIT_SCORE;
        state.events.push(GameEvent::FruitCollected);
    }

    state.player.step_invincibility(ctx.now_ms, ctx.dt_ms);

    state.explosions.retain(|explosion| !explosion.is_expired());

    if resolve_hazard(&mut state.player, &state.hazard) {
        state.explosions.push(ExplosionEffect::centered_on(
            &state.explosion_sheet,
            &state.hazard.sprite,
        ));
        state.events.push(GameEvent::PlayerHit {
            lives: state.player.lives,
        });
    }
}
