//! Rectangle overlap tests and their gameplay effects

use super::entity::{Entity, FruitPickup, Hazard, Player};

/// Overlap test between any two entities' current rectangles
#[inline]
pub fn entities_overlap(a: &dyn Entity, b: &dyn Entity) -> bool {
    a.bounds().overlaps(&b.bounds())
}

/// Remove every fruit touching the player, healing once per fruit.
///
/// Returns how many fruits were collected this tick.
pub fn collect_fruit(player: &mut Player, fruits: &mut Vec<FruitPickup>) -> u32 {
    let before = fruits.len();
    let player_rect = player.bounds();
    fruits.retain(|fruit| !player_rect.overlaps(&fruit.bounds()));
    let collected = (before - fruits.len()) as u32;
    for _ in 0..collected {
        player.heal();
    }
    collected
}

/// Apply a hazard hit if the rectangles overlap and the player is vulnerable.
///
/// Returns true when the hit took effect.
pub fn resolve_hazard(player: &mut Player, hazard: &Hazard) -> bool {
    entities_overlap(&*player, hazard) && player.hit()
}
