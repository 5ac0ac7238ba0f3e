//! Randomized fruit spawning

use rand::Rng;

use super::entity::FruitPickup;
use crate::assets::SpriteSheet;
use crate::config::LevelConfig;

/// Emits one fruit each time a randomly drawn interval elapses
#[derive(Debug, Clone, Default)]
pub struct SpawnScheduler {
    min_ms: u32,
    max_ms: u32,
    /// Time since the last spawn (or reseed)
    elapsed_ms: u32,
    /// Current interval to wait for
    next_interval_ms: u32,
}

impl SpawnScheduler {
    /// Restart the countdown with the bounds of `level`
    pub fn reseed(&mut self, level: &LevelConfig, rng: &mut impl Rng) {
        self.min_ms = level.fruit_spawn_min_ms;
        self.max_ms = level.fruit_spawn_max_ms.max(level.fruit_spawn_min_ms);
        self.elapsed_ms = 0;
        self.draw_interval(rng);
    }

    fn draw_interval(&mut self, rng: &mut impl Rng) {
        self.next_interval_ms = rng.random_range(self.min_ms..=self.max_ms);
    }

    /// Advance by `dt_ms`; returns a new fruit once the interval is exceeded
    pub fn tick(
        &mut self,
        dt_ms: u32,
        sheet: &SpriteSheet,
        rng: &mut impl Rng,
    ) -> Option<FruitPickup> {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        if self.elapsed_ms <= self.next_interval_ms {
            return None;
        }
        self.elapsed_ms = 0;
        self.draw_interval(rng);
        let fruit = FruitPickup::spawn(sheet, rng);
        log::debug!(
            "Fruit spawned at y={} (next in {} ms)",
            fruit.sprite.y(),
            self.next_interval_ms
        );
        Some(fruit)
    }

    #[inline]
    pub fn next_interval_ms(&self) -> u32 {
        self.next_interval_ms
    }

    #[inline]
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Bitmap;
    use crate::config::DEFAULT_LEVELS;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn fruit_sheet() -> SpriteSheet {
        SpriteSheet {
            image: Bitmap {
                id: 4,
                width: 120,
                height: 40,
            },
            frame_width: 40,
            frame_height: 40,
            columns: 3,
        }
    }

    #[test]
    fn test_interval_within_level_bounds() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut spawner = SpawnScheduler::default();
        for level in &DEFAULT_LEVELS {
            for _ in 0..20 {
                spawner.reseed(level, &mut rng);
                let next = spawner.next_interval_ms();
                assert!(next >= level.fruit_spawn_min_ms && next <= level.fruit_spawn_max_ms);
                assert_eq!(spawner.elapsed_ms(), 0);
            }
        }
    }

    #[test]
    fn test_spawns_only_after_interval_exceeded() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut spawner = SpawnScheduler::default();
        spawner.reseed(&DEFAULT_LEVELS[0], &mut rng);
        let interval = spawner.next_interval_ms();
        let sheet = fruit_sheet();

        assert!(spawner.tick(interval, &sheet, &mut rng).is_none());
        let fruit = spawner.tick(1, &sheet, &mut rng).expect("interval exceeded");
        assert_eq!(fruit.sprite.x(), 820.0);
        assert_eq!(spawner.elapsed_ms(), 0);
        let next = spawner.next_interval_ms();
        assert!((6000..=9000).contains(&next));
    }

    #[test]
    fn test_stalled_loop_pauses_spawning() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut spawner = SpawnScheduler::default();
        spawner.reseed(&DEFAULT_LEVELS[4], &mut rng);
        for _ in 0..1000 {
            assert!(spawner.tick(0, &fruit_sheet(), &mut rng).is_none());
        }
    }
}
