//! Egg spawning

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Egg, EggId, EggRegistry, RngState, RoundState};
use crate::config::GameConfig;

/// Creates eggs at random columns with random fall speeds
///
/// Owns the run's RNG and the id counter, both of which survive resets so
/// ids stay unique for the lifetime of the game.
#[derive(Debug, Clone)]
pub struct Spawner {
    rng_state: RngState,
    rng: Pcg32,
    next_id: u32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        let rng = rng_state.to_rng();
        Self {
            rng_state,
            rng,
            next_id: 1,
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    /// Total eggs created so far
    pub fn spawned(&self) -> u32 {
        self.next_id - 1
    }

    /// Roll a new egg at the top of the container
    pub fn roll(&mut self, config: &GameConfig) -> Egg {
        let max_x = config.container_width - config.egg_width;
        let x = self.rng.random_range(0.0..=max_x);
        let fall_speed = self
            .rng
            .random_range(config.min_fall_speed..=config.max_fall_speed);
        self.place(config, x, fall_speed)
    }

    /// New egg at a chosen column and speed, without touching the RNG
    pub fn place(&mut self, config: &GameConfig, x: f32, fall_speed: f32) -> Egg {
        let id = EggId(self.next_id);
        self.next_id += 1;
        Egg {
            id,
            pos: Vec2::new(x, 0.0),
            fall_speed,
            size: Vec2::new(config.egg_width, config.egg_height),
        }
    }

    /// Spawn trigger body: insert one egg if the round is live.
    ///
    /// Only ever inserts; never touches existing eggs or the round state.
    pub fn spawn(
        &mut self,
        config: &GameConfig,
        round: &RoundState,
        registry: &mut EggRegistry,
    ) -> Option<EggId> {
        if !round.is_playing() {
            return None;
        }
        let egg = self.roll(config);
        let id = egg.id;
        log::debug!(
            "Spawned egg {} at x={:.1} speed={:.2}",
            id.0,
            egg.pos.x,
            egg.fall_speed
        );
        registry.add(egg);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spawn_respects_phase() {
        let config = GameConfig::default();
        let mut spawner = Spawner::new(7);
        let mut registry = EggRegistry::new();
        let mut round = RoundState::new(1);

        assert_eq!(spawner.spawn(&config, &round, &mut registry), Some(EggId(1)));
        round.record_miss();
        assert_eq!(spawner.spawn(&config, &round, &mut registry), None);
        assert_eq!(registry.len(), 1);
        assert_eq!(spawner.spawned(), 1);
    }

    #[test]
    fn test_ids_increase() {
        let config = GameConfig::default();
        let mut spawner = Spawner::new(7);
        let a = spawner.roll(&config);
        let b = spawner.roll(&config);
        assert!(a.id < b.id);
    }

    #[test]
    fn test_same_seed_same_eggs() {
        let config = GameConfig::default();
        let mut s1 = Spawner::new(42);
        let mut s2 = Spawner::new(42);
        for _ in 0..10 {
            let a = s1.roll(&config);
            let b = s2.roll(&config);
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.fall_speed, b.fall_speed);
        }
    }

    #[test]
    fn test_degenerate_speed_range() {
        let config = GameConfig {
            min_fall_speed: 2.0,
            max_fall_speed: 2.0,
            ..Default::default()
        };
        let mut spawner = Spawner::new(1);
        assert_eq!(spawner.roll(&config).fall_speed, 2.0);
    }

    proptest! {
        #[test]
        fn prop_rolled_eggs_in_range(seed in any::<u64>()) {
            let config = GameConfig::default();
            let mut spawner = Spawner::new(seed);
            for _ in 0..20 {
                let egg = spawner.roll(&config);
                prop_assert!(egg.pos.x >= 0.0);
                prop_assert!(egg.pos.x <= config.container_width - config.egg_width);
                prop_assert!(egg.fall_speed >= config.min_fall_speed);
                prop_assert!(egg.fall_speed <= config.max_fall_speed);
                prop_assert_eq!(egg.pos.y, 0.0);
            }
        }
    }
}
