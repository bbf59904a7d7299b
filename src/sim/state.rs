//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Identity of a live egg, unique for the lifetime of a `Game`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EggId(pub u32);

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Eggs spawn and fall
    Playing,
    /// Round ended; waiting for a restart
    GameOver,
}

/// A falling egg
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Egg {
    pub id: EggId,
    /// Top-left corner; `x` fixed at spawn, `y` advanced every tick
    pub pos: Vec2,
    /// Pixels per tick
    pub fall_speed: f32,
    pub size: Vec2,
}

impl Egg {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.pos, self.size)
    }
}

/// Set of eggs currently in the air
///
/// Kept sorted by id (ids are handed out in increasing order), so iteration
/// is stable across ticks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EggRegistry {
    eggs: Vec<Egg>,
}

impl EggRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, egg: Egg) {
        debug_assert!(self.eggs.last().is_none_or(|last| last.id < egg.id));
        self.eggs.push(egg);
    }

    /// Remove an egg, returning it if it was present
    pub fn remove(&mut self, id: EggId) -> Option<Egg> {
        let index = self.eggs.binary_search_by_key(&id, |e| e.id).ok()?;
        Some(self.eggs.remove(index))
    }

    pub fn get(&self, id: EggId) -> Option<&Egg> {
        self.eggs
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|index| &self.eggs[index])
    }

    pub fn all(&self) -> &[Egg] {
        &self.eggs
    }

    pub(crate) fn get_mut_at(&mut self, index: usize) -> Option<&mut Egg> {
        self.eggs.get_mut(index)
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Egg {
        self.eggs.remove(index)
    }

    /// Empty the registry, handing back everything that was in it
    pub fn drain(&mut self) -> Vec<Egg> {
        std::mem::take(&mut self.eggs)
    }

    pub fn len(&self) -> usize {
        self.eggs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eggs.is_empty()
    }
}

/// Score and misses for the current round
///
/// `phase == GameOver` exactly when `misses == max_misses`; only
/// [`RoundState::record_miss`] can make that happen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    phase: GamePhase,
    score: u32,
    misses: u32,
    max_misses: u32,
}

impl RoundState {
    pub fn new(max_misses: u32) -> Self {
        Self {
            phase: GamePhase::Playing,
            score: 0,
            misses: 0,
            max_misses,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn max_misses(&self) -> u32 {
        self.max_misses
    }

    /// Count a catch and return the new score
    pub fn record_catch(&mut self) -> u32 {
        debug_assert!(self.is_playing());
        self.score += 1;
        self.score
    }

    /// Count a miss. Returns true if this miss ended the round.
    pub fn record_miss(&mut self) -> bool {
        debug_assert!(self.is_playing());
        self.misses += 1;
        if self.misses >= self.max_misses {
            self.misses = self.max_misses;
            self.phase = GamePhase::GameOver;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.misses = 0;
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}
