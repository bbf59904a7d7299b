//! Presentation sink
//!
//! The simulation reports what happened; a front end decides how to show
//! it. Every method has an empty default so presenters only implement what
//! they draw.

use crate::sim::state::{Egg, EggId};

/// Receives simulation updates for display
pub trait Presenter {
    fn egg_spawned(&mut self, _egg: &Egg) {}
    fn egg_moved(&mut self, _egg: &Egg) {}
    fn egg_removed(&mut self, _id: EggId) {}
    fn score_changed(&mut self, _score: u32) {}
    fn miss_count_changed(&mut self, _misses: u32, _max_misses: u32) {}
    fn game_over(&mut self, _final_score: u32) {}
    fn reset(&mut self) {}
}

/// Presenter that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

/// A single recorded notification
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    EggSpawned(EggId),
    EggMoved(EggId, f32),
    EggRemoved(EggId),
    ScoreChanged(u32),
    MissCountChanged(u32, u32),
    GameOver(u32),
    Reset,
}

/// Presenter that keeps a log of every notification
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    pub events: Vec<PresenterEvent>,
    /// Skip per-tick `EggMoved` entries (they dominate long runs)
    pub ignore_moves: bool,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder that drops movement updates
    pub fn without_moves() -> Self {
        Self {
            events: Vec::new(),
            ignore_moves: true,
        }
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn count(&self, pred: impl Fn(&PresenterEvent) -> bool) -> usize {
        self.events.iter().filter(|&e| pred(e)).count()
    }
}

impl Presenter for RecordingPresenter {
    fn egg_spawned(&mut self, egg: &Egg) {
        self.events.push(PresenterEvent::EggSpawned(egg.id));
    }

    fn egg_moved(&mut self, egg: &Egg) {
        if !self.ignore_moves {
            self.events.push(PresenterEvent::EggMoved(egg.id, egg.pos.y));
        }
    }

    fn egg_removed(&mut self, id: EggId) {
        self.events.push(PresenterEvent::EggRemoved(id));
    }

    fn score_changed(&mut self, score: u32) {
        self.events.push(PresenterEvent::ScoreChanged(score));
    }

    fn miss_count_changed(&mut self, misses: u32, max_misses: u32) {
        self.events
            .push(PresenterEvent::MissCountChanged(misses, max_misses));
    }

    fn game_over(&mut self, final_score: u32) {
        self.events.push(PresenterEvent::GameOver(final_score));
    }

    fn reset(&mut self) {
        self.events.push(PresenterEvent::Reset);
    }
}

/// HUD score line
pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

/// HUD misses line
pub fn missed_text(misses: u32, max_misses: u32) -> String {
    format!("Missed: {} / {}", misses, max_misses)
}

/// Game-over overlay message
pub fn game_over_text(final_score: u32) -> String {
    format!(
        "Game Over! You caught {} eggs. Press 'R' to play again!",
        final_score
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_text() {
        assert_eq!(score_text(7), "Score: 7");
        assert_eq!(missed_text(1, 3), "Missed: 1 / 3");
        assert_eq!(
            game_over_text(12),
            "Game Over! You caught 12 eggs. Press 'R' to play again!"
        );
    }

    #[test]
    fn test_recorder_can_skip_moves() {
        use glam::Vec2;
        let egg = Egg {
            id: EggId(1),
            pos: Vec2::new(0.0, 4.0),
            fall_speed: 1.0,
            size: Vec2::ONE,
        };
        let mut recorder = RecordingPresenter::without_moves();
        recorder.egg_moved(&egg);
        recorder.egg_removed(egg.id);
        assert_eq!(recorder.events, vec![PresenterEvent::EggRemoved(EggId(1))]);
    }
}
