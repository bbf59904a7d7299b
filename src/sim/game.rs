//! Round state machine
//!
//! `Game` owns everything a round needs and is the only thing a front end
//! talks to: it feeds time in with [`Game::advance`], forwards player
//! commands with [`Game::apply`], and reads state back for drawing.

use super::schedule::{Schedule, TriggerKind};
use super::spawn::Spawner;
use super::state::{EggId, EggRegistry, GamePhase, RoundState};
use super::tick::{TickReport, tick};
use crate::config::{ConfigError, GameConfig};
use crate::input::{Catcher, Command, Direction};
use crate::present::Presenter;

/// A running egg-catch game
pub struct Game<P: Presenter> {
    config: GameConfig,
    round: RoundState,
    registry: EggRegistry,
    catcher: Catcher,
    spawner: Spawner,
    schedule: Schedule,
    presenter: P,
}

impl<P: Presenter> Game<P> {
    /// Validate the config and start the first round
    pub fn new(config: GameConfig, seed: u64, presenter: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut game = Self {
            round: RoundState::new(config.max_misses),
            registry: EggRegistry::new(),
            catcher: Catcher::new(&config),
            spawner: Spawner::new(seed),
            schedule: Schedule::new(&config),
            presenter,
            config,
        };
        game.presenter.score_changed(0);
        game.presenter
            .miss_count_changed(0, game.round.max_misses());
        log::info!("Round started (seed {})", seed);
        Ok(game)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.round.phase()
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn score(&self) -> u32 {
        self.round.score()
    }

    pub fn misses(&self) -> u32 {
        self.round.misses()
    }

    pub fn eggs(&self) -> &EggRegistry {
        &self.registry
    }

    pub fn catcher(&self) -> &Catcher {
        &self.catcher
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn seed(&self) -> u64 {
        self.spawner.seed()
    }

    /// Eggs created since the game was built (across all rounds)
    pub fn total_spawned(&self) -> u32 {
        self.spawner.spawned()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Feed elapsed wall-clock time and run every trigger that came due
    pub fn advance(&mut self, dt_ms: f64) {
        self.schedule.advance(dt_ms);
        while let Some(kind) = self.schedule.poll() {
            match kind {
                TriggerKind::Tick => {
                    self.tick_now();
                }
                TriggerKind::Spawn => {
                    self.spawn_now();
                }
            }
        }
    }

    /// Run the spawn trigger body once
    pub fn spawn_now(&mut self) -> Option<EggId> {
        let id = self
            .spawner
            .spawn(&self.config, &self.round, &mut self.registry)?;
        if let Some(egg) = self.registry.get(id) {
            self.presenter.egg_spawned(egg);
        }
        Some(id)
    }

    /// Drop an egg at a chosen column and speed (scripted rounds, tests).
    ///
    /// `x` is clamped to the container; non-positive speeds are rejected.
    pub fn spawn_at(&mut self, x: f32, fall_speed: f32) -> Option<EggId> {
        if !self.round.is_playing() || !(fall_speed.is_finite() && fall_speed > 0.0) {
            return None;
        }
        let max_x = self.config.container_width - self.config.egg_width;
        let egg = self.spawner.place(&self.config, x.clamp(0.0, max_x), fall_speed);
        self.presenter.egg_spawned(&egg);
        let id = egg.id;
        self.registry.add(egg);
        Some(id)
    }

    /// Run the simulation tick body once
    pub fn tick_now(&mut self) -> TickReport {
        let report = tick(
            &self.config,
            &mut self.round,
            &mut self.registry,
            &self.catcher,
            &mut self.presenter,
        );
        if report.ended {
            self.end_round();
        }
        report
    }

    /// Playing -> GameOver, driven by the miss that hit the limit
    fn end_round(&mut self) {
        self.schedule.cancel();
        let score = self.round.score();
        log::info!("Game over, final score {}", score);
        self.presenter.game_over(score);
    }

    /// GameOver -> Playing. A no-op while a round is in progress.
    ///
    /// Returns true if a new round was started.
    pub fn request_reset(&mut self) -> bool {
        if self.round.is_playing() {
            return false;
        }

        for egg in self.registry.drain() {
            self.presenter.egg_removed(egg.id);
        }
        self.round.reset();
        self.catcher.recenter();
        self.schedule = Schedule::new(&self.config);

        self.presenter.reset();
        self.presenter.score_changed(0);
        self.presenter
            .miss_count_changed(0, self.round.max_misses());
        log::info!("Round restarted");
        true
    }

    /// Apply a player command. Movement is ignored after game over.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Restart => {
                self.request_reset();
            }
            _ if !self.round.is_playing() => {}
            Command::MoveLeft => self.catcher.step(Direction::Left),
            Command::MoveRight => self.catcher.step(Direction::Right),
            Command::SetPosition(x) => self.catcher.set_x(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::{NullPresenter, PresenterEvent, RecordingPresenter};

    fn game() -> Game<RecordingPresenter> {
        let mut game = Game::new(GameConfig::default(), 1234, RecordingPresenter::without_moves())
            .expect("default config is valid");
        game.presenter_mut().clear();
        game
    }

    /// Park the catcher where nothing can land on it, then drop eggs until
    /// the round ends
    fn lose(game: &mut Game<RecordingPresenter>) {
        while game.phase() == GamePhase::Playing {
            game.spawn_now();
            let x = game.eggs().all().last().map(|e| e.pos.x).unwrap_or(0.0);
            let far = if x < 300.0 { 520.0 } else { 0.0 };
            game.apply(Command::SetPosition(far));
            for _ in 0..400 {
                game.tick_now();
                if game.eggs().is_empty() {
                    break;
                }
            }
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = GameConfig {
            max_misses: 0,
            ..Default::default()
        };
        assert!(Game::new(config, 1, NullPresenter).is_err());
    }

    #[test]
    fn test_new_reports_initial_hud() {
        let game = Game::new(GameConfig::default(), 1, RecordingPresenter::new())
            .expect("valid");
        assert_eq!(
            game.presenter().events,
            vec![
                PresenterEvent::ScoreChanged(0),
                PresenterEvent::MissCountChanged(0, 3)
            ]
        );
    }

    #[test]
    fn test_advance_spawns_on_interval() {
        let mut game = game();
        game.advance(200.0);
        assert!(game.eggs().is_empty());
        for _ in 0..7 {
            game.advance(200.0);
        }
        // 1600 ms: one spawn at 1500
        assert_eq!(game.total_spawned(), 1);
        assert_eq!(game.presenter().count(|e| matches!(e, PresenterEvent::EggSpawned(_))), 1);
    }

    #[test]
    fn test_game_over_cancels_schedule() {
        let mut game = game();
        lose(&mut game);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(game.schedule().is_cancelled());
        assert_eq!(game.misses(), 3);

        let spawned = game.total_spawned();
        game.advance(5_000.0);
        assert_eq!(game.total_spawned(), spawned);
        assert_eq!(game.spawn_now(), None);
        assert_eq!(game.tick_now(), TickReport::default());
    }

    #[test]
    fn test_movement_ignored_after_game_over() {
        let mut game = game();
        lose(&mut game);
        let x = game.catcher().x();
        game.apply(Command::MoveLeft);
        game.apply(Command::SetPosition(x + 40.0));
        assert_eq!(game.catcher().x(), x);
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut game = game();
        lose(&mut game);
        game.apply(Command::MoveRight);
        game.presenter_mut().clear();

        game.apply(Command::Restart);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(game.eggs().is_empty());
        assert_eq!(game.score(), 0);
        assert_eq!(game.misses(), 0);
        assert_eq!(game.catcher().x(), game.config().catcher_start_x);
        assert!(!game.schedule().is_cancelled());
        assert_eq!(
            game.presenter().events,
            vec![
                PresenterEvent::Reset,
                PresenterEvent::ScoreChanged(0),
                PresenterEvent::MissCountChanged(0, 3)
            ]
        );
    }

    #[test]
    fn test_reset_while_playing_is_noop() {
        let mut game = game();
        game.spawn_now();
        assert!(!game.request_reset());
        assert_eq!(game.eggs().len(), 1);
        assert!(game.presenter().count(|e| *e == PresenterEvent::Reset) == 0);
    }

    #[test]
    fn test_reset_clears_live_eggs_without_scoring() {
        let mut game = game();
        lose(&mut game);
        game.registry.add(game.spawner.roll(&game.config));
        game.presenter_mut().clear();

        assert!(game.request_reset());
        assert!(game.eggs().is_empty());
        assert_eq!(
            game.presenter().count(|e| matches!(e, PresenterEvent::EggRemoved(_))),
            1
        );
        assert_eq!(game.score(), 0);
    }
}
