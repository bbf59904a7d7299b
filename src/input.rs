//! Player input: the catcher and the commands that move it
//!
//! The catcher is written only from here. The simulation reads its box and
//! never moves it, so it can't fight the player for control.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::sim::collision::Aabb;

/// Horizontal step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// A player command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    /// Absolute position from a slider or pointer
    SetPosition(f32),
    /// Start a new round (only meaningful after game over)
    Restart,
}

impl Command {
    /// Map a DOM `KeyboardEvent.key` value to a command
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Command::MoveLeft),
            "ArrowRight" | "d" | "D" => Some(Command::MoveRight),
            "r" | "R" => Some(Command::Restart),
            _ => None,
        }
    }
}

/// The player-controlled basket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catcher {
    /// Top-left corner; `y` is pinned to the bottom of the container
    pos: Vec2,
    size: Vec2,
    max_x: f32,
    step: f32,
    start_x: f32,
}

impl Catcher {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.catcher_start_x, config.catch_zone_top()),
            size: Vec2::new(config.catcher_width, config.catcher_height),
            max_x: config.catcher_max_x(),
            step: config.catcher_step,
            start_x: config.catcher_start_x,
        }
    }

    pub fn x(&self) -> f32 {
        self.pos.x
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.pos, self.size)
    }

    /// Move one step, clamped to the container
    pub fn step(&mut self, direction: Direction) {
        let delta = match direction {
            Direction::Left => -self.step,
            Direction::Right => self.step,
        };
        self.set_x(self.pos.x + delta);
    }

    /// Jump to an absolute position, clamped to the container
    pub fn set_x(&mut self, x: f32) {
        if x.is_nan() {
            return;
        }
        self.pos.x = x.clamp(0.0, self.max_x);
    }

    /// Back to the configured start position
    pub fn recenter(&mut self) {
        self.pos.x = self.start_x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Command::from_key("ArrowLeft"), Some(Command::MoveLeft));
        assert_eq!(Command::from_key("A"), Some(Command::MoveLeft));
        assert_eq!(Command::from_key("d"), Some(Command::MoveRight));
        assert_eq!(Command::from_key("R"), Some(Command::Restart));
        assert_eq!(Command::from_key("Enter"), None);
    }

    #[test]
    fn test_step_clamps_to_container() {
        let config = GameConfig {
            catcher_start_x: 5.0,
            ..Default::default()
        };
        let mut catcher = Catcher::new(&config);
        catcher.step(Direction::Left);
        assert_eq!(catcher.x(), 0.0);
        catcher.step(Direction::Right);
        assert_eq!(catcher.x(), config.catcher_step);

        catcher.set_x(10_000.0);
        assert_eq!(catcher.x(), config.catcher_max_x());
        catcher.step(Direction::Right);
        assert_eq!(catcher.x(), config.catcher_max_x());
    }

    #[test]
    fn test_set_x_ignores_nan() {
        let config = GameConfig::default();
        let mut catcher = Catcher::new(&config);
        catcher.set_x(f32::NAN);
        assert_eq!(catcher.x(), config.catcher_start_x);
    }

    #[test]
    fn test_recenter_and_bounds() {
        let config = GameConfig::default();
        let mut catcher = Catcher::new(&config);
        catcher.set_x(0.0);
        catcher.recenter();
        assert_eq!(catcher.x(), config.catcher_start_x);

        let bounds = catcher.bounds();
        assert_eq!(bounds.top(), config.catch_zone_top());
        assert_eq!(bounds.bottom(), config.container_height);
        assert_eq!(bounds.size(), Vec2::new(config.catcher_width, config.catcher_height));
    }
}
