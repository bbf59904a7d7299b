//! Cooperative scheduling of the two periodic triggers
//!
//! The spawn trigger and the tick trigger run on one logical thread. The
//! front end feeds wall-clock time in with [`Schedule::advance`] and then
//! drains due triggers with [`Schedule::poll`], running each to completion
//! before polling again. Cancelling stops delivery immediately, including
//! triggers that were already due in the current batch.

use crate::config::GameConfig;

/// Longest frame we simulate; anything beyond is dropped (tab was asleep)
pub const MAX_FRAME_MS: f64 = 250.0;
/// Maximum triggers fired per `advance` to prevent spiral of death
pub const MAX_FIRES_PER_ADVANCE: u32 = 64;

/// Which periodic task is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    /// Simulation tick
    Tick,
    /// Egg spawn
    Spawn,
}

/// A cancellable fixed-interval trigger
#[derive(Debug, Clone)]
pub struct PeriodicTrigger {
    interval_ms: f64,
    /// Time until the next firing
    remaining_ms: f64,
    cancelled: bool,
}

impl PeriodicTrigger {
    /// First firing happens one full interval from now
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            remaining_ms: interval_ms,
            cancelled: false,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    fn due_in(&self) -> Option<f64> {
        (!self.cancelled).then(|| self.remaining_ms.max(0.0))
    }

    fn elapse(&mut self, ms: f64) {
        self.remaining_ms -= ms;
    }

    fn rearm(&mut self) {
        self.remaining_ms += self.interval_ms;
    }
}

/// Both triggers of one round
///
/// Built fresh at the start of every round; never resumed after cancel.
#[derive(Debug, Clone)]
pub struct Schedule {
    tick: PeriodicTrigger,
    spawn: PeriodicTrigger,
    /// Time fed in but not yet consumed by `poll`
    budget_ms: f64,
    fired: u32,
}

impl Schedule {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            tick: PeriodicTrigger::new(config.tick_interval_ms),
            spawn: PeriodicTrigger::new(config.spawn_interval_ms),
            budget_ms: 0.0,
            fired: 0,
        }
    }

    pub fn tick_trigger(&self) -> &PeriodicTrigger {
        &self.tick
    }

    pub fn spawn_trigger(&self) -> &PeriodicTrigger {
        &self.spawn
    }

    /// Cancel both triggers and forget any pending time
    pub fn cancel(&mut self) {
        self.tick.cancel();
        self.spawn.cancel();
        self.budget_ms = 0.0;
    }

    pub fn is_cancelled(&self) -> bool {
        self.tick.is_cancelled() && self.spawn.is_cancelled()
    }

    /// Feed elapsed wall-clock time
    pub fn advance(&mut self, dt_ms: f64) {
        if self.is_cancelled() || !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        let mut dt = dt_ms;
        if dt > MAX_FRAME_MS {
            log::warn!("Frame of {:.0} ms clamped to {:.0} ms", dt, MAX_FRAME_MS);
            dt = MAX_FRAME_MS;
        }
        self.budget_ms += dt;
        self.fired = 0;
    }

    /// Next trigger due within the fed time, in firing order.
    ///
    /// Ties go to the tick trigger. Returns `None` once the budget is spent
    /// or the schedule has been cancelled.
    pub fn poll(&mut self) -> Option<TriggerKind> {
        let candidates = [
            (TriggerKind::Tick, self.tick.due_in()),
            (TriggerKind::Spawn, self.spawn.due_in()),
        ];
        let next = candidates
            .into_iter()
            .filter_map(|(kind, due)| due.map(|due| (kind, due)))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let Some((kind, wait)) = next else {
            self.budget_ms = 0.0;
            return None;
        };

        if wait > self.budget_ms {
            self.tick.elapse(self.budget_ms);
            self.spawn.elapse(self.budget_ms);
            self.budget_ms = 0.0;
            return None;
        }

        if self.fired >= MAX_FIRES_PER_ADVANCE {
            log::warn!(
                "Trigger cap reached, dropping {:.1} ms of simulation",
                self.budget_ms
            );
            self.budget_ms = 0.0;
            return None;
        }

        self.budget_ms -= wait;
        self.tick.elapse(wait);
        self.spawn.elapse(wait);
        match kind {
            TriggerKind::Tick => self.tick.rearm(),
            TriggerKind::Spawn => self.spawn.rearm(),
        }
        self.fired += 1;
        log::trace!("{:?} trigger fired", kind);
        Some(kind)
    }
}
