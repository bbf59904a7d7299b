//! Fixed-interval simulation tick
//!
//! Moves every egg down by its fall speed and settles the ones that reached
//! the catch/miss band at the bottom of the container.

use super::collision::{overlaps, overlaps_horizontal};
use super::state::{EggRegistry, RoundState};
use crate::config::{CatchTest, GameConfig};
use crate::input::Catcher;
use crate::present::Presenter;

/// What one tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub caught: u32,
    pub missed: u32,
    /// The last miss ended the round
    pub ended: bool,
}

/// Advance every egg once and settle catches and misses.
///
/// Eggs are visited in id order. Inside the band, catch is checked before
/// miss, so an egg that is both over the catcher and past the ground line
/// counts as caught. Stops at the miss that ends the round; the caller must
/// cancel the schedule before anything else runs.
pub fn tick(
    config: &GameConfig,
    round: &mut RoundState,
    registry: &mut EggRegistry,
    catcher: &Catcher,
    presenter: &mut dyn Presenter,
) -> TickReport {
    let mut report = TickReport::default();
    if !round.is_playing() {
        return report;
    }

    let catch_zone_top = config.catch_zone_top();
    let ground_line = config.ground_line();
    let catcher_box = catcher.bounds();

    let mut index = 0;
    while let Some(egg) = registry.get_mut_at(index) {
        egg.pos.y += egg.fall_speed;
        presenter.egg_moved(egg);

        if egg.pos.y < catch_zone_top {
            index += 1;
            continue;
        }

        let egg_box = egg.bounds();
        let caught = match config.catch_test {
            CatchTest::Full => overlaps(&egg_box, &catcher_box),
            CatchTest::Horizontal => overlaps_horizontal(&egg_box, &catcher_box),
        };
        let (id, y) = (egg.id, egg.pos.y);

        if caught {
            registry.remove_at(index);
            presenter.egg_removed(id);
            let score = round.record_catch();
            report.caught += 1;
            log::debug!("Caught egg {} (score {})", id.0, score);
            presenter.score_changed(score);
        } else if y >= ground_line {
            registry.remove_at(index);
            presenter.egg_removed(id);
            let ended = round.record_miss();
            report.missed += 1;
            log::debug!(
                "Missed egg {} ({}/{})",
                id.0,
                round.misses(),
                round.max_misses()
            );
            presenter.miss_count_changed(round.misses(), round.max_misses());
            if ended {
                report.ended = true;
                break;
            }
        } else {
            index += 1;
        }
    }

    report
}
