//! Monte Carlo cross-check — plays the actual stopped game.
//!
//! The game rolls until the running total reaches or passes the target,
//! or the budget runs out. First-hit-at-roll-r events are exactly the
//! "sum of r rolls equals the target" events the engine's table sums
//! (faces are positive, so a path to the target never passed it), so
//! the empirical win rate converges to the engine's win probability.
//!
//! The engine's partial-win aggregate has no such game counterpart: it
//! tallies adjacent-sum events per roll count, including paths that go
//! on to win. Simulation therefore validates the win bucket only and
//! reports overshoot/exhausted tallies for the rest.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::types::TrialParams;

/// How a single game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    /// Running total hit the target exactly.
    Win { rolls_used: u32 },
    /// Running total passed the target.
    Overshoot { total: u32 },
    /// Budget ran out below the target.
    Exhausted { total: u32 },
}

#[inline(always)]
fn roll_die(rng: &mut SmallRng, sides: u32) -> u32 {
    rng.random_range(1..=sides)
}

/// Play one game to completion.
pub fn play_game(params: &TrialParams, rng: &mut SmallRng) -> GameOutcome {
    let mut total = 0u32;
    for roll in 1..=params.max_rolls {
        total += roll_die(rng, params.dice_sides);
        if total == params.target_number {
            return GameOutcome::Win { rolls_used: roll };
        }
        if total > params.target_number {
            return GameOutcome::Overshoot { total };
        }
    }
    GameOutcome::Exhausted { total }
}

/// Outcome tallies for a batch of games.
#[derive(Debug)]
pub struct SimulationResult {
    pub games: u64,
    pub wins: u64,
    pub overshoots: u64,
    pub exhausted: u64,
    pub elapsed: Duration,
}

impl SimulationResult {
    pub fn win_rate(&self) -> f64 {
        self.wins as f64 / self.games as f64
    }

    pub fn loss_rate(&self) -> f64 {
        (self.overshoots + self.exhausted) as f64 / self.games as f64
    }
}

/// Games per parallel work unit.
const CHUNK: u64 = 10_000;

/// Play `games` games across the rayon pool. Each chunk gets its own
/// `SmallRng` seeded from `seed` plus the chunk index, so results are
/// reproducible regardless of worker scheduling.
pub fn simulate_batch(params: &TrialParams, games: u64, seed: u64) -> SimulationResult {
    let start = Instant::now();
    let num_chunks = games.div_ceil(CHUNK);

    let (wins, overshoots, exhausted) = (0..num_chunks)
        .into_par_iter()
        .map(|chunk| {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(chunk));
            let chunk_games = CHUNK.min(games - chunk * CHUNK);
            let mut tally = (0u64, 0u64, 0u64);
            for _ in 0..chunk_games {
                match play_game(params, &mut rng) {
                    GameOutcome::Win { .. } => tally.0 += 1,
                    GameOutcome::Overshoot { .. } => tally.1 += 1,
                    GameOutcome::Exhausted { .. } => tally.2 += 1,
                }
            }
            tally
        })
        .reduce(
            || (0, 0, 0),
            |a, b| (a.0 + b.0, a.1 + b.1, a.2 + b.2),
        );

    SimulationResult {
        games,
        wins,
        overshoots,
        exhausted,
        elapsed: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::OddsEngine;

    #[test]
    fn buckets_partition_the_batch() {
        let params = TrialParams::new(6, 12, 10);
        let result = simulate_batch(&params, 25_000, 7);
        assert_eq!(result.games, 25_000);
        assert_eq!(result.wins + result.overshoots + result.exhausted, 25_000);
        assert!((result.win_rate() + result.loss_rate() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empirical_win_rate_matches_engine() {
        let params = TrialParams::new(6, 12, 10);
        let exact = OddsEngine::new().compute(&params).win;
        let result = simulate_batch(&params, 200_000, 42);
        let diff = (result.win_rate() - exact).abs();
        assert!(
            diff < 0.01,
            "simulated {} vs exact {} (diff {diff})",
            result.win_rate(),
            exact
        );
    }

    #[test]
    fn no_overshoot_when_target_is_the_ceiling() {
        // Target equals the maximum reachable total: the running total
        // can never pass it.
        let params = TrialParams::new(6, 60, 10);
        let result = simulate_batch(&params, 10_000, 3);
        assert_eq!(result.overshoots, 0);
    }

    #[test]
    fn single_roll_game_ends_after_one_roll() {
        let params = TrialParams::new(6, 6, 1);
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..100 {
            match play_game(&params, &mut rng) {
                GameOutcome::Win { rolls_used } => assert_eq!(rolls_used, 1),
                GameOutcome::Overshoot { .. } => panic!("one d6 roll cannot pass 6"),
                GameOutcome::Exhausted { total } => assert!(total < 6),
            }
        }
    }
}
