//! Core data structures: trial parameters, the odds pair, and the
//! caller-side range validation.
//!
//! [`OddsEngine::compute`](crate::engine::OddsEngine::compute) is total
//! and never rejects its input; a target outside
//! `[dice_sides, dice_sides * max_rolls]` just yields near-zero
//! probabilities. [`TrialParams::validate`] is the strict front door —
//! the HTTP layer calls it before the engine is ever reached, and
//! library callers can do the same via
//! [`OddsEngine::compute_checked`](crate::engine::OddsEngine::compute_checked).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One invocation's parameters: which die, which target, how many rolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct TrialParams {
    /// Number of equally likely faces, valued 1..=dice_sides.
    pub dice_sides: u32,
    /// Exact running total that counts as a win.
    pub target_number: u32,
    /// Maximum number of rolls before the game is a loss.
    pub max_rolls: u32,
}

impl TrialParams {
    pub fn new(dice_sides: u32, target_number: u32, max_rolls: u32) -> Self {
        Self {
            dice_sides,
            target_number,
            max_rolls,
        }
    }

    /// Largest total reachable within the roll budget.
    #[inline(always)]
    pub fn max_possible_total(&self) -> u32 {
        self.dice_sides * self.max_rolls
    }

    /// Reject parameters the game cannot meaningfully evaluate.
    ///
    /// The target must lie in `[dice_sides, dice_sides * max_rolls]`:
    /// below the die size a single roll can overshoot but never needs a
    /// second roll, above the reachable range the game is unwinnable.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.dice_sides == 0 {
            return Err(ParamsError::ZeroSides);
        }
        if self.target_number == 0 {
            return Err(ParamsError::ZeroTarget);
        }
        if self.max_rolls == 0 {
            return Err(ParamsError::ZeroRolls);
        }
        if self.target_number < self.dice_sides {
            return Err(ParamsError::TargetBelowDie {
                target: self.target_number,
                dice_sides: self.dice_sides,
            });
        }
        if self.target_number > self.max_possible_total() {
            return Err(ParamsError::TargetUnreachable {
                target: self.target_number,
                max_total: self.max_possible_total(),
                dice_sides: self.dice_sides,
                max_rolls: self.max_rolls,
            });
        }
        Ok(())
    }
}

/// Why a parameter set was rejected before computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("dice_sides must be at least 1")]
    ZeroSides,
    #[error("target_number must be at least 1")]
    ZeroTarget,
    #[error("max_rolls must be at least 1")]
    ZeroRolls,
    #[error("target {target} is below the die size {dice_sides}")]
    TargetBelowDie { target: u32, dice_sides: u32 },
    #[error(
        "target {target} exceeds the maximum total {max_total} reachable \
         with a d{dice_sides} in {max_rolls} rolls"
    )]
    TargetUnreachable {
        target: u32,
        max_total: u32,
        dice_sides: u32,
        max_rolls: u32,
    },
}

/// The two computed buckets. The loss bucket is the complement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Odds {
    /// P(running total hits the target exactly, within the budget).
    pub win: f64,
    /// P(running total lands adjacent to the target, within the budget).
    pub partial_win: f64,
}

impl Odds {
    /// Complement of the two computed buckets, clamped at 0 against
    /// floating-point drift.
    #[inline(always)]
    pub fn loss(&self) -> f64 {
        (1.0 - self.win - self.partial_win).max(0.0)
    }
}
