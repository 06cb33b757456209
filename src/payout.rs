//! Bet → payout derivation.
//!
//! Pure arithmetic on top of the engine's odds pair: a winning bet
//! returns the stake plus `stake × ratio`, a partial win likewise at
//! its own ratio, a loss forfeits the stake. No currency formatting
//! happens here — callers render the floats however they like.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BET, DEFAULT_PARTIAL_WIN_RATIO, DEFAULT_WIN_RATIO};
use crate::types::Odds;

/// Stake and payout ratios for one bet. Ratios are "N:1": a ratio of
/// 2.0 pays two units of profit per unit staked.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PayoutSchedule {
    pub bet: f64,
    pub win_ratio: f64,
    pub partial_win_ratio: f64,
}

impl Default for PayoutSchedule {
    fn default() -> Self {
        Self {
            bet: DEFAULT_BET,
            win_ratio: DEFAULT_WIN_RATIO,
            partial_win_ratio: DEFAULT_PARTIAL_WIN_RATIO,
        }
    }
}

/// Gross amounts returned to the player per outcome, stake included.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Payouts {
    pub win: f64,
    pub partial_win: f64,
}

impl PayoutSchedule {
    /// Gross payout per outcome: `bet + bet * ratio`.
    pub fn payouts(&self) -> Payouts {
        Payouts {
            win: self.bet + self.bet * self.win_ratio,
            partial_win: self.bet + self.bet * self.partial_win_ratio,
        }
    }

    /// Probability-weighted net profit of placing this bet: win and
    /// partial-win profits weighted by their odds, minus the stake lost
    /// in the remaining mass.
    pub fn expected_profit(&self, odds: &Odds) -> f64 {
        odds.win * (self.bet * self.win_ratio)
            + odds.partial_win * (self.bet * self.partial_win_ratio)
            - odds.loss() * self.bet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_pays_300_and_200() {
        let payouts = PayoutSchedule::default().payouts();
        assert_eq!(payouts.win, 300.0);
        assert_eq!(payouts.partial_win, 200.0);
    }

    #[test]
    fn expected_profit_weighs_all_three_buckets() {
        let schedule = PayoutSchedule {
            bet: 10.0,
            win_ratio: 2.0,
            partial_win_ratio: 1.0,
        };
        let odds = Odds {
            win: 0.25,
            partial_win: 0.25,
        };
        // 0.25 * 20 + 0.25 * 10 - 0.5 * 10
        assert!((schedule.expected_profit(&odds) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn sure_loss_forfeits_the_stake() {
        let schedule = PayoutSchedule::default();
        let odds = Odds {
            win: 0.0,
            partial_win: 0.0,
        };
        assert_eq!(schedule.expected_profit(&odds), -DEFAULT_BET);
    }
}
