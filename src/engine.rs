//! The probability engine: DP table construction, bucket aggregation,
//! and the cached entry point.
//!
//! ## Algorithm
//!
//! The table holds `P(running total == partial_sum after exactly
//! roll_count rolls)` for `roll_count` in `0..=max_rolls` and
//! `partial_sum` in `0..=target_number`:
//!
//! - Row 1 is the single-roll uniform distribution, truncated at the
//!   target column. Faces past the target carry overshoot mass that no
//!   tracked bucket can ever use, so it is dropped here once.
//! - Row `r` is row `r-1` convolved with one more uniform die,
//!   restricted to strictly positive prior totals. Since faces are
//!   positive, every intermediate total along a path to `total <=
//!   target` is itself below the target, so each cell is exact.
//! - Win mass is the target column summed over roll counts; first-hit
//!   events at distinct roll counts are disjoint, so the sum is a
//!   probability. The partial-win column sums carry the asymmetric
//!   neighbor guard described at [`aggregate`].
//!
//! Rows depend only on the row directly above them; the loop order is
//! load-bearing and stays sequential.

use crate::cache::OddsCache;
use crate::types::{Odds, ParamsError, TrialParams};

/// Scratch DP table, flat row-major `f64`, `(max_rolls + 1)` rows by
/// `(target_number + 1)` columns. Built and discarded per cache miss.
struct ProbTable {
    cols: usize,
    data: Vec<f64>,
}

impl ProbTable {
    fn zeroed(max_rolls: usize, target: usize) -> Self {
        let cols = target + 1;
        Self {
            cols,
            data: vec![0.0; (max_rolls + 1) * cols],
        }
    }

    #[inline(always)]
    fn at(&self, roll: usize, total: usize) -> f64 {
        self.data[roll * self.cols + total]
    }

    #[inline(always)]
    fn set(&mut self, roll: usize, total: usize, p: f64) {
        self.data[roll * self.cols + total] = p;
    }
}

/// Build the per-roll-count, per-partial-sum probability table.
fn build_table(params: &TrialParams) -> ProbTable {
    let sides = params.dice_sides as usize;
    let target = params.target_number as usize;
    let rolls = params.max_rolls as usize;

    let mut table = ProbTable::zeroed(rolls, target);
    if rolls == 0 || sides == 0 {
        return table;
    }
    let face_prob = 1.0 / sides as f64;

    // Row 1: uniform over faces that fit under the target.
    for face in 1..=sides.min(target) {
        table.set(1, face, face_prob);
    }

    // Rows 2..: convolve with one more die. Only strictly positive
    // prior totals contribute (total - face > 0).
    for roll in 2..=rolls {
        for total in 1..=target {
            let mut acc = 0.0;
            for face in 1..=sides.min(total - 1) {
                acc += table.at(roll - 1, total - face) * face_prob;
            }
            table.set(roll, total, acc);
        }
    }
    table
}

/// Sum the table into the two aggregate buckets.
///
/// The lower neighbor (`target - 1`) counts whenever it is positive.
/// The upper neighbor (`target + 1`) is gated twice: it must fit on the
/// die, and it must fall inside the table's column bound. The table is
/// truncated at the target column, so the second gate keeps the term at
/// zero for every die — the two neighbors are deliberately asymmetric.
fn aggregate(table: &ProbTable, params: &TrialParams) -> Odds {
    let sides = params.dice_sides as usize;
    let target = params.target_number as usize;
    let rolls = params.max_rolls as usize;

    let mut win = 0.0;
    let mut partial_win = 0.0;
    for roll in 1..=rolls {
        win += table.at(roll, target);
        if target > 1 {
            partial_win += table.at(roll, target - 1);
        }
        let upper = target + 1;
        if upper <= sides && upper < table.cols {
            partial_win += table.at(roll, upper);
        }
    }
    Odds { win, partial_win }
}

/// The one entry point callers use. Owns the memoization cache; share
/// the engine behind an `Arc` to share the cache.
#[derive(Debug, Default)]
pub struct OddsEngine {
    cache: OddsCache,
}

impl OddsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cumulative win and partial-win probability for the given trial.
    ///
    /// Total for every input: out-of-range targets silently yield
    /// near-zero probabilities rather than an error. Results are
    /// memoized on the full parameter tuple; a repeated call returns
    /// the stored pair without rebuilding the table.
    pub fn compute(&self, params: &TrialParams) -> Odds {
        if let Some(odds) = self.cache.get(params) {
            return odds;
        }
        let table = build_table(params);
        let odds = aggregate(&table, params);
        self.cache.insert(*params, odds);
        odds
    }

    /// [`compute`](Self::compute) behind [`TrialParams::validate`]:
    /// rejects unreachable or sub-die targets instead of returning
    /// near-zero output.
    pub fn compute_checked(&self, params: &TrialParams) -> Result<Odds, ParamsError> {
        params.validate()?;
        Ok(self.compute(params))
    }

    /// The engine's cache, exposed for observability.
    pub fn cache(&self) -> &OddsCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn single_roll_d6_target_6() {
        let engine = OddsEngine::new();
        let odds = engine.compute(&TrialParams::new(6, 6, 1));
        // Win: rolling a 6. Partial win: rolling a 5 — a 7 does not
        // exist on the die.
        assert!((odds.win - 1.0 / 6.0).abs() < EPS);
        assert!((odds.partial_win - 1.0 / 6.0).abs() < EPS);
        assert!((odds.loss() - 4.0 / 6.0).abs() < EPS);
    }

    #[test]
    fn single_roll_target_above_die_cannot_win() {
        let engine = OddsEngine::new();
        let odds = engine.compute(&TrialParams::new(6, 7, 1));
        assert_eq!(odds.win, 0.0);
        // The 6 face still lands on target - 1.
        assert!((odds.partial_win - 1.0 / 6.0).abs() < EPS);
    }

    #[test]
    fn two_rolls_d6_target_7() {
        let engine = OddsEngine::new();
        let odds = engine.compute(&TrialParams::new(6, 7, 2));
        // Win: 6 ordered pairs summing to 7 out of 36.
        assert!((odds.win - 6.0 / 36.0).abs() < EPS);
        // Partial: a 6 on roll one (1/6) or one of 5 pairs summing to 6.
        assert!((odds.partial_win - (1.0 / 6.0 + 5.0 / 36.0)).abs() < EPS);
    }

    #[test]
    fn two_rolls_d6_target_12() {
        let engine = OddsEngine::new();
        let odds = engine.compute(&TrialParams::new(6, 12, 2));
        assert!((odds.win - 1.0 / 36.0).abs() < EPS);
        assert!((odds.partial_win - 2.0 / 36.0).abs() < EPS);
    }

    #[test]
    fn upper_neighbor_excluded_by_column_bound() {
        // Target below the die size: target + 1 = 6 fits on a d6, but
        // the table has no column past the target, so only the lower
        // neighbor contributes.
        let engine = OddsEngine::new();
        let odds = engine.compute(&TrialParams::new(6, 5, 1));
        assert!((odds.win - 1.0 / 6.0).abs() < EPS);
        assert!((odds.partial_win - 1.0 / 6.0).abs() < EPS);
    }

    #[test]
    fn win_grows_with_roll_budget_until_target_unreachable_by_count() {
        let engine = OddsEngine::new();
        let mut prev = 0.0;
        for rolls in 1..=10 {
            let odds = engine.compute(&TrialParams::new(6, 6, rolls));
            assert!(
                odds.win >= prev - EPS,
                "win dropped at rolls={rolls}: {} < {prev}",
                odds.win
            );
            // An exact hit at roll r needs r <= target; up to there the
            // budget adds fresh winning paths.
            if (2..=6).contains(&rolls) {
                assert!(odds.win > prev + EPS, "no growth at rolls={rolls}");
            }
            prev = odds.win;
        }
        assert!(prev < 1.0);
    }

    #[test]
    fn repeated_call_hits_cache_and_is_bit_identical() {
        let engine = OddsEngine::new();
        let params = TrialParams::new(6, 18, 10);

        let first = engine.compute(&params);
        assert_eq!(engine.cache().misses(), 1);
        assert_eq!(engine.cache().hits(), 0);

        let second = engine.compute(&params);
        assert_eq!(engine.cache().hits(), 1);
        assert_eq!(first.win.to_bits(), second.win.to_bits());
        assert_eq!(first.partial_win.to_bits(), second.partial_win.to_bits());
    }

    #[test]
    fn cache_distinguishes_die_sizes() {
        // Same target and budget, different die: a d4 cannot reach 6 in
        // one roll. A cache keyed without the die size would leak the
        // d6 result here.
        let engine = OddsEngine::new();
        let d6 = engine.compute(&TrialParams::new(6, 6, 1));
        let d4 = engine.compute(&TrialParams::new(4, 6, 1));
        assert!((d6.win - 1.0 / 6.0).abs() < EPS);
        assert_eq!(d4.win, 0.0);
    }

    #[test]
    fn far_out_of_range_target_is_silent_zero() {
        let engine = OddsEngine::new();
        let odds = engine.compute(&TrialParams::new(6, 1000, 10));
        assert_eq!(odds.win, 0.0);
        assert_eq!(odds.partial_win, 0.0);
    }

    #[test]
    fn checked_compute_rejects_what_compute_accepts() {
        let engine = OddsEngine::new();
        let params = TrialParams::new(6, 1000, 10);
        assert!(engine.compute_checked(&params).is_err());
        let ok = engine
            .compute_checked(&TrialParams::new(6, 24, 10))
            .unwrap();
        assert!(ok.win > 0.0);
    }
}
