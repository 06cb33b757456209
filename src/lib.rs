//! # dice-odds — exact win/partial-win odds for a target-sum dice game
//!
//! A player rolls a fair N-sided die up to a bounded number of times,
//! summing the results, and stops on the first roll where the running
//! total reaches the target. Reaching the target exactly is a **win**,
//! landing adjacent to it a **partial win**, anything else a **loss**.
//! This crate computes the exact probability of the first two buckets
//! by dynamic programming over a `[roll_count][partial_sum]` table; the
//! loss bucket is the complement.
//!
//! ## Layout
//!
//! | Responsibility | Module |
//! |----------------|--------|
//! | DP table construction + bucket aggregation | [`engine`] |
//! | Result memoization (full-tuple key, hit/miss counters) | [`cache`] |
//! | Trial parameters, odds pair, range validation | [`types`] |
//! | Bet → payout derivation | [`payout`] |
//! | Monte Carlo cross-check of the win bucket | [`simulation`] |
//! | Axum HTTP endpoints | [`server`] |
//! | Environment configuration | [`env_config`] |
//!
//! ## Resolution
//!
//! The table is truncated at the target column: sums past the target
//! can never come back down (faces are positive), so they contribute to
//! no tracked bucket and are simply not materialized. That keeps the
//! table at `(max_rolls + 1) × (target + 1)` cells of `f64` — at the
//! supported limits (d20, 100 rolls) about 2 × 10^5 cells, built in
//! microseconds and discarded after aggregation. Only the aggregate
//! pair is cached.

pub mod cache;
pub mod constants;
pub mod engine;
pub mod env_config;
pub mod payout;
pub mod server;
pub mod simulation;
pub mod types;

pub use engine::OddsEngine;
pub use types::{Odds, ParamsError, TrialParams};
