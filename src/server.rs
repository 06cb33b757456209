//! Axum HTTP server: the presentation layer's view of the engine.
//!
//! The engine is shared as `Arc<OddsEngine>` across async handlers, so
//! every request sees (and fills) the same memoization cache.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/odds` | Win/partial-win/loss probabilities for one trial |
//! | POST | `/evaluate` | Probabilities plus payout figures for a bet |
//!
//! Range validation lives here, in front of the engine: die sizes are
//! restricted to the supported set, roll budgets to 1..=100, and the
//! target to `[dice_sides, dice_sides * max_rolls]`. Anything outside
//! is a 400 before the engine is reached.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

use crate::constants::{
    is_supported_die, DEFAULT_MAX_ROLLS, MAX_ROLLS_LIMIT, OUTCOME_NAMES, SUPPORTED_DICE,
};
use crate::engine::OddsEngine;
use crate::payout::PayoutSchedule;
use crate::types::TrialParams;

pub type AppState = Arc<OddsEngine>;

pub fn create_router(engine: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health_check))
        .route("/odds", get(handle_get_odds))
        .route("/evaluate", post(handle_evaluate))
        .layer(cors)
        .with_state(engine)
}

// ── Request types ───────────────────────────────────────────────────

fn default_max_rolls() -> u32 {
    DEFAULT_MAX_ROLLS
}

#[derive(Deserialize)]
struct OddsQuery {
    dice_sides: u32,
    target_number: u32,
    #[serde(default = "default_max_rolls")]
    max_rolls: u32,
}

#[derive(Deserialize)]
struct EvaluateRequest {
    dice_sides: u32,
    target_number: u32,
    #[serde(default = "default_max_rolls")]
    max_rolls: u32,
    #[serde(default)]
    bet: Option<f64>,
    #[serde(default)]
    win_payout_ratio: Option<f64>,
    #[serde(default)]
    partial_win_payout_ratio: Option<f64>,
}

fn error_response(status: StatusCode, msg: &str) -> (StatusCode, Json<serde_json::Value>) {
    (status, Json(serde_json::json!({ "error": msg })))
}

/// Presentation-layer bounds, then the shared range validation.
fn check_request(params: &TrialParams) -> Result<(), (StatusCode, Json<serde_json::Value>)> {
    if !is_supported_die(params.dice_sides) {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            &format!(
                "Unsupported die d{}; supported sizes are {:?}",
                params.dice_sides, SUPPORTED_DICE
            ),
        ));
    }
    if params.max_rolls > MAX_ROLLS_LIMIT {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            &format!("max_rolls must be at most {}", MAX_ROLLS_LIMIT),
        ));
    }
    params
        .validate()
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, &e.to_string()))
}

// ── Handlers ────────────────────────────────────────────────────────

async fn handle_health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

async fn handle_get_odds(
    State(engine): State<AppState>,
    Query(q): Query<OddsQuery>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let params = TrialParams::new(q.dice_sides, q.target_number, q.max_rolls);
    check_request(&params)?;

    let odds = engine.compute(&params);
    Ok(Json(serde_json::json!({
        "dice_sides": params.dice_sides,
        "target_number": params.target_number,
        "max_rolls": params.max_rolls,
        "win_probability": odds.win,
        "partial_win_probability": odds.partial_win,
        "loss_probability": odds.loss(),
    })))
}

async fn handle_evaluate(
    State(engine): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let params = TrialParams::new(req.dice_sides, req.target_number, req.max_rolls);
    check_request(&params)?;

    let defaults = PayoutSchedule::default();
    let schedule = PayoutSchedule {
        bet: req.bet.unwrap_or(defaults.bet),
        win_ratio: req.win_payout_ratio.unwrap_or(defaults.win_ratio),
        partial_win_ratio: req
            .partial_win_payout_ratio
            .unwrap_or(defaults.partial_win_ratio),
    };
    if !schedule.bet.is_finite() || schedule.bet <= 0.0 {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "bet must be a positive number",
        ));
    }
    if !schedule.win_ratio.is_finite()
        || !schedule.partial_win_ratio.is_finite()
        || schedule.win_ratio < 0.0
        || schedule.partial_win_ratio < 0.0
    {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "payout ratios must be non-negative numbers",
        ));
    }

    let odds = engine.compute(&params);
    let payouts = schedule.payouts();
    let buckets = [odds.win, odds.partial_win, odds.loss()];

    Ok(Json(serde_json::json!({
        "dice_sides": params.dice_sides,
        "target_number": params.target_number,
        "max_rolls": params.max_rolls,
        "max_possible_total": params.max_possible_total(),
        "buckets": OUTCOME_NAMES
            .iter()
            .zip(buckets)
            .map(|(name, p)| serde_json::json!({ "name": name, "probability": p }))
            .collect::<Vec<_>>(),
        "win_probability": odds.win,
        "partial_win_probability": odds.partial_win,
        "loss_probability": odds.loss(),
        "bet": schedule.bet,
        "win_payout": payouts.win,
        "partial_win_payout": payouts.partial_win,
        "expected_profit": schedule.expected_profit(&odds),
    })))
}
