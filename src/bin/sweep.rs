//! dice-odds-sweep: tabulate odds for every reachable target of a die.
//!
//! For a given die and roll budget, computes the win/partial-win/loss
//! split for each target in `[sides, sides * rolls]`, prints a table,
//! and optionally writes it as CSV.

use std::time::Instant;

use rayon::prelude::*;

use dice_odds::constants::{is_supported_die, DEFAULT_MAX_ROLLS, MAX_ROLLS_LIMIT, SUPPORTED_DICE};
use dice_odds::engine::OddsEngine;
use dice_odds::env_config;
use dice_odds::payout::PayoutSchedule;
use dice_odds::types::{Odds, TrialParams};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut sides: u32 = 6;
    let mut rolls: u32 = DEFAULT_MAX_ROLLS;
    let mut csv_path: Option<String> = None;

    // Parse args
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--sides" => {
                i += 1;
                sides = args[i].parse().expect("Invalid --sides");
            }
            "--rolls" => {
                i += 1;
                rolls = args[i].parse().expect("Invalid --rolls");
            }
            "--csv" => {
                i += 1;
                csv_path = Some(args[i].clone());
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if !is_supported_die(sides) {
        eprintln!("Unsupported die d{}; supported sizes: {:?}", sides, SUPPORTED_DICE);
        std::process::exit(1);
    }
    if rolls == 0 || rolls > MAX_ROLLS_LIMIT {
        eprintln!("--rolls must be in 1..={}", MAX_ROLLS_LIMIT);
        std::process::exit(1);
    }

    let threads = env_config::init_rayon_threads_lenient();
    println!("Sweeping d{} targets {}..={} ({} rolls, {} threads)",
        sides, sides, sides * rolls, rolls, threads);

    let engine = OddsEngine::new();
    let schedule = PayoutSchedule::default();
    let t_start = Instant::now();

    let mut rows: Vec<(u32, Odds)> = (sides..=sides * rolls)
        .into_par_iter()
        .map(|target| {
            let params = TrialParams::new(sides, target, rolls);
            (target, engine.compute(&params))
        })
        .collect();
    rows.sort_by_key(|&(target, _)| target);

    println!(
        "{:>6} {:>10} {:>12} {:>10} {:>12}",
        "target", "win", "partial_win", "loss", "exp_profit"
    );
    for (target, odds) in &rows {
        println!(
            "{:>6} {:>10.6} {:>12.6} {:>10.6} {:>12.2}",
            target,
            odds.win,
            odds.partial_win,
            odds.loss(),
            schedule.expected_profit(odds),
        );
    }

    let best = rows
        .iter()
        .max_by(|a, b| a.1.win.total_cmp(&b.1.win))
        .expect("sweep range is never empty");
    println!(
        "Best target by win probability: {} (p={:.6}), {} targets in {:.2}s",
        best.0,
        best.1.win,
        rows.len(),
        t_start.elapsed().as_secs_f64()
    );

    if let Some(path) = csv_path {
        let mut out = String::from("target,win,partial_win,loss\n");
        for (target, odds) in &rows {
            out.push_str(&format!(
                "{},{},{},{}\n",
                target,
                odds.win,
                odds.partial_win,
                odds.loss()
            ));
        }
        if let Err(e) = std::fs::write(&path, out) {
            eprintln!("Failed to write {}: {}", path, e);
            std::process::exit(1);
        }
        println!("Wrote {}", path);
    }
}

fn print_usage() {
    println!("Usage: dice-odds-sweep [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --sides N    Die size (default 6; one of {:?})", SUPPORTED_DICE);
    println!("  --rolls N    Roll budget (default {})", DEFAULT_MAX_ROLLS);
    println!("  --csv PATH   Also write the table as CSV");
    println!("  --help, -h   Show this help");
}
