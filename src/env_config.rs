//! Shared environment configuration for the dice-odds binaries.

/// Read `DICE_ODDS_PORT` (default 9000).
pub fn server_port() -> u16 {
    std::env::var("DICE_ODDS_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9000)
}

/// Read `RAYON_NUM_THREADS` (default 8) and build the global rayon
/// pool, tolerating an already-initialized pool. Returns thread count.
pub fn init_rayon_threads_lenient() -> usize {
    let num_threads = std::env::var("RAYON_NUM_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok(); // May fail if already initialized
    num_threads
}
