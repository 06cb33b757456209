//! Game constants shared by the engine, the HTTP layer, and the binaries.

/// Die sizes the presentation layer accepts (d4 through d20).
/// The engine itself only requires `dice_sides >= 1`.
pub const SUPPORTED_DICE: [u32; 6] = [4, 6, 8, 10, 12, 20];

/// Roll budget used when a request omits `max_rolls`.
pub const DEFAULT_MAX_ROLLS: u32 = 10;

/// Largest roll budget the presentation layer accepts.
pub const MAX_ROLLS_LIMIT: u32 = 100;

/// Default stake when a request omits `bet`.
pub const DEFAULT_BET: f64 = 100.0;

/// Default win payout ratio (2:1).
pub const DEFAULT_WIN_RATIO: f64 = 2.0;

/// Default partial-win payout ratio (1:1).
pub const DEFAULT_PARTIAL_WIN_RATIO: f64 = 1.0;

/// Human-readable names for the three outcome buckets.
pub const OUTCOME_NAMES: [&str; 3] = ["Win", "Partial Win", "Loss"];

/// Whether `sides` is one of the supported die sizes.
#[inline(always)]
pub fn is_supported_die(sides: u32) -> bool {
    SUPPORTED_DICE.contains(&sides)
}
