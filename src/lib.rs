//! Mug Matcher - pair mugshots with the crimes they committed
//!
//! Core modules:
//! - `game`: Deterministic round logic (matching, scoring, lifecycle)
//! - `ledger`: Persisted points total and high score
//! - `source`: Inmate roster loading (static, file, HTTP)
//! - `storage`: Key-value storage abstraction (memory, LocalStorage on web)
//! - `settings`: Player preferences

pub mod game;
pub mod ledger;
pub mod settings;
pub mod source;
pub mod storage;

pub use game::{Inmate, Round, RoundPhase, SubmitOutcome};
pub use ledger::PointsLedger;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Points awarded per correctly matched crime
    pub const POINTS_PER_MATCH: u64 = 10;

    /// Default roster endpoint
    pub const INMATES_ENDPOINT: &str = "/api/inmates";

    /// Storage keys
    pub const POINTS_KEY: &str = "mugshot-game-points";
    pub const HIGH_SCORE_KEY: &str = "mugshot-game-high-score";
    pub const SETTINGS_KEY: &str = "mugshot-game-settings";

    /// Shown while the placeholder roster stands in for the real one
    pub const LOAD_ERROR_MESSAGE: &str = "Failed to load inmate data. Please try again later.";
}

/// Format elapsed milliseconds as `m:ss`
pub fn format_elapsed(elapsed_ms: f64) -> String {
    let total_secs = (elapsed_ms.max(0.0) / 1000.0).floor() as u64;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Integer percentage of `part` over `whole`, rounded half up (0 when `whole` is 0)
#[inline]
pub fn round_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0.0), "0:00");
        assert_eq!(format_elapsed(9_999.0), "0:09");
        assert_eq!(format_elapsed(61_000.0), "1:01");
        assert_eq!(format_elapsed(600_000.0), "10:00");
        assert_eq!(format_elapsed(-5.0), "0:00");
    }

    #[test]
    fn test_round_percent() {
        assert_eq!(round_percent(0, 0), 0);
        assert_eq!(round_percent(3, 3), 100);
        assert_eq!(round_percent(1, 3), 33);
        assert_eq!(round_percent(2, 3), 67);
        assert_eq!(round_percent(1, 8), 13);
    }
}
