//! Tournament settings: durations, active team subset, mode.

use serde::{Deserialize, Serialize};

/// Which tournament format the game day is running.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentType {
    /// Round robin among the active teams, then final and third place.
    #[default]
    Championship,
    /// Ladder: the winning team stays on and faces new challengers.
    WinnerStays,
}

/// Per-game-day configuration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentSettings {
    /// Regular match duration, in seconds.
    pub match_duration_secs: u64,
    /// Final match duration, in seconds.
    pub final_duration_secs: u64,
    /// Teams taking part today (at least 2, subset of the roster).
    pub active_teams: Vec<String>,
    pub tournament_type: TournamentType,
    /// Current holder in winner-stays mode; None in championship mode and
    /// before the first challenge is decided.
    pub holder: Option<String>,
}

impl TournamentSettings {
    /// Defaults: 10 minute matches, 15 minute final, all given teams active,
    /// championship mode.
    pub fn new(active_teams: Vec<String>) -> Self {
        Self {
            match_duration_secs: 600,
            final_duration_secs: 900,
            active_teams,
            tournament_type: TournamentType::Championship,
            holder: None,
        }
    }

    /// Duration for a match of the given kind.
    pub fn duration_for(&self, is_final: bool) -> u64 {
        if is_final {
            self.final_duration_secs
        } else {
            self.match_duration_secs
        }
    }
}
