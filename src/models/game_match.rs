//! Match data: two teams, editable scores, and an explicit finalization flag.

use serde::{Deserialize, Serialize};

/// Which phase of the tournament a match belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Regular,
    Final,
    ThirdPlace,
    WinnerStays,
}

/// A single match, identified by its position in the schedule (`number`).
///
/// Playoff slots are created with `None` teams and populated once the
/// round robin concludes. Scores stay editable until `played` is set by
/// the explicit finalize operation; only finalized matches with both
/// scores present count towards standings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    /// Stable ordinal id: position in the schedule, starting at 1.
    pub number: u32,
    pub team_a: Option<String>,
    pub team_b: Option<String>,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    /// Set only by finalizing the match, never by score entry.
    pub played: bool,
    pub match_type: MatchType,
    /// Penalty shootout scores, used when regulation scores tie in an
    /// elimination match.
    pub penalty_a: Option<u32>,
    pub penalty_b: Option<u32>,
    /// Recorded winner of a tied elimination match.
    pub winner: Option<String>,
}

impl GameMatch {
    pub fn new(number: u32, team_a: impl Into<String>, team_b: impl Into<String>, match_type: MatchType) -> Self {
        Self {
            number,
            team_a: Some(team_a.into()),
            team_b: Some(team_b.into()),
            score_a: None,
            score_b: None,
            played: false,
            match_type,
            penalty_a: None,
            penalty_b: None,
            winner: None,
        }
    }

    /// A playoff slot whose participants are not yet known.
    pub fn playoff_slot(number: u32, match_type: MatchType) -> Self {
        Self {
            number,
            team_a: None,
            team_b: None,
            score_a: None,
            score_b: None,
            played: false,
            match_type,
            penalty_a: None,
            penalty_b: None,
            winner: None,
        }
    }

    /// Whether this is a playoff slot (final or third place).
    pub fn is_playoff(&self) -> bool {
        matches!(self.match_type, MatchType::Final | MatchType::ThirdPlace)
    }

    /// True when the match references the given team on either side.
    pub fn involves(&self, team: &str) -> bool {
        self.team_a.as_deref() == Some(team) || self.team_b.as_deref() == Some(team)
    }
}
