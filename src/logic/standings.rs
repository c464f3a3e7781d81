//! Standings: points table for championship mode, win ladder for winner-stays,
//! and the advisory tiebreaker resolution.

use crate::models::{GameMatch, MatchType};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One row of the championship standings table. Derived, never stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub team: String,
    pub points: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_diff: i32,
    pub games_played: u32,
}

impl StandingRow {
    fn new(team: &str) -> Self {
        Self {
            team: team.to_string(),
            points: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goal_diff: 0,
            games_played: 0,
        }
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.games_played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        self.goal_diff = self.goals_for as i32 - self.goals_against as i32;
        if scored > conceded {
            self.wins += 1;
            self.points += 3;
        } else if scored == conceded {
            self.draws += 1;
            self.points += 1;
        } else {
            self.losses += 1;
        }
    }
}

/// Compute the championship table from finalized regular matches.
///
/// Only matches that are `played` with both scores present and both teams
/// in the active subset contribute; playoff results never feed the table.
/// Rows are sorted descending by points, then goal difference, then goals
/// scored; ties beyond that keep the `active_teams` input order (no
/// implicit random tie-break).
pub fn standings(matches: &[GameMatch], active_teams: &[String]) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = active_teams.iter().map(|t| StandingRow::new(t)).collect();

    for m in matches {
        if !m.played || m.match_type != MatchType::Regular {
            continue;
        }
        let (team_a, team_b) = match (&m.team_a, &m.team_b) {
            (Some(a), Some(b)) => (a, b),
            _ => continue,
        };
        let (score_a, score_b) = match (m.score_a, m.score_b) {
            (Some(a), Some(b)) => (a, b),
            _ => continue,
        };
        if !active_teams.contains(team_a) || !active_teams.contains(team_b) {
            continue;
        }
        if let Some(row) = rows.iter_mut().find(|r| &r.team == team_a) {
            row.record(score_a, score_b);
        }
        if let Some(row) = rows.iter_mut().find(|r| &r.team == team_b) {
            row.record(score_b, score_a);
        }
    }

    // Vec::sort_by is stable, so rows tied on all three keys keep input order.
    rows.sort_by(|a, b| {
        (b.points, b.goal_diff, b.goals_for).cmp(&(a.points, a.goal_diff, a.goals_for))
    });
    rows
}

/// One row of the winner-stays ladder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LadderRow {
    pub team: String,
    pub wins: u32,
    pub games_played: u32,
    /// wins / games_played, 0.0 before the first game.
    pub win_rate: f64,
}

/// Rank teams in winner-stays mode by raw win count, then win rate.
///
/// Only finalized winner-stays matches with both scores contribute. Draws
/// and goal difference are ignored: a drawn challenge moves holdership but
/// is a win for neither side.
pub fn winner_stays_table(matches: &[GameMatch], active_teams: &[String]) -> Vec<LadderRow> {
    let mut rows: Vec<LadderRow> = active_teams
        .iter()
        .map(|t| LadderRow {
            team: t.clone(),
            wins: 0,
            games_played: 0,
            win_rate: 0.0,
        })
        .collect();

    for m in matches {
        if !m.played || m.match_type != MatchType::WinnerStays {
            continue;
        }
        let (team_a, team_b) = match (&m.team_a, &m.team_b) {
            (Some(a), Some(b)) => (a, b),
            _ => continue,
        };
        let (score_a, score_b) = match (m.score_a, m.score_b) {
            (Some(a), Some(b)) => (a, b),
            _ => continue,
        };
        for (team, won) in [(team_a, score_a > score_b), (team_b, score_b > score_a)] {
            if let Some(row) = rows.iter_mut().find(|r| &r.team == team) {
                row.games_played += 1;
                if won {
                    row.wins += 1;
                }
            }
        }
    }

    for row in &mut rows {
        if row.games_played > 0 {
            row.win_rate = row.wins as f64 / row.games_played as f64;
        }
    }

    rows.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then(b.win_rate.partial_cmp(&a.win_rate).unwrap_or(std::cmp::Ordering::Equal))
    });
    rows
}

/// How the operator wants a points tie resolved.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiebreakStrategy {
    /// Keep the table's goal-difference ordering.
    KeepGoalDifference,
    /// Shuffle the tied teams into a random order.
    Shuffle,
}

/// Groups of two or more teams sharing identical points, in table order.
pub fn tied_point_groups(rows: &[StandingRow]) -> Vec<Vec<String>> {
    let mut groups = Vec::new();
    let mut i = 0;
    while i < rows.len() {
        let mut j = i + 1;
        while j < rows.len() && rows[j].points == rows[i].points {
            j += 1;
        }
        if j - i >= 2 {
            groups.push(rows[i..j].iter().map(|r| r.team.clone()).collect());
        }
        i = j;
    }
    groups
}

/// Resolve a tied group into an advisory ordering.
///
/// Advisory only: the result is shown to the operator and never written
/// back into the standings computation.
pub fn resolve_tiebreak<R: Rng>(
    group: &[String],
    strategy: TiebreakStrategy,
    rng: &mut R,
) -> Vec<String> {
    let mut order: Vec<String> = group.to_vec();
    if strategy == TiebreakStrategy::Shuffle {
        order.shuffle(rng);
    }
    order
}
