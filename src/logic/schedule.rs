//! Championship schedule: round-robin fixtures, playoff slots, active-set
//! filtering, and the explicit match finalization step.

use crate::logic::standings::standings;
use crate::logic::winner_stays;
use crate::models::{GameDay, GameMatch, MatchType, TournamentError, TournamentType};

/// Double round robin over the active subset: every pair meets twice with
/// sides swapped (4 teams -> 12 fixtures, 2 teams -> 2).
fn round_robin_fixtures(active: &[String]) -> Vec<(String, String)> {
    let mut fixtures = Vec::new();
    for pass in 0..2 {
        for i in 0..active.len() {
            for j in (i + 1)..active.len() {
                let (home, away) = if pass == 0 { (i, j) } else { (j, i) };
                fixtures.push((active[home].clone(), active[away].clone()));
            }
        }
    }
    fixtures
}

/// Rebuild the championship schedule for the current active subset.
///
/// Regular fixtures are numbered from 1, followed by the third-place and
/// final slots (participants unknown until the round robin concludes).
/// Playoff slots only exist when at least four teams are active.
pub fn regenerate_schedule(day: &mut GameDay) -> Result<(), TournamentError> {
    if day.settings.tournament_type != TournamentType::Championship {
        return Err(TournamentError::InvalidState);
    }
    if day.settings.active_teams.len() < 2 {
        return Err(TournamentError::NotEnoughTeams);
    }

    let fixtures = round_robin_fixtures(&day.settings.active_teams);
    let mut matches: Vec<GameMatch> = fixtures
        .into_iter()
        .enumerate()
        .map(|(i, (a, b))| GameMatch::new(i as u32 + 1, a, b, MatchType::Regular))
        .collect();

    if day.settings.active_teams.len() >= 4 {
        let next = matches.len() as u32 + 1;
        matches.push(GameMatch::playoff_slot(next, MatchType::ThirdPlace));
        matches.push(GameMatch::playoff_slot(next + 1, MatchType::Final));
    }

    day.matches = matches;
    Ok(())
}

/// Fill playoff slots once every regular fixture has been finalized:
/// final gets 1st vs 2nd, third place gets 3rd vs 4th.
pub fn populate_playoffs(day: &mut GameDay) {
    let regular_done = day
        .matches
        .iter()
        .filter(|m| m.match_type == MatchType::Regular)
        .all(|m| m.played);
    if !regular_done {
        return;
    }

    let table = standings(&day.matches, &day.settings.active_teams);
    if table.len() < 4 {
        return;
    }

    for m in &mut day.matches {
        if m.played || m.team_a.is_some() {
            continue;
        }
        let (a, b) = match m.match_type {
            MatchType::Final => (0, 1),
            MatchType::ThirdPlace => (2, 3),
            _ => continue,
        };
        m.team_a = Some(table[a].team.clone());
        m.team_b = Some(table[b].team.clone());
    }
}

/// Whether a match belongs to the active set shown to the operator:
/// playoff slots always, regular fixtures only between active teams.
pub fn is_match_active(m: &GameMatch, active_teams: &[String]) -> bool {
    if m.is_playoff() {
        return true;
    }
    match (&m.team_a, &m.team_b) {
        (Some(a), Some(b)) => active_teams.contains(a) && active_teams.contains(b),
        _ => false,
    }
}

/// Change the active team subset (at least 2, all from the roster).
///
/// In championship mode the round-robin schedule is regenerated for the
/// new subset; in winner-stays mode the holder and challenge queue are
/// reset over the new subset.
pub fn set_active_teams(day: &mut GameDay, teams: Vec<String>) -> Result<(), TournamentError> {
    if teams.len() < 2 {
        return Err(TournamentError::NotEnoughTeams);
    }
    for name in &teams {
        if !day.has_team(name) {
            return Err(TournamentError::UnknownTeam(name.clone()));
        }
    }
    day.settings.active_teams = teams;
    match day.settings.tournament_type {
        TournamentType::Championship => regenerate_schedule(day),
        TournamentType::WinnerStays => winner_stays::enter_winner_stays(day),
    }
}

/// Switch the tournament mode, rebuilding the match list for the target mode.
pub fn switch_mode(day: &mut GameDay, mode: TournamentType) -> Result<(), TournamentError> {
    if day.settings.tournament_type == mode {
        return Ok(());
    }
    match mode {
        TournamentType::Championship => winner_stays::exit_winner_stays(day),
        TournamentType::WinnerStays => {
            day.settings.tournament_type = TournamentType::WinnerStays;
            winner_stays::enter_winner_stays(day)
        }
    }
}

/// Finish a match: the explicit transition that makes its result count.
///
/// Requires both scores. A tied final or third-place match additionally
/// needs a recorded penalty winner. Afterwards the playoff slots are
/// populated (championship) or the next challenge is generated
/// (winner-stays).
pub fn finalize_match(day: &mut GameDay, number: u32) -> Result<(), TournamentError> {
    let m = day
        .get_match_mut(number)
        .ok_or(TournamentError::MatchNotFound(number))?;
    if m.played {
        return Err(TournamentError::AlreadyFinalized(number));
    }
    let (score_a, score_b) = match (m.score_a, m.score_b) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(TournamentError::MissingScores(number)),
    };
    if m.is_playoff() && score_a == score_b && m.winner.is_none() {
        return Err(TournamentError::MissingTiebreakWinner(number));
    }
    let match_type = m.match_type;
    m.played = true;

    match match_type {
        MatchType::WinnerStays => winner_stays::advance_after_challenge(day, number)?,
        _ => populate_playoffs(day),
    }
    Ok(())
}
