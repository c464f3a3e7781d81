//! Winner-stays ladder: a current holder defends against a rotating queue
//! of challengers.

use crate::models::{GameDay, GameMatch, MatchType, TournamentError, TournamentType};

/// Enter winner-stays mode (or reset it after an active-subset change):
/// discards the current match list and opens a single challenge between
/// the first two active teams. `team_a` is the holder-side slot.
pub fn enter_winner_stays(day: &mut GameDay) -> Result<(), TournamentError> {
    if day.settings.tournament_type != TournamentType::WinnerStays {
        return Err(TournamentError::InvalidState);
    }
    if day.settings.active_teams.len() < 2 {
        return Err(TournamentError::NotEnoughTeams);
    }
    day.settings.holder = None;
    day.matches = vec![GameMatch::new(
        1,
        day.settings.active_teams[0].clone(),
        day.settings.active_teams[1].clone(),
        MatchType::WinnerStays,
    )];
    Ok(())
}

/// Leave winner-stays mode: accumulated challenges are discarded, the
/// holder cleared, and the round-robin schedule restored.
pub fn exit_winner_stays(day: &mut GameDay) -> Result<(), TournamentError> {
    day.settings.tournament_type = TournamentType::Championship;
    day.settings.holder = None;
    crate::logic::schedule::regenerate_schedule(day)
}

/// Apply the ladder transition for a finished challenge and queue the next one.
///
/// Higher score becomes (or remains) holder. Equal scores: the challenger
/// (`team_b`) takes over; the holder must win outright to stay on. The
/// next challenger is the next active team in roster order after the one
/// that just played, cycling and skipping the new holder.
pub fn advance_after_challenge(day: &mut GameDay, number: u32) -> Result<(), TournamentError> {
    let m = day
        .get_match(number)
        .ok_or(TournamentError::MatchNotFound(number))?;
    if m.match_type != MatchType::WinnerStays || !m.played {
        return Err(TournamentError::InvalidState);
    }
    let (team_a, team_b) = match (m.team_a.clone(), m.team_b.clone()) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(TournamentError::InvalidState),
    };
    let (score_a, score_b) = match (m.score_a, m.score_b) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(TournamentError::MissingScores(number)),
    };

    let new_holder = if score_a > score_b { team_a } else { team_b.clone() };

    let next_challenger = next_challenger(&day.settings.active_teams, &team_b, &new_holder);
    day.settings.holder = Some(new_holder.clone());

    if let Some(challenger) = next_challenger {
        let next_number = day.next_match_number();
        day.matches.push(GameMatch::new(
            next_number,
            new_holder,
            challenger,
            MatchType::WinnerStays,
        ));
    }
    Ok(())
}

/// Next active team after `previous` in roster order, cycling, that is not
/// the holder. None when the holder is the only active team.
fn next_challenger(active: &[String], previous: &str, holder: &str) -> Option<String> {
    let start = active.iter().position(|t| t == previous).unwrap_or(0);
    for offset in 1..=active.len() {
        let candidate = &active[(start + offset) % active.len()];
        if candidate != holder {
            return Some(candidate.clone());
        }
    }
    None
}
