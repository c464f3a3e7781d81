//! Team draw: shuffle the player list and deal into the team slots.

use crate::models::{GameDay, Player, PlayerId, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// Shuffle all players (Fisher-Yates via `shuffle`) and deal them
/// round-robin into the given teams by `index % team_count`.
///
/// Every player lands in exactly one team and team sizes differ by at
/// most one. The RNG is injected so tests can seed it.
pub fn draw_teams<R: Rng>(
    players: &[Player],
    team_names: &[String],
    rng: &mut R,
) -> Result<HashMap<String, Vec<PlayerId>>, TournamentError> {
    if players.is_empty() {
        return Err(TournamentError::EmptyPlayerList);
    }
    if team_names.is_empty() {
        return Err(TournamentError::NotEnoughTeams);
    }

    let mut ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    ids.shuffle(rng);

    let mut assignment: HashMap<String, Vec<PlayerId>> = team_names
        .iter()
        .map(|name| (name.clone(), Vec::new()))
        .collect();
    for (i, id) in ids.iter().enumerate() {
        let team = &team_names[i % team_names.len()];
        assignment.get_mut(team).unwrap().push(*id);
    }
    Ok(assignment)
}

/// Apply a draw result to the game day: a destructive full reset that
/// clears every prior assignment (manual edits included) before writing
/// the drawn ones. The caller is responsible for confirming with the
/// operator first.
pub fn apply_draw(day: &mut GameDay, assignment: &HashMap<String, Vec<PlayerId>>) {
    for p in &mut day.players {
        p.team = None;
    }
    for (team, ids) in assignment {
        for id in ids {
            if let Some(p) = day.get_player_mut(*id) {
                p.team = Some(team.clone());
            }
        }
    }
}
