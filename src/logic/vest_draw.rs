//! Vest chore lottery: who washes the vests after the game day.

use crate::models::{Player, PlayerId, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One step of the staged reveal the presentation layer plays before
/// showing the winner.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct RevealStage {
    pub label: &'static str,
    pub hold_secs: u64,
}

/// The fixed reveal sequence. Pacing is a presentation concern; the winner
/// is already decided when the sequence starts.
pub fn reveal_sequence() -> [RevealStage; 3] {
    [
        RevealStage { label: "Shuffling names...", hold_secs: 2 },
        RevealStage { label: "Checking immunity...", hold_secs: 2 },
        RevealStage { label: "And the vest goes to...", hold_secs: 2 },
    ]
}

/// Ephemeral vest draw state: the eligible pool, at most one immune player,
/// and the last draw's winner. Reset by explicit user action only.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct VestDraw {
    pub pool: Vec<PlayerId>,
    /// Stays visible in the pool list but is skipped by the draw.
    pub immune: Option<PlayerId>,
    pub winner: Option<PlayerId>,
}

impl VestDraw {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player to the pool; duplicates are ignored.
    pub fn add_player(&mut self, id: PlayerId) {
        if !self.pool.contains(&id) {
            self.pool.push(id);
        }
    }

    pub fn add_players(&mut self, ids: impl IntoIterator<Item = PlayerId>) {
        for id in ids {
            self.add_player(id);
        }
    }

    pub fn remove_player(&mut self, id: PlayerId) {
        self.pool.retain(|p| *p != id);
        if self.immune == Some(id) {
            self.immune = None;
        }
    }

    /// Mark one player immune (or clear immunity with `None`). The player
    /// stays listed in the pool but cannot be drawn.
    pub fn set_immune(&mut self, id: Option<PlayerId>) {
        self.immune = id;
    }

    /// Pool minus the immune player, in pool order.
    pub fn eligible(&self) -> Vec<PlayerId> {
        self.pool
            .iter()
            .copied()
            .filter(|id| Some(*id) != self.immune)
            .collect()
    }

    /// Draw the vest washer uniformly among eligible players.
    ///
    /// Computed exactly once per call, from the pool as it stands now;
    /// the staged reveal never re-samples. Fails on an empty eligible pool
    /// with the winner left unset.
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Result<PlayerId, TournamentError> {
        let eligible = self.eligible();
        let winner = *eligible.choose(rng).ok_or(TournamentError::EmptyDrawPool)?;
        self.winner = Some(winner);
        Ok(winner)
    }

    /// Clear pool, immunity and winner.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Ids of every player not on the given team, for the "everyone except
/// the champion" bulk add.
pub fn pool_excluding_team(players: &[Player], team: &str) -> Vec<PlayerId> {
    players
        .iter()
        .filter(|p| p.team.as_deref() != Some(team))
        .map(|p| p.id)
        .collect()
}
