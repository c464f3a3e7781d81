//! Goal events: who scored, for which team, in which match and minute.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a goal event.
pub type GoalEventId = Uuid;

/// A recorded goal. Removing an event decrements exactly the score of the
/// match/team it references.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GoalEvent {
    pub id: GoalEventId,
    pub player_id: PlayerId,
    /// Denormalized for display; the player may later be removed.
    pub player_name: String,
    pub team: String,
    pub match_number: u32,
    /// Match minute the goal was scored, from the match clock.
    pub minute: u32,
}

impl GoalEvent {
    pub fn new(
        player_id: PlayerId,
        player_name: impl Into<String>,
        team: impl Into<String>,
        match_number: u32,
        minute: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_id,
            player_name: player_name.into(),
            team: team.into(),
            match_number,
            minute,
        }
    }
}
