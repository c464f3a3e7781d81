//! Persistence service: the external CRUD store the app opportunistically
//! mirrors state into. The in-memory tournament state stays authoritative;
//! every call here is fire-and-forget from the core's point of view.

use crate::models::{GameDay, GameDayId, GameMatch, GoalEvent, GoalEventId, Player, PlayerId};
use std::collections::HashMap;

/// Errors from the persistence service. Never fatal to gameplay: callers
/// log and continue from in-memory state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// Referenced record does not exist.
    NotFound,
    /// The backing service could not be reached or rejected the write.
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "Record not found"),
            StoreError::Unavailable(msg) => write!(f, "Persistence service unavailable: {}", msg),
        }
    }
}

/// CRUD operations on game days and their child records. Record shapes map
/// 1:1 to the in-memory entities; the match's `number` is the stable
/// ordinal shared with the core.
pub trait PersistenceService {
    // Game-day lifecycle
    fn create_game_day(&mut self, day: &GameDay) -> Result<(), StoreError>;
    fn fetch_active_day(&self) -> Result<Option<GameDay>, StoreError>;
    fn fetch_all_days(&self) -> Result<Vec<GameDay>, StoreError>;
    fn set_active_day(&mut self, id: GameDayId) -> Result<(), StoreError>;
    fn update_game_day(&mut self, day: &GameDay) -> Result<(), StoreError>;
    fn delete_game_day(&mut self, id: GameDayId) -> Result<(), StoreError>;

    // Players
    fn save_player(&mut self, day: GameDayId, player: &Player) -> Result<(), StoreError>;
    fn list_players(&self, day: GameDayId) -> Result<Vec<Player>, StoreError>;
    fn delete_player(&mut self, day: GameDayId, player: PlayerId) -> Result<(), StoreError>;

    // Matches
    fn save_match(&mut self, day: GameDayId, game_match: &GameMatch) -> Result<(), StoreError>;
    fn list_matches(&self, day: GameDayId) -> Result<Vec<GameMatch>, StoreError>;

    // Goal events
    fn save_goal_event(&mut self, day: GameDayId, event: &GoalEvent) -> Result<(), StoreError>;
    fn list_goal_events(&self, day: GameDayId) -> Result<Vec<GoalEvent>, StoreError>;
    fn delete_goal_event(&mut self, day: GameDayId, event: GoalEventId) -> Result<(), StoreError>;

    // Vest assignment (one per game day; setting replaces any prior value)
    fn set_vest_assignment(&mut self, day: GameDayId, team: &str) -> Result<(), StoreError>;
    fn get_vest_assignment(&self, day: GameDayId) -> Result<Option<String>, StoreError>;
}

/// In-process implementation backing the single-binary deployment.
#[derive(Debug, Default)]
pub struct MemoryStore {
    days: HashMap<GameDayId, GameDay>,
    active: Option<GameDayId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn day_mut(&mut self, id: GameDayId) -> Result<&mut GameDay, StoreError> {
        self.days.get_mut(&id).ok_or(StoreError::NotFound)
    }

    fn day(&self, id: GameDayId) -> Result<&GameDay, StoreError> {
        self.days.get(&id).ok_or(StoreError::NotFound)
    }
}

impl PersistenceService for MemoryStore {
    fn create_game_day(&mut self, day: &GameDay) -> Result<(), StoreError> {
        self.days.insert(day.id, day.clone());
        Ok(())
    }

    fn fetch_active_day(&self) -> Result<Option<GameDay>, StoreError> {
        Ok(self.active.and_then(|id| self.days.get(&id).cloned()))
    }

    fn fetch_all_days(&self) -> Result<Vec<GameDay>, StoreError> {
        let mut days: Vec<GameDay> = self.days.values().cloned().collect();
        days.sort_by_key(|d| d.date);
        Ok(days)
    }

    fn set_active_day(&mut self, id: GameDayId) -> Result<(), StoreError> {
        if !self.days.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        self.active = Some(id);
        Ok(())
    }

    fn update_game_day(&mut self, day: &GameDay) -> Result<(), StoreError> {
        if !self.days.contains_key(&day.id) {
            return Err(StoreError::NotFound);
        }
        self.days.insert(day.id, day.clone());
        Ok(())
    }

    fn delete_game_day(&mut self, id: GameDayId) -> Result<(), StoreError> {
        self.days.remove(&id).ok_or(StoreError::NotFound)?;
        if self.active == Some(id) {
            self.active = None;
        }
        Ok(())
    }

    fn save_player(&mut self, day: GameDayId, player: &Player) -> Result<(), StoreError> {
        let d = self.day_mut(day)?;
        match d.players.iter_mut().find(|p| p.id == player.id) {
            Some(existing) => *existing = player.clone(),
            None => d.players.push(player.clone()),
        }
        Ok(())
    }

    fn list_players(&self, day: GameDayId) -> Result<Vec<Player>, StoreError> {
        Ok(self.day(day)?.players.clone())
    }

    fn delete_player(&mut self, day: GameDayId, player: PlayerId) -> Result<(), StoreError> {
        let d = self.day_mut(day)?;
        let before = d.players.len();
        d.players.retain(|p| p.id != player);
        if d.players.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn save_match(&mut self, day: GameDayId, game_match: &GameMatch) -> Result<(), StoreError> {
        let d = self.day_mut(day)?;
        match d.matches.iter_mut().find(|m| m.number == game_match.number) {
            Some(existing) => *existing = game_match.clone(),
            None => d.matches.push(game_match.clone()),
        }
        Ok(())
    }

    fn list_matches(&self, day: GameDayId) -> Result<Vec<GameMatch>, StoreError> {
        Ok(self.day(day)?.matches.clone())
    }

    fn save_goal_event(&mut self, day: GameDayId, event: &GoalEvent) -> Result<(), StoreError> {
        let d = self.day_mut(day)?;
        if !d.goal_events.iter().any(|e| e.id == event.id) {
            d.goal_events.push(event.clone());
        }
        Ok(())
    }

    fn list_goal_events(&self, day: GameDayId) -> Result<Vec<GoalEvent>, StoreError> {
        Ok(self.day(day)?.goal_events.clone())
    }

    fn delete_goal_event(&mut self, day: GameDayId, event: GoalEventId) -> Result<(), StoreError> {
        let d = self.day_mut(day)?;
        let before = d.goal_events.len();
        d.goal_events.retain(|e| e.id != event);
        if d.goal_events.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn set_vest_assignment(&mut self, day: GameDayId, team: &str) -> Result<(), StoreError> {
        self.day_mut(day)?.vest_team = Some(team.to_string());
        Ok(())
    }

    fn get_vest_assignment(&self, day: GameDayId) -> Result<Option<String>, StoreError> {
        Ok(self.day(day)?.vest_team.clone())
    }
}
