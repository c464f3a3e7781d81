//! GameDay aggregate: one tournament session and its operations.

use crate::models::game_match::GameMatch;
use crate::models::goal_event::{GoalEvent, GoalEventId};
use crate::models::player::{parse_player_list, Player, PlayerId};
use crate::models::settings::TournamentSettings;
use crate::models::team::{default_teams, Team};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// The game day is not in a state that allows this action.
    InvalidState,
    /// Player not found on this game day.
    PlayerNotFound(PlayerId),
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// Referenced team is not part of the roster.
    UnknownTeam(String),
    /// The active subset must contain at least two roster teams.
    NotEnoughTeams,
    /// No match with this number in the schedule.
    MatchNotFound(u32),
    /// The match has already been finalized.
    AlreadyFinalized(u32),
    /// Both scores are required to finalize a match.
    MissingScores(u32),
    /// A tied elimination match needs a recorded penalty winner to finalize.
    MissingTiebreakWinner(u32),
    /// Goal event not found on this game day.
    GoalEventNotFound(GoalEventId),
    /// The scoring player has no team in this match.
    PlayerNotInMatch(PlayerId, u32),
    /// Cannot draw teams from an empty player list.
    EmptyPlayerList,
    /// Nobody eligible in the vest draw pool.
    EmptyDrawPool,
    /// Destructive team re-draw requires explicit confirmation.
    DrawNotConfirmed,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            TournamentError::UnknownTeam(name) => write!(f, "Unknown team: {}", name),
            TournamentError::NotEnoughTeams => write!(f, "At least two active teams are required"),
            TournamentError::MatchNotFound(n) => write!(f, "Match {} not found", n),
            TournamentError::AlreadyFinalized(n) => write!(f, "Match {} is already finalized", n),
            TournamentError::MissingScores(n) => write!(f, "Match {} needs both scores before finishing", n),
            TournamentError::MissingTiebreakWinner(n) => {
                write!(f, "Match {} is tied; record a penalty shootout winner first", n)
            }
            TournamentError::GoalEventNotFound(_) => write!(f, "Goal event not found"),
            TournamentError::PlayerNotInMatch(_, n) => {
                write!(f, "Player's team is not playing in match {}", n)
            }
            TournamentError::EmptyPlayerList => write!(f, "No players registered to draw teams from"),
            TournamentError::EmptyDrawPool => write!(f, "Nobody eligible in the vest draw pool"),
            TournamentError::DrawNotConfirmed => {
                write!(f, "Re-drawing teams discards current assignments; confirmation required")
            }
        }
    }
}

/// Unique identifier for a game day.
pub type GameDayId = Uuid;

/// One tournament session: players, schedule, goal events and vest chore,
/// all scoped to a single date.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameDay {
    pub id: GameDayId,
    pub date: NaiveDate,
    pub settings: TournamentSettings,
    /// Full team roster (the active subset lives in `settings`).
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub matches: Vec<GameMatch>,
    pub goal_events: Vec<GoalEvent>,
    /// Team assigned to wash the vests, once decided.
    pub vest_team: Option<String>,
}

impl GameDay {
    /// Create a game day with the default roster, all teams active.
    pub fn new(date: NaiveDate) -> Self {
        let teams = default_teams();
        let active = teams.iter().map(|t| t.name.clone()).collect();
        Self {
            id: Uuid::new_v4(),
            date,
            settings: TournamentSettings::new(active),
            teams,
            players: Vec::new(),
            matches: Vec::new(),
            goal_events: Vec::new(),
            vest_team: None,
        }
    }

    /// Whether a team name exists in the roster.
    pub fn has_team(&self, name: &str) -> bool {
        self.teams.iter().any(|t| t.name == name)
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn get_match(&self, number: u32) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.number == number)
    }

    pub fn get_match_mut(&mut self, number: u32) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.number == number)
    }

    /// Next free match number (schedule ordinals start at 1).
    pub fn next_match_number(&self) -> u32 {
        self.matches.iter().map(|m| m.number).max().unwrap_or(0) + 1
    }

    /// Add a player. Names must be unique (case-insensitive) and non-empty.
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<PlayerId, TournamentError> {
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::InvalidState);
        }
        let is_duplicate = self
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicatePlayerName);
        }
        let player = Player::new(name_trimmed);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Bulk registration from a pasted list. Returns how many players were
    /// added; lines that duplicate existing names are skipped.
    pub fn add_players_bulk(&mut self, text: &str) -> usize {
        let mut added = 0;
        for name in parse_player_list(text) {
            if self.add_player(name).is_ok() {
                added += 1;
            }
        }
        added
    }

    /// Remove a player by id.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        Ok(())
    }

    /// Assign a player to a roster team, or clear the assignment with `None`.
    pub fn assign_team(
        &mut self,
        player_id: PlayerId,
        team: Option<String>,
    ) -> Result<(), TournamentError> {
        if let Some(name) = &team {
            if !self.has_team(name) {
                return Err(TournamentError::UnknownTeam(name.clone()));
            }
        }
        let player = self
            .get_player_mut(player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        player.team = team;
        Ok(())
    }

    /// Players currently assigned to the given team, in registration order.
    pub fn team_members(&self, team: &str) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.team.as_deref() == Some(team))
            .collect()
    }

    /// Edit a match's scores. Only allowed before finalization; entering
    /// scores never marks the match as played.
    pub fn set_match_score(
        &mut self,
        number: u32,
        score_a: Option<u32>,
        score_b: Option<u32>,
    ) -> Result<(), TournamentError> {
        let m = self
            .get_match_mut(number)
            .ok_or(TournamentError::MatchNotFound(number))?;
        if m.played {
            return Err(TournamentError::AlreadyFinalized(number));
        }
        m.score_a = score_a;
        m.score_b = score_b;
        Ok(())
    }

    /// Record a penalty shootout for a tied elimination match. The winner
    /// must be one of the participants.
    pub fn set_match_penalties(
        &mut self,
        number: u32,
        penalty_a: Option<u32>,
        penalty_b: Option<u32>,
        winner: Option<String>,
    ) -> Result<(), TournamentError> {
        let m = self
            .get_match_mut(number)
            .ok_or(TournamentError::MatchNotFound(number))?;
        if m.played {
            return Err(TournamentError::AlreadyFinalized(number));
        }
        if let Some(w) = &winner {
            if !m.involves(w) {
                return Err(TournamentError::UnknownTeam(w.clone()));
            }
        }
        m.penalty_a = penalty_a;
        m.penalty_b = penalty_b;
        m.winner = winner;
        Ok(())
    }

    /// Record a goal: creates the event and increments the scorer's side of
    /// the match. Refused once the match is finalized.
    pub fn record_goal(
        &mut self,
        match_number: u32,
        player_id: PlayerId,
        minute: u32,
    ) -> Result<GoalEvent, TournamentError> {
        let player = self
            .get_player(player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        let team = player
            .team
            .clone()
            .ok_or(TournamentError::PlayerNotInMatch(player_id, match_number))?;
        let player_name = player.name.clone();

        let m = self
            .get_match_mut(match_number)
            .ok_or(TournamentError::MatchNotFound(match_number))?;
        if m.played {
            return Err(TournamentError::AlreadyFinalized(match_number));
        }
        if m.team_a.as_deref() == Some(team.as_str()) {
            m.score_a = Some(m.score_a.unwrap_or(0) + 1);
        } else if m.team_b.as_deref() == Some(team.as_str()) {
            m.score_b = Some(m.score_b.unwrap_or(0) + 1);
        } else {
            return Err(TournamentError::PlayerNotInMatch(player_id, match_number));
        }

        let event = GoalEvent::new(player_id, player_name, team, match_number, minute);
        self.goal_events.push(event.clone());
        Ok(event)
    }

    /// Undo a goal: removes the event and decrements the score of exactly
    /// the match/team the event references, never below zero. If the match
    /// has since disappeared (e.g. the schedule was regenerated) the event
    /// is still removed.
    pub fn remove_goal(&mut self, event_id: GoalEventId) -> Result<(), TournamentError> {
        let idx = self
            .goal_events
            .iter()
            .position(|e| e.id == event_id)
            .ok_or(TournamentError::GoalEventNotFound(event_id))?;
        let event = self.goal_events.remove(idx);

        if let Some(m) = self.get_match_mut(event.match_number) {
            if m.team_a.as_deref() == Some(event.team.as_str()) {
                m.score_a = m.score_a.map(|s| s.saturating_sub(1));
            } else if m.team_b.as_deref() == Some(event.team.as_str()) {
                m.score_b = m.score_b.map(|s| s.saturating_sub(1));
            }
        }
        Ok(())
    }

    /// Goal events for one match, in recording order.
    pub fn goals_for_match(&self, match_number: u32) -> Vec<&GoalEvent> {
        self.goal_events
            .iter()
            .filter(|e| e.match_number == match_number)
            .collect()
    }
}
