//! Data structures for the game day: players, teams, matches, goal events.

mod game_day;
mod game_match;
mod goal_event;
mod player;
mod settings;
mod team;

pub use game_day::{GameDay, GameDayId, TournamentError};
pub use game_match::{GameMatch, MatchType};
pub use goal_event::{GoalEvent, GoalEventId};
pub use player::{parse_player_list, Player, PlayerId};
pub use settings::{TournamentSettings, TournamentType};
pub use team::{default_teams, Team};
