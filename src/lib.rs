//! Casual 4-team soccer tournament organizer: library with models,
//! tournament logic, match clock and persistence mirror.

pub mod clock;
pub mod logic;
pub mod models;
pub mod store;

pub use clock::{format_clock, ClockSnapshot, MatchClock};
pub use logic::{
    advance_after_challenge, apply_draw, draw_teams, enter_winner_stays, exit_winner_stays,
    finalize_match, is_match_active, pool_excluding_team, populate_playoffs, regenerate_schedule,
    resolve_tiebreak, reveal_sequence, set_active_teams, standings, switch_mode,
    tied_point_groups, winner_stays_table, LadderRow, RevealStage, StandingRow, TiebreakStrategy,
    VestDraw,
};
pub use models::{
    default_teams, parse_player_list, GameDay, GameDayId, GameMatch, GoalEvent, GoalEventId,
    MatchType, Player, PlayerId, Team, TournamentError, TournamentSettings, TournamentType,
};
pub use store::{MemoryStore, PersistenceService, StoreError};
