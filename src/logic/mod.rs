//! Tournament business logic: standings, schedule, ladder, draws.

mod schedule;
mod standings;
mod team_draw;
mod vest_draw;
mod winner_stays;

pub use schedule::{
    finalize_match, is_match_active, populate_playoffs, regenerate_schedule, set_active_teams,
    switch_mode,
};
pub use standings::{
    resolve_tiebreak, standings, tied_point_groups, winner_stays_table, LadderRow, StandingRow,
    TiebreakStrategy,
};
pub use team_draw::{apply_draw, draw_teams};
pub use vest_draw::{pool_excluding_team, reveal_sequence, RevealStage, VestDraw};
pub use winner_stays::{advance_after_challenge, enter_winner_stays, exit_winner_stays};
