//! Integration tests for the two tournament modes: championship schedule
//! with playoffs, and the winner-stays ladder.

use chrono::NaiveDate;
use pelada_tournament_web::{
    finalize_match, is_match_active, regenerate_schedule, set_active_teams, switch_mode, GameDay,
    MatchType, TournamentError, TournamentType,
};

fn game_day() -> GameDay {
    let mut day = GameDay::new(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
    regenerate_schedule(&mut day).unwrap();
    day
}

#[test]
fn four_teams_get_twelve_fixtures_plus_playoff_slots() {
    let day = game_day();
    let regular = day
        .matches
        .iter()
        .filter(|m| m.match_type == MatchType::Regular)
        .count();
    assert_eq!(regular, 12);
    assert_eq!(day.matches.len(), 14);

    let final_slot = day
        .matches
        .iter()
        .find(|m| m.match_type == MatchType::Final)
        .unwrap();
    assert_eq!(final_slot.team_a, None);
    assert_eq!(final_slot.team_b, None);
    assert!(!final_slot.played);
}

#[test]
fn two_teams_get_two_fixtures_and_no_playoffs() {
    let mut day = game_day();
    set_active_teams(&mut day, vec!["Vermelho".into(), "Azul".into()]).unwrap();
    assert_eq!(day.matches.len(), 2);
    assert!(day.matches.iter().all(|m| m.match_type == MatchType::Regular));
}

#[test]
fn active_subset_must_have_two_known_teams() {
    let mut day = game_day();
    assert_eq!(
        set_active_teams(&mut day, vec!["Vermelho".into()]),
        Err(TournamentError::NotEnoughTeams)
    );
    assert_eq!(
        set_active_teams(&mut day, vec!["Vermelho".into(), "Roxo".into()]),
        Err(TournamentError::UnknownTeam("Roxo".into()))
    );
}

#[test]
fn playoff_slots_are_always_active_and_foreign_fixtures_are_not() {
    let day = game_day();
    let active = vec!["Vermelho".to_string(), "Azul".to_string()];
    let final_slot = day
        .matches
        .iter()
        .find(|m| m.match_type == MatchType::Final)
        .unwrap();
    assert!(is_match_active(final_slot, &active));

    let foreign = day
        .matches
        .iter()
        .find(|m| m.match_type == MatchType::Regular && m.team_a.as_deref() == Some("Brasil"))
        .unwrap();
    assert!(!is_match_active(foreign, &active));
    let local = day
        .matches
        .iter()
        .find(|m| {
            m.team_a.as_deref() == Some("Vermelho") && m.team_b.as_deref() == Some("Azul")
        })
        .unwrap();
    assert!(is_match_active(local, &active));
}

/// Play out the whole round robin with home wins, then check the playoffs.
#[test]
fn playoffs_populate_once_the_round_robin_concludes() {
    let mut day = game_day();
    let regular_numbers: Vec<u32> = day
        .matches
        .iter()
        .filter(|m| m.match_type == MatchType::Regular)
        .map(|m| m.number)
        .collect();

    for number in regular_numbers {
        day.set_match_score(number, Some(1), Some(0)).unwrap();
        finalize_match(&mut day, number).unwrap();
    }

    // Every team won its home games: all tied on points, so the stable
    // table order is the active-team order.
    let final_slot = day
        .matches
        .iter()
        .find(|m| m.match_type == MatchType::Final)
        .unwrap();
    assert_eq!(final_slot.team_a.as_deref(), Some("Vermelho"));
    assert_eq!(final_slot.team_b.as_deref(), Some("Azul"));
    let third = day
        .matches
        .iter()
        .find(|m| m.match_type == MatchType::ThirdPlace)
        .unwrap();
    assert_eq!(third.team_a.as_deref(), Some("Brasil"));
    assert_eq!(third.team_b.as_deref(), Some("VerdeBranco"));
}

#[test]
fn tied_final_needs_a_penalty_winner_to_finish() {
    let mut day = game_day();
    let regular_numbers: Vec<u32> = day
        .matches
        .iter()
        .filter(|m| m.match_type == MatchType::Regular)
        .map(|m| m.number)
        .collect();
    for number in regular_numbers {
        day.set_match_score(number, Some(1), Some(0)).unwrap();
        finalize_match(&mut day, number).unwrap();
    }
    let final_number = day
        .matches
        .iter()
        .find(|m| m.match_type == MatchType::Final)
        .unwrap()
        .number;

    day.set_match_score(final_number, Some(2), Some(2)).unwrap();
    assert_eq!(
        finalize_match(&mut day, final_number),
        Err(TournamentError::MissingTiebreakWinner(final_number))
    );

    day.set_match_penalties(final_number, Some(4), Some(3), Some("Vermelho".into()))
        .unwrap();
    finalize_match(&mut day, final_number).unwrap();
    assert!(day.get_match(final_number).unwrap().played);
}

#[test]
fn switching_to_winner_stays_opens_a_single_challenge() {
    let mut day = game_day();
    switch_mode(&mut day, TournamentType::WinnerStays).unwrap();

    assert_eq!(day.matches.len(), 1);
    let m = &day.matches[0];
    assert_eq!(m.match_type, MatchType::WinnerStays);
    assert_eq!(m.team_a.as_deref(), Some("Vermelho"));
    assert_eq!(m.team_b.as_deref(), Some("Azul"));
    assert_eq!(day.settings.holder, None);
}

#[test]
fn winner_becomes_holder_and_faces_the_next_team_in_order() {
    let mut day = game_day();
    switch_mode(&mut day, TournamentType::WinnerStays).unwrap();

    day.set_match_score(1, Some(0), Some(1)).unwrap();
    finalize_match(&mut day, 1).unwrap();

    assert_eq!(day.settings.holder.as_deref(), Some("Azul"));
    let next = day.matches.last().unwrap();
    assert_eq!(next.number, 2);
    assert_eq!(next.team_a.as_deref(), Some("Azul"));
    assert_eq!(next.team_b.as_deref(), Some("Brasil"));
    assert!(!next.played);
}

/// The asymmetric ladder rule: a drawn challenge hands holdership to the
/// challenger. Azul holding, 2-2 against Brasil: Brasil takes over.
#[test]
fn drawn_challenge_makes_the_challenger_the_new_holder() {
    let mut day = game_day();
    switch_mode(&mut day, TournamentType::WinnerStays).unwrap();

    day.set_match_score(1, Some(0), Some(1)).unwrap();
    finalize_match(&mut day, 1).unwrap();
    assert_eq!(day.settings.holder.as_deref(), Some("Azul"));

    // Azul (holder) 2-2 Brasil (challenger)
    day.set_match_score(2, Some(2), Some(2)).unwrap();
    finalize_match(&mut day, 2).unwrap();

    assert_eq!(day.settings.holder.as_deref(), Some("Brasil"));
    let next = day.matches.last().unwrap();
    assert_eq!(next.team_a.as_deref(), Some("Brasil"));
    assert_eq!(next.team_b.as_deref(), Some("VerdeBranco"));
}

#[test]
fn challenger_rotation_cycles_and_skips_the_holder() {
    let mut day = game_day();
    switch_mode(&mut day, TournamentType::WinnerStays).unwrap();

    // Vermelho keeps winning: challengers cycle Azul, Brasil, VerdeBranco, Azul...
    for number in 1..=4 {
        day.set_match_score(number, Some(1), Some(0)).unwrap();
        finalize_match(&mut day, number).unwrap();
        assert_eq!(day.settings.holder.as_deref(), Some("Vermelho"));
    }
    let challengers: Vec<&str> = day
        .matches
        .iter()
        .filter_map(|m| m.team_b.as_deref())
        .collect();
    assert_eq!(challengers, vec!["Azul", "Brasil", "VerdeBranco", "Azul", "Brasil"]);
}

#[test]
fn leaving_winner_stays_restores_the_round_robin() {
    let mut day = game_day();
    switch_mode(&mut day, TournamentType::WinnerStays).unwrap();
    day.set_match_score(1, Some(3), Some(1)).unwrap();
    finalize_match(&mut day, 1).unwrap();

    switch_mode(&mut day, TournamentType::Championship).unwrap();

    assert_eq!(day.settings.tournament_type, TournamentType::Championship);
    assert_eq!(day.settings.holder, None);
    assert_eq!(day.matches.len(), 14);
    assert!(day.matches.iter().all(|m| !m.played));
}

#[test]
fn changing_the_subset_in_winner_stays_resets_the_ladder() {
    let mut day = game_day();
    switch_mode(&mut day, TournamentType::WinnerStays).unwrap();
    day.set_match_score(1, Some(1), Some(0)).unwrap();
    finalize_match(&mut day, 1).unwrap();

    set_active_teams(&mut day, vec!["Brasil".into(), "VerdeBranco".into()]).unwrap();

    assert_eq!(day.settings.holder, None);
    assert_eq!(day.matches.len(), 1);
    let m = &day.matches[0];
    assert_eq!(m.team_a.as_deref(), Some("Brasil"));
    assert_eq!(m.team_b.as_deref(), Some("VerdeBranco"));
}
