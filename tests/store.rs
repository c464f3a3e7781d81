//! Integration tests for the in-memory persistence service.

use chrono::NaiveDate;
use pelada_tournament_web::{
    GameDay, GameMatch, GoalEvent, MatchType, MemoryStore, PersistenceService, Player, StoreError,
};

fn day() -> GameDay {
    GameDay::new(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap())
}

#[test]
fn game_day_lifecycle_roundtrips() {
    let mut store = MemoryStore::new();
    let d = day();
    store.create_game_day(&d).unwrap();

    assert_eq!(store.fetch_active_day().unwrap(), None);
    store.set_active_day(d.id).unwrap();
    assert_eq!(store.fetch_active_day().unwrap().unwrap().id, d.id);

    let mut updated = d.clone();
    updated.vest_team = Some("Azul".into());
    store.update_game_day(&updated).unwrap();
    assert_eq!(store.fetch_all_days().unwrap()[0].vest_team.as_deref(), Some("Azul"));

    store.delete_game_day(d.id).unwrap();
    assert_eq!(store.fetch_active_day().unwrap(), None);
    assert_eq!(store.delete_game_day(d.id), Err(StoreError::NotFound));
}

#[test]
fn child_records_are_scoped_to_their_game_day() {
    let mut store = MemoryStore::new();
    let d = day();
    store.create_game_day(&d).unwrap();

    let player = Player::new("Rafa");
    store.save_player(d.id, &player).unwrap();
    assert_eq!(store.list_players(d.id).unwrap().len(), 1);

    let mut renamed = player.clone();
    renamed.team = Some("Vermelho".into());
    store.save_player(d.id, &renamed).unwrap();
    let listed = store.list_players(d.id).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].team.as_deref(), Some("Vermelho"));

    let m = GameMatch::new(1, "Vermelho", "Azul", MatchType::Regular);
    store.save_match(d.id, &m).unwrap();
    assert_eq!(store.list_matches(d.id).unwrap().len(), 1);

    let event = GoalEvent::new(player.id, "Rafa", "Vermelho", 1, 4);
    store.save_goal_event(d.id, &event).unwrap();
    assert_eq!(store.list_goal_events(d.id).unwrap().len(), 1);
    store.delete_goal_event(d.id, event.id).unwrap();
    assert_eq!(store.list_goal_events(d.id).unwrap().len(), 0);

    store.delete_player(d.id, player.id).unwrap();
    assert_eq!(store.list_players(d.id).unwrap().len(), 0);
}

#[test]
fn vest_assignment_replaces_the_prior_value() {
    let mut store = MemoryStore::new();
    let d = day();
    store.create_game_day(&d).unwrap();

    assert_eq!(store.get_vest_assignment(d.id).unwrap(), None);
    store.set_vest_assignment(d.id, "Azul").unwrap();
    store.set_vest_assignment(d.id, "Brasil").unwrap();
    assert_eq!(store.get_vest_assignment(d.id).unwrap().as_deref(), Some("Brasil"));
}

#[test]
fn operations_on_unknown_days_report_not_found() {
    let mut store = MemoryStore::new();
    let ghost = day();
    assert_eq!(store.list_players(ghost.id), Err(StoreError::NotFound));
    assert_eq!(store.set_active_day(ghost.id), Err(StoreError::NotFound));
    assert_eq!(store.update_game_day(&ghost), Err(StoreError::NotFound));
}
