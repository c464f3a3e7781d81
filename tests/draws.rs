//! Integration tests for the team draw and the vest chore lottery.

use chrono::NaiveDate;
use pelada_tournament_web::{
    apply_draw, draw_teams, pool_excluding_team, regenerate_schedule, reveal_sequence, GameDay,
    Player, TournamentError, VestDraw,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn team_names() -> Vec<String> {
    ["Vermelho", "Azul", "Brasil", "VerdeBranco"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn players(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(format!("P{i}"))).collect()
}

#[test]
fn draw_partitions_every_player_exactly_once() {
    let players = players(10);
    let mut rng = StdRng::seed_from_u64(42);
    let assignment = draw_teams(&players, &team_names(), &mut rng).unwrap();

    let mut seen = HashSet::new();
    for ids in assignment.values() {
        for id in ids {
            assert!(seen.insert(*id), "player dealt twice");
        }
    }
    assert_eq!(seen.len(), 10);

    let sizes: Vec<usize> = assignment.values().map(|v| v.len()).collect();
    let max = *sizes.iter().max().unwrap();
    let min = *sizes.iter().min().unwrap();
    assert!(max - min <= 1, "uneven partition: {sizes:?}");
}

#[test]
fn draw_is_deterministic_under_a_seed() {
    let players = players(8);
    let a = draw_teams(&players, &team_names(), &mut StdRng::seed_from_u64(1)).unwrap();
    let b = draw_teams(&players, &team_names(), &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn draw_refuses_an_empty_player_list() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        draw_teams(&[], &team_names(), &mut rng),
        Err(TournamentError::EmptyPlayerList)
    );
}

#[test]
fn applying_a_draw_discards_manual_assignments() {
    let mut day = GameDay::new(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
    regenerate_schedule(&mut day).unwrap();
    for i in 0..8 {
        day.add_player(format!("P{i}")).unwrap();
    }
    let edited = day.players[0].id;
    day.assign_team(edited, Some("Brasil".into())).unwrap();

    let mut rng = StdRng::seed_from_u64(3);
    let assignment = draw_teams(&day.players, &day.settings.active_teams, &mut rng).unwrap();
    apply_draw(&mut day, &assignment);

    assert!(day.players.iter().all(|p| p.team.is_some()));
    for (team, ids) in &assignment {
        for id in ids {
            assert_eq!(day.get_player(*id).unwrap().team.as_ref(), Some(team));
        }
    }
}

#[test]
fn vest_draw_skips_the_immune_player() {
    let p = players(3);
    let mut draw = VestDraw::new();
    draw.add_players(p.iter().map(|x| x.id));
    draw.set_immune(Some(p[1].id));

    // Immune player stays visible in the pool but is never drawn.
    assert_eq!(draw.pool.len(), 3);
    assert_eq!(draw.eligible().len(), 2);
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let winner = draw.draw(&mut rng).unwrap();
        assert_ne!(winner, p[1].id);
        assert_eq!(draw.winner, Some(winner));
    }
}

#[test]
fn vest_draw_refuses_an_empty_pool() {
    let mut draw = VestDraw::new();
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(draw.draw(&mut rng), Err(TournamentError::EmptyDrawPool));
    assert_eq!(draw.winner, None);

    // A pool whose only member is immune is empty for drawing purposes.
    let p = players(1);
    draw.add_player(p[0].id);
    draw.set_immune(Some(p[0].id));
    assert_eq!(draw.draw(&mut rng), Err(TournamentError::EmptyDrawPool));
}

#[test]
fn vest_pool_ignores_duplicates_and_resets_cleanly() {
    let p = players(2);
    let mut draw = VestDraw::new();
    draw.add_player(p[0].id);
    draw.add_player(p[0].id);
    draw.add_player(p[1].id);
    assert_eq!(draw.pool.len(), 2);

    draw.remove_player(p[0].id);
    assert_eq!(draw.pool, vec![p[1].id]);

    draw.reset();
    assert_eq!(draw, VestDraw::new());
}

#[test]
fn everyone_except_the_champion_team_is_poolable() {
    let mut all = players(6);
    for (i, p) in all.iter_mut().enumerate() {
        p.team = Some(if i < 2 { "Vermelho".into() } else { "Azul".into() });
    }
    let pool = pool_excluding_team(&all, "Vermelho");
    assert_eq!(pool.len(), 4);
    assert!(all.iter().take(2).all(|p| !pool.contains(&p.id)));
}

#[test]
fn reveal_sequence_is_three_staged_steps() {
    let stages = reveal_sequence();
    assert_eq!(stages.len(), 3);
    assert!(stages.iter().all(|s| s.hold_secs > 0));
}
