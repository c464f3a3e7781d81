//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable from phones on the venue wifi.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDate;
use pelada_tournament_web::{
    apply_draw, draw_teams, finalize_match, is_match_active, pool_excluding_team,
    resolve_tiebreak, reveal_sequence, set_active_teams, standings, switch_mode,
    tied_point_groups, winner_stays_table, format_clock, GameDay, GameDayId, MatchClock,
    MatchType, MemoryStore, PersistenceService, TiebreakStrategy, TournamentType, VestDraw,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// All in-memory state: game days, the single match clock, the ephemeral
/// vest draw, and the persistence mirror. The day map is authoritative;
/// the store only receives opportunistic copies.
struct AppInner {
    days: HashMap<GameDayId, GameDay>,
    active_day: Option<GameDayId>,
    clock: MatchClock,
    vest_draw: VestDraw,
    store: MemoryStore,
}

impl AppInner {
    fn new() -> Self {
        Self {
            days: HashMap::new(),
            active_day: None,
            clock: MatchClock::new(),
            vest_draw: VestDraw::new(),
            store: MemoryStore::new(),
        }
    }

    /// Push the day's current state into the persistence mirror.
    /// Failures are logged and ignored: gameplay continues from memory.
    fn sync_day(&mut self, id: GameDayId) {
        let day = match self.days.get(&id) {
            Some(d) => d.clone(),
            None => return,
        };
        if let Err(e) = self.store.update_game_day(&day) {
            log::warn!("Persistence sync failed for game day {}: {}", id, e);
        }
    }
}

type AppState = Data<RwLock<AppInner>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateGameDayBody {
    date: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct BulkPlayersBody {
    text: String,
}

#[derive(Deserialize)]
struct AssignTeamBody {
    team: Option<String>,
}

#[derive(Deserialize)]
struct DrawTeamsBody {
    #[serde(default)]
    confirm: bool,
}

#[derive(Deserialize)]
struct ScoreBody {
    score_a: Option<serde_json::Value>,
    score_b: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct PenaltiesBody {
    penalty_a: Option<u32>,
    penalty_b: Option<u32>,
    winner: Option<String>,
}

#[derive(Deserialize)]
struct RecordGoalBody {
    match_number: u32,
    player_id: Uuid,
    /// Match minute; derived from the clock when omitted.
    minute: Option<u32>,
}

#[derive(Deserialize)]
struct DurationsBody {
    match_duration_secs: Option<u64>,
    final_duration_secs: Option<u64>,
}

#[derive(Deserialize)]
struct SetModeBody {
    tournament_type: TournamentType,
}

#[derive(Deserialize)]
struct ActiveTeamsBody {
    teams: Vec<String>,
}

#[derive(Deserialize)]
struct TiebreakBody {
    strategy: TiebreakStrategy,
}

#[derive(Deserialize)]
struct ClockStartBody {
    day_id: GameDayId,
    match_number: u32,
}

#[derive(Deserialize)]
struct ClockResetBody {
    duration_secs: u64,
}

#[derive(Deserialize)]
struct PoolPlayersBody {
    player_ids: Vec<Uuid>,
}

#[derive(Deserialize)]
struct PoolTeamBody {
    day_id: GameDayId,
    team: String,
}

#[derive(Deserialize)]
struct PoolExceptChampionBody {
    day_id: GameDayId,
}

#[derive(Deserialize)]
struct ImmuneBody {
    player_id: Option<Uuid>,
}

#[derive(Deserialize)]
struct VestTeamBody {
    team: String,
}

/// Path segment: game day id (e.g. /api/game-days/{id})
#[derive(Deserialize)]
struct DayPath {
    id: GameDayId,
}

/// Path segments: game day id and player id.
#[derive(Deserialize)]
struct DayPlayerPath {
    id: GameDayId,
    player_id: Uuid,
}

/// Path segments: game day id and match number.
#[derive(Deserialize)]
struct DayMatchPath {
    id: GameDayId,
    number: u32,
}

/// Path segments: game day id and goal event id.
#[derive(Deserialize)]
struct DayGoalPath {
    id: GameDayId,
    event_id: Uuid,
}

/// Malformed score input is coerced defensively: numbers pass through,
/// numeric strings parse, anything else is treated as unset.
fn coerce_score(value: Option<&serde_json::Value>) -> Option<u32> {
    match value? {
        serde_json::Value::Number(n) => n.as_u64().map(|n| n as u32),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "pelada-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new game day with the default roster and a fresh round-robin
/// schedule. Defaults to today's date.
#[post("/api/game-days")]
async fn api_create_game_day(state: AppState, body: Option<Json<CreateGameDayBody>>) -> HttpResponse {
    let date = body
        .as_ref()
        .and_then(|b| b.date)
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let mut day = GameDay::new(date);
    if let Err(e) = pelada_tournament_web::regenerate_schedule(&mut day) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }
    let id = day.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if let Err(e) = g.store.create_game_day(&day) {
        log::warn!("Persistence create failed for game day {}: {}", id, e);
    }
    g.days.insert(id, day);
    HttpResponse::Ok().json(g.days.get(&id))
}

/// List all game days, oldest first.
#[get("/api/game-days")]
async fn api_list_game_days(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut days: Vec<&GameDay> = g.days.values().collect();
    days.sort_by_key(|d| d.date);
    HttpResponse::Ok().json(days)
}

/// The single globally-active game day, if one is set.
#[get("/api/game-days/active")]
async fn api_get_active_day(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.active_day.and_then(|id| g.days.get(&id)) {
        Some(day) => HttpResponse::Ok().json(day),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No active game day" })),
    }
}

/// Get a game day by id.
#[get("/api/game-days/{id}")]
async fn api_get_game_day(state: AppState, path: Path<DayPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.days.get(&path.id) {
        Some(day) => HttpResponse::Ok().json(day),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    }
}

/// Make this game day the single globally-active one.
#[put("/api/game-days/{id}/activate")]
async fn api_activate_game_day(state: AppState, path: Path<DayPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if !g.days.contains_key(&path.id) {
        return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" }));
    }
    g.active_day = Some(path.id);
    if let Err(e) = g.store.set_active_day(path.id) {
        log::warn!("Persistence set-active failed for game day {}: {}", path.id, e);
    }
    HttpResponse::Ok().json(g.days.get(&path.id))
}

/// Delete a game day and everything scoped to it.
#[delete("/api/game-days/{id}")]
async fn api_delete_game_day(state: AppState, path: Path<DayPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if g.days.remove(&path.id).is_none() {
        return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" }));
    }
    if g.active_day == Some(path.id) {
        g.active_day = None;
    }
    if let Err(e) = g.store.delete_game_day(path.id) {
        log::warn!("Persistence delete failed for game day {}: {}", path.id, e);
    }
    HttpResponse::Ok().json(serde_json::json!({ "deleted": path.id }))
}

/// Register a single player.
#[post("/api/game-days/{id}/players")]
async fn api_add_player(state: AppState, path: Path<DayPath>, body: Json<AddPlayerBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g.days.get_mut(&path.id) {
        Some(d) => d,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    };
    match day.add_player(body.name.trim()) {
        Ok(_) => {
            let response = HttpResponse::Ok().json(&*day);
            g.sync_day(path.id);
            response
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Bulk registration from a pasted list (one name per line).
#[post("/api/game-days/{id}/players/bulk")]
async fn api_add_players_bulk(state: AppState, path: Path<DayPath>, body: Json<BulkPlayersBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g.days.get_mut(&path.id) {
        Some(d) => d,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    };
    let added = day.add_players_bulk(&body.text);
    let response = HttpResponse::Ok().json(serde_json::json!({ "added": added, "players": day.players }));
    g.sync_day(path.id);
    response
}

/// Remove a player.
#[delete("/api/game-days/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<DayPlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g.days.get_mut(&path.id) {
        Some(d) => d,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    };
    match day.remove_player(path.player_id) {
        Ok(()) => {
            let response = HttpResponse::Ok().json(&*day);
            g.sync_day(path.id);
            response
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Reassign a player to another team (or clear with null).
#[put("/api/game-days/{id}/players/{player_id}/team")]
async fn api_assign_team(state: AppState, path: Path<DayPlayerPath>, body: Json<AssignTeamBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g.days.get_mut(&path.id) {
        Some(d) => d,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    };
    match day.assign_team(path.player_id, body.team.clone()) {
        Ok(()) => {
            let response = HttpResponse::Ok().json(&*day);
            g.sync_day(path.id);
            response
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Draw teams: shuffle all players and deal them into the active teams.
/// Destructive (discards manual edits), so it requires `confirm: true`.
#[post("/api/game-days/{id}/draw-teams")]
async fn api_draw_teams(state: AppState, path: Path<DayPath>, body: Json<DrawTeamsBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g.days.get_mut(&path.id) {
        Some(d) => d,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    };
    if !body.confirm {
        let e = pelada_tournament_web::TournamentError::DrawNotConfirmed;
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }
    let assignment = match draw_teams(&day.players, &day.settings.active_teams, &mut rand::thread_rng()) {
        Ok(a) => a,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    apply_draw(day, &assignment);
    let response = HttpResponse::Ok().json(&*day);
    g.sync_day(path.id);
    response
}

/// Matches in the active set: playoff slots plus fixtures between active teams.
#[get("/api/game-days/{id}/matches")]
async fn api_list_matches(state: AppState, path: Path<DayPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g.days.get(&path.id) {
        Some(d) => d,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    };
    let matches: Vec<_> = day
        .matches
        .iter()
        .filter(|m| is_match_active(m, &day.settings.active_teams))
        .collect();
    HttpResponse::Ok().json(matches)
}

/// Edit a match's scores (before finalization). Malformed input is coerced.
#[put("/api/game-days/{id}/matches/{number}/score")]
async fn api_set_score(state: AppState, path: Path<DayMatchPath>, body: Json<ScoreBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g.days.get_mut(&path.id) {
        Some(d) => d,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    };
    let score_a = coerce_score(body.score_a.as_ref());
    let score_b = coerce_score(body.score_b.as_ref());
    match day.set_match_score(path.number, score_a, score_b) {
        Ok(()) => {
            let response = HttpResponse::Ok().json(&*day);
            g.sync_day(path.id);
            response
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Record a penalty shootout result for a tied elimination match.
#[put("/api/game-days/{id}/matches/{number}/penalties")]
async fn api_set_penalties(state: AppState, path: Path<DayMatchPath>, body: Json<PenaltiesBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g.days.get_mut(&path.id) {
        Some(d) => d,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    };
    match day.set_match_penalties(path.number, body.penalty_a, body.penalty_b, body.winner.clone()) {
        Ok(()) => {
            let response = HttpResponse::Ok().json(&*day);
            g.sync_day(path.id);
            response
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Finish a match: makes its result count and advances the tournament
/// (playoff population or the next winner-stays challenge).
#[post("/api/game-days/{id}/matches/{number}/finalize")]
async fn api_finalize_match(state: AppState, path: Path<DayMatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g.days.get_mut(&path.id) {
        Some(d) => d,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    };
    match finalize_match(day, path.number) {
        Ok(()) => {
            let response = HttpResponse::Ok().json(&*day);
            g.sync_day(path.id);
            response
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Record a goal. The match minute is taken from the clock when the match
/// being scored is the one the clock is bound to.
#[post("/api/game-days/{id}/goals")]
async fn api_record_goal(state: AppState, path: Path<DayPath>, body: Json<RecordGoalBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let minute = match body.minute {
        Some(m) => m,
        None => clock_minute(&g, path.id, body.match_number),
    };
    let day = match g.days.get_mut(&path.id) {
        Some(d) => d,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    };
    match day.record_goal(body.match_number, body.player_id, minute) {
        Ok(event) => {
            let response =
                HttpResponse::Ok().json(serde_json::json!({ "event": event, "day": &*day }));
            g.sync_day(path.id);
            response
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Undo a goal: removes the event and decrements exactly that match/team score.
#[delete("/api/game-days/{id}/goals/{event_id}")]
async fn api_remove_goal(state: AppState, path: Path<DayGoalPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g.days.get_mut(&path.id) {
        Some(d) => d,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    };
    match day.remove_goal(path.event_id) {
        Ok(()) => {
            let response = HttpResponse::Ok().json(&*day);
            g.sync_day(path.id);
            response
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Standings in the shape of the current mode: points table for the
/// championship, win ladder for winner-stays.
#[get("/api/game-days/{id}/standings")]
async fn api_standings(state: AppState, path: Path<DayPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g.days.get(&path.id) {
        Some(d) => d,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    };
    match day.settings.tournament_type {
        TournamentType::Championship => {
            let rows = standings(&day.matches, &day.settings.active_teams);
            HttpResponse::Ok().json(serde_json::json!({ "type": "championship", "rows": rows }))
        }
        TournamentType::WinnerStays => {
            let rows = winner_stays_table(&day.matches, &day.settings.active_teams);
            HttpResponse::Ok().json(serde_json::json!({
                "type": "winner_stays",
                "rows": rows,
                "holder": day.settings.holder,
            }))
        }
    }
}

/// Advisory tiebreak: resolve each group of point-tied teams with the
/// chosen strategy. Never written back into the standings.
#[post("/api/game-days/{id}/tiebreak")]
async fn api_tiebreak(state: AppState, path: Path<DayPath>, body: Json<TiebreakBody>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g.days.get(&path.id) {
        Some(d) => d,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    };
    let rows = standings(&day.matches, &day.settings.active_teams);
    let groups = tied_point_groups(&rows);
    let mut rng = rand::thread_rng();
    let resolved: Vec<Vec<String>> = groups
        .iter()
        .map(|group| resolve_tiebreak(group, body.strategy, &mut rng))
        .collect();
    HttpResponse::Ok().json(serde_json::json!({ "groups": groups, "resolved": resolved }))
}

/// Update match durations (partial).
#[put("/api/game-days/{id}/durations")]
async fn api_set_durations(state: AppState, path: Path<DayPath>, body: Json<DurationsBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g.days.get_mut(&path.id) {
        Some(d) => d,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    };
    if let Some(secs) = body.match_duration_secs {
        day.settings.match_duration_secs = secs;
    }
    if let Some(secs) = body.final_duration_secs {
        day.settings.final_duration_secs = secs;
    }
    let response = HttpResponse::Ok().json(&*day);
    g.sync_day(path.id);
    response
}

/// Switch between championship and winner-stays mode.
#[put("/api/game-days/{id}/mode")]
async fn api_set_mode(state: AppState, path: Path<DayPath>, body: Json<SetModeBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g.days.get_mut(&path.id) {
        Some(d) => d,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    };
    match switch_mode(day, body.tournament_type) {
        Ok(()) => {
            let response = HttpResponse::Ok().json(&*day);
            g.sync_day(path.id);
            response
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Change the active team subset (regenerates the schedule or resets the ladder).
#[put("/api/game-days/{id}/active-teams")]
async fn api_set_active_teams(state: AppState, path: Path<DayPath>, body: Json<ActiveTeamsBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g.days.get_mut(&path.id) {
        Some(d) => d,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    };
    match set_active_teams(day, body.teams.clone()) {
        Ok(()) => {
            let response = HttpResponse::Ok().json(&*day);
            g.sync_day(path.id);
            response
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Start the clock for a match (implicitly retargets from any prior match).
#[post("/api/clock/start")]
async fn api_clock_start(state: AppState, body: Json<ClockStartBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let duration_secs = {
        let day = match g.days.get(&body.day_id) {
            Some(d) => d,
            None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
        };
        let m = match day.get_match(body.match_number) {
            Some(m) => m,
            None => return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Match not found" })),
        };
        day.settings.duration_for(m.match_type == MatchType::Final)
    };
    let now = Instant::now();
    g.clock.start(body.match_number, Duration::from_secs(duration_secs), now);
    log::info!("Clock started for match {} ({} s)", body.match_number, duration_secs);
    let snapshot = g.clock.snapshot(now);
    HttpResponse::Ok().json(snapshot)
}

/// Pause the clock.
#[post("/api/clock/pause")]
async fn api_clock_pause(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let now = Instant::now();
    g.clock.pause(now);
    let snapshot = g.clock.snapshot(now);
    HttpResponse::Ok().json(snapshot)
}

/// Resume the clock from its paused value.
#[post("/api/clock/resume")]
async fn api_clock_resume(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let now = Instant::now();
    g.clock.resume(now);
    let snapshot = g.clock.snapshot(now);
    HttpResponse::Ok().json(snapshot)
}

/// Reset the clock to a fresh duration (stopped).
#[post("/api/clock/reset")]
async fn api_clock_reset(state: AppState, body: Json<ClockResetBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.clock.reset(Duration::from_secs(body.duration_secs));
    let snapshot = g.clock.snapshot(Instant::now());
    HttpResponse::Ok().json(snapshot)
}

/// Clock status; the client polls this once per second.
#[get("/api/clock")]
async fn api_clock_status(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let snapshot = g.clock.snapshot(Instant::now());
    let display = format_clock(snapshot.remaining_seconds);
    HttpResponse::Ok().json(serde_json::json!({
        "match_number": snapshot.match_number,
        "remaining_seconds": snapshot.remaining_seconds,
        "running": snapshot.running,
        "expired": snapshot.expired,
        "display": display,
    }))
}

/// Current vest draw state.
#[get("/api/vest-draw")]
async fn api_vest_state(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(&g.vest_draw)
}

/// Add individual players to the vest draw pool.
#[post("/api/vest-draw/pool")]
async fn api_vest_add_players(state: AppState, body: Json<PoolPlayersBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.vest_draw.add_players(body.player_ids.iter().copied());
    HttpResponse::Ok().json(&g.vest_draw)
}

/// Remove one player from the pool.
#[delete("/api/vest-draw/pool/{player_id}")]
async fn api_vest_remove_player(state: AppState, path: Path<Uuid>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let id = path.into_inner();
    g.vest_draw.remove_player(id);
    HttpResponse::Ok().json(&g.vest_draw)
}

/// Bulk add: every player of one team.
#[post("/api/vest-draw/pool/team")]
async fn api_vest_add_team(state: AppState, body: Json<PoolTeamBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ids: Vec<Uuid> = match g.days.get(&body.day_id) {
        Some(day) => day.team_members(&body.team).iter().map(|p| p.id).collect(),
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    };
    g.vest_draw.add_players(ids);
    HttpResponse::Ok().json(&g.vest_draw)
}

/// Bulk add: everyone except the current champion team (table leader in
/// championship mode, holder in winner-stays).
#[post("/api/vest-draw/pool/except-champion")]
async fn api_vest_add_except_champion(state: AppState, body: Json<PoolExceptChampionBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ids: Vec<Uuid> = {
        let day = match g.days.get(&body.day_id) {
            Some(d) => d,
            None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
        };
        let champion = match day.settings.tournament_type {
            TournamentType::WinnerStays => day.settings.holder.clone(),
            TournamentType::Championship => standings(&day.matches, &day.settings.active_teams)
                .first()
                .map(|row| row.team.clone()),
        };
        match champion {
            Some(team) => pool_excluding_team(&day.players, &team),
            None => day.players.iter().map(|p| p.id).collect(),
        }
    };
    g.vest_draw.add_players(ids);
    HttpResponse::Ok().json(&g.vest_draw)
}

/// Mark one player immune (or clear with null).
#[put("/api/vest-draw/immune")]
async fn api_vest_set_immune(state: AppState, body: Json<ImmuneBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.vest_draw.set_immune(body.player_id);
    HttpResponse::Ok().json(&g.vest_draw)
}

/// Draw the vest washer. The winner is fixed now; the reveal sequence in
/// the response is what the client plays before showing it.
#[post("/api/vest-draw/draw")]
async fn api_vest_draw(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.vest_draw.draw(&mut rand::thread_rng()) {
        Ok(winner) => HttpResponse::Ok().json(serde_json::json!({
            "winner": winner,
            "reveal": reveal_sequence(),
        })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Clear the vest draw state.
#[post("/api/vest-draw/reset")]
async fn api_vest_reset(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.vest_draw.reset();
    HttpResponse::Ok().json(&g.vest_draw)
}

/// Record which team washes the vests (replaces any prior assignment).
#[put("/api/game-days/{id}/vest")]
async fn api_set_vest_team(state: AppState, path: Path<DayPath>, body: Json<VestTeamBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let day = match g.days.get_mut(&path.id) {
        Some(d) => d,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game day" })),
    };
    if !day.has_team(&body.team) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": format!("Unknown team: {}", body.team) }));
    }
    day.vest_team = Some(body.team.clone());
    let response = HttpResponse::Ok().json(&*day);
    if let Err(e) = g.store.set_vest_assignment(path.id, &body.team) {
        log::warn!("Persistence vest assignment failed for game day {}: {}", path.id, e);
    }
    g.sync_day(path.id);
    response
}

/// Match minute derived from the clock, when it is bound to the match
/// being scored. Falls back to minute 1.
fn clock_minute(g: &AppInner, day_id: GameDayId, match_number: u32) -> u32 {
    let now = Instant::now();
    if g.clock.bound_match() != Some(match_number) {
        return 1;
    }
    let duration_secs = g
        .days
        .get(&day_id)
        .and_then(|day| {
            day.get_match(match_number)
                .map(|m| day.settings.duration_for(m.match_type == MatchType::Final))
        })
        .unwrap_or(0);
    let remaining = g.clock.remaining(now).as_secs();
    let elapsed = duration_secs.saturating_sub(remaining);
    (elapsed / 60) as u32 + 1
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(AppInner::new()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_list_game_days)
            .service(api_get_active_day)
            .service(api_create_game_day)
            .service(api_get_game_day)
            .service(api_activate_game_day)
            .service(api_delete_game_day)
            .service(api_add_player)
            .service(api_add_players_bulk)
            .service(api_remove_player)
            .service(api_assign_team)
            .service(api_draw_teams)
            .service(api_list_matches)
            .service(api_set_score)
            .service(api_set_penalties)
            .service(api_finalize_match)
            .service(api_record_goal)
            .service(api_remove_goal)
            .service(api_standings)
            .service(api_tiebreak)
            .service(api_set_durations)
            .service(api_set_mode)
            .service(api_set_active_teams)
            .service(api_clock_start)
            .service(api_clock_pause)
            .service(api_clock_resume)
            .service(api_clock_reset)
            .service(api_clock_status)
            .service(api_vest_state)
            .service(api_vest_add_players)
            .service(api_vest_remove_player)
            .service(api_vest_add_team)
            .service(api_vest_add_except_champion)
            .service(api_vest_set_immune)
            .service(api_vest_draw)
            .service(api_vest_reset)
            .service(api_set_vest_team)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
