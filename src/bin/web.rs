//! Single binary web server: squash scoring sessions and match history via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Finished matches go to MATCH_STORE_PATH (JSON file) or, with MATCH_STORE=memory, RAM.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use squash_marker::{
    Completion, Config, JsonFileStore, LetDecision, MatchSettings, MatchSetup, MatchStatus,
    MatchStore, MemoryStore, NewMatchRecord, PlayerId, SaveClaim, SquashMatch, StoreError, StoreKind,
    ValidationError,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Unique identifier for a scoring session (one match being marked).
type GameId = Uuid;

/// Per-session entry: match state + last activity time (for auto-cleanup).
struct GameEntry {
    game: SquashMatch,
    last_activity: Instant,
}

/// In-memory state: many sessions by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<GameId, GameEntry>>>;

type Store = Data<dyn MatchStore>;

/// Inactivity threshold: sessions not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Session state plus the derived queries the UI polls.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GameView<'a> {
    id: GameId,
    #[serde(flatten)]
    game: &'a SquashMatch,
    status: MatchStatus,
}

impl<'a> GameView<'a> {
    fn new(id: GameId, game: &'a SquashMatch) -> Self {
        Self {
            id,
            game,
            status: game.status(),
        }
    }
}

#[derive(Serialize)]
struct CompletionResponse<'a> {
    completion: Completion,
    #[serde(flatten)]
    view: GameView<'a>,
}

#[derive(Deserialize)]
struct PlayerBody {
    player: u8,
}

#[derive(Deserialize)]
struct LetDecisionBody {
    player: u8,
    decision: LetDecision,
}

#[derive(Deserialize)]
struct EventBody {
    name: String,
}

#[derive(Deserialize)]
struct PlayerDetailsBody {
    name: Option<String>,
    color: Option<String>,
}

/// Path segment: session id (e.g. /api/games/{id})
#[derive(Deserialize)]
struct GamePath {
    id: GameId,
}

/// Path segments: session id and player number (e.g. /api/games/{id}/players/{player})
#[derive(Deserialize)]
struct GamePlayerPath {
    id: GameId,
    player: u8,
}

#[derive(Deserialize)]
struct MatchPath {
    id: Uuid,
}

fn bad_request(e: impl std::fmt::Display) -> HttpResponse {
    log::warn!("Rejected request: {}", e);
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn no_game() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No game" }))
}

fn store_error(e: StoreError) -> HttpResponse {
    match e {
        StoreError::NotFound(_) => HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() })),
        StoreError::BlankEventName => bad_request(e),
        e => {
            log::error!("Match store error: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

/// Run `f` on the session's match under the write lock and return the updated view.
fn with_game<F>(state: &AppState, id: GameId, f: F) -> HttpResponse
where
    F: FnOnce(&mut SquashMatch) -> Result<(), ValidationError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return no_game(),
    };
    entry.last_activity = Instant::now();
    match f(&mut entry.game) {
        Ok(()) => HttpResponse::Ok().json(GameView::new(id, &entry.game)),
        Err(e) => bad_request(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "squash-marker",
    })
}

/// Start a new match (returns it with id; client stores id for subsequent requests).
#[post("/api/games")]
async fn api_create_game(state: AppState, body: Json<MatchSetup>) -> HttpResponse {
    let game = match SquashMatch::new(body.into_inner()) {
        Ok(game) => game,
        Err(e) => return bad_request(e),
    };
    let id = Uuid::new_v4();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = g.entry(id).or_insert(GameEntry {
        game,
        last_activity: Instant::now(),
    });
    HttpResponse::Ok().json(GameView::new(id, &entry.game))
}

/// Get a session by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/games/{id}")]
async fn api_get_game(state: AppState, path: Path<GamePath>) -> HttpResponse {
    with_game(&state, path.id, |_| Ok(()))
}

/// Start over in the same session with a new setup.
#[put("/api/games/{id}")]
async fn api_initialize_game(state: AppState, path: Path<GamePath>, body: Json<MatchSetup>) -> HttpResponse {
    with_game(&state, path.id, |game| game.initialize_game(body.into_inner()))
}

/// Rally won by a player.
#[post("/api/games/{id}/points")]
async fn api_add_point(state: AppState, path: Path<GamePath>, body: Json<PlayerBody>) -> HttpResponse {
    with_game(&state, path.id, |game| {
        game.add_point(PlayerId::from_number(body.player)?);
        Ok(())
    })
}

/// Server switches box.
#[post("/api/games/{id}/serve-side")]
async fn api_toggle_serve_side(state: AppState, path: Path<GamePath>, body: Json<PlayerBody>) -> HttpResponse {
    with_game(&state, path.id, |game| {
        game.toggle_serve_side(PlayerId::from_number(body.player)?);
        Ok(())
    })
}

/// Referee's decision on a player's appeal: let, stroke or no let.
#[post("/api/games/{id}/let-decision")]
async fn api_let_decision(state: AppState, path: Path<GamePath>, body: Json<LetDecisionBody>) -> HttpResponse {
    with_game(&state, path.id, |game| {
        game.handle_let_decision(PlayerId::from_number(body.player)?, body.decision);
        Ok(())
    })
}

#[post("/api/games/{id}/undo")]
async fn api_undo(state: AppState, path: Path<GamePath>) -> HttpResponse {
    with_game(&state, path.id, |game| {
        game.undo_last_point();
        Ok(())
    })
}

#[post("/api/games/{id}/next-game")]
async fn api_next_game(state: AppState, path: Path<GamePath>) -> HttpResponse {
    with_game(&state, path.id, |game| {
        game.start_next_game();
        Ok(())
    })
}

/// Complete a decided game; saves the match when it is decided too.
/// The session lock is released while the store works.
#[post("/api/games/{id}/complete")]
async fn api_complete_game(state: AppState, store: Store, path: Path<GamePath>) -> HttpResponse {
    let (completion, claim) = {
        let mut g = match state.write() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        let entry = match g.get_mut(&path.id) {
            Some(e) => e,
            None => return no_game(),
        };
        entry.last_activity = Instant::now();
        let completion = entry.game.complete_game();
        let claim = match completion {
            Completion::MatchWon(_) => entry.game.begin_save(),
            _ => None,
        };
        (completion, claim)
    };
    finish_save(&state, &store, path.id, claim, completion).await
}

/// Retry a failed save. No-op while a save is in flight or once saved.
#[post("/api/games/{id}/save")]
async fn api_save_match(state: AppState, store: Store, path: Path<GamePath>) -> HttpResponse {
    let (completion, claim) = {
        let mut g = match state.write() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        let entry = match g.get_mut(&path.id) {
            Some(e) => e,
            None => return no_game(),
        };
        entry.last_activity = Instant::now();
        let completion = match entry.game.check_match_win() {
            Some(winner) if entry.game.match_won => Completion::MatchWon(winner),
            _ => Completion::InProgress,
        };
        (completion, entry.game.begin_save())
    };
    finish_save(&state, &store, path.id, claim, completion).await
}

/// Run a claimed save, then hand the result back to the session. If the session's match
/// was replaced meanwhile, `SquashMatch::finish_save` drops the result by its token.
async fn finish_save(
    state: &AppState,
    store: &Store,
    id: GameId,
    claim: Option<SaveClaim>,
    completion: Completion,
) -> HttpResponse {
    let result = match claim {
        Some(claim) => Some((claim.token, store.save_match(claim.record).await)),
        None => None,
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return no_game(),
    };
    if let Some((token, result)) = result {
        entry.game.finish_save(token, result);
    }
    HttpResponse::Ok().json(CompletionResponse {
        completion,
        view: GameView::new(id, &entry.game),
    })
}

#[delete("/api/games/{id}/save-error")]
async fn api_clear_save_error(state: AppState, path: Path<GamePath>) -> HttpResponse {
    with_game(&state, path.id, |game| {
        game.clear_save_error();
        Ok(())
    })
}

/// Back to an empty match (cancelled or finished).
#[post("/api/games/{id}/reset")]
async fn api_reset_game(state: AppState, path: Path<GamePath>) -> HttpResponse {
    with_game(&state, path.id, |game| {
        game.reset_game();
        Ok(())
    })
}

#[put("/api/games/{id}/settings")]
async fn api_update_settings(state: AppState, path: Path<GamePath>, body: Json<MatchSettings>) -> HttpResponse {
    with_game(&state, path.id, |game| game.update_game_settings(body.into_inner()))
}

/// Rename or recolour a player.
#[put("/api/games/{id}/players/{player}")]
async fn api_set_player_details(
    state: AppState,
    path: Path<GamePlayerPath>,
    body: Json<PlayerDetailsBody>,
) -> HttpResponse {
    let body = body.into_inner();
    with_game(&state, path.id, |game| {
        game.set_player_details(PlayerId::from_number(path.player)?, body.name, body.color);
        Ok(())
    })
}

/// Stored matches, newest first.
#[get("/api/matches")]
async fn api_get_matches(store: Store) -> HttpResponse {
    match store.get_matches().await {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => store_error(e),
    }
}

/// Store a finished match sent by a client that keeps score itself.
#[post("/api/matches")]
async fn api_save_record(store: Store, body: Json<NewMatchRecord>) -> HttpResponse {
    match store.save_match(body.into_inner()).await {
        Ok(stored) => HttpResponse::Ok().json(stored),
        Err(e) => store_error(e),
    }
}

#[get("/api/matches/{id}")]
async fn api_get_match(store: Store, path: Path<MatchPath>) -> HttpResponse {
    match store.get_match(path.id).await {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => store_error(e),
    }
}

#[delete("/api/matches/{id}")]
async fn api_delete_match(store: Store, path: Path<MatchPath>) -> HttpResponse {
    match store.delete_match(path.id).await {
        Ok(success) => HttpResponse::Ok().json(serde_json::json!({ "success": success })),
        Err(e) => store_error(e),
    }
}

#[get("/api/events")]
async fn api_get_events(store: Store) -> HttpResponse {
    match store.get_event_names().await {
        Ok(names) => HttpResponse::Ok().json(names),
        Err(e) => store_error(e),
    }
}

/// Register an event name; an existing event with that name is returned unchanged.
#[post("/api/events")]
async fn api_create_event(store: Store, body: Json<EventBody>) -> HttpResponse {
    match store.create_event(body.into_inner().name).await {
        Ok(event) => HttpResponse::Ok().json(event),
        Err(e) => store_error(e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let store: Arc<dyn MatchStore> = match &config.store {
        StoreKind::Memory => {
            log::info!("Keeping finished matches in memory");
            Arc::new(MemoryStore::new())
        }
        StoreKind::JsonFile(path) => {
            log::info!("Saving finished matches to {}", path.display());
            Arc::new(JsonFileStore::new(path.clone()))
        }
    };
    let store: Store = Data::from(store);

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<GameId, GameEntry>::new()));

    // Background task: every 30 minutes, remove sessions inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive game(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(store.clone())
            .service(api_health)
            .service(api_create_game)
            .service(api_get_game)
            .service(api_initialize_game)
            .service(api_add_point)
            .service(api_toggle_serve_side)
            .service(api_let_decision)
            .service(api_undo)
            .service(api_next_game)
            .service(api_complete_game)
            .service(api_save_match)
            .service(api_clear_save_error)
            .service(api_reset_game)
            .service(api_update_settings)
            .service(api_set_player_details)
            .service(api_get_matches)
            .service(api_save_record)
            .service(api_get_match)
            .service(api_delete_match)
            .service(api_get_events)
            .service(api_create_event)
    })
    .bind(bind)?
    .run()
    .await
}
