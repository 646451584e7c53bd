//! Single binary web server: JSON API for rosters, draws and payouts.
//! Static assets are served from /static.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, SESSION_TTL_HOURS (inactivity cleanup, default 12).

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use dart_draw_web::{
    import_csv, tournament_payouts, ActiveDraw, DrawError, DrawOutcome, DrawSession, FeeSettings,
    GroupRole, InMemoryStore, PersistenceError, Player, ScoreKey, Strategy, Tournament,
    TournamentError, TournamentId, TournamentStore,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Per-tournament draw: editing session + last activity time (for auto-cleanup).
struct DrawEntry {
    session: DrawSession,
    last_activity: Instant,
}

struct AppState {
    store: InMemoryStore,
    draws: Mutex<HashMap<TournamentId, DrawEntry>>,
}

type State = Data<AppState>;

struct ServerConfig {
    host: String,
    port: u16,
    session_ttl: Duration,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let hours: u64 = std::env::var("SESSION_TTL_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or_else(default_ttl_hours);
        Self {
            host,
            port,
            session_ttl: Duration::from_secs(hours * 3600),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_ttl_hours() -> u64 {
    12
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct SettingsBody {
    fees: FeeSettings,
    payout_spots: u32,
    #[serde(default)]
    strategy: Strategy,
}

#[derive(Deserialize)]
struct PaidBody {
    paid: bool,
}

#[derive(Deserialize)]
struct DrawBody {
    #[serde(default)]
    score_key: ScoreKey,
}

#[derive(Deserialize)]
struct SwapBody {
    from: GroupRole,
    from_index: usize,
    to: GroupRole,
    to_index: usize,
}

#[derive(Deserialize)]
struct ShuffleBody {
    group: GroupRole,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and player name.
#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    name: String,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn unavailable(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(serde_json::json!({ "error": e.to_string() }))
}

fn bad_request(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn outcome_json(outcome: &DrawOutcome) -> serde_json::Value {
    match outcome {
        DrawOutcome::Persisted => serde_json::json!({ "status": "persisted" }),
        DrawOutcome::Stale(e) => {
            serde_json::json!({ "status": "stale", "message": e.to_string() })
        }
        DrawOutcome::Pending(e) => {
            serde_json::json!({ "status": "pending", "message": e.to_string() })
        }
        DrawOutcome::Locked => serde_json::json!({ "status": "locked" }),
    }
}

fn draw_response(draw: Option<&ActiveDraw>, outcome: &DrawOutcome) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "draw": draw,
        "outcome": outcome_json(outcome),
    }))
}

/// Load, mutate and save a tournament record.
/// The draw session sees the new record on its next sync.
async fn update_tournament<F>(state: &State, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    let mut t = match state.store.load(id).await {
        Ok(t) => t,
        Err(_) => return not_found(),
    };
    if let Err(e) = f(&mut t) {
        return bad_request(e);
    }
    match state.store.save(t).await {
        Ok(saved) => HttpResponse::Ok().json(saved),
        Err(e) => unavailable(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "dart-draw-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: State,
    body: Option<Json<CreateTournamentBody>>,
) -> HttpResponse {
    let name = body.map(|b| b.into_inner().name).unwrap_or_default();
    match state.store.save(Tournament::new(name)).await {
        Ok(t) => {
            log::info!("Created tournament {}", t.id);
            HttpResponse::Ok().json(t)
        }
        Err(e) => unavailable(e),
    }
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: State, path: Path<TournamentPath>) -> HttpResponse {
    match state.store.load(path.id).await {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(_) => not_found(),
    }
}

/// Add a manually entered player.
#[post("/api/tournaments/{id}/players")]
async fn api_add_player(
    state: State,
    path: Path<TournamentPath>,
    body: Json<Player>,
) -> HttpResponse {
    let player = body.into_inner();
    update_tournament(&state, path.id, |t| t.add_player(player)).await
}

/// Import players from a CSV body (`name,ppd,mpr[,paid]`).
#[post("/api/tournaments/{id}/players/import")]
async fn api_import_players(
    state: State,
    path: Path<TournamentPath>,
    body: Bytes,
) -> HttpResponse {
    let players = match import_csv(body.as_ref()) {
        Ok(p) => p,
        Err(e) => return bad_request(e),
    };
    update_tournament(&state, path.id, |t| t.add_players(players)).await
}

#[delete("/api/tournaments/{id}/players/{name}")]
async fn api_remove_player(state: State, path: Path<TournamentPlayerPath>) -> HttpResponse {
    update_tournament(&state, path.id, |t| t.remove_player(&path.name)).await
}

/// Set or clear a player's paid flag (`{"paid": true|false}`).
#[put("/api/tournaments/{id}/players/{name}/paid")]
async fn api_set_paid(
    state: State,
    path: Path<TournamentPlayerPath>,
    body: Json<PaidBody>,
) -> HttpResponse {
    let paid = body.paid;
    update_tournament(&state, path.id, |t| t.set_paid(&path.name, paid)).await
}

/// Update fees, payout spots and draw strategy.
#[put("/api/tournaments/{id}/settings")]
async fn api_update_settings(
    state: State,
    path: Path<TournamentPath>,
    body: Json<SettingsBody>,
) -> HttpResponse {
    let body = body.into_inner();
    update_tournament(&state, path.id, |t| {
        t.update_settings(body.fees, body.payout_spots, body.strategy)
    })
    .await
}

/// Mark the tournament completed; draws become read-only.
#[post("/api/tournaments/{id}/complete")]
async fn api_complete(state: State, path: Path<TournamentPath>) -> HttpResponse {
    update_tournament(&state, path.id, |t| {
        t.complete();
        Ok(())
    })
    .await
}

/// Current payout schedule (computed, not stored).
#[get("/api/tournaments/{id}/payouts")]
async fn api_payouts(state: State, path: Path<TournamentPath>) -> HttpResponse {
    match state.store.load(path.id).await {
        Ok(t) => HttpResponse::Ok().json(serde_json::json!({
            "prize_pool": t.prize_pool(),
            "schedule": tournament_payouts(&t),
        })),
        Err(_) => not_found(),
    }
}

/// Which draw action a handler performs once the session is synced.
enum DrawAction {
    View,
    Regenerate(ScoreKey),
    Swap(SwapBody),
    Shuffle(GroupRole),
    Teams,
    Retry,
}

async fn run_draw(state: &State, id: TournamentId, action: DrawAction) -> HttpResponse {
    let tournament = match state.store.load(id).await {
        Ok(t) => t,
        Err(_) => return not_found(),
    };
    let mut draws = state.draws.lock().await;
    let entry = draws.entry(id).or_insert_with(|| DrawEntry {
        session: DrawSession::new(),
        last_activity: Instant::now(),
    });
    entry.last_activity = Instant::now();
    let session = &mut entry.session;
    session.sync(&tournament);

    let store = &state.store;
    let result: Result<DrawOutcome, DrawError> = match action {
        DrawAction::View => Ok(match session.active() {
            Some(a) if a.completed => DrawOutcome::Locked,
            Some(a) if !a.durable => DrawOutcome::Stale(PersistenceError::Unavailable(
                "last save failed; retry to store teams".to_string(),
            )),
            _ => DrawOutcome::Persisted,
        }),
        DrawAction::Regenerate(key) => session.regenerate(key, store).await,
        DrawAction::Swap(b) => session.swap(b.from, b.from_index, b.to, b.to_index, store).await,
        DrawAction::Shuffle(role) => session.shuffle(role, store).await,
        DrawAction::Teams => session.generate_teams(store).await,
        DrawAction::Retry => session.retry_persist(store).await,
    };
    match result {
        Ok(outcome) => draw_response(session.active(), &outcome),
        Err(e) => bad_request(e),
    }
}

#[get("/api/tournaments/{id}/draw")]
async fn api_get_draw(state: State, path: Path<TournamentPath>) -> HttpResponse {
    run_draw(&state, path.id, DrawAction::View).await
}

/// Partition the roster (or reset it) with the given sort key.
#[post("/api/tournaments/{id}/draw")]
async fn api_draw(
    state: State,
    path: Path<TournamentPath>,
    body: Option<Json<DrawBody>>,
) -> HttpResponse {
    let key = body.map(|b| b.score_key).unwrap_or_default();
    run_draw(&state, path.id, DrawAction::Regenerate(key)).await
}

#[post("/api/tournaments/{id}/draw/swap")]
async fn api_draw_swap(
    state: State,
    path: Path<TournamentPath>,
    body: Json<SwapBody>,
) -> HttpResponse {
    run_draw(&state, path.id, DrawAction::Swap(body.into_inner())).await
}

#[post("/api/tournaments/{id}/draw/shuffle")]
async fn api_draw_shuffle(
    state: State,
    path: Path<TournamentPath>,
    body: Json<ShuffleBody>,
) -> HttpResponse {
    run_draw(&state, path.id, DrawAction::Shuffle(body.group)).await
}

#[post("/api/tournaments/{id}/draw/teams")]
async fn api_draw_teams(state: State, path: Path<TournamentPath>) -> HttpResponse {
    run_draw(&state, path.id, DrawAction::Teams).await
}

/// Re-send teams after a failed save.
#[post("/api/tournaments/{id}/draw/retry")]
async fn api_draw_retry(state: State, path: Path<TournamentPath>) -> HttpResponse {
    run_draw(&state, path.id, DrawAction::Retry).await
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(AppState {
        store: InMemoryStore::new(),
        draws: Mutex::new(HashMap::new()),
    });

    // Every 30 minutes, drop draws and tournaments idle for longer than the TTL
    let state_cleanup = state.clone();
    let ttl = config.session_ttl;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut draws = state_cleanup.draws.lock().await;
            let before = draws.len();
            draws.retain(|_, entry| entry.last_activity.elapsed() < ttl);
            let removed_draws = before - draws.len();
            drop(draws);

            let cutoff = chrono::Utc::now()
                - chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::hours(12));
            let removed = state_cleanup
                .store
                .remove_where(|t| t.updated_at < cutoff)
                .await;
            if removed > 0 || removed_draws > 0 {
                log::info!(
                    "Cleaned up {} inactive tournament(s) and {} draw session(s)",
                    removed,
                    removed_draws
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_import_players)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_set_paid)
            .service(api_update_settings)
            .service(api_complete)
            .service(api_payouts)
            .service(api_get_draw)
            .service(api_draw)
            .service(api_draw_swap)
            .service(api_draw_shuffle)
            .service(api_draw_teams)
            .service(api_draw_retry)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}
