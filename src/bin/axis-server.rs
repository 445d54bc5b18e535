//! Axis dashboard API server.
//!
//! Serves the normalized state slots over REST:
//!
//! **Health + identity:**
//! - `GET  /health` — liveness probe
//! - `GET  /api/v1/auth/me` — static single-user identity
//!
//! **Documents:**
//! - `GET|PUT /api/v1/projects` — project list (max 3 active)
//! - `GET|PUT /api/v1/resources` — resource sections
//! - `GET|PUT /api/v1/reality` — commitments
//! - `GET|PUT /api/v1/week` — week document (full replace)
//! - `PUT  /api/v1/week/outcomes`, `PUT /api/v1/week/blockers` — fixed-3
//! - `GET  /api/v1/today`, `PUT /api/v1/today/top3`,
//!   `PATCH /api/v1/today/top3/{item_id}` — top3 edit + toggle
//!
//! **Journal:**
//! - `POST /api/v1/journal/daily`, `POST /api/v1/journal/weekly`
//! - `GET  /api/v1/journal?limit&type` — newest-first list
//! - `GET|PATCH|DELETE /api/v1/journal/{id}`
//!
//! **Views + legacy:**
//! - `GET  /api/v1/views/dashboard` — composed one-screen read
//! - `GET  /api/v1/views/today`,
//!   `PATCH /api/v1/views/today/{kind}/{item_id}` — legacy compatibility
//!
//! Run: `cargo run --bin axis-server`

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tower_http::cors::CorsLayer;

use axis_api::error::AxisError;
use axis_api::hub::Hub;
use axis_api::paths::AxisPaths;
use axis_api::state::journal::{DailyFields, EntryKind, WeeklyFields};
use axis_api::state::projects::ProjectsDoc;
use axis_api::state::reality::RealityDoc;
use axis_api::state::resources::ResourcesDoc;
use axis_api::state::today::TodayState;
use axis_api::state::week::WeekState;
use axis_api::views::{self, DashboardView};

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

/// Map core errors onto HTTP statuses: not-found conditions to 404, other
/// state errors to 400, storage failures to 500.
fn error_response(err: AxisError) -> (StatusCode, String) {
    let status = match &err {
        AxisError::State(state) if state.is_not_found() => StatusCode::NOT_FOUND,
        AxisError::State(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

// ── Request types ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WeekOutcomesPut {
    outcomes: Vec<String>,
}

#[derive(Deserialize)]
struct WeekBlockersPut {
    blockers: Vec<String>,
}

#[derive(Deserialize)]
struct TodayTop3Put {
    items: Vec<String>,
}

#[derive(Deserialize)]
struct ToggleDone {
    done: bool,
}

#[derive(Deserialize)]
struct JournalQuery {
    limit: Option<usize>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

// ── Health + identity ─────────────────────────────────────────────────────

async fn health() -> Json<Value> {
    Json(json!({"ok": true}))
}

async fn me() -> Json<Value> {
    Json(json!({"id": "user_1", "name": "RM", "role": "primary"}))
}

// ── Documents ─────────────────────────────────────────────────────────────

async fn get_projects(State(hub): State<Arc<Hub>>) -> Json<ProjectsDoc> {
    Json(hub.projects())
}

async fn put_projects(
    State(hub): State<Arc<Hub>>,
    Json(body): Json<Value>,
) -> ApiResult<ProjectsDoc> {
    hub.replace_projects(&body).map(Json).map_err(error_response)
}

async fn get_resources(State(hub): State<Arc<Hub>>) -> Json<ResourcesDoc> {
    Json(hub.resources())
}

async fn put_resources(
    State(hub): State<Arc<Hub>>,
    Json(body): Json<Value>,
) -> ApiResult<ResourcesDoc> {
    hub.replace_resources(&body).map(Json).map_err(error_response)
}

async fn get_reality(State(hub): State<Arc<Hub>>) -> Json<RealityDoc> {
    Json(hub.reality())
}

async fn put_reality(
    State(hub): State<Arc<Hub>>,
    Json(body): Json<Value>,
) -> ApiResult<RealityDoc> {
    hub.replace_reality(&body).map(Json).map_err(error_response)
}

async fn get_week(State(hub): State<Arc<Hub>>) -> Json<WeekState> {
    Json(hub.week())
}

async fn put_week(State(hub): State<Arc<Hub>>, Json(body): Json<Value>) -> ApiResult<WeekState> {
    hub.replace_week(&body).map(Json).map_err(error_response)
}

async fn put_week_outcomes(
    State(hub): State<Arc<Hub>>,
    Json(body): Json<WeekOutcomesPut>,
) -> ApiResult<WeekState> {
    hub.set_week_outcomes(&body.outcomes)
        .map(Json)
        .map_err(error_response)
}

async fn put_week_blockers(
    State(hub): State<Arc<Hub>>,
    Json(body): Json<WeekBlockersPut>,
) -> ApiResult<WeekState> {
    hub.set_week_blockers(&body.blockers)
        .map(Json)
        .map_err(error_response)
}

async fn get_today(State(hub): State<Arc<Hub>>) -> Json<TodayState> {
    Json(hub.today())
}

async fn put_today_top3(
    State(hub): State<Arc<Hub>>,
    Json(body): Json<TodayTop3Put>,
) -> ApiResult<TodayState> {
    hub.set_top3(&body.items).map(Json).map_err(error_response)
}

async fn toggle_today_top3(
    State(hub): State<Arc<Hub>>,
    Path(item_id): Path<String>,
    Json(body): Json<ToggleDone>,
) -> ApiResult<Value> {
    hub.set_top3_done(&item_id, body.done)
        .map(|item| Json(json!(item)))
        .map_err(error_response)
}

// ── Journal ───────────────────────────────────────────────────────────────

async fn create_journal_daily(
    State(hub): State<Arc<Hub>>,
    Json(fields): Json<DailyFields>,
) -> ApiResult<Value> {
    hub.journal_append_daily(&fields)
        .map(Json)
        .map_err(error_response)
}

async fn create_journal_weekly(
    State(hub): State<Arc<Hub>>,
    Json(fields): Json<WeeklyFields>,
) -> ApiResult<Value> {
    hub.journal_append_weekly(&fields)
        .map(Json)
        .map_err(error_response)
}

async fn list_journal(
    State(hub): State<Arc<Hub>>,
    Query(query): Query<JournalQuery>,
) -> ApiResult<Value> {
    let kind = match query.kind.as_deref() {
        None => None,
        Some(s) => Some(EntryKind::parse(s).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                format!("type must be daily or weekly, got \"{s}\""),
            )
        })?),
    };
    Ok(Json(json!({"entries": hub.journal_list(query.limit, kind)})))
}

async fn get_journal(State(hub): State<Arc<Hub>>, Path(id): Path<String>) -> ApiResult<Value> {
    hub.journal_entry(&id).map(Json).map_err(error_response)
}

async fn patch_journal(
    State(hub): State<Arc<Hub>>,
    Path(id): Path<String>,
    Json(patch): Json<Map<String, Value>>,
) -> ApiResult<Value> {
    hub.journal_patch(&id, &patch).map(Json).map_err(error_response)
}

async fn delete_journal(State(hub): State<Arc<Hub>>, Path(id): Path<String>) -> ApiResult<Value> {
    hub.journal_delete(&id)
        .map(|(id, kind)| Json(json!({"deleted": id, "type": kind})))
        .map_err(error_response)
}

// ── Views + legacy ────────────────────────────────────────────────────────

async fn dashboard_view(State(hub): State<Arc<Hub>>) -> Json<DashboardView> {
    Json(views::dashboard(&hub))
}

async fn today_view(State(hub): State<Arc<Hub>>) -> Json<TodayState> {
    Json(hub.today())
}

async fn legacy_toggle(
    State(hub): State<Arc<Hub>>,
    Path((kind, item_id)): Path<(String, String)>,
    Json(body): Json<ToggleDone>,
) -> ApiResult<Value> {
    hub.set_today_done_legacy(&kind, &item_id, body.done)
        .map(Json)
        .map_err(error_response)
}

// ── Main ──────────────────────────────────────────────────────────────────

fn router(hub: Arc<Hub>) -> Router {
    Router::new()
        // Health + identity.
        .route("/health", get(health))
        .route("/api/v1/auth/me", get(me))
        // Documents.
        .route("/api/v1/projects", get(get_projects).put(put_projects))
        .route("/api/v1/resources", get(get_resources).put(put_resources))
        .route("/api/v1/reality", get(get_reality).put(put_reality))
        .route("/api/v1/week", get(get_week).put(put_week))
        .route("/api/v1/week/outcomes", put(put_week_outcomes))
        .route("/api/v1/week/blockers", put(put_week_blockers))
        .route("/api/v1/today", get(get_today))
        .route("/api/v1/today/top3", put(put_today_top3))
        .route("/api/v1/today/top3/{item_id}", patch(toggle_today_top3))
        // Journal.
        .route("/api/v1/journal/daily", post(create_journal_daily))
        .route("/api/v1/journal/weekly", post(create_journal_weekly))
        .route("/api/v1/journal", get(list_journal))
        .route(
            "/api/v1/journal/{id}",
            get(get_journal).patch(patch_journal).delete(delete_journal),
        )
        // Views + legacy compatibility.
        .route("/api/v1/views/dashboard", get(dashboard_view))
        .route("/api/v1/views/today", get(today_view))
        .route("/api/v1/views/today/{kind}/{item_id}", patch(legacy_toggle))
        .layer(CorsLayer::permissive())
        .with_state(hub)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let bind = std::env::var("AXIS_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("AXIS_PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("{bind}:{port}");

    let paths = AxisPaths::resolve();
    let hub = match Hub::open(paths) {
        Ok(hub) => Arc::new(hub),
        Err(e) => {
            tracing::error!("failed to load state: {e}");
            std::process::exit(1);
        }
    };

    let app = router(hub);

    tracing::info!("axis server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
