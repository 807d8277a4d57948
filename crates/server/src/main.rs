use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use shared::{
    domain::{demo_stimuli, Stimulus},
    error::{ErrorCode, LogServiceError},
    protocol::{ErrorReply, LogAck},
};
use storage::EventLog;
use tracing::{error, info};

mod config;

use config::{load_settings, prepare_log_path};

#[derive(Clone)]
struct AppState {
    log: EventLog,
    stimuli: Arc<Vec<Stimulus>>,
}

const MAX_EVENT_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let log_path = prepare_log_path(&settings.log_file)?;
    let state = AppState {
        log: EventLog::new(log_path),
        stimuli: Arc::new(demo_stimuli()),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "logging service listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/data", get(stimulus_data))
        .route("/api/log", post(append_event).fallback(method_not_allowed))
        .layer(DefaultBodyLimit::max(MAX_EVENT_BYTES))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn stimulus_data(State(state): State<Arc<AppState>>) -> Json<Vec<Stimulus>> {
    Json(state.stimuli.as_ref().clone())
}

/// Stamps the incoming event with the server arrival time and appends it.
/// The payload is persisted as-is; extra fields pass through unmodified.
async fn append_event(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<LogAck>, (StatusCode, Json<ErrorReply>)> {
    let mut payload: Value = serde_json::from_slice(&body)
        .map_err(|e| reply(LogServiceError::Validation(format!("invalid JSON body: {e}"))))?;

    let Some(fields) = payload.as_object_mut() else {
        return Err(reply(LogServiceError::Validation(
            "event payload must be a JSON object".into(),
        )));
    };
    fields.insert("receivedAt".into(), json!(Utc::now()));

    state.log.append(payload).await.map_err(|error| {
        error!(%error, "failed to append trial event");
        reply(LogServiceError::Io(error.to_string()))
    })?;

    Ok(Json(LogAck::ok()))
}

async fn method_not_allowed() -> (StatusCode, Json<ErrorReply>) {
    reply(LogServiceError::MethodNotAllowed)
}

fn reply(error: LogServiceError) -> (StatusCode, Json<ErrorReply>) {
    let status = match error.code() {
        ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Io => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorReply::new(error.to_string())))
}
