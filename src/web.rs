use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use log::error;
use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;
use crate::leaderboard::{Leaderboard, NewEntry};

/// Machine-readable code returned with duplicate-name rejections.
pub const CODE_NAME_EXISTS: &str = "NAME_EXISTS";

/// Game parameters the client needs before starting a session.
#[derive(Debug, Clone, Serialize)]
pub struct GameInfo {
    pub seconds: u32,
    pub phrases: Vec<String>,
}

pub struct AppState {
    pub db: Mutex<Leaderboard>,
    pub game: GameInfo,
}

impl AppState {
    pub fn new(db: Leaderboard, game: GameInfo) -> Self {
        Self {
            db: Mutex::new(db),
            game,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/leaderboard", get(get_leaderboard).post(post_leaderboard))
        .route("/phrases", get(get_phrases))
        .with_state(state)
}

#[derive(Serialize)]
struct ApiSuccess<T> {
    success: bool,
    data: T,
}

#[derive(Serialize)]
struct ApiFailure {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

fn success<T: Serialize>(status: StatusCode, data: T) -> Response {
    (
        status,
        Json(ApiSuccess {
            success: true,
            data,
        }),
    )
        .into_response()
}

fn failure(status: StatusCode, message: &str, code: Option<&'static str>) -> Response {
    (
        status,
        Json(ApiFailure {
            success: false,
            error: message.to_string(),
            code,
        }),
    )
        .into_response()
}

async fn get_phrases(State(state): State<Arc<AppState>>) -> Response {
    success(StatusCode::OK, state.game.clone())
}

async fn get_leaderboard(State(state): State<Arc<AppState>>) -> Response {
    let db = match state.db.lock() {
        Ok(db) => db,
        Err(_) => {
            error!("leaderboard lock poisoned");
            return failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch leaderboard",
                None,
            );
        }
    };

    match db.list() {
        Ok(entries) => success(StatusCode::OK, entries),
        Err(e) => {
            error!("failed to list leaderboard: {}", e);
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch leaderboard",
                None,
            )
        }
    }
}

/// Check field presence, types, and ranges, and produce a storable entry.
/// The name is trimmed before the length check and stored trimmed.
fn validate(body: &Value) -> Result<NewEntry, &'static str> {
    let name = match body.get("name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => name.trim(),
        _ => return Err("Name is required"),
    };
    let len = name.chars().count();
    if len < 2 {
        return Err("Name must be at least 2 characters");
    }
    if len > 20 {
        return Err("Name must be 20 characters or less");
    }

    let wpm = match body.get("wpm").and_then(Value::as_i64) {
        Some(wpm) if wpm >= 0 => wpm,
        _ => return Err("Valid WPM is required"),
    };
    let accuracy = match body.get("accuracy").and_then(Value::as_i64) {
        Some(accuracy) if (0..=100).contains(&accuracy) => accuracy,
        _ => return Err("Valid accuracy is required"),
    };
    let phrases = match body.get("phrases").and_then(Value::as_i64) {
        Some(phrases) if phrases >= 0 => phrases,
        _ => return Err("Valid phrases count is required"),
    };

    let timestamp = body
        .get("timestamp")
        .and_then(Value::as_i64)
        .unwrap_or_else(|| Utc::now().timestamp_millis());

    Ok(NewEntry {
        name: name.to_string(),
        wpm,
        accuracy,
        phrases,
        timestamp,
    })
}

async fn post_leaderboard(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Response {
    let entry = match validate(&body) {
        Ok(entry) => entry,
        Err(message) => return failure(StatusCode::BAD_REQUEST, message, None),
    };

    let db = match state.db.lock() {
        Ok(db) => db,
        Err(_) => {
            error!("leaderboard lock poisoned");
            return failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to add entry", None);
        }
    };

    // Pre-check gives the common case a clean rejection; the UNIQUE
    // constraint in the store covers any race at insert time.
    match db.name_exists(&entry.name) {
        Ok(true) => {
            return failure(
                StatusCode::CONFLICT,
                "This name is already taken. Please choose a different name.",
                Some(CODE_NAME_EXISTS),
            )
        }
        Ok(false) => {}
        Err(e) => {
            error!("failed to check name: {}", e);
            return failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to add entry", None);
        }
    }

    match db.insert(&entry) {
        Ok(persisted) => success(StatusCode::CREATED, persisted),
        Err(StoreError::DuplicateName) => failure(
            StatusCode::CONFLICT,
            "This name is already taken. Please choose a different name.",
            Some(CODE_NAME_EXISTS),
        ),
        Err(e) => {
            error!("failed to add leaderboard entry: {}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to add entry", None)
        }
    }
}
