use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{info, warn};

use super::error::ApiError;
use super::state::{AppState, ACTOR};
use crate::auth;
use crate::db::FactTable;
use crate::models::SimulationRow;

/// A fact table that can be served as a JSON collection.
pub(crate) trait Resource: FactTable + Serialize + DeserializeOwned + Send + Sync + 'static {}

impl<T> Resource for T where T: FactTable + Serialize + DeserializeOwned + Send + Sync + 'static {}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct MessageBody {
    pub(crate) message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<i64>,
}

impl MessageBody {
    fn new(message: String) -> Self {
        Self { message, id: None }
    }
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|e| ApiError::Validation(e.body_text()))
}

pub(crate) async fn health() -> &'static str {
    "OK"
}

// ── Collections ───────────────────────────────────────────────

pub(crate) async fn list_records<T: Resource>(
    State(state): State<AppState>,
) -> Result<Json<Vec<T>>, ApiError> {
    let label = T::SERIES.label();
    let rows = state
        .with_db(T::list)
        .map_err(|e| ApiError::store(format!("Failed to load {label} data"), e))?;
    Ok(Json(rows))
}

pub(crate) async fn get_record<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<T>, ApiError> {
    let label = T::SERIES.label();
    state
        .with_db(|db| T::get(db, id))
        .map_err(|e| ApiError::store(format!("Failed to load {label} data"), e))?
        .map(Json)
        .ok_or(ApiError::NotFound(label))
}

pub(crate) async fn create_record<T: Resource>(
    State(state): State<AppState>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageBody>), ApiError> {
    let label = T::SERIES.label();
    let rec = body(payload)?.validated()?;
    let id = state
        .with_db(|db| T::insert(db, &rec, ACTOR))
        .map_err(|e| ApiError::store(format!("Failed to add {label} data"), e))?;
    info!(collection = T::SERIES.as_str(), id, "record created");
    Ok((
        StatusCode::CREATED,
        Json(MessageBody {
            message: format!("{label} data added"),
            id: Some(id),
        }),
    ))
}

/// Replaces every mutable field. There is no version check, so of two
/// concurrent edits the later one wins.
pub(crate) async fn update_record<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let label = T::SERIES.label();
    let rec = body(payload)?.validated()?;
    let found = state
        .with_db(|db| T::update(db, id, &rec, ACTOR))
        .map_err(|e| ApiError::store(format!("Failed to update {label} data"), e))?;
    if !found {
        return Err(ApiError::NotFound(label));
    }
    info!(collection = T::SERIES.as_str(), id, "record updated");
    Ok(Json(MessageBody::new(format!("{label} data updated"))))
}

pub(crate) async fn delete_record<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageBody>, ApiError> {
    let label = T::SERIES.label();
    let found = state
        .with_db(|db| T::delete(db, id))
        .map_err(|e| ApiError::store(format!("Failed to delete {label} data"), e))?;
    if !found {
        return Err(ApiError::NotFound(label));
    }
    info!(collection = T::SERIES.as_str(), id, "record deleted");
    Ok(Json(MessageBody::new(format!("{label} data deleted"))))
}

// ── Simulation ────────────────────────────────────────────────

pub(crate) async fn list_simulation(
    State(state): State<AppState>,
) -> Result<Json<Vec<SimulationRow>>, ApiError> {
    let rows = state
        .with_db(|db| db.get_simulation_rows())
        .map_err(|e| ApiError::store("Failed to load simulation data", e))?;
    Ok(Json(rows))
}

// ── Login ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    #[serde(default)]
    pub(crate) username: String,
    #[serde(default)]
    pub(crate) password: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct UserIdentity {
    pub(crate) id: i64,
    pub(crate) username: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct LoginResponse {
    pub(crate) success: bool,
    pub(crate) user: UserIdentity,
}

pub(crate) async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let req = body(payload)?;
    let username = req.username.trim().to_string();
    if username.is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation(
            "Username and password are required".into(),
        ));
    }

    let user = state
        .with_db(|db| db.get_user_by_username(&username))
        .map_err(|e| ApiError::store("Login failed", e))?;

    // bcrypt is slow on purpose; keep it off the async workers
    let candidate = user.clone();
    let password = req.password;
    let verified =
        tokio::task::spawn_blocking(move || auth::check_credentials(candidate.as_ref(), &password))
            .await
            .map_err(|e| ApiError::store("Login failed", e.into()))?;

    match user {
        Some(user) if verified => {
            info!(username = %user.username, "login succeeded");
            Ok(Json(LoginResponse {
                success: true,
                user: UserIdentity {
                    id: user.id.unwrap_or_default(),
                    username: user.username,
                },
            }))
        }
        _ => {
            warn!(username = %username, "login rejected");
            Err(ApiError::Unauthorized)
        }
    }
}
