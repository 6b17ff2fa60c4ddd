use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::dto::EntryPayload;
use super::repo_types::Entry;
use super::services;
use crate::{auth::middleware::AuthUser, error::AppError, state::AppState};

/// Every route here expects `require_auth` to be layered on top.
pub fn entry_routes() -> Router<AppState> {
    Router::new()
        .route("/entries", get(list_entries).post(create_entry))
        .route(
            "/entries/:entry_id",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}

fn body(payload: Result<Json<EntryPayload>, JsonRejection>) -> Result<EntryPayload, AppError> {
    payload
        .map(|Json(p)| p)
        .map_err(|e| AppError::InvalidInput(e.body_text()))
}

/// Non-UTF-8 ids are reported the same way as any other bad id.
fn path_id(path: Result<Path<String>, PathRejection>) -> Result<String, AppError> {
    path
        .map(|Path(id)| id)
        .map_err(|_| AppError::InvalidInput("entryId must be a positive integer".into()))
}

#[instrument(skip(state, user, payload), fields(user_id = user.0.user_id))]
pub async fn create_entry(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<EntryPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Entry>), AppError> {
    let entry = services::create(state.entries.as_ref(), user.0.user_id, body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state, user), fields(user_id = user.0.user_id))]
pub async fn list_entries(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Entry>>, AppError> {
    let entries = services::list_for_user(state.entries.as_ref(), user.0.user_id).await?;
    Ok(Json(entries))
}

#[instrument(skip(state, user, path), fields(user_id = user.0.user_id))]
pub async fn get_entry(
    State(state): State<AppState>,
    user: AuthUser,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Entry>, AppError> {
    let entry_id = path_id(path)?;
    let entry = services::get_one(state.entries.as_ref(), user.0.user_id, &entry_id).await?;
    Ok(Json(entry))
}

#[instrument(skip(state, user, path, payload), fields(user_id = user.0.user_id))]
pub async fn update_entry(
    State(state): State<AppState>,
    user: AuthUser,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<EntryPayload>, JsonRejection>,
) -> Result<Json<Entry>, AppError> {
    let entry_id = path_id(path)?;
    let entry = services::update(
        state.entries.as_ref(),
        user.0.user_id,
        &entry_id,
        body(payload)?,
    )
    .await?;
    Ok(Json(entry))
}

#[instrument(skip(state, user, path), fields(user_id = user.0.user_id))]
pub async fn delete_entry(
    State(state): State<AppState>,
    user: AuthUser,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let entry_id = path_id(path)?;
    services::delete(state.entries.as_ref(), user.0.user_id, &entry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
