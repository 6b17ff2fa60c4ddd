use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use super::dto::{PublicUser, SignInRequest, SignInResponse, SignUpRequest};
use super::services;
use crate::{error::AppError, state::AppState};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-in", post(sign_in))
}

#[instrument(skip(state, payload))]
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    let Json(req) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let user = services::sign_up(state.users.as_ref(), req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state, payload))]
pub async fn sign_in(
    State(state): State<AppState>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<Json<SignInResponse>, AppError> {
    // Unreadable bodies are treated like any other bad credentials.
    let Json(req) = payload.map_err(|_| services::invalid_login())?;
    let res = services::sign_in(state.users.as_ref(), &state.keys, req).await?;
    Ok(Json(res))
}
