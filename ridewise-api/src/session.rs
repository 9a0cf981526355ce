use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Extension, Json, Router,
};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use crate::{error::AppError, middleware::{auth::issue_token, SessionId}, state::AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    token: String,
    session_id: Uuid,
    expires_at: DateTime<Utc>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/session", post(open_session))
}

async fn open_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let expires_at = state.auth
        .session_expiry(Utc::now())
        .context("Session lifetime out of range")?;
    let session_id = state.sessions.open(expires_at).await?;
    let token = issue_token(&state.auth, session_id, expires_at)?;

    Ok((StatusCode::CREATED, Json(SessionResponse { token, session_id, expires_at })))
}

/// Teardown: sign out and drop the session's stored state
pub async fn close_session(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
) -> Result<StatusCode, AppError> {
    if state.sessions.close(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::session_expired())
    }
}
