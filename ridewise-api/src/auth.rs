use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use ridewise_core::{Outcome, SignupForm};
use ridewise_shared::User;
use serde::{Deserialize, Serialize};
use crate::{error::AppError, middleware::SessionId, state::AppState};

#[derive(Debug, Deserialize)]
struct LoginRequest {
    identifier: String,
    password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MeResponse {
    user: Option<User>,
    is_authenticated: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

/// Failed logins are still 200: the outcome carries the message
async fn login(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Outcome>, AppError> {
    if !state.auth.login_delay.is_zero() {
        tokio::time::sleep(state.auth.login_delay).await;
    }

    let outcome = state.sessions
        .with_session(id, move |s| Outcome::from(s.identity_mut().login(&req.identifier, &req.password)))
        .await
        .ok_or_else(AppError::session_expired)?;

    Ok(Json(outcome))
}

async fn signup(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
    Json(form): Json<SignupForm>,
) -> Result<Json<Outcome>, AppError> {
    let outcome = state.sessions
        .with_session(id, move |s| Outcome::from(s.identity_mut().register(&form)))
        .await
        .ok_or_else(AppError::session_expired)?;

    Ok(Json(outcome))
}

async fn logout(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
) -> Result<Json<Outcome>, AppError> {
    state.sessions
        .with_session(id, |s| s.identity_mut().logout())
        .await
        .ok_or_else(AppError::session_expired)?;

    Ok(Json(Outcome::ok()))
}

async fn me(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
) -> Result<Json<MeResponse>, AppError> {
    let user = state.sessions
        .with_session(id, |s| s.identity().current_user().cloned())
        .await
        .ok_or_else(AppError::session_expired)?;

    Ok(Json(MeResponse {
        is_authenticated: user.is_some(),
        user,
    }))
}
