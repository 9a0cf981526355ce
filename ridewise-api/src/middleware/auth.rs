use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::{AppState, AuthConfig};

// ============================================================================
// Session Token
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Session id
    pub sub: String,
    pub exp: usize,
}

/// Session resolved from the bearer token, injected into request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

pub fn issue_token(
    auth: &AuthConfig,
    session_id: Uuid,
    expires_at: DateTime<Utc>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = SessionClaims {
        sub: session_id.to_string(),
        exp: expires_at.timestamp() as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(auth.secret.as_bytes()))
}

pub fn verify_token(auth: &AuthConfig, token: &str) -> Option<SessionId> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(auth.secret.as_bytes()),
        &Validation::default(),
    ).ok()?;

    Uuid::parse_str(&token_data.claims.sub).ok().map(SessionId)
}

// ============================================================================
// Session Middleware
// ============================================================================

pub async fn session_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let session_id = verify_token(&state.auth, token).ok_or(StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(session_id);

    Ok(next.run(req).await)
}
