use std::sync::Arc;
use std::time::{Duration, Instant};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use chrono::Utc;
use ridewise_api::{app, registry::SessionRegistry, state::AuthConfig, AppState};
use ridewise_booking::is_well_formed;
use ridewise_store::app_config::StorageConfig;
use serde_json::{json, Value};
use tower::ServiceExt;

fn state_with(expiration: u64, login_delay: Duration) -> AppState {
    AppState {
        sessions: Arc::new(SessionRegistry::new(StorageConfig::default())),
        auth: AuthConfig {
            secret: "test-secret".to_string(),
            expiration,
            login_delay,
        },
    }
}

fn test_state() -> AppState {
    state_with(3600, Duration::ZERO)
}

async fn send(
    state: &AppState,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn open_session(state: &AppState) -> String {
    let (status, body) = send(state, Method::POST, "/session", None, None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().unwrap().to_string()
}

async fn login(state: &AppState, token: &str, identifier: &str, password: &str) -> Value {
    let (status, body) = send(
        state,
        Method::POST,
        "/auth/login",
        Some(token),
        Some(json!({ "identifier": identifier, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

fn tomorrow() -> String {
    (Utc::now().date_naive() + chrono::Duration::days(1))
        .format("%Y-%m-%d")
        .to_string()
}

#[tokio::test]
async fn test_health_and_catalog_are_public() {
    let state = test_state();

    let (status, _) = send(&state, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&state, Method::GET, "/bikes", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bikes"].as_array().unwrap().len(), 3);
    assert_eq!(body["bikes"][1]["id"], "premium");
    assert_eq!(body["timeSlots"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_session_routes_require_token() {
    let state = test_state();

    let (status, _) = send(&state, Method::GET, "/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&state, Method::GET, "/auth/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_seed_login_and_me() {
    let state = test_state();
    let token = open_session(&state).await;

    let (_, me) = send(&state, Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(me["isAuthenticated"], false);
    assert!(me["user"].is_null());

    let outcome = login(&state, &token, "jyoshika", "RideWise123").await;
    assert_eq!(outcome, json!({ "success": true }));

    let (_, me) = send(&state, Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(me["isAuthenticated"], true);
    assert_eq!(
        me["user"],
        json!({
            "fullName": "Jyoshika",
            "username": "jyoshika",
            "email": "jyoshikajyoshika3@gmail.com",
        })
    );
}

#[tokio::test]
async fn test_failed_logins_share_one_message() {
    let state = test_state();
    let token = open_session(&state).await;

    let wrong_password = login(&state, &token, "jyoshikajyoshika3@gmail.com", "wrongpass").await;
    let unknown_user = login(&state, &token, "ghost", "RideWise123").await;

    assert_eq!(wrong_password, json!({ "success": false, "error": "Invalid credentials" }));
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn test_signup_flow() {
    let state = test_state();
    let token = open_session(&state).await;
    let form = json!({
        "fullName": "Casey Rider",
        "username": "casey",
        "email": "casey@example.com",
        "password": "pedal42",
        "confirmPassword": "pedal42",
    });

    let (_, outcome) = send(&state, Method::POST, "/auth/signup", Some(&token), Some(form)).await;
    assert_eq!(outcome["success"], true);

    // Signup does not sign in
    let (_, me) = send(&state, Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(me["isAuthenticated"], false);

    let outcome = login(&state, &token, "casey@example.com", "pedal42").await;
    assert_eq!(outcome["success"], true);
}

#[tokio::test]
async fn test_signup_rejections() {
    let state = test_state();
    let token = open_session(&state).await;

    let (_, outcome) = send(
        &state,
        Method::POST,
        "/auth/signup",
        Some(&token),
        Some(json!({
            "fullName": "Another Demo",
            "username": "demo2",
            "email": "demo@ridewise.com",
            "password": "secret1",
            "confirmPassword": "secret1",
        })),
    )
    .await;
    assert_eq!(outcome, json!({ "success": false, "error": "Email already registered" }));

    let (_, outcome) = send(
        &state,
        Method::POST,
        "/auth/signup",
        Some(&token),
        Some(json!({
            "fullName": "Casey Rider",
            "username": "casey",
            "email": "casey@example.com",
            "password": "secret1",
            "confirmPassword": "secret2",
        })),
    )
    .await;
    assert_eq!(outcome, json!({ "success": false, "error": "Passwords do not match" }));
}

#[tokio::test]
async fn test_bookings_require_sign_in() {
    let state = test_state();
    let token = open_session(&state).await;

    let (status, _) = send(
        &state,
        Method::POST,
        "/bookings",
        Some(&token),
        Some(json!({ "bikeType": "basic", "date": tomorrow(), "timeSlot": "08:00 AM" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&state, Method::GET, "/bookings", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_three_bookings() {
    let state = test_state();
    let token = open_session(&state).await;
    login(&state, &token, "demo", "demo123").await;

    for bike in ["basic", "premium", "electric"] {
        let (status, booking) = send(
            &state,
            Method::POST,
            "/bookings",
            Some(&token),
            Some(json!({ "bikeType": bike, "date": tomorrow(), "timeSlot": "10:00 AM" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(booking["username"], "demo");
        assert_eq!(booking["duration"], "1 hour");
    }

    let (status, body) = send(&state, Method::GET, "/bookings", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);

    let bookings = body["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 3);
    for booking in bookings {
        assert!(is_well_formed(booking["confirmationId"].as_str().unwrap()));
    }
    assert_eq!(bookings[2]["totalFare"], 20.0);
}

#[tokio::test]
async fn test_invalid_reservation_is_bad_request() {
    let state = test_state();
    let token = open_session(&state).await;
    login(&state, &token, "admin", "admin123").await;

    let (status, body) = send(
        &state,
        Method::POST,
        "/bookings",
        Some(&token),
        Some(json!({ "bikeType": "tandem", "date": tomorrow(), "timeSlot": "10:00 AM" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown bike type: tandem");
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let state = test_state();
    let first = open_session(&state).await;
    let second = open_session(&state).await;

    login(&state, &first, "demo", "demo123").await;

    let (_, me) = send(&state, Method::GET, "/auth/me", Some(&second), None).await;
    assert_eq!(me["isAuthenticated"], false);
}

#[tokio::test]
async fn test_logout_and_close() {
    let state = test_state();
    let token = open_session(&state).await;
    login(&state, &token, "demo", "demo123").await;

    let (_, outcome) = send(&state, Method::POST, "/auth/logout", Some(&token), None).await;
    assert_eq!(outcome["success"], true);
    let (_, me) = send(&state, Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(me["isAuthenticated"], false);

    let (status, _) = send(&state, Method::DELETE, "/session/current", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(state.sessions.is_empty());

    // The token is still well-formed but its session is gone
    let (status, body) = send(&state, Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Session expired");
}

#[tokio::test]
async fn test_login_waits_for_configured_delay() {
    let state = state_with(3600, Duration::from_millis(150));
    let token = open_session(&state).await;

    let started = Instant::now();
    let outcome = login(&state, &token, "demo", "demo123").await;

    assert_eq!(outcome["success"], true);
    assert!(started.elapsed() >= Duration::from_millis(150));
}

#[tokio::test]
async fn test_out_of_range_session_lifetime_is_an_error() {
    for expiration in [u64::MAX, i64::MAX as u64] {
        let state = state_with(expiration, Duration::ZERO);

        let (status, body) = send(&state, Method::POST, "/session", None, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
        assert!(state.sessions.is_empty());
    }
}
