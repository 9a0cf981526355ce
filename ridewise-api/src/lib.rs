use axum::{
    routing::{delete, get},
    Router,
    http::Method,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod error;
pub mod middleware;
pub mod registry;
pub mod session;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    // Everything that acts on a session needs its bearer token
    let protected = Router::new()
        .merge(auth::routes())
        .merge(bookings::routes())
        .route("/session/current", delete(session::close_session))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session_auth_middleware,
        ));

    Router::new()
        .merge(protected)
        .merge(session::routes())
        .merge(catalog::routes())
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
