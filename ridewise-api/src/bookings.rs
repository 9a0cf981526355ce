use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use chrono::Utc;
use ridewise_catalog::ReservationRequest;
use ridewise_shared::Booking;
use serde::Serialize;
use tracing::info;
use crate::{error::AppError, middleware::SessionId, state::AppState};

#[derive(Debug, Serialize)]
struct BookingsResponse {
    bookings: Vec<Booking>,
    total: usize,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/bookings", get(list_bookings).post(create_booking))
}

async fn create_booking(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
    Json(req): Json<ReservationRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let today = Utc::now().date_naive();
    let booking = state.sessions
        .with_session(id, move |s| s.reserve(&req, today))
        .await
        .ok_or_else(AppError::session_expired)?
        .map_err(AppError::from_reserve)?;

    info!(session_id = %id, confirmation = %booking.confirmation_code, "Reservation confirmed");
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Every booking of the session, oldest first, plus the running total
async fn list_bookings(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
) -> Result<Json<BookingsResponse>, AppError> {
    let listing = state.sessions
        .with_session(id, |s| {
            s.identity().is_authenticated().then(|| BookingsResponse {
                bookings: s.bookings().bookings().to_vec(),
                total: s.bookings().total_bookings(),
            })
        })
        .await
        .ok_or_else(AppError::session_expired)?;

    listing
        .map(Json)
        .ok_or_else(|| AppError::AuthenticationError("Sign in to view reservations".to_string()))
}
