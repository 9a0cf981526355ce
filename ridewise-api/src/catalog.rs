use axum::{routing::get, Json, Router};
use ridewise_catalog::{catalog, Bike, DEFAULT_RENTAL_HOURS, MAX_RENTAL_HOURS, TIME_SLOTS};
use serde::Serialize;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogResponse {
    bikes: Vec<Bike>,
    time_slots: &'static [&'static str],
    default_hours: u32,
    max_hours: u32,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/bikes", get(list_bikes))
}

async fn list_bikes() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        bikes: catalog(),
        time_slots: &TIME_SLOTS,
        default_hours: DEFAULT_RENTAL_HOURS,
        max_hours: MAX_RENTAL_HOURS,
    })
}
