use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// A reservation made in the current session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Decimal millisecond timestamp of creation
    pub id: String,
    pub bike_type: String,
    pub bike_name: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    pub time_slot: String,
    pub duration: String,
    pub total_fare: f64,
    /// Display code, `RW-` followed by 8 characters from A-Z0-9
    #[serde(rename = "confirmationId")]
    pub confirmation_code: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied part of a booking; the store fills in id, code and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub bike_type: String,
    pub bike_name: String,
    pub date: String,
    pub time_slot: String,
    pub duration: String,
    pub total_fare: f64,
    pub username: String,
}

impl Booking {
    pub fn from_request(
        request: NewBooking,
        id: String,
        confirmation_code: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            bike_type: request.bike_type,
            bike_name: request.bike_name,
            date: request.date,
            time_slot: request.time_slot,
            duration: request.duration,
            total_fare: request.total_fare,
            confirmation_code,
            username: request.username,
            created_at,
        }
    }
}
