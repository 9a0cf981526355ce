use serde::Serialize;
use crate::product::Bike;

pub const DEFAULT_RENTAL_HOURS: u32 = 1;
pub const MAX_RENTAL_HOURS: u32 = 8;

/// Priced reservation, ready to hand to the booking store
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub bike: Bike,
    pub date: String,
    pub time_slot: String,
    pub hours: u32,
    pub duration: String,
    pub total_fare: f64,
}

impl Quote {
    pub fn new(bike: Bike, date: String, time_slot: String, hours: u32) -> Self {
        let total_fare = bike.hourly_price * hours as f64;
        Self {
            bike,
            date,
            time_slot,
            hours,
            duration: duration_label(hours),
            total_fare,
        }
    }
}

/// "1 hour", "3 hours"
pub fn duration_label(hours: u32) -> String {
    if hours == 1 {
        "1 hour".to_string()
    } else {
        format!("{} hours", hours)
    }
}
