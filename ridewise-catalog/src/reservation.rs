use chrono::NaiveDate;
use serde::Deserialize;
use crate::pricing::{Quote, DEFAULT_RENTAL_HOURS, MAX_RENTAL_HOURS};
use crate::product::BikeType;
use crate::schedule::find_slot;

/// A reservation as submitted from the booking form
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub bike_type: String,
    pub date: String,
    pub time_slot: String,
    #[serde(default = "default_hours")]
    pub hours: u32,
}

fn default_hours() -> u32 { DEFAULT_RENTAL_HOURS }

impl ReservationRequest {
    /// Check the request against the catalog and price it.
    ///
    /// `today` is the earliest bookable date.
    pub fn validate(&self, today: NaiveDate) -> Result<Quote, CatalogError> {
        let bike_type: BikeType = self.bike_type
            .parse()
            .map_err(CatalogError::UnknownBike)?;

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| CatalogError::InvalidDate(self.date.clone()))?;
        if date < today {
            return Err(CatalogError::DateInPast(self.date.clone()));
        }

        let slot = find_slot(&self.time_slot)
            .ok_or_else(|| CatalogError::UnknownTimeSlot(self.time_slot.clone()))?;

        if self.hours == 0 || self.hours > MAX_RENTAL_HOURS {
            return Err(CatalogError::InvalidDuration(self.hours));
        }

        Ok(Quote::new(
            bike_type.bike(),
            date.format("%Y-%m-%d").to_string(),
            slot.to_string(),
            self.hours,
        ))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown bike type: {0}")]
    UnknownBike(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Date is in the past: {0}")]
    DateInPast(String),

    #[error("Unknown time slot: {0}")]
    UnknownTimeSlot(String),

    #[error("Rental must be between 1 and 8 hours, got {0}")]
    InvalidDuration(u32),
}
