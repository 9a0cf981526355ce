use std::sync::Arc;
use chrono::NaiveDate;
use ridewise_catalog::{CatalogError, ReservationRequest};
use ridewise_core::{IdentityStore, SessionStorage};
use ridewise_shared::{Booking, NewBooking};
use tracing::{info, warn};
use crate::ledger::BookingStore;

/// Everything one session owns: the identity store, the booking store and
/// the storage both mirror into.
pub struct RideSession {
    identity: IdentityStore,
    bookings: BookingStore,
    storage: Arc<dyn SessionStorage>,
}

impl RideSession {
    /// Seed the identity store and restore whatever the storage holds
    pub fn open(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            identity: IdentityStore::open(storage.clone()),
            bookings: BookingStore::open(storage.clone()),
            storage,
        }
    }

    pub fn identity(&self) -> &IdentityStore {
        &self.identity
    }

    pub fn identity_mut(&mut self) -> &mut IdentityStore {
        &mut self.identity
    }

    pub fn bookings(&self) -> &BookingStore {
        &self.bookings
    }

    pub fn bookings_mut(&mut self) -> &mut BookingStore {
        &mut self.bookings
    }

    /// Book a bike for the signed-in user.
    ///
    /// The request is checked against the catalog and priced there; the
    /// booking store itself does no validation.
    pub fn reserve(
        &mut self,
        request: &ReservationRequest,
        today: NaiveDate,
    ) -> Result<Booking, ReserveError> {
        let username = self
            .identity
            .current_user()
            .map(|u| u.username.clone())
            .ok_or(ReserveError::NotAuthenticated)?;

        let quote = request.validate(today)?;

        Ok(self.bookings.add_booking(NewBooking {
            bike_type: quote.bike.bike_type.to_string(),
            bike_name: quote.bike.name.to_string(),
            date: quote.date,
            time_slot: quote.time_slot,
            duration: quote.duration,
            total_fare: quote.total_fare,
            username,
        }))
    }

    /// Sign out and drop everything the session stored
    pub fn close(mut self) {
        self.identity.logout();
        if let Err(e) = self.storage.clear() {
            warn!(error = %e, "Failed to clear session storage");
        }
        info!(bookings = self.bookings.total_bookings(), "Session closed");
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReserveError {
    #[error("Sign in to make a reservation")]
    NotAuthenticated,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
