use std::sync::Arc;
use chrono::{DateTime, Utc};
use rand::Rng;
use ridewise_core::storage::{self, SessionStorage, BOOKINGS_KEY};
use ridewise_shared::{Booking, NewBooking};
use tracing::{info, warn};
use crate::confirmation::generate_confirmation_code;

/// Ordered record of the session's reservations, oldest first
pub struct BookingStore {
    bookings: Vec<Booking>,
    storage: Arc<dyn SessionStorage>,
}

impl BookingStore {
    /// Pick up any bookings already written in this session
    pub fn open(storage: Arc<dyn SessionStorage>) -> Self {
        let bookings: Vec<Booking> =
            storage::load_json(storage.as_ref(), BOOKINGS_KEY).unwrap_or_default();
        Self { bookings, storage }
    }

    /// Append a booking and persist the whole list. Never fails; a storage
    /// write error is logged and the in-memory record is kept.
    pub fn add_booking(&mut self, request: NewBooking) -> Booking {
        self.add_booking_with(request, Utc::now(), &mut rand::thread_rng())
    }

    pub(crate) fn add_booking_with<R: Rng + ?Sized>(
        &mut self,
        request: NewBooking,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Booking {
        let id = self.next_id(now);
        let code = generate_confirmation_code(rng);
        let booking = Booking::from_request(request, id, code, now);

        info!(
            booking_id = %booking.id,
            confirmation = %booking.confirmation_code,
            username = %booking.username,
            "Booking created"
        );

        self.bookings.push(booking.clone());
        storage::save_json(self.storage.as_ref(), BOOKINGS_KEY, &self.bookings);
        booking
    }

    pub fn total_bookings(&self) -> usize {
        self.bookings.len()
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Bookings owned by `username`, oldest first
    pub fn bookings_for<'a>(&'a self, username: &'a str) -> impl Iterator<Item = &'a Booking> + 'a {
        self.bookings
            .iter()
            .filter(move |b| b.username.eq_ignore_ascii_case(username))
    }

    /// Millisecond timestamp, bumped past the largest existing id so ids
    /// stay unique and increasing within the list.
    fn next_id(&self, now: DateTime<Utc>) -> String {
        let candidate = now.timestamp_millis();
        let latest = self
            .bookings
            .iter()
            .filter_map(|b| b.id.parse::<i64>().ok())
            .max();

        match latest {
            Some(latest) if candidate <= latest => match latest.checked_add(1) {
                Some(next) => next.to_string(),
                None => {
                    warn!(latest, "Stored booking id at the top of the range, using timestamp");
                    candidate.to_string()
                }
            },
            _ => candidate.to_string(),
        }
    }
}
