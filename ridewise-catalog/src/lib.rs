pub mod product;
pub mod pricing;
pub mod schedule;
pub mod reservation;

pub use product::{catalog, Bike, BikeType};
pub use pricing::{Quote, duration_label, DEFAULT_RENTAL_HOURS, MAX_RENTAL_HOURS};
pub use schedule::TIME_SLOTS;
pub use reservation::{CatalogError, ReservationRequest};
