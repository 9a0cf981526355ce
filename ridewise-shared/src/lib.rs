pub mod models;
pub mod pii;

pub use models::booking::{Booking, NewBooking};
pub use models::user::{StoredUser, User};
pub use pii::Masked;
