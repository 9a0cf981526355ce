pub mod confirmation;
pub mod ledger;
pub mod session;

pub use confirmation::{generate_confirmation_code, is_well_formed};
pub use ledger::BookingStore;
pub use session::{ReserveError, RideSession};
