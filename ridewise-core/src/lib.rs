pub mod storage;
pub mod identity;
pub mod validation;
pub mod outcome;

pub use identity::{seed_accounts, IdentityError, IdentityStore};
pub use outcome::Outcome;
pub use storage::{MemoryStorage, SessionStorage, StorageError};
pub use validation::{SignupForm, ValidationError};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

pub type CoreResult<T> = Result<T, CoreError>;
