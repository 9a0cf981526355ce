use serde::Deserialize;

/// Fields of the signup form, including the password confirmation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

impl SignupForm {
    /// Form-level checks run before the identity store is consulted.
    /// Stops at the first failing rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(ValidationError::MissingFullName);
        }
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingUsername);
        }
        if self.username.chars().count() < MIN_USERNAME_LEN {
            return Err(ValidationError::UsernameTooShort);
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your full name")]
    MissingFullName,
    #[error("Please enter a username")]
    MissingUsername,
    #[error("Username must be at least 3 characters")]
    UsernameTooShort,
    #[error("Please enter your email")]
    MissingEmail,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
}
