use serde::{Deserialize, Serialize};
use crate::pii::Masked;

/// Public fields of an account, the shape kept for the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub full_name: String,
    pub username: String,
    pub email: String,
}

/// A credential record as held by the identity store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: Masked<String>,
}

impl StoredUser {
    pub fn new(
        full_name: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            username: username.into(),
            email: email.into(),
            password: Masked(password.into()),
        }
    }

    /// Copy of the public fields (never the password)
    pub fn public(&self) -> User {
        User {
            full_name: self.full_name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }

    pub fn email_matches(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }

    pub fn username_matches(&self, username: &str) -> bool {
        self.username.to_lowercase() == username.to_lowercase()
    }

    /// Login accepts either the username or the email
    pub fn identified_by(&self, identifier: &str) -> bool {
        self.email_matches(identifier) || self.username_matches(identifier)
    }

    /// Exact, case-sensitive comparison
    pub fn password_matches(&self, password: &str) -> bool {
        self.password.expose() == password
    }
}
