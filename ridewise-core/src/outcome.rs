use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// `{success, error?}` result handed to the UI layer for inline feedback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    pub fn ok() -> Self {
        Self { success: true, error: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, error: Some(message.into()) }
    }
}

impl<E: Display> From<Result<(), E>> for Outcome {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Outcome::ok(),
            Err(e) => Outcome::failed(e.to_string()),
        }
    }
}
