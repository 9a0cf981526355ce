use std::sync::Arc;
use std::time::Duration;
use anyhow::Context;
use chrono::{DateTime, TimeDelta, Utc};
use ridewise_store::Config;
use crate::registry::SessionRegistry;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    /// Session token lifetime, seconds
    pub expiration: u64,
    pub login_delay: Duration,
}

impl AuthConfig {
    /// When a session opened at `now` expires. `None` if the configured
    /// lifetime does not fit a timestamp.
    pub fn session_expiry(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let lifetime = TimeDelta::try_seconds(i64::try_from(self.expiration).ok()?)?;
        now.checked_add_signed(lifetime)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionRegistry>,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let auth = AuthConfig {
            secret: config.auth.token_secret.clone(),
            expiration: config.auth.token_expiration_seconds,
            login_delay: Duration::from_millis(config.auth.login_delay_ms),
        };
        auth.session_expiry(Utc::now()).with_context(|| {
            format!(
                "auth.token_expiration_seconds is out of range: {}",
                config.auth.token_expiration_seconds
            )
        })?;

        Ok(Self {
            sessions: Arc::new(SessionRegistry::new(config.storage.clone())),
            auth,
        })
    }
}
