use std::sync::Arc;
use ridewise_shared::{StoredUser, User};
use tracing::{info, warn};
use crate::storage::{self, SessionStorage, USERS_KEY, USER_KEY};
use crate::validation::SignupForm;
use crate::CoreError;

/// Accounts present at the start of every session
pub fn seed_accounts() -> Vec<StoredUser> {
    vec![
        StoredUser::new("Jyoshika", "jyoshika", "jyoshikajyoshika3@gmail.com", "RideWise123"),
        StoredUser::new("Demo User", "demo", "demo@ridewise.com", "demo123"),
        StoredUser::new("Admin", "admin", "admin@ridewise.com", "admin123"),
    ]
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum IdentityError {
    /// Deliberately says nothing about which half of the pair was wrong
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Username already taken")]
    DuplicateUsername,
}

/// Credentials and signed-in user for one session
pub struct IdentityStore {
    users: Vec<StoredUser>,
    seed_count: usize,
    current: Option<User>,
    storage: Arc<dyn SessionStorage>,
}

impl IdentityStore {
    /// Load the seed accounts, then whatever the session already stored:
    /// earlier signups and the signed-in user.
    pub fn open(storage: Arc<dyn SessionStorage>) -> Self {
        let seeds = seed_accounts();
        let seed_count = seeds.len();
        let mut store = Self {
            users: seeds,
            seed_count,
            current: None,
            storage,
        };

        let stored: Vec<StoredUser> =
            storage::load_json(store.storage.as_ref(), USERS_KEY).unwrap_or_default();
        for user in stored {
            if store.find_conflict(&user.email, &user.username).is_some() {
                warn!(username = %user.username, "Skipping stored user that collides with an existing account");
                continue;
            }
            store.users.push(user);
        }

        store.current = storage::load_json(store.storage.as_ref(), USER_KEY);
        if let Some(user) = &store.current {
            info!(username = %user.username, "Restored signed-in user");
        }

        store
    }

    /// Match `identifier` against username or email (case-insensitive) and
    /// `password` exactly. On success the user becomes the session user.
    pub fn login(&mut self, identifier: &str, password: &str) -> Result<(), IdentityError> {
        let found = self
            .users
            .iter()
            .find(|u| u.identified_by(identifier) && u.password_matches(password))
            .map(StoredUser::public);

        let Some(user) = found else {
            warn!("Rejected login attempt");
            return Err(IdentityError::InvalidCredentials);
        };

        info!(username = %user.username, "User signed in");
        storage::save_json(self.storage.as_ref(), USER_KEY, &user);
        self.current = Some(user);
        Ok(())
    }

    /// Register a new account. Email uniqueness is checked before username
    /// uniqueness. The new user is not signed in.
    pub fn signup(
        &mut self,
        full_name: &str,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), IdentityError> {
        if let Some(err) = self.find_conflict(email, username) {
            info!(error = %err, "Signup rejected");
            return Err(err);
        }

        let user = StoredUser::new(full_name, username.to_lowercase(), email, password);
        info!(username = %user.username, "Registered new user");
        self.users.push(user);
        self.persist_signups();
        Ok(())
    }

    /// Form validation followed by `signup`
    pub fn register(&mut self, form: &SignupForm) -> Result<(), CoreError> {
        form.validate()?;
        self.signup(&form.full_name, &form.username, &form.email, &form.password)?;
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current.take() {
            info!(username = %user.username, "User signed out");
        }
        storage::remove_key(self.storage.as_ref(), USER_KEY);
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Seed accounts first, then signups in registration order
    pub fn users(&self) -> &[StoredUser] {
        &self.users
    }

    fn find_conflict(&self, email: &str, username: &str) -> Option<IdentityError> {
        if self.users.iter().any(|u| u.email_matches(email)) {
            return Some(IdentityError::DuplicateEmail);
        }
        if self.users.iter().any(|u| u.username_matches(username)) {
            return Some(IdentityError::DuplicateUsername);
        }
        None
    }

    fn persist_signups(&self) {
        storage::save_json(self.storage.as_ref(), USERS_KEY, &self.users[self.seed_count..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests::BrokenStorage;
    use crate::storage::MemoryStorage;
    use crate::validation::ValidationError;

    fn open() -> (IdentityStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (IdentityStore::open(storage.clone()), storage)
    }

    #[test]
    fn test_seed_logins_by_username_and_email() {
        for seed in seed_accounts() {
            let (mut store, _) = open();
            store.login(&seed.username, seed.password.expose()).unwrap();
            assert_eq!(store.current_user(), Some(&seed.public()));

            let (mut store, _) = open();
            store.login(&seed.email.to_uppercase(), seed.password.expose()).unwrap();
            assert_eq!(store.current_user(), Some(&seed.public()));
        }
    }

    #[test]
    fn test_login_scenarios() {
        let (mut store, storage) = open();

        assert_eq!(store.login("jyoshika", "RideWise123"), Ok(()));
        let saved: User = storage::load_json(storage.as_ref(), USER_KEY).unwrap();
        assert_eq!(saved.email, "jyoshikajyoshika3@gmail.com");

        let (mut store, _) = open();
        assert_eq!(
            store.login("jyoshikajyoshika3@gmail.com", "wrongpass"),
            Err(IdentityError::InvalidCredentials)
        );
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_failure_message_does_not_vary_by_cause() {
        let (mut store, _) = open();

        let unknown = store.login("nobody", "demo123").unwrap_err();
        let wrong_password = store.login("demo", "Demo123").unwrap_err();

        assert_eq!(unknown.to_string(), "Invalid credentials");
        assert_eq!(unknown.to_string(), wrong_password.to_string());
    }

    #[test]
    fn test_signup_then_login() {
        let (mut store, _) = open();

        store.signup("Casey Rider", "Casey", "casey@example.com", "pedal42").unwrap();
        assert!(!store.is_authenticated());

        store.login("casey", "pedal42").unwrap();
        assert_eq!(store.current_user().unwrap().username, "casey");

        store.logout();
        store.login("CASEY@example.com", "pedal42").unwrap();
        assert_eq!(store.current_user().unwrap().full_name, "Casey Rider");
    }

    #[test]
    fn test_signup_duplicates() {
        let (mut store, _) = open();

        assert_eq!(
            store.signup("Someone", "someone", "demo@ridewise.com", "secret1"),
            Err(IdentityError::DuplicateEmail)
        );
        assert_eq!(
            store.signup("Someone", "ADMIN", "someone@example.com", "secret1"),
            Err(IdentityError::DuplicateUsername)
        );
        // Both collide: email wins
        assert_eq!(
            store.signup("Someone", "demo", "Demo@RideWise.com", "secret1"),
            Err(IdentityError::DuplicateEmail)
        );
        assert_eq!(
            IdentityError::DuplicateEmail.to_string(),
            "Email already registered"
        );
        assert_eq!(store.users().len(), 3);
    }

    #[test]
    fn test_only_signups_are_persisted() {
        let (mut store, storage) = open();
        store.signup("Casey Rider", "casey", "casey@example.com", "pedal42").unwrap();

        let saved: Vec<StoredUser> = storage::load_json(storage.as_ref(), USERS_KEY).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].username, "casey");
        assert!(saved[0].password_matches("pedal42"));
    }

    #[test]
    fn test_reopen_restores_state() {
        let (mut store, storage) = open();
        store.signup("Casey Rider", "casey", "casey@example.com", "pedal42").unwrap();
        store.login("casey", "pedal42").unwrap();

        let reopened = IdentityStore::open(storage.clone());
        assert_eq!(reopened.users().len(), 4);
        assert_eq!(reopened.current_user().unwrap().username, "casey");

        let mut reopened = reopened;
        reopened.logout();
        let reopened = IdentityStore::open(storage);
        assert!(!reopened.is_authenticated());
        assert_eq!(reopened.users().len(), 4);
    }

    #[test]
    fn test_stored_users_colliding_with_seeds_are_skipped() {
        let storage = Arc::new(MemoryStorage::new());
        storage::save_json(
            storage.as_ref(),
            USERS_KEY,
            &vec![StoredUser::new("Fake", "fake", "demo@ridewise.com", "x")],
        );

        let store = IdentityStore::open(storage);
        assert_eq!(store.users().len(), 3);
    }

    #[test]
    fn test_register_runs_form_rules_first() {
        let (mut store, _) = open();
        let form = SignupForm {
            full_name: "Someone".to_string(),
            username: "someone".to_string(),
            email: "demo@ridewise.com".to_string(),
            password: "abc".to_string(),
            confirm_password: "abc".to_string(),
        };

        assert_eq!(
            store.register(&form),
            Err(CoreError::Validation(ValidationError::PasswordTooShort))
        );
    }

    #[test]
    fn test_storage_failures_do_not_break_the_store() {
        let mut store = IdentityStore::open(Arc::new(BrokenStorage));

        store.signup("Casey Rider", "casey", "casey@example.com", "pedal42").unwrap();
        store.login("casey", "pedal42").unwrap();
        assert!(store.is_authenticated());
        store.logout();
        assert!(!store.is_authenticated());
    }
}
