//! Login session
//!
//! `Session` is the explicit context passed to command handlers that need a
//! logged-in user. `SessionFile` persists it between CLI invocations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::paths::BudgetPaths;
use crate::config::settings::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::Identity;
use crate::services::AuthService;
use crate::storage::file_io::{read_json, remove_if_exists, write_json_atomic};
use crate::storage::Storage;

/// Name shown when nobody is logged in
pub const GUEST: &str = "Guest";

/// The current login state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    /// A logged-out session
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticate and, on success, become that user
    ///
    /// A failed attempt leaves the session unchanged.
    pub fn login(
        &mut self,
        storage: &Storage,
        settings: &Settings,
        email: &str,
        password: &str,
    ) -> BudgetResult<&Identity> {
        let identity = AuthService::new(storage, settings).authenticate(email, password)?;
        Ok(&*self.identity.insert(identity))
    }

    /// Forget the current user, returning who it was
    pub fn logout(&mut self) -> Option<Identity> {
        self.identity.take()
    }

    pub fn current(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.identity.is_some()
    }

    /// The logged-in user, or `NotLoggedIn`
    pub fn require_user(&self) -> BudgetResult<&Identity> {
        self.identity.as_ref().ok_or(BudgetError::NotLoggedIn)
    }

    /// Display name of the current user, `"Guest"` when logged out
    pub fn username(&self) -> &str {
        self.identity
            .as_ref()
            .map(|i| i.username.as_str())
            .unwrap_or(GUEST)
    }
}

/// Session persisted as JSON in the data directory
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The session file for a data directory
    pub fn from_paths(paths: &BudgetPaths) -> Self {
        Self::new(paths.session_file())
    }

    /// Load the saved session; a missing file is a logged-out session
    pub fn load(&self) -> BudgetResult<Session> {
        read_json(&self.path)
    }

    /// Save the session, removing the file when logged out
    pub fn save(&self, session: &Session) -> BudgetResult<()> {
        if session.is_logged_in() {
            debug!(path = %self.path.display(), "saving session");
            write_json_atomic(&self.path, session)
        } else {
            debug!(path = %self.path.display(), "clearing session");
            remove_if_exists(&self.path)
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::PasswordHashParams;
    use crate::models::UserId;
    use tempfile::TempDir;

    fn fast_settings() -> Settings {
        Settings {
            password_hashing: PasswordHashParams::with_values(8, 1, 1),
            ..Settings::default()
        }
    }

    fn storage_with_alice(settings: &Settings) -> Storage {
        let storage = Storage::open_in_memory().unwrap();
        AuthService::new(&storage, settings)
            .register("alice", "alice@example.com", "pw")
            .unwrap();
        storage
    }

    #[test]
    fn test_new_session_is_guest() {
        let session = Session::new();

        assert!(session.current().is_none());
        assert_eq!(session.username(), "Guest");
        assert!(matches!(
            session.require_user().unwrap_err(),
            BudgetError::NotLoggedIn
        ));
    }

    #[test]
    fn test_login_and_logout() {
        let settings = fast_settings();
        let storage = storage_with_alice(&settings);
        let mut session = Session::new();

        let identity = session
            .login(&storage, &settings, "alice@example.com", "pw")
            .unwrap()
            .clone();

        assert_eq!(session.username(), "alice");
        assert_eq!(session.require_user().unwrap(), &identity);

        assert_eq!(session.logout(), Some(identity));
        assert_eq!(session.username(), "Guest");
    }

    #[test]
    fn test_failed_login_keeps_previous_state() {
        let settings = fast_settings();
        let storage = storage_with_alice(&settings);
        let mut session = Session::new();

        let err = session
            .login(&storage, &settings, "alice@example.com", "wrong")
            .unwrap_err();

        assert!(matches!(err, BudgetError::InvalidCredentials));
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_session_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let file = SessionFile::new(temp_dir.path().join("session.json"));

        assert_eq!(file.load().unwrap(), Session::new());

        let session = Session {
            identity: Some(Identity {
                user_id: UserId::new(3),
                username: "carol".into(),
            }),
        };
        file.save(&session).unwrap();
        assert!(file.path().exists());
        assert_eq!(file.load().unwrap(), session);

        file.save(&Session::new()).unwrap();
        assert!(!file.path().exists());
        assert_eq!(file.load().unwrap().username(), "Guest");
    }
}
