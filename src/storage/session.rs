//! Persisted login session
//!
//! Holds the access token, refresh token and cached user profile between
//! invocations. Every mutation is written through to `session.json`.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::FinanzError;
use crate::models::{AuthResponse, User};

use super::file_io::{read_json, remove_if_exists, write_private_json};

/// Stored credentials and profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[zeroize(skip)]
    pub user: Option<User>,
}

/// Thread-safe session holder with an optional backing file
pub struct SessionStore {
    path: Option<PathBuf>,
    session: RwLock<Session>,
}

impl SessionStore {
    /// Open the session stored at `path`, starting empty if the file is missing
    pub fn open(path: PathBuf) -> Result<Self, FinanzError> {
        let session: Session = read_json(&path)?;
        Ok(Self {
            path: Some(path),
            session: RwLock::new(session),
        })
    }

    /// A session that lives only in memory
    pub fn in_memory() -> Self {
        Self {
            path: None,
            session: RwLock::new(Session::default()),
        }
    }

    /// Snapshot of the current session
    pub fn snapshot(&self) -> Result<Session, FinanzError> {
        Ok(self.read()?.clone())
    }

    pub fn access_token(&self) -> Result<Option<String>, FinanzError> {
        Ok(self.read()?.access_token.clone())
    }

    pub fn refresh_token(&self) -> Result<Option<String>, FinanzError> {
        Ok(self.read()?.refresh_token.clone())
    }

    pub fn user(&self) -> Result<Option<User>, FinanzError> {
        Ok(self.read()?.user.clone())
    }

    /// Whether an access token is stored
    pub fn is_logged_in(&self) -> Result<bool, FinanzError> {
        Ok(self.read()?.access_token.is_some())
    }

    /// Store the tokens and profile returned by a login
    pub fn store_login(&self, auth: &AuthResponse) -> Result<(), FinanzError> {
        self.update(|session| {
            session.access_token = Some(auth.access_token.clone());
            session.refresh_token = Some(auth.refresh_token.clone());
            session.user = Some(auth.user.clone());
        })
    }

    /// Replace the access token after a refresh
    pub fn set_access_token(&self, token: impl Into<String>) -> Result<(), FinanzError> {
        let token = token.into();
        self.update(move |session| session.access_token = Some(token))
    }

    /// Replace the cached user profile
    pub fn set_user(&self, user: User) -> Result<(), FinanzError> {
        self.update(move |session| session.user = Some(user))
    }

    /// Forget tokens and profile, deleting the backing file
    pub fn clear(&self) -> Result<(), FinanzError> {
        {
            let mut session = self.write()?;
            session.zeroize();
            session.user = None;
        }

        if let Some(path) = &self.path {
            remove_if_exists(path)?;
        }

        Ok(())
    }

    fn update<F>(&self, f: F) -> Result<(), FinanzError>
    where
        F: FnOnce(&mut Session),
    {
        let mut session = self.write()?;
        f(&mut session);

        if let Some(path) = &self.path {
            write_private_json(path, &*session)?;
        }

        Ok(())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Session>, FinanzError> {
        self.session
            .read()
            .map_err(|e| FinanzError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Session>, FinanzError> {
        self.session
            .write()
            .map_err(|e| FinanzError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}
