//! Session
//!
//! The signed-in user and their bearer token, stored as one document under the
//! `session` key. The token is also installed in a [`BearerToken`] handle shared
//! with the HTTP client.

use std::{
    fmt::{self, Debug, Formatter},
    sync::{Arc, PoisonError, RwLock},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use waybill::users::{Role, User};
use zeroize::Zeroizing;

use crate::storage::{self, KeyValueStore, SESSION_KEY, StorageError};

/// Errors raised while loading or storing the session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No user is signed in.
    #[error("not signed in")]
    SignedOut,

    /// The key/value mirror failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Shared, redacted handle on the current bearer token.
#[derive(Clone, Default)]
pub struct BearerToken(Arc<RwLock<Option<Zeroizing<String>>>>);

impl BearerToken {
    /// Install a token.
    pub fn set(&self, token: Zeroizing<String>) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Drop the token.
    pub fn clear(&self) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Whether a token is installed.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// `Authorization` header value for the installed token.
    #[must_use]
    pub fn header_value(&self) -> Option<Zeroizing<String>> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|token| Zeroizing::new(format!("Bearer {}", token.as_str())))
    }
}

impl Debug for BearerToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken")
            .field(&if self.is_set() { "<redacted>" } else { "<none>" })
            .finish()
    }
}

/// The signed-in user.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Access token issued at login
    pub token: Zeroizing<String>,

    /// Profile of the signed-in user
    pub profile: User,
}

impl Session {
    /// Role of the signed-in user.
    #[must_use]
    pub fn role(&self) -> Role {
        self.profile.role
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("profile", &self.profile.login)
            .finish()
    }
}

#[derive(Serialize, Deserialize)]
struct StoredSession {
    token: String,
    profile: User,
}

/// Loads, saves and clears the session in the key/value mirror.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    token: BearerToken,
}

impl Debug for SessionStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create a session store over `store`, installing tokens in `token`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, token: BearerToken) -> Self {
        Self { store, token }
    }

    /// Load the stored session and install its token.
    ///
    /// # Errors
    ///
    /// Returns an error when the key/value mirror fails or holds a corrupt session.
    pub async fn load(&self) -> Result<Option<Session>, SessionError> {
        let stored =
            storage::get_json::<StoredSession>(self.store.as_ref(), SESSION_KEY).await?;

        let Some(stored) = stored else {
            self.token.clear();
            return Ok(None);
        };

        let session = Session {
            token: Zeroizing::new(stored.token),
            profile: stored.profile,
        };

        self.token.set(session.token.clone());

        Ok(Some(session))
    }

    /// Load the stored session, failing when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SignedOut`] when there is no session.
    pub async fn require(&self) -> Result<Session, SessionError> {
        self.load().await?.ok_or(SessionError::SignedOut)
    }

    /// Store `session` and install its token.
    ///
    /// # Errors
    ///
    /// Returns an error when the key/value mirror fails.
    pub async fn save(&self, session: &Session) -> Result<(), SessionError> {
        let stored = StoredSessionRef {
            token: session.token.as_str(),
            profile: &session.profile,
        };

        storage::set_json(self.store.as_ref(), SESSION_KEY, &stored).await?;

        self.token.set(session.token.clone());

        info!(user = %session.profile.login, role = %session.profile.role, "session saved");

        Ok(())
    }

    /// Forget the session and the token.
    ///
    /// # Errors
    ///
    /// Returns an error when the key/value mirror fails.
    pub async fn clear(&self) -> Result<(), SessionError> {
        self.store.remove(SESSION_KEY).await?;
        self.token.clear();

        info!("session cleared");

        Ok(())
    }
}

#[derive(Serialize)]
struct StoredSessionRef<'a> {
    token: &'a str,
    profile: &'a User,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{storage::MemoryStore, test::helpers::user};

    fn store() -> (SessionStore, BearerToken) {
        let token = BearerToken::default();

        (
            SessionStore::new(Arc::new(MemoryStore::new()), token.clone()),
            token,
        )
    }

    #[tokio::test]
    async fn save_then_load_restores_session_and_token() -> TestResult {
        let (sessions, token) = store();
        let session = Session {
            token: Zeroizing::new("secret".to_string()),
            profile: user(1, Role::Worker),
        };

        sessions.save(&session).await?;
        token.clear();

        let loaded = sessions.load().await?;

        assert_eq!(loaded, Some(session));
        assert_eq!(
            token.header_value().as_deref().map(String::as_str),
            Some("Bearer secret")
        );

        Ok(())
    }

    #[tokio::test]
    async fn clear_forgets_session_and_token() -> TestResult {
        let (sessions, token) = store();

        sessions
            .save(&Session {
                token: Zeroizing::new("secret".to_string()),
                profile: user(1, Role::Admin),
            })
            .await?;
        sessions.clear().await?;

        assert_eq!(sessions.load().await?, None);
        assert!(!token.is_set());
        assert!(matches!(sessions.require().await, Err(SessionError::SignedOut)));

        Ok(())
    }

    #[test]
    fn debug_output_redacts_the_token() {
        let token = BearerToken::default();

        token.set(Zeroizing::new("secret".to_string()));

        assert_eq!(format!("{token:?}"), "BearerToken(\"<redacted>\")");
    }
}
