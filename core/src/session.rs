//! Session context.
//!
//! The session owns the bearer token and the signed-in user and persists both
//! through an injected [`SessionStore`] under the `token` and `user` keys (the
//! user as JSON). Screens receive a `&Session` instead of reading storage
//! themselves.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::types::{AuthResponse, User};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Key/value persistence for session data.
pub trait SessionStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("stored user is not valid JSON: {0}")]
    CorruptUser(#[source] serde_json::Error),

    #[error("could not serialize user: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub struct Session {
    store: Box<dyn SessionStore>,
    token: Option<String>,
    user: Option<User>,
    dev_auth: bool,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.token.is_some())
            .field("user", &self.user)
            .field("dev_auth", &self.dev_auth)
            .finish()
    }
}

impl Session {
    /// An empty session over `store`. Call [`Session::restore`] to pick up
    /// anything already persisted.
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            token: None,
            user: None,
            dev_auth: false,
        }
    }

    /// A session over `store` honouring the configuration's `dev_auth` flag.
    pub fn from_config(config: &ClientConfig, store: impl SessionStore + 'static) -> Self {
        if config.dev_auth {
            warn!("dev_auth enabled, every route is treated as signed in");
        }
        Self::new(store).with_dev_auth(config.dev_auth)
    }

    /// Treat every route as authenticated regardless of the token.
    pub fn with_dev_auth(mut self, dev_auth: bool) -> Self {
        self.dev_auth = dev_auth;
        self
    }

    /// Reload token and user from the store. A user entry that fails to parse
    /// is discarded along with the token.
    pub fn restore(&mut self) -> Result<(), SessionError> {
        self.token = self.store.get(TOKEN_KEY).filter(|t| !t.is_empty());
        self.user = match self.store.get(USER_KEY) {
            None => None,
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "discarding corrupt session");
                    self.logout();
                    return Err(SessionError::CorruptUser(e));
                }
            },
        };
        debug!(authenticated = self.token.is_some(), "session restored");
        Ok(())
    }

    pub fn login(&mut self, auth: AuthResponse) -> Result<(), SessionError> {
        let user = serde_json::to_string(&auth.user).map_err(SessionError::Serialize)?;
        self.store.set(TOKEN_KEY, auth.token.clone());
        self.store.set(USER_KEY, user);
        debug!(user_id = auth.user.id, "logged in");
        self.token = Some(auth.token);
        self.user = Some(auth.user);
        Ok(())
    }

    pub fn logout(&mut self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
        self.token = None;
        self.user = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.dev_auth || self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> AuthResponse {
        AuthResponse {
            token: "tok".to_string(),
            user: User {
                id: 1,
                name: "Ana".to_string(),
                email: Some("ana@petclub.dev".to_string()),
            },
        }
    }

    #[test]
    fn login_persists_and_restore_reloads() {
        let mut session = Session::new(MemoryStore::new());
        session.login(auth()).unwrap();
        assert!(session.is_authenticated());

        let mut store = MemoryStore::new();
        store.set(TOKEN_KEY, "tok".to_string());
        store.set(USER_KEY, r#"{"id":1,"name":"Ana"}"#.to_string());
        let mut restored = Session::new(store);
        assert!(!restored.is_authenticated());
        restored.restore().unwrap();
        assert_eq!(restored.token(), Some("tok"));
        assert_eq!(restored.user().map(|u| u.id), Some(1));
    }

    #[test]
    fn logout_clears_everything() {
        let mut session = Session::new(MemoryStore::new());
        session.login(auth()).unwrap();
        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        session.restore().unwrap();
        assert!(session.token().is_none());
    }

    #[test]
    fn corrupt_user_is_discarded() {
        let mut store = MemoryStore::new();
        store.set(TOKEN_KEY, "tok".to_string());
        store.set(USER_KEY, "{not json".to_string());
        let mut session = Session::new(store);
        assert!(matches!(session.restore(), Err(SessionError::CorruptUser(_))));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn dev_auth_bypasses_token() {
        let session = Session::new(MemoryStore::new()).with_dev_auth(true);
        assert!(session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn dev_auth_flag_from_env_opens_the_gate() {
        use crate::routes::{navigate, Navigation, Route};

        let config = ClientConfig::from_lookup(|key| {
            (key == "PETCLUB_DEV_AUTH").then(|| "true".to_string())
        })
        .unwrap();
        let session = Session::from_config(&config, MemoryStore::new());
        assert!(session.is_authenticated());
        assert_eq!(navigate("/pets", &session), Navigation::Render(Route::Pets));

        let closed = Session::from_config(&ClientConfig::default(), MemoryStore::new());
        assert_eq!(navigate("/pets", &closed), Navigation::Redirect(Route::Login));
    }
}
