pub mod storage;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::GatewayResult;

pub use storage::{FileStorage, MemoryStorage, SessionStorage};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "employee";
pub const REDIRECT_KEY: &str = "redirect";
pub const ADMIN_ROLE: &str = "ROLE_ADMIN";

/// Signed-in user, mirrored into session storage so a restart keeps it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role_name: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role_name == ADMIN_ROLE
    }
}

/// Session context shared by the gateway and everything that issues calls.
///
/// Populated at login, cleared at logout or when the server rejects the
/// token. Every read goes to storage, so a token written through one clone
/// is visible to all others on their next call.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn SessionStorage>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// File-backed when the config names a session directory, in memory otherwise
    pub fn from_config(config: &ClientConfig) -> GatewayResult<Self> {
        match &config.session.dir {
            Some(dir) => Ok(Self::new(Arc::new(FileStorage::in_dir(dir)?))),
            None => Ok(Self::in_memory()),
        }
    }

    pub fn current_token(&self) -> Option<String> {
        match self.storage.get_item(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read session token: {}", e);
                None
            }
        }
    }

    pub fn set_token(&self, token: &str) -> GatewayResult<()> {
        self.storage.set_item(TOKEN_KEY, token)
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        let raw = match self.storage.get_item(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Failed to read session user: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Discarding unreadable session user: {}", e);
                None
            }
        }
    }

    pub fn set_user(&self, user: &CurrentUser) -> GatewayResult<()> {
        let raw = serde_json::to_string(user)?;
        self.storage.set_item(USER_KEY, &raw)
    }

    pub fn role(&self) -> Option<String> {
        self.current_user()
            .map(|u| u.role_name)
            .filter(|r| !r.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_token().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role().as_deref() == Some(ADMIN_ROLE)
    }

    /// Edit controls are disabled for anyone but an admin
    pub fn controls_disabled(&self) -> bool {
        !self.is_admin()
    }

    /// Remember the login location a guard bounced to, for the next sign-in
    pub fn set_pending_redirect(&self, location: &str) -> GatewayResult<()> {
        self.storage.set_item(REDIRECT_KEY, location)
    }

    /// The remembered login location, removed on read
    pub fn take_pending_redirect(&self) -> Option<String> {
        let location = match self.storage.get_item(REDIRECT_KEY) {
            Ok(location) => location?,
            Err(e) => {
                tracing::warn!("Failed to read pending redirect: {}", e);
                return None;
            }
        };
        if let Err(e) = self.storage.remove_item(REDIRECT_KEY) {
            tracing::warn!("Failed to drop pending redirect: {}", e);
        }
        Some(location).filter(|l| !l.is_empty())
    }

    /// Drops token and user; a pending redirect outlives the sign-out
    pub fn clear(&self) -> GatewayResult<()> {
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(USER_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> CurrentUser {
        CurrentUser {
            id: Some(1),
            username: "admin".to_string(),
            name: "Administrator".to_string(),
            role_name: ADMIN_ROLE.to_string(),
        }
    }

    #[test]
    fn test_token_read_fresh_across_clones() {
        let session = Session::in_memory();
        let other = session.clone();
        assert_eq!(session.current_token(), None);

        other.set_token("abc").unwrap();
        assert_eq!(session.current_token().as_deref(), Some("abc"));

        other.set_token("def").unwrap();
        assert_eq!(session.current_token().as_deref(), Some("def"));
    }

    #[test]
    fn test_role_gating() {
        let session = Session::in_memory();
        assert!(session.controls_disabled());
        assert_eq!(session.role(), None);

        session.set_user(&admin()).unwrap();
        assert!(session.is_admin());
        assert!(!session.controls_disabled());

        let mut clerk = admin();
        clerk.role_name = "ROLE_USER".to_string();
        session.set_user(&clerk).unwrap();
        assert!(!session.is_admin());
        assert_eq!(session.role().as_deref(), Some("ROLE_USER"));
    }

    #[test]
    fn test_clear_drops_token_and_user() {
        let session = Session::in_memory();
        session.set_token("abc").unwrap();
        session.set_user(&admin()).unwrap();
        assert!(session.is_authenticated());

        session.clear().unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(session.current_user(), None);
    }

    #[test]
    fn test_pending_redirect_taken_once() {
        let session = Session::in_memory();
        assert_eq!(session.take_pending_redirect(), None);

        session.set_pending_redirect("/login?redirect=/stud").unwrap();
        session.clear().unwrap();
        assert_eq!(session.take_pending_redirect().as_deref(), Some("/login?redirect=/stud"));
        assert_eq!(session.take_pending_redirect(), None);
    }

    #[test]
    fn test_user_serialized_camel_case() {
        let raw = serde_json::to_value(admin()).unwrap();
        assert_eq!(raw["roleName"], ADMIN_ROLE);
        assert_eq!(raw["username"], "admin");
    }
}
