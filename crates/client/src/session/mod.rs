//! Durable session context.
//!
//! The session holds the bearer token, the signed-in user and the selected
//! company. Raw storage sits behind the [`SessionStore`] trait so the CLI can
//! persist to disk while tests use [`MemoryStore`]. Consumers never touch the
//! store directly: they go through [`SessionContext`], which owns the key
//! names and normalizes the `"null"`/`"undefined"` sentinels on read.
//!
//! # Concurrency
//!
//! Each store operation is atomic at the key level. Nothing coordinates two
//! processes sharing one session file; the last write wins.

pub mod file;
pub mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::warn;
use workpro_core::{
    CompanyId, CompanyRole, Email, SessionKey, UserId, UserProfile, normalize_stored,
};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by session storage.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the backing file failed.
    #[error("Session store I/O error at {}: {source}", path.display())]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a JSON object of strings.
    #[error("Session store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// A stored value could not be interpreted.
    #[error("Stored {key} is invalid: {reason}")]
    InvalidValue {
        /// Offending key.
        key: SessionKey,
        /// What was wrong with it.
        reason: String,
    },
}

/// Synchronous string key-value storage backing a session.
pub trait SessionStore: Send + Sync {
    /// Raw stored value, sentinels included.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backing storage cannot be read.
    fn get(&self, key: SessionKey) -> Result<Option<String>, SessionError>;

    /// Store a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backing storage cannot be written.
    fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionError>;

    /// Remove a single key.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backing storage cannot be written.
    fn remove(&self, key: SessionKey) -> Result<(), SessionError>;

    /// Remove every session key.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backing storage cannot be written.
    fn clear(&self) -> Result<(), SessionError>;
}

/// The selected company and the user's role in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyContext {
    /// Selected tenant.
    pub id: CompanyId,
    /// Role inside the tenant, if one was recorded.
    pub role: Option<CompanyRole>,
}

impl CompanyContext {
    /// Whether management controls should be offered. Display-only.
    #[must_use]
    pub fn can_manage(&self) -> bool {
        self.role.is_some_and(CompanyRole::can_manage)
    }
}

/// Typed, injectable view over a [`SessionStore`].
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Wrap a store.
    #[must_use]
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Wrap an already shared store.
    #[must_use]
    pub fn from_shared(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Session that lives only as long as the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    fn read(&self, key: SessionKey) -> Result<Option<String>, SessionError> {
        let raw = self.store.get(key)?;
        Ok(normalize_stored(raw.as_deref()).map(str::to_owned))
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Bearer token, if signed in.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read.
    pub fn token(&self) -> Result<Option<SecretString>, SessionError> {
        Ok(self.read(SessionKey::Token)?.map(SecretString::from))
    }

    /// ID of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read.
    pub fn user_id(&self) -> Result<Option<UserId>, SessionError> {
        Ok(self.read(SessionKey::UserId)?.map(UserId::from))
    }

    /// Cached profile of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidValue` if the stored JSON does not parse.
    pub fn user_profile(&self) -> Result<Option<UserProfile>, SessionError> {
        self.read(SessionKey::UserProfile)?
            .map(|raw| {
                serde_json::from_str(&raw).map_err(|e| SessionError::InvalidValue {
                    key: SessionKey::UserProfile,
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    /// Record a successful login or signup.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be written.
    pub fn sign_in(&self, token: &SecretString, profile: &UserProfile) -> Result<(), SessionError> {
        self.store.set(SessionKey::Token, token.expose_secret())?;
        self.set_profile(profile)
    }

    /// Replace the cached profile (and `userId`).
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be written.
    pub fn set_profile(&self, profile: &UserProfile) -> Result<(), SessionError> {
        self.store.set(SessionKey::UserId, profile.id.as_str())?;
        self.store
            .set(SessionKey::UserProfile, &serde_json::to_string(profile)?)
    }

    // =========================================================================
    // Company
    // =========================================================================

    /// Selected company, or `None` when the user still has to pick or create one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read.
    pub fn company(&self) -> Result<Option<CompanyContext>, SessionError> {
        let Some(id) = self.company_id()? else {
            return Ok(None);
        };
        Ok(Some(CompanyContext {
            id,
            role: self.company_role()?,
        }))
    }

    /// ID of the selected company.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read.
    pub fn company_id(&self) -> Result<Option<CompanyId>, SessionError> {
        Ok(self.read(SessionKey::CompanyId)?.map(CompanyId::from))
    }

    /// Role in the selected company. Unknown role names read as `None`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read.
    pub fn company_role(&self) -> Result<Option<CompanyRole>, SessionError> {
        Ok(self
            .read(SessionKey::CompanyRole)?
            .and_then(|raw| match raw.parse() {
                Ok(role) => Some(role),
                Err(e) => {
                    warn!(error = %e, "Ignoring unrecognised company role in session");
                    None
                }
            }))
    }

    /// Select a company.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be written.
    pub fn set_company(&self, id: &CompanyId, role: CompanyRole) -> Result<(), SessionError> {
        self.store.set(SessionKey::CompanyId, id.as_str())?;
        self.store.set(SessionKey::CompanyRole, role.as_str())
    }

    /// Forget the selected company but stay signed in.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be written.
    pub fn clear_company(&self) -> Result<(), SessionError> {
        self.store.remove(SessionKey::CompanyId)?;
        self.store.remove(SessionKey::CompanyRole)
    }

    /// Sign out: drop every session key.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be written.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.store.clear()
    }

    /// Whether the signed-in user should be routed to the super-admin console.
    ///
    /// This compares emails on the client and only picks a screen. The backend
    /// still authorizes every admin endpoint.
    #[must_use]
    pub fn is_super_admin(&self, admin_email: Option<&Email>) -> bool {
        let Some(admin_email) = admin_email else {
            return false;
        };
        match self.user_profile() {
            Ok(Some(profile)) => profile.email.same_address(admin_email),
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "Could not read profile for super-admin check");
                false
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn profile(email: &str) -> UserProfile {
        serde_json::from_value(serde_json::json!({
            "_id": "u-1",
            "name": "Ada",
            "email": email,
        }))
        .unwrap()
    }

    #[test]
    fn test_empty_session_reads_as_absent() {
        let session = SessionContext::in_memory();
        assert!(session.token().unwrap().is_none());
        assert!(session.user_id().unwrap().is_none());
        assert!(session.company().unwrap().is_none());
    }

    #[test]
    fn test_sign_in_writes_token_user_and_profile() {
        let store = Arc::new(MemoryStore::new());
        let session = SessionContext::from_shared(store.clone());

        session
            .sign_in(&SecretString::from("abc123"), &profile("ada@corp.io"))
            .unwrap();

        assert_eq!(store.get(SessionKey::Token).unwrap().as_deref(), Some("abc123"));
        assert_eq!(store.get(SessionKey::UserId).unwrap().as_deref(), Some("u-1"));
        assert_eq!(
            session.token().unwrap().unwrap().expose_secret(),
            "abc123"
        );
        assert_eq!(session.user_profile().unwrap().unwrap().name, "Ada");
    }

    #[test]
    fn test_company_sentinels_read_as_no_company() {
        let store = Arc::new(MemoryStore::new());
        let session = SessionContext::from_shared(store.clone());

        for sentinel in ["null", "undefined", ""] {
            store.set(SessionKey::CompanyId, sentinel).unwrap();
            store.set(SessionKey::CompanyRole, "owner").unwrap();
            assert_eq!(session.company().unwrap(), None, "sentinel {sentinel:?}");
            assert_eq!(session.company_id().unwrap(), None);
        }
    }

    #[test]
    fn test_set_company_round_trip() {
        let session = SessionContext::in_memory();
        session
            .set_company(&CompanyId::new("c-9"), CompanyRole::Manager)
            .unwrap();

        let company = session.company().unwrap().unwrap();
        assert_eq!(company.id.as_str(), "c-9");
        assert_eq!(company.role, Some(CompanyRole::Manager));
        assert!(company.can_manage());

        session.clear_company().unwrap();
        assert!(session.company().unwrap().is_none());
    }

    #[test]
    fn test_unknown_role_reads_as_none() {
        let store = Arc::new(MemoryStore::new());
        let session = SessionContext::from_shared(store.clone());
        store.set(SessionKey::CompanyId, "c-1").unwrap();
        store.set(SessionKey::CompanyRole, "overlord").unwrap();

        let company = session.company().unwrap().unwrap();
        assert_eq!(company.role, None);
        assert!(!company.can_manage());
    }

    #[test]
    fn test_corrupt_profile_is_reported() {
        let store = Arc::new(MemoryStore::new());
        let session = SessionContext::from_shared(store.clone());
        store.set(SessionKey::UserProfile, "{not json").unwrap();

        assert!(matches!(
            session.user_profile(),
            Err(SessionError::InvalidValue {
                key: SessionKey::UserProfile,
                ..
            })
        ));
    }

    #[test]
    fn test_clear_drops_everything() {
        let session = SessionContext::in_memory();
        session
            .sign_in(&SecretString::from("t"), &profile("ada@corp.io"))
            .unwrap();
        session
            .set_company(&CompanyId::new("c-1"), CompanyRole::Owner)
            .unwrap();

        session.clear().unwrap();

        assert!(session.token().unwrap().is_none());
        assert!(session.user_profile().unwrap().is_none());
        assert!(session.company().unwrap().is_none());
    }

    #[test]
    fn test_super_admin_check() {
        let session = SessionContext::in_memory();
        let admin = Email::parse("root@workpro.io").unwrap();
        assert!(!session.is_super_admin(Some(&admin)));

        session
            .sign_in(&SecretString::from("t"), &profile("Root@WorkPro.io"))
            .unwrap();
        assert!(session.is_super_admin(Some(&admin)));
        assert!(!session.is_super_admin(None));

        session
            .set_profile(&profile("someone@workpro.io"))
            .unwrap();
        assert!(!session.is_super_admin(Some(&admin)));
    }
}
