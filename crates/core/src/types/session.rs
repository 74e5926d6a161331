//! Session key names and stored-value normalization.
//!
//! The session store only holds strings. Older writers stored the literal
//! text `"null"` or `"undefined"` where they meant "nothing", so every read
//! goes through [`normalize_stored`] before a value reaches a consumer.

use serde::{Deserialize, Serialize};

/// Keys recognised in the durable session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SessionKey {
    /// Opaque bearer token.
    #[serde(rename = "token")]
    Token,
    /// ID of the signed-in user.
    #[serde(rename = "userId")]
    UserId,
    /// JSON-serialized [`crate::UserProfile`].
    #[serde(rename = "userProfile")]
    UserProfile,
    /// ID of the selected company (tenant).
    #[serde(rename = "companyId")]
    CompanyId,
    /// [`crate::CompanyRole`] inside the selected company.
    #[serde(rename = "companyRole")]
    CompanyRole,
}

impl SessionKey {
    /// Every key, in the order they are written at login.
    pub const ALL: [Self; 5] = [
        Self::Token,
        Self::UserId,
        Self::UserProfile,
        Self::CompanyId,
        Self::CompanyRole,
    ];

    /// Name of the key in the store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::UserId => "userId",
            Self::UserProfile => "userProfile",
            Self::CompanyId => "companyId",
            Self::CompanyRole => "companyRole",
        }
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True for stored text that stands in for "no value".
#[must_use]
pub fn is_absent_sentinel(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw == "null" || raw == "undefined"
}

/// Map a raw stored value to a real optional.
#[must_use]
pub fn normalize_stored(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !is_absent_sentinel(value))
}
