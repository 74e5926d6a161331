//! Company membership roles.

use serde::{Deserialize, Serialize};

/// Error returned when a stored or user-supplied role name is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid company role: {0} (expected owner, manager or employee)")]
pub struct RoleParseError(pub String);

/// Role of the signed-in user inside the currently selected company.
///
/// Role checks on the client only decide what to show. The backend authorizes
/// every request on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyRole {
    /// Created the company. Full control.
    Owner,
    /// Manages departments, tasks and invitations.
    Manager,
    /// Regular member.
    Employee,
}

impl CompanyRole {
    /// Wire name, identical to the value kept in the session store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }

    /// Whether management controls (new department, invite member) are shown.
    #[must_use]
    pub const fn can_manage(self) -> bool {
        matches!(self, Self::Owner | Self::Manager)
    }
}

impl std::fmt::Display for CompanyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CompanyRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "manager" => Ok(Self::Manager),
            "employee" => Ok(Self::Employee),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}
