//! Companies and invitations.

use serde::{Deserialize, Deserializer, Serialize};
use workpro_core::{CompanyId, CompanyRole};

/// A company (tenant) the user belongs to or administers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Backend ID.
    #[serde(rename = "_id", alias = "id")]
    pub id: CompanyId,
    /// Display name.
    pub name: String,
    /// The signed-in user's role, when listed as a membership.
    #[serde(
        default,
        deserialize_with = "known_role",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<CompanyRole>,
    /// Remaining backend fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Roles this client does not know are treated as no role.
fn known_role<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<CompanyRole>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|role| role.parse().ok()))
}

/// Result of accepting an invitation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvitationAcceptance {
    /// Company joined.
    pub company: Company,
    /// Role granted by the invitation.
    pub role: CompanyRole,
}
