//! Cached user record kept under the `userProfile` session key.

use serde::{Deserialize, Serialize};

use super::{Email, UserId};

/// The signed-in user as returned by the login and profile endpoints.
///
/// Fields the client does not model are preserved in `extra` so a profile
/// read from the session store and written back loses nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Backend user ID (`_id` on the wire).
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Login email.
    pub email: Email,
    /// URL of the uploaded profile picture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
    /// Remaining backend fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
