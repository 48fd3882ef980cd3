//! Local user profile and session flags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;

/// The single locally persisted user profile.
///
/// Created at registration, or synthesized at login from the fetched
/// reference record. There is no multi-user support: the persisted `@user`
/// key always holds at most one of these.
///
/// Serialized in camelCase to stay wire-compatible with snapshots written by
/// earlier versions of the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier: the reference record's id at login, or a
    /// generated UUID at registration.
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// Validated email address.
    pub email: Email,
    /// Free-form postal address.
    pub address: String,
    /// Optional profile image URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    /// When this profile was created locally.
    pub created_at: DateTime<Utc>,
}

/// Session flags, persisted independently of the user record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFlags {
    /// Whether a user is currently authenticated.
    pub is_logged_in: bool,
    /// Whether the user opted to stay signed in across restarts.
    pub remember_me: bool,
}
