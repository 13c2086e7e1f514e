//! User profile model for storage and session state.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore (`users/{uid}`).
///
/// Field names stay camelCase on the wire for compatibility with documents
/// written by the deployed mobile clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Identity provider uid (also used as document ID)
    pub uid: String,
    /// Email address, set at creation
    pub email: String,
    /// Premium entitlement flag
    #[serde(default)]
    pub is_premium: bool,
    /// Profile photo URL, set by the account photo flow
    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl UserProfile {
    /// Default profile for a fresh or repaired account.
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            is_premium: false,
            photo_url: None,
        }
    }
}
