//! User profile model

use serde::Deserialize;
use uuid::Uuid;

/// Authenticated user as returned by the backend login endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
