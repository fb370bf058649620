//! Response DTOs for the booking backend.

use serde::Deserialize;

use crate::models::UserProfile;

/// Successful login: the bearer token plus the signed-in user
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user: UserProfile,
}

/// `POST /bookings/{id}/pay` hands back the secret the third-party
/// payment widget needs; confirmation happens entirely inside the widget.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

/// Error body shape the backend uses for rejected requests
#[derive(Debug, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}
