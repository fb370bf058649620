//! Request DTOs for the booking backend.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Credentials for `POST /auth/login`
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload for `POST /bookings`, sent only after local validation passes
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub studio_id: Uuid,
    pub room_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub instrument_ids: Vec<Uuid>,
}

/// Payload for `POST /bookings/{id}/pay`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayBookingRequest {
    pub instrument_ids: Vec<Uuid>,
}
