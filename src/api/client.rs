//! HTTP client for the booking backend.
//!
//! Thin typed wrapper over reqwest. No automatic retry: a failed mutation
//! surfaces to the user, who re-triggers it manually.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::models::{Booking, Studio, StudioSummary};

use super::requests::{CreateBookingRequest, LoginRequest, PayBookingRequest};
use super::responses::{ApiMessage, AuthResponse, PaymentIntentResponse};

/// Backend call failure, already classified for the UI layer
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("The session is no longer valid")]
    Unauthorized,

    #[error("Resource not found")]
    NotFound,

    #[error("Booking service rejected the request: {message}")]
    Backend { status: u16, message: String },

    #[error("Could not reach the booking service: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the external booking REST API
#[derive(Clone)]
pub struct BookingApi {
    http: reqwest::Client,
    base_url: String,
}

impl BookingApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /auth/login`
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    /// `GET /studios`
    pub async fn studios(&self) -> Result<Vec<StudioSummary>, ApiError> {
        let response = self.http.get(self.url("/studios")).send().await?;
        decode(response).await
    }

    /// `GET /studios/{id}`
    pub async fn studio(&self, id: Uuid) -> Result<Studio, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/studios/{}", id)))
            .send()
            .await?;
        decode(response).await
    }

    /// `GET /bookings/me`
    pub async fn my_bookings(&self, token: &str) -> Result<Vec<Booking>, ApiError> {
        let response = self
            .http
            .get(self.url("/bookings/me"))
            .bearer_auth(token)
            .send()
            .await?;
        decode(response).await
    }

    /// `POST /bookings`, called only after local validation passes
    pub async fn create_booking(
        &self,
        token: &str,
        request: &CreateBookingRequest,
    ) -> Result<Booking, ApiError> {
        let response = self
            .http
            .post(self.url("/bookings"))
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    /// `PATCH /bookings/{id}/cancel`, called only after the local
    /// eligibility check passes
    pub async fn cancel_booking(&self, token: &str, id: Uuid) -> Result<Booking, ApiError> {
        let response = self
            .http
            .patch(self.url(&format!("/bookings/{}/cancel", id)))
            .bearer_auth(token)
            .send()
            .await?;
        decode(response).await
    }

    /// `POST /bookings/{id}/pay`
    pub async fn pay_booking(
        &self,
        token: &str,
        id: Uuid,
        request: &PayBookingRequest,
    ) -> Result<PaymentIntentResponse, ApiError> {
        let response = self
            .http
            .post(self.url(&format!("/bookings/{}/pay", id)))
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ApiError::NotFound),
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(backend_error(status.as_u16(), &body))
        }
    }
}

/// Classify a non-auth backend rejection, pulling the server's own message
/// out of a `{"message": ...}` body when it carries one.
fn backend_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ApiMessage>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| body.trim().to_string());
    ApiError::Backend { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_extracts_json_message() {
        let err = backend_error(409, r#"{"message": "booking already cancelled"}"#);
        match err {
            ApiError::Backend { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "booking already cancelled");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_backend_error_falls_back_to_raw_body() {
        let err = backend_error(500, "upstream exploded\n");
        match err {
            ApiError::Backend { message, .. } => assert_eq!(message, "upstream exploded"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = BookingApi::new("https://api.studiobook.example/");
        assert_eq!(
            api.url("/bookings/me"),
            "https://api.studiobook.example/bookings/me"
        );
    }
}
