//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::api::ApiError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Page not found")]
    NotFound,

    #[error("Not signed in")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // A missing or stale session always lands on the login page
            AppError::Unauthorized | AppError::Api(ApiError::Unauthorized) => {
                return Redirect::to("/login").into_response();
            }
            AppError::NotFound | AppError::Api(ApiError::NotFound) => {
                (StatusCode::NOT_FOUND, "Page not found".to_string())
            }
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Api(e) => {
                tracing::warn!("Backend error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "The booking service is temporarily unavailable. Please try again.".to_string(),
                )
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        // Return simple HTML error page
        let html = format!(
            r#"<!DOCTYPE html>
<html>
<head><title>{} - StudioBook</title></head>
<body style="font-family: sans-serif; text-align: center; padding: 50px;">
    <h1>{}</h1>
    <p>{}</p>
    <a href="/studios">Back to studios</a>
</body>
</html>"#,
            status.as_u16(),
            status.as_u16(),
            message
        );

        (status, axum::response::Html(html)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
