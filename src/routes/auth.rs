//! Login and logout handlers

use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::Utc;
use serde::Deserialize;

use crate::api::requests::LoginRequest;
use crate::api::ApiError;
use crate::error::Result;
use crate::session::{Session, SESSION_COOKIE};
use crate::AppState;

/// Login page template
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginTemplate {
    error: String,
    has_error: bool,
}

fn render_login(error: Option<String>) -> Result<Html<String>> {
    let template = LoginTemplate {
        has_error: error.is_some(),
        error: error.unwrap_or_default(),
    };
    Ok(Html(template.render()?))
}

/// Login page
pub async fn login_form() -> Result<Html<String>> {
    render_login(None)
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

/// Submit credentials to the backend and open a session
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let email = form.email.trim().to_string();
    if email.is_empty() || form.password.is_empty() {
        return Ok(render_login(Some("Email and password are required".to_string()))?
            .into_response());
    }

    let request = LoginRequest {
        email,
        password: form.password,
    };
    match state.api.login(&request).await {
        Ok(auth) => {
            let cookie = state
                .sessions
                .save(Session {
                    user: auth.user,
                    access_token: auth.access_token,
                    signed_in_at: Utc::now(),
                })
                .await;
            Ok((jar.add(cookie), Redirect::to("/bookings")).into_response())
        }
        Err(ApiError::Unauthorized) => {
            Ok(render_login(Some("Invalid email or password".to_string()))?.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Close the session and drop its cookie
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    state.sessions.clear(&jar).await;
    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    (jar, Redirect::to("/login")).into_response()
}
