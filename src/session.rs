//! Session context store.
//!
//! The browser cookie carries only an opaque id; the token and user
//! profile live server-side in a bounded moka cache. The store has an
//! explicit load/save/clear lifecycle so nothing reads session state
//! ambiently.

use std::sync::Arc;
use std::time::Duration;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use moka::future::Cache;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::UserProfile;

pub const SESSION_COOKIE: &str = "studiobook_session";

const MAX_SESSIONS: u64 = 10_000;

/// Signed-in user context handed to every call that needs the backend
#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserProfile,
    pub access_token: String,
    pub signed_in_at: DateTime<Utc>,
}

/// Cookie-keyed session store
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<String, Arc<Session>>,
}

impl SessionStore {
    /// Create a store whose sessions expire `ttl` after sign-in
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(MAX_SESSIONS)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Load the session referenced by the request's cookie, if any
    pub async fn load(&self, jar: &CookieJar) -> Option<Arc<Session>> {
        let id = jar.get(SESSION_COOKIE)?.value().to_string();
        self.sessions.get(&id).await
    }

    /// Load the session or fail the request with a redirect to login
    pub async fn require(&self, jar: &CookieJar) -> Result<Arc<Session>, AppError> {
        self.load(jar).await.ok_or(AppError::Unauthorized)
    }

    /// Persist a fresh session and return the cookie that references it
    pub async fn save(&self, session: Session) -> Cookie<'static> {
        let id = Uuid::new_v4().to_string();
        info!("Session opened for {}", session.user.email);
        self.sessions.insert(id.clone(), Arc::new(session)).await;

        Cookie::build((SESSION_COOKIE, id))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }

    /// Drop the session referenced by the request's cookie
    pub async fn clear(&self, jar: &CookieJar) {
        if let Some(cookie) = jar.get(SESSION_COOKIE) {
            let id = cookie.value().to_string();
            self.sessions.invalidate(&id).await;
            info!("Session closed");
        }
    }

    /// Live session count for the health endpoint
    pub fn count(&self) -> u64 {
        self.sessions.entry_count()
    }
}
