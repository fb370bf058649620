//! StudioBook web frontend.
//!
//! Server-rendered frontend for the StudioBook room booking marketplace:
//! musicians book recording and rehearsal rooms from studio owners. All
//! booking authority (persistence, availability, conflict checks, auth,
//! payment capture) lives in the external backend API; this crate renders
//! pages, validates input locally, and computes quotes and cancellation
//! eligibility before anything is submitted.

pub mod api;
pub mod booking;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod session;

use api::BookingApi;
use cache::AppCache;
use config::Config;
use session::SessionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub api: BookingApi,
    pub cache: AppCache,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            api: BookingApi::new(config.api_base_url.clone()),
            cache: AppCache::new(),
            sessions: SessionStore::new(config.session_ttl),
        }
    }
}
