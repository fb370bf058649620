//! In-memory caching using moka
//!
//! Provides application-level caching for the studio catalog. Catalog data
//! changes rarely, so short TTLs keep it fresh without a round trip per
//! page view. Bookings are never cached - the list is re-fetched after
//! every mutation.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::models::{Studio, StudioSummary};

/// Cache key for the single studio listing entry
pub const STUDIO_LIST_KEY: &str = "studios:all";

/// Application cache holding studio catalog data
#[derive(Clone)]
pub struct AppCache {
    /// Studio details (id -> Studio)
    pub studios: Cache<Uuid, Arc<Studio>>,
    /// Studio listing (singleton)
    pub studio_list: Cache<String, Arc<Vec<StudioSummary>>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Studio details: 200 entries, 5 min TTL, 2 min idle
            studios: Cache::builder()
                .max_capacity(200)
                .time_to_live(Duration::from_secs(5 * 60))
                .time_to_idle(Duration::from_secs(2 * 60))
                .build(),

            // Studio listing: 1 entry, 5 min TTL
            studio_list: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(5 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            studios_size: self.studios.entry_count(),
            listing_cached: self.studio_list.entry_count() > 0,
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.studios.invalidate_all();
        self.studio_list.invalidate_all();
        info!("All caches invalidated");
    }

    /// Invalidate a specific studio by id
    pub async fn invalidate_studio(&self, id: Uuid) {
        self.studios.invalidate(&id).await;
        // The listing might carry this studio's summary
        self.studio_list.invalidate_all();
        info!("Cache invalidated for studio: {}", id);
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub studios_size: u64,
    pub listing_cached: bool,
}
