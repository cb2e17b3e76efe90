//! Store Locator Module
//!
//! Read-only reference data for the store locator pages:
//! - `domain` - dataset projection from the Google-Places-shaped file
//! - `cache` - in-memory snapshot with lazy, coalesced refresh
//! - `geo` - Haversine distance, proximity sort, distance labels
//! - `presentation` - the `GET /api/stores` handler and router
//!
//! The dataset is immutable at runtime; updating it means replacing the
//! file and waiting out (or force-refreshing) the one-hour cache.

pub mod cache;
pub mod domain;
pub mod geo;
pub mod presentation;

// Re-exports for convenience
pub use cache::{CacheStatus, StoreCache};
pub use domain::{Store, transform_stores};
pub use geo::{distance_km, format_distance};
pub use presentation::{StoresAppState, stores_router};
