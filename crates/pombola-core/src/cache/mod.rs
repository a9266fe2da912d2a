//! Local page cache.
//!
//! `CacheManager` stores JSON values on disk, grouped into named regions
//! (the attendance data lives in the `pmg_api` region). Entries carry the
//! time they were written but never expire on their own; clearing a region
//! is left to whoever runs the site.

pub mod manager;

pub use manager::{CacheManager, CacheRegion, CachedData};
