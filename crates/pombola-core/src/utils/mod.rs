//! Utility functions for URL and query-string handling.

pub mod format;
pub mod query;

pub use format::{path_of_url, profile_slug};
pub use query::last_value;
