//! Core library for the Pombola county-performance and committee-attendance
//! pages.
//!
//! - `api`: PMG attendance API client and pagination
//! - `cache`: on-disk page cache with named regions
//! - `models`: attendance records and officeholder positions
//! - `positions`: the position lookup the attendance split depends on
//! - `attendance`: filtering, minister/MP split and aggregation
//! - `county`: the county-performance call-to-action page
//! - `config`, `settings`: runtime configuration and the test settings profile

pub mod api;
pub mod attendance;
pub mod cache;
pub mod config;
pub mod county;
pub mod models;
pub mod positions;
pub mod settings;
pub mod utils;

pub use config::Config;
