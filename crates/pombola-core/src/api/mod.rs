//! REST API client module for the PMG committee-attendance API.
//!
//! `ApiClient` fetches pages of the `meetings-by-member` endpoint. The
//! `AttendanceSource` trait lets the pagination loop run against any page
//! source, which is how the tests drive it.

pub mod client;
pub mod error;

pub use client::{fetch_all_pages, ApiClient, AttendanceSource, ATTENDANCE_URL, DOWNLOAD_URL};
pub use error::ApiError;
