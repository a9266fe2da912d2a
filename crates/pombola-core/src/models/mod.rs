//! Data models for the attendance dashboard.
//!
//! - `AnnualAttendance`, `MemberAttendance`, `Meeting`: PMG API records
//! - `AttendanceCode`: per-meeting attendance codes
//! - `Person`, `Position`: officeholder rows used to split minister and MP attendance

pub mod attendance;
pub mod position;

pub use attendance::{
    AnnualAttendance, AttendanceCode, AttendancePage, Meeting, Member, MemberAttendance,
};
pub use position::{Person, Position};
