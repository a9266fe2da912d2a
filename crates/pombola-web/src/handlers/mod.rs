//! Page handlers.

pub mod attendance;
pub mod county;
