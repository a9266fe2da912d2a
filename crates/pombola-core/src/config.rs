//! Runtime configuration.
//!
//! Values come from the environment (a `.env` file is loaded by the binary
//! before this runs). Unset variables use their defaults; unparseable ones
//! log a warning and use their defaults too.

use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, warn};

use crate::api::client::{API_REQUESTS_TIMEOUT_SECS, ATTENDANCE_URL};

/// Application name used for the cache directory path
const APP_NAME: &str = "pombola";

const DEFAULT_POSITIONS_FILE: &str = "data/positions.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind: SocketAddr,
    pub attendance_url: String,
    pub api_timeout: Duration,
    pub cache_dir: PathBuf,
    pub positions_file: PathBuf,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            attendance_url: ATTENDANCE_URL.to_string(),
            api_timeout: Duration::from_secs(API_REQUESTS_TIMEOUT_SECS),
            cache_dir: default_cache_dir(),
            positions_file: PathBuf::from(DEFAULT_POSITIONS_FILE),
            log_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let timeout_secs = parse_or("POMBOLA_API_TIMEOUT_SECS", &lookup, API_REQUESTS_TIMEOUT_SECS);

        let config = Self {
            bind: parse_or("POMBOLA_BIND", &lookup, defaults.bind),
            attendance_url: lookup("POMBOLA_ATTENDANCE_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.attendance_url),
            api_timeout: Duration::from_secs(timeout_secs),
            cache_dir: lookup("POMBOLA_CACHE_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            positions_file: lookup("POMBOLA_POSITIONS_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.positions_file),
            log_dir: lookup("POMBOLA_LOG_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        };

        debug!(?config, "Loaded configuration");
        config
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("./cache"))
        .join(APP_NAME)
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!(key = key, value = %raw, error = %e, "Invalid value, using default");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.bind.to_string(), "127.0.0.1:8000");
        assert_eq!(config.attendance_url, ATTENDANCE_URL);
        assert_eq!(config.api_timeout, Duration::from_secs(API_REQUESTS_TIMEOUT_SECS));
        assert!(config.cache_dir.ends_with(APP_NAME));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("POMBOLA_BIND", "0.0.0.0:9000"),
            ("POMBOLA_ATTENDANCE_URL", "http://localhost:5000/attendance/"),
            ("POMBOLA_API_TIMEOUT_SECS", "3"),
            ("POMBOLA_CACHE_DIR", "/tmp/pombola-cache"),
            ("POMBOLA_LOG_DIR", "/var/log/pombola"),
        ]));
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.attendance_url, "http://localhost:5000/attendance/");
        assert_eq!(config.api_timeout, Duration::from_secs(3));
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/pombola-cache"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/pombola")));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("POMBOLA_BIND", "not an address"),
            ("POMBOLA_API_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(config.bind.to_string(), "127.0.0.1:8000");
        assert_eq!(config.api_timeout, Duration::from_secs(API_REQUESTS_TIMEOUT_SECS));
    }
}
