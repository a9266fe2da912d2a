use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

/// Distinguishes temp files written concurrently by this process
static WRITE_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        let now = Utc::now();
        (now - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache directory {}", cache_dir.display()))?;
        Ok(Self { cache_dir })
    }

    /// Open (creating if needed) the named region.
    pub fn region(&self, name: &str) -> Result<CacheRegion> {
        let dir = self.cache_dir.join(sanitize(name));
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create cache region {}", name))?;
        Ok(CacheRegion {
            name: name.to_string(),
            dir,
        })
    }
}

/// A named group of cache entries keyed by arbitrary strings (usually URLs).
#[derive(Debug, Clone)]
pub struct CacheRegion {
    name: String,
    dir: PathBuf,
}

impl CacheRegion {
    fn cache_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", encode_key(key)))
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<CachedData<T>>> {
        let path = self.cache_path(key);
        if !path.exists() {
            debug!(region = %self.name, key = key, "Cache miss");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache entry: {}", key))?;

        let cached: CachedData<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache entry: {}", key))?;

        debug!(region = %self.name, key = key, age = %cached.age_display(), "Cache hit");
        Ok(Some(cached))
    }

    /// Write an entry. Readers see either the old or the new file, never a
    /// partial one.
    pub fn set<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let cached = CachedData::new(data);
        let path = self.cache_path(key);
        let contents = serde_json::to_string(&cached)?;

        let tmp = path.with_extension(format!(
            "{}.{}.tmp",
            std::process::id(),
            WRITE_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        std::fs::write(&tmp, contents)
            .with_context(|| format!("Failed to write cache entry: {}", key))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to store cache entry: {}", key))?;

        debug!(region = %self.name, key = key, "Cache set");
        Ok(())
    }
}

/// File name for an entry key: the key's bytes in lowercase hex, so distinct
/// keys never share a file.
fn encode_key(key: &str) -> String {
    key.bytes().map(|b| format!("{:02x}", b)).collect()
}

/// Map a region name onto a directory-safe string
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
