//! Officeholder position lookup.
//!
//! Position rows belong to the site's relational store. The attendance
//! dashboard only needs one query from it, so that query is expressed as the
//! `PositionStore` trait. `JsonPositionStore` serves it from a JSON export of
//! the position table.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::models::Position;

/// Title slug prefixes of ministerial positions
pub const MINISTER_TITLE_PREFIXES: &[&str] = &["minister", "deputy-minister"];

pub trait PositionStore {
    /// Positions whose title slug starts with any of `prefixes` and that
    /// were active at some point during `year`.
    fn active_during_year(&self, prefixes: &[&str], year: i32) -> Result<Vec<Position>>;
}

#[derive(Debug, Deserialize)]
struct PositionsFile {
    #[serde(default)]
    positions: Vec<Position>,
}

#[derive(Debug, Clone, Default)]
pub struct JsonPositionStore {
    positions: Vec<Position>,
}

impl JsonPositionStore {
    pub fn new(positions: Vec<Position>) -> Self {
        Self { positions }
    }

    /// Load positions from a `{"positions": [...]}` file. A missing file
    /// gives an empty store so the dashboard still renders (everyone shows
    /// as an MP).
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "No positions file, treating every member as an MP");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read positions file {}", path.display()))?;
        let file: PositionsFile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse positions file {}", path.display()))?;

        debug!(path = %path.display(), count = file.positions.len(), "Loaded positions");
        Ok(Self::new(file.positions))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl PositionStore for JsonPositionStore {
    fn active_during_year(&self, prefixes: &[&str], year: i32) -> Result<Vec<Position>> {
        Ok(self
            .positions
            .iter()
            .filter(|p| p.has_title_slug_prefix(prefixes) && p.is_active_during_year(year))
            .cloned()
            .collect())
    }
}
