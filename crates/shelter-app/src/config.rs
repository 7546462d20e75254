//! Dashboard configuration
//!
//! Loaded from an optional JSON file, then overridden by
//! `SHELTERDASH_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    Memory,
    Sqlite,
}

/// Configuration for one dashboard run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Which record store to open
    pub backend: StoreBackend,

    /// Path of the SQLite store file (sqlite backend only)
    pub store_path: PathBuf,

    /// Collection holding the animal records
    pub collection: String,

    /// Optional shelter CSV export imported when the store is empty
    pub seed_csv: Option<PathBuf>,

    /// Window title
    pub window_title: String,

    /// Rows per table page
    pub page_size: usize,

    pub dark_mode: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            store_path: PathBuf::from("data/shelter.db"),
            collection: "animals".to_string(),
            seed_csv: None,
            window_title: "Rescue Animal Interactive Dashboard".to_string(),
            page_size: 10,
            dark_mode: true,
        }
    }
}

impl DashboardConfig {
    /// Load from a JSON file when given, then apply env overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("failed to parse config {}", path.display()))?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        debug!(?config, "configuration resolved");
        Ok(config)
    }

    /// Apply environment-style overrides from any lookup function
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("SHELTERDASH_STORE") {
            self.backend = StoreBackend::Sqlite;
            self.store_path = PathBuf::from(path);
        }
        if let Some(collection) = var("SHELTERDASH_COLLECTION") {
            self.collection = collection;
        }
        if let Some(path) = var("SHELTERDASH_SEED_CSV") {
            self.seed_csv = Some(PathBuf::from(path));
        }
        if let Some(size) = var("SHELTERDASH_PAGE_SIZE") {
            if let Ok(size) = size.parse::<usize>() {
                self.page_size = size.max(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_the_memory_backend() {
        let config = DashboardConfig::default();

        assert_eq!(config.backend, StoreBackend::Memory);
        assert_eq!(config.collection, "animals");
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn overrides_switch_to_sqlite() {
        let mut config = DashboardConfig::default();

        config.apply_overrides(|key| match key {
            "SHELTERDASH_STORE" => Some("data/aac.db".to_string()),
            "SHELTERDASH_COLLECTION" => Some("outcomes".to_string()),
            _ => None,
        });

        assert_eq!(config.backend, StoreBackend::Sqlite);
        assert_eq!(config.store_path, PathBuf::from("data/aac.db"));
        assert_eq!(config.collection, "outcomes");
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = DashboardConfig::default();
        let text = serde_json::to_string(&config).unwrap();
        let parsed: DashboardConfig = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed.collection, config.collection);
        assert_eq!(parsed.backend, config.backend);
    }
}
