use crate::error::{Result, TedaError};
use std::path::PathBuf;

/// Where the board blob lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl StoreConfig {
    pub const DEFAULT_DATA_DIR: &'static str = ".teda";
    pub const DEFAULT_STORAGE_KEY: &'static str = "teda_todo_v1";
    pub const DATA_DIR_ENV: &'static str = "TEDA_DATA_DIR";
    pub const STORAGE_KEY_ENV: &'static str = "TEDA_STORAGE_KEY";

    pub fn new(data_dir: impl Into<PathBuf>, storage_key: impl Into<String>) -> Result<Self> {
        let config = Self {
            data_dir: data_dir.into(),
            storage_key: storage_key.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `TEDA_DATA_DIR` and `TEDA_STORAGE_KEY`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = lookup(Self::DATA_DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_DATA_DIR.to_string());
        let storage_key = lookup(Self::STORAGE_KEY_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_STORAGE_KEY.to_string());
        Self::new(data_dir, storage_key)
    }

    fn validate(&self) -> Result<()> {
        let key = self.storage_key.as_str();
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(TedaError::Config(format!(
                "storage key must be a plain name, got {key:?}"
            )));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(TedaError::Config("data directory is empty".to_string()));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
            storage_key: Self::DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.storage_key, "teda_todo_v1");
    }

    #[test]
    fn test_env_overrides() {
        let config = StoreConfig::from_lookup(|name| match name {
            "TEDA_DATA_DIR" => Some("/tmp/board".to_string()),
            "TEDA_STORAGE_KEY" => Some("work".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/board"));
        assert_eq!(config.storage_key, "work");
    }

    #[test]
    fn test_blank_env_uses_default() {
        let config = StoreConfig::from_lookup(|_| Some("  ".to_string())).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_rejects_path_like_key() {
        assert!(StoreConfig::new(".teda", "../board").is_err());
        assert!(StoreConfig::new(".teda", "").is_err());
        assert!(StoreConfig::new("", "board").is_err());
    }
}
