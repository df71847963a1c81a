//! File loading helpers.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::StoreError;

// ============================================================================
// Default Paths
// ============================================================================

/// Returns the default configuration directory.
///
/// - macOS: `~/Library/Application Support/LaptOptimus`
/// - Linux: `~/.config/laptoptimus`
/// - Windows: `%APPDATA%\laptoptimus`
pub fn default_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support").join("LaptOptimus"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    #[cfg(not(target_os = "macos"))]
    {
        dirs::config_dir()
            .map(|c| c.join("laptoptimus"))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Returns the default settings file path.
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join("settings.json")
}

// ============================================================================
// File Operations
// ============================================================================

/// Loads data from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not decode as `T`.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    debug!(path = %path.display(), "Loading JSON file");

    let content = tokio::fs::read_to_string(path).await?;
    let data = serde_json::from_str(&content)?;

    debug!(path = %path.display(), "JSON file loaded");
    Ok(data)
}

/// Loads data from a JSON file, returning the default if the file is absent.
///
/// Only a missing file falls back; unreadable or malformed files are errors.
///
/// # Errors
///
/// Returns an error for any failure other than a missing file.
pub async fn load_json_or_default<T: DeserializeOwned + Default>(
    path: &Path,
) -> Result<T, StoreError> {
    match load_json(path).await {
        Ok(data) => Ok(data),
        Err(e) if e.is_not_found() => {
            debug!(path = %path.display(), "File not found, using defaults");
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        #[serde(default)]
        name: String,
    }

    #[test]
    fn test_default_config_dir() {
        let path = default_config_dir();
        assert!(!path.as_os_str().is_empty());
    }

    #[test]
    fn test_default_settings_path() {
        let path = default_settings_path();
        assert!(path.ends_with("settings.json"));
    }

    #[tokio::test]
    async fn test_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample.json");
        tokio::fs::write(&path, r#"{"name": "eMAG"}"#).await.unwrap();

        let loaded: Sample = load_json(&path).await.unwrap();
        assert_eq!(loaded.name, "eMAG");
    }

    #[tokio::test]
    async fn test_load_nonexistent_file() {
        let path = PathBuf::from("/nonexistent/path/settings.json");

        let result: Result<Sample, _> = load_json(&path).await;
        assert!(result.unwrap_err().is_not_found());

        let loaded: Sample = load_json_or_default(&path).await.unwrap();
        assert_eq!(loaded, Sample::default());
    }

    #[tokio::test]
    async fn test_malformed_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let result: Result<Sample, _> = load_json_or_default(&path).await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
