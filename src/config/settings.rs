//! Loading and saving of [`ReportConfig`] values.
//!
//! The config path is always an explicit parameter; as a library we never
//! guess platform directories on the caller's behalf.

use anyhow::Result;
use std::fs;
use std::path::Path;

use super::ReportConfig;

/// Loads a report configuration from `path`.
///
/// If the file doesn't exist, it creates a default one. If the file is
/// corrupted or cannot be parsed, it logs a warning and falls back to the
/// default configuration instead of failing.
pub fn load_config(path: &Path) -> Result<ReportConfig> {
    if !path.exists() {
        tracing::info!("Config file not found, creating default config at {:?}", path);
        let default_config = ReportConfig::default();
        save_config(path, &default_config)?;
        return Ok(default_config);
    }

    let config_content = fs::read_to_string(path)?;

    match serde_json::from_str::<ReportConfig>(&config_content) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", path);
            Ok(config)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse config file at {:?}: {}. Falling back to default config.",
                path,
                e
            );
            Ok(ReportConfig::default())
        }
    }
}

/// Saves the provided configuration to `path` as pretty-printed JSON,
/// creating missing parent directories.
pub fn save_config(path: &Path, config: &ReportConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
            tracing::info!("Created config directory: {:?}", parent);
        }
    }

    let config_json = serde_json::to_string_pretty(config)?;
    fs::write(path, config_json)?;
    tracing::info!("Saved config to {:?}", path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_helpers::setup_test_logging;

    #[test]
    fn test_save_and_load_round_trip() {
        setup_test_logging();
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("nested").join("config.json");

        let mut config = ReportConfig::default();
        config.max_files = 42;
        config.library_folders.insert("vendor".to_string());

        save_config(&config_path, &config).unwrap();
        let loaded = load_config(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_creates_default() {
        setup_test_logging();
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("config.json");

        let loaded = load_config(&config_path).unwrap();
        assert_eq!(loaded, ReportConfig::default());
        assert!(config_path.exists());
    }

    #[test]
    fn test_load_corrupt_file_falls_back_to_default() {
        setup_test_logging();
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("config.json");
        fs::write(&config_path, "{ not json").unwrap();

        let loaded = load_config(&config_path).unwrap();
        assert_eq!(loaded, ReportConfig::default());
    }
}
