//! Configuration handling for the intake wizard

use anyhow::Result;
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the export directory
pub const EXPORT_DIR_ENV: &str = "INTAKE_EXPORT_DIR";

const DEFAULT_SUBMIT_DELAY_MS: u64 = 1500;
const DEFAULT_VERIFICATION_DELAY_MS: u64 = 500;
const DEFAULT_UPLOAD_DURATION_MS: u64 = 1200;

/// User configuration for the wizard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct IntakeConfig {
    /// Where summary exports are written
    pub export_dir: Option<PathBuf>,
    /// Simulated submission latency
    pub submit_delay_ms: Option<u64>,
    /// Simulated verification email latency
    pub verification_delay_ms: Option<u64>,
    /// Length of the upload progress indicator
    pub upload_duration_ms: Option<u64>,
}

impl IntakeConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "accreditation", "intake-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: IntakeConfig = serde_json::from_str(&content)?;
                tracing::debug!("Loaded config from {}", path.display());
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms.unwrap_or(DEFAULT_SUBMIT_DELAY_MS))
    }

    pub fn verification_delay(&self) -> Duration {
        Duration::from_millis(
            self.verification_delay_ms
                .unwrap_or(DEFAULT_VERIFICATION_DELAY_MS),
        )
    }

    pub fn upload_duration(&self) -> Duration {
        Duration::from_millis(self.upload_duration_ms.unwrap_or(DEFAULT_UPLOAD_DURATION_MS))
    }

    /// Export directory: environment, then config file, then the user's
    /// download folder, then the working directory.
    pub fn export_dir(&self) -> PathBuf {
        self.resolve_export_dir(std::env::var_os(EXPORT_DIR_ENV).map(PathBuf::from))
    }

    fn resolve_export_dir(&self, env_override: Option<PathBuf>) -> PathBuf {
        env_override
            .or_else(|| self.export_dir.clone())
            .or_else(|| UserDirs::new().and_then(|dirs| dirs.download_dir().map(PathBuf::from)))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IntakeConfig::default();
        assert!(config.export_dir.is_none());
        assert_eq!(config.submit_delay(), Duration::from_millis(1500));
        assert_eq!(config.verification_delay(), Duration::from_millis(500));
        assert_eq!(config.upload_duration(), Duration::from_millis(1200));
    }

    #[test]
    fn test_serialization() {
        let config = IntakeConfig {
            export_dir: Some(PathBuf::from("/tmp/exports")),
            submit_delay_ms: Some(10),
            verification_delay_ms: Some(20),
            upload_duration_ms: Some(30),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: IntakeConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, config);
        assert_eq!(parsed.submit_delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: IntakeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, IntakeConfig::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"submit_delay_ms": 5, "unknown_field": "value"}"#;
        let parsed: IntakeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.submit_delay_ms, Some(5));
    }

    #[test]
    fn test_env_override_wins() {
        let config = IntakeConfig {
            export_dir: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_export_dir(Some(PathBuf::from("/from/env"))),
            PathBuf::from("/from/env")
        );
        assert_eq!(
            config.resolve_export_dir(None),
            PathBuf::from("/from/config")
        );
    }

    #[test]
    fn test_load_returns_ok() {
        assert!(IntakeConfig::load().is_ok());
    }
}
