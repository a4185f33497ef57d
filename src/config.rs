//! Configuration file handling for provisioning runs.
//!
//! Every field has a default that matches a stock Raspberry Pi OS image, so
//! a config file is only needed to point pbl at different tools or a
//! different install root (e.g. `pip3`, or a scratch directory for testing).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ProvisionError, Result};

/// Provisioning configuration that can be saved/loaded as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvisionConfig {
    /// Shared root that downloaded examples and tools are placed under.
    pub install_root: PathBuf,
    /// OS package manager executable.
    pub system_package_manager: String,
    /// Python package manager executable.
    pub language_package_manager: String,
    /// Hardware-configuration utility executable.
    pub interface_tool: String,
    /// Python interpreter used by import checks.
    pub python: String,
    /// Where extra apt source lists are written.
    pub apt_sources_dir: PathBuf,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            install_root: PathBuf::from("/opt"),
            system_package_manager: "apt-get".to_string(),
            language_package_manager: "pip".to_string(),
            interface_tool: "raspi-config".to_string(),
            python: "python3".to_string(),
            apt_sources_dir: PathBuf::from("/etc/apt/sources.list.d"),
        }
    }
}

impl ProvisionConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;
        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| {
            ProvisionError::config(format!(
                "Failed to read configuration from {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;

        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (field, path) in [
            ("install_root", &self.install_root),
            ("apt_sources_dir", &self.apt_sources_dir),
        ] {
            if !path.is_absolute() {
                return Err(ProvisionError::config(format!(
                    "{} must be an absolute path, got {:?}",
                    field, path
                )));
            }
        }

        let programs = [
            ("system_package_manager", &self.system_package_manager),
            ("language_package_manager", &self.language_package_manager),
            ("interface_tool", &self.interface_tool),
            ("python", &self.python),
        ];
        for (field, value) in programs {
            if value.trim().is_empty() {
                return Err(ProvisionError::config(format!("{} must not be empty", field)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ProvisionConfig::default();
        assert_eq!(config.install_root, PathBuf::from("/opt"));
        assert_eq!(config.system_package_manager, "apt-get");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_relative_install_root_rejected() {
        let config = ProvisionConfig {
            install_root: PathBuf::from("opt"),
            ..ProvisionConfig::default()
        };
        assert!(matches!(config.validate(), Err(ProvisionError::Config(_))));
    }

    #[test]
    fn test_empty_program_rejected() {
        let config = ProvisionConfig {
            language_package_manager: "  ".to_string(),
            ..ProvisionConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("language_package_manager"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pbl.json");
        fs::write(&path, r#"{ "language_package_manager": "pip3" }"#).unwrap();

        let config = ProvisionConfig::load_from_file(&path).unwrap();
        assert_eq!(config.language_package_manager, "pip3");
        assert_eq!(config.interface_tool, "raspi-config");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pbl.json");
        fs::write(&path, r#"{ "instal_root": "/srv" }"#).unwrap();

        assert!(matches!(
            ProvisionConfig::load_from_file(&path),
            Err(ProvisionError::Json(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pbl.json");
        let config = ProvisionConfig {
            install_root: PathBuf::from("/srv/pbl"),
            ..ProvisionConfig::default()
        };
        config.save_to_file(&path).unwrap();
        assert_eq!(ProvisionConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = ProvisionConfig::load_from_file("/nonexistent/pbl.json");
        assert!(matches!(result, Err(ProvisionError::Config(_))));
    }
}
