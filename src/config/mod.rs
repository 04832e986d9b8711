// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/emergencia

//! Configuration module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the append-only logs
    pub data_dir: PathBuf,

    /// Log level used when no CLI flag overrides it
    pub log_level: String,

    /// Alert channel configuration
    pub alert: AlertConfig,

    /// Audit log configuration
    pub audit: AuditConfig,

    /// Health-center directory configuration
    pub directory: DirectoryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            log_level: "warn".to_string(),
            alert: AlertConfig::default(),
            audit: AuditConfig::default(),
            directory: DirectoryConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("emergencia"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Resolve a log file name against the data directory
    pub fn data_path(&self, file: impl AsRef<Path>) -> PathBuf {
        self.data_dir.join(file)
    }
}

/// Delivery medium used for alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// Full alert record sent to the emergency dispatch service
    Dispatch,
    /// Voice call to the emergency number
    Call,
}

/// Alert channel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub channel: AlertKind,

    /// Number the simulated responder connection dials
    pub emergency_number: String,

    /// Simulated connection setup time in milliseconds
    pub connect_delay_ms: u64,

    /// Alert trail file name, relative to the data directory
    pub trail_file: String,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            channel: AlertKind::Dispatch,
            emergency_number: "112".to_string(),
            connect_delay_ms: 1500,
            trail_file: "emergency_alerts.log".to_string(),
        }
    }
}

/// Audit log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Event history file name, relative to the data directory
    pub history_file: String,

    /// Feedback history file name, relative to the data directory
    pub feedback_file: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            history_file: "emergency_history.log".to_string(),
            feedback_file: "user_feedback.log".to_string(),
        }
    }
}

/// Health-center directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// JSON file with the center records
    pub path: PathBuf,

    /// Locations containing this text (case-insensitive) get the directory offer
    pub region: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("resources/CentrosdeSaludMurcia.json"),
            region: "murcia".to_string(),
        }
    }
}
