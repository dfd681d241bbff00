//! Configuration for axmode.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.axmode/config.toml`
//! - The role table used to classify focused elements
//! - Runtime switches for navigation remapping and diagnostics
//!
//! # Configuration File
//!
//! ```toml
//! log_level = "info"
//!
//! # Pause before a cursor write that follows a text write
//! settle_delay_ms = 15
//!
//! [roles]
//! text = ["AXTextField", "AXTextArea", "AXComboBox"]
//! table = ["AXTable", "AXButton", "AXOutline"]
//! scroll = ["AXGroup"]
//!
//! [navigation]
//! enabled = true
//! left = "h"
//! down = "j"
//! up = "k"
//! right = "l"
//!
//! [diagnostics]
//! attributed_text = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Settling delay in milliseconds
    pub settle_delay_ms: u64,
    /// Focus-watch polling interval in milliseconds
    pub watch_interval_ms: u64,
    /// Show the consent prompt when checking accessibility access
    pub prompt_for_access: bool,
    /// Set AXManualAccessibility on newly frontmost applications
    pub manual_accessibility: bool,
    pub roles: RoleConfig,
    pub navigation: NavigationConfig,
    pub diagnostics: DiagnosticsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            settle_delay_ms: 15,
            watch_interval_ms: 250,
            prompt_for_access: true,
            manual_accessibility: false,
            roles: RoleConfig::default(),
            navigation: NavigationConfig::default(),
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}

/// Raw role identifiers per capability class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    pub text: Vec<String>,
    pub table: Vec<String>,
    pub scroll: Vec<String>,
}

impl Default for RoleConfig {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self {
            text: owned(&["AXTextField", "AXTextArea", "AXComboBox"]),
            table: owned(&["AXTable", "AXButton", "AXOutline"]),
            scroll: owned(&["AXGroup"]),
        }
    }
}

/// Arrow-key remapping for list-like and scroll elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub enabled: bool,
    pub left: char,
    pub down: char,
    pub up: char,
    pub right: char,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            left: 'h',
            down: 'j',
            up: 'k',
            right: 'l',
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Log the attributed-string representation on every text pull
    pub attributed_text: bool,
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Self {
        match Self::get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_toml_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<(), String> {
        let path = Self::get_config_path().ok_or("Could not determine config path")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        fs::write(path, content).map_err(|e| format!("Failed to write config: {}", e))?;
        Ok(())
    }

    /// Directory holding the config file and log
    pub fn config_dir() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".axmode"))
    }

    fn get_config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.watch_interval_ms)
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}
