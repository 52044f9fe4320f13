//! Path management for FinanzCLI
//!
//! ## Path Resolution Order
//!
//! 1. `FINANZ_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory (`~/.config/finanz-cli` on Linux,
//!    `~/Library/Application Support/finanz-cli` on macOS, `%APPDATA%` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::FinanzError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FINANZ_CLI_DATA_DIR";

/// Manages all paths used by FinanzCLI
#[derive(Debug, Clone)]
pub struct FinanzPaths {
    /// Base directory for all FinanzCLI files
    base_dir: PathBuf,
}

impl FinanzPaths {
    /// Create a new FinanzPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FinanzError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "finanz-cli")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    FinanzError::Config("Could not determine a home directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create FinanzPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the persisted session (tokens and user profile)
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Get the path to the debug log
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("finanz.log")
    }

    /// Get the directory downloads and exports are written to
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), FinanzError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FinanzError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir())
            .map_err(|e| FinanzError::Io(format!("Failed to create export directory: {}", e)))?;

        Ok(())
    }
}
