//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/pyanalyzer/) and project (.pyanalyzer/) level configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants;
use crate::types::{AnalyzerError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Directory scaffolding
    pub workspace: WorkspaceConfig,

    /// Example dataset output
    pub dataset: DatasetConfig,

    /// Source discovery for `analyze`
    pub analysis: AnalysisConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            workspace: WorkspaceConfig::default(),
            dataset: DatasetConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `AnalyzerError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.workspace.directories.is_empty() {
            return Err(AnalyzerError::Config(
                "workspace.directories must list at least one directory".to_string(),
            ));
        }

        if let Some(dir) = self
            .workspace
            .directories
            .iter()
            .find(|d| d.as_os_str().is_empty() || d.is_absolute())
        {
            return Err(AnalyzerError::Config(format!(
                "workspace.directories entries must be non-empty relative paths, got {:?}",
                dir
            )));
        }

        if self.dataset.path.as_os_str().is_empty() {
            return Err(AnalyzerError::Config(
                "dataset.path must not be empty".to_string(),
            ));
        }

        if self.analysis.max_file_size == 0 {
            return Err(AnalyzerError::Config(
                "analysis.max_file_size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Workspace Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Directories to create, relative to the project root
    pub directories: Vec<PathBuf>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            directories: constants::workspace::DEFAULT_DIRECTORIES
                .iter()
                .map(PathBuf::from)
                .collect(),
        }
    }
}

// =============================================================================
// Dataset Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Output file for the example dataset (relative to the project root)
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(constants::dataset::DEFAULT_DATASET_PATH),
        }
    }
}

// =============================================================================
// Analysis Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Glob patterns to exclude, relative to the scanned root
    pub exclude: Vec<String>,

    /// Maximum file size in bytes
    pub max_file_size: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            exclude: constants::analysis::DEFAULT_EXCLUDE
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_file_size: constants::analysis::DEFAULT_MAX_FILE_SIZE,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
