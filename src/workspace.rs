//! Workspace Scaffolding
//!
//! Creates the project directory layout (raw samples, annotated datasets,
//! source and notebooks) under a project root.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;
use crate::types::{AnalyzerError, Result, ResultExt};

/// Directory layout rooted at a project directory
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    directories: Vec<PathBuf>,
}

/// What `Workspace::create` did, in layout order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub created: Vec<PathBuf>,
    pub existing: Vec<PathBuf>,
}

impl ScaffoldReport {
    pub fn is_unchanged(&self) -> bool {
        self.created.is_empty()
    }
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>, directories: Vec<PathBuf>) -> Self {
        Self {
            root: root.into(),
            directories,
        }
    }

    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Self {
        Self::new(root, config.workspace.directories.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Create every directory of the layout. Safe to run repeatedly.
    pub fn create(&self) -> Result<ScaffoldReport> {
        if self.root.exists() && !self.root.is_dir() {
            return Err(AnalyzerError::Workspace(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }

        let mut report = ScaffoldReport::default();
        for relative in &self.directories {
            let path = self.root.join(relative);
            if path.is_dir() {
                debug!("Directory exists: {}", path.display());
                report.existing.push(relative.clone());
                continue;
            }

            fs::create_dir_all(&path)
                .with_context_fn(|| format!("Failed to create {}", path.display()))?;
            info!("Created directory: {}", path.display());
            report.created.push(relative.clone());
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_default_layout() {
        let temp = TempDir::new().unwrap();
        let workspace = Workspace::from_config(temp.path(), &Config::default());

        let report = workspace.create().unwrap();
        assert_eq!(report.created.len(), 4);
        assert!(report.existing.is_empty());
        assert!(temp.path().join("data/raw_code_samples").is_dir());
        assert!(temp.path().join("data/annotated_dataset").is_dir());
        assert!(temp.path().join("src").is_dir());
        assert!(temp.path().join("notebooks").is_dir());
    }

    #[test]
    fn test_create_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let workspace = Workspace::from_config(temp.path(), &Config::default());

        workspace.create().unwrap();
        let second = workspace.create().unwrap();
        assert!(second.is_unchanged());
        assert_eq!(second.existing.len(), 4);
    }

    #[test]
    fn test_create_reports_partial_layout() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();

        let workspace = Workspace::new(
            temp.path(),
            vec![PathBuf::from("src"), PathBuf::from("notebooks")],
        );
        let report = workspace.create().unwrap();
        assert_eq!(report.created, vec![PathBuf::from("notebooks")]);
        assert_eq!(report.existing, vec![PathBuf::from("src")]);
    }

    #[test]
    fn test_root_must_be_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let workspace = Workspace::new(&file, vec![PathBuf::from("src")]);
        assert!(matches!(
            workspace.create(),
            Err(AnalyzerError::Workspace(_))
        ));
    }
}
