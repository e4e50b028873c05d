//! Analyze Command
//!
//! Extracts structural features from a Python file or every Python file
//! under a directory. Files with syntax errors are reported and skipped.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::analyzer::scanner::FileScanner;
use crate::analyzer::{AnalysisOutcome, CodeStructureAnalyzer};
use crate::cli::{Output, OutputFormat};
use crate::config::{Config, ConfigLoader};
use crate::types::{AnalyzerError, FeatureSummary, Result};

/// Result for a single file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn run(path: PathBuf, format: OutputFormat) -> Result<()> {
    if !path.exists() {
        return Err(AnalyzerError::PathNotFound(path));
    }

    let config = ConfigLoader::load()?;
    let reports = analyze_path(&path, &config)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    let out = Output::new();
    if reports.is_empty() {
        out.warning(&format!("No Python files found in {}", path.display()));
        return Ok(());
    }

    for report in &reports {
        match (&report.features, &report.error) {
            (Some(features), _) => {
                out.success(&report.path.display().to_string());
                out.features(features);
            }
            (None, Some(error)) => {
                out.error(&format!("{}: {}", report.path.display(), error));
            }
            (None, None) => {}
        }
    }

    let failed = reports.iter().filter(|r| r.error.is_some()).count();
    println!();
    println!(
        "Analyzed {} files ({} with errors)",
        reports.len(),
        failed
    );

    Ok(())
}

/// Analyze every Python file reachable from `root`
pub fn analyze_path(root: &Path, config: &Config) -> Result<Vec<FileReport>> {
    let files = FileScanner::new(root)
        .with_exclude(config.analysis.exclude.clone())
        .with_max_file_size(config.analysis.max_file_size)
        .scan()?;
    debug!("Found {} Python files under {}", files.len(), root.display());

    let analyzer = CodeStructureAnalyzer::new()?;
    let mut reports = Vec::with_capacity(files.len());

    for file in files {
        debug!("Analyzing {} ({} bytes)", file.path.display(), file.size);
        let content = match fs::read_to_string(&file.path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Skipping unreadable file {}: {}", file.path.display(), e);
                reports.push(FileReport {
                    path: file.path,
                    features: None,
                    error: Some(e.to_string()),
                });
                continue;
            }
        };

        let report = match analyzer.analyze_source(&content)? {
            AnalysisOutcome::Features(features) => FileReport {
                path: file.path,
                features: Some(features),
                error: None,
            },
            AnalysisOutcome::SyntaxError(err) => FileReport {
                path: file.path,
                features: None,
                error: Some(err.to_string()),
            },
        };
        reports.push(report);
    }

    Ok(reports)
}
