//! Init Command
//!
//! Write the project config and scaffold the workspace directories.

use std::path::Path;

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::types::Result;
use crate::workspace::{ScaffoldReport, Workspace};

pub fn run(force: bool) -> Result<()> {
    let root = std::env::current_dir()?;
    let report = init_at(&root, force)?;

    let out = Output::new();
    out.success("Initialized pyanalyzer in .pyanalyzer/");
    for dir in &report.created {
        out.field("created", dir.display());
    }
    for dir in &report.existing {
        out.field("exists", dir.display());
    }
    println!();
    println!("Next steps:");
    println!("  1. Put student submissions in data/raw_code_samples/");
    println!("  2. Run 'pyanalyzer dataset --annotate' to write the example dataset");

    Ok(())
}

/// Initialize `root`; the config is re-read so project overrides apply to
/// the scaffolded layout.
pub fn init_at(root: &Path, force: bool) -> Result<ScaffoldReport> {
    ConfigLoader::init_project(root, force)?;
    let config = ConfigLoader::load_for(root)?;
    Workspace::from_config(root, &config).create()
}
