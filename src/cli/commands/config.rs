//! Config Command
//!
//! Inspect pyanalyzer configuration.
//!
//! Usage:
//!   pyanalyzer config show [-f json]
//!   pyanalyzer config path

use crate::cli::OutputFormat;
use crate::config::ConfigLoader;
use crate::types::Result;

/// Show the merged effective configuration
pub fn show(format: OutputFormat) -> Result<()> {
    let config = ConfigLoader::load()?;
    println!(
        "{}",
        ConfigLoader::render(&config, format == OutputFormat::Json)?
    );
    Ok(())
}

/// Show configuration paths
pub fn path() -> Result<()> {
    let root = std::env::current_dir()?;
    ConfigLoader::show_path(&root);
    Ok(())
}
