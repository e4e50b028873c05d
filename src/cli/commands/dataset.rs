//! Dataset Command
//!
//! Write the built-in example dataset, optionally annotated with features.

use std::path::{Path, PathBuf};

use crate::analyzer::CodeStructureAnalyzer;
use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::dataset::{annotate, example_samples, save_dataset};
use crate::types::Result;

pub fn run(output: Option<PathBuf>, annotated: bool) -> Result<()> {
    let config = ConfigLoader::load()?;
    let path = output.unwrap_or(config.dataset.path);

    let count = write_example_dataset(&path, annotated)?;
    Output::new().success(&format!(
        "Wrote {} samples to {}",
        count,
        path.display()
    ));
    Ok(())
}

/// Save the example samples to `path`; returns the number written
pub fn write_example_dataset(path: &Path, annotated: bool) -> Result<usize> {
    let samples = example_samples();
    if annotated {
        let analyzer = CodeStructureAnalyzer::new()?;
        let records = annotate(&analyzer, &samples)?;
        save_dataset(path, &records)?;
    } else {
        save_dataset(path, &samples)?;
    }
    Ok(samples.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::load_dataset;
    use tempfile::TempDir;

    #[test]
    fn test_write_plain_dataset() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data/annotated_dataset/example.json");

        assert_eq!(write_example_dataset(&path, false).unwrap(), 2);
        assert_eq!(load_dataset(&path).unwrap(), example_samples());
    }

    #[test]
    fn test_write_annotated_dataset() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("annotated.json");
        write_example_dataset(&path, true).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[0]["features"]["functions"], 1);
        assert_eq!(value[1]["features"]["complexity"], 1);

        // Annotated records still load as plain samples
        assert_eq!(load_dataset(&path).unwrap().len(), 2);
    }
}
