//! Annotated Dataset
//!
//! Built-in example samples, JSON persistence and annotation of samples with
//! the structural features the analyzer extracts.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::analyzer::{AnalysisOutcome, CodeStructureAnalyzer};
use crate::types::{AnalyzerError, AnnotatedRecord, AnnotatedSample, Result, SkillLevel};

/// The two hand-labeled samples shipped with the tool
pub fn example_samples() -> Vec<AnnotatedSample> {
    vec![
        AnnotatedSample::new(
            "def my_function():\n    x=10\n    return x\n\nprint(x)",
            SkillLevel::Beginner,
        )
        .with_error_type("NameError")
        .with_misconception("variable_scope"),
        AnnotatedSample::new(
            "def modify_list(lst):\n    lst.append(4)\n    return lst\n\noriginal=[1,2,3]\nnew_list=modify_list(original)\nprint(original)",
            SkillLevel::Intermediate,
        )
        .with_misconception("mutability_confusion"),
    ]
}

/// Write samples as a pretty-printed JSON array, creating parent directories
pub fn save_dataset<T: serde::Serialize>(path: &Path, samples: &[T]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(samples)?;
    fs::write(path, json)?;
    info!("Saved {} samples to {}", samples.len(), path.display());
    Ok(())
}

/// Read a JSON array of samples
pub fn load_dataset(path: &Path) -> Result<Vec<AnnotatedSample>> {
    let content = fs::read_to_string(path)?;
    let samples: Vec<AnnotatedSample> =
        serde_json::from_str(&content).map_err(|e| AnalyzerError::dataset(path, e.to_string()))?;
    debug!("Loaded {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

/// Run the analyzer over each sample.
///
/// Samples that do not parse keep their diagnostic in `syntax_error`; they
/// never abort the batch.
pub fn annotate(
    analyzer: &CodeStructureAnalyzer,
    samples: &[AnnotatedSample],
) -> Result<Vec<AnnotatedRecord>> {
    samples
        .iter()
        .map(|sample| {
            let record = match analyzer.analyze_source(&sample.code)? {
                AnalysisOutcome::Features(features) => AnnotatedRecord {
                    sample: sample.clone(),
                    features: Some(features),
                    syntax_error: None,
                },
                AnalysisOutcome::SyntaxError(err) => {
                    warn!("Sample does not parse: {}", err);
                    AnnotatedRecord {
                        sample: sample.clone(),
                        features: None,
                        syntax_error: Some(err.to_string()),
                    }
                }
            };
            Ok(record)
        })
        .collect()
}
