use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Structural counts for one parsed source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FeatureSummary {
    #[serde(rename = "functions")]
    pub function_count: u32,
    #[serde(rename = "loops")]
    pub loop_count: u32,
    #[serde(rename = "conditionals")]
    pub conditional_count: u32,
    #[serde(rename = "complexity")]
    pub cyclomatic_complexity: u32,
}

impl FeatureSummary {
    /// Flat key → count mapping, e.g. for dataset annotation
    pub fn to_map(&self) -> BTreeMap<&'static str, u32> {
        BTreeMap::from([
            ("functions", self.function_count),
            ("loops", self.loop_count),
            ("conditionals", self.conditional_count),
            ("complexity", self.cyclomatic_complexity),
        ])
    }
}

impl fmt::Display for FeatureSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "functions={} loops={} conditionals={} complexity={}",
            self.function_count, self.loop_count, self.conditional_count, self.cyclomatic_complexity
        )
    }
}
