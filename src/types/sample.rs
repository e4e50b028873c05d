//! Annotated Student Samples
//!
//! Records pairing a piece of student code with the errors it raises, the
//! misconceptions it illustrates and the author's skill level.

use serde::{Deserialize, Serialize};

use super::features::FeatureSummary;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkillLevel::Beginner => write!(f, "beginner"),
            SkillLevel::Intermediate => write!(f, "intermediate"),
            SkillLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl std::str::FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "advanced" => Ok(SkillLevel::Advanced),
            _ => Err(format!(
                "Unknown skill level: {}. Valid values: beginner, intermediate, advanced",
                s
            )),
        }
    }
}

/// One labeled code sample
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnnotatedSample {
    pub code: String,
    #[serde(default)]
    pub error_types: Vec<String>,
    #[serde(default)]
    pub misconceptions: Vec<String>,
    #[serde(default)]
    pub skill_level: SkillLevel,
}

impl AnnotatedSample {
    pub fn new(code: impl Into<String>, skill_level: SkillLevel) -> Self {
        Self {
            code: code.into(),
            error_types: Vec::new(),
            misconceptions: Vec::new(),
            skill_level,
        }
    }

    pub fn with_error_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_types.push(error_type.into());
        self
    }

    pub fn with_misconception(mut self, misconception: impl Into<String>) -> Self {
        self.misconceptions.push(misconception.into());
        self
    }
}

/// A sample plus what the analyzer made of it.
///
/// Exactly one of `features` / `syntax_error` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnnotatedRecord {
    #[serde(flatten)]
    pub sample: AnnotatedSample,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax_error: Option<String>,
}
