//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Error Kinds
//!
//! - **Syntax**: the input is not valid Python (expected, recoverable)
//! - **InvalidTree**: a tree that did not come from `parse` (caller defect)
//! - **Parser**: the grammar could not be loaded (environment problem)
//! - **System**: IO / JSON / config failures from the surrounding tooling
//!
//! A syntax error is normally delivered inside `ParseResult::Failure` rather
//! than as an `Err`; the `Syntax` variant exists for callers that prefer `?`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Source Location
// =============================================================================

/// 1-based line/column position in the source text
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Convert a 0-based tree-sitter point into a 1-based location
    pub fn from_point(point: tree_sitter::Point) -> Self {
        Self {
            line: point.row as u32 + 1,
            column: point.column as u32 + 1,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

// =============================================================================
// Syntax Error
// =============================================================================

/// Diagnostic for source text that does not parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Human-readable description, never empty
    pub message: String,
    /// Position of the first offending token, when known
    pub location: Option<SourceLocation>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, location: Option<SourceLocation>) -> Self {
        let message = message.into();
        Self {
            message: if message.trim().is_empty() {
                "invalid syntax".to_string()
            } else {
                message
            },
            location,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{} ({})", self.message, loc),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for SyntaxError {}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum AnalyzerError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Analysis Errors
    // -------------------------------------------------------------------------
    #[error("Syntax error: {0}")]
    Syntax(SyntaxError),

    /// Tree handed to feature extraction was not produced by `parse`
    #[error("Invalid syntax tree: {0}")]
    InvalidTree(String),

    /// Grammar could not be loaded into a tree-sitter parser
    #[error("Parser error: {0}")]
    Parser(String),

    // -------------------------------------------------------------------------
    // Tooling Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Dataset error in {path}: {message}")]
    Dataset { path: String, message: String },

    #[error("Workspace error: {0}")]
    Workspace(String),

    #[error("Path not found: {}", .0.display())]
    PathNotFound(std::path::PathBuf),
}

impl From<SyntaxError> for AnalyzerError {
    fn from(err: SyntaxError) -> Self {
        AnalyzerError::Syntax(err)
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

impl AnalyzerError {
    /// Create an invalid-tree error
    pub fn invalid_tree(reason: impl Into<String>) -> Self {
        Self::InvalidTree(reason.into())
    }

    /// Create a dataset error bound to a file path
    pub fn dataset(path: impl AsRef<std::path::Path>, message: impl Into<String>) -> Self {
        Self::Dataset {
            path: path.as_ref().display().to_string(),
            message: message.into(),
        }
    }
}

/// Context extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> Result<T>;

    /// Add context using a closure (lazy evaluation)
    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| AnalyzerError::Workspace(format!("{}: {}", context.into(), e)))
    }

    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| AnalyzerError::Workspace(format!("{}: {}", f().into(), e)))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display_with_location() {
        let err = SyntaxError::new("missing `)`", Some(SourceLocation::new(1, 9)));
        assert_eq!(err.to_string(), "missing `)` (line 1, column 9)");
    }

    #[test]
    fn test_syntax_error_never_empty() {
        let err = SyntaxError::new("   ", None);
        assert_eq!(err.message, "invalid syntax");
        assert_eq!(err.to_string(), "invalid syntax");
    }

    #[test]
    fn test_location_from_point_is_one_based() {
        let loc = SourceLocation::from_point(tree_sitter::Point { row: 0, column: 0 });
        assert_eq!(loc, SourceLocation::new(1, 1));
    }

    #[test]
    fn test_dataset_error_display() {
        let err = AnalyzerError::dataset("data/example.json", "not an array");
        assert_eq!(
            err.to_string(),
            "Dataset error in data/example.json: not an array"
        );
    }

    #[test]
    fn test_with_context() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = io.with_context("creating notebooks").unwrap_err();
        assert_eq!(err.to_string(), "Workspace error: creating notebooks: denied");
    }
}
