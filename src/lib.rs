//! pyanalyzer - Python Code Structure Analyzer
//!
//! Parses student Python code and extracts structural features used to
//! study programming errors and misconceptions.
//!
//! ## Core Features
//!
//! - **Parsing**: tree-sitter Python grammar lowered into an owned syntax tree
//! - **Features**: function, loop and conditional counts plus cyclomatic complexity
//! - **Hints**: function names that disagree with the arithmetic they perform
//! - **Dataset**: labeled example samples with JSON persistence
//!
//! ## Quick Start
//!
//! ```ignore
//! use pyanalyzer::{CodeStructureAnalyzer, ParseResult};
//!
//! let analyzer = CodeStructureAnalyzer::new()?;
//! if let ParseResult::Success(tree) = analyzer.parse("def f():\n    pass\n")? {
//!     let features = analyzer.extract_features(&tree)?;
//!     assert_eq!(features.function_count, 1);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: Parsing, feature extraction, hints, file discovery
//! - [`dataset`]: Annotated samples and JSON persistence
//! - [`workspace`]: Project directory scaffolding
//! - [`config`]: Layered configuration

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod types;
pub mod workspace;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{AnalyzerError, Result, ResultExt, SourceLocation, SyntaxError};

// Data Types
pub use types::{
    AnnotatedRecord, AnnotatedSample, FeatureSummary, NodeKind, SkillLevel, SyntaxNode,
    SyntaxTree,
};

// =============================================================================
// Analyzer Re-exports
// =============================================================================

pub use analyzer::{
    AnalysisOutcome, CodeStructureAnalyzer, Hint, operator_hints,
    parser::{ParseResult, PythonParser},
    scanner::FileScanner,
};

pub use workspace::{ScaffoldReport, Workspace};
