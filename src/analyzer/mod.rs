//! Code Analyzer Module
//!
//! Python structure analysis:
//! - Parsing into an owned syntax tree
//! - Structural feature extraction (functions, loops, conditionals, complexity)
//! - Name/operator mismatch hints
//! - Python file discovery

pub mod hints;
pub mod parser;
pub mod scanner;
pub mod structure;

pub use hints::{ArithmeticOp, Hint, operator_hints};
pub use structure::{AnalysisOutcome, CodeStructureAnalyzer};
