//! Language Parser Module
//!
//! Tree-sitter based Python parser producing the owned [`SyntaxTree`].
//!
//! ```rust,ignore
//! use pyanalyzer::analyzer::parser::{ParseResult, PythonParser};
//!
//! let parser = PythonParser::new()?;
//! match parser.parse("def f():\n    return 1")? {
//!     ParseResult::Success(tree) => println!("{} nodes", tree.node_count()),
//!     ParseResult::Failure(err) => println!("{}", err),
//! }
//! ```

mod checks;
pub mod python;

pub use python::PythonParser;

use crate::types::{AnalyzerError, Result, SourceLocation, SyntaxError, SyntaxTree};

// =============================================================================
// Parse Result
// =============================================================================

/// Outcome of parsing one source string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult {
    Success(SyntaxTree),
    Failure(SyntaxError),
}

impl ParseResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn tree(&self) -> Option<&SyntaxTree> {
        match self {
            Self::Success(tree) => Some(tree),
            Self::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&SyntaxError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err),
        }
    }

    /// Lift a failure into `AnalyzerError::Syntax` for `?`-style callers
    pub fn into_result(self) -> Result<SyntaxTree> {
        match self {
            Self::Success(tree) => Ok(tree),
            Self::Failure(err) => Err(AnalyzerError::Syntax(err)),
        }
    }
}

// =============================================================================
// Tree-sitter Helpers
// =============================================================================

/// Create a tree-sitter parser for the given language.
pub fn create_ts_parser<L: Into<tree_sitter::Language>>(
    language: L,
    lang_name: &str,
) -> Result<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language.into())
        .map_err(|e| AnalyzerError::Parser(format!("Failed to set {} language: {}", lang_name, e)))?;
    Ok(parser)
}

/// Extract text content from a tree-sitter node.
/// Returns empty string if extraction fails (with debug logging).
#[inline]
pub fn get_node_text<'a>(node: tree_sitter::Node, content: &'a [u8]) -> &'a str {
    node.utf8_text(content).unwrap_or_else(|e| {
        tracing::debug!(
            "UTF-8 extraction failed at {}:{}-{}:{}: {}",
            node.start_position().row + 1,
            node.start_position().column,
            node.end_position().row + 1,
            node.end_position().column,
            e
        );
        ""
    })
}

/// Start position of a tree-sitter node as a 1-based location.
#[inline]
pub fn node_location(node: tree_sitter::Node) -> SourceLocation {
    SourceLocation::from_point(node.start_position())
}

/// Children (named and anonymous) of a node, collected so the cursor can be dropped.
pub fn children_of<'t>(node: tree_sitter::Node<'t>) -> Vec<tree_sitter::Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// Named children of a node.
pub fn named_children_of<'t>(node: tree_sitter::Node<'t>) -> Vec<tree_sitter::Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}
