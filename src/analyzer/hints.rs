//! Educational Hints
//!
//! Flags functions whose name promises one arithmetic operation while the
//! body only performs others, e.g. `add_numbers` returning `a - b`.

use std::fmt;

use serde::Serialize;
use tree_sitter::{Query, QueryCursor, StreamingIterator};

use super::parser::{children_of, create_ts_parser, get_node_text, node_location};
use crate::types::{AnalyzerError, Result, SourceLocation};

const FUNCTION_QUERY: &str = r#"
    (function_definition
        name: (identifier) @name
        body: (block) @body
    )
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOp {
    fn from_operator(op: &str) -> Option<Self> {
        match op {
            "+" | "+=" => Some(Self::Add),
            "-" | "-=" => Some(Self::Subtract),
            "*" | "*=" => Some(Self::Multiply),
            "/" | "//" | "/=" | "//=" => Some(Self::Divide),
            _ => None,
        }
    }

    /// Operation a single lowercase name word promises, if any
    fn from_name_word(word: &str) -> Option<Self> {
        match word {
            "add" | "adds" | "addition" | "sum" | "plus" | "total" => Some(Self::Add),
            "sub" | "subtract" | "minus" | "diff" | "difference" => Some(Self::Subtract),
            "mul" | "mult" | "multiply" | "times" | "product" => Some(Self::Multiply),
            "div" | "divide" | "quotient" | "ratio" => Some(Self::Divide),
            _ => None,
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            Self::Add => "addition",
            Self::Subtract => "subtraction",
            Self::Multiply => "multiplication",
            Self::Divide => "division",
        }
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.noun())
    }
}

/// A prompt nudging the student to re-read their own function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hint {
    pub function: String,
    pub expected: ArithmeticOp,
    pub found: Vec<ArithmeticOp>,
    pub location: SourceLocation,
    pub message: String,
}

/// Split `add_numbers` / `addNumbers` into lowercase words
fn name_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in name.chars() {
        if ch == '_' || ch.is_ascii_digit() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase();
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn expected_operation(name: &str) -> Option<ArithmeticOp> {
    name_words(name)
        .iter()
        .find_map(|w| ArithmeticOp::from_name_word(w))
}

/// Arithmetic operators used directly in a function body, including
/// augmented assignments. Nested function definitions and lambdas are skipped.
fn body_operations(body: tree_sitter::Node, content: &[u8]) -> Vec<ArithmeticOp> {
    let mut found = Vec::new();
    let mut stack = vec![body];

    while let Some(node) = stack.pop() {
        match node.kind() {
            "function_definition" | "lambda" => continue,
            "binary_operator" | "augmented_assignment" => {
                if let Some(op) = node
                    .child_by_field_name("operator")
                    .and_then(|op| ArithmeticOp::from_operator(get_node_text(op, content)))
                    && !found.contains(&op)
                {
                    found.push(op);
                }
            }
            _ => {}
        }
        stack.extend(children_of(node).into_iter().rev());
    }

    found
}

fn describe(function: &str, found: &[ArithmeticOp]) -> String {
    let ops: Vec<&str> = found.iter().map(|op| op.noun()).collect();
    format!(
        "Your function is called '{}' but contains {}. Why might that be?",
        function,
        ops.join(" and ")
    )
}

/// Scan Python source for name/operator mismatches.
///
/// Works on partially invalid code too; only well-formed function
/// definitions are inspected.
pub fn operator_hints(source: &str) -> Result<Vec<Hint>> {
    let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
    let mut parser = create_ts_parser(language.clone(), "Python")?;
    let Some(tree) = parser.parse(source, None) else {
        return Ok(Vec::new());
    };

    let query = Query::new(&language, FUNCTION_QUERY)
        .map_err(|e| AnalyzerError::Parser(format!("Invalid hint query: {}", e)))?;
    let name_idx = query.capture_index_for_name("name");
    let body_idx = query.capture_index_for_name("body");

    let content = source.as_bytes();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), content);
    let mut hints = Vec::new();

    while let Some(m) = matches.next() {
        let mut name_node = None;
        let mut body_node = None;
        for cap in m.captures.iter() {
            if Some(cap.index) == name_idx {
                name_node = Some(cap.node);
            } else if Some(cap.index) == body_idx {
                body_node = Some(cap.node);
            }
        }
        let (Some(name_node), Some(body_node)) = (name_node, body_node) else {
            continue;
        };

        let name = get_node_text(name_node, content);
        let Some(expected) = expected_operation(name) else {
            continue;
        };

        let found = body_operations(body_node, content);
        if found.is_empty() || found.contains(&expected) {
            continue;
        }

        hints.push(Hint {
            function: name.to_string(),
            expected,
            message: describe(name, &found),
            found,
            location: node_location(name_node),
        });
    }

    Ok(hints)
}
