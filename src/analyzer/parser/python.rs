use tracing::debug;

use super::checks::first_violation;
use super::{
    ParseResult, children_of, create_ts_parser, get_node_text, named_children_of, node_location,
};
use crate::types::{
    NodeKind, Result, SourceLocation, SyntaxError, SyntaxNode, SyntaxTree, truncate_chars,
};

/// Longest source excerpt quoted in a diagnostic
const MAX_EXCERPT_CHARS: usize = 40;

/// Python parser backed by tree-sitter-python.
///
/// Holds only the grammar handle; every `parse` call builds its own
/// tree-sitter parser, so a `PythonParser` can be shared across threads.
#[derive(Clone)]
pub struct PythonParser {
    language: tree_sitter::Language,
}

impl PythonParser {
    pub fn new() -> Result<Self> {
        let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
        // Validate that the language is available
        let _ = create_ts_parser(language.clone(), "Python")?;
        Ok(Self { language })
    }

    /// Parse Python source into an owned syntax tree.
    ///
    /// Invalid Python is a normal outcome reported as `ParseResult::Failure`;
    /// `Err` is reserved for a parser that cannot be set up.
    pub fn parse(&self, content: &str) -> Result<ParseResult> {
        let mut parser = create_ts_parser(self.language.clone(), "Python")?;

        let Some(tree) = parser.parse(content, None) else {
            return Ok(ParseResult::Failure(SyntaxError::new(
                "parser gave up on this input",
                None,
            )));
        };

        let root = tree.root_node();
        if root.has_error() || root.is_error() {
            let error = diagnose(root, content);
            debug!("Python parse failed: {}", error);
            return Ok(ParseResult::Failure(error));
        }

        // tree-sitter tolerates bad indentation and Python 2 statements
        if let Some(error) = first_violation(root, content.as_bytes()) {
            debug!("Python 3 check failed: {}", error);
            return Ok(ParseResult::Failure(error));
        }

        Ok(ParseResult::Success(SyntaxTree::from_root(lower(root))))
    }
}

// =============================================================================
// Lowering
// =============================================================================

/// Map a tree-sitter node onto the kinds feature extraction distinguishes.
fn classify(node: tree_sitter::Node) -> NodeKind {
    match node.kind() {
        "module" => NodeKind::Module,
        "function_definition" if is_async(node) => NodeKind::AsyncFunctionDef,
        "function_definition" => NodeKind::FunctionDef,
        "for_statement" if is_async(node) => NodeKind::AsyncFor,
        "for_statement" => NodeKind::For,
        "while_statement" => NodeKind::While,
        // `elif` is a nested `if` in Python's own grammar
        "if_statement" | "elif_clause" => NodeKind::If,
        "except_clause" | "except_group_clause" => NodeKind::ExceptHandler,
        _ => NodeKind::Other,
    }
}

/// `async def` / `async for` carry the keyword as a direct anonymous child.
fn is_async(node: tree_sitter::Node) -> bool {
    children_of(node)
        .iter()
        .any(|child| !child.is_named() && child.kind() == "async")
}

fn frame(node: tree_sitter::Node<'_>) -> (SyntaxNode, std::vec::IntoIter<tree_sitter::Node<'_>>) {
    (
        SyntaxNode::new(classify(node), node_location(node)),
        named_children_of(node).into_iter(),
    )
}

/// Build the owned tree with an explicit stack; source nesting depth is
/// unbounded so recursion is not an option.
fn lower(root: tree_sitter::Node) -> SyntaxNode {
    let mut stack = vec![frame(root)];
    let mut finished = None;

    while let Some(mut top) = stack.pop() {
        if let Some(child) = top.1.next() {
            stack.push(top);
            stack.push(frame(child));
            continue;
        }
        match stack.last_mut() {
            Some(parent) => parent.0.children.push(top.0),
            None => finished = Some(top.0),
        }
    }

    finished.unwrap_or_else(|| SyntaxNode::new(NodeKind::Module, SourceLocation::new(1, 1)))
}

// =============================================================================
// Diagnostics
// =============================================================================

/// First ERROR or MISSING node in source order.
fn first_error_node(root: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            continue;
        }
        stack.extend(children_of(node).into_iter().rev());
    }
    None
}

/// Brackets that are never closed, closed by the wrong kind, or closed
/// without being opened. Inserted MISSING tokens are not source text and
/// are ignored.
fn bracket_error(root: tree_sitter::Node) -> Option<SyntaxError> {
    let mut open: Vec<tree_sitter::Node> = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.child_count() > 0 {
            stack.extend(children_of(node).into_iter().rev());
            continue;
        }
        if node.is_missing() {
            continue;
        }
        match node.kind() {
            "(" | "[" | "{" => open.push(node),
            closer @ (")" | "]" | "}") => match open.pop() {
                None => {
                    return Some(SyntaxError::new(
                        format!("unmatched '{}'", closer),
                        Some(node_location(node)),
                    ));
                }
                Some(opener) if !matches!((opener.kind(), closer), ("(", ")") | ("[", "]") | ("{", "}")) => {
                    return Some(SyntaxError::new(
                        format!(
                            "closing parenthesis '{}' does not match opening parenthesis '{}'",
                            closer,
                            opener.kind()
                        ),
                        Some(node_location(node)),
                    ));
                }
                Some(_) => {}
            },
            _ => {}
        }
    }

    open.pop().map(|opener| {
        SyntaxError::new(
            format!("'{}' was never closed", opener.kind()),
            Some(node_location(opener)),
        )
    })
}

/// Leaf of an ERROR node that best explains it: the first nested error or
/// MISSING leaf, otherwise the last token the parser could not place.
fn offending_leaf(error: tree_sitter::Node<'_>) -> tree_sitter::Node<'_> {
    let mut stack = children_of(error);
    stack.reverse();
    while let Some(node) = stack.pop() {
        if node.child_count() == 0 && (node.is_error() || node.is_missing()) {
            return node;
        }
        stack.extend(children_of(node).into_iter().rev());
    }

    let mut leaf = error;
    while let Some(last) = leaf.child(leaf.child_count().saturating_sub(1)) {
        leaf = last;
    }
    leaf
}

fn diagnose(root: tree_sitter::Node, content: &str) -> SyntaxError {
    if let Some(error) = bracket_error(root) {
        return error;
    }

    let Some(node) = first_error_node(root) else {
        return SyntaxError::new("invalid syntax", None);
    };
    let node = if node.is_error() {
        offending_leaf(node)
    } else {
        node
    };
    let location = Some(node_location(node));

    if node.is_missing() {
        return SyntaxError::new(format!("missing `{}`", node.kind()), location);
    }

    let excerpt = get_node_text(node, content.as_bytes())
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty());

    let message = match excerpt {
        Some(text) => format!(
            "invalid syntax near `{}`",
            truncate_chars(text, MAX_EXCERPT_CHARS)
        ),
        None => "unexpected end of input".to_string(),
    };
    SyntaxError::new(message, location)
}
