//! Python 3 Conformance Checks
//!
//! tree-sitter-python recovers from indentation mistakes without leaving
//! ERROR nodes and still accepts Python 2 statements. These checks run over
//! an error-free tree and reject the constructs CPython's parser rejects.

use tree_sitter::Node;

use super::{children_of, get_node_text, named_children_of, node_location};
use crate::types::{SourceLocation, SyntaxError};

const TAB_WIDTH: usize = 8;

/// Statements that own an indented block
const COMPOUND_STATEMENTS: &[&str] = &[
    "if_statement",
    "for_statement",
    "while_statement",
    "try_statement",
    "with_statement",
    "function_definition",
    "class_definition",
    "decorated_definition",
    "match_statement",
];

/// Clauses that continue a compound statement on their own line
const CONTINUATION_CLAUSES: &[&str] = &[
    "elif_clause",
    "else_clause",
    "except_clause",
    "except_group_clause",
    "finally_clause",
];

/// Earliest violation in source order, if any
pub(super) fn first_violation(root: Node, content: &[u8]) -> Option<SyntaxError> {
    let mut earliest: Option<SyntaxError> = None;
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if let Some(err) = check_node(node, content)
            && earliest
                .as_ref()
                .is_none_or(|current| err.location < current.location)
        {
            earliest = Some(err);
        }
        stack.extend(children_of(node).into_iter().rev());
    }

    earliest
}

fn at(node: Node, message: impl Into<String>) -> Option<SyntaxError> {
    Some(SyntaxError::new(message, Some(node_location(node))))
}

fn check_node(node: Node, content: &[u8]) -> Option<SyntaxError> {
    match node.kind() {
        "print_statement" => at(
            node,
            "Missing parentheses in call to 'print'. Did you mean print(...)?",
        ),
        "exec_statement" => at(
            node,
            "Missing parentheses in call to 'exec'. Did you mean exec(...)?",
        ),
        "chevron" => at(node, "`>>` redirection is Python 2 print syntax"),
        "module" => check_module(node, content),
        "block" => check_block(node, content),
        kind if CONTINUATION_CLAUSES.contains(&kind) => check_clause(node, content),
        "integer" => check_integer(node, content),
        "expression_statement" => named_children_of(node)
            .into_iter()
            .find(|child| child.kind() == "named_expression")
            .and_then(|child| at(child, "assignment expression `:=` must be parenthesized here")),
        "assignment" | "augmented_assignment" => node
            .child_by_field_name("right")
            .filter(|right| right.kind() == "named_expression")
            .and_then(|right| at(right, "assignment expression `:=` must be parenthesized here")),
        "parameters" | "lambda_parameters" => check_parameter_order(node),
        "for_in_clause" => check_comprehension_iterable(node),
        "delete_statement" => check_delete_targets(node),
        "comparison_operator" => unnamed_child(node, "<>")
            .and_then(|op| at(op, "`<>` is not a Python 3 operator; use `!=`")),
        _ => None,
    }
}

fn unnamed_child<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    children_of(node)
        .into_iter()
        .find(|child| !child.is_named() && child.kind() == kind)
}

// =============================================================================
// Indentation
// =============================================================================

fn is_trivia(node: &Node) -> bool {
    matches!(node.kind(), "comment" | "line_continuation")
}

/// Width of the whitespace before `node` on its line, tabs expanded to the
/// next multiple of eight.
fn indentation(node: Node, content: &[u8]) -> usize {
    let start = node.start_byte();
    let line_start = start.saturating_sub(node.start_position().column);
    content
        .get(line_start..start)
        .unwrap_or_default()
        .iter()
        .fold(0, |width, byte| match byte {
            b'\t' => (width / TAB_WIDTH + 1) * TAB_WIDTH,
            b'\x0c' => 0,
            _ => width + 1,
        })
}

/// Statements that begin their own line, each paired with the statement
/// before it.
fn line_starts<'t>(container: Node<'t>) -> Vec<(Node<'t>, Option<Node<'t>>)> {
    let mut starts = Vec::new();
    let mut previous: Option<Node<'t>> = None;

    for child in named_children_of(container) {
        if is_trivia(&child) {
            continue;
        }
        let own_line = previous
            .is_none_or(|prev| child.start_position().row > prev.end_position().row);
        if own_line {
            starts.push((child, previous));
        }
        previous = Some(child);
    }
    starts
}

fn indent_mismatch(
    stmt: Node,
    previous: Option<Node>,
    width: usize,
    expected: usize,
) -> Option<SyntaxError> {
    let closes_block = previous.is_some_and(|prev| COMPOUND_STATEMENTS.contains(&prev.kind()));
    if width > expected && !closes_block {
        at(stmt, "unexpected indent")
    } else {
        at(stmt, "unindent does not match any outer indentation level")
    }
}

fn check_module(module: Node, content: &[u8]) -> Option<SyntaxError> {
    line_starts(module)
        .into_iter()
        .find_map(|(stmt, previous)| {
            let width = indentation(stmt, content);
            (width != 0)
                .then(|| indent_mismatch(stmt, previous, width, 0))
                .flatten()
        })
}

fn header_name(kind: &str) -> &'static str {
    match kind {
        "if_statement" => "'if' statement",
        "elif_clause" => "'elif' statement",
        "else_clause" => "'else' statement",
        "for_statement" => "'for' statement",
        "while_statement" => "'while' statement",
        "try_statement" => "'try' statement",
        "except_clause" | "except_group_clause" => "'except' statement",
        "finally_clause" => "'finally' statement",
        "with_statement" => "'with' statement",
        "match_statement" => "'match' statement",
        "case_clause" => "'case' statement",
        "function_definition" => "function definition",
        "class_definition" => "class definition",
        _ => "statement",
    }
}

fn check_block(block: Node, content: &[u8]) -> Option<SyntaxError> {
    let header = block.parent()?;
    let colon = children_of(header)
        .into_iter()
        .rev()
        .find(|child| child.kind() == ":" && child.end_byte() <= block.start_byte());

    let expected_block = || {
        let line = header.start_position().row as u32 + 1;
        let next_line = colon.map_or(line, |c| c.end_position().row as u32 + 1) + 1;
        Some(SyntaxError::new(
            format!(
                "expected an indented block after {} on line {}",
                header_name(header.kind()),
                line
            ),
            Some(SourceLocation::new(next_line, 1)),
        ))
    };

    let starts = line_starts(block);
    let Some(&(first, _)) = starts.first() else {
        return expected_block();
    };

    // `if x: pass` keeps its body on the header line
    if colon.is_some_and(|c| first.start_position().row == c.end_position().row) {
        return None;
    }

    let header_width = indentation(header, content);
    let expected = indentation(first, content);
    if expected <= header_width {
        return expected_block();
    }

    starts.into_iter().skip(1).find_map(|(stmt, previous)| {
        let width = indentation(stmt, content);
        (width != expected)
            .then(|| indent_mismatch(stmt, previous, width, expected))
            .flatten()
    })
}

fn check_clause(clause: Node, content: &[u8]) -> Option<SyntaxError> {
    if clause.kind() == "except_clause"
        && let Some(comma) = unnamed_child(clause, ",")
    {
        return at(comma, "multiple exception types must be parenthesized");
    }

    let owner = clause.parent()?;
    let own_line = clause
        .prev_sibling()
        .is_some_and(|prev| clause.start_position().row > prev.end_position().row);
    if own_line && indentation(clause, content) != indentation(owner, content) {
        let keyword = clause.child(0).map_or("clause", |k| k.kind());
        return at(
            clause,
            format!("`{}` does not line up with the statement it belongs to", keyword),
        );
    }
    None
}

// =============================================================================
// Literals and Expressions
// =============================================================================

fn check_integer(node: Node, content: &[u8]) -> Option<SyntaxError> {
    let text = get_node_text(node, content).to_ascii_lowercase();

    if text.ends_with('l') {
        return at(node, "Python 2 long integer suffix `L` is not valid");
    }
    if text.ends_with('_') || text.contains("__") {
        return at(node, "invalid decimal literal");
    }
    if ["0x", "0o", "0b"].iter().any(|prefix| text.starts_with(prefix)) || text.ends_with('j') {
        return None;
    }

    let digits: String = text.chars().filter(|c| *c != '_').collect();
    if digits.len() > 1 && digits.starts_with('0') && digits.chars().any(|c| c != '0') {
        return at(
            node,
            "leading zeros in decimal integer literals are not permitted; use an 0o prefix for octal integers",
        );
    }
    None
}

/// Positional parameters may not follow a defaulted one until `*` or
/// `*args` opens the keyword-only section.
fn check_parameter_order(params: Node) -> Option<SyntaxError> {
    let mut seen_default = false;
    let mut keyword_only = false;

    for param in named_children_of(params) {
        let inner = param.named_child(0).map_or("", |n| n.kind());
        match (param.kind(), inner) {
            ("default_parameter" | "typed_default_parameter", _) => seen_default = true,
            ("list_splat_pattern" | "keyword_separator", _)
            | ("typed_parameter", "list_splat_pattern") => keyword_only = true,
            ("typed_parameter", "dictionary_splat_pattern") => {}
            ("identifier" | "typed_parameter" | "tuple_pattern", _)
                if seen_default && !keyword_only =>
            {
                return at(
                    param,
                    "parameter without a default follows parameter with a default",
                );
            }
            _ => {}
        }
    }
    None
}

/// `(x for x in a, b)` parses as an iterable list in tree-sitter; Python
/// requires a single expression there.
fn check_comprehension_iterable(clause: Node) -> Option<SyntaxError> {
    let comma = unnamed_child(clause, ",")?;
    let generator_argument = clause.parent().is_some_and(|parent| {
        parent.kind() == "generator_expression"
            && parent.parent().is_some_and(|call| call.kind() == "call")
    });

    if generator_argument {
        let generator = clause.parent()?;
        at(generator, "Generator expression must be parenthesized")
    } else {
        at(comma, "comprehension iterable must be parenthesized")
    }
}

fn check_delete_targets(statement: Node) -> Option<SyntaxError> {
    let mut stack: Vec<Node> = named_children_of(statement)
        .into_iter()
        .filter(|n| !is_trivia(n))
        .collect();

    while let Some(target) = stack.pop() {
        match target.kind() {
            "identifier" | "attribute" | "subscript" => {}
            "expression_list" | "tuple" | "list" | "parenthesized_expression" => stack.extend(
                named_children_of(target)
                    .into_iter()
                    .filter(|n| !is_trivia(n)),
            ),
            "call" => return at(target, "cannot delete function call"),
            "integer" | "float" | "string" | "concatenated_string" | "true" | "false"
            | "none" => return at(target, "cannot delete literal"),
            _ => return at(target, "cannot delete expression"),
        }
    }
    None
}
