//! Owned Syntax Tree
//!
//! Read-only tree produced by the Python parser. Nodes own their children;
//! only the node kinds that feature extraction cares about get their own
//! variant, everything else is `Other`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::SourceLocation;

/// Node kind relevant to structural analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Root of a parsed file
    Module,
    FunctionDef,
    AsyncFunctionDef,
    For,
    AsyncFor,
    While,
    /// `if` statement or one of its `elif` branches
    If,
    /// `except` / `except*` clause
    ExceptHandler,
    Other,
}

impl NodeKind {
    pub fn is_loop(&self) -> bool {
        matches!(self, Self::For | Self::While)
    }

    /// Whether the node adds an independent path for cyclomatic complexity
    pub fn is_branch(&self) -> bool {
        matches!(
            self,
            Self::If | Self::For | Self::While | Self::ExceptHandler
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Module => "module",
            Self::FunctionDef => "function_def",
            Self::AsyncFunctionDef => "async_function_def",
            Self::For => "for",
            Self::AsyncFor => "async_for",
            Self::While => "while",
            Self::If => "if",
            Self::ExceptHandler => "except_handler",
            Self::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// A node and the subtree it owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub location: SourceLocation,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, location: SourceLocation) -> Self {
        Self {
            kind,
            location,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    /// Pre-order iterator over this node and all descendants
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Parsed module ready for traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    root: SyntaxNode,
}

impl SyntaxTree {
    /// Wrap a root node. No validation happens here; feature extraction
    /// rejects roots that are not a `Module`.
    pub fn from_root(root: SyntaxNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn walk(&self) -> Walk<'_> {
        self.root.walk()
    }

    pub fn node_count(&self) -> usize {
        self.walk().count()
    }
}

/// Explicit-stack traversal so deeply nested input cannot overflow
pub struct Walk<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: NodeKind, line: u32) -> SyntaxNode {
        SyntaxNode::new(kind, SourceLocation::new(line, 1))
    }

    #[test]
    fn test_walk_is_preorder() {
        let root = leaf(NodeKind::Module, 1).with_children(vec![
            leaf(NodeKind::FunctionDef, 1).with_children(vec![leaf(NodeKind::If, 2)]),
            leaf(NodeKind::While, 4),
        ]);
        let kinds: Vec<NodeKind> = root.walk().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Module,
                NodeKind::FunctionDef,
                NodeKind::If,
                NodeKind::While
            ]
        );
    }

    #[test]
    fn test_node_count() {
        let tree = SyntaxTree::from_root(
            leaf(NodeKind::Module, 1).with_children(vec![leaf(NodeKind::Other, 1)]),
        );
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn test_branch_kinds() {
        assert!(NodeKind::If.is_branch());
        assert!(NodeKind::ExceptHandler.is_branch());
        assert!(!NodeKind::FunctionDef.is_branch());
        assert!(!NodeKind::AsyncFor.is_loop());
        assert!(NodeKind::While.is_loop());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(NodeKind::ExceptHandler.to_string(), "except_handler");
        assert_eq!(NodeKind::Module.to_string(), "module");
    }
}
