//! Code Structure Analyzer
//!
//! Parses Python source and derives simple structural metrics from the tree:
//! function, loop and conditional counts plus a simplified McCabe
//! cyclomatic complexity.
//!
//! Complexity is `1 + if/elif + for + while + except handlers`. Boolean
//! short-circuit operators, `match` arms and comprehension clauses do not
//! contribute.

use tracing::debug;

use super::parser::{ParseResult, PythonParser};
use crate::types::{AnalyzerError, FeatureSummary, NodeKind, Result, SyntaxError, SyntaxTree};

/// Outcome of analyzing one source string end to end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Features(FeatureSummary),
    SyntaxError(SyntaxError),
}

/// Per-kind tallies collected in a single traversal
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Tally {
    functions: u32,
    loops: u32,
    conditionals: u32,
    exception_handlers: u32,
}

impl Tally {
    fn record(&mut self, kind: NodeKind) {
        match kind {
            NodeKind::FunctionDef => self.functions += 1,
            NodeKind::For | NodeKind::While => self.loops += 1,
            NodeKind::If => self.conditionals += 1,
            NodeKind::ExceptHandler => self.exception_handlers += 1,
            NodeKind::Module
            | NodeKind::AsyncFunctionDef
            | NodeKind::AsyncFor
            | NodeKind::Other => {}
        }
    }

    fn into_summary(self) -> FeatureSummary {
        FeatureSummary {
            function_count: self.functions,
            loop_count: self.loops,
            conditional_count: self.conditionals,
            cyclomatic_complexity: 1 + self.conditionals + self.loops + self.exception_handlers,
        }
    }
}

/// Parses source text and extracts structural features
#[derive(Clone)]
pub struct CodeStructureAnalyzer {
    parser: PythonParser,
}

impl CodeStructureAnalyzer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: PythonParser::new()?,
        })
    }

    /// Parse source text. A syntax error is returned as
    /// `ParseResult::Failure`, not as `Err`.
    pub fn parse(&self, source: &str) -> Result<ParseResult> {
        self.parser.parse(source)
    }

    /// Walk every node of `tree` and tally the structural features.
    ///
    /// Fails with `AnalyzerError::InvalidTree` when the tree is not rooted at
    /// a module, or when a module appears below the root.
    pub fn extract_features(&self, tree: &SyntaxTree) -> Result<FeatureSummary> {
        let root = tree.root();
        if root.kind != NodeKind::Module {
            return Err(AnalyzerError::invalid_tree(format!(
                "root node is `{}`, expected `module`",
                root.kind
            )));
        }

        let mut tally = Tally::default();
        for node in tree.walk().skip(1) {
            if node.kind == NodeKind::Module {
                return Err(AnalyzerError::invalid_tree(format!(
                    "nested module at {}",
                    node.location
                )));
            }
            tally.record(node.kind);
        }

        let summary = tally.into_summary();
        debug!("Extracted features: {}", summary);
        Ok(summary)
    }

    /// Parse then extract in one call
    pub fn analyze_source(&self, source: &str) -> Result<AnalysisOutcome> {
        match self.parse(source)? {
            ParseResult::Success(tree) => {
                Ok(AnalysisOutcome::Features(self.extract_features(&tree)?))
            }
            ParseResult::Failure(err) => Ok(AnalysisOutcome::SyntaxError(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SourceLocation, SyntaxNode};
    use proptest::prelude::*;

    fn analyzer() -> CodeStructureAnalyzer {
        CodeStructureAnalyzer::new().unwrap()
    }

    fn features(source: &str) -> FeatureSummary {
        let analyzer = analyzer();
        let tree = analyzer.parse(source).unwrap().into_result().unwrap();
        analyzer.extract_features(&tree).unwrap()
    }

    fn exception_handlers(tree: &SyntaxTree) -> u32 {
        tree.walk()
            .filter(|n| n.kind == NodeKind::ExceptHandler)
            .count() as u32
    }

    #[test]
    fn test_single_function() {
        assert_eq!(
            features("def f():\n    return 1"),
            FeatureSummary {
                function_count: 1,
                loop_count: 0,
                conditional_count: 0,
                cyclomatic_complexity: 1,
            }
        );
    }

    #[test]
    fn test_unterminated_expression_is_failure() {
        let result = analyzer().parse("x = (1 +").unwrap();
        match result {
            ParseResult::Failure(err) => assert!(!err.message.is_empty()),
            ParseResult::Success(_) => panic!("expected a syntax error"),
        }
    }

    #[test]
    fn test_if_else() {
        let summary = features("if True:\n    pass\nelse:\n    pass");
        assert_eq!(summary.conditional_count, 1);
        assert_eq!(summary.cyclomatic_complexity, 2);
    }

    #[test]
    fn test_loop_with_nested_if() {
        let summary = features("for i in range(3):\n    if i:\n        pass");
        assert_eq!(summary.loop_count, 1);
        assert_eq!(summary.conditional_count, 1);
        assert_eq!(summary.cyclomatic_complexity, 3);
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(
            features(""),
            FeatureSummary {
                function_count: 0,
                loop_count: 0,
                conditional_count: 0,
                cyclomatic_complexity: 1,
            }
        );
    }

    #[test]
    fn test_each_handler_adds_one() {
        let one = features("try:\n    x = 1\nexcept ValueError:\n    x = 2\n");
        let two = features(
            "try:\n    x = 1\nexcept ValueError:\n    x = 2\nexcept KeyError:\n    x = 3\n",
        );
        assert_eq!(one.cyclomatic_complexity, 2);
        assert_eq!(two.cyclomatic_complexity, 3);
        assert_eq!(one.conditional_count, 0);
        assert_eq!(one.loop_count, 0);
    }

    #[test]
    fn test_while_and_methods() {
        let summary = features(
            "class Counter:\n    def __init__(self):\n        self.n = 0\n\n    def run(self):\n        while self.n < 3:\n            self.n += 1\n",
        );
        assert_eq!(summary.function_count, 2);
        assert_eq!(summary.loop_count, 1);
        assert_eq!(summary.cyclomatic_complexity, 2);
    }

    #[test]
    fn test_async_constructs_not_counted() {
        let summary = features("async def f(xs):\n    async for x in xs:\n        pass\n");
        assert_eq!(summary.function_count, 0);
        assert_eq!(summary.loop_count, 0);
        assert_eq!(summary.cyclomatic_complexity, 1);
    }

    #[test]
    fn test_boolean_operators_do_not_add_paths() {
        let summary = features("def f(a, b):\n    return a and b or not a\n");
        assert_eq!(summary.cyclomatic_complexity, 1);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let analyzer = analyzer();
        let tree = analyzer
            .parse("for x in y:\n    while x:\n        x -= 1\n")
            .unwrap()
            .into_result()
            .unwrap();
        let first = analyzer.extract_features(&tree).unwrap();
        let second = analyzer.extract_features(&tree).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_non_module_root() {
        let tree = SyntaxTree::from_root(SyntaxNode::new(NodeKind::If, SourceLocation::new(1, 1)));
        let err = analyzer().extract_features(&tree).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidTree(_)));
    }

    #[test]
    fn test_rejects_nested_module() {
        let loc = SourceLocation::new(1, 1);
        let tree = SyntaxTree::from_root(
            SyntaxNode::new(NodeKind::Module, loc)
                .with_children(vec![SyntaxNode::new(NodeKind::Module, loc)]),
        );
        let err = analyzer().extract_features(&tree).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidTree(_)));
    }

    #[test]
    fn test_analyze_source() {
        let analyzer = analyzer();
        assert!(matches!(
            analyzer.analyze_source("while True:\n    break\n").unwrap(),
            AnalysisOutcome::Features(FeatureSummary { loop_count: 1, .. })
        ));
        assert!(matches!(
            analyzer.analyze_source("def (").unwrap(),
            AnalysisOutcome::SyntaxError(_)
        ));
    }

    #[test]
    fn test_shared_across_threads() {
        let analyzer = std::sync::Arc::new(analyzer());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let analyzer = analyzer.clone();
                std::thread::spawn(move || {
                    let source = "if x:\n    pass\n".repeat(i + 1);
                    match analyzer.analyze_source(&source).unwrap() {
                        AnalysisOutcome::Features(f) => f.conditional_count,
                        AnalysisOutcome::SyntaxError(_) => u32::MAX,
                    }
                })
            })
            .collect();
        let counts: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(counts, vec![1, 2, 3, 4]);
    }

    /// One top-level statement drawn from the constructs the analyzer counts
    fn statement() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("x = 1\n"),
            Just("def f():\n    return 1\n"),
            Just("for i in range(3):\n    pass\n"),
            Just("while False:\n    pass\n"),
            Just("if x:\n    pass\nelif y:\n    pass\nelse:\n    pass\n"),
            Just("try:\n    pass\nexcept ValueError:\n    pass\nexcept KeyError:\n    pass\n"),
            Just("async def g():\n    pass\n"),
            Just("ys = [i for i in range(3) if i]\n"),
        ]
    }

    proptest! {
        #[test]
        fn prop_complexity_identity(stmts in proptest::collection::vec(statement(), 0..12)) {
            let analyzer = analyzer();
            let source = stmts.concat();
            let tree = analyzer.parse(&source).unwrap().into_result().unwrap();
            let summary = analyzer.extract_features(&tree).unwrap();

            prop_assert!(summary.cyclomatic_complexity >= 1);
            prop_assert_eq!(
                summary.cyclomatic_complexity,
                1 + summary.conditional_count + summary.loop_count + exception_handlers(&tree)
            );
            prop_assert_eq!(summary, analyzer.extract_features(&tree).unwrap());
        }
    }
}
