//! Demo Command
//!
//! Runs the analyzer over a small student submission with a bug and prints
//! the structural features alongside any hints.

use crate::analyzer::{AnalysisOutcome, CodeStructureAnalyzer, Hint, operator_hints};
use crate::cli::Output;
use crate::types::Result;

/// Student code used by the demo: `add_numbers` subtracts
pub const DEMO_SNIPPET: &str = "
def add_numbers(a, b):
    return a - b   # subtraction instead of addition
print(add_numbers(3, 2))
";

#[derive(Debug)]
pub struct DemoReport {
    pub source: &'static str,
    pub outcome: AnalysisOutcome,
    pub hints: Vec<Hint>,
}

pub fn run() -> Result<()> {
    let report = build_report()?;
    let out = Output::new();

    out.header("Student code");
    for line in report.source.trim_matches('\n').lines() {
        println!("  {}", line);
    }

    out.section("Structural features");
    match &report.outcome {
        AnalysisOutcome::Features(features) => out.features(features),
        AnalysisOutcome::SyntaxError(err) => out.error(&err.to_string()),
    }

    out.section("Hints");
    if report.hints.is_empty() {
        out.info("Nothing suspicious found");
    }
    for hint in &report.hints {
        out.warning(&format!("{} ({})", hint.message, hint.location));
    }

    Ok(())
}

pub fn build_report() -> Result<DemoReport> {
    let analyzer = CodeStructureAnalyzer::new()?;
    Ok(DemoReport {
        source: DEMO_SNIPPET,
        outcome: analyzer.analyze_source(DEMO_SNIPPET)?,
        hints: operator_hints(DEMO_SNIPPET)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::ArithmeticOp;

    #[test]
    fn test_demo_report() {
        let report = build_report().unwrap();

        let AnalysisOutcome::Features(features) = report.outcome else {
            panic!("demo snippet should parse");
        };
        assert_eq!(features.function_count, 1);
        assert_eq!(features.cyclomatic_complexity, 1);

        assert_eq!(report.hints.len(), 1);
        let hint = &report.hints[0];
        assert_eq!(hint.function, "add_numbers");
        assert_eq!(hint.expected, ArithmeticOp::Add);
        assert_eq!(hint.found, vec![ArithmeticOp::Subtract]);
        assert_eq!(hint.location.line, 2);
        assert_eq!(
            hint.message,
            "Your function is called 'add_numbers' but contains subtraction. Why might that be?"
        );
    }
}
