pub mod error;
pub mod features;
pub mod sample;
pub mod syntax;
pub mod utils;

pub use error::{AnalyzerError, Result, ResultExt, SourceLocation, SyntaxError};
pub use features::FeatureSummary;
pub use sample::{AnnotatedRecord, AnnotatedSample, SkillLevel};
pub use syntax::{NodeKind, SyntaxNode, SyntaxTree, Walk};
pub use utils::{log_filter_warn, truncate_chars};
