pub mod commands;
pub mod ui;

pub use ui::output::Output;

/// Rendering for command output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
