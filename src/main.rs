use clap::{Parser, Subcommand};
use pyanalyzer::cli::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pyanalyzer")]
#[command(
    version,
    about = "Structural feature extraction for student Python code"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write project config and create the workspace directories
    Init {
        #[arg(long, short, help = "Overwrite existing project config")]
        force: bool,
    },

    /// Write the built-in example dataset
    Dataset {
        #[arg(long, short, help = "Output file (default: dataset.path from config)")]
        output: Option<PathBuf>,
        #[arg(long, help = "Include extracted features for each sample")]
        annotate: bool,
    },

    /// Extract structural features from a file or directory
    Analyze {
        #[arg(help = "Python file or directory")]
        path: PathBuf,
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Analyze a sample student submission and show hints
    Demo,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show configuration file paths
    Path,
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mpyanalyzer encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Init { force } => {
            pyanalyzer::cli::commands::init::run(force)?;
        }
        Commands::Dataset { output, annotate } => {
            pyanalyzer::cli::commands::dataset::run(output, annotate)?;
        }
        Commands::Analyze { path, format } => {
            pyanalyzer::cli::commands::analyze::run(path, format)?;
        }
        Commands::Demo => {
            pyanalyzer::cli::commands::demo::run()?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                pyanalyzer::cli::commands::config::show(format)?;
            }
            ConfigAction::Path => {
                pyanalyzer::cli::commands::config::path()?;
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = Cli::try_parse_from(["pyanalyzer", "analyze", "x.py", "--format", "yaml"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["pyanalyzer", "config", "show", "-f", "yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_format_is_accepted() {
        let cli = Cli::try_parse_from(["pyanalyzer", "analyze", "x.py", "-f", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Analyze {
                format: OutputFormat::Json,
                ..
            }
        ));

        let cli = Cli::try_parse_from(["pyanalyzer", "analyze", "x.py"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Analyze {
                format: OutputFormat::Text,
                ..
            }
        ));
    }
}
