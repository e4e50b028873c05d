//! Global Constants
//!
//! Centralized constants for configuration and defaults.

/// Source discovery constants
pub mod analysis {
    /// Default maximum file size for analysis (1MB)
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

    /// File extensions treated as Python source
    pub const PYTHON_EXTENSIONS: &[&str] = &["py", "pyw"];

    /// Directories skipped by default
    pub const DEFAULT_EXCLUDE: &[&str] = &[
        ".git/**",
        ".venv/**",
        "venv/**",
        "__pycache__/**",
        "build/**",
        "dist/**",
    ];
}

/// Project workspace layout
pub mod workspace {
    /// Directory holding raw, unlabeled student submissions
    pub const RAW_SAMPLES_DIR: &str = "data/raw_code_samples";

    /// Directory holding labeled datasets
    pub const ANNOTATED_DIR: &str = "data/annotated_dataset";

    /// Directories created by `init`, in creation order
    pub const DEFAULT_DIRECTORIES: &[&str] = &[RAW_SAMPLES_DIR, ANNOTATED_DIR, "src", "notebooks"];
}

/// Dataset defaults
pub mod dataset {
    /// Where the example dataset is written
    pub const DEFAULT_DATASET_PATH: &str = "data/annotated_dataset/example.json";
}

/// Configuration file locations
pub mod config {
    /// Per-project directory name
    pub const PROJECT_DIR: &str = ".pyanalyzer";

    /// Config file name inside global and project directories
    pub const CONFIG_FILE: &str = "config.toml";

    /// Environment variable prefix (`PYANALYZER_DATASET__PATH` → `dataset.path`)
    pub const ENV_PREFIX: &str = "PYANALYZER_";
}
