//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/pyanalyzer/config.toml)
//! 3. Project config (.pyanalyzer/config.toml)
//! 4. Environment variables (PYANALYZER_* prefix, `__` between nested keys)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::constants::config::{CONFIG_FILE, ENV_PREFIX, PROJECT_DIR};
use crate::types::{AnalyzerError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for the current directory:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_for(Path::new("."))
    }

    /// Load configuration for the project rooted at `project_root`
    pub fn load_for(project_root: &Path) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Merge global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        // Merge project config
        let project_path = Self::project_config_path(project_root);
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // Merge environment variables (e.g., PYANALYZER_DATASET__PATH -> dataset.path)
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| AnalyzerError::Config(format!("Configuration error: {}", e)))?;

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| AnalyzerError::Config(format!("Configuration error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/pyanalyzer/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("pyanalyzer"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join(CONFIG_FILE))
    }

    /// Get path to project config file
    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_DIR).join(CONFIG_FILE)
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path(project_root: &Path) {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path(project_root);
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Render a configuration as TOML or JSON
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| AnalyzerError::Config(e.to_string()))
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write the default project config. Existing files are kept unless
    /// `force` is set. Returns the config file path.
    pub fn init_project(project_root: &Path, force: bool) -> Result<PathBuf> {
        let config_path = Self::project_config_path(project_root);
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_project_config())?;
            info!("Created project config: {}", config_path.display());
        } else {
            info!("Project config exists: {}", config_path.display());
        }

        Ok(config_path)
    }

    /// Check if project is initialized
    pub fn is_project_initialized(project_root: &Path) -> bool {
        Self::project_config_path(project_root).exists()
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Generate default project config content (TOML)
    fn default_project_config() -> String {
        r#"# pyanalyzer Project Configuration
# Settings here override ~/.config/pyanalyzer/config.toml.

version = "1.0"

# Directories created by `pyanalyzer init`
[workspace]
directories = [
    "data/raw_code_samples",
    "data/annotated_dataset",
    "src",
    "notebooks",
]

# Example dataset output
[dataset]
path = "data/annotated_dataset/example.json"

# Source discovery for `pyanalyzer analyze`
[analysis]
exclude = [".git/**", ".venv/**", "venv/**", "__pycache__/**", "build/**", "dist/**"]
max_file_size = 1048576
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_without_project_config() {
        let temp = TempDir::new().unwrap();
        let config = ConfigLoader::load_for(temp.path()).unwrap();
        assert_eq!(config.version, "1.0");
    }

    #[test]
    fn test_init_project_writes_loadable_config() {
        let temp = TempDir::new().unwrap();
        let path = ConfigLoader::init_project(temp.path(), false).unwrap();

        assert!(path.exists());
        assert!(ConfigLoader::is_project_initialized(temp.path()));

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.workspace.directories.len(), 4);
        assert_eq!(config.analysis.max_file_size, 1_048_576);
    }

    #[test]
    fn test_init_project_keeps_existing_without_force() {
        let temp = TempDir::new().unwrap();
        let path = ConfigLoader::init_project(temp.path(), false).unwrap();
        fs::write(&path, "[dataset]\npath = \"custom.json\"\n").unwrap();

        ConfigLoader::init_project(temp.path(), false).unwrap();
        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.dataset.path, PathBuf::from("custom.json"));

        ConfigLoader::init_project(temp.path(), true).unwrap();
        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(
            config.dataset.path,
            PathBuf::from("data/annotated_dataset/example.json")
        );
    }

    #[test]
    fn test_project_config_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = ConfigLoader::project_config_path(temp.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[workspace]\ndirectories = [\"samples\"]\n").unwrap();

        let config = ConfigLoader::load_for(temp.path()).unwrap();
        assert_eq!(config.workspace.directories, vec![PathBuf::from("samples")]);
    }

    #[test]
    fn test_invalid_file_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        fs::write(&path, "[analysis]\nmax_file_size = 0\n").unwrap();
        assert!(matches!(
            ConfigLoader::load_from_file(&path),
            Err(AnalyzerError::Config(_))
        ));
    }

    #[test]
    fn test_render_formats() {
        let config = Config::default();
        let toml_text = ConfigLoader::render(&config, false).unwrap();
        assert!(toml_text.contains("[dataset]"));
        let json_text = ConfigLoader::render(&config, true).unwrap();
        assert!(json_text.contains("\"max_file_size\""));
    }
}
