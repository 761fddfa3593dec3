//! Configuration management for Tome.
//!
//! Parses `tome.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `content.source_dir`
//! - `content.manifest_name`
//! - `content.languages`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override the selected languages.
    pub languages: Option<Vec<String>>,
    /// Override whether warnings fail validation.
    pub deny_warnings: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tome.toml";

/// Default language manifest filename.
const DEFAULT_MANIFEST_NAME: &str = "language.yaml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Validation configuration.
    pub validation: ValidationConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
    manifest_name: Option<String>,
    languages: Option<Vec<String>>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Directory holding one subdirectory per language.
    pub source_dir: PathBuf,
    /// Manifest filename inside each language directory.
    pub manifest_name: String,
    /// Languages to load, in this order. `None` loads every language found.
    pub languages: Option<Vec<String>>,
}

/// Validation configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Treat warnings as failures.
    pub deny_warnings: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.source_dir`").
        field: String,
        /// Error message (e.g., "${`CONTENT_ROOT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tome.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The merged result
    /// is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.content_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(languages) = &settings.languages {
            self.content_resolved.languages = Some(languages.clone());
        }
        if let Some(deny_warnings) = settings.deny_warnings {
            self.validation.deny_warnings = deny_warnings;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            validation: ValidationConfig::default(),
            content_resolved: ContentConfig {
                source_dir: base.join("content"),
                manifest_name: DEFAULT_MANIFEST_NAME.to_owned(),
                languages: None,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_manifest_name()?;
        self.validate_languages()?;
        Ok(())
    }

    /// The manifest name must be a plain filename.
    fn validate_manifest_name(&self) -> Result<(), ConfigError> {
        let name = &self.content_resolved.manifest_name;
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "content.manifest_name cannot be empty".to_owned(),
            ));
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ConfigError::Validation(format!(
                "content.manifest_name must be a plain file name, got '{name}'"
            )));
        }
        Ok(())
    }

    /// Selected languages must be slugs and listed once.
    fn validate_languages(&self) -> Result<(), ConfigError> {
        let Some(languages) = &self.content_resolved.languages else {
            return Ok(());
        };

        for (i, language) in languages.iter().enumerate() {
            if !tome_corpus::is_slug(language) {
                return Err(ConfigError::Validation(format!(
                    "content.languages: '{language}' is not a valid language id"
                )));
            }
            if languages[..i].contains(language) {
                return Err(ConfigError::Validation(format!(
                    "content.languages: '{language}' is listed more than once"
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let content = &mut self.content;

        if let Some(source_dir) = &content.source_dir {
            content.source_dir = Some(expand::expand_env(source_dir, "content.source_dir")?);
        }
        if let Some(manifest_name) = &content.manifest_name {
            content.manifest_name =
                Some(expand::expand_env(manifest_name, "content.manifest_name")?);
        }
        if let Some(languages) = &mut content.languages {
            for (i, language) in languages.iter_mut().enumerate() {
                *language = expand::expand_env(language, &format!("content.languages[{i}]"))?;
            }
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.content_resolved = ContentConfig {
            source_dir: config_dir.join(self.content.source_dir.as_deref().unwrap_or("content")),
            manifest_name: self
                .content
                .manifest_name
                .clone()
                .unwrap_or_else(|| DEFAULT_MANIFEST_NAME.to_owned()),
            languages: self.content.languages.clone(),
        };
    }
}
