//! Configuration management for djangify.
//!
//! Parses `djangify.toml` configuration files with serde and provides
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
//! - `convert.base_dir`
//! - `convert.output_dir`
//! - `convert.app_name`
//! - `convert.encoding`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the directory holding the HTML files.
    pub base_dir: Option<PathBuf>,
    /// Override the output directory (relative paths resolve against the base directory).
    pub output_dir: Option<PathBuf>,
    /// Override the Django application name.
    pub app_name: Option<String>,
    /// Override the encoding label.
    pub encoding: Option<String>,
    /// Override whether `{% load static %}` is written at the top of each file.
    pub load_static_header: Option<bool>,
    /// Override the anchor line exclusion flag.
    pub exclude_anchor_lines: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "djangify.toml";

/// Default output directory name, relative to the base directory.
const DEFAULT_OUTPUT_DIR: &str = "Modified_files";

/// Default encoding label.
const DEFAULT_ENCODING: &str = "utf-8";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion configuration (paths are relative strings from TOML).
    convert: ConvertConfigRaw,
    /// Line rewriting configuration.
    pub rewrite: RewriteConfig,

    /// Resolved conversion configuration (set after loading).
    #[serde(skip)]
    pub convert_resolved: ConvertConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw conversion configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConvertConfigRaw {
    base_dir: Option<String>,
    output_dir: Option<String>,
    app_name: Option<String>,
    encoding: Option<String>,
    load_static_header: Option<bool>,
}

/// Resolved conversion configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Directory holding the HTML files.
    pub base_dir: PathBuf,
    /// Output directory, relative to `base_dir` unless absolute.
    pub output_dir: PathBuf,
    /// Django application name used to namespace static paths.
    pub app_name: Option<String>,
    /// Encoding label for reading and writing files.
    pub encoding: String,
    /// Whether each output file starts with `{% load static %}`.
    pub load_static_header: bool,
}

impl ConvertConfig {
    /// Output directory resolved against the base directory.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.base_dir.join(&self.output_dir)
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            app_name: None,
            encoding: DEFAULT_ENCODING.to_owned(),
            load_static_header: true,
        }
    }
}

/// Line rewriting configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Skip every line containing the letter `a`.
    ///
    /// Meant as an anchor tag filter but matches far more than anchors.
    pub exclude_anchor_lines: bool,
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
        /// Config field path (e.g., "`convert.app_name`").
        field: String,
        /// Error message (e.g., "${`DJANGO_APP`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `djangify.toml` in current directory and parents.
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
        if let Some(base_dir) = &settings.base_dir {
            self.convert_resolved.base_dir.clone_from(base_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.convert_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(app_name) = &settings.app_name {
            self.convert_resolved.app_name = Some(app_name.clone());
        }
        if let Some(encoding) = &settings.encoding {
            self.convert_resolved.encoding.clone_from(encoding);
        }
        if let Some(load_static_header) = settings.load_static_header {
            self.convert_resolved.load_static_header = load_static_header;
        }
        if let Some(exclude_anchor_lines) = settings.exclude_anchor_lines {
            self.rewrite.exclude_anchor_lines = exclude_anchor_lines;
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
            convert: ConvertConfigRaw::default(),
            rewrite: RewriteConfig::default(),
            convert_resolved: ConvertConfig {
                base_dir: base.to_path_buf(),
                ..ConvertConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called by [`Config::load`] after CLI settings are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let convert = &self.convert_resolved;

        if convert.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "convert.output_dir cannot be empty".to_owned(),
            ));
        }
        require_non_empty(&convert.encoding, "convert.encoding")?;

        if let Some(app_name) = &convert.app_name {
            require_non_empty(app_name, "convert.app_name")?;
            // The name ends up inside a single-quoted template string
            if app_name.contains('\'') {
                return Err(ConfigError::Validation(
                    "convert.app_name cannot contain a single quote".to_owned(),
                ));
            }
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let convert = &mut self.convert;
        for (value, field) in [
            (&mut convert.base_dir, "convert.base_dir"),
            (&mut convert.output_dir, "convert.output_dir"),
            (&mut convert.app_name, "convert.app_name"),
            (&mut convert.encoding, "convert.encoding"),
        ] {
            if let Some(raw) = value.as_deref() {
                *value = Some(expand::expand_env(raw, field)?);
            }
        }
        Ok(())
    }

    /// Resolve raw values against the config file directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let raw = &self.convert;
        let defaults = ConvertConfig::default();

        self.convert_resolved = ConvertConfig {
            base_dir: raw
                .base_dir
                .as_deref()
                .map_or_else(|| config_dir.to_path_buf(), |dir| config_dir.join(dir)),
            output_dir: raw
                .output_dir
                .as_deref()
                .map_or(defaults.output_dir, PathBuf::from),
            app_name: raw.app_name.clone(),
            encoding: raw.encoding.clone().unwrap_or(defaults.encoding),
            load_static_header: raw
                .load_static_header
                .unwrap_or(defaults.load_static_header),
        };
    }
}
