use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::ui::components::{parse_hex_color, ThemeTokens, MAX_COLLAPSED_LINES};
use crate::ui::GridLayoutConfig;
use crate::util::paths::config_path;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Error loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
    #[error("Unknown theme token: {0}")]
    UnknownToken(String),
    #[error("Invalid color for {key}: {value}")]
    InvalidColor { key: String, value: String },
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Branch item behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchConfig {
    /// Preview lines shown while collapsed
    pub max_collapsed_lines: usize,
    /// Whether items start collapsed
    pub default_collapsed: bool,
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            max_collapsed_lines: MAX_COLLAPSED_LINES,
            default_collapsed: true,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Column layout tunables
    pub grid: GridLayoutConfig,
    /// Branch item behavior
    pub branch: BranchConfig,
    /// Resolved theme (built-in plus overrides)
    pub theme: ThemeTokens,
}

/// TOML representation of the [grid] section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlGridConfig {
    pub min_column_width: Option<u16>,
    pub preferred_column_width: Option<u16>,
    pub max_columns: Option<usize>,
}

/// TOML representation of the [branch] section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlBranchConfig {
    pub max_collapsed_lines: Option<usize>,
    pub default_collapsed: Option<bool>,
}

/// TOML representation of the [theme] section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlThemeConfig {
    /// Built-in theme name
    pub name: Option<String>,
    /// Token overrides (`accent_primary = "#82aaff"`)
    #[serde(flatten)]
    pub overrides: HashMap<String, String>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub grid: Option<TomlGridConfig>,
    pub branch: Option<TomlBranchConfig>,
    pub theme: Option<TomlThemeConfig>,
}

impl Config {
    /// Parse and validate a config file's contents, merging over defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();

        if let Some(grid) = toml_config.grid {
            if let Some(min) = grid.min_column_width {
                config.grid.min_column_width = min;
            }
            if let Some(preferred) = grid.preferred_column_width {
                config.grid.preferred_column_width = preferred;
            }
            if let Some(max) = grid.max_columns {
                config.grid.max_columns = max;
            }
        }

        if let Some(branch) = toml_config.branch {
            if let Some(lines) = branch.max_collapsed_lines {
                config.branch.max_collapsed_lines = lines;
            }
            if let Some(collapsed) = branch.default_collapsed {
                config.branch.default_collapsed = collapsed;
            }
        }

        if let Some(theme) = toml_config.theme {
            if let Some(name) = theme.name {
                config.theme = ThemeTokens::by_name(&name).ok_or(ConfigError::UnknownTheme(name))?;
            }
            // Sorted so the first reported error is stable
            let mut overrides: Vec<_> = theme.overrides.into_iter().collect();
            overrides.sort();
            for (key, value) in overrides {
                let color = parse_hex_color(&value).ok_or_else(|| ConfigError::InvalidColor {
                    key: key.clone(),
                    value: value.clone(),
                })?;
                if !config.theme.set_token(&key, color) {
                    return Err(ConfigError::UnknownToken(key));
                }
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values the grid cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.min_column_width == 0 {
            return Err(ConfigError::InvalidValue {
                field: "grid.min_column_width",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.grid.max_columns == 0 {
            return Err(ConfigError::InvalidValue {
                field: "grid.max_columns",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.branch.max_collapsed_lines == 0 {
            return Err(ConfigError::InvalidValue {
                field: "branch.max_collapsed_lines",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Read and parse a config file
    pub fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load configuration from `path`, falling back to defaults.
    ///
    /// A missing file is normal; an unreadable or invalid one is logged.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }

        match Self::read_from(path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "Loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Ignoring invalid config, using defaults"
                );
                Config::default()
            }
        }
    }

    /// Load configuration from the default location, writing the example
    /// file there on first run
    pub fn load() -> Self {
        let config_file = config_path();

        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        Self::load_from(&config_file)
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(error = %e, "Failed to create config directory");
                return;
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }

    pub fn with_theme(mut self, theme: ThemeTokens) -> Self {
        self.theme = theme;
        self
    }
}
