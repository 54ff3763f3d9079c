//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dashboard::{DashboardResult, Palette, Template, DEFAULT_CHART_JS_URL};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Workout log location
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_file")]
    pub file: PathBuf,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data").join("workouts.json")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            file: default_data_file(),
        }
    }
}

/// Dashboard server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Open the dashboard in the default browser on start
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,

    /// Fetch workouts from this URL instead of the local data file
    #[serde(default)]
    pub data_url: Option<String>,

    /// Custom page template (must contain #table-body and #weightChart)
    #[serde(default)]
    pub template: Option<PathBuf>,

    #[serde(default = "default_chart_js_url")]
    pub chart_js_url: String,

    #[serde(default)]
    pub palette: Palette,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_open_browser() -> bool {
    true
}

fn default_chart_js_url() -> String {
    DEFAULT_CHART_JS_URL.to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            open_browser: default_open_browser(),
            data_url: None,
            template: None,
            chart_js_url: default_chart_js_url(),
            palette: Palette::default(),
        }
    }
}

impl DashboardConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The configured page template, or the built-in one
    pub async fn load_template(&self) -> DashboardResult<Template> {
        let template = match &self.template {
            Some(path) => Template::from_file(path).await?,
            None => Template::default(),
        };
        Ok(template.with_chart_js_url(self.chart_js_url.clone()))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Resolve configuration for the CLI.
    ///
    /// An explicit path must load. Without one, the default locations are
    /// tried in order and files that fail to load are skipped. Nothing is
    /// logged here; the caller reports the outcome once logging is set up.
    pub fn resolve(explicit: Option<&Path>) -> Result<Resolved, ConfigError> {
        match explicit {
            Some(path) => Ok(Resolved {
                config: Self::load_with_env(path)?,
                loaded_from: Some(path.to_path_buf()),
                skipped: Vec::new(),
            }),
            None => Ok(Self::load_first(&Self::default_paths())),
        }
    }

    /// Load the first existing file in `paths` that parses, or fall back to
    /// defaults with environment overrides
    pub fn load_first(paths: &[PathBuf]) -> Resolved {
        let mut skipped = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    return Resolved {
                        config,
                        loaded_from: Some(path.clone()),
                        skipped,
                    }
                }
                Err(e) => skipped.push(e),
            }
        }

        Resolved {
            config: Self::from_env(),
            loaded_from: None,
            skipped,
        }
    }

    /// Config file locations, highest priority first
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("athletelog").join("config.toml")),
            Some(PathBuf::from("./athletelog.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Data overrides
        if let Some(file) = var("ATHLETELOG_DATA_FILE") {
            self.data.file = PathBuf::from(file);
        }

        // Dashboard overrides
        if let Some(host) = var("ATHLETELOG_HOST") {
            self.dashboard.host = host;
        }
        if let Some(port) = var("ATHLETELOG_PORT") {
            match port.parse() {
                Ok(p) => self.dashboard.port = p,
                Err(_) => tracing::warn!("Ignoring invalid ATHLETELOG_PORT: {}", port),
            }
        }
        if let Some(url) = var("ATHLETELOG_DATA_URL") {
            self.dashboard.data_url = Some(url);
        }

        // Logging overrides
        if let Some(level) = var("ATHLETELOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("ATHLETELOG_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Result of configuration discovery
#[derive(Debug)]
pub struct Resolved {
    pub config: Config,
    /// File the config came from, if any
    pub loaded_from: Option<PathBuf>,
    /// Files that exist but failed to load
    pub skipped: Vec<ConfigError>,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# AthleteLog Configuration
#
# Environment variables override these settings:
# - ATHLETELOG_DATA_FILE
# - ATHLETELOG_HOST
# - ATHLETELOG_PORT
# - ATHLETELOG_DATA_URL
# - ATHLETELOG_LOG_LEVEL
# - ATHLETELOG_LOG_FORMAT

[data]
# Workout log (JSON array)
file = "data/workouts.json"

[dashboard]
# Dashboard server host
host = "127.0.0.1"

# Dashboard server port
port = 3000

# Open the dashboard in the default browser on start
open_browser = true

# Load workouts over HTTP instead of from the data file
# data_url = "http://localhost:3000/data/workouts.json"

# Custom page template; must contain id="table-body" and id="weightChart"
# template = "dashboard.html"

# Chart.js build loaded by the page
chart_js_url = "{}"

# Series colours: random (new colours on every load) or stable (per exercise)
palette = "random"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        DEFAULT_CHART_JS_URL
    )
}
