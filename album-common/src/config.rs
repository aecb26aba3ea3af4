//! Configuration loading
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Levels 1 and 2 arrive together as [`ConfigOverrides`] (clap reads both);
//! this module handles the TOML file and the defaults.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Config file read from the working directory when none is named explicitly
pub const DEFAULT_CONFIG_FILE: &str = "album.toml";

/// Which filesystem timestamp backs a photo without override or EXIF date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileTimePreference {
    /// Creation time, falling back to modification time
    #[default]
    Created,
    /// Modification time only
    Modified,
}

impl std::str::FromStr for FileTimePreference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "created" => Ok(Self::Created),
            "modified" => Ok(Self::Modified),
            other => Err(Error::Config(format!(
                "Invalid file_time '{}' (expected 'created' or 'modified')",
                other
            ))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Whether `filename` ends in `.` + one of `extensions` (lowercase, no dot),
/// ignoring case
pub fn has_extension(filename: &str, extensions: &[String]) -> bool {
    let lower = filename.to_lowercase();
    extensions
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}

/// Server configuration, as read from `album.toml`
///
/// ```toml
/// host = "localhost"
/// port = 8000
/// photo_dir = "photos"
/// dates_file = "photo_dates.json"
/// static_root = "."
/// extensions = ["png", "jpg", "jpeg", "gif"]
/// file_time = "created"
///
/// [logging]
/// level = "info"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Flat directory holding the photos
    pub photo_dir: PathBuf,
    /// Date override store
    pub dates_file: PathBuf,
    /// Root for static file serving of every unrouted path
    pub static_root: PathBuf,
    /// Accepted image extensions, lowercase without the leading dot
    pub extensions: Vec<String>,
    pub file_time: FileTimePreference,
    pub logging: LoggingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8000,
            photo_dir: PathBuf::from("photos"),
            dates_file: PathBuf::from("photo_dates.json"),
            static_root: PathBuf::from("."),
            extensions: ["png", "jpg", "jpeg", "gif"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            file_time: FileTimePreference::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Values supplied on the command line or through environment variables
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub photo_dir: Option<PathBuf>,
    pub dates_file: Option<PathBuf>,
    pub static_root: Option<PathBuf>,
    pub extensions: Option<Vec<String>>,
    pub file_time: Option<FileTimePreference>,
    pub log_level: Option<String>,
}

impl ServerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Load the TOML layer.
    ///
    /// An explicitly named file must exist. Without one, [`DEFAULT_CONFIG_FILE`]
    /// in the working directory is used if present; otherwise compiled
    /// defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.is_file() {
                    warn!(
                        "No {} found in working directory, using built-in defaults",
                        DEFAULT_CONFIG_FILE
                    );
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply command-line / environment values on top of this config
    pub fn apply(&mut self, overrides: ConfigOverrides) -> Result<()> {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(photo_dir) = overrides.photo_dir {
            self.photo_dir = photo_dir;
        }
        if let Some(dates_file) = overrides.dates_file {
            self.dates_file = dates_file;
        }
        if let Some(static_root) = overrides.static_root {
            self.static_root = static_root;
        }
        if let Some(extensions) = overrides.extensions {
            self.extensions = extensions;
        }
        if let Some(file_time) = overrides.file_time {
            self.file_time = file_time;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }

        self.normalize();
        self.validate()
    }

    /// Whether `filename` carries one of the accepted extensions (case-insensitive)
    pub fn accepts_filename(&self, filename: &str) -> bool {
        has_extension(filename, &self.extensions)
    }

    /// `host:port` string for logging
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn normalize(&mut self) {
        self.extensions = self
            .extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
    }

    fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::Config("host must not be empty".to_string()));
        }
        if self.extensions.is_empty() {
            return Err(Error::Config(
                "at least one image extension is required".to_string(),
            ));
        }
        Ok(())
    }
}
