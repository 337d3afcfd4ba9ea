//! Exclusion rules for files that must never be organized.
//!
//! Rules are loaded from a TOML file and compiled once before scanning:
//!
//! ```toml
//! [exclude]
//! filenames = ["Thumbs.db", "desktop.ini"]
//! extensions = ["part", "crdownload"]
//! patterns = ["*.tmp"]
//! ```
//!
//! Lookup order: an explicitly passed path, then `./.downsort.toml`, then
//! `~/.config/downsort/config.toml`, then built-in defaults. The defaults
//! exclude in-progress browser downloads and the tool's own log file.
//!
//! Excluded files are treated like hidden files: skipped before counting,
//! never moved. The category table itself is not configurable here.

use crate::logging::LOG_FILE_NAME;
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions excluded when no configuration file overrides them. These are
/// the partial-download suffixes browsers use while a file is still coming
/// in.
const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &["part", "crdownload", "download"];

/// Errors from loading or compiling exclusion rules.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Explicitly requested file does not exist.
    NotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    Invalid(String),
    /// A glob pattern failed to compile.
    InvalidPattern(String),
    /// IO error while reading the file.
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::Io(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Exclusion configuration as deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcludeConfig {
    #[serde(default)]
    pub exclude: ExcludeRules,
}

/// The raw rule lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact file names to leave alone.
    #[serde(default = "default_filenames")]
    pub filenames: Vec<String>,

    /// Extensions to leave alone (case-insensitive, leading dot optional).
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns matched against the file name.
    #[serde(default)]
    pub patterns: Vec<String>,
}

fn default_filenames() -> Vec<String> {
    vec![LOG_FILE_NAME.to_string()]
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXCLUDED_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

impl Default for ExcludeRules {
    fn default() -> Self {
        Self {
            filenames: default_filenames(),
            extensions: default_extensions(),
            patterns: Vec::new(),
        }
    }
}

impl Default for ExcludeConfig {
    fn default() -> Self {
        Self {
            exclude: ExcludeRules::default(),
        }
    }
}

impl ExcludeConfig {
    /// Loads configuration, falling back through the lookup order described
    /// in the module docs.
    ///
    /// # Errors
    ///
    /// Only an explicitly provided or discovered file that cannot be read
    /// or parsed is an error; absence of any file yields the defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local = PathBuf::from(".downsort.toml");
        if local.exists() {
            return Self::load_from_file(&local);
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config").join("downsort").join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Pre-compiles the rules so matching during the scan is cheap.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] for any glob that fails to
    /// compile.
    pub fn compile(self) -> Result<CompiledExcludes, ConfigError> {
        CompiledExcludes::new(self.exclude)
    }
}

/// Compiled exclusion rules ready for per-file matching.
#[derive(Debug, Clone)]
pub struct CompiledExcludes {
    filenames: HashSet<String>,
    extensions: HashSet<String>,
    patterns: Vec<Pattern>,
}

impl CompiledExcludes {
    fn new(rules: ExcludeRules) -> Result<Self, ConfigError> {
        let patterns = rules
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            filenames: rules.filenames.into_iter().collect(),
            extensions: rules
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            patterns,
        })
    }

    /// Whether `file_path` matches any exclusion rule. Rules apply to the
    /// file name only; the organizer never descends into subdirectories.
    pub fn is_excluded(&self, file_path: &Path) -> bool {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self.filenames.contains(file_name.as_ref()) {
            return true;
        }

        if let Some(ext) = file_path.extension() {
            let ext = ext.to_string_lossy().to_lowercase();
            if self.extensions.contains(&ext) {
                return true;
            }
        }

        self.patterns
            .iter()
            .any(|pattern| pattern.matches(&file_name))
    }
}

impl Default for CompiledExcludes {
    fn default() -> Self {
        // Default rules carry no globs, so compilation cannot fail.
        Self {
            filenames: default_filenames().into_iter().collect(),
            extensions: default_extensions().into_iter().collect(),
            patterns: Vec::new(),
        }
    }
}
