// src/config/mod.rs
pub mod types;

pub use self::types::{
    BufferToStringConfig, Config, GadgetsToml, RuleConfig, ScanConfig, ThreadDefaultRunConfig,
};
use crate::error::{GadgetError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "gadgets.toml";

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `path`, or `gadgets.toml` from the working directory if present.
    ///
    /// # Errors
    /// Returns error if an explicit file is missing, or if any file is not
    /// valid TOML or carries invalid exclude patterns.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None if Path::new(CONFIG_FILE).is_file() => Self::from_file(Path::new(CONFIG_FILE)),
            None => Ok(Self::new()),
        }
    }

    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| GadgetError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Self::parse_toml(&content)
    }

    /// # Errors
    /// Returns error on malformed TOML or an exclude pattern that is not a
    /// valid regex.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let parsed: GadgetsToml = toml::from_str(content)?;
        let exclude_patterns = parsed
            .scan
            .exclude
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            rules: parsed.rules,
            scan: parsed.scan,
            exclude_patterns,
        })
    }

    /// Whether `path` has one of the scanned extensions.
    #[must_use]
    pub fn wants_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.scan.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
    }

    /// Whether any exclude pattern matches the `/`-normalised path.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        let normalized = path.to_string_lossy().replace('\\', "/");
        self.exclude_patterns.iter().any(|re| re.is_match(&normalized))
    }
}
