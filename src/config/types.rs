use crate::types::Severity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferToStringConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub severity: Severity,
    /// Declaring types whose `toString()` is redundant in concatenation.
    #[serde(default = "default_buffer_types")]
    pub buffer_types: Vec<String>,
}

impl Default for BufferToStringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: Severity::default(),
            buffer_types: default_buffer_types(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadDefaultRunConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default = "default_thread_type")]
    pub thread_type: String,
    #[serde(default = "default_runnable_type")]
    pub runnable_type: String,
}

impl Default for ThreadDefaultRunConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: Severity::default(),
            thread_type: default_thread_type(),
            runnable_type: default_runnable_type(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default, rename = "string-buffer-to-string")]
    pub buffer_to_string: BufferToStringConfig,
    #[serde(default, rename = "thread-default-run")]
    pub thread_default_run: ThreadDefaultRunConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Regexes matched against `/`-separated paths.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: Vec::new(),
        }
    }
}

/// On-disk shape of `gadgets.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GadgetsToml {
    #[serde(default)]
    pub rules: RuleConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub rules: RuleConfig,
    pub scan: ScanConfig,
    pub exclude_patterns: Vec<regex::Regex>,
}

const fn default_true() -> bool { true }

fn default_buffer_types() -> Vec<String> {
    vec!["java.lang.StringBuffer".into()]
}

fn default_thread_type() -> String { "java.lang.Thread".into() }
fn default_runnable_type() -> String { "java.lang.Runnable".into() }

fn default_extensions() -> Vec<String> {
    vec!["java".into()]
}
