// src/error.rs
use crate::tree::Snapshot;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GadgetError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Failed to parse {path}")]
    Parse { path: PathBuf },

    #[error("Grammar error: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Fix failed: {0}")]
    Fix(#[from] FixError),
}

/// Why a fix descriptor could not be applied. The source is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixError {
    #[error("stale fix: computed against snapshot {expected}, current is {found}")]
    Stale { expected: Snapshot, found: Snapshot },

    #[error("invalid fix target: {reason}")]
    InvalidTarget { reason: String },
}

impl FixError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GadgetError>;

// Allow `?` on std::io::Error by converting to GadgetError::Io with unknown path.
impl From<std::io::Error> for GadgetError {
    fn from(source: std::io::Error) -> Self {
        GadgetError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}
