// src/discovery.rs
use crate::config::Config;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory names never descended into.
pub const PRUNE_DIRS: &[&str] = &[".git", "target", "build", "out", "node_modules", ".idea"];

#[must_use]
pub fn should_prune(name: &str) -> bool {
    PRUNE_DIRS.contains(&name)
}

/// Collects the files to inspect under `roots`, sorted and deduplicated.
/// A root that is a file is taken as-is if its extension is wanted.
#[must_use]
pub fn discover(roots: &[PathBuf], config: &Config) -> Vec<PathBuf> {
    let default_root = [PathBuf::from(".")];
    let roots = if roots.is_empty() { &default_root[..] } else { roots };

    let mut files = Vec::new();
    let mut errors = 0usize;
    for root in roots {
        errors += walk(root, config, &mut files);
    }
    if errors > 0 {
        tracing::warn!(errors, "entries could not be read during the walk");
    }

    files.retain(|p| !config.is_excluded(p));
    files.sort();
    files.dedup();
    files
}

fn walk(root: &Path, config: &Config, out: &mut Vec<PathBuf>) -> usize {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !should_prune(&e.file_name().to_string_lossy()));

    let mut errors = 0;
    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file() && config.wants_extension(entry.path()) {
                    let p = entry.path().strip_prefix("./").unwrap_or(entry.path());
                    out.push(p.to_path_buf());
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "walk error");
                errors += 1;
            }
        }
    }
    errors
}
