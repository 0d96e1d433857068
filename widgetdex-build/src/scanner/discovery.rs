//! File discovery for widget source directories.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use super::rules::ExclusionPolicy;

/// Options controlling which files are scanned and what is indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// File extension to scan, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Descend into subdirectories. Off by default: `widgets/src/*.rs` only.
    #[serde(default)]
    pub recursive: bool,
    /// Also index enum value locations (`Fill`, `Down`, ...) for go-to-definition.
    #[serde(default)]
    pub index_values: bool,
    #[serde(default)]
    pub exclude: ExclusionPolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            recursive: false,
            index_values: false,
            exclude: ExclusionPolicy::default(),
        }
    }
}

fn default_extension() -> String {
    "rs".to_string()
}

/// List the source files under `root` that match the extension filter.
///
/// A missing root yields an empty list. The result is sorted by path so that
/// later merges do not depend on directory iteration order.
pub fn discover_sources(root: &Path, options: &ScanOptions) -> Vec<PathBuf> {
    if !root.is_dir() {
        log::info!("source root {} does not exist, nothing to scan", root.display());
        return Vec::new();
    }

    let mut walker = WalkDir::new(root).follow_links(true).min_depth(1);
    if !options.recursive {
        walker = walker.max_depth(1);
    }

    let mut discovered: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == options.extension.as_str())
        })
        .map(DirEntry::into_path)
        .collect();

    discovered.sort();
    log::debug!("discovered {} source file(s) under {}", discovered.len(), root.display());
    discovered
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}
