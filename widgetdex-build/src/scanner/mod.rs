//! Widget source scanning.
//!
//! This module provides functionality to:
//! - Discover widget source files under a root directory
//! - Extract widget structs, their `#[live]` properties and doc comments
//! - Record declaration lines for the go-to-definition index

mod discovery;
mod extract;
mod locations;
mod rules;
mod span;

use std::fs;
use std::path::Path;

pub use discovery::{ScanOptions, discover_sources};
pub use extract::{extract_doc_comment, extract_properties, extract_widgets};
pub use locations::{
    ValueAnchor, default_value_anchors, find_property_locations, find_value_locations, find_walk_anchor,
    find_widget_locations, index_locations,
};
pub use rules::ExclusionPolicy;
pub use span::find_balanced_span;

use crate::catalog::{Catalog, Widget};
use crate::error::{Error, Result};

/// Scan every matching file under `root` into a catalog.
///
/// Files are scanned independently and then folded together, later files
/// overriding earlier ones on name clashes. A missing root gives an empty
/// catalog; an unreadable file aborts the scan.
pub fn scan_widgets(root: &Path, options: &ScanOptions) -> Result<Catalog> {
    let files = discover_sources(root, options);

    let mut scans = Vec::with_capacity(files.len());
    for path in &files {
        scans.push(scan_file(path, &options.exclude)?);
    }

    let catalog = Catalog::fold(scans);
    log::info!("scanned {} file(s), found {} widget(s)", files.len(), catalog.len());
    Ok(catalog)
}

/// Scan a single source file.
pub fn scan_file(path: &Path, policy: &ExclusionPolicy) -> Result<Vec<Widget>> {
    let content = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(extract_widgets(&content, &file_name, policy))
}
