//! Line-level scanning for the go-to-definition index.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::discovery::{ScanOptions, discover_sources};
use super::rules::ExclusionPolicy;
use crate::catalog::{LocationIndex, LocationRecord};
use crate::error::{Error, Result};
use crate::layout::MakepadLayout;

/// `pub struct Name {` as the first thing on a line.
static STRUCT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^pub struct (\w+)\s*\{").expect("struct line pattern"));

/// `#[live...]`, optional `pub`, then `name:` anywhere on a line.
static LIVE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#\[live.*?\]\s*(?:pub\s+)?(\w+):").expect("live line pattern"));

const WALK_MARKER: &str = "pub struct Walk";

/// Properties that resolve to the `Walk` struct instead of a `#[live]` field.
const WALK_PROPERTIES: &[&str] = &["width", "height"];

/// An enum value and the widgets source file it is declared in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueAnchor {
    pub value: String,
    /// File name relative to the widgets source directory.
    pub file: String,
}

impl ValueAnchor {
    fn new(value: &str, file: &str) -> Self {
        Self {
            value: value.to_string(),
            file: file.to_string(),
        }
    }
}

/// Layout and image-fit values that editors jump to.
pub fn default_value_anchors() -> Vec<ValueAnchor> {
    let mut anchors: Vec<ValueAnchor> = ["Fill", "Fit", "Down", "Right", "Overlay"]
        .iter()
        .map(|v| ValueAnchor::new(v, "view.rs"))
        .collect();
    anchors.extend(
        ["Centered", "Smallest", "Biggest", "Stretch"]
            .iter()
            .map(|v| ValueAnchor::new(v, "image_cache.rs")),
    );
    anchors
}

/// Find widget struct declarations that start at column zero.
pub fn find_widget_locations(
    text: &str,
    file: &str,
    policy: &ExclusionPolicy,
) -> Vec<(String, LocationRecord)> {
    text.split('\n')
        .enumerate()
        .filter_map(|(index, line)| {
            let name = STRUCT_LINE.captures(line)?.get(1)?.as_str();
            if policy.is_excluded(name) {
                return None;
            }
            Some((name.to_string(), LocationRecord::at_index(file, index)))
        })
        .collect()
}

/// Find `#[live]` property declarations line by line.
///
/// Returned in line order; when a name repeats, callers keep the last one.
pub fn find_property_locations(text: &str, file: &str) -> Vec<(String, LocationRecord)> {
    text.split('\n')
        .enumerate()
        .filter_map(|(index, line)| {
            let name = LIVE_LINE.captures(line)?.get(1)?.as_str();
            Some((name.to_string(), LocationRecord::at_index(file, index)))
        })
        .collect()
}

/// 0-based index of the first line declaring `Walk`.
pub fn find_walk_anchor(text: &str) -> Option<usize> {
    text.split('\n').position(|line| line.contains(WALK_MARKER))
}

/// Locate enum values: the first line in the anchor file that mentions the
/// value inside an attribute.
pub fn find_value_locations(widgets_src: &Path, anchors: &[ValueAnchor]) -> Result<Vec<(String, LocationRecord)>> {
    let mut found = Vec::new();

    for anchor in anchors {
        let path = widgets_src.join(&anchor.file);
        if !path.is_file() {
            log::debug!("value anchor file {} not found, skipping {}", path.display(), anchor.value);
            continue;
        }
        let content = fs::read_to_string(&path).map_err(|e| Error::read(&path, e))?;
        let hit = content
            .split('\n')
            .position(|line| line.contains(anchor.value.as_str()) && line.contains("#["));
        if let Some(index) = hit {
            found.push((
                anchor.value.clone(),
                LocationRecord::at_index(path.to_string_lossy(), index),
            ));
        }
    }

    Ok(found)
}

/// Build the full location index for a Makepad checkout.
///
/// A missing widgets directory gives an empty index. A missing `view.rs`
/// leaves the property map empty (the `Walk` anchor may still fill in
/// `width`/`height`).
pub fn index_locations(layout: &MakepadLayout, options: &ScanOptions) -> Result<LocationIndex> {
    let widgets_src = layout.widgets_src();
    let mut index = LocationIndex::default();

    for path in discover_sources(&widgets_src, options) {
        let content = fs::read_to_string(&path).map_err(|e| Error::read(&path, e))?;
        let file = path.to_string_lossy();
        for (name, record) in find_widget_locations(&content, &file, &options.exclude) {
            if let Some(previous) = index.widgets.insert(name.clone(), record) {
                log::warn!("duplicate struct '{name}' (previously at {}:{})", previous.file, previous.line);
            }
        }
    }

    let view_file = layout.view_file();
    if view_file.is_file() {
        let content = fs::read_to_string(&view_file).map_err(|e| Error::read(&view_file, e))?;
        let file = view_file.to_string_lossy();
        index.properties.extend(find_property_locations(&content, &file));
    } else if widgets_src.is_dir() {
        log::warn!("{} not found, property locations will be limited", view_file.display());
    }

    let walk_file = layout.walk_file();
    if walk_file.is_file() {
        let content = fs::read_to_string(&walk_file).map_err(|e| Error::read(&walk_file, e))?;
        if let Some(line_index) = find_walk_anchor(&content) {
            let file = walk_file.to_string_lossy();
            for property in WALK_PROPERTIES {
                index
                    .properties
                    .insert((*property).to_string(), LocationRecord::at_index(&*file, line_index));
            }
        }
    }

    if options.index_values && widgets_src.is_dir() {
        index
            .values
            .extend(find_value_locations(&widgets_src, &default_value_anchors())?);
    }

    log::info!(
        "indexed {} widget(s), {} property location(s), {} value(s)",
        index.widgets.len(),
        index.properties.len(),
        index.values.len()
    );
    Ok(index)
}
