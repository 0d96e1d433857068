//! In-memory catalog types built by the scanner and consumed by the emitters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A `#[live]` field captured from a widget struct body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetProperty {
    pub name: String,
    /// Declared type, kept as free text.
    #[serde(rename = "type")]
    pub prop_type: String,
    /// Contents of `#[live(...)]`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl WidgetProperty {
    pub fn new(name: impl Into<String>, prop_type: impl Into<String>, default: Option<String>) -> Self {
        Self {
            name: name.into(),
            prop_type: prop_type.into(),
            default,
        }
    }
}

/// A widget struct discovered in the scanned sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    pub name: String,
    /// File name (not the full path) of the source the widget came from.
    pub file: String,
    pub properties: Vec<WidgetProperty>,
    /// Joined `///` comment lines directly above the declaration.
    #[serde(default)]
    pub doc: String,
}

impl Widget {
    /// Description used by emitters: the extracted doc, or a generic line.
    pub fn description(&self) -> String {
        if self.doc.is_empty() {
            fallback_description(&self.name)
        } else {
            self.doc.clone()
        }
    }
}

pub(crate) fn fallback_description(name: &str) -> String {
    format!("Makepad {name} widget")
}

/// Widgets keyed by name, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    widgets: BTreeMap<String, Widget>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold per-file scan results into one catalog.
    ///
    /// Lists are merged in the order given. A name seen twice keeps the later
    /// widget.
    pub fn fold<I>(scans: I) -> Self
    where
        I: IntoIterator<Item = Vec<Widget>>,
    {
        let mut catalog = Self::new();
        for widgets in scans {
            for widget in widgets {
                catalog.insert(widget);
            }
        }
        catalog
    }

    /// Insert a widget, replacing (and returning) any previous one with the same name.
    pub fn insert(&mut self, widget: Widget) -> Option<Widget> {
        let previous = self.widgets.insert(widget.name.clone(), widget);
        if let Some(ref old) = previous {
            log::warn!(
                "duplicate widget '{}' (from {}), keeping the later definition",
                old.name,
                old.file
            );
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&Widget> {
        self.widgets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.widgets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Widgets in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.widgets.keys().map(String::as_str)
    }
}

/// Where a widget or property is declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub file: String,
    /// 1-based line number.
    pub line: usize,
}

impl LocationRecord {
    /// Build a record from a 0-based line index.
    pub fn at_index(file: impl Into<String>, index: usize) -> Self {
        Self {
            file: file.into(),
            line: index + 1,
        }
    }
}

/// Go-to-definition index written as `locations.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationIndex {
    pub widgets: BTreeMap<String, LocationRecord>,
    pub properties: BTreeMap<String, LocationRecord>,
    /// Enum value locations, only present when value indexing is enabled.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, LocationRecord>,
}

impl LocationIndex {
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty() && self.properties.is_empty() && self.values.is_empty()
    }
}
