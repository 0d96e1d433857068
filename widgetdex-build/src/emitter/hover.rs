//! Hover documentation for widgets and layout properties.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, LocationIndex};
use crate::error::{Error, Result};

const BUILTIN_HOVER: &str = include_str!("../../data/hover.toml");

/// Curated hover text for one widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetHoverEntry {
    pub description: String,
    #[serde(default)]
    pub properties: Vec<String>,
    pub example: String,
}

/// Curated hover text for one layout property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyHoverEntry {
    #[serde(rename = "type")]
    pub prop_type: String,
    #[serde(default)]
    pub values: Vec<String>,
    pub description: String,
}

/// The curated hover tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverTable {
    #[serde(default)]
    pub widgets: BTreeMap<String, WidgetHoverEntry>,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyHoverEntry>,
}

impl HoverTable {
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_HOVER, "built-in hover table")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::Templates {
            origin: origin.to_string(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetHover {
    pub description: String,
    pub properties: Vec<String>,
    pub example: String,
    /// `file_name:line` of the declaration, when indexed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub markdown: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyHover {
    #[serde(rename = "type")]
    pub prop_type: String,
    pub values: Vec<String>,
    pub description: String,
    pub markdown: String,
}

/// Contents of `hover.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HoverDocument {
    pub widgets: BTreeMap<String, WidgetHover>,
    pub properties: BTreeMap<String, PropertyHover>,
}

/// Combine curated hover text with scanned widgets and their locations.
///
/// Curated entries win over scanned doc comments. Scanned widgets without a
/// curated entry are described from the catalog.
pub fn build_hover_document(
    catalog: &Catalog,
    locations: Option<&LocationIndex>,
    table: &HoverTable,
) -> HoverDocument {
    let mut document = HoverDocument::default();

    let source_of = |name: &str| {
        locations
            .and_then(|index| index.widgets.get(name))
            .map(|record| format!("{}:{}", file_name(&record.file), record.line))
    };

    for (name, entry) in &table.widgets {
        let source = source_of(name);
        let markdown = widget_markdown(name, &entry.description, &entry.properties, source.as_deref(), &entry.example);
        document.widgets.insert(
            name.clone(),
            WidgetHover {
                description: entry.description.clone(),
                properties: entry.properties.clone(),
                example: entry.example.clone(),
                source,
                markdown,
            },
        );
    }

    for widget in catalog.iter().filter(|w| !table.widgets.contains_key(&w.name)) {
        let description = widget.description();
        let properties: Vec<String> = widget.properties.iter().map(|p| p.name.clone()).collect();
        let example = format!("<{}> {{}}", widget.name);
        let source = source_of(&widget.name);
        let markdown = widget_markdown(&widget.name, &description, &properties, source.as_deref(), &example);
        document.widgets.insert(
            widget.name.clone(),
            WidgetHover {
                description,
                properties,
                example,
                source,
                markdown,
            },
        );
    }

    for (name, entry) in &table.properties {
        document.properties.insert(
            name.clone(),
            PropertyHover {
                prop_type: entry.prop_type.clone(),
                values: entry.values.clone(),
                description: entry.description.clone(),
                markdown: property_markdown(name, entry),
            },
        );
    }

    document
}

fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

fn code_list(items: &[String]) -> String {
    format!("`{}`", items.join("`, `"))
}

fn widget_markdown(
    name: &str,
    description: &str,
    properties: &[String],
    source: Option<&str>,
    example: &str,
) -> String {
    let mut markdown = format!("## {name}\n\n{description}\n\n");
    if !properties.is_empty() {
        markdown.push_str(&format!("**Properties:** {}\n\n", code_list(properties)));
    }
    if let Some(source) = source {
        markdown.push_str(&format!("**Source:** `{source}`\n\n"));
    }
    markdown.push_str(&format!("**Example:**\n```rust\n{example}\n```"));
    markdown
}

fn property_markdown(name: &str, entry: &PropertyHoverEntry) -> String {
    format!(
        "## {name}\n\n**Type:** `{}`\n\n{}\n\n**Values:** {}",
        entry.prop_type,
        entry.description,
        code_list(&entry.values)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{LocationRecord, Widget, WidgetProperty};

    fn gauge() -> Widget {
        Widget {
            name: "Gauge".to_string(),
            file: "gauge.rs".to_string(),
            properties: vec![
                WidgetProperty::new("value", "f64", None),
                WidgetProperty::new("color", "Vec4", None),
            ],
            doc: String::new(),
        }
    }

    #[test]
    fn test_builtin_table_parses() {
        let table = HoverTable::builtin().unwrap();
        assert_eq!(table.widgets.len(), 26);
        assert_eq!(table.properties.len(), 13);
        assert_eq!(table.properties["fit"].prop_type, "ImageFit");
        assert!(table.widgets["View"].example.starts_with("<View> {\n"));
    }

    #[test]
    fn test_curated_widget_with_source() {
        let table = HoverTable::builtin().unwrap();
        let mut index = LocationIndex::default();
        index.widgets.insert(
            "Button".to_string(),
            LocationRecord::at_index("/mp/widgets/src/button.rs", 9),
        );

        let document = build_hover_document(&Catalog::new(), Some(&index), &table);
        let button = &document.widgets["Button"];

        assert_eq!(button.source.as_deref(), Some("button.rs:10"));
        assert!(button.markdown.starts_with("## Button\n\nInteractive button widget"));
        assert!(button.markdown.contains("**Properties:** `text`, `draw_bg`, `draw_text`, `draw_icon`\n\n"));
        assert!(button.markdown.contains("**Source:** `button.rs:10`\n\n"));
        assert!(button.markdown.ends_with("**Example:**\n```rust\nmy_button = <Button> {\n    text: \"Click Me\"\n}\n```"));
    }

    #[test]
    fn test_scanned_widget_without_curated_entry() {
        let table = HoverTable::builtin().unwrap();
        let catalog = Catalog::fold(vec![vec![gauge()]]);

        let document = build_hover_document(&catalog, None, &table);
        let hover = &document.widgets["Gauge"];

        assert_eq!(hover.description, "Makepad Gauge widget");
        assert_eq!(hover.properties, vec!["value", "color"]);
        assert_eq!(hover.example, "<Gauge> {}");
        assert_eq!(hover.source, None);
        assert!(!hover.markdown.contains("**Source:**"));
    }

    #[test]
    fn test_curated_entry_overrides_scanned_doc() {
        let table = HoverTable::builtin().unwrap();
        let catalog = Catalog::fold(vec![vec![Widget {
            name: "Label".to_string(),
            file: "label.rs".to_string(),
            properties: Vec::new(),
            doc: "Scanned doc.".to_string(),
        }]]);

        let document = build_hover_document(&catalog, None, &table);
        assert_eq!(document.widgets["Label"].description, "Text display widget with styling options.");
    }

    #[test]
    fn test_property_markdown() {
        let table = HoverTable::builtin().unwrap();
        let document = build_hover_document(&Catalog::new(), None, &table);
        let flow = &document.properties["flow"];

        assert_eq!(
            flow.markdown,
            "## flow\n\n**Type:** `Flow`\n\nDirection children are laid out. Down = column, Right = row.\n\n**Values:** `Down`, `Right`, `Overlay`, `RightWrap`"
        );
    }

    #[test]
    fn test_empty_tables() {
        let document = build_hover_document(&Catalog::new(), None, &HoverTable::default());
        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(json, serde_json::json!({"widgets": {}, "properties": {}}));
    }
}
