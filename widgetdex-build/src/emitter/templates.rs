//! Hand-authored snippet tables, loaded from TOML data.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::snippets::{Snippet, SnippetBody, SnippetCollection};
use crate::error::{Error, Result};

const BUILTIN_TEMPLATES: &str = include_str!("../../data/templates.toml");

/// One row of a static snippet table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub label: String,
    pub prefix: String,
    pub body: SnippetBody,
    pub description: String,
}

impl TemplateEntry {
    pub fn to_snippet(&self) -> Snippet {
        Snippet {
            prefix: self.prefix.clone(),
            body: self.body.clone(),
            description: self.description.clone(),
        }
    }
}

/// All snippet template data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSet {
    /// Scanned widgets that get a generated snippet.
    #[serde(default)]
    pub common_widgets: Vec<String>,
    /// Body lines for widgets with a hand-written snippet.
    #[serde(default)]
    pub widget_bodies: BTreeMap<String, Vec<String>>,
    #[serde(default, rename = "property")]
    pub properties: Vec<TemplateEntry>,
    #[serde(default)]
    pub code: Vec<TemplateEntry>,
    #[serde(default, rename = "layout")]
    pub layouts: Vec<TemplateEntry>,
}

impl TemplateSet {
    /// The template data shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_TEMPLATES, "built-in templates")
    }

    /// Load template data from a TOML file.
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

    pub fn is_common(&self, name: &str) -> bool {
        self.common_widgets.iter().any(|w| w == name)
    }

    pub fn widget_body(&self, name: &str) -> Option<&[String]> {
        self.widget_bodies.get(name).map(Vec::as_slice)
    }

    pub fn property_snippets(&self) -> SnippetCollection {
        collect(&self.properties)
    }

    pub fn code_snippets(&self) -> SnippetCollection {
        collect(&self.code)
    }

    pub fn layout_snippets(&self) -> SnippetCollection {
        collect(&self.layouts)
    }
}

fn collect(entries: &[TemplateEntry]) -> SnippetCollection {
    let mut snippets = SnippetCollection::new();
    for entry in entries {
        snippets.insert(entry.label.clone(), entry.to_snippet());
    }
    snippets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_parse() {
        let templates = TemplateSet::builtin().unwrap();

        assert_eq!(templates.common_widgets.len(), 26);
        assert!(templates.is_common("FileTree"));
        assert!(!templates.is_common("ScrollXView"));
        assert_eq!(templates.widget_bodies.len(), 8);
        assert_eq!(templates.properties.len(), 23);
        assert_eq!(templates.code.len(), 16);
        assert_eq!(templates.layouts.len(), 8);
    }

    #[test]
    fn test_single_and_multi_line_bodies() {
        let templates = TemplateSet::builtin().unwrap();
        let properties = templates.property_snippets();

        let width = properties.get("Width Fill").unwrap();
        assert_eq!(width.prefix, "wfill");
        assert_eq!(width.body, SnippetBody::Line("width: Fill".to_string()));

        let show_bg = properties.get("Show Background").unwrap();
        assert_eq!(show_bg.body.lines().len(), 4);
        assert_eq!(show_bg.body.lines()[2], "    color: ${1:#333}");
    }

    #[test]
    fn test_table_order_is_preserved() {
        let templates = TemplateSet::builtin().unwrap();
        let layouts = templates.layout_snippets();
        let labels: Vec<&str> = layouts.labels().collect();
        assert_eq!(labels.first(), Some(&"Horizontal Layout"));
        assert_eq!(labels.last(), Some(&"Vr"));
    }

    #[test]
    fn test_custom_templates() {
        let data = r#"
common_widgets = ["Gauge"]

[widget_bodies]
Gauge = ["    value: ${2:0.5}", "    $0"]

[[layout]]
label = "Row"
prefix = "row"
body = "<View> {flow: Right}"
description = "Row"
"#;
        let templates = TemplateSet::from_toml_str(data, "test").unwrap();
        assert!(templates.is_common("Gauge"));
        assert_eq!(templates.widget_body("Gauge").unwrap().len(), 2);
        assert!(templates.properties.is_empty());
        assert_eq!(templates.layout_snippets().len(), 1);
    }

    #[test]
    fn test_invalid_templates_report_origin() {
        let err = TemplateSet::from_toml_str("common_widgets = 3", "broken.toml").unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }
}
