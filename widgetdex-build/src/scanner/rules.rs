//! Name filters for declarations that match the widget pattern but are internal.

use serde::{Deserialize, Serialize};

/// Decides which struct names are hidden from the catalog and the location index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionPolicy {
    /// Exact names to drop.
    #[serde(default = "default_names")]
    pub names: Vec<String>,
    /// Names starting with any of these are dropped (e.g. `DrawQuad`).
    #[serde(default = "default_prefixes")]
    pub prefixes: Vec<String>,
    /// Names ending with any of these are dropped (e.g. `ButtonRef`, `ButtonSet`).
    #[serde(default = "default_suffixes")]
    pub suffixes: Vec<String>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self {
            names: default_names(),
            prefixes: default_prefixes(),
            suffixes: default_suffixes(),
        }
    }
}

fn default_names() -> Vec<String> {
    ["WidgetAction", "WidgetActionData", "WidgetUid", "WidgetRegistry"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_prefixes() -> Vec<String> {
    vec!["Draw".to_string()]
}

fn default_suffixes() -> Vec<String> {
    vec!["Ref".to_string(), "Set".to_string()]
}

impl ExclusionPolicy {
    /// A policy that keeps every name.
    pub fn allow_all() -> Self {
        Self {
            names: Vec::new(),
            prefixes: Vec::new(),
            suffixes: Vec::new(),
        }
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
            || self.prefixes.iter().any(|p| name.starts_with(p.as_str()))
            || self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }
}
