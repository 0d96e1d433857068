use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use widgetdex_build::emitter::{HoverTable, TemplateSet};
use widgetdex_build::{LocateHints, Located, MakepadLayout, RootSource, ScanOptions, locate_or_default};

/// Name of the optional project configuration file
pub const CONFIG_FILE_NAME: &str = "widgetdex.toml";

/// Project context for widgetdex operations
pub struct ProjectContext {
    /// Directory that relative paths in the config resolve against
    pub base_dir: PathBuf,
    /// Config file in use, if one was found
    pub config_path: Option<PathBuf>,
    /// Loaded configuration (defaults when no file exists)
    pub config: WidgetdexConfig,
    /// `--makepad-path` from the command line
    makepad_override: Option<PathBuf>,
}

/// Configuration stored in widgetdex.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetdexConfig {
    #[serde(default)]
    pub paths: PathSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub scan: ScanOptions,
    #[serde(default)]
    pub templates: TemplateSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Makepad checkout root; `~` expands to the home directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub makepad: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_snippets_output")]
    pub snippets: String,
    #[serde(default = "default_docs_output")]
    pub docs: String,
    #[serde(default = "default_locations_output")]
    pub locations: String,
    #[serde(default = "default_hover_output")]
    pub hover: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            snippets: default_snippets_output(),
            docs: default_docs_output(),
            locations: default_locations_output(),
            hover: default_hover_output(),
        }
    }
}

fn default_snippets_output() -> String {
    "snippets/makepad.json".to_string()
}

fn default_docs_output() -> String {
    "docs/WIDGETS.md".to_string()
}

fn default_locations_output() -> String {
    "src/locations.json".to_string()
}

fn default_hover_output() -> String {
    "src/hover.json".to_string()
}

/// Replacement data tables for the built-in templates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippets: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover: Option<String>,
}

impl ProjectContext {
    /// Load context from an explicit config file, or search for one from the
    /// current directory upward.
    pub fn load(config: Option<&Path>, makepad_override: Option<PathBuf>) -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;

        let mut ctx = match config {
            Some(path) => Self::from_config_file(path)?,
            None => match find_config(&current_dir) {
                Some(path) => Self::from_config_file(&path)?,
                None => Self::with_defaults(current_dir),
            },
        };
        ctx.makepad_override = makepad_override;
        Ok(ctx)
    }

    /// Context with built-in defaults rooted at `base_dir`
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            config_path: None,
            config: WidgetdexConfig::default(),
            makepad_override: None,
        }
    }

    /// Create context from a config file; paths resolve against its directory
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: WidgetdexConfig =
            toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;

        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir().context("Failed to get current directory")?,
        };

        log::debug!("loaded config from {}", path.display());
        Ok(Self {
            base_dir,
            config_path: Some(path.to_path_buf()),
            config,
            makepad_override: None,
        })
    }

    /// Resolve a configured path: `~` expands to home, relative paths join `base_dir`
    pub fn resolve_path(&self, value: &str) -> PathBuf {
        let expanded = match value.strip_prefix('~') {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => match dirs::home_dir() {
                Some(home) => home.join(rest.trim_start_matches('/')),
                None => PathBuf::from(value),
            },
            _ => PathBuf::from(value),
        };

        if expanded.is_absolute() {
            expanded
        } else {
            self.base_dir.join(expanded)
        }
    }

    /// Output file for an artifact: the command-line flag if given, else the config value
    pub fn output_path(&self, flag: Option<PathBuf>, configured: &str) -> PathBuf {
        flag.unwrap_or_else(|| self.resolve_path(configured))
    }

    pub fn scan_options(&self) -> ScanOptions {
        self.config.scan.clone()
    }

    /// Snippet templates from the configured file, or the built-in set
    pub fn templates(&self) -> Result<TemplateSet> {
        match &self.config.templates.snippets {
            Some(path) => {
                let path = self.resolve_path(path);
                TemplateSet::from_path(&path).with_context(|| format!("Failed to load templates {}", path.display()))
            }
            None => TemplateSet::builtin().context("Failed to load built-in templates"),
        }
    }

    /// Hover table from the configured file, or the built-in one
    pub fn hover_table(&self) -> Result<HoverTable> {
        match &self.config.templates.hover {
            Some(path) => {
                let path = self.resolve_path(path);
                HoverTable::from_path(&path).with_context(|| format!("Failed to load hover table {}", path.display()))
            }
            None => HoverTable::builtin().context("Failed to load built-in hover table"),
        }
    }

    /// Find the Makepad checkout using the process environment.
    ///
    /// `extra_hints` are searched before the config directory.
    pub fn locate(&self, extra_hints: &[PathBuf]) -> Located {
        self.locate_with(LocateHints::from_env(), extra_hints)
    }

    /// Precedence: `--makepad-path`, `MAKEPAD_PATH`, `paths.makepad` in the
    /// config, then discovery around the hints and the home directory.
    pub fn locate_with(&self, mut hints: LocateHints, extra_hints: &[PathBuf]) -> Located {
        let explicit = match &self.makepad_override {
            Some(path) => Some(path.clone()),
            None if hints.environment.is_some() => None,
            None => self.config.paths.makepad.as_deref().map(|p| self.resolve_path(p)),
        };

        if let Some(root) = explicit {
            let layout = MakepadLayout::new(root);
            if !layout.widgets_src().is_dir() {
                log::warn!("{} does not contain widgets/src", layout.root().display());
            }
            return Located {
                layout,
                source: RootSource::Explicit,
            };
        }

        let mut workspaces = extra_hints.to_vec();
        workspaces.push(self.base_dir.clone());
        workspaces.append(&mut hints.workspaces);
        workspaces.dedup();
        hints.workspaces = workspaces;

        locate_or_default(&hints)
    }
}

/// Look for widgetdex.toml in `start` and its ancestors
fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}
