//! Artifact generator builder.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::catalog::LocationIndex;
use crate::emitter::{
    HoverTable, SnippetCounts, TemplateSet, build_hover_document, build_snippet_document, render_documentation,
    render_locations, to_pretty_json,
};
use crate::error::{Error, Result};
use crate::layout::MakepadLayout;
use crate::scanner::{ExclusionPolicy, ScanOptions, index_locations, scan_widgets};

/// Builder for configuring and running artifact generation.
///
/// Nothing is written unless at least one output file is set.
#[derive(Debug, Clone, Default)]
pub struct ArtifactGenerator {
    layout: Option<MakepadLayout>,
    scan_options: ScanOptions,
    templates: Option<TemplateSet>,
    hover_table: Option<HoverTable>,
    snippets_file: Option<PathBuf>,
    docs_file: Option<PathBuf>,
    locations_file: Option<PathBuf>,
    hover_file: Option<PathBuf>,
}

impl ArtifactGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an already resolved checkout layout.
    pub fn layout(mut self, layout: MakepadLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Root of a Makepad checkout; widgets are read from `<root>/widgets/src`.
    ///
    /// Default: `$MAKEPAD_PATH`, then `~/makepad`.
    pub fn makepad_root(self, root: impl Into<PathBuf>) -> Self {
        self.layout(MakepadLayout::new(root))
    }

    /// Scan this widgets source directory directly.
    pub fn widgets_src(self, path: impl Into<PathBuf>) -> Self {
        self.layout(MakepadLayout::from_widgets_src(path))
    }

    pub fn scan_options(mut self, options: ScanOptions) -> Self {
        self.scan_options = options;
        self
    }

    /// Replace the exclusion policy, keeping the other scan options.
    pub fn exclusion_policy(mut self, policy: ExclusionPolicy) -> Self {
        self.scan_options.exclude = policy;
        self
    }

    /// Snippet templates. Default: the built-in table.
    pub fn templates(mut self, templates: TemplateSet) -> Self {
        self.templates = Some(templates);
        self
    }

    /// Curated hover text. Default: the built-in table.
    pub fn hover_table(mut self, table: HoverTable) -> Self {
        self.hover_table = Some(table);
        self
    }

    pub fn snippets_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.snippets_file = Some(path.into());
        self
    }

    pub fn docs_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.docs_file = Some(path.into());
        self
    }

    pub fn locations_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.locations_file = Some(path.into());
        self
    }

    pub fn hover_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.hover_file = Some(path.into());
        self
    }

    /// Run the generator.
    ///
    /// Scans the widgets directory once, then renders each requested
    /// artifact. Files whose content is unchanged are left alone.
    pub fn run(self) -> Result<GenerationReport> {
        let layout = self.layout.unwrap_or_else(MakepadLayout::from_env);
        let widgets_src = layout.widgets_src();
        if !widgets_src.is_dir() {
            log::warn!("widgets source {} does not exist", widgets_src.display());
        }

        let catalog = scan_widgets(&widgets_src, &self.scan_options)?;
        let mut report = GenerationReport {
            widgets_src,
            widgets: catalog.len(),
            ..Default::default()
        };

        if let Some(path) = &self.snippets_file {
            let templates = match self.templates {
                Some(templates) => templates,
                None => TemplateSet::builtin()?,
            };
            let (document, counts) = build_snippet_document(&catalog, &templates);
            report.record(path, write_if_changed(path, &to_pretty_json(&document)?)?);
            report.snippets = Some(counts);
        }

        if let Some(path) = &self.docs_file {
            report.record(path, write_if_changed(path, &render_documentation(&catalog))?);
        }

        if self.locations_file.is_none() && self.hover_file.is_none() {
            return Ok(report);
        }

        let index = index_locations(&layout, &self.scan_options)?;

        if let Some(path) = &self.locations_file {
            report.record(path, write_if_changed(path, &render_locations(&index)?)?);
            report.locations = Some(LocationCounts::from(&index));
        }

        if let Some(path) = &self.hover_file {
            let table = match self.hover_table {
                Some(table) => table,
                None => HoverTable::builtin()?,
            };
            let document = build_hover_document(&catalog, Some(&index), &table);
            report.record(path, write_if_changed(path, &to_pretty_json(&document)?)?);
            report.hover = Some(HoverCounts {
                widgets: document.widgets.len(),
                properties: document.properties.len(),
            });
        }

        Ok(report)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LocationCounts {
    pub widgets: usize,
    pub properties: usize,
    pub values: usize,
}

impl From<&LocationIndex> for LocationCounts {
    fn from(index: &LocationIndex) -> Self {
        Self {
            widgets: index.widgets.len(),
            properties: index.properties.len(),
            values: index.values.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HoverCounts {
    pub widgets: usize,
    pub properties: usize,
}

/// Summary of a generator run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub widgets_src: PathBuf,
    /// Widgets in the scanned catalog.
    pub widgets: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippets: Option<SnippetCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<LocationCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<HoverCounts>,
    /// Outputs whose content changed and were rewritten.
    pub written: Vec<PathBuf>,
    /// Outputs that already held the generated content.
    pub unchanged: Vec<PathBuf>,
}

impl GenerationReport {
    fn record(&mut self, path: &Path, written: bool) {
        if written {
            self.written.push(path.to_path_buf());
        } else {
            self.unchanged.push(path.to_path_buf());
        }
    }
}

/// Write `content` to `path` unless the file already holds exactly that.
///
/// Creates missing parent directories. Returns whether the file was written.
pub fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    if fs::read_to_string(path).is_ok_and(|existing| existing == content) {
        log::debug!("{} is up to date", path.display());
        return Ok(false);
    }

    fs::write(path, content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote {}", path.display());
    Ok(true)
}
