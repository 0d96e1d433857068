pub mod all;
pub mod docs;
pub mod hover;
pub mod list;
pub mod locate;
pub mod locations;
pub mod snippets;

use anyhow::{Context, Result};
use comfy_table::Cell;
use widgetdex_build::{ArtifactGenerator, GenerationReport, Located, generate_artifacts};

use crate::context::ProjectContext;
use crate::output::{GlobalOptions, OutputManager, TableDisplay, add_table_header, create_table};

/// Resolve the checkout, let `configure` choose the outputs, then run.
pub(crate) fn run_generator<F>(ctx: &ProjectContext, output: &OutputManager, configure: F) -> Result<GenerationReport>
where
    F: FnOnce(ArtifactGenerator) -> Result<ArtifactGenerator>,
{
    if let Some(config_path) = &ctx.config_path {
        output.verbose(&format!("Using config {}", config_path.display()));
    }
    let located = ctx.locate(&[]);
    announce_root(&located, output);

    let generator = generate_artifacts()
        .layout(located.layout.clone())
        .scan_options(ctx.scan_options());

    output.progress("Scanning widget sources");
    let result = configure(generator).and_then(|g| g.run().context("Artifact generation failed"));
    output.clear_line();
    let report = result?;

    if report.widgets == 0 {
        output.warning(&format!("No widgets found in {}", report.widgets_src.display()));
    }
    Ok(report)
}

pub(crate) fn announce_root(located: &Located, output: &OutputManager) {
    output.key_value(
        "Makepad root",
        &format!("{} (via {})", located.layout.root().display(), located.source),
    );
}

/// Print the file list and the summary of a generator run.
pub(crate) fn print_report(report: &GenerationReport, output: &OutputManager) -> Result<()> {
    for path in &report.written {
        output.file_status(path, true);
    }
    for path in &report.unchanged {
        output.file_status(path, false);
    }
    output.display(report)
}

impl TableDisplay for GenerationReport {
    fn to_table(&self, options: &GlobalOptions) -> comfy_table::Table {
        let mut table = create_table(options);
        add_table_header(&mut table, options, &["Artifact", "Count"]);

        table.add_row(vec![Cell::new("Widgets scanned"), Cell::new(self.widgets)]);
        if let Some(snippets) = &self.snippets {
            table.add_row(vec![Cell::new("Widget snippets"), Cell::new(snippets.widgets)]);
            table.add_row(vec![Cell::new("Property snippets"), Cell::new(snippets.properties)]);
            table.add_row(vec![Cell::new("Code snippets"), Cell::new(snippets.code)]);
            table.add_row(vec![Cell::new("Layout snippets"), Cell::new(snippets.layouts)]);
            table.add_row(vec![Cell::new("Total snippets"), Cell::new(snippets.total)]);
        }
        if let Some(locations) = &self.locations {
            table.add_row(vec![Cell::new("Widget locations"), Cell::new(locations.widgets)]);
            table.add_row(vec![Cell::new("Property locations"), Cell::new(locations.properties)]);
            if locations.values > 0 {
                table.add_row(vec![Cell::new("Value locations"), Cell::new(locations.values)]);
            }
        }
        if let Some(hover) = &self.hover {
            table.add_row(vec![Cell::new("Hover widgets"), Cell::new(hover.widgets)]);
            table.add_row(vec![Cell::new("Hover properties"), Cell::new(hover.properties)]);
        }
        table
    }

    fn to_compact(&self) -> String {
        let mut parts = vec![format!("widgets={}", self.widgets)];
        if let Some(snippets) = &self.snippets {
            parts.push(format!("snippets={}", snippets.total));
        }
        if let Some(locations) = &self.locations {
            parts.push(format!("locations={}+{}", locations.widgets, locations.properties));
        }
        if let Some(hover) = &self.hover {
            parts.push(format!("hover={}", hover.widgets + hover.properties));
        }
        parts.push(format!("written={}", self.written.len()));
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use widgetdex_build::emitter::SnippetCounts;

    #[test]
    fn test_report_compact() {
        let report = GenerationReport {
            widgets: 3,
            snippets: Some(SnippetCounts {
                widgets: 3,
                properties: 23,
                code: 16,
                layouts: 8,
                total: 50,
            }),
            written: vec!["a.json".into()],
            ..Default::default()
        };
        assert_eq!(report.to_compact(), "widgets=3 snippets=50 written=1");
    }

    #[test]
    fn test_report_table_rows() {
        let report = GenerationReport {
            widgets: 2,
            ..Default::default()
        };
        let rendered = report
            .to_table(&GlobalOptions {
                no_color: true,
                ..Default::default()
            })
            .to_string();
        assert!(rendered.contains("Widgets scanned"));
        assert!(!rendered.contains("Total snippets"));
    }
}
