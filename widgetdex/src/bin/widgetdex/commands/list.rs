use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Table};
use serde::Serialize;
use std::path::PathBuf;

use widgetdex_build::{Widget, scan_widgets};

use crate::commands::announce_root;
use crate::context::ProjectContext;
use crate::examples::ExampleGroup;
use crate::output::{GlobalOptions, OutputManager, TableDisplay, add_table_header, create_table};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Browse Widgets",
        commands: &[
            "widgetdex list                              # Every widget with its file",
            "widgetdex list --properties                 # Include #[live] fields",
            "widgetdex list scroll                       # Names containing 'scroll'",
        ],
    },
    ExampleGroup {
        title: "Scripting",
        commands: &["widgetdex --output json list | jq '.widgets[].name'"],
    },
];

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show widgets whose name contains this text (case-insensitive)
    pub filter: Option<String>,

    /// Show each widget's #[live] properties
    #[arg(long)]
    pub properties: bool,
}

#[derive(Serialize)]
struct CatalogListing {
    widgets_src: PathBuf,
    widgets: Vec<Widget>,
    #[serde(skip)]
    show_properties: bool,
}

impl TableDisplay for CatalogListing {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = create_table(options);
        if self.show_properties {
            add_table_header(&mut table, options, &["Widget", "File", "Properties", "Description"]);
        } else {
            add_table_header(&mut table, options, &["Widget", "File", "Props", "Description"]);
        }

        for widget in &self.widgets {
            let properties = if self.show_properties {
                widget
                    .properties
                    .iter()
                    .map(|p| match &p.default {
                        Some(default) => format!("{}: {} = {default}", p.name, p.prop_type),
                        None => format!("{}: {}", p.name, p.prop_type),
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            } else {
                widget.properties.len().to_string()
            };
            table.add_row(vec![
                Cell::new(&widget.name),
                Cell::new(&widget.file),
                Cell::new(properties),
                Cell::new(widget.description()),
            ]);
        }

        table
    }

    fn to_compact(&self) -> String {
        self.widgets
            .iter()
            .map(|w| w.name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn handle_list(args: ListArgs, ctx: &ProjectContext, output: &OutputManager) -> Result<()> {
    let located = ctx.locate(&[]);
    announce_root(&located, output);

    let widgets_src = located.layout.widgets_src();
    let catalog = scan_widgets(&widgets_src, &ctx.scan_options())
        .with_context(|| format!("Failed to scan {}", widgets_src.display()))?;

    let needle = args.filter.as_deref().map(str::to_lowercase);
    let widgets: Vec<Widget> = catalog
        .iter()
        .filter(|w| needle.as_ref().is_none_or(|n| w.name.to_lowercase().contains(n.as_str())))
        .cloned()
        .collect();

    output.heading(&format!("Widgets in {}", widgets_src.display()));
    if widgets.is_empty() {
        output.warning("No matching widgets found");
    }

    let listing = CatalogListing {
        widgets_src,
        widgets,
        show_properties: args.properties,
    };
    output.display(&listing)?;
    output.info(&format!("{} of {} widgets shown", listing.widgets.len(), catalog.len()));
    Ok(())
}
