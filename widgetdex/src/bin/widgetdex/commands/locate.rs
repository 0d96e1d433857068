use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Table};
use serde::Serialize;
use std::path::PathBuf;

use widgetdex_build::{Located, RootSource};

use crate::context::ProjectContext;
use crate::examples::ExampleGroup;
use crate::output::{GlobalOptions, OutputManager, TableDisplay, add_table_header, create_table};

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Find Makepad",
    commands: &[
        "widgetdex locate                            # Show which checkout would be scanned",
        "widgetdex locate --hint ../my-app           # Also look next to another project",
    ],
}];

#[derive(Args, Debug)]
pub struct LocateArgs {
    /// Extra project directories to search around (repeatable)
    #[arg(long = "hint", value_name = "DIR")]
    pub hints: Vec<PathBuf>,
}

#[derive(Serialize)]
struct LocateResult {
    root: PathBuf,
    widgets_src: PathBuf,
    source: RootSource,
    exists: bool,
}

impl From<&Located> for LocateResult {
    fn from(located: &Located) -> Self {
        let widgets_src = located.layout.widgets_src();
        Self {
            root: located.layout.root().to_path_buf(),
            exists: widgets_src.is_dir(),
            widgets_src,
            source: located.source,
        }
    }
}

impl TableDisplay for LocateResult {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = create_table(options);
        add_table_header(&mut table, options, &["Setting", "Value"]);
        table.add_row(vec![Cell::new("Makepad root"), Cell::new(self.root.display())]);
        table.add_row(vec![Cell::new("Widgets source"), Cell::new(self.widgets_src.display())]);
        table.add_row(vec![Cell::new("Found via"), Cell::new(self.source)]);
        table.add_row(vec![Cell::new("Exists"), Cell::new(if self.exists { "yes" } else { "no" })]);
        table
    }

    fn to_compact(&self) -> String {
        format!("{} ({})", self.widgets_src.display(), self.source)
    }
}

pub fn handle_locate(args: LocateArgs, ctx: &ProjectContext, output: &OutputManager) -> Result<()> {
    output.heading("Locating Makepad widgets");

    if let Some(config_path) = &ctx.config_path {
        output.verbose(&format!("Using config {}", config_path.display()));
    }

    let located = ctx.locate(&args.hints);
    let result = LocateResult::from(&located);
    output.display(&result)?;

    if !result.exists {
        output.warning("No Makepad checkout found. Point widgetdex at one with:");
        output.bullet("--makepad-path <DIR>");
        output.bullet("the MAKEPAD_PATH environment variable");
        output.bullet("paths.makepad in widgetdex.toml");
    }
    Ok(())
}
