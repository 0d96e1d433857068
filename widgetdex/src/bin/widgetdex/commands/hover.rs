use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::commands::{print_report, run_generator};
use crate::context::ProjectContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Hover Documentation",
    commands: &[
        "widgetdex hover                             # Write src/hover.json",
        "widgetdex --output json hover --out h.json  # Machine-readable summary",
    ],
}];

#[derive(Args, Debug)]
pub struct HoverArgs {
    /// JSON file to write (default: output.hover from config)
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

pub fn handle_hover(args: HoverArgs, ctx: &ProjectContext, output: &OutputManager) -> Result<()> {
    output.heading("Generating hover documentation");

    let hover_file = ctx.output_path(args.out, &ctx.config.output.hover);
    let report = run_generator(ctx, output, |generator| {
        Ok(generator.hover_table(ctx.hover_table()?).hover_file(&hover_file))
    })?;

    if let Some(hover) = &report.hover {
        output.success(&format!(
            "Hover text for {} widgets and {} properties",
            hover.widgets, hover.properties
        ));
    }
    print_report(&report, output)
}
