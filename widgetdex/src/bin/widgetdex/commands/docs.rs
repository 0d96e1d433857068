use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::commands::{print_report, run_generator};
use crate::context::ProjectContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Widget Reference",
    commands: &[
        "widgetdex docs                              # Write docs/WIDGETS.md",
        "widgetdex docs --out book/widgets.md        # Custom location",
    ],
}];

#[derive(Args, Debug)]
pub struct DocsArgs {
    /// Markdown file to write (default: output.docs from config)
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

pub fn handle_docs(args: DocsArgs, ctx: &ProjectContext, output: &OutputManager) -> Result<()> {
    output.heading("Generating widget reference");

    let docs_file = ctx.output_path(args.out, &ctx.config.output.docs);
    let report = run_generator(ctx, output, |generator| Ok(generator.docs_file(&docs_file)))?;

    output.success(&format!("Documented {} widgets", report.widgets));
    print_report(&report, output)
}
