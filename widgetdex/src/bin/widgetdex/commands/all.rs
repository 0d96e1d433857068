use anyhow::Result;
use clap::Args;

use crate::commands::{print_report, run_generator};
use crate::context::ProjectContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Everything",
    commands: &[
        "widgetdex all                               # Every artifact to the configured paths",
        "widgetdex --config tools/widgetdex.toml all",
    ],
}];

#[derive(Args, Debug)]
pub struct AllArgs {
    /// Also record where layout enum values are declared
    #[arg(long)]
    pub with_values: bool,
}

pub fn handle_all(args: AllArgs, ctx: &ProjectContext, output: &OutputManager) -> Result<()> {
    output.heading("Generating all artifacts");

    let outputs = &ctx.config.output;
    let mut options = ctx.scan_options();
    options.index_values |= args.with_values;

    let report = run_generator(ctx, output, |generator| {
        Ok(generator
            .scan_options(options)
            .templates(ctx.templates()?)
            .hover_table(ctx.hover_table()?)
            .snippets_file(ctx.resolve_path(&outputs.snippets))
            .docs_file(ctx.resolve_path(&outputs.docs))
            .locations_file(ctx.resolve_path(&outputs.locations))
            .hover_file(ctx.resolve_path(&outputs.hover)))
    })?;

    output.success(&format!(
        "Generated {} artifact(s) from {} widgets",
        report.written.len() + report.unchanged.len(),
        report.widgets
    ));
    print_report(&report, output)
}
