use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::commands::{print_report, run_generator};
use crate::context::ProjectContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Go-to-Definition Index",
    commands: &[
        "widgetdex locations                         # Write src/locations.json",
        "widgetdex locations --with-values           # Also index Fill, Down, Centered, ...",
    ],
}];

#[derive(Args, Debug)]
pub struct LocationsArgs {
    /// JSON file to write (default: output.locations from config)
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Also record where layout enum values are declared
    #[arg(long)]
    pub with_values: bool,
}

pub fn handle_locations(args: LocationsArgs, ctx: &ProjectContext, output: &OutputManager) -> Result<()> {
    output.heading("Finding widget locations");

    let locations_file = ctx.output_path(args.out, &ctx.config.output.locations);
    let mut options = ctx.scan_options();
    options.index_values |= args.with_values;

    let report = run_generator(ctx, output, |generator| {
        Ok(generator.scan_options(options).locations_file(&locations_file))
    })?;

    if let Some(locations) = &report.locations {
        output.success(&format!(
            "Found {} widgets and {} properties",
            locations.widgets, locations.properties
        ));
    }
    print_report(&report, output)
}
