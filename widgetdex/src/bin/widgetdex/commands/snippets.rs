use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::commands::{print_report, run_generator};
use crate::context::ProjectContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Generate Snippets",
        commands: &[
            "widgetdex snippets                          # Snippets plus docs/WIDGETS.md",
            "widgetdex snippets --no-docs                # Snippets only",
            "widgetdex snippets --out vscode/mp.json     # Custom snippet file",
        ],
    },
    ExampleGroup {
        title: "Other Checkouts",
        commands: &["widgetdex --makepad-path ~/src/makepad snippets"],
    },
];

#[derive(Args, Debug)]
pub struct SnippetsArgs {
    /// Snippet file to write (default: output.snippets from config)
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Widget reference to write alongside (default: output.docs from config)
    #[arg(long, value_name = "FILE", conflicts_with = "no_docs")]
    pub docs_out: Option<PathBuf>,

    /// Skip the Markdown widget reference
    #[arg(long)]
    pub no_docs: bool,
}

pub fn handle_snippets(args: SnippetsArgs, ctx: &ProjectContext, output: &OutputManager) -> Result<()> {
    output.heading("Extracting widgets from Makepad source");

    let snippets_file = ctx.output_path(args.out, &ctx.config.output.snippets);
    let docs_file = (!args.no_docs).then(|| ctx.output_path(args.docs_out, &ctx.config.output.docs));

    let report = run_generator(ctx, output, |generator| {
        let generator = generator.templates(ctx.templates()?).snippets_file(&snippets_file);
        Ok(match &docs_file {
            Some(path) => generator.docs_file(path),
            None => generator,
        })
    })?;

    output.success(&format!("Found {} widgets", report.widgets));
    print_report(&report, output)
}
