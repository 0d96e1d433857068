mod commands;
mod context;
mod examples;
mod output;
mod theme;

use anyhow::Result;
use clap::{ColorChoice, Command, CommandFactory, FromArgMatches, Parser, Subcommand, error::ErrorKind};

use colored::{Color as ThemeColor, Colorize, control::ShouldColorize};
use std::fmt::Write;
use std::io::{self, Write as IoWrite};
use std::path::PathBuf;

use commands::{
    all::{AllArgs, handle_all},
    docs::{DocsArgs, handle_docs},
    hover::{HoverArgs, handle_hover},
    list::{ListArgs, handle_list},
    locate::{LocateArgs, handle_locate},
    locations::{LocationsArgs, handle_locations},
    snippets::{SnippetsArgs, handle_snippets},
};
use context::ProjectContext;
use examples::{ExampleGroup, command_examples};
use output::{GlobalOptions, OutputFormat, OutputManager};
use theme::{ICONS, THEME};

const ENVIRONMENT_VARIABLES: &[(&str, &str)] = &[
    ("MAKEPAD_PATH", "Root of the Makepad checkout to scan"),
    ("WIDGETDEX_CONFIG", "Config file to use instead of ./widgetdex.toml"),
    ("RUST_LOG", "Log filter for diagnostics, e.g. widgetdex_build=debug"),
];

#[derive(Parser)]
#[command(name = "widgetdex")]
#[command(version)]
#[command(
    about = "Editor snippets, docs and go-to-definition data from Makepad widget sources",
    long_about = r#"Scans a Makepad checkout's widgets/src for widget structs and their
#[live] properties, and generates editor integration files:

• VS Code snippets for common widgets and layout patterns
• A Markdown reference of every widget
• A go-to-definition index of widget and property declarations
• Hover documentation for widgets and layout properties

Commands:
  snippets   Snippet JSON (and the widget reference)
  docs       Markdown widget reference
  locations  Go-to-definition index
  hover      Hover documentation
  all        Every artifact
  list       Print the scanned widgets
  locate     Show which Makepad checkout is used
"#
)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Suppress output (only errors will be shown)
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Config file (default: widgetdex.toml in this or a parent directory)
    #[arg(long, env = "WIDGETDEX_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Makepad checkout root (overrides MAKEPAD_PATH and the config file)
    #[arg(long, value_name = "DIR")]
    makepad_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn parse_with_styles() -> Self {
        let command = build_cli_command();
        match command.styles(THEME.help_styles()).try_get_matches() {
            Ok(matches) => Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit()),
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = print_blank_line(io::stdout());
                    if let Err(print_err) = err.print()
                        && print_err.kind() != io::ErrorKind::BrokenPipe
                    {
                        eprintln!("Failed to display help: {print_err}");
                    }
                    let _ = print_blank_line(io::stdout());
                    std::process::exit(0);
                }
                ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    handle_missing_subcommand(err);
                }
                _ => {
                    let exit_code = err.exit_code();
                    let _ = print_blank_line(io::stderr());
                    if let Err(print_err) = err.print()
                        && print_err.kind() != io::ErrorKind::BrokenPipe
                    {
                        eprintln!("Failed to display error: {print_err}");
                    }
                    let _ = print_blank_line(io::stderr());
                    std::process::exit(exit_code);
                }
            },
        }
    }
}

fn handle_missing_subcommand(error: clap::error::Error) -> ! {
    let mut command = build_cli_command();
    let command_name = command
        .get_display_name()
        .unwrap_or_else(|| command.get_name())
        .to_string();

    let _ = print_blank_line(io::stderr());
    eprintln!("error: '{command_name}' requires a subcommand but one was not provided");
    let _ = print_blank_line(io::stderr());

    command = command.styles(THEME.help_styles());

    let mut stderr = io::stderr();
    if command.write_long_help(&mut stderr).is_ok() {
        let _ = IoWrite::write_all(&mut stderr, b"\n");
        let _ = IoWrite::flush(&mut stderr);
    }

    let _ = print_blank_line(io::stderr());
    std::process::exit(error.exit_code());
}

fn build_cli_command() -> Command {
    let use_color = detect_color_support();
    let appendix = render_top_level_appendix(use_color);
    let mut command = Cli::command().after_long_help(appendix);
    command = command.color(if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    });
    attach_command_examples(&mut command, use_color);
    command
}

fn attach_command_examples(command: &mut Command, use_color: bool) {
    for example in command_examples() {
        if let Some(subcommand) = command.find_subcommand_mut(example.name) {
            let help_text = render_examples(example.groups, use_color);
            let mut updated = subcommand.clone();
            updated = updated.after_long_help(help_text);
            *subcommand = updated;
        }
    }
}

fn render_examples(groups: &[ExampleGroup], use_color: bool) -> String {
    let theme = &THEME;
    let mut buffer = String::new();

    let heading = stylize("Examples:", theme.highlight, true, use_color);
    let _ = writeln!(buffer, "{heading}");

    for (index, group) in groups.iter().enumerate() {
        let title = stylize(group.title, theme.primary, true, use_color);
        let _ = writeln!(buffer, "  {title}");

        for command in group.commands {
            let arrow = stylize(ICONS.arrow, theme.command, false, use_color);
            let command_text = stylize(command, theme.command, false, use_color);
            let _ = writeln!(buffer, "    {arrow} {command_text}");
        }

        if index + 1 < groups.len() {
            buffer.push('\n');
        }
    }

    if !buffer.ends_with('\n') {
        buffer.push('\n');
    }

    buffer
}

fn render_top_level_appendix(use_color: bool) -> String {
    let theme = &THEME;
    let mut buffer = String::new();

    let env_heading = stylize("Environment Variables:", theme.highlight, true, use_color);
    let _ = writeln!(buffer, "{env_heading}");
    for (key, description) in ENVIRONMENT_VARIABLES {
        let key_text = stylize(key, theme.key, true, use_color);
        let value_text = stylize(description, theme.value, false, use_color);
        let _ = writeln!(buffer, "  {key_text}  {value_text}");
    }

    buffer.push('\n');

    let tip_heading = stylize("Tip:", theme.highlight, true, use_color);
    let tip_text = stylize(
        "Use 'widgetdex <command> --help' to view examples for each command.",
        theme.command,
        false,
        use_color,
    );
    let _ = writeln!(buffer, "{tip_heading} {tip_text}");

    buffer
}

fn print_blank_line(mut out: impl IoWrite) -> io::Result<()> {
    out.write_all(b"\n")?;
    out.flush()
}

fn stylize(text: &str, color: ThemeColor, bold: bool, use_color: bool) -> String {
    if use_color {
        let styled = text.color(color);
        if bold {
            styled.bold().to_string()
        } else {
            styled.to_string()
        }
    } else {
        text.to_string()
    }
}

fn detect_color_support() -> bool {
    ShouldColorize::from_env().should_colorize()
}

#[derive(Subcommand)]
enum Commands {
    /// Generate VS Code snippets (and the widget reference)
    Snippets(SnippetsArgs),

    /// Generate the Markdown widget reference
    Docs(DocsArgs),

    /// Generate the go-to-definition location index
    Locations(LocationsArgs),

    /// Generate hover documentation
    Hover(HoverArgs),

    /// Generate every artifact to the configured paths
    All(AllArgs),

    /// List the widgets found in the Makepad sources
    List(ListArgs),

    /// Show which Makepad checkout would be scanned
    Locate(LocateArgs),
}

fn main() {
    env_logger::init();

    let cli = Cli::parse_with_styles();

    let _ = print_blank_line(io::stdout());

    match execute(cli) {
        Ok(()) => {
            let _ = print_blank_line(io::stdout());
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            let _ = print_blank_line(io::stdout());
            std::process::exit(1);
        }
    }
}

fn execute(cli: Cli) -> Result<()> {
    let global_options = GlobalOptions {
        output_format: cli.output,
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color,
    };

    if global_options.no_color {
        colored::control::set_override(false);
    }

    let output = OutputManager::new(global_options);
    let ctx = match ProjectContext::load(cli.config.as_deref(), cli.makepad_path) {
        Ok(ctx) => ctx,
        Err(err) => {
            output.error("Could not load widgetdex configuration.");
            return Err(err);
        }
    };

    match cli.command {
        Commands::Snippets(args) => handle_snippets(args, &ctx, &output)?,
        Commands::Docs(args) => handle_docs(args, &ctx, &output)?,
        Commands::Locations(args) => handle_locations(args, &ctx, &output)?,
        Commands::Hover(args) => handle_hover(args, &ctx, &output)?,
        Commands::All(args) => handle_all(args, &ctx, &output)?,
        Commands::List(args) => handle_list(args, &ctx, &output)?,
        Commands::Locate(args) => handle_locate(args, &ctx, &output)?,
    }

    Ok(())
}
