use clap::builder::{
    Styles,
    styling::{AnsiColor, Style},
};
use colored::Color;
use once_cell::sync::Lazy;

/// Colors used for console messages and `--help` rendering
pub struct ColorTheme {
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    pub highlight: Color,
    pub muted: Color,
    pub primary: Color,
    /// Example invocations and flag literals in help text.
    pub command: Color,
    pub key: Color,
    pub value: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Blue,
            highlight: Color::Cyan,
            muted: Color::BrightBlack,
            primary: Color::BrightBlue,
            command: Color::Magenta,
            key: Color::BrightCyan,
            value: Color::White,
        }
    }
}

impl ColorTheme {
    /// Clap styles matching the console palette.
    pub fn help_styles(&self) -> Styles {
        Styles::styled()
            .usage(help_style(self.primary).bold())
            .header(help_style(self.highlight).bold())
            .literal(help_style(self.command))
            .placeholder(help_style(self.muted))
            .valid(help_style(self.success))
            .invalid(help_style(self.warning))
            .error(help_style(self.error).bold())
    }
}

fn help_style(color: Color) -> Style {
    let ansi = match color {
        Color::Green => AnsiColor::Green,
        Color::Red => AnsiColor::Red,
        Color::Yellow => AnsiColor::Yellow,
        Color::Blue => AnsiColor::Blue,
        Color::Cyan => AnsiColor::Cyan,
        Color::Magenta => AnsiColor::Magenta,
        Color::BrightBlack => AnsiColor::BrightBlack,
        Color::BrightBlue => AnsiColor::BrightBlue,
        Color::BrightCyan => AnsiColor::BrightCyan,
        // Anything else the palette never uses renders unstyled.
        _ => return Style::new(),
    };
    Style::new().fg_color(Some(ansi.into()))
}

pub static THEME: Lazy<ColorTheme> = Lazy::new(ColorTheme::default);

pub struct Icons {
    pub success: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub info: &'static str,
    pub arrow: &'static str,
    pub bullet: &'static str,
    pub loading: &'static str,
    pub unchanged: &'static str,
    pub file: &'static str,
}

pub const ICONS: Icons = Icons {
    success: "✓",
    error: "✗",
    warning: "⚠",
    info: "ℹ",
    arrow: "→",
    bullet: "•",
    loading: "⟳",
    unchanged: "=",
    file: "📄",
};
