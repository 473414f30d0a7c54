//! CLI definitions for colorize
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be accessed by xtask for man page generation.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use std::path::PathBuf;

use crate::attr::ATTRIBUTE_CODES;
use crate::color::FG_COLORS;
use crate::selection::RANDOM;

/// Version line with the commit the binary was built from.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("VERGEN_GIT_SHA"),
    ")"
);

/// Build clap styles for the help output.
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

/// Help section listing color and attribute names.
pub fn color_help() -> String {
    let colors: Vec<&str> = FG_COLORS
        .iter()
        .map(|entry| entry.name)
        .chain([RANDOM])
        .collect();
    let attrs: Vec<&str> = ATTRIBUTE_CODES.iter().map(|(name, _, _)| *name).collect();
    format!(
        "COLORS:\n    {}\n\n\
         A capitalised foreground color (e.g. Red) is printed bold.\n\
         A 'none' foreground with a background color falls back to 'default'.\n\n\
         ATTRIBUTES:\n    {}",
        colors.join(", "),
        attrs.join(", ")
    )
}

#[derive(Parser, Debug)]
#[command(name = "colorize")]
#[command(
    about = "Read text from standard input or a file and print it colorized through ANSI escape sequences"
)]
#[command(long_about = "Read text from standard input or a file and print it colorized through \
ANSI escape sequences, or strip existing color sequences with --clean / --clean-all.

EXAMPLES:
    colorize red file.txt              Print file.txt in red
    colorize Green/black -             Bold green on black from stdin
    colorize random --exclude-random=black
    colorize --rainbow-fg red log.txt  Cycle foreground colors per line
    colorize --clean colored.txt       Remove color sequences")]
#[command(version, long_version = LONG_VERSION)]
#[command(styles = build_cli_styles())]
#[command(after_help = color_help())]
pub struct Cli {
    /// Color string: foreground or foreground/background (the file in clean modes)
    #[arg(value_name = "COLOR")]
    pub color: Option<String>,

    /// Input file, or '-' for standard input
    #[arg(value_name = "FILE")]
    pub file: Option<String>,

    /// Attributes combined with the foreground color (comma separated)
    #[arg(short, long, value_name = "ATTR", value_delimiter = ',')]
    pub attr: Vec<String>,

    /// Remove color and attribute sequences that colorize itself could have produced
    #[arg(long, conflicts_with_all = ["clean_all", "attr", "exclude_random", "omit_color_empty", "rainbow_fg", "rainbow_bg"])]
    pub clean: bool,

    /// Remove every sequence shaped like ESC[...m
    #[arg(long, conflicts_with_all = ["attr", "exclude_random", "omit_color_empty", "rainbow_fg", "rainbow_bg"])]
    pub clean_all: bool,

    /// Foreground color never chosen for 'random'
    #[arg(long, value_name = "COLOR")]
    pub exclude_random: Option<String>,

    /// Do not colorize empty lines
    #[arg(long)]
    pub omit_color_empty: bool,

    /// Cycle the foreground color on each line
    #[arg(long, conflicts_with = "rainbow_bg")]
    pub rainbow_fg: bool,

    /// Cycle the background color on each line
    #[arg(long)]
    pub rainbow_bg: bool,

    /// Read chunk size in bytes (1-65536)
    #[arg(long, value_name = "BYTES")]
    pub buffer_size: Option<usize>,

    /// Configuration file (default: ~/.config/colorize/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
