//! colorize - CLI entry point

use std::io::{self, LineWriter};
use std::path::Path;

use anyhow::Result;
use clap::Parser;

use colorize::cli::Cli;
use colorize::input::Input;
use colorize::{logging, ColorPicker, Config, Options};

fn main() {
    let cli = Cli::parse();
    logging::init();

    if let Err(err) = run(cli) {
        eprintln!("{}: {:#}", progname(), err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(cli.config.as_deref())?;
    let options = Options::resolve(&cli, &config, &mut ColorPicker::new())?;
    tracing::debug!(
        mode = %options.mode,
        input = %options.input.display_name(),
        buffer_size = options.buffer_size,
        "Resolved options"
    );

    let input = Input::open(&options.input)?;
    let stdout = io::stdout();
    let output = LineWriter::new(stdout.lock());

    let lines = colorize::run(&options, input, output)?;
    tracing::debug!(lines, "Finished");
    Ok(())
}

/// Program name as invoked, for diagnostics.
fn progname() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "colorize".to_string())
}
