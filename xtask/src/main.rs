//! xtask - Build tasks for colorize
//!
//! Run with: cargo xtask <command>
//!
//! Commands:
//! - gen-docs: Generate documentation (man page, OPTIONS.md)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

use colorize::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build tasks for colorize")]
struct Xtask {
    #[command(subcommand)]
    command: XtaskCommand,
}

#[derive(Subcommand)]
enum XtaskCommand {
    /// Generate documentation from CLI definitions
    #[command(name = "gen-docs")]
    GenDocs {
        /// Output directory (default: docs/)
        #[arg(long, short, default_value = "docs")]
        output: PathBuf,

        /// Generate the man page only
        #[arg(long)]
        man: bool,

        /// Generate OPTIONS.md only
        #[arg(long)]
        markdown: bool,
    },
}

fn main() -> Result<()> {
    let args = Xtask::parse();

    match args.command {
        XtaskCommand::GenDocs {
            output,
            man,
            markdown,
        } => {
            let gen_all = !man && !markdown;
            if gen_all || man {
                generate_man_page(&output)?;
            }
            if gen_all || markdown {
                generate_markdown(&output)?;
            }
        }
    }

    Ok(())
}

/// Generate colorize.1 using clap_mangen
fn generate_man_page(output: &Path) -> Result<()> {
    use clap_mangen::Man;

    let man_dir = output.join("man");
    fs::create_dir_all(&man_dir).context("Failed to create man directory")?;

    let mut buffer = Vec::new();
    Man::new(Cli::command()).render(&mut buffer)?;
    let path = man_dir.join("colorize.1");
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Generated: {}", path.display());
    Ok(())
}

/// Generate OPTIONS.md from the argument definitions
fn generate_markdown(output: &Path) -> Result<()> {
    fs::create_dir_all(output).context("Failed to create output directory")?;

    let cmd = Cli::command();
    let mut markdown = String::from("# colorize\n\n");
    markdown.push_str("This document is auto-generated from the CLI definitions.\n\n");
    if let Some(long_about) = cmd.get_long_about() {
        markdown.push_str(&format!("```\n{}\n```\n\n", long_about));
    }

    let (positional, options): (Vec<_>, Vec<_>) =
        cmd.get_arguments().partition(|arg| arg.is_positional());

    markdown.push_str("## Arguments\n\n");
    for arg in positional {
        markdown.push_str(&format!("- `<{}>`", arg.get_id().as_str().to_uppercase()));
        if let Some(help) = arg.get_help() {
            markdown.push_str(&format!(": {}", help));
        }
        markdown.push('\n');
    }

    markdown.push_str("\n## Options\n\n");
    for arg in options {
        let mut flags = Vec::new();
        if let Some(short) = arg.get_short() {
            flags.push(format!("-{}", short));
        }
        if let Some(long) = arg.get_long() {
            flags.push(format!("--{}", long));
        }
        markdown.push_str(&format!("- `{}`", flags.join(", ")));
        if let Some(help) = arg.get_help() {
            markdown.push_str(&format!(": {}", help));
        }
        markdown.push('\n');
    }

    if let Some(after) = cmd.get_after_help() {
        markdown.push_str(&format!("\n```\n{}\n```\n", after));
    }

    let path = output.join("OPTIONS.md");
    fs::write(&path, markdown).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Generated: {}", path.display());
    Ok(())
}
