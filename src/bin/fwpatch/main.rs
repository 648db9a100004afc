// main.rs from fwpatch (c) 2026 fwpatch Contributors
//
// Base for the fwpatch CLI that handles argument parsing and directs execution
// to the proper module.

mod info;
mod patch;
mod shared;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
#[command(arg_required_else_help = true)]
enum Commands {
    /// Identify a firmware image and list the patches available for it
    Info {
        /// The path to a firmware image
        input: String,
        /// Highest patch maturity level to list (devonly, alpha, beta, released)
        #[arg(short, long, default_value = "released")]
        max_level: String,
    },
    /// Check that the recorded patch bytes still match a firmware image
    Verify {
        /// The path to a firmware image
        input: String,
        /// Highest patch maturity level to check (devonly, alpha, beta, released)
        #[arg(short, long, default_value = "released")]
        max_level: String,
    },
    /// Apply selected patches to a firmware image
    Patch {
        /// The path to a firmware image
        input: String,
        /// The path the patched image will be written to
        output: String,
        /// Enable the named patch group (may be repeated)
        #[arg(short, long)]
        enable: Vec<String>,
        /// Enable every patch group offered for the matched firmware
        #[arg(short, long)]
        all: bool,
        /// Highest patch maturity level to offer (devonly, alpha, beta, released)
        #[arg(short, long, default_value = "released")]
        max_level: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Info { input, max_level }) => {
            info::info(input, max_level)?
        },
        Some(Commands::Verify { input, max_level }) => {
            info::verify(input, max_level)?
        },
        Some(Commands::Patch { input, output, enable, all, max_level }) => {
            patch::patch(input, output, enable, *all, max_level)?
        },
        None => { /* clap enforces arg_required_else_help */ }
    }
    Ok(())
}
