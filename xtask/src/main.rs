//! xtask - Development task runner for ordtree
//!
//! Usage:
//!   cargo xtask soak [--scenario <yaml>] [options]

mod soak;

use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development task runner for ordtree")]
struct Cli {
    /// Log progress at debug level
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a randomized insert/delete soak against the tree, validating after every operation
    Soak(soak::SoakArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    match cli.command {
        Commands::Soak(args) => soak::run(args),
    }
}
