#![doc = include_str!("../README.md")]

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::enumerate::run_enumerate_command;
use commands::simplify::{run_simplify_command, SimplifyArgs};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Simplify {
            rule_file,
            input,
            timeout,
            oracle,
            enrich_size,
            dump_dir,
            format,
        } => run_simplify_command(SimplifyArgs {
            rule_file,
            input,
            timeout,
            oracle,
            enrich_size,
            dump_dir,
            format,
        }),
        Commands::Enumerate {
            rule_file,
            input,
            size,
        } => run_enumerate_command(rule_file, input, size),
    }
}
