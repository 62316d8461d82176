//! ccprobe CLI - C toolchain probing for the storage engine build

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ccprobe::probe::ProbeError;
use ccprobe::util::diagnostic::{emit, Diagnostic};
use ccprobe::util::shell::Shell;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("ccprobe=debug")
    } else {
        EnvFilter::new("ccprobe=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let shell = Arc::new(Shell::from_flags(cli.quiet, cli.verbose, cli.color));

    if let Err(e) = run(cli.command, Arc::clone(&shell)) {
        report(&e, &shell);
        std::process::exit(1);
    }
}

fn run(command: Commands, shell: Arc<Shell>) -> Result<()> {
    match command {
        Commands::Probe(args) => commands::probe::execute(args, shell),
        Commands::Flags(args) => commands::flags::execute(args),
        Commands::Toolchain(args) => commands::toolchain::execute(args, shell),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Print a failed run.
///
/// An unusable required type is a configuration verdict, not a tool failure:
/// it goes to stdout as a single line. Everything else goes to stderr.
fn report(error: &anyhow::Error, shell: &Shell) {
    match error.downcast_ref::<ProbeError>() {
        Some(probe) if probe.is_fatal_config() => println!("{}", probe),
        Some(probe) => emit(&probe.to_diagnostic(), shell.use_color()),
        None => emit(&Diagnostic::error(format!("{:#}", error)), shell.use_color()),
    }
}
