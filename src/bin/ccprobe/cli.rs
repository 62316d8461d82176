//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use ccprobe::core::platform::TargetOs;
use ccprobe::toolchain::CompilerFamily;
use ccprobe::util::shell::ColorChoice;

/// ccprobe - Probe a C toolchain and assemble the engine build configuration
#[derive(Parser)]
#[command(name = "ccprobe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe the compiler and print the build configuration
    Probe(ProbeArgs),

    /// Show the compile flags for a compiler family and version
    Flags(FlagsArgs),

    /// Identify the C compiler
    Toolchain(ToolchainArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for the build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ProbeArgs {
    /// C compiler to probe
    #[arg(long, env = "CC")]
    pub cc: Option<PathBuf>,

    /// Target triple to configure for (e.g., x86_64-unknown-linux-gnu)
    #[arg(long, conflicts_with = "os")]
    pub target: Option<String>,

    /// Target OS to configure for (linux, windows, darwin, other)
    #[arg(long)]
    pub os: Option<TargetOs>,

    /// Build with diagnostics and debug symbols
    #[arg(long)]
    pub diagnostic: bool,

    /// Build with attach support
    #[arg(long)]
    pub attach: bool,

    /// Spinlock implementation (gcc, msvc, pthread, pthread_adaptive)
    #[arg(long)]
    pub spinlock: Option<String>,

    /// Compiler flags passed to every trial compile
    #[arg(long, env = "CFLAGS", allow_hyphen_values = true)]
    pub cflags: Option<String>,

    /// Compare compiler versions as strings
    #[arg(long)]
    pub lexical_versions: bool,

    /// Let each clang suppression group replace the flags before it
    #[arg(long)]
    pub overwrite_clang_suppressions: bool,

    /// Extra include directory (repeatable)
    #[arg(long = "include-dir", value_name = "DIR")]
    pub include_dirs: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the configuration to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Compiler family (gcc, clang)
    #[arg(long)]
    pub family: CompilerFamily,

    /// Compiler version (e.g., 9.2.0)
    #[arg(long = "version", value_name = "VERSION")]
    pub compiler_version: String,

    /// Build with diagnostics and debug symbols
    #[arg(long)]
    pub diagnostic: bool,

    /// Flags the user already passes; an -O level here suppresses -O3
    #[arg(long, allow_hyphen_values = true)]
    pub cflags: Option<String>,

    /// Compare compiler versions as strings
    #[arg(long)]
    pub lexical_versions: bool,

    /// Let each clang suppression group replace the flags before it
    #[arg(long)]
    pub overwrite_clang_suppressions: bool,
}

#[derive(Args)]
pub struct ToolchainArgs {
    /// C compiler to identify
    #[arg(long, env = "CC")]
    pub cc: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
