//! `ccprobe flags` command
//!
//! Shows the compile flags a given compiler would get, without running it.

use anyhow::Result;

use ccprobe::core::options::BuildOptions;
use ccprobe::core::platform::TargetOs;
use ccprobe::ops::assemble_flags;
use ccprobe::toolchain::{CompilerVersion, ToolchainDescriptor};

use crate::cli::FlagsArgs;
use crate::commands::{suppression_mode, version_compare};

pub fn execute(args: FlagsArgs) -> Result<()> {
    let mut options = BuildOptions::new(TargetOs::host());
    options.diagnostic = args.diagnostic;
    options.raw_cflags = args.cflags.unwrap_or_default();
    options.version_compare = version_compare(args.lexical_versions);
    options.clang_suppressions = suppression_mode(args.overwrite_clang_suppressions);

    let descriptor = ToolchainDescriptor::new(
        args.family.as_str(),
        args.family,
        CompilerVersion::new(args.compiler_version),
    );

    for flag in assemble_flags(&descriptor, &options) {
        println!("{}", flag);
    }

    Ok(())
}
