//! `ccprobe toolchain` command

use std::sync::Arc;

use anyhow::Result;

use ccprobe::core::platform::TargetOs;
use ccprobe::toolchain::identify_compiler;
use ccprobe::util::config::{global_config_path, load_probe_config, project_config_path};
use ccprobe::util::process::SystemRunner;
use ccprobe::util::shell::{Shell, Status};

use crate::cli::ToolchainArgs;
use crate::commands::resolve_compiler;

pub fn execute(args: ToolchainArgs, shell: Arc<Shell>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = load_probe_config(global_config_path().as_deref(), &project_config_path(&cwd));
    let cc = resolve_compiler(args.cc, config.probe.cc)?;

    shell.status(Status::Checking, format!("C compiler {}", cc.display()));
    let descriptor = identify_compiler(&SystemRunner, &cc)?;

    println!("Toolchain:");
    println!("  CC:      {}", descriptor.compiler_path().display());
    println!("  Family:  {}", descriptor.family);
    println!("  Version: {}", descriptor.version.as_str());
    println!("  Host:    {}", TargetOs::host());

    Ok(())
}
