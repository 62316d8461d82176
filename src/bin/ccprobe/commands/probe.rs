//! `ccprobe probe` command
//!
//! Runs the whole configure pipeline against a real compiler.

use std::sync::Arc;

use anyhow::{bail, Context, Result};

use ccprobe::core::options::{BuildOptions, Spinlock};
use ccprobe::core::platform::{TargetOs, TargetTriple};
use ccprobe::ops::{configure, ConfigureRequest};
use ccprobe::util::config::{
    global_config_path, load_probe_config, project_config_path, ProbeSettings,
};
use ccprobe::util::diagnostic::{emit, Diagnostic};
use ccprobe::util::process::SystemRunner;
use ccprobe::util::shell::Shell;

use crate::cli::{OutputFormat, ProbeArgs};
use crate::commands::{resolve_compiler, suppression_mode, version_compare};

pub fn execute(args: ProbeArgs, shell: Arc<Shell>) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let settings =
        load_probe_config(global_config_path().as_deref(), &project_config_path(&cwd)).probe;

    let compiler = resolve_compiler(args.cc.clone(), settings.cc.clone())?;
    let target_os = resolve_target_os(&args, &settings)?;

    let mut options = BuildOptions::new(target_os);
    options.diagnostic = args.diagnostic || settings.diagnostic;
    options.attach = args.attach || settings.attach;
    options.spinlock = resolve_spinlock(args.spinlock.or(settings.spinlock), &shell);
    options.raw_cflags = args.cflags.or(settings.cflags).unwrap_or_default();
    options.version_compare = version_compare(args.lexical_versions || settings.lexical_versions);
    options.clang_suppressions =
        suppression_mode(args.overwrite_clang_suppressions || settings.overwrite_clang_suppressions);

    let mut extra_include_dirs = settings.include_dirs;
    extra_include_dirs.extend(args.include_dirs);

    let request = ConfigureRequest {
        compiler,
        options,
        extra_include_dirs,
    };

    let started = shell.start();
    let config = configure(SystemRunner, &request, Some(Arc::clone(&shell)))?;
    shell.finish(started, format!("probing {}", request.compiler.display()));

    match (args.output, args.format) {
        (Some(path), OutputFormat::Json) => config.save(&path)?,
        (Some(path), OutputFormat::Text) => std::fs::write(&path, config.to_text())
            .with_context(|| format!("failed to write build configuration: {}", path.display()))?,
        (None, OutputFormat::Json) => println!("{}", config.to_json()?),
        (None, OutputFormat::Text) => print!("{}", config.to_text()),
    }

    Ok(())
}

/// `--os`, then `--target`, then the config file, then the host.
fn resolve_target_os(args: &ProbeArgs, settings: &ProbeSettings) -> Result<TargetOs> {
    if let Some(os) = args.os {
        return Ok(os);
    }
    if let Some(triple) = &args.target {
        return triple_os(triple);
    }
    if let Some(os) = &settings.os {
        return os
            .parse::<TargetOs>()
            .map_err(|e| anyhow::anyhow!("invalid `os` in config: {}", e));
    }
    if let Some(triple) = &settings.target {
        return triple_os(triple);
    }
    Ok(TargetOs::host())
}

fn triple_os(triple: &str) -> Result<TargetOs> {
    match TargetTriple::parse(triple) {
        Some(t) => Ok(t.target_os()),
        None => bail!("invalid target triple '{}'; expected arch-vendor-os[-env]", triple),
    }
}

/// An unknown spinlock name is not an error; the engine keeps its default.
fn resolve_spinlock(name: Option<String>, shell: &Shell) -> Option<Spinlock> {
    let name = name?;
    let spinlock = Spinlock::parse(&name);
    if spinlock.is_none() {
        tracing::debug!("unrecognized spinlock '{}'", name);
        emit(
            &Diagnostic::warning(format!("unknown spinlock type '{}'; using the default", name))
                .with_suggestion("choose one of gcc, msvc, pthread, pthread_adaptive"),
            shell.use_color(),
        );
    }
    spinlock
}
