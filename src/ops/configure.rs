//! The configure pipeline: identify, gate, probe, assemble.

use std::path::PathBuf;
use std::sync::Arc;

use crate::core::build_config::BuildConfig;
use crate::core::options::BuildOptions;
use crate::ops::assemble::{assemble_definitions, assemble_flags, assemble_libraries};
use crate::probe::{ProbeError, ProbeResults, Prober};
use crate::toolchain::ToolchainDescriptor;
use crate::util::process::CommandRunner;
use crate::util::shell::Shell;

/// Include directories every engine build needs, relative to the project root.
pub const DEFAULT_INCLUDE_DIRS: &[&str] = &[".", "src/include"];

/// Inputs of one configure run.
#[derive(Debug, Clone)]
pub struct ConfigureRequest {
    /// C compiler to probe
    pub compiler: PathBuf,
    /// Options from the build driver
    pub options: BuildOptions,
    /// Include directories appended after the defaults
    pub extra_include_dirs: Vec<PathBuf>,
}

impl ConfigureRequest {
    pub fn new(compiler: impl Into<PathBuf>, options: BuildOptions) -> Self {
        ConfigureRequest {
            compiler: compiler.into(),
            options,
            extra_include_dirs: Vec::new(),
        }
    }
}

/// Run the whole pipeline against `request.compiler`.
///
/// Fails on the first unusable required type or on a compiler that cannot
/// be run or identified; never returns a partial configuration.
pub fn configure<R: CommandRunner>(
    runner: R,
    request: &ConfigureRequest,
    shell: Option<Arc<Shell>>,
) -> Result<BuildConfig, ProbeError> {
    let options = &request.options;

    let mut prober = Prober::new(runner, &request.compiler, options.user_cflags())?;
    if let Some(shell) = shell {
        prober = prober.with_shell(shell);
    }

    let descriptor = prober.identify()?;
    prober.check_required_types(options.target_os)?;
    let results = prober.probe_features(options.target_os);

    let config = assemble_config(&descriptor, &results, options, &request.extra_include_dirs);
    tracing::info!(
        "Configured for {} on {}: {} definitions, {} flags, {} libraries",
        descriptor,
        options.target_os,
        config.defines.len(),
        config.cflags.len(),
        config.libs.len()
    );
    Ok(config)
}

/// Assemble the final artifact from already-probed inputs.
pub fn assemble_config(
    descriptor: &ToolchainDescriptor,
    results: &ProbeResults,
    options: &BuildOptions,
    extra_include_dirs: &[PathBuf],
) -> BuildConfig {
    let mut include_dirs: Vec<PathBuf> = DEFAULT_INCLUDE_DIRS.iter().map(PathBuf::from).collect();
    for dir in extra_include_dirs {
        if !include_dirs.contains(dir) {
            include_dirs.push(dir.clone());
        }
    }

    BuildConfig {
        include_dirs,
        defines: assemble_definitions(results, options),
        cflags: assemble_flags(descriptor, options),
        libs: assemble_libraries(results),
    }
}
