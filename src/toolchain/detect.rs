//! Compiler identification.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::probe::ProbeError;
use crate::util::process::CommandRunner;

use super::{CompilerFamily, CompilerVersion, ToolchainDescriptor};

/// A dotted version number standing alone between whitespace in a banner.
static VERSION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s([0-9][0-9.]*)(?:\s|$)").expect("valid version regex"));

/// Extract the first dotted version token from `--version` output.
///
/// The token must be delimited by whitespace on both sides, so
/// `gcc (GCC) 13.2.1 20231011` yields `13.2.1` while
/// `clang version 14.0.0-1ubuntu1` has no match on its first line.
pub fn parse_version_banner(banner: &str) -> Option<CompilerVersion> {
    VERSION_TOKEN
        .captures(banner)
        .and_then(|caps| caps.get(1))
        .map(|m| CompilerVersion::new(m.as_str()))
}

/// Classify a compiler by its executable path.
///
/// Anything with "clang" in its path is clang-like; everything else is
/// treated as gcc-like.
pub fn classify_family(executable: &Path) -> CompilerFamily {
    if executable.to_string_lossy().contains("clang") {
        CompilerFamily::ClangLike
    } else {
        CompilerFamily::GccLike
    }
}

/// Run `<executable> --version` and build the toolchain descriptor.
pub fn identify_compiler<R: CommandRunner + ?Sized>(
    runner: &R,
    executable: &Path,
) -> Result<ToolchainDescriptor, ProbeError> {
    let output = runner
        .run(executable, &["--version".to_string()], None)
        .map_err(|source| ProbeError::Launch {
            program: executable.to_path_buf(),
            source,
        })?;

    let version = parse_version_banner(&output.stdout).ok_or_else(|| {
        ProbeError::UnrecognizedVersion {
            program: executable.to_path_buf(),
            banner: output.stdout.clone(),
        }
    })?;

    let family = classify_family(executable);
    tracing::info!(
        "Identified C compiler {}: {} {}",
        executable.display(),
        family,
        version
    );

    Ok(ToolchainDescriptor::new(executable, family, version))
}
