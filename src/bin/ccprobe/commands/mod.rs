//! Command implementations

pub mod completions;
pub mod flags;
pub mod probe;
pub mod toolchain;

use std::path::PathBuf;

use anyhow::{bail, Result};

use ccprobe::core::options::{SuppressionMode, VersionCompare};
use ccprobe::util::process::find_c_compiler;

/// Pick the compiler: flag or `CC`, then config, then the first on PATH.
pub(crate) fn resolve_compiler(cli: Option<PathBuf>, config: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(cc) = cli.or(config) {
        return Ok(cc);
    }
    match find_c_compiler() {
        Some(cc) => Ok(cc),
        None => bail!("no C compiler found on PATH (tried cc, gcc, clang); set CC or pass --cc"),
    }
}

pub(crate) fn version_compare(lexical: bool) -> VersionCompare {
    if lexical {
        VersionCompare::Lexical
    } else {
        VersionCompare::Numeric
    }
}

pub(crate) fn suppression_mode(overwrite: bool) -> SuppressionMode {
    if overwrite {
        SuppressionMode::Overwrite
    } else {
        SuppressionMode::Accumulate
    }
}
