//! Turning probe results and options into definitions, flags and libraries.
//!
//! Everything here is a pure function of its inputs.

use std::collections::BTreeSet;

use crate::core::options::BuildOptions;
use crate::core::platform::TargetOs;
use crate::probe::{ProbeKind, ProbeResults, OPTIONAL_FEATURES};
use crate::toolchain::ToolchainDescriptor;

/// Buffer alignment O_DIRECT needs on Linux.
pub const LINUX_BUFFER_ALIGNMENT: u32 = 4096;

/// Optimization level used when the user did not pick one.
pub const DEFAULT_OPTIMIZATION: &str = "-O3";

/// Debug-symbol flag used in diagnostic builds.
pub const DEBUG_FLAG: &str = "-g";

/// Preprocessor definitions for the engine build.
pub fn assemble_definitions(results: &ProbeResults, options: &BuildOptions) -> BTreeSet<String> {
    let mut defines = BTreeSet::new();

    let alignment = if options.target_os == TargetOs::Linux {
        defines.insert("_GNU_SOURCE".to_string());
        LINUX_BUFFER_ALIGNMENT
    } else {
        0
    };
    defines.insert(format!("WT_BUFFER_ALIGNMENT_DEFAULT={}", alignment));

    if options.diagnostic {
        defines.insert("HAVE_DIAGNOSTIC".to_string());
    }
    if options.attach {
        defines.insert("HAVE_ATTACH".to_string());
    }
    if let Some(spinlock) = options.spinlock {
        defines.insert(format!("SPINLOCK_TYPE={}", spinlock.define_value()));
    }

    for feature in OPTIONAL_FEATURES {
        if results.is_present(feature.kind, feature.name) {
            defines.insert(feature.define.to_string());
        }
    }

    defines
}

/// Libraries found by the library probes, in probe order.
pub fn assemble_libraries(results: &ProbeResults) -> Vec<String> {
    OPTIONAL_FEATURES
        .iter()
        .filter(|f| f.kind == ProbeKind::Library && results.is_present(f.kind, f.name))
        .map(|f| f.name.to_string())
        .collect()
}

/// Compile flags for the engine build.
pub fn assemble_flags(descriptor: &ToolchainDescriptor, options: &BuildOptions) -> Vec<String> {
    let mut flags = Vec::new();

    if options.diagnostic {
        flags.push(DEBUG_FLAG.to_string());
    }
    if !options.has_user_optimization() {
        flags.push(DEFAULT_OPTIMIZATION.to_string());
    }

    descriptor
        .family
        .policy()
        .apply(&descriptor.version, options, &mut flags);

    flags
}
