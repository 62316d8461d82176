//! Clang warning policy.
//!
//! Clang starts from `-Weverything` and switches off the diagnostics that
//! fight the engine's code patterns.

use crate::core::options::{BuildOptions, SuppressionMode};

use super::{extend, CompilerVersion, FlagPolicy};

/// `-Weverything` and the suppressions that always come with it.
pub const BASELINE: &[&str] = &[
    "-Weverything",
    "-Werror",
    "-Wno-cast-align",
    "-Wno-documentation-unknown-command",
    "-Wno-format-nonliteral",
    "-Wno-packed",
    "-Wno-padded",
    "-Wno-reserved-id-macro",
    "-Wno-zero-length-array",
];

/// Suppression groups, in application order.
pub const SUPPRESSION_GROUPS: &[&[&str]] = &[
    // cast-qual should eventually be on, but not as a fatal error.
    &["-Wno-cast-qual"],
    // The thread-safety analysis rejects some of the engine's locking patterns.
    &["-Wno-thread-safety-analysis"],
    // Some system headers are not clean under disabled-macro-expansion.
    &["-Wno-disabled-macro-expansion"],
    // A lone semicolon marks an empty loop or conditional body.
    &["-Wno-extra-semi-stmt"],
    &["-Wno-unknown-warning-option"],
];

/// Flag policy for clang-like compilers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClangPolicy;

impl FlagPolicy for ClangPolicy {
    fn apply(&self, version: &CompilerVersion, options: &BuildOptions, flags: &mut Vec<String>) {
        extend(flags, BASELINE);

        for group in SUPPRESSION_GROUPS {
            if options.clang_suppressions == SuppressionMode::Overwrite {
                flags.clear();
            }
            extend(flags, group);
        }

        tracing::debug!(
            "clang {} ({:?} suppressions): {} flags",
            version,
            options.clang_suppressions,
            flags.len()
        );
    }
}
