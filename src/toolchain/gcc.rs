//! GCC warning policy.

use crate::core::options::BuildOptions;

use super::{extend, CompilerVersion, FlagPolicy};

/// Strict warnings every supported GCC accepts.
pub const BASELINE: &[&str] = &[
    "-Wall",
    "-Wextra",
    "-Werror",
    "-Waggregate-return",
    "-Wbad-function-cast",
    "-Wcast-align",
    "-Wdeclaration-after-statement",
    "-Wdouble-promotion",
    "-Wfloat-equal",
    "-Wformat-nonliteral",
    "-Wformat-security",
    "-Wformat=2",
    "-Winit-self",
    "-Wjump-misses-init",
    "-Wmissing-declarations",
    "-Wmissing-field-initializers",
    "-Wmissing-prototypes",
    "-Wnested-externs",
    "-Wold-style-definition",
    "-Wpacked",
    "-Wpointer-arith",
    "-Wpointer-sign",
    "-Wredundant-decls",
    "-Wshadow",
    "-Wsign-conversion",
    "-Wstrict-prototypes",
    "-Wswitch-enum",
    "-Wundef",
    "-Wuninitialized",
    "-Wunreachable-code",
    "-Wunused",
    "-Wwrite-strings",
];

/// Added for exactly GCC 4.
pub const ONLY_4: &[&str] = &["-Wno-c11-extensions", "-Wunsafe-loop-optimizations"];

/// Added for exactly GCC 5 and exactly GCC 6.
pub const ONLY_5_OR_6: &[&str] = &["-Wunsafe-loop-optimizations"];

/// Added from GCC 5 on.
pub const SINCE_5: &[&str] = &[
    "-Wformat-signedness",
    "-Wjump-misses-init",
    "-Wredundant-decls",
    "-Wunused-macros",
    "-Wvariadic-macros",
];

/// Added from GCC 6 on.
pub const SINCE_6: &[&str] = &[
    "-Wduplicated-cond",
    "-Wlogical-op",
    "-Wunused-const-variable=2",
];

/// Added from GCC 7 on.
pub const SINCE_7: &[&str] = &[
    "-Walloca",
    "-Walloc-zero",
    "-Wduplicated-branches",
    "-Wformat-overflow=2",
    "-Wformat-truncation=2",
    "-Wrestrict",
];

/// Added from GCC 8 on.
pub const SINCE_8: &[&str] = &["-Wmultistatement-macros"];

/// Flag policy for gcc-like compilers.
#[derive(Debug, Clone, Copy, Default)]
pub struct GccPolicy;

impl FlagPolicy for GccPolicy {
    fn apply(&self, version: &CompilerVersion, options: &BuildOptions, flags: &mut Vec<String>) {
        let cmp = options.version_compare;

        extend(flags, BASELINE);

        if version.is_major(4, cmp) {
            extend(flags, ONLY_4);
        }
        if version.is_major(5, cmp) {
            extend(flags, ONLY_5_OR_6);
        }
        if version.is_major(6, cmp) {
            extend(flags, ONLY_5_OR_6);
        }

        // Thresholds are cumulative: a newer compiler takes every older block too.
        let gated: [(u32, &[&str]); 4] = [(5, SINCE_5), (6, SINCE_6), (7, SINCE_7), (8, SINCE_8)];
        for (threshold, block) in gated {
            if version.major_at_least(threshold, cmp) {
                extend(flags, block);
            }
        }

        tracing::debug!(
            "gcc {} (major `{}`, {:?} comparison): {} flags",
            version,
            version.major_token(),
            cmp,
            flags.len()
        );
    }
}
