//! ccprobe - C toolchain probing for the storage engine build
//!
//! This crate identifies a C compiler, checks the primitive types the engine
//! depends on, probes for optional headers, libraries and functions, and
//! assembles the definitions, flags, include paths and libraries the rest of
//! the build consumes.

pub mod core;
pub mod ops;
pub mod probe;
pub mod toolchain;
pub mod util;

/// Test utilities and mocks for ccprobe unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a scripted stand-in for a C compiler.
#[cfg(test)]
pub mod test_support;

pub use self::core::{BuildConfig, BuildOptions, TargetOs};
pub use ops::{configure, ConfigureRequest};
pub use probe::{ProbeError, Prober};
pub use toolchain::{CompilerFamily, CompilerVersion, ToolchainDescriptor};
