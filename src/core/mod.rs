//! Core data structures for ccprobe.
//!
//! - Target platform classification
//! - Build options chosen by the driver
//! - The assembled build configuration

pub mod build_config;
pub mod options;
pub mod platform;

pub use build_config::BuildConfig;
pub use options::{BuildOptions, Spinlock, SuppressionMode, VersionCompare};
pub use platform::{TargetOs, TargetTriple};
