//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod process;
pub mod shell;

pub use config::ProbeConfig;
pub use diagnostic::Diagnostic;
pub use process::{CommandRunner, SystemRunner};
pub use shell::Shell;
