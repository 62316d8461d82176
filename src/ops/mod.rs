//! High-level operations.
//!
//! This module contains the implementation of ccprobe commands.

pub mod assemble;
pub mod configure;

pub use assemble::{assemble_definitions, assemble_flags, assemble_libraries};
pub use configure::{assemble_config, configure, ConfigureRequest, DEFAULT_INCLUDE_DIRS};
