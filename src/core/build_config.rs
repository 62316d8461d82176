//! The configuration artifact handed to the downstream build.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Output of a configure run.
///
/// Built once by [`crate::ops::configure`] and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Include directories, in order
    pub include_dirs: Vec<PathBuf>,
    /// Preprocessor definitions (`NAME` or `NAME=value`)
    pub defines: BTreeSet<String>,
    /// Compiler flags, in order
    pub cflags: Vec<String>,
    /// Additional libraries to link (without `-l`)
    pub libs: Vec<String>,
}

impl BuildConfig {
    /// Definitions rendered as `-D` flags.
    pub fn define_flags(&self) -> Vec<String> {
        self.defines.iter().map(|d| format!("-D{}", d)).collect()
    }

    /// Libraries rendered as `-l` flags.
    pub fn lib_flags(&self) -> Vec<String> {
        self.libs.iter().map(|l| format!("-l{}", l)).collect()
    }

    /// Human-readable rendering, one item per line grouped by kind.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "# Include paths:");
        for dir in &self.include_dirs {
            let _ = writeln!(out, "  -I{}", dir.display());
        }

        let _ = writeln!(out, "# Definitions:");
        for flag in self.define_flags() {
            let _ = writeln!(out, "  {}", flag);
        }

        let _ = writeln!(out, "# Compile flags:");
        for flag in &self.cflags {
            let _ = writeln!(out, "  {}", flag);
        }

        let _ = writeln!(out, "# Libraries:");
        for flag in self.lib_flags() {
            let _ = writeln!(out, "  {}", flag);
        }

        out
    }

    /// Pretty JSON rendering.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize build configuration")
    }

    /// Write the JSON rendering to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory: {}", parent.display())
                })?;
            }
        }

        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("failed to write build configuration: {}", path.display()))
    }
}
