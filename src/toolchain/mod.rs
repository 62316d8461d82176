//! Compiler identity and per-family flag policies.
//!
//! A toolchain is identified once per run (see [`identify_compiler`]) and the
//! resulting [`ToolchainDescriptor`] is immutable. Each compiler family owns a
//! [`FlagPolicy`] that knows which diagnostics that dialect accepts.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::core::options::{BuildOptions, VersionCompare};

pub mod clang;
mod detect;
pub mod gcc;

pub use clang::ClangPolicy;
pub use detect::{classify_family, identify_compiler, parse_version_banner};
pub use gcc::GccPolicy;

/// The diagnostic-flag dialect of a compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerFamily {
    /// GCC and anything that is not recognizably clang
    GccLike,
    /// Clang/LLVM, including Apple Clang
    ClangLike,
}

impl CompilerFamily {
    /// Get the family name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerFamily::GccLike => "gcc",
            CompilerFamily::ClangLike => "clang",
        }
    }

    /// The flag policy for this family.
    pub fn policy(&self) -> &'static dyn FlagPolicy {
        match self {
            CompilerFamily::GccLike => &GccPolicy,
            CompilerFamily::ClangLike => &ClangPolicy,
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompilerFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gcc" | "gcc-like" => Ok(CompilerFamily::GccLike),
            "clang" | "clang-like" => Ok(CompilerFamily::ClangLike),
            _ => Err(format!("invalid compiler family '{}'; expected 'gcc' or 'clang'", s)),
        }
    }
}

/// A dotted compiler version as reported in the `--version` banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilerVersion {
    raw: String,
}

impl CompilerVersion {
    /// Wrap a dotted version token such as `9.2.0`.
    pub fn new(raw: impl Into<String>) -> Self {
        CompilerVersion { raw: raw.into() }
    }

    /// The token exactly as extracted.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The `.`-separated components, as strings.
    pub fn components(&self) -> Vec<&str> {
        self.raw.split('.').collect()
    }

    /// The major version component, unparsed.
    pub fn major_token(&self) -> &str {
        self.raw.split('.').next().unwrap_or("")
    }

    /// The major version as an integer, if it parses.
    pub fn major(&self) -> Option<u32> {
        self.major_token().parse().ok()
    }

    /// The ordered tuple of numeric components; empty components are skipped.
    pub fn numbers(&self) -> Vec<u32> {
        self.raw
            .split('.')
            .filter_map(|c| c.parse().ok())
            .collect()
    }

    /// Whether the major version equals `major` under the given rule.
    pub fn is_major(&self, major: u32, compare: VersionCompare) -> bool {
        match compare {
            VersionCompare::Numeric => self.major() == Some(major),
            VersionCompare::Lexical => self.major_token() == major.to_string(),
        }
    }

    /// Whether the major version is at least `threshold` under the given rule.
    pub fn major_at_least(&self, threshold: u32, compare: VersionCompare) -> bool {
        match compare {
            VersionCompare::Numeric => self.major().is_some_and(|m| m >= threshold),
            VersionCompare::Lexical => self.major_token() >= threshold.to_string().as_str(),
        }
    }
}

impl fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Everything the flag policies need to know about the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainDescriptor {
    /// Path to the C compiler
    pub path: PathBuf,
    /// Diagnostic dialect
    pub family: CompilerFamily,
    /// Version from the `--version` banner
    pub version: CompilerVersion,
}

impl ToolchainDescriptor {
    /// Create a new descriptor.
    pub fn new(path: impl Into<PathBuf>, family: CompilerFamily, version: CompilerVersion) -> Self {
        ToolchainDescriptor {
            path: path.into(),
            family,
            version,
        }
    }

    /// Get the C compiler path.
    pub fn compiler_path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for ToolchainDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.family, self.version, self.path.display())
    }
}

/// Per-family compile flag policy.
pub trait FlagPolicy: Send + Sync {
    /// Append this family's warning flags to `flags`.
    ///
    /// `flags` already holds the family-independent flags (`-g`, `-O3`).
    /// A policy may rewrite them as well as append.
    fn apply(&self, version: &CompilerVersion, options: &BuildOptions, flags: &mut Vec<String>);
}

/// Append a block of flag literals.
fn extend(flags: &mut Vec<String>, block: &[&str]) {
    flags.extend(block.iter().map(|f| f.to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_components() {
        let v = CompilerVersion::new("9.2.0");
        assert_eq!(v.components(), vec!["9", "2", "0"]);
        assert_eq!(v.major_token(), "9");
        assert_eq!(v.major(), Some(9));
        assert_eq!(v.numbers(), vec![9, 2, 0]);

        let odd = CompilerVersion::new("4..1");
        assert_eq!(odd.numbers(), vec![4, 1]);
    }

    #[test]
    fn test_version_comparison_rules() {
        let ten = CompilerVersion::new("10.3.0");
        assert!(ten.major_at_least(5, VersionCompare::Numeric));
        assert!(!ten.major_at_least(5, VersionCompare::Lexical));
        assert!(ten.is_major(10, VersionCompare::Lexical));

        let seven = CompilerVersion::new("7.5.0");
        for compare in [VersionCompare::Numeric, VersionCompare::Lexical] {
            assert!(seven.major_at_least(7, compare));
            assert!(!seven.major_at_least(8, compare));
            assert!(seven.is_major(7, compare));
            assert!(!seven.is_major(6, compare));
        }
    }

    #[test]
    fn test_family_parse() {
        assert_eq!("gcc".parse::<CompilerFamily>().unwrap(), CompilerFamily::GccLike);
        assert_eq!("Clang".parse::<CompilerFamily>().unwrap(), CompilerFamily::ClangLike);
        assert!("msvc".parse::<CompilerFamily>().is_err());
    }
}
