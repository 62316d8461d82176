//! Build options supplied by the build driver.

use serde::{Deserialize, Serialize};

use crate::core::platform::TargetOs;

/// Spinlock implementation the engine should compile in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spinlock {
    Gcc,
    Msvc,
    Pthread,
    PthreadAdaptive,
}

impl Spinlock {
    /// Parse a user-supplied spinlock choice.
    ///
    /// Unknown names yield `None`, which leaves the engine's own default in
    /// place rather than failing the configure step.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "gcc" => Some(Spinlock::Gcc),
            "msvc" => Some(Spinlock::Msvc),
            "pthread" => Some(Spinlock::Pthread),
            "pthread_adaptive" => Some(Spinlock::PthreadAdaptive),
            _ => None,
        }
    }

    /// The `SPINLOCK_TYPE` value for this implementation.
    pub fn define_value(&self) -> &'static str {
        match self {
            Spinlock::Gcc => "SPINLOCK_GCC",
            Spinlock::Msvc => "SPINLOCK_MSVC",
            Spinlock::Pthread => "SPINLOCK_PTHREAD_MUTEX",
            Spinlock::PthreadAdaptive => "SPINLOCK_PTHREAD_MUTEX_ADAPTIVE",
        }
    }
}

/// How compiler major versions are compared against flag thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionCompare {
    /// Parse the major version and compare as integers.
    #[default]
    Numeric,
    /// Compare the raw major token as a string (`"10" < "5"`).
    Lexical,
}

/// How the clang suppression groups combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuppressionMode {
    /// Every group is appended to the flag list.
    #[default]
    Accumulate,
    /// Every group replaces the whole flag list; only the last survives.
    Overwrite,
}

/// Options that shape the definitions and flags, independent of probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// OS family being configured for
    pub target_os: TargetOs,
    /// Build with diagnostics (`HAVE_DIAGNOSTIC`, `-g`)
    pub diagnostic: bool,
    /// Build with attach-debugging support (`HAVE_ATTACH`)
    pub attach: bool,
    /// Spinlock override; `None` keeps the engine default
    pub spinlock: Option<Spinlock>,
    /// Raw CFLAGS the user already passes, checked for an optimization level
    pub raw_cflags: String,
    /// Major version comparison rule for gcc flag gates
    pub version_compare: VersionCompare,
    /// Clang suppression group combination rule
    pub clang_suppressions: SuppressionMode,
}

impl BuildOptions {
    /// Default options for the given target.
    pub fn new(target_os: TargetOs) -> Self {
        BuildOptions {
            target_os,
            diagnostic: false,
            attach: false,
            spinlock: None,
            raw_cflags: String::new(),
            version_compare: VersionCompare::default(),
            clang_suppressions: SuppressionMode::default(),
        }
    }

    /// Whether the user's raw CFLAGS already choose an optimization level.
    pub fn has_user_optimization(&self) -> bool {
        self.raw_cflags.contains("-O")
    }

    /// The user's raw CFLAGS split into arguments.
    pub fn user_cflags(&self) -> Vec<String> {
        self.raw_cflags
            .split_whitespace()
            .map(|s| s.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinlock_parse() {
        assert_eq!(Spinlock::parse("gcc"), Some(Spinlock::Gcc));
        assert_eq!(Spinlock::parse("pthread_adaptive"), Some(Spinlock::PthreadAdaptive));
        assert_eq!(Spinlock::parse("PTHREAD"), None);
        assert_eq!(Spinlock::parse("ticket"), None);
        assert_eq!(Spinlock::parse(""), None);
    }

    #[test]
    fn test_user_optimization() {
        let mut opts = BuildOptions::new(TargetOs::Linux);
        assert!(!opts.has_user_optimization());

        opts.raw_cflags = "-pipe -O2".to_string();
        assert!(opts.has_user_optimization());
        assert_eq!(opts.user_cflags(), vec!["-pipe", "-O2"]);
    }
}
