//! Configuration file support for ccprobe.
//!
//! ccprobe reads two configuration file locations:
//! - Global: `~/.ccprobe/config.toml` - User-wide defaults
//! - Project: `.ccprobe/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Command-line flags and
//! the `CC`/`CFLAGS` environment variables take precedence over both; that
//! layering happens in the binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// ccprobe configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Probe settings
    pub probe: ProbeSettings,
}

/// Defaults for `ccprobe probe`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Path to the C compiler (e.g., /usr/bin/gcc)
    pub cc: Option<PathBuf>,

    /// Target triple (e.g., x86_64-unknown-linux-gnu)
    pub target: Option<String>,

    /// Target OS name; wins over `target`
    pub os: Option<String>,

    /// Build with diagnostics and debug symbols
    pub diagnostic: bool,

    /// Build with attach support
    pub attach: bool,

    /// Spinlock implementation (gcc, msvc, pthread, pthread_adaptive)
    pub spinlock: Option<String>,

    /// Raw user compiler flags, as they would appear in CFLAGS
    pub cflags: Option<String>,

    /// Compare compiler versions as strings
    pub lexical_versions: bool,

    /// Let each clang suppression group replace the flags before it
    pub overwrite_clang_suppressions: bool,

    /// Extra include directories
    pub include_dirs: Vec<PathBuf>,
}

impl ProbeConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing or bad.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: ProbeConfig) {
        let other = other.probe;
        if other.cc.is_some() {
            self.probe.cc = other.cc;
        }
        if other.target.is_some() {
            self.probe.target = other.target;
        }
        if other.os.is_some() {
            self.probe.os = other.os;
        }
        if other.diagnostic {
            self.probe.diagnostic = true;
        }
        if other.attach {
            self.probe.attach = true;
        }
        if other.spinlock.is_some() {
            self.probe.spinlock = other.spinlock;
        }
        if other.cflags.is_some() {
            self.probe.cflags = other.cflags;
        }
        if other.lexical_versions {
            self.probe.lexical_versions = true;
        }
        if other.overwrite_clang_suppressions {
            self.probe.overwrite_clang_suppressions = true;
        }
        if !other.include_dirs.is_empty() {
            self.probe.include_dirs = other.include_dirs;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.ccprobe/config.toml)
/// 2. Global config (~/.ccprobe/config.toml)
/// 3. Defaults
pub fn load_probe_config(global_path: Option<&Path>, project_path: &Path) -> ProbeConfig {
    let mut config = ProbeConfig::default();

    if let Some(global_path) = global_path {
        config.merge(ProbeConfig::load_or_default(global_path));
    }
    config.merge(ProbeConfig::load_or_default(project_path));

    config
}

/// Get the global ccprobe config directory (~/.ccprobe).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".ccprobe"))
}

/// Get the global config path (~/.ccprobe/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.ccprobe/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".ccprobe").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = ProbeConfig::default();
        assert!(config.probe.cc.is_none());
        assert!(!config.probe.diagnostic);
        assert!(config.probe.include_dirs.is_empty());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[probe]
cc = "/usr/bin/clang"
os = "darwin"
diagnostic = true
spinlock = "pthread_adaptive"
cflags = "-O2 -m64"
include_dirs = ["build_posix"]
"#,
        )
        .unwrap();

        let config = ProbeConfig::load(&config_path).unwrap();
        assert_eq!(config.probe.cc, Some(PathBuf::from("/usr/bin/clang")));
        assert_eq!(config.probe.os.as_deref(), Some("darwin"));
        assert!(config.probe.diagnostic);
        assert!(!config.probe.attach);
        assert_eq!(config.probe.spinlock.as_deref(), Some("pthread_adaptive"));
        assert_eq!(config.probe.cflags.as_deref(), Some("-O2 -m64"));
        assert_eq!(config.probe.include_dirs, vec![PathBuf::from("build_posix")]);
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[probe]\ndiagnostic = \"maybe\"\n").unwrap();

        assert!(ProbeConfig::load(&config_path).is_err());
        assert_eq!(ProbeConfig::load_or_default(&config_path), ProbeConfig::default());
    }

    #[test]
    fn test_config_merge() {
        let mut base = ProbeConfig::default();
        base.probe.cc = Some(PathBuf::from("/usr/bin/gcc"));
        base.probe.cflags = Some("-O2".to_string());
        base.probe.attach = true;

        let mut override_cfg = ProbeConfig::default();
        override_cfg.probe.cc = Some(PathBuf::from("/usr/bin/clang"));

        base.merge(override_cfg);

        assert_eq!(base.probe.cc, Some(PathBuf::from("/usr/bin/clang")));
        // Not overridden
        assert_eq!(base.probe.cflags.as_deref(), Some("-O2"));
        assert!(base.probe.attach);
    }

    #[test]
    fn test_load_probe_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[probe]
cc = "/usr/bin/gcc"
spinlock = "gcc"
cflags = "-O2"
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[probe]
cc = "/usr/bin/clang"
cflags = "-O0"
"#,
        )
        .unwrap();

        let config = load_probe_config(Some(&global_path), &project_path);

        assert_eq!(config.probe.cc, Some(PathBuf::from("/usr/bin/clang")));
        assert_eq!(config.probe.spinlock.as_deref(), Some("gcc"));
        assert_eq!(config.probe.cflags.as_deref(), Some("-O0"));
    }

    #[test]
    fn test_missing_files_give_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_probe_config(None, &project_config_path(tmp.path()));
        assert_eq!(config, ProbeConfig::default());
    }
}
