//! Target platform classification.
//!
//! The prober only needs to know which OS family it is configuring for:
//! Linux gets GNU extensions and O_DIRECT alignment, Windows has no `off_t`,
//! and Darwin misreports `fdatasync`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operating system family of the build target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    Linux,
    Windows,
    Darwin,
    Other,
}

impl TargetOs {
    /// Classify the host this binary runs on.
    pub fn host() -> Self {
        TargetOs::from_os_name(std::env::consts::OS)
    }

    /// Classify an OS component as it appears in a target triple or in
    /// `std::env::consts::OS`.
    pub fn from_os_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.starts_with("linux") {
            TargetOs::Linux
        } else if name.starts_with("windows") || name == "win32" || name == "mingw32" {
            TargetOs::Windows
        } else if name.starts_with("darwin") || name.starts_with("macos") {
            TargetOs::Darwin
        } else {
            TargetOs::Other
        }
    }

    /// Get the OS name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetOs::Linux => "linux",
            TargetOs::Windows => "windows",
            TargetOs::Darwin => "darwin",
            TargetOs::Other => "other",
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetOs {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(TargetOs::Linux),
            "windows" => Ok(TargetOs::Windows),
            "darwin" | "macos" => Ok(TargetOs::Darwin),
            "other" => Ok(TargetOs::Other),
            _ => Err(format!(
                "invalid OS '{}'; expected 'linux', 'windows', 'darwin', or 'other'",
                s
            )),
        }
    }
}

/// Target triple components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTriple {
    /// CPU architecture (x86_64, aarch64, etc.)
    pub arch: String,
    /// Vendor (unknown, apple, pc, etc.)
    pub vendor: String,
    /// Operating system (linux, darwin, windows, etc.)
    pub os: String,
    /// Environment/ABI (gnu, musl, msvc, etc.)
    pub env: Option<String>,
}

impl TargetTriple {
    /// Parse a target triple string.
    ///
    /// Vendorless triples such as `x86_64-linux-gnu` (what Debian's
    /// `gcc -dumpmachine` prints) get the `unknown` vendor.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() < 3 || parts.iter().any(|p| p.is_empty()) {
            return None;
        }

        if parts.len() == 3 && TargetOs::from_os_name(parts[1]) != TargetOs::Other {
            return Some(TargetTriple {
                arch: parts[0].to_string(),
                vendor: "unknown".to_string(),
                os: parts[1].to_string(),
                env: Some(parts[2].to_string()),
            });
        }

        Some(TargetTriple {
            arch: parts[0].to_string(),
            vendor: parts[1].to_string(),
            os: parts[2].to_string(),
            env: parts.get(3).map(|s| s.to_string()),
        })
    }

    /// The OS family this triple targets.
    pub fn target_os(&self) -> TargetOs {
        TargetOs::from_os_name(&self.os)
    }
}

impl fmt::Display for TargetTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.env {
            Some(env) => write!(f, "{}-{}-{}-{}", self.arch, self.vendor, self.os, env),
            None => write!(f, "{}-{}-{}", self.arch, self.vendor, self.os),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triple_parse() {
        let triple = TargetTriple::parse("x86_64-unknown-linux-gnu").unwrap();
        assert_eq!(triple.arch, "x86_64");
        assert_eq!(triple.os, "linux");
        assert_eq!(triple.env.as_deref(), Some("gnu"));
        assert_eq!(triple.target_os(), TargetOs::Linux);
        assert_eq!(triple.to_string(), "x86_64-unknown-linux-gnu");

        assert!(TargetTriple::parse("x86_64-linux").is_none());
    }

    #[test]
    fn test_triple_os_families() {
        let cases = [
            ("aarch64-apple-darwin", TargetOs::Darwin),
            ("x86_64-pc-windows-msvc", TargetOs::Windows),
            ("x86_64-unknown-freebsd", TargetOs::Other),
            ("riscv64gc-unknown-linux-musl", TargetOs::Linux),
        ];
        for (triple, os) in cases {
            assert_eq!(TargetTriple::parse(triple).unwrap().target_os(), os, "{}", triple);
        }
    }

    #[test]
    fn test_vendorless_triple() {
        let triple = TargetTriple::parse("x86_64-linux-gnu").unwrap();
        assert_eq!(triple.vendor, "unknown");
        assert_eq!(triple.os, "linux");
        assert_eq!(triple.env.as_deref(), Some("gnu"));
        assert_eq!(triple.target_os(), TargetOs::Linux);
        assert_eq!(triple.to_string(), "x86_64-unknown-linux-gnu");

        assert_eq!(
            TargetTriple::parse("aarch64-linux-musl").unwrap().target_os(),
            TargetOs::Linux
        );
        // A real vendor in second place is left alone.
        assert_eq!(
            TargetTriple::parse("x86_64-w64-mingw32").unwrap().target_os(),
            TargetOs::Windows
        );
    }

    #[test]
    fn test_os_from_str() {
        assert_eq!("Linux".parse::<TargetOs>().unwrap(), TargetOs::Linux);
        assert_eq!("macos".parse::<TargetOs>().unwrap(), TargetOs::Darwin);
        assert!("plan9".parse::<TargetOs>().is_err());
    }
}
