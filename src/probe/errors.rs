//! Probe error types and diagnostics.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error raised while probing a toolchain.
///
/// A missing optional feature is never an error; these are all fatal for the
/// configure run.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ProbeError {
    #[error("{name} type not found")]
    #[diagnostic(code(ccprobe::types::not_found))]
    TypeNotFound { name: String },

    #[error("{name} type found, but not {expected} bytes in size")]
    #[diagnostic(code(ccprobe::types::size_mismatch))]
    TypeSizeMismatch {
        name: String,
        expected: usize,
        found: Option<usize>,
    },

    #[error("failed to run `{}`", program.display())]
    #[diagnostic(code(ccprobe::toolchain::launch), help("set CC or pass --cc to select a working C compiler"))]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognized version banner from `{}`", program.display())]
    #[diagnostic(code(ccprobe::toolchain::version))]
    UnrecognizedVersion { program: PathBuf, banner: String },

    #[error("failed to create a scratch directory for trial compiles")]
    #[diagnostic(code(ccprobe::io::scratch))]
    Scratch {
        #[source]
        source: std::io::Error,
    },
}

impl ProbeError {
    /// Whether this is a required-type failure, reported as a single line on
    /// stdout rather than as a diagnostic.
    pub fn is_fatal_config(&self) -> bool {
        matches!(
            self,
            ProbeError::TypeNotFound { .. } | ProbeError::TypeSizeMismatch { .. }
        )
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ProbeError::TypeNotFound { name } => Diagnostic::error(self.to_string())
                .with_context(format!("a trial compile declaring `{}` failed", name))
                .with_suggestion(suggestions::CHECK_SYSROOT),

            ProbeError::TypeSizeMismatch {
                name,
                expected,
                found,
            } => {
                let mut diag = Diagnostic::error(self.to_string());
                if let Some(found) = found {
                    diag = diag.with_context(format!(
                        "sizeof({}) is {} on this target, {} required",
                        name, found, expected
                    ));
                }
                diag.with_suggestion(suggestions::CHECK_TARGET)
            }

            ProbeError::Launch { program, source } => Diagnostic::error(format!(
                "failed to run C compiler `{}`",
                program.display()
            ))
            .with_context(source.to_string())
            .with_suggestion(suggestions::SET_CC),

            ProbeError::UnrecognizedVersion { program, banner } => {
                let mut diag = Diagnostic::error(format!(
                    "could not find a version number in the output of `{} --version`",
                    program.display()
                ));
                if let Some(first) = banner.lines().next() {
                    diag = diag.with_context(format!("banner: {}", first.trim()));
                }
                diag.with_suggestion(suggestions::SET_CC)
            }

            ProbeError::Scratch { source } => {
                Diagnostic::error(self.to_string()).with_context(source.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_messages() {
        let err = ProbeError::TypeNotFound {
            name: "pid_t".to_string(),
        };
        assert_eq!(err.to_string(), "pid_t type not found");
        assert!(err.is_fatal_config());

        let err = ProbeError::TypeSizeMismatch {
            name: "time_t".to_string(),
            expected: 8,
            found: Some(4),
        };
        assert_eq!(
            err.to_string(),
            "time_t type found, but not 8 bytes in size"
        );
        let diag = err.to_diagnostic().format(false);
        assert!(diag.contains("sizeof(time_t) is 4"));
    }

    #[test]
    fn test_tool_errors_are_not_fatal_config() {
        let err = ProbeError::UnrecognizedVersion {
            program: PathBuf::from("tcc"),
            banner: "Tiny C Compiler\n".to_string(),
        };
        assert!(!err.is_fatal_config());
        let diag = err.to_diagnostic().format(false);
        assert!(diag.contains("tcc --version"));
        assert!(diag.contains("banner: Tiny C Compiler"));
    }

    #[test]
    fn test_diagnostic_codes() {
        use miette::Diagnostic as _;

        let err = ProbeError::TypeNotFound {
            name: "off_t".to_string(),
        };
        assert_eq!(err.code().unwrap().to_string(), "ccprobe::types::not_found");

        let err = ProbeError::Launch {
            program: PathBuf::from("gcc-99"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.code().unwrap().to_string(), "ccprobe::toolchain::launch");
        assert!(err.help().is_some());
    }
}
