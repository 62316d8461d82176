//! Trial compilation probes.
//!
//! A [`Prober`] owns everything a configure run mutates: the runner, a scratch
//! directory for trial outputs, and the libraries found so far. Required
//! types gate the run with [`ProbeError`]; optional probes only ever answer
//! yes or no.

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use crate::core::platform::TargetOs;
use crate::toolchain::{identify_compiler, ToolchainDescriptor};
use crate::util::process::CommandRunner;
use crate::util::shell::{Shell, Status};

mod errors;
mod features;
pub mod program;

pub use errors::ProbeError;
pub use features::{
    OptionalFeature, ProbeKind, ProbeResults, TypeRequirement, OPTIONAL_FEATURES, REQUIRED_TYPES,
};

/// Sizes tried when measuring a type, after the expected one.
const CANDIDATE_SIZES: &[usize] = &[1, 2, 4, 8, 16, 32];

/// Runs trial compiles and links against one C compiler.
pub struct Prober<R: CommandRunner> {
    runner: R,
    compiler: PathBuf,
    /// User CFLAGS passed to every trial
    base_args: Vec<String>,
    /// Libraries found by library probes; function probes link with them
    linked_libs: Vec<String>,
    scratch: TempDir,
    shell: Option<Arc<Shell>>,
}

impl<R: CommandRunner> Prober<R> {
    /// Create a prober for `compiler`, passing `base_args` to every trial.
    pub fn new(
        runner: R,
        compiler: impl Into<PathBuf>,
        base_args: Vec<String>,
    ) -> Result<Self, ProbeError> {
        let scratch = tempfile::Builder::new()
            .prefix("ccprobe")
            .tempdir()
            .map_err(|source| ProbeError::Scratch { source })?;

        Ok(Prober {
            runner,
            compiler: compiler.into(),
            base_args,
            linked_libs: Vec::new(),
            scratch,
            shell: None,
        })
    }

    /// Report each probe outcome through `shell`.
    pub fn with_shell(mut self, shell: Arc<Shell>) -> Self {
        self.shell = Some(shell);
        self
    }

    /// Get the runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Libraries registered for linking so far.
    pub fn linked_libs(&self) -> &[String] {
        &self.linked_libs
    }

    /// Identify the compiler from its `--version` banner.
    pub fn identify(&self) -> Result<ToolchainDescriptor, ProbeError> {
        if let Some(shell) = &self.shell {
            shell.status(Status::Checking, format!("C compiler {}", self.compiler.display()));
        }
        identify_compiler(&self.runner, &self.compiler)
    }

    /// Check every required type that applies to `os`.
    pub fn check_required_types(&self, os: TargetOs) -> Result<(), ProbeError> {
        for req in REQUIRED_TYPES {
            if !req.applies_to(os) {
                tracing::debug!("skipping required type {} on {}", req.name, os);
                self.report(Status::Skipped, format_args!("C type {} on {}", req.name, os));
                continue;
            }
            self.check_required_type(req.name, req.min_size)?;
        }
        Ok(())
    }

    /// Require that `name` is a type and, if `min_size` is non-zero, that it
    /// is exactly that many bytes.
    pub fn check_required_type(&self, name: &str, min_size: usize) -> Result<(), ProbeError> {
        if !self.compile(&program::type_exists(name))? {
            return Err(ProbeError::TypeNotFound {
                name: name.to_string(),
            });
        }

        if min_size != 0 {
            let found = self.type_size(name, min_size)?;
            if found != Some(min_size) {
                return Err(ProbeError::TypeSizeMismatch {
                    name: name.to_string(),
                    expected: min_size,
                    found,
                });
            }
            self.report(Status::Found, format_args!("C type {} ({} bytes)", name, min_size));
        } else {
            self.report(Status::Found, format_args!("C type {}", name));
        }

        Ok(())
    }

    /// Measure `sizeof(name)` by trial compilation, trying `expected` first.
    ///
    /// Returns `None` if no candidate size compiles.
    pub fn type_size(&self, name: &str, expected: usize) -> Result<Option<usize>, ProbeError> {
        let candidates = std::iter::once(expected)
            .chain(CANDIDATE_SIZES.iter().copied().filter(|&s| s != expected));

        for size in candidates {
            if self.compile(&program::type_size_is(name, size))? {
                tracing::debug!("sizeof({}) = {}", name, size);
                return Ok(Some(size));
            }
        }

        tracing::debug!("sizeof({}) matched no candidate size", name);
        Ok(None)
    }

    /// Probe for an optional header, library or function.
    ///
    /// Never fails: a compiler that cannot even be launched counts as
    /// "absent". A found library is registered for later function probes.
    pub fn probe_optional(&mut self, kind: ProbeKind, name: &str) -> bool {
        let outcome = match kind {
            ProbeKind::Header => self.compile(&program::header(name)),
            ProbeKind::Library => {
                let lib = format!("-l{}", name);
                self.link(&program::empty_main(), std::slice::from_ref(&lib))
            }
            ProbeKind::Function => {
                let libs: Vec<String> =
                    self.linked_libs.iter().map(|l| format!("-l{}", l)).collect();
                self.link(&program::function(name), &libs)
            }
        };

        let present = outcome.unwrap_or_else(|e| {
            tracing::warn!("{} probe for `{}` could not run: {}", kind, name, e);
            false
        });

        if present && kind == ProbeKind::Library && !self.linked_libs.iter().any(|l| l == name) {
            self.linked_libs.push(name.to_string());
        }

        let status = if present { Status::Found } else { Status::Missing };
        self.report(status, format_args!("{} {}", kind, name));
        present
    }

    /// Run every optional probe that applies to `os`.
    pub fn probe_features(&mut self, os: TargetOs) -> ProbeResults {
        let mut results = ProbeResults::new();

        for feature in OPTIONAL_FEATURES {
            if !feature.applies_to(os) {
                tracing::debug!("not probing {} {} on {}", feature.kind, feature.name, os);
                self.report(
                    Status::Skipped,
                    format_args!("{} {} on {}", feature.kind, feature.name, os),
                );
                continue;
            }
            let present = self.probe_optional(feature.kind, feature.name);
            results.record(feature.kind, feature.name, present);
        }

        tracing::info!(
            "{} of {} optional features found",
            results.found_count(),
            results.len()
        );
        results
    }

    /// Compile `source` to an object file; `Ok(false)` if the compiler rejects it.
    fn compile(&self, source: &str) -> Result<bool, ProbeError> {
        let object = self.scratch_path("conftest.o");
        let mut args = self.base_args.clone();
        args.extend(
            ["-x", "c", "-c", "-o"]
                .into_iter()
                .map(String::from),
        );
        args.push(object.display().to_string());
        args.push("-".to_string());

        self.invoke(&args, source)
    }

    /// Compile and link `source` with `libs`; `Ok(false)` on any failure.
    fn link(&self, source: &str, libs: &[String]) -> Result<bool, ProbeError> {
        let exe = self.scratch_path("conftest");
        let mut args = self.base_args.clone();
        args.extend(["-x", "c", "-o"].into_iter().map(String::from));
        args.push(exe.display().to_string());
        args.push("-".to_string());
        args.extend(libs.iter().cloned());

        self.invoke(&args, source)
    }

    fn invoke(&self, args: &[String], source: &str) -> Result<bool, ProbeError> {
        let output = self
            .runner
            .run(&self.compiler, args, Some(source.as_bytes()))
            .map_err(|source| ProbeError::Launch {
                program: self.compiler.clone(),
                source,
            })?;

        if !output.success() {
            tracing::debug!(
                "trial rejected by {}: {}",
                self.compiler.display(),
                output.stderr.lines().next().unwrap_or("").trim()
            );
        }
        Ok(output.success())
    }

    fn scratch_path(&self, file: &str) -> PathBuf {
        self.scratch.path().join(file)
    }

    fn report(&self, status: Status, msg: std::fmt::Arguments<'_>) {
        if let Some(shell) = &self.shell {
            shell.status(status, msg);
        }
    }
}
