//! Subprocess execution utilities.
//!
//! Probing talks to the compiler only through [`CommandRunner`], so tests can
//! script compiler behaviour without spawning anything.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    stdin: Option<Vec<u8>>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set stdin data.
    pub fn stdin(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(data.into());
        self
    }

    /// Execute the command and wait for completion, capturing its output.
    ///
    /// Only a failure to spawn or wait is an error; a non-zero exit status is
    /// reported through the returned `Output`.
    pub fn exec(&self) -> io::Result<Output> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        cmd.stdin(if self.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn()?;

        if let Some(ref stdin_data) = self.stdin {
            use std::io::Write;
            if let Some(mut stdin) = child.stdin.take() {
                // A child that exits without reading its input still has an exit status.
                match stdin.write_all(stdin_data) {
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
                    other => other?,
                }
            }
        }

        child.wait_with_output()
    }

    /// Display the command for log messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Exit code, `None` if killed by a signal
    pub status: Option<i32>,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl CapturedOutput {
    /// Check if the process succeeded.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

impl From<Output> for CapturedOutput {
    fn from(output: Output) -> Self {
        CapturedOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// The one capability probing needs: run a program to completion.
pub trait CommandRunner {
    /// Run `program` with `args`, feeding `stdin` if given, and capture output.
    fn run(&self, program: &Path, args: &[String], stdin: Option<&[u8]>)
        -> io::Result<CapturedOutput>;
}

/// Runs real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &Path,
        args: &[String],
        stdin: Option<&[u8]>,
    ) -> io::Result<CapturedOutput> {
        let mut pb = ProcessBuilder::new(program).args(args);
        if let Some(data) = stdin {
            pb = pb.stdin(data);
        }

        tracing::trace!("running `{}`", pb.display_command());
        pb.exec().map(CapturedOutput::from)
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Find a C compiler on PATH.
pub fn find_c_compiler() -> Option<PathBuf> {
    for compiler in &["cc", "gcc", "clang"] {
        if let Some(path) = find_executable(compiler) {
            return Some(path);
        }
    }

    None
}
