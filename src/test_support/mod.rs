//! Test utilities and mocks for ccprobe unit tests.
//!
//! [`MockRunner`] stands in for a C compiler: it answers command lines and
//! trial programs from a script of expectations and records every call.
//!
//! # Example
//!
//! ```rust,ignore
//! let runner = MockRunner::new();
//! runner.expect("gcc --version", MockProcessOutput::success("gcc (GCC) 9.2.0\n"));
//! runner.expect_source("sizeof(time_t) == 4", MockProcessOutput::success(""));
//! runner.set_default(MockProcessOutput::failure(1, "error"));
//! ```

use std::io;
use std::path::Path;
use std::sync::Mutex;

use crate::util::process::{CapturedOutput, CommandRunner};

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

impl From<MockProcessOutput> for CapturedOutput {
    fn from(output: MockProcessOutput) -> Self {
        CapturedOutput {
            status: Some(output.status),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Pattern for matching commands in MockRunner.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command contains substring.
    Contains(String),
    /// Match if the program fed on stdin contains substring.
    Source(String),
    /// Match any command.
    Any,
}

impl CommandPattern {
    /// Check if this pattern matches the given command and stdin text.
    pub fn matches(&self, cmd: &str, source: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::Contains(s) => cmd.contains(s),
            CommandPattern::Source(s) => source.contains(s),
            CommandPattern::Any => true,
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    expectations: Vec<(CommandPattern, MockProcessOutput)>,
    unlaunchable: Vec<String>,
    default_output: Option<MockProcessOutput>,
    calls: Vec<String>,
    sources: Vec<String>,
}

/// Scripted stand-in for a compiler.
///
/// Expectations are tried in the order they were added; the first match
/// answers. Unmatched commands get the default output, or fail to launch if
/// no default is set.
#[derive(Debug, Default)]
pub struct MockRunner {
    state: Mutex<MockState>,
}

impl MockRunner {
    /// Create a new mock runner.
    pub fn new() -> Self {
        MockRunner::default()
    }

    fn push(&self, pattern: CommandPattern, output: MockProcessOutput) -> &Self {
        self.state
            .lock()
            .unwrap()
            .expectations
            .push((pattern, output));
        self
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&self, cmd: &str, output: MockProcessOutput) -> &Self {
        self.push(CommandPattern::Exact(cmd.to_string()), output)
    }

    /// Add an expectation for a command containing a substring.
    pub fn expect_contains(&self, substring: &str, output: MockProcessOutput) -> &Self {
        self.push(CommandPattern::Contains(substring.to_string()), output)
    }

    /// Add an expectation for a trial program containing a substring.
    pub fn expect_source(&self, substring: &str, output: MockProcessOutput) -> &Self {
        self.push(CommandPattern::Source(substring.to_string()), output)
    }

    /// Set a default output for commands that don't match any expectation.
    pub fn set_default(&self, output: MockProcessOutput) -> &Self {
        self.state.lock().unwrap().default_output = Some(output);
        self
    }

    /// Make every invocation of `program` fail to launch.
    pub fn fail_launch(&self, program: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .unlaunchable
            .push(program.to_string());
        self
    }

    /// Get all commands that were called.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Get every trial program fed on stdin.
    pub fn sources(&self) -> Vec<String> {
        self.state.lock().unwrap().sources.clone()
    }

    /// Check whether any trial program contained `substring`.
    pub fn saw_source(&self, substring: &str) -> bool {
        self.sources().iter().any(|s| s.contains(substring))
    }
}

impl CommandRunner for MockRunner {
    fn run(
        &self,
        program: &Path,
        args: &[String],
        stdin: Option<&[u8]>,
    ) -> io::Result<CapturedOutput> {
        let program = program.display().to_string();
        let full_cmd = if args.is_empty() {
            program.clone()
        } else {
            format!("{} {}", program, args.join(" "))
        };
        let source = stdin
            .map(|s| String::from_utf8_lossy(s).into_owned())
            .unwrap_or_default();

        let mut state = self.state.lock().unwrap();
        state.calls.push(full_cmd.clone());
        if stdin.is_some() {
            state.sources.push(source.clone());
        }

        if state.unlaunchable.contains(&program) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: not found", program),
            ));
        }

        let matched = state
            .expectations
            .iter()
            .find(|(pattern, _)| pattern.matches(&full_cmd, &source))
            .map(|(_, output)| output.clone());

        match matched.or_else(|| state.default_output.clone()) {
            Some(output) => Ok(output.into()),
            None => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("unexpected command: {}", full_cmd),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_runner_first_match_wins() {
        let runner = MockRunner::new();
        runner
            .expect_source("sizeof(off_t) == 8", MockProcessOutput::success(""))
            .set_default(MockProcessOutput::failure(1, "error: size check failed"));

        let ok = runner
            .run(
                Path::new("cc"),
                &["-c".to_string()],
                Some(b"typedef char c[(sizeof(off_t) == 8) ? 1 : -1];"),
            )
            .unwrap();
        assert!(ok.success());

        let failed = runner
            .run(
                Path::new("cc"),
                &["-c".to_string()],
                Some(b"typedef char c[(sizeof(off_t) == 4) ? 1 : -1];"),
            )
            .unwrap();
        assert!(!failed.success());
        assert_eq!(runner.calls().len(), 2);
        assert!(runner.saw_source("== 4"));
    }

    #[test]
    fn test_mock_runner_unexpected_command() {
        let runner = MockRunner::new();
        assert!(runner.run(Path::new("cc"), &[], None).is_err());
    }
}
