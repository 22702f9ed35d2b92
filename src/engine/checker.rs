//! External style checker invocation
//!
//! The checker is a black box that reads newline-separated file paths on
//! standard input and prints its report on standard output. One run is a
//! single exchange: spawn, write the file list, close stdin, drain stdout and
//! stderr, reap. The child is killed and reaped on every path that does not
//! reach a normal wait, and a timeout bounds the whole exchange, including
//! the draining of pipes still held open by processes the checker spawned.

use crate::error::CheckerError;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Profile passed to the checker unless configured otherwise
pub const DEFAULT_PROFILE: &str = "epitech";

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Everything the checker printed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckerOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, None when terminated by a signal
    pub status: Option<i32>,
}

/// Something that turns a list of files into a textual report
pub trait Checker {
    /// Runs the checker once over `files`
    ///
    /// # Errors
    ///
    /// Returns `CheckerError` if the checker cannot be run to completion.
    fn check(&self, files: &[PathBuf]) -> Result<CheckerOutput, CheckerError>;
}

/// A checker run as a child process
///
/// Invoked as `<program> --profile <profile> --root <ruleset>`.
#[derive(Debug, Clone)]
pub struct ExternalChecker {
    program: PathBuf,
    ruleset: String,
    profile: String,
    timeout: Option<Duration>,
}

impl ExternalChecker {
    pub fn new(program: impl Into<PathBuf>, ruleset: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ruleset: ruleset.into(),
            profile: DEFAULT_PROFILE.to_string(),
            timeout: None,
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Kills the checker if it runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments passed to the program
    pub fn args(&self) -> [&str; 4] {
        ["--profile", self.profile.as_str(), "--root", self.ruleset.as_str()]
    }

    fn spawn(&self) -> Result<Child, CheckerError> {
        log::debug!(
            "Spawning {} {}",
            self.program.display(),
            self.args().join(" ")
        );
        Command::new(&self.program)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| CheckerError::Spawn {
                program: self.program.clone(),
                source,
            })
    }
}

impl ExternalChecker {
    fn timed_out(&self) -> CheckerError {
        CheckerError::Timeout {
            program: self.program.clone(),
            timeout: self.timeout.unwrap_or_default(),
        }
    }

    fn collect<T>(
        &self,
        handle: JoinHandle<io::Result<T>>,
        stream: &'static str,
        deadline: Option<Instant>,
    ) -> Result<T, CheckerError> {
        match join_by(handle, deadline) {
            Ok(result) => Ok(result?),
            Err(JoinFailure::Panicked) => Err(CheckerError::Panicked(stream)),
            Err(JoinFailure::TimedOut) => Err(self.timed_out()),
        }
    }
}

impl Checker for ExternalChecker {
    fn check(&self, files: &[PathBuf]) -> Result<CheckerOutput, CheckerError> {
        let input = files
            .iter()
            .map(|path| path.to_string_lossy())
            .collect::<Vec<_>>()
            .join("\n");

        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        let mut guard = ChildGuard::new(self.spawn()?);
        let stdin = guard.child.stdin.take();
        let stdout = guard.child.stdout.take();
        let stderr = guard.child.stderr.take();

        // Processes the checker leaves behind can hold the pipes open after it
        // is killed, so these threads are joined against the deadline and left
        // detached if it passes.
        let writer = thread::spawn(move || write_input(stdin, &input));
        let out_reader = thread::spawn(move || read_pipe(stdout));
        let err_reader = thread::spawn(move || read_pipe(stderr));

        let status = guard.wait(deadline).map_err(|e| match e {
            WaitError::Io(e) => CheckerError::Io(e),
            WaitError::TimedOut => self.timed_out(),
        })?;

        self.collect(writer, "stdin", deadline)?;
        let stdout = self.collect(out_reader, "stdout", deadline)?;
        let stderr = self.collect(err_reader, "stderr", deadline)?;

        log::debug!("Checker exited with {}", status);
        Ok(CheckerOutput {
            stdout,
            stderr,
            status: status.code(),
        })
    }
}

fn write_input(stdin: Option<ChildStdin>, input: &str) -> io::Result<()> {
    if let Some(mut stdin) = stdin {
        match stdin.write_all(input.as_bytes()) {
            // The checker may exit without reading its input.
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
            other => other?,
        }
    }
    Ok(())
}

fn read_pipe<R: Read>(pipe: Option<R>) -> io::Result<String> {
    let mut buffer = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buffer)?;
    }
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[derive(Debug, PartialEq, Eq)]
enum JoinFailure {
    Panicked,
    TimedOut,
}

/// Joins `handle`, giving up once `deadline` has passed
///
/// A thread given up on keeps running detached.
fn join_by<T>(handle: JoinHandle<T>, deadline: Option<Instant>) -> Result<T, JoinFailure> {
    if let Some(deadline) = deadline {
        while !handle.is_finished() {
            if Instant::now() >= deadline {
                return Err(JoinFailure::TimedOut);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
    handle.join().map_err(|_| JoinFailure::Panicked)
}

enum WaitError {
    Io(io::Error),
    TimedOut,
}

/// Owns a running child and kills it if dropped before being reaped
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    /// Waits for the child, killing it once `deadline` has passed
    fn wait(&mut self, deadline: Option<Instant>) -> Result<ExitStatus, WaitError> {
        let Some(deadline) = deadline else {
            let status = self.child.wait().map_err(WaitError::Io)?;
            self.reaped = true;
            return Ok(status);
        };

        loop {
            if let Some(status) = self.child.try_wait().map_err(WaitError::Io)? {
                self.reaped = true;
                return Ok(status);
            }
            if Instant::now() >= deadline {
                self.kill();
                return Err(WaitError::TimedOut);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn kill(&mut self) {
        if self.reaped {
            return;
        }
        if let Err(e) = self.child.kill() {
            log::debug!("Failed to kill checker: {}", e);
        }
        if let Err(e) = self.child.wait() {
            log::debug!("Failed to reap checker: {}", e);
        }
        self.reaped = true;
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        self.kill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_forward_profile_and_ruleset() {
        let checker = ExternalChecker::new("vera++", "/rules/epitech").with_profile("custom");
        assert_eq!(
            checker.args(),
            ["--profile", "custom", "--root", "/rules/epitech"]
        );
    }

    #[test]
    fn test_default_profile() {
        let checker = ExternalChecker::new("vera++", "rules");
        assert_eq!(checker.args()[1], DEFAULT_PROFILE);
    }

    #[test]
    fn test_spawn_failure() {
        let checker = ExternalChecker::new("/nonexistent/style-checker", "rules");
        let result = checker.check(&[PathBuf::from("a.c")]);
        assert!(matches!(result, Err(CheckerError::Spawn { .. })));
    }

    #[test]
    fn test_join_by_gives_up_at_deadline() {
        let handle = thread::spawn(|| thread::sleep(Duration::from_secs(2)));
        let deadline = Instant::now() + Duration::from_millis(50);
        assert_eq!(join_by(handle, Some(deadline)), Err(JoinFailure::TimedOut));
    }

    #[test]
    fn test_join_by_without_deadline_waits() {
        let handle = thread::spawn(|| 7);
        assert_eq!(join_by(handle, None), Ok(7));
    }

    #[test]
    fn test_read_pipe_none_is_empty() {
        let read = read_pipe::<&[u8]>(None).unwrap();
        assert_eq!(read, "");
    }

    #[test]
    fn test_read_pipe_lossy() {
        let bytes: &[u8] = b"ok \xff";
        let read = read_pipe(Some(bytes)).unwrap();
        assert!(read.starts_with("ok "));
    }
}
