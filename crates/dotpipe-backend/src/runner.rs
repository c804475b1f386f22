//! Subprocess execution.
//!
//! [`SystemRunner`] launches one process per call and reaps it on every exit
//! path. Buffered runs feed stdin from a scoped writer thread while
//! `wait_with_output` drains stdout and stderr, so neither side can stall on a
//! full pipe. Streaming runs keep a writer thread feeding stdin and a stderr
//! collector thread alive while the caller pulls stdout lines through
//! [`LineStream`].

use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::command::CommandSpec;
use crate::error::{GraphvizError, GraphvizResult};

/// How long a finished stream waits for its stdin writer to wind down.
const WRITER_GRACE: Duration = Duration::from_millis(200);

/// Lazily produced output lines, each including its trailing newline if any.
pub type OutputLines = Box<dyn Iterator<Item = GraphvizResult<Vec<u8>>> + Send>;

/// Input units written to stdin one after another, as given.
///
/// An `Err` item stops the writer and closes stdin. If it wraps a
/// [`GraphvizError`], that error is reported once the output is drained.
pub type InputLines = Box<dyn Iterator<Item = io::Result<Vec<u8>>> + Send>;

/// Which streams a buffered run captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    /// Capture stdout and stderr.
    #[default]
    Output,
    /// Discard stdout, capture stderr. Used when the result goes to a file.
    StderrOnly,
    /// Capture both and append stderr to stdout. Stderr is part of the
    /// result, so it is not reported as a warning.
    Combined,
}

/// Captured result of a successful run.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Captured stdout; empty for [`CaptureMode::StderrOnly`], followed by
    /// stderr for [`CaptureMode::Combined`].
    pub stdout: Vec<u8>,
    /// Captured stderr.
    pub stderr: String,
    /// Exit status of the process.
    pub status: ExitStatus,
}

/// Executes built commands.
pub trait ProcessRunner: Send + Sync {
    /// Runs `spec` to completion.
    ///
    /// Stdin is attached only when `input` is given. A non-zero exit becomes
    /// [`GraphvizError::ExecutionFailed`] carrying the captured stderr.
    fn run(
        &self,
        spec: &CommandSpec,
        input: Option<&[u8]>,
        capture: CaptureMode,
    ) -> GraphvizResult<ExecutionResult>;

    /// Runs `spec` with `input` streamed to stdin and stdout returned as
    /// a single-pass sequence of lines.
    fn run_streaming(&self, spec: &CommandSpec, input: InputLines) -> GraphvizResult<OutputLines>;
}

/// Runs commands as real OS processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner {
    quiet: bool,
}

impl SystemRunner {
    /// Creates a runner that logs toolchain warnings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppresses logging of stderr output from successful runs.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(
        &self,
        spec: &CommandSpec,
        input: Option<&[u8]>,
        capture: CaptureMode,
    ) -> GraphvizResult<ExecutionResult> {
        let mut cmd = spec.to_command();
        cmd.stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(match capture {
            CaptureMode::Output | CaptureMode::Combined => Stdio::piped(),
            CaptureMode::StderrOnly => Stdio::null(),
        })
        .stderr(Stdio::piped());

        log::debug!("running {}", spec.display());
        let mut child = cmd
            .spawn()
            .map_err(|e| launch_error(spec.program(), e))?;
        let stdin = child.stdin.take();

        let (output, write_result) = std::thread::scope(|scope| {
            let writer = match (stdin, input) {
                (Some(mut stdin), Some(data)) => Some(scope.spawn(move || stdin.write_all(data))),
                _ => None,
            };
            let output = child.wait_with_output();
            let write_result = writer.map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")))
            });
            (output, write_result)
        });

        let output = output?;
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        check_status(spec.program(), output.status, &stderr)?;
        check_write(write_result)?;

        let mut stdout = output.stdout;
        if capture == CaptureMode::Combined {
            stdout.extend_from_slice(&output.stderr);
        } else {
            self.report_stderr(spec.program(), &stderr);
        }

        Ok(ExecutionResult {
            stdout,
            stderr,
            status: output.status,
        })
    }

    fn run_streaming(&self, spec: &CommandSpec, input: InputLines) -> GraphvizResult<OutputLines> {
        let mut cmd = spec.to_command();
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        log::debug!("streaming {}", spec.display());
        let mut child = cmd
            .spawn()
            .map_err(|e| launch_error(spec.program(), e))?;

        let pipes = (child.stdin.take(), child.stdout.take(), child.stderr.take());
        let (stdin, stdout, stderr) = match pipes {
            (Some(stdin), Some(stdout), Some(stderr)) => (stdin, stdout, stderr),
            _ => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(GraphvizError::Io(io::Error::other(
                    "failed to capture subprocess pipes",
                )));
            }
        };

        let writer = std::thread::spawn(move || -> io::Result<()> {
            let mut stdin = stdin;
            for unit in input {
                stdin.write_all(&unit?)?;
            }
            stdin.flush()
        });

        let collector = std::thread::spawn(move || {
            let mut buf = Vec::new();
            let mut stderr = stderr;
            if let Err(e) = stderr.read_to_end(&mut buf) {
                log::debug!("error reading stderr: {}", e);
            }
            String::from_utf8_lossy(&buf).into_owned()
        });

        Ok(Box::new(LineStream {
            program: spec.program().to_path_buf(),
            quiet: self.quiet,
            child: Some(child),
            reader: Some(BufReader::new(stdout)),
            writer: Some(writer),
            collector: Some(collector),
            finished: false,
        }))
    }
}

impl SystemRunner {
    fn report_stderr(&self, program: &Path, stderr: &str) {
        if !self.quiet && !stderr.trim().is_empty() {
            log::warn!("{}: {}", program.display(), stderr.trim_end());
        }
    }
}

/// Single-pass stdout line sequence of a streaming run.
///
/// After the last line the process is waited on and a non-zero exit is
/// yielded as a final error item. Dropping the stream early kills and reaps
/// the process.
pub struct LineStream {
    program: PathBuf,
    quiet: bool,
    child: Option<Child>,
    reader: Option<BufReader<ChildStdout>>,
    writer: Option<JoinHandle<io::Result<()>>>,
    collector: Option<JoinHandle<String>>,
    finished: bool,
}

impl LineStream {
    fn finish(&mut self) -> GraphvizResult<()> {
        self.reader.take();
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child.wait()?;

        let stderr = self
            .collector
            .take()
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();
        check_status(&self.program, status, &stderr)?;

        // The input iterator may still be blocked producing data; only
        // inspect the writer if it is done within the grace period.
        let write_result = match self.writer.take() {
            Some(handle) if wait_finished(&handle, WRITER_GRACE) => Some(
                handle
                    .join()
                    .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked"))),
            ),
            Some(_) => {
                log::debug!(
                    "stdin writer still running after {} exited",
                    self.program.display()
                );
                None
            }
            None => None,
        };
        check_write(write_result)?;

        if !self.quiet && !stderr.trim().is_empty() {
            log::warn!("{}: {}", self.program.display(), stderr.trim_end());
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        self.reader.take();
        if let Some(mut child) = self.child.take() {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
        if let Some(handle) = self.collector.take() {
            let _ = handle.join();
        }
        // Detached: it ends on its next write to the closed pipe.
        self.writer.take();
    }
}

impl Iterator for LineStream {
    type Item = GraphvizResult<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let reader = self.reader.as_mut()?;

        let mut line = Vec::new();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => {
                self.finished = true;
                self.finish().err().map(Err)
            }
            Ok(_) => Some(Ok(line)),
            Err(e) => {
                self.finished = true;
                self.shutdown();
                Some(Err(GraphvizError::Io(e)))
            }
        }
    }
}

impl Drop for LineStream {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn wait_finished<T>(handle: &JoinHandle<T>, grace: Duration) -> bool {
    let start = Instant::now();
    while !handle.is_finished() {
        if start.elapsed() > grace {
            return false;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    true
}

fn launch_error(program: &Path, source: io::Error) -> GraphvizError {
    if source.kind() == io::ErrorKind::NotFound {
        GraphvizError::ExecutableNotFound {
            name: program.display().to_string(),
        }
    } else {
        GraphvizError::LaunchFailed {
            program: program.to_path_buf(),
            source,
        }
    }
}

fn check_status(program: &Path, status: ExitStatus, stderr: &str) -> GraphvizResult<()> {
    if status.success() {
        Ok(())
    } else {
        let exit_code = status.code().unwrap_or(-1);
        Err(GraphvizError::execution_failed(program, exit_code, stderr))
    }
}

fn check_write(result: Option<io::Result<()>>) -> GraphvizResult<()> {
    match result {
        Some(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
            log::debug!("subprocess closed stdin early: {}", e);
            Ok(())
        }
        Some(Err(e)) => Err(from_write_error(e)),
        _ => Ok(()),
    }
}

fn from_write_error(e: io::Error) -> GraphvizError {
    let wraps_ours = e
        .get_ref()
        .is_some_and(|inner| inner.is::<GraphvizError>());
    if !wraps_ours {
        return GraphvizError::Io(e);
    }
    match e.into_inner().map(|inner| inner.downcast::<GraphvizError>()) {
        Some(Ok(inner)) => *inner,
        _ => GraphvizError::Io(io::Error::other("stdin writer failed")),
    }
}
