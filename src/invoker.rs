//! Running the cmake executable.
//!
//! [`Invoker`] is the seam between the resolver and the external tool. The
//! production implementation, [`CMake`], spawns a child process and hands
//! back its stdout as a lazy sequence of lines.

use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};
use thiserror::Error;

/// Errors that can occur while running cmake.
#[derive(Error, Debug)]
pub enum InvokeError {
    /// The executable could not be started.
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: PathBuf,
        source: io::Error,
    },

    /// Output could not be read.
    #[error("Failed to read output: {0}")]
    Read(#[source] io::Error),
}

/// Something that can answer `cmake` argument vectors with output lines.
pub trait Invoker {
    /// Single-pass line sequence produced by one invocation.
    type Lines: Iterator<Item = io::Result<String>>;

    /// Run with `args` and return the output lines.
    fn invoke(&self, args: &[&str]) -> Result<Self::Lines, InvokeError>;
}

/// Drain a line sequence, turning the first read error into [`InvokeError::Read`].
pub fn collect_lines<L>(lines: L) -> Result<Vec<String>, InvokeError>
where
    L: Iterator<Item = io::Result<String>>,
{
    lines
        .collect::<io::Result<Vec<_>>>()
        .map_err(InvokeError::Read)
}

/// The cmake executable.
#[derive(Debug, Clone)]
pub struct CMake {
    executable: PathBuf,
}

impl CMake {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Path of the executable this invoker runs.
    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl Invoker for CMake {
    type Lines = OutputLines;

    fn invoke(&self, args: &[&str]) -> Result<OutputLines, InvokeError> {
        tracing::info!(
            "Executing CMake: {} {}",
            self.executable.display(),
            args.join(" ")
        );

        let mut child = Command::new(&self.executable)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| InvokeError::Spawn {
                program: self.executable.clone(),
                source,
            })?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(InvokeError::Read(io::Error::other("stdout was not captured")));
        };

        Ok(OutputLines {
            child,
            reader: Some(BufReader::new(stdout)),
            buf: Vec::new(),
        })
    }
}

/// Lines of a running child's stdout.
///
/// The pipe is closed and the child reaped when the sequence is exhausted
/// or dropped, whichever comes first. Exit status is only logged.
pub struct OutputLines {
    child: Child,
    reader: Option<BufReader<ChildStdout>>,
    buf: Vec<u8>,
}

impl OutputLines {
    fn finish(&mut self) {
        if self.reader.take().is_none() {
            return;
        }
        match self.child.wait() {
            Ok(status) if !status.success() => {
                tracing::debug!("CMake exited with {}", status);
            }
            Ok(_) => {}
            Err(e) => tracing::debug!("Failed to wait for CMake: {}", e),
        }
    }
}

impl Iterator for OutputLines {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;
        self.buf.clear();

        match reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.finish();
                None
            }
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => {
                self.finish();
                Some(Err(e))
            }
        }
    }
}

impl Drop for OutputLines {
    fn drop(&mut self) {
        self.finish();
    }
}
