//! Subprocess ownership: pipes, reader threads and teardown

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crate::{BridgeError, Phase};

/// Slice length of one poll of the response channel
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// How long a `quit` may take before the process is killed
const QUIT_GRACE: Duration = Duration::from_millis(500);

/// One engine process, owned for exactly one search call. Whatever path
/// the call takes, dropping this reaps the child.
pub(crate) struct UsiEngine {
    child: Child,
    stdin: ChildStdin,
    lines: Receiver<String>,
}

impl UsiEngine {
    pub fn spawn(path: &Path) -> Result<Self, BridgeError> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(BridgeError::EngineUnavailable)?;

        let stdin = child.stdin.take().ok_or(BridgeError::StreamClosed)?;
        let stdout = child.stdout.take().ok_or(BridgeError::StreamClosed)?;
        let stderr = child.stderr.take().ok_or(BridgeError::StreamClosed)?;

        let (tx, lines) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines().map_while(Result::ok) {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        // Diagnostic stream is drained so the child cannot block on it
        thread::spawn(move || {
            for line in BufReader::new(stderr).lines().map_while(Result::ok) {
                tracing::debug!(target: "shogi_usi::engine", "{line}");
            }
        });

        Ok(Self { child, stdin, lines })
    }

    pub fn send(&mut self, command: &str) -> Result<(), BridgeError> {
        tracing::trace!(command, "-> engine");
        writeln!(self.stdin, "{command}")?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Poll the response channel in short slices until a line carrying
    /// `token` as a word arrives, or the phase deadline passes
    pub fn wait_for(
        &mut self,
        token: &str,
        timeout: Duration,
        phase: Phase,
    ) -> Result<String, BridgeError> {
        let deadline = Instant::now() + timeout;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Err(BridgeError::Timeout { phase, timeout });
            }
            let slice = POLL_INTERVAL.min(deadline - now);
            match self.lines.recv_timeout(slice) {
                Ok(line) => {
                    tracing::trace!(line = %line, "<- engine");
                    if line.split_whitespace().any(|word| word == token) {
                        return Ok(line);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return Err(BridgeError::StreamClosed),
            }
        }
    }

    /// Ask the engine to exit, then make sure it did
    pub fn quit(&mut self) {
        let _ = self.send("quit");
        let deadline = Instant::now() + QUIT_GRACE;
        while Instant::now() < deadline {
            match self.child.try_wait() {
                Ok(Some(_)) => return,
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(_) => break,
            }
        }
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Drop for UsiEngine {
    fn drop(&mut self) {
        if !matches!(self.child.try_wait(), Ok(Some(_))) {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
