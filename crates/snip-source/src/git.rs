//! Blob retrieval through the external `git` tool.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::{Source, SourceError};

/// Default bound on one blob retrieval.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Poll interval while waiting for the child to exit.
const WAIT_TICK: Duration = Duration::from_millis(20);

/// Fetches historical file content with `git show <rev>:<path>`,
/// without touching the working tree.
///
/// The child process gets a bounded wait: on expiry it is killed and
/// the retrieval reported as a [`SourceError::ToolFailure`], like any
/// non-zero exit. A hung tool therefore fails one file instead of
/// wedging the whole build.
#[derive(Clone, Debug)]
pub struct GitSource {
    timeout: Duration,
}

impl Default for GitSource {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GitSource {
    /// Source with a custom retrieval timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Source for GitSource {
    fn read(&self, object: &str) -> Result<String, SourceError> {
        let failure = |detail: String| SourceError::ToolFailure {
            reference: object.to_owned(),
            detail,
        };

        let mut child = Command::new("git")
            .args(["show", object])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failure(format!("cannot run git: {e}")))?;

        // Drain both pipes off-thread so a large blob cannot fill a
        // pipe buffer and deadlock the bounded wait below.
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = match wait_bounded(&mut child, self.timeout) {
            Ok(status) => status,
            Err(detail) => return Err(failure(detail)),
        };

        let stdout = join(stdout);
        let stderr = join(stderr);

        if !status.success() {
            let message = String::from_utf8_lossy(&stderr);
            let message = message.trim();
            tracing::warn!(object, detail = message, "git show failed");
            return Err(failure(if message.is_empty() {
                format!("exit status {status}")
            } else {
                message.to_owned()
            }));
        }

        String::from_utf8(stdout).map_err(|_| failure("output is not valid UTF-8".to_owned()))
    }
}

fn drain(mut from: impl Read + Send + 'static) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = from.read_to_end(&mut buf);
        buf
    })
}

fn join(handle: Option<thread::JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

/// Wait for the child to exit within `timeout`; kill it on expiry.
fn wait_bounded(child: &mut Child, timeout: Duration) -> Result<ExitStatus, String> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(format!("timed out after {:.1}s", timeout.as_secs_f64()));
                }
                thread::sleep(WAIT_TICK);
            }
            Err(e) => return Err(format!("wait failed: {e}")),
        }
    }
}
