// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! I/O streaming and output capture for processes.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks
//!     each line: trace! (FORWARD_TO_LOG)
//!                copy to parent (TEE)
//!                append to buffer (KEEP_IN_STRING)
//!   wait
//!   --> ProcessOutput { stdout, stderr, exit_code }
//! ```
//!
//! Readers drain their pipe concurrently with `wait()` so a chatty child
//! never blocks on a full pipe.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};

/// Which parent stream a reader mirrors to when teeing.
#[derive(Debug, Clone, Copy)]
enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

/// Spawns a reader task if the flags require the stream to be read.
fn spawn_reader<R>(
    stream: Option<R>,
    flags: StreamFlags,
    kind: StreamKind,
    process_name: &str,
) -> Option<JoinHandle<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    if !flags.intersects(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING | StreamFlags::TEE)
    {
        return None;
    }
    let name = process_name.to_string();
    stream.map(|stream| tokio::spawn(async move { read_stream(stream, flags, kind, &name).await }))
}

/// Waits for a reader task and returns what it kept.
///
/// A reader that panicked or was cancelled yields an empty string.
pub(super) async fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    let Some(handle) = handle else {
        return String::new();
    };
    match handle.await {
        Ok(kept) => kept,
        Err(e) => {
            warn!(error = %e, "output reader task failed");
            String::new()
        }
    }
}

impl ProcessBuilder {
    /// Runs the child process, handling I/O streaming and waiting for completion.
    pub(super) async fn run_child(
        &self,
        name: &str,
        child: &mut Child,
    ) -> std::io::Result<ProcessOutput> {
        let stdout_handle = spawn_reader(
            child.stdout.take(),
            self.stdout_config(),
            StreamKind::Stdout,
            name,
        );
        let stderr_handle = spawn_reader(
            child.stderr.take(),
            self.stderr_config(),
            StreamKind::Stderr,
            name,
        );

        let exit_status = child.wait().await?;

        let stdout = join_reader(stdout_handle).await;
        let stderr = join_reader(stderr_handle).await;

        Ok(ProcessOutput::new(
            exit_status.code().unwrap_or(-1),
            stdout,
            stderr,
        ))
    }
}

/// Writes one line to the parent's matching stream.
async fn tee_line(kind: StreamKind, line: &str) {
    async fn write<W: AsyncWrite + Unpin>(mut out: W, line: &str) -> std::io::Result<()> {
        out.write_all(line.as_bytes()).await?;
        out.write_all(b"\n").await?;
        out.flush().await
    }
    let result = match kind {
        StreamKind::Stdout => write(tokio::io::stdout(), line).await,
        StreamKind::Stderr => write(tokio::io::stderr(), line).await,
    };
    if let Err(e) = result {
        warn!(stream = kind.as_str(), error = %e, "failed to forward output");
    }
}

/// Reads a stream line by line and returns the kept text.
///
/// Bytes are decoded lossily so non-UTF-8 output never truncates the capture.
/// Kept text preserves line terminators as `\n`.
async fn read_stream<R>(reader: R, flags: StreamFlags, kind: StreamKind, process_name: &str) -> String
where
    R: AsyncRead + Unpin,
{
    let mut kept = String::new();
    let mut segments = BufReader::new(reader).split(b'\n');
    loop {
        match segments.next_segment().await {
            Ok(Some(bytes)) => {
                let decoded = String::from_utf8_lossy(&bytes);
                let line = decoded.strip_suffix('\r').unwrap_or(&decoded);
                if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                    trace!(process = %process_name, stream = kind.as_str(), line = %line, "output");
                }
                if flags.contains(StreamFlags::TEE) {
                    tee_line(kind, line).await;
                }
                if flags.contains(StreamFlags::KEEP_IN_STRING) {
                    kept.push_str(line);
                    kept.push('\n');
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(
                    process = %process_name,
                    stream = kind.as_str(),
                    error = %e,
                    "error reading stream"
                );
                break;
            }
        }
    }
    kept
}
