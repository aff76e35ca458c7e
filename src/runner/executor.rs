//! Low-level child process execution for verification tools

use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use wait_timeout::ChildExt;

/// Time allowed for the pipes to drain once the tool has exited
const OUTPUT_COLLECTION_TIMEOUT: Duration = Duration::from_secs(2);

/// Maximum captured output per stream (10MB)
const MAX_OUTPUT_SIZE: usize = 10 * 1024 * 1024;

const COLLECTION_TIMED_OUT: &str = "[output collection timed out]";

/// What came back from one child process
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub stdout: String,
    pub stderr: String,
    /// None when the process was killed or terminated by a signal
    pub exit_code: Option<i32>,
    pub duration: Duration,
    pub timed_out: bool,
}

impl ProcessOutcome {
    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }
}

/// Run `program args...` in `working_dir`, killing it after `timeout`.
///
/// The tool gets its own process group. On timeout the whole group is
/// killed and its output dropped; after a normal exit anything the tool
/// left running is killed so the pipes close.
///
/// Only spawn and wait failures are returned as errors; a non-zero exit or a
/// timeout is a normal outcome.
pub fn run_process(
    program: &Path,
    args: &[String],
    working_dir: &Path,
    timeout: Duration,
) -> io::Result<ProcessOutcome> {
    let start = Instant::now();

    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }
    let mut child = command.spawn()?;

    // Drain the pipes while waiting. Waiting first lets a chatty child block
    // on a full pipe buffer (~64KB on Linux) and never exit.
    let stdout_rx = spawn_reader(child.stdout.take());
    let stderr_rx = spawn_reader(child.stderr.take());

    let status = match child.wait_timeout(timeout) {
        Ok(status) => status,
        Err(e) => {
            kill_process_group(&mut child);
            return Err(e);
        }
    };

    let Some(status) = status else {
        kill_process_group(&mut child);
        return Ok(ProcessOutcome {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: None,
            duration: start.elapsed(),
            timed_out: true,
        });
    };
    let duration = start.elapsed();

    // Anything left in the group may still hold the pipes open
    kill_process_group(&mut child);

    let deadline = Instant::now() + OUTPUT_COLLECTION_TIMEOUT;
    let stdout = collect(&stdout_rx, deadline);
    let stderr = collect(&stderr_rx, deadline);

    Ok(ProcessOutcome {
        stdout,
        stderr,
        exit_code: status.code(),
        duration,
        timed_out: false,
    })
}

fn collect(rx: &mpsc::Receiver<String>, deadline: Instant) -> String {
    rx.recv_timeout(deadline.saturating_duration_since(Instant::now()))
        .unwrap_or_else(|_| COLLECTION_TIMED_OUT.to_string())
}

fn spawn_reader<R: Read + Send + 'static>(stream: Option<R>) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    match stream {
        Some(stream) => {
            thread::spawn(move || {
                let _ = tx.send(read_stream_to_string(stream));
            });
        }
        None => {
            let _ = tx.send(String::new());
        }
    }
    rx
}

/// Read a stream to string, capped at MAX_OUTPUT_SIZE.
///
/// Data past the cap is drained and discarded so the child never sees a
/// broken pipe.
fn read_stream_to_string<R: Read>(mut stream: R) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];

    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                let remaining = MAX_OUTPUT_SIZE.saturating_sub(buf.len());
                let to_copy = n.min(remaining);
                buf.extend_from_slice(&chunk[..to_copy]);
                if to_copy < n {
                    let mut discard = [0u8; 8192];
                    while stream.read(&mut discard).unwrap_or(0) > 0 {}
                    buf.extend_from_slice(b"\n[output truncated at 10MB]");
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => {
                if buf.is_empty() {
                    return "[error reading output]".to_string();
                }
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}

/// Kill the tool's process group, then reap the tool.
///
/// Errors are ignored since the processes may already be gone.
fn kill_process_group(child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        if let Ok(pgid) = i32::try_from(child.id()) {
            let _ = killpg(Pid::from_raw(pgid), Signal::SIGKILL);
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_stream_small_input() {
        let result = read_stream_to_string(Cursor::new(b"{\"status\": \"ready\"}"));
        assert_eq!(result, "{\"status\": \"ready\"}");
    }

    #[test]
    fn test_read_stream_empty_input() {
        let data: &[u8] = b"";
        assert_eq!(read_stream_to_string(Cursor::new(data)), "");
    }

    #[test]
    fn test_read_stream_truncates_at_limit() {
        let data = vec![b'x'; MAX_OUTPUT_SIZE + 1000];
        let result = read_stream_to_string(Cursor::new(data));
        assert!(result.contains("[output truncated at 10MB]"));
        assert!(result.len() <= MAX_OUTPUT_SIZE + 50);
    }

    #[test]
    fn test_read_stream_exact_limit() {
        let data = vec![b'y'; MAX_OUTPUT_SIZE];
        let result = read_stream_to_string(Cursor::new(data));
        assert!(!result.contains("[output truncated"));
        assert_eq!(result.len(), MAX_OUTPUT_SIZE);
    }
}
