use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::Command;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::build_log::BuildLog;
use crate::command::CommandSpec;
use crate::results::Transcript;
use crate::run::RunError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

fn recv_poll_interval() -> Duration {
    Duration::from_millis(50)
}

fn drain_after_child_exit_deadline(now: Instant) -> Instant {
    now + Duration::from_millis(250)
}

fn normalize_crlf_line(line: &str) -> String {
    line.strip_suffix('\r').unwrap_or(line).to_string()
}

fn spawn_lines_thread(
    reader: impl std::io::Read + Send + 'static,
    tx: mpsc::Sender<(OutputStream, String)>,
    stream: OutputStream,
) {
    std::thread::spawn(move || {
        let reader = BufReader::new(reader);
        reader.lines().map_while(Result::ok).for_each(|line| {
            let line = normalize_crlf_line(&line);
            let _ = tx.send((stream, line));
        });
    });
}

fn build_command(spec: &CommandSpec, cwd: &Path) -> Command {
    let argv = spec.render();
    let mut command = Command::new(&argv[0]);
    command.args(&argv[1..]).current_dir(cwd);
    command
}

/// Receives merged lines until the child exits plus a short drain window.
/// Stdout/stderr can stay open past child exit (background processes
/// inheriting FDs), so never block waiting for EOF alone.
fn drain_channel_until_exit_then_deadline(
    mut child: std::process::Child,
    rx: mpsc::Receiver<(OutputStream, String)>,
    display_command: &str,
    mut on_line: impl FnMut(&str),
) -> Result<i32, RunError> {
    let mut child_exited = false;
    let mut drain_deadline: Option<Instant> = None;
    loop {
        match rx.recv_timeout(recv_poll_interval()) {
            Ok((_stream, line)) => on_line(&line),
            Err(mpsc::RecvTimeoutError::Timeout) => {
                let now = Instant::now();
                if child_exited {
                    if drain_deadline.is_some_and(|deadline| now >= deadline) {
                        break;
                    }
                    continue;
                }
                if child.try_wait().map_err(RunError::Wait)?.is_some() {
                    child_exited = true;
                    drain_deadline = Some(drain_after_child_exit_deadline(now));
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }
    let status = child.wait().map_err(RunError::Wait)?;
    // A normal exit carries a code even when tests failed; termination by
    // signal does not, and is an infrastructure fault, not test content.
    status.code().ok_or_else(|| RunError::Terminated {
        command: display_command.to_string(),
    })
}

#[doc(hidden)]
pub fn consume_lines_capture(reader: impl BufRead, log: &dyn BuildLog) -> Transcript {
    let mut transcript = Transcript::default();
    reader.lines().map_while(Result::ok).for_each(|line| {
        let line = normalize_crlf_line(&line);
        transcript.push_line(line.clone());
        log.line(&line);
    });
    transcript
}

/// Executes the command as one child process, appending every output line to
/// the transcript and forwarding it to the build log in arrival order. The
/// two halves happen per line, so the forwarded log concatenation equals the
/// final transcript exactly.
///
/// Returns the child's exit code with the full transcript. Spawn failure and
/// abnormal termination are reported as errors, never as a failing
/// transcript.
pub fn run_streaming_capture(
    spec: &CommandSpec,
    cwd: &Path,
    log: &dyn BuildLog,
) -> Result<(i32, Transcript), RunError> {
    let display_command = spec.display();

    #[cfg(unix)]
    {
        // One pipe whose write end backs both stdout and stderr, so the
        // kernel-observed ordering of interleaved writes is preserved in the
        // single merged stream.
        //
        // IMPORTANT: the parent must not retain any pipe write ends. A write
        // end left open in the parent keeps the reader thread from ever
        // seeing EOF (especially when the child produces little output).
        let (merged_reader, merged_writer) = os_pipe::pipe().map_err(RunError::Spawn)?;
        let merged_writer2 = merged_writer.try_clone().map_err(RunError::Spawn)?;

        let mut command = build_command(spec, cwd);
        command
            .stdout(std::process::Stdio::from(merged_writer))
            .stderr(std::process::Stdio::from(merged_writer2));

        let child = command.spawn().map_err(RunError::Spawn)?;
        drop(command);

        let (tx, rx) = mpsc::channel::<(OutputStream, String)>();
        spawn_lines_thread(merged_reader, tx, OutputStream::Stdout);

        let mut transcript = Transcript::default();
        let exit_code =
            drain_channel_until_exit_then_deadline(child, rx, &display_command, |line| {
                transcript.push_line(line.to_string());
                log.line(line);
            })?;
        Ok((exit_code, transcript))
    }

    #[cfg(not(unix))]
    {
        run_streaming_capture_split(spec, cwd, log, &display_command)
    }
}

/// Fallback without FD duplication: one reader thread per stream feeding a
/// shared channel. Interleaving follows channel arrival order.
#[cfg_attr(unix, allow(dead_code))]
fn run_streaming_capture_split(
    spec: &CommandSpec,
    cwd: &Path,
    log: &dyn BuildLog,
    display_command: &str,
) -> Result<(i32, Transcript), RunError> {
    let (stdout_reader, stdout_writer) = os_pipe::pipe().map_err(RunError::Spawn)?;
    let (stderr_reader, stderr_writer) = os_pipe::pipe().map_err(RunError::Spawn)?;

    let mut command = build_command(spec, cwd);
    command
        .stdout(std::process::Stdio::from(stdout_writer))
        .stderr(std::process::Stdio::from(stderr_writer));

    let child = command.spawn().map_err(RunError::Spawn)?;
    drop(command);

    let (tx, rx) = mpsc::channel::<(OutputStream, String)>();
    spawn_lines_thread(stdout_reader, tx.clone(), OutputStream::Stdout);
    spawn_lines_thread(stderr_reader, tx.clone(), OutputStream::Stderr);
    drop(tx);

    let mut transcript = Transcript::default();
    let exit_code = drain_channel_until_exit_then_deadline(child, rx, display_command, |line| {
        transcript.push_line(line.to_string());
        log.line(line);
    })?;
    Ok((exit_code, transcript))
}
