use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};

use crate::args::build_args;
use crate::outcome::{TaskOutcome, TaskStatus};
use crate::profile::BackendProfile;
use crate::request::TaskRequest;

/// Cap per captured stream. A child blocked writing past the cap is bounded
/// by the wall-clock timeout.
pub const MAX_OUTPUT_BYTES: usize = 2 * 1024 * 1024; // 2MB

/// Window between the graceful and forceful kill on timeout. Some backends
/// flush state on SIGTERM; the window lets that finish without letting an
/// unresponsive child hang the caller.
const KILL_GRACE: Duration = Duration::from_secs(5);

/// Run one invocation to a terminal status.
///
/// - No shell interpolation: `Command::new` + args, so prompt content cannot
///   inject commands.
/// - `process_group(0)` + `kill_on_drop(true)`: the whole child tree dies on
///   timeout or drop, not just the leader.
/// - Piped stdio; output capped at [`MAX_OUTPUT_BYTES`] per stream.
/// - Timeout escalates SIGTERM → SIGKILL after [`KILL_GRACE`].
pub async fn execute(profile: &BackendProfile, req: &TaskRequest) -> TaskOutcome {
    let built = build_args(profile, req);

    let mut cmd = Command::new(profile.program);
    cmd.args(&built.argv)
        .stdin(if built.stdin_payload.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .process_group(0)
        .kill_on_drop(true);

    if let Some(ref wd) = req.workdir {
        cmd.current_dir(wd);
    }

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => {
            tracing::warn!(program = profile.program, error = %err, "failed to spawn backend");
            // No timer is started for a failed launch.
            return TaskOutcome::launch_failed(&err);
        }
    };

    if let Some(prompt) = built.stdin_payload {
        // Write the prompt from a task running concurrently with the pipe
        // readers. Awaiting write_all here would deadlock when the prompt
        // exceeds the OS pipe buffer and the child echoes output before
        // draining stdin: parent waits on stdin, child waits on stdout.
        let mut stdin = child.stdin.take().expect("stdin was piped");
        tokio::spawn(async move {
            let _ = stdin.write_all(prompt.as_bytes()).await;
            // drop closes the pipe → child sees EOF on stdin
        });
    }

    // process_group(0) made the child its own group leader (pgid == pid).
    let child_pid = child.id();

    let stdout_pipe = child.stdout.take().expect("stdout was piped");
    let stderr_pipe = child.stderr.take().expect("stderr was piped");

    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::with_capacity(64 * 1024);
        let mut capped = stdout_pipe.take(MAX_OUTPUT_BYTES as u64);
        if let Err(e) = capped.read_to_end(&mut buf).await {
            tracing::warn!("stdout pipe read error: {e}");
        }
        buf
    });

    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::with_capacity(64 * 1024);
        let mut capped = stderr_pipe.take(MAX_OUTPUT_BYTES as u64);
        if let Err(e) = capped.read_to_end(&mut buf).await {
            tracing::warn!("stderr pipe read error: {e}");
        }
        buf
    });

    // Race the child's exit against the budget. When wait() wins, dropping
    // the elapsed timeout future cancels the timer unconditionally — no kill
    // can fire after a natural exit. When the timer wins, escalate.
    let timeout = Duration::from_secs(req.timeout_secs);
    let waited = tokio::time::timeout(timeout, child.wait()).await;
    let (wait_result, timed_out) = match waited {
        Ok(result) => (result, false),
        Err(_) => (escalate_kill(&mut child, child_pid).await, true),
    };

    // The child has exited, so both pipes are at EOF; collect every byte
    // emitted before termination, then finalize.
    let stdout_buf = stdout_task.await.unwrap_or_default();
    let stderr_buf = stderr_task.await.unwrap_or_default();
    let stdout = String::from_utf8_lossy(&stdout_buf).trim().to_string();
    let stderr = String::from_utf8_lossy(&stderr_buf).trim().to_string();

    let exit_status = match wait_result {
        Ok(status) => status,
        Err(err) => {
            tracing::warn!(program = profile.program, error = %err, "failed to reap backend");
            return TaskOutcome {
                status: TaskStatus::LaunchFailed {
                    not_found: false,
                    message: format!("failed to wait for {}: {err}", profile.program),
                },
                stdout,
                stderr,
            };
        }
    };

    let signal = termination_signal(&exit_status);
    let status = if timed_out {
        TaskStatus::TimedOut { signal }
    } else if exit_status.success() {
        // Progress chatter on stderr is normal even for successful runs.
        if !stderr.is_empty() {
            tracing::debug!(program = profile.program, stderr = %stderr, "backend stderr output");
        }
        TaskStatus::Success
    } else {
        tracing::warn!(
            program = profile.program,
            code = exit_status.code(),
            "backend process failed"
        );
        TaskStatus::NonzeroExit {
            code: exit_status.code(),
            signal,
        }
    };

    TaskOutcome {
        status,
        stdout,
        stderr,
    }
}

/// Graceful-then-forceful stop of a child that outlived its budget: SIGTERM
/// to the process group, then SIGKILL if it is still running after
/// [`KILL_GRACE`]. Returns the exit status once the child is actually gone.
async fn escalate_kill(child: &mut Child, pid: Option<u32>) -> std::io::Result<ExitStatus> {
    signal_group(pid, libc::SIGTERM);
    let waited = tokio::time::timeout(KILL_GRACE, child.wait()).await;
    match waited {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("backend ignored SIGTERM, sending SIGKILL");
            signal_group(pid, libc::SIGKILL);
            child.wait().await
        }
    }
}

/// Signal the child's entire process group, not just the leader —
/// grandchildren holding the pipes open would otherwise outlive the kill.
fn signal_group(pid: Option<u32>, signal: i32) {
    if let Some(pid) = pid {
        unsafe {
            libc::kill(-(pid as i32), signal);
        }
    }
}

fn termination_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}
