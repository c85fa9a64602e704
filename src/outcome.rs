/// Terminal state of one invocation. Each variant carries only the data that
/// is meaningful for it: an exit code never coexists with a launch error,
/// and only kill/exit paths record a signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    /// Child exited with code 0 before the timeout.
    Success,
    /// Child ran to completion but failed. `code` is `None` when the child
    /// was killed by a signal the runner did not send, in which case the
    /// signal is recorded instead.
    NonzeroExit {
        code: Option<i32>,
        signal: Option<i32>,
    },
    /// The timer fired first. The recorded signal is whichever of
    /// SIGTERM/SIGKILL actually stopped the child, when the OS reports one.
    TimedOut { signal: Option<i32> },
    /// The process never started. `not_found` distinguishes a missing
    /// executable (gets the profile's install hint) from other spawn errors.
    LaunchFailed { not_found: bool, message: String },
}

/// Result of one invocation: terminal status plus whatever output was
/// captured before termination. Partial output survives timeouts and
/// failures; it is never discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskOutcome {
    pub status: TaskStatus,
    /// Captured stdout, trimmed of surrounding whitespace.
    pub stdout: String,
    /// Captured stderr, trimmed.
    pub stderr: String,
}

impl TaskOutcome {
    pub fn launch_failed(err: &std::io::Error) -> Self {
        TaskOutcome {
            status: TaskStatus::LaunchFailed {
                not_found: err.kind() == std::io::ErrorKind::NotFound,
                message: err.to_string(),
            },
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    pub fn timed_out(&self) -> bool {
        matches!(self.status, TaskStatus::TimedOut { .. })
    }
}
