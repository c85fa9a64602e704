use crate::outcome::{TaskOutcome, TaskStatus};
use crate::profile::BackendProfile;
use crate::request::TaskRequest;

/// What the caller should print and how it should exit. Diagnostics never
/// mix into stdout; stdout carries only the backend's answer.
#[derive(Debug, PartialEq, Eq)]
pub struct Report {
    pub exit_code: i32,
    /// Printed to stdout followed by a newline when present (success only —
    /// printed even when the captured output is empty).
    pub stdout: Option<String>,
    /// Diagnostic text for stderr.
    pub stderr: Option<String>,
}

/// Timeout exit code, matching coreutils `timeout(1)`.
pub const EXIT_TIMEOUT: i32 = 124;

/// Translate an outcome into exit status and printed text.
pub fn report(profile: &BackendProfile, req: &TaskRequest, outcome: &TaskOutcome) -> Report {
    match &outcome.status {
        TaskStatus::Success => Report {
            exit_code: 0,
            stdout: Some(outcome.stdout.clone()),
            stderr: None,
        },
        TaskStatus::NonzeroExit { code, .. } => {
            let mut diag = match code {
                Some(code) => format!("Error: {} exited with code {code}", profile.display_name),
                None => format!(
                    "Error: {} was terminated without an exit code",
                    profile.display_name
                ),
            };
            if !outcome.stderr.is_empty() {
                diag.push_str(&format!("\nstderr: {}", outcome.stderr));
            }
            Report {
                exit_code: code.unwrap_or(1),
                stdout: None,
                stderr: Some(diag),
            }
        }
        TaskStatus::TimedOut { .. } => Report {
            exit_code: EXIT_TIMEOUT,
            stdout: None,
            stderr: Some(format!(
                "Error: Task timed out after {} seconds",
                req.timeout_secs
            )),
        },
        TaskStatus::LaunchFailed { not_found, message } => {
            let diag = match (not_found, profile.missing_binary_hint) {
                (true, Some(hint)) => {
                    format!("Error: {} not found. {hint}", profile.display_name)
                }
                _ => format!(
                    "Error: Failed to run {}: {message}",
                    profile.display_name
                ),
            };
            Report {
                exit_code: 1,
                stdout: None,
                stderr: Some(diag),
            }
        }
    }
}

/// Print a report and return the process exit code.
pub fn emit(report: &Report) -> i32 {
    if let Some(ref out) = report.stdout {
        println!("{out}");
    }
    if let Some(ref err) = report.stderr {
        eprintln!("{err}");
    }
    report.exit_code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile;
    use crate::request::DEFAULT_TIMEOUT_SECS;

    fn request(timeout_secs: u64) -> TaskRequest {
        TaskRequest {
            prompt: "x".to_string(),
            model: "sonnet".to_string(),
            timeout_secs,
            json_output: false,
            workdir: None,
            backend_options: vec![],
        }
    }

    fn outcome(status: TaskStatus, stdout: &str, stderr: &str) -> TaskOutcome {
        TaskOutcome {
            status,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn success_prints_stdout_and_exits_zero() {
        let rep = report(
            &profile::claude(),
            &request(DEFAULT_TIMEOUT_SECS),
            &outcome(TaskStatus::Success, "pong", ""),
        );
        assert_eq!(rep.exit_code, 0);
        assert_eq!(rep.stdout.as_deref(), Some("pong"));
        assert_eq!(rep.stderr, None);
    }

    #[test]
    fn success_with_empty_output_still_prints() {
        let rep = report(
            &profile::claude(),
            &request(DEFAULT_TIMEOUT_SECS),
            &outcome(TaskStatus::Success, "", ""),
        );
        // console-style contract: a success always emits a line
        assert_eq!(rep.stdout.as_deref(), Some(""));
    }

    #[test]
    fn nonzero_exit_propagates_code_and_echoes_stderr() {
        let rep = report(
            &profile::claude(),
            &request(DEFAULT_TIMEOUT_SECS),
            &outcome(
                TaskStatus::NonzeroExit {
                    code: Some(3),
                    signal: None,
                },
                "",
                "bad input",
            ),
        );
        assert_eq!(rep.exit_code, 3);
        assert_eq!(rep.stdout, None);
        let diag = rep.stderr.unwrap();
        assert!(diag.contains("Claude CLI exited with code 3"));
        assert!(diag.contains("stderr: bad input"));
    }

    #[test]
    fn signal_death_without_code_exits_one() {
        let rep = report(
            &profile::claude(),
            &request(DEFAULT_TIMEOUT_SECS),
            &outcome(
                TaskStatus::NonzeroExit {
                    code: None,
                    signal: Some(libc::SIGHUP),
                },
                "",
                "",
            ),
        );
        assert_eq!(rep.exit_code, 1);
    }

    #[test]
    fn timeout_mentions_the_configured_budget() {
        let rep = report(
            &profile::gemini(),
            &request(1),
            &outcome(TaskStatus::TimedOut { signal: Some(libc::SIGTERM) }, "", ""),
        );
        assert_eq!(rep.exit_code, EXIT_TIMEOUT);
        assert!(rep.stderr.unwrap().contains("timed out after 1 seconds"));
    }

    #[test]
    fn missing_binary_uses_the_profile_hint() {
        let rep = report(
            &profile::gemini(),
            &request(DEFAULT_TIMEOUT_SECS),
            &outcome(
                TaskStatus::LaunchFailed {
                    not_found: true,
                    message: "No such file or directory (os error 2)".to_string(),
                },
                "",
                "",
            ),
        );
        assert_eq!(rep.exit_code, 1);
        let diag = rep.stderr.unwrap();
        assert!(diag.contains("Gemini CLI not found"));
        assert!(diag.contains("npm install -g @google/gemini-cli"));
    }

    #[test]
    fn launch_failure_without_hint_reports_the_os_error() {
        let rep = report(
            &profile::claude(),
            &request(DEFAULT_TIMEOUT_SECS),
            &outcome(
                TaskStatus::LaunchFailed {
                    not_found: true,
                    message: "No such file or directory (os error 2)".to_string(),
                },
                "",
                "",
            ),
        );
        assert_eq!(rep.exit_code, 1);
        assert!(rep.stderr.unwrap().contains("Failed to run Claude CLI"));
    }
}
