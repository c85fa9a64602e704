use std::path::PathBuf;

use crate::error::UsageError;
use crate::profile::BackendProfile;

/// Default wall-clock budget in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Validated inputs for one invocation. Constructed once, then read-only for
/// the lifetime of the run.
#[derive(Clone, Debug)]
pub struct TaskRequest {
    pub prompt: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Request structured output from the backend (appends its JSON flags).
    pub json_output: bool,
    /// Working directory for the child; `None` inherits the caller's cwd.
    pub workdir: Option<PathBuf>,
    /// Names of enabled extra-flag bundles from the profile.
    pub backend_options: Vec<String>,
}

impl TaskRequest {
    /// Validate against the backend profile. Must pass before the runner is
    /// handed the request; a failure here means nothing was spawned.
    pub fn validate(&self, profile: &BackendProfile) -> Result<(), UsageError> {
        if self.prompt.trim().is_empty() {
            return Err(UsageError::EmptyPrompt);
        }
        if self.timeout_secs == 0 {
            return Err(UsageError::ZeroTimeout);
        }
        for opt in &self.backend_options {
            if !profile.has_option(opt) {
                return Err(UsageError::UnknownOption(opt.clone()));
            }
        }
        Ok(())
    }
}
