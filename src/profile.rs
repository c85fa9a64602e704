/// How the prompt reaches the backend process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptDelivery {
    /// Written to the child's stdin; the pipe is closed to signal end-of-input.
    /// Avoids ARG_MAX limits for large prompts.
    Stdin,
    /// Passed in the argument vector, preceded by `flag` when the backend
    /// wants one (e.g. gemini's `-p <prompt>`).
    Argument { flag: Option<&'static str> },
}

/// Backend-specific invocation conventions. One static instance per backend;
/// the runner never special-cases a backend, so adding one is just a new
/// profile constructor and a thin binary.
#[derive(Clone, Debug)]
pub struct BackendProfile {
    /// Executable looked up on PATH.
    pub program: &'static str,
    /// Human name used in diagnostics ("Claude CLI exited with code 2").
    pub display_name: &'static str,
    pub delivery: PromptDelivery,
    /// Flags that always precede the model flag (e.g. claude's `-p` print mode).
    pub base_args: &'static [&'static str],
    /// Flag preceding the model identifier.
    pub model_flag: &'static str,
    /// Appended when structured output is requested.
    pub json_flags: &'static [&'static str],
    /// Named optional flag bundles, enabled per-request by name.
    pub extra_flags: &'static [(&'static str, &'static [&'static str])],
    pub default_model: &'static str,
    /// Remediation text when the executable cannot be found.
    pub missing_binary_hint: Option<&'static str>,
}

impl BackendProfile {
    pub fn has_option(&self, name: &str) -> bool {
        self.extra_flags.iter().any(|(n, _)| *n == name)
    }
}

/// Claude CLI: `claude -p --model <model>` with the prompt piped to stdin.
pub const fn claude() -> BackendProfile {
    BackendProfile {
        program: "claude",
        display_name: "Claude CLI",
        delivery: PromptDelivery::Stdin,
        base_args: &["-p"],
        model_flag: "--model",
        json_flags: &["--output-format", "json"],
        extra_flags: &[],
        default_model: "sonnet",
        missing_binary_hint: None,
    }
}

/// Gemini CLI: `gemini -p <prompt> -m <model>`, with an opt-in `--yolo`
/// auto-approval bundle.
pub const fn gemini() -> BackendProfile {
    BackendProfile {
        program: "gemini",
        display_name: "Gemini CLI",
        delivery: PromptDelivery::Argument { flag: Some("-p") },
        base_args: &[],
        model_flag: "-m",
        json_flags: &["--output-format", "json"],
        extra_flags: &[("yolo", &["--yolo"])],
        default_model: "gemini-2.5-flash",
        missing_binary_hint: Some("Install with: npm install -g @google/gemini-cli"),
    }
}
