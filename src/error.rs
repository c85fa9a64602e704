use thiserror::Error;

/// Request validation failures. All are detected before any process is
/// spawned and map to exit code 1 with the message on stderr.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("no prompt provided")]
    EmptyPrompt,

    #[error("timeout must be greater than zero")]
    ZeroTimeout,

    #[error("unknown backend option: {0}")]
    UnknownOption(String),
}
