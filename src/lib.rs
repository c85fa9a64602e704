//! Uniform shim for delegating one-shot tasks to LLM CLI backends.
//!
//! Each backend CLI has its own argument conventions and failure modes; this
//! crate hides them behind one contract: feed a prompt, enforce a wall-clock
//! budget, capture output, exit with a conventional status (0 success,
//! child's code on failure, 124 on timeout, 1 for everything else).

pub mod args;
pub mod error;
pub mod outcome;
pub mod profile;
pub mod report;
pub mod request;
pub mod runner;
