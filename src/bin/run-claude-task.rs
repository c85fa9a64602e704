use std::path::PathBuf;

use clap::Parser;

use subtask::profile;
use subtask::report;
use subtask::request::{DEFAULT_TIMEOUT_SECS, TaskRequest};
use subtask::runner;

/// Run a one-shot task through the Claude CLI.
#[derive(Parser, Debug)]
#[command(name = "run-claude-task", version)]
struct Cli {
    /// Task prompt, piped to the Claude CLI's stdin.
    prompt: String,

    /// Model to use (sonnet, opus).
    #[arg(long)]
    model: Option<String>,

    /// Timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Request JSON output from the backend.
    #[arg(long)]
    json: bool,

    /// Working directory for the backend process.
    #[arg(long)]
    workdir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = parse_or_exit();
    let profile = profile::claude();

    let request = TaskRequest {
        prompt: cli.prompt,
        model: cli
            .model
            .unwrap_or_else(|| profile.default_model.to_string()),
        timeout_secs: cli.timeout,
        json_output: cli.json,
        workdir: cli.workdir,
        backend_options: vec![],
    };
    if let Err(err) = request.validate(&profile) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    let outcome = runner::execute(&profile, &request).await;
    std::process::exit(report::emit(&report::report(&profile, &request, &outcome)));
}

fn parse_or_exit() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help/--version succeed; anything else is a usage error → 1,
            // not clap's default 2.
            let is_display = matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            );
            let _ = err.print();
            std::process::exit(if is_display { 0 } else { 1 });
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
