use clap::Parser;
use tracing_subscriber::EnvFilter;

use ssvc_triage::cli;
use ssvc_triage::errors::TriageError;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(!cli.no_color)
            .with_writer(std::io::stderr)
            .init();
    }

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Starting ssvc-triage");

    let result: Result<(), TriageError> = match cli.command {
        cli::Commands::Evaluate(args) => cli::evaluate::handle_evaluate(args, cli.quiet).await,
        cli::Commands::Decide(args) => cli::decide::handle_decide(args).await,
        cli::Commands::Table => cli::table::handle_table(),
        cli::Commands::Validate(args) => cli::validate::handle_validate(args).await,
    };

    if let Err(e) = result {
        let class = e.classify();
        tracing::debug!(error_type = class.error_type, "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(class.exit_code);
    }
}
