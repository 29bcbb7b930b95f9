//! tmgr entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use tmgr_cli::cli::Cli;
use tmgr_cli::input::TerminalInput;
use tmgr_cli::{CommandLoop, TableConfig};
use tmgr_tmux::TmuxClient;

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so they stay out of the redrawn table
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> tmgr_cli::Result<()> {
    let tmux = TmuxClient::new()?;
    let mut app = CommandLoop::new(
        TableConfig::default(),
        &tmux,
        &tmux,
        TerminalInput::new(),
        std::io::stdout(),
    );
    app.run()
}
