//! `maze-walker` entry point.
//!
//! Parses the target address, sets up logging on stderr and runs the command
//! loop on stdin.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use maze_walker_client::{run_repl, MazeClient, MazeClientOptions, DEFAULT_TARGET};

#[derive(Parser, Debug)]
#[command(name = "maze-walker", version, about = "Walk the maze on a remote maze walker service")]
struct Cli {
    /// Server address
    #[arg(long, env = "MAZE_TARGET", default_value = DEFAULT_TARGET)]
    target: String,

    /// Seconds to wait when connecting to the server
    #[arg(long, value_name = "SECS")]
    connect_timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout belongs to the command loop
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut options = MazeClientOptions::new().with_target(cli.target);
    if let Some(secs) = cli.connect_timeout_secs {
        options = options.with_connect_timeout_secs(secs);
    }
    tracing::info!(target_addr = %options.target, "starting maze walker client");

    let mut client = MazeClient::new(Some(options))?;
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    run_repl(&mut client, stdin).await?;

    Ok(())
}
