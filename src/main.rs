use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

mod config;
mod dashboard;
mod editor;
mod history;
mod printer;
mod status;
mod submit;
mod utils;

use config::AppConfig;
use history::HistoryStore;
use printer::PrinterClient;
use status::{start_status_poller, StatusPoller};
use submit::Submitter;

#[derive(Debug, Parser)]
#[command(name = "print_station", about = "Client for a network receipt printer")]
struct Cli {
    /// Path to a TOML config file (embedded defaults are used otherwise)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the printer endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// One-shot printer liveness check
    Status,
    /// Print text without opening the dashboard
    Print { text: String },
    /// List stored print jobs, newest first
    History,
    /// Delete all stored print jobs
    ClearHistory,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    info!("Starting print_station");

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load_default()?,
    };
    if let Some(endpoint) = cli.endpoint {
        config.printer.endpoint = endpoint;
    }

    let history = HistoryStore::open(&config.history.dir)?;
    let client = PrinterClient::new(&config.printer)?;
    let submitter = Submitter::new(client.clone(), history.clone());

    match cli.command {
        Some(Command::Status) => {
            let online = client.is_online().await;
            println!("{}", if online { "online" } else { "offline" });
            if !online {
                std::process::exit(1);
            }
        }
        Some(Command::Print { text }) => match submitter.submit(&text).await? {
            Some(job) => println!("printed job {}", job.id),
            None => println!("nothing to print"),
        },
        Some(Command::History) => {
            let now = utils::now_unix_ms();
            for job in history.jobs() {
                println!(
                    "{}  {}  {}",
                    job.id,
                    utils::format_relative(job.date, now),
                    job.text
                );
            }
        }
        Some(Command::ClearHistory) => {
            history.clear()?;
            println!("history cleared");
        }
        None => {
            let poller = StatusPoller::new(
                client,
                Duration::from_secs(config.poll.interval_secs),
            );

            // Poll in the background for the dashboard's lifetime.
            let poll_handle = start_status_poller(poller.clone());

            let rt = tokio::runtime::Handle::current();
            match dashboard::run_dashboard(history, submitter, poller, rt) {
                Ok(_) => info!("Dashboard closed cleanly"),
                Err(e) => eprintln!("Dashboard error: {:#?}", e),
            }

            poll_handle.abort();
        }
    }

    Ok(())
}
