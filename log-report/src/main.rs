mod analytics;
mod error;
mod ingest;
mod invariants;
mod models;
mod parser;
mod render;

use std::{process::ExitCode, time::Duration};

use analytics::Report;
use clap::Parser;
use error::{Error, Result};
use ingest::Source;
use render::OutputFormat;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "Please enter the URL of the log file to be processed: ";

#[derive(Parser, Debug)]
#[command(version, about = "Summarise a CSV web server access log", long_about = None)]
struct Args {
    /// URL or file path of the log; asked for on stdin when omitted
    source: Option<Source>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Give up on an HTTP download after this many seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();
    match run(args).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "log report failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<String> {
    let source = match args.source {
        Some(source) => source,
        None => prompt_for_source().await?,
    };
    let raw = ingest::fetch(&source, Duration::from_secs(args.timeout_secs)).await?;
    let dataset = parser::parse(&raw)?;
    info!(records = dataset.len(), "computing report");
    let report = Report::from_dataset(&dataset);
    render::render(&report, args.format)
}

async fn prompt_for_source() -> Result<Source> {
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(PROMPT.as_bytes())
        .await
        .map_err(Error::Prompt)?;
    stdout.flush().await.map_err(Error::Prompt)?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .map_err(Error::Prompt)?;
    line.parse().map_err(|reason: String| {
        Error::Prompt(std::io::Error::new(std::io::ErrorKind::InvalidInput, reason))
    })
}
