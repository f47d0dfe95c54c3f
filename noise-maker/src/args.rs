use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::Parser;
use derive_getters::Getters;

use crate::generator::TS_FORMAT;

#[derive(Parser, Debug, Getters)]
#[command(name = "noise-maker")]
#[command(about = "Generate fake CSV access logs for testing", long_about = None)]
pub struct CliArgs {
    #[arg(long, default_value_t = 1000)]
    lines: usize,

    /// Write here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Seed for reproducible logs
    #[arg(long)]
    seed: Option<u64>,

    /// First timestamp, `YYYY-MM-DD HH:MM:SS`; defaults to now
    #[arg(long, value_parser = parse_start)]
    start: Option<NaiveDateTime>,
}

fn parse_start(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, TS_FORMAT)
}
