mod args;
mod generator;
mod stream;

use std::{
    fs::File,
    io::{self, BufWriter},
};

use args::CliArgs;
use chrono::{Local, Timelike};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use stream::write_log_stream;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let mut rng = match args.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };
    let start = match args.start() {
        Some(start) => *start,
        None => Local::now()
            .naive_local()
            .with_nanosecond(0)
            .ok_or("current time has no whole second")?,
    };

    match args.output() {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_log_stream(&mut out, &mut rng, *args.lines(), start)?;
            eprintln!("Wrote {} log lines to {}", args.lines(), path.display());
        }
        None => {
            let mut out = BufWriter::new(io::stdout().lock());
            write_log_stream(&mut out, &mut rng, *args.lines(), start)?;
        }
    }
    Ok(())
}
