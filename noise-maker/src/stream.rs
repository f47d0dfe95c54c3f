use std::io::{self, Write};

use chrono::NaiveDateTime;
use rand::Rng;

use crate::generator::{generate_access_row, next_timestamp};

/// Writes `lines` rows with timestamps starting at `start`.
pub fn write_log_stream<W: Write, R: Rng + ?Sized>(
    out: &mut W,
    rng: &mut R,
    lines: usize,
    start: NaiveDateTime,
) -> io::Result<()> {
    let mut timestamp = start;
    for _ in 0..lines {
        writeln!(out, "{}", generate_access_row(rng, timestamp))?;
        timestamp = next_timestamp(rng, timestamp);
    }
    out.flush()
}
