use chrono::NaiveDateTime;
use rand::{Rng, seq::IndexedRandom};

pub const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const PATHS: [(&str, u8); 10] = [
    ("/", 10),
    ("/index.html", 20),
    ("/login", 10),
    ("/api/items", 30),
    ("/images/logo.png", 15),
    ("/images/banner.JPG", 8),
    ("/images/spinner.gif", 5),
    ("/static/app.js", 12),
    ("/static/site.css", 12),
    ("/downloads/photo.png.bak", 1),
];
const USER_AGENTS: [(&str, u8); 7] = [
    (
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36",
        40,
    ),
    (
        "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0",
        20,
    ),
    (
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.5 Safari/605.1.15",
        15,
    ),
    (
        "Mozilla/4.0 (compatible; Internet Explorer 8.0; Windows NT 6.1)",
        5,
    ),
    ("Googlebot/2.1 (+http://www.google.com/bot.html)", 10),
    ("curl/8.1.2", 5),
    ("", 2),
];
const STATUS: [(u16, u8); 5] = [(200, 70), (304, 10), (404, 12), (403, 3), (500, 5)];
const MAX_GAP_SECS: i64 = 90;

/// One CSV row: path, timestamp, quoted user agent, status, bytes.
pub fn generate_access_row<R: Rng + ?Sized>(rng: &mut R, timestamp: NaiveDateTime) -> String {
    let path = PATHS.choose_weighted(rng, |(_, w)| *w).unwrap().0;
    let agent = USER_AGENTS.choose_weighted(rng, |(_, w)| *w).unwrap().0;
    let status = STATUS.choose_weighted(rng, |(_, w)| *w).unwrap().0;
    let size = if status == 304 { 0 } else { rng.random_range(100..20_000) };
    let timestamp = timestamp.format(TS_FORMAT);
    let agent = agent.replace('"', "\"\"");

    format!("{path},{timestamp},\"{agent}\",{status},{size}")
}

/// Time of the row after `previous`, never earlier.
pub fn next_timestamp<R: Rng + ?Sized>(rng: &mut R, previous: NaiveDateTime) -> NaiveDateTime {
    previous + chrono::TimeDelta::seconds(rng.random_range(0..=MAX_GAP_SECS))
}
