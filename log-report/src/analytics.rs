use std::{cmp::Reverse, collections::HashMap, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::{
    invariants::{Browser, Hour},
    models::LogRecord,
};

pub const NO_BROWSER: &str = "No browser information available";

static IMAGE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(?:jpg|gif|png)$").expect("valid image pattern"));

// One alternation so the leftmost token in a user agent decides. Group n
// is `Browser::ALL[n - 1]`.
static BROWSER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(Firefox)|(Chrome)|(Internet Explorer)|(Safari)")
        .expect("valid browser pattern")
});

pub fn is_image_hit(path: &str) -> bool {
    IMAGE_PATH.is_match(path)
}

/// Share of requests for `.jpg`, `.gif` or `.png` paths, in percent.
///
/// Not rounded. An empty dataset gives `0.0`.
pub fn image_hit_percentage(dataset: &[LogRecord]) -> f64 {
    if dataset.is_empty() {
        return 0.0;
    }
    let hits = dataset.iter().filter(|r| is_image_hit(&r.path)).count();
    100.0 * hits as f64 / dataset.len() as f64
}

pub fn detect_browser(user_agent: &str) -> Option<Browser> {
    let caps = BROWSER_TOKEN.captures(user_agent)?;
    Browser::ALL
        .into_iter()
        .enumerate()
        .find_map(|(i, browser)| caps.get(i + 1).map(|_| browser))
}

/// Request count per browser in canonical order, zero counts omitted.
pub fn browser_tally(dataset: &[LogRecord]) -> Vec<(Browser, usize)> {
    let mut counts: HashMap<Browser, usize> = HashMap::new();
    for browser in dataset.iter().filter_map(|r| detect_browser(&r.user_agent)) {
        *counts.entry(browser).or_default() += 1;
    }
    Browser::ALL
        .into_iter()
        .filter_map(|b| counts.get(&b).map(|&n| (b, n)))
        .collect()
}

/// Name of the most common browser, ties going to the earlier canonical one.
pub fn most_popular_browser(dataset: &[LogRecord]) -> String {
    browser_tally(dataset)
        .into_iter()
        // min_by_key keeps the first of equal keys
        .min_by_key(|(_, count)| Reverse(*count))
        .map_or_else(|| NO_BROWSER.to_string(), |(b, _)| b.to_string())
}

/// Requests per hour of day, busiest first, then by hour.
pub fn hits_by_hour(dataset: &[LogRecord]) -> Vec<(Hour, usize)> {
    let mut by_hour: HashMap<Hour, usize> = HashMap::new();
    for record in dataset {
        *by_hour.entry(record.timestamp.hour()).or_default() += 1;
    }
    let mut entries: Vec<_> = by_hour.into_iter().collect();
    entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    entries
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrowserCount {
    pub browser: Browser,
    pub requests: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourHits {
    pub hour: Hour,
    pub hits: usize,
}

/// Everything printed for one log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub total_requests: usize,
    pub image_hit_percentage: f64,
    pub most_popular_browser: String,
    pub browsers: Vec<BrowserCount>,
    pub hits_by_hour: Vec<HourHits>,
}

impl Report {
    pub fn from_dataset(dataset: &[LogRecord]) -> Self {
        Self {
            total_requests: dataset.len(),
            image_hit_percentage: image_hit_percentage(dataset),
            most_popular_browser: most_popular_browser(dataset),
            browsers: browser_tally(dataset)
                .into_iter()
                .map(|(browser, requests)| BrowserCount { browser, requests })
                .collect(),
            hits_by_hour: hits_by_hour(dataset)
                .into_iter()
                .map(|(hour, hits)| HourHits { hour, hits })
                .collect(),
        }
    }
}
