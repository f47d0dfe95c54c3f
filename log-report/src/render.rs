use std::fmt::Write;

use clap::ValueEnum;
use num_format::{Locale, ToFormattedString};

use crate::{analytics::Report, error::Result};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)? + "\n"),
    }
}

fn render_text(report: &Report) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = writeln!(
        out,
        "Image requests account for {:.2}% of all requests",
        report.image_hit_percentage
    );
    let _ = writeln!(
        out,
        "The most popular browser is {}",
        report.most_popular_browser
    );
    for entry in &report.hits_by_hour {
        let _ = writeln!(
            out,
            "Hour {} has {} hits",
            entry.hour,
            entry.hits.to_formatted_string(&Locale::en)
        );
    }
    out
}
