use csv::{Position, ReaderBuilder, StringRecord};
use tracing::debug;

use crate::{
    error::{Error, Result},
    invariants::Timestamp,
    models::{LogDataset, LogRecord},
};

// path, timestamp, user agent, and two trailing fields nothing reads
const FIELD_COUNT: usize = 5;

/// Parses CSV access log text into records, failing on the first bad row.
///
/// Blank lines are allowed only at the end of the text; every row must have
/// exactly five fields and a `YYYY-MM-DD HH:MM:SS` timestamp.
pub fn parse(raw: &str) -> Result<LogDataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let mut dataset = Vec::new();
    for row in reader.records() {
        let row = row?;
        let start = row.position().map_or_else(Position::new, Clone::clone);
        let line = match row_start(raw.as_bytes(), &start) {
            RowStart::Line(line) => line,
            RowStart::AfterBlank(line) => {
                return Err(Error::MalformedRecord { line, found: 0 });
            }
        };
        dataset.push(parse_row(&row, line)?);
    }
    debug!(records = dataset.len(), "parsed access log");
    Ok(dataset)
}

enum RowStart {
    Line(u64),
    /// An empty line, at this line number, was skipped to reach the row.
    AfterBlank(u64),
}

// The reader positions a row right after the previous row's terminator and
// drops empty lines silently, so any terminator bytes between that offset and
// the row's first byte are empty lines. A CRLF terminator is consumed up to
// the CR; its LF is still ahead of the offset.
fn row_start(raw: &[u8], start: &Position) -> RowStart {
    let offset = start.byte() as usize;
    let gap = raw.get(offset..).unwrap_or_default();
    let skipped = &gap[..gap.iter().take_while(|b| matches!(b, b'\r' | b'\n')).count()];
    let pending_lf =
        offset > 0 && raw[offset - 1] == b'\r' && skipped.first() == Some(&b'\n');

    if skipped.len() > usize::from(pending_lf) {
        return RowStart::AfterBlank(start.line() + u64::from(pending_lf));
    }
    let newlines = skipped.iter().filter(|&&b| b == b'\n').count() as u64;
    RowStart::Line(start.line() + newlines)
}

fn parse_row(row: &StringRecord, line: u64) -> Result<LogRecord> {
    if row.len() != FIELD_COUNT {
        return Err(Error::MalformedRecord {
            line,
            found: row.len(),
        });
    }
    let timestamp = row[1]
        .parse::<Timestamp>()
        .map_err(|reason: String| {
            debug!(line, %reason, "rejected timestamp");
            Error::InvalidTimestamp {
                line,
                value: row[1].to_string(),
            }
        })?;
    Ok(LogRecord {
        path: row[0].to_string(),
        timestamp,
        user_agent: row[2].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use asserting::prelude::*;

    const FIREFOX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn parse_keeps_input_order() {
        let raw = format!(
            "/a.html,2023-01-01 00:00:01,{FIREFOX},200,512\n\
             /b.png,2023-01-01 13:30:00,{FIREFOX},200,1024\n\
             /c.css,2022-12-31 23:59:59,{FIREFOX},304,0\n"
        );
        let dataset = parse(&raw).unwrap();
        let paths: Vec<_> = dataset.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["/a.html", "/b.png", "/c.css"]);
        assert_eq!(dataset[1].timestamp, ts("2023-01-01 13:30:00"));
        assert_eq!(dataset[2].user_agent, FIREFOX);
    }

    #[test]
    fn parse_honours_quoted_commas() {
        let raw = r#"/index.html,2023-04-02 08:15:00,"Mozilla/5.0 (Windows NT 10.0, Win64) Chrome/114.0",200,"1,024""#;
        let dataset = parse(raw).unwrap();
        assert_that!(dataset.len()).is_equal_to(1);
        assert_eq!(
            dataset[0],
            LogRecord {
                path: "/index.html".into(),
                timestamp: ts("2023-04-02 08:15:00"),
                user_agent: "Mozilla/5.0 (Windows NT 10.0, Win64) Chrome/114.0".into(),
            }
        );
    }

    #[test]
    fn parse_honours_newlines_inside_quotes() {
        let raw = "/a,2023-01-01 01:00:00,\"two\nlines\",200,1\n/b,2023-01-01 02:00:00,ua,200,1\n";
        let dataset = parse(raw).unwrap();
        assert_that!(dataset.len()).is_equal_to(2);
        assert_eq!(dataset[0].user_agent, "two\nlines");
    }

    #[test]
    fn parse_skips_trailing_blank_lines() {
        let raw = "/a,2023-01-01 01:00:00,ua,200,1\r\n/b,2023-01-01 02:00:00,ua,200,1\r\n\r\n\n";
        assert_that!(parse(raw).unwrap().len()).is_equal_to(2);
    }

    #[test]
    fn parse_rejects_blank_line_between_rows() {
        let raw = "/a,2023-01-01 01:00:00,ua,200,1\n\n/b,2023-01-01 02:00:00,ua,200,1\n";
        let err = parse(raw).unwrap_err();
        assert!(
            matches!(err, Error::MalformedRecord { line: 2, found: 0 }),
            "{err:?}"
        );
    }

    #[test]
    fn parse_rejects_blank_crlf_line_between_rows() {
        let raw = "/a,2023-01-01 01:00:00,ua,200,1\r\n/b,2023-01-01 02:00:00,ua,200,1\r\n\r\n/c,2023-01-01 03:00:00,ua,200,1\r\n";
        let err = parse(raw).unwrap_err();
        assert!(
            matches!(err, Error::MalformedRecord { line: 3, found: 0 }),
            "{err:?}"
        );
    }

    #[test]
    fn parse_rejects_leading_blank_line() {
        let raw = "\n/a,2023-01-01 01:00:00,ua,200,1\n";
        assert!(matches!(
            parse(raw),
            Err(Error::MalformedRecord { line: 1, found: 0 })
        ));
    }

    #[test]
    fn parse_allows_blank_lines_inside_quotes() {
        let raw = "/a,2023-01-01 01:00:00,\"x\n\ny\",200,1\n/b,2023-01-01 02:00:00,ua,200,1\n\n";
        let dataset = parse(raw).unwrap();
        assert_that!(dataset.len()).is_equal_to(2);
        assert_eq!(dataset[0].user_agent, "x\n\ny");
    }

    #[test]
    fn parse_counts_crlf_lines() {
        let raw = "/a,2023-01-01 01:00:00,ua,200,1\r\n/b,2023-01-01 02:00:00,ua,200,1\r\n/c,2023-01-01 03:00:00,ua\r\n";
        assert!(matches!(
            parse(raw),
            Err(Error::MalformedRecord { line: 3, found: 3 })
        ));
    }

    #[test]
    fn parse_empty_input() {
        assert_that!(parse("").unwrap()).is_empty();
    }

    #[test]
    fn parse_rejects_four_fields() {
        let raw = "/a,2023-01-01 01:00:00,ua,200,1\n/b,2023-01-01 02:00:00,ua,200\n";
        let err = parse(raw).unwrap_err();
        assert!(
            matches!(err, Error::MalformedRecord { line: 2, found: 4 }),
            "{err:?}"
        );
    }

    #[test]
    fn parse_rejects_six_fields() {
        let raw = "/a,2023-01-01 01:00:00,ua,200,1,extra\n";
        assert!(matches!(
            parse(raw),
            Err(Error::MalformedRecord { line: 1, found: 6 })
        ));
    }

    #[test]
    fn parse_rejects_invalid_month() {
        let raw = "/a,2023-01-01 01:00:00,ua,200,1\n/b,2023-13-01 10:00:00,ua,200,1\n";
        match parse(raw) {
            Err(Error::InvalidTimestamp { line, value }) => {
                assert_eq!(line, 2);
                assert_eq!(value, "2023-13-01 10:00:00");
            }
            other => panic!("expected InvalidTimestamp, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_invalid_hour() {
        let raw = "/a,2023-01-01 25:00:00,ua,200,1\n";
        assert!(matches!(
            parse(raw),
            Err(Error::InvalidTimestamp { line: 1, .. })
        ));
    }

    #[test]
    fn parse_aborts_on_first_failure() {
        let raw = "/a,not a date,ua,200,1\n/b,2023-01-01 02:00:00,ua\n";
        assert!(matches!(
            parse(raw),
            Err(Error::InvalidTimestamp { line: 1, .. })
        ));
    }
}
