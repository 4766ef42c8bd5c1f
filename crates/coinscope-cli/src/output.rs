//! Non-interactive printing of reports and failures.

use std::io::{self, Write};

use coinscope::{PartialFailure, Report};

/// Write the report as pretty JSON followed by a newline.
pub fn write_json(out: &mut impl Write, report: &Report) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Write one line per failed source.
pub fn write_failure(out: &mut impl Write, failure: &PartialFailure) -> io::Result<()> {
    for message in failure.messages() {
        writeln!(out, "{message}")?;
    }
    Ok(())
}

/// Write the report lines as plain text.
pub fn write_plain(out: &mut impl Write, report: &Report) -> io::Result<()> {
    for line in &report.lines {
        writeln!(out, "{}", line.text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinscope::error::{FailedSource, SourceError};
    use coinscope::{FetchError, ReportLine, SourceId};

    fn report() -> Report {
        Report {
            query: "bitcoin".into(),
            primary_url: "https://coinmarketcap.com/currencies/bitcoin".into(),
            lines: vec![
                ReportLine::new("current_rank", "Current Rank: 1"),
                ReportLine::new("current_difficulty", "Current Difficulty: 20,000,000"),
            ],
        }
    }

    #[test]
    fn test_write_json() {
        let mut buf = Vec::new();
        write_json(&mut buf, &report()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["query"], "bitcoin");
        assert_eq!(value["lines"][0]["key"], "current_rank");
        assert_eq!(value["lines"][1]["text"], "Current Difficulty: 20,000,000");
        assert!(buf.ends_with(b"\n"));
    }

    #[test]
    fn test_write_plain() {
        let mut buf = Vec::new();
        write_plain(&mut buf, &report()).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Current Rank: 1\nCurrent Difficulty: 20,000,000\n"
        );
    }

    #[test]
    fn test_write_failure_one_line_per_source() {
        let url = "https://www.coinwarz.com/mining/bitcoin/difficulty-chart".to_string();
        let failure = PartialFailure {
            failed: vec![FailedSource {
                id: SourceId::Secondary,
                url: url.clone(),
                error: SourceError::from(FetchError::Status { url, status: 404 }),
            }],
        };
        let mut buf = Vec::new();
        write_failure(&mut buf, &failure).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "There was an issue scraping https://www.coinwarz.com/mining/bitcoin/difficulty-chart\n"
        );
    }
}
