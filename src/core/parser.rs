// benchpost - core/parser.rs
//
// Line-oriented parsing of one benchmark log into one result row.
// Core layer: accepts BufRead trait objects, never touches the filesystem.
//
// A log carries two lines of interest:
//
//   Run Configuration,Shamir,5,3,2
//   ...
//          1.234 +- 0.056 seconds time elapsed  ( +-  4.54% )
//
// The scan keeps the latest capture of each and checks for both at the end.

use crate::core::model::{Configuration, ResultRow, Timing};
use crate::util::constants;
use crate::util::error::ParseError;
use regex::Regex;
use std::io::BufRead;
use std::path::Path;
use std::sync::OnceLock;

fn timing_regex() -> &'static Regex {
    static TIMING: OnceLock<Regex> = OnceLock::new();
    // The pattern is a constant covered by the tests below.
    TIMING.get_or_init(|| Regex::new(constants::TIMING_PATTERN).expect("invalid timing regex"))
}

/// First `mean +- stddev` occurrence on `line`, if any.
pub fn first_timing(line: &str) -> Option<Timing> {
    timing_regex().captures(line).map(|caps| Timing {
        mean: caps[1].to_string(),
        stddev: caps[2].to_string(),
    })
}

// =============================================================================
// Scan state
// =============================================================================

/// Captures gathered while scanning a log, one line at a time.
///
/// Each configuration line replaces the previous configuration; each timing
/// line replaces the previous timing, including with `None` when the line
/// carries no `mean +- stddev` pair.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LogScan {
    pub configuration: Option<Configuration>,
    pub timing: Option<Timing>,
}

impl LogScan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line. A line may update both captures.
    pub fn scan_line(&mut self, line: &str) {
        if line.contains(constants::RUN_CONFIGURATION_MARKER) {
            tracing::trace!(line = %preview(line), "Configuration line");
            self.configuration = Some(Configuration::from_line(line));
        }
        if line.contains(constants::TIMING_MARKER) {
            tracing::trace!(line = %preview(line), "Timing line");
            self.timing = first_timing(line);
        }
    }

    /// Build the row once every line has been seen.
    ///
    /// Configuration fields 0..4 are protocol, n, t, l; anything after is
    /// ignored. Faults are checked in field order: configuration presence,
    /// configuration width, then timing.
    pub fn finish(self, file: &Path) -> Result<ResultRow, ParseError> {
        let configuration = self
            .configuration
            .ok_or_else(|| ParseError::MissingConfiguration {
                file: file.to_path_buf(),
            })?;

        let found = configuration.fields.len();
        let mut fields = configuration.fields.into_iter();
        let (protocol, n, t, l) =
            match (fields.next(), fields.next(), fields.next(), fields.next()) {
                (Some(protocol), Some(n), Some(t), Some(l)) => (protocol, n, t, l),
                _ => {
                    return Err(ParseError::ConfigurationTooShort {
                        file: file.to_path_buf(),
                        found,
                        required: constants::CONFIGURATION_FIELDS,
                    })
                }
            };

        let timing = self.timing.ok_or_else(|| ParseError::MissingTiming {
            file: file.to_path_buf(),
        })?;

        Ok(ResultRow {
            protocol,
            n,
            t,
            l,
            avg: timing.mean,
            stddev: timing.stddev,
        })
    }
}

// =============================================================================
// Reader entry point
// =============================================================================

/// Scan `reader` line by line and build the row for `file`.
///
/// `file` is used for error context only. Invalid UTF-8 is replaced rather
/// than rejected so a stray byte in harness output cannot abort the run.
pub fn parse_log<R: BufRead>(mut reader: R, file: &Path) -> Result<ResultRow, ParseError> {
    let mut scan = LogScan::new();
    let mut buf = Vec::new();
    let mut lines_processed: u64 = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| ParseError::Io {
                file: file.to_path_buf(),
                source,
            })?;
        if read == 0 {
            break;
        }
        lines_processed += 1;
        scan.scan_line(&String::from_utf8_lossy(&buf));
    }

    let row = scan.finish(file)?;
    tracing::debug!(
        file = %file.display(),
        lines_processed,
        protocol = %row.protocol,
        avg = %row.avg,
        stddev = %row.stddev,
        "Parsed log"
    );
    Ok(row)
}

/// Truncate a line for trace output.
fn preview(line: &str) -> &str {
    let line = line.trim_end();
    match line.char_indices().nth(constants::DEBUG_MAX_LINE_PREVIEW) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn parse(content: &str) -> Result<ResultRow, ParseError> {
        parse_log(Cursor::new(content.as_bytes()), &PathBuf::from("Shamir-1.log"))
    }

    const PERF_LOG: &str = "\
Run Configuration,Shamir,5,3,2

 Performance counter stats for './benchmark 5 3 2' (10 runs):

          1,234.56 msec task-clock                #    0.999 CPUs utilized            ( +-  0.12% )

             1.234 +- 0.056 seconds time elapsed  ( +-  4.54% )
";

    #[test]
    fn test_parse_perf_output() {
        let row = parse(PERF_LOG).unwrap();
        assert_eq!(row.fields(), ["Shamir", "5", "3", "2", "1.234", "0.056"]);
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(parse(PERF_LOG).unwrap(), parse(PERF_LOG).unwrap());
    }

    #[test]
    fn test_last_configuration_wins() {
        let content = "Run Configuration,Shamir,5,3,2\n\
                       Run Configuration,Shamir,9,7,4\n\
                       0.100 +- 0.001 seconds time elapsed\n";
        let row = parse(content).unwrap();
        assert_eq!((row.n.as_str(), row.t.as_str(), row.l.as_str()), ("9", "7", "4"));
    }

    #[test]
    fn test_configuration_after_timing_still_counts() {
        let content = "0.100 +- 0.001 seconds time elapsed\n\
                       Run Configuration,Blakely,3,2,1\n";
        let row = parse(content).unwrap();
        assert_eq!(row.protocol, "Blakely");
    }

    #[test]
    fn test_first_timing_match_wins() {
        let content = "Run Configuration,Shamir,5,3,2\n\
                       1.111 +- 0.011 and 2.222 +- 0.022 seconds time elapsed\n";
        let row = parse(content).unwrap();
        assert_eq!((row.avg.as_str(), row.stddev.as_str()), ("1.111", "0.011"));
    }

    #[test]
    fn test_later_timing_line_replaces_earlier() {
        let content = "Run Configuration,Shamir,5,3,2\n\
                       1.000 +- 0.100 seconds time elapsed\n\
                       2.000 +- 0.200 seconds time elapsed\n";
        let row = parse(content).unwrap();
        assert_eq!(row.avg, "2.000");
    }

    #[test]
    fn test_timing_line_without_pair_clears_capture() {
        let content = "Run Configuration,Shamir,5,3,2\n\
                       1.000 +- 0.100 seconds time elapsed\n\
                       3 seconds time elapsed\n";
        assert!(matches!(parse(content), Err(ParseError::MissingTiming { .. })));
    }

    #[test]
    fn test_extra_configuration_fields_ignored() {
        let content = "Run Configuration,Shamir,5,3,2,gmp,O3\n\
                       1.000 +- 0.100 seconds time elapsed\n";
        let row = parse(content).unwrap();
        assert_eq!(row.l, "2");
    }

    #[test]
    fn test_missing_configuration() {
        let content = "1.000 +- 0.100 seconds time elapsed\n";
        assert!(matches!(
            parse(content),
            Err(ParseError::MissingConfiguration { .. })
        ));
    }

    #[test]
    fn test_missing_timing() {
        let content = "Run Configuration,Shamir,5,3,2\n";
        assert!(matches!(parse(content), Err(ParseError::MissingTiming { .. })));
    }

    #[test]
    fn test_short_configuration_is_out_of_range() {
        let content = "Run Configuration,Shamir,5,3\n\
                       1.000 +- 0.100 seconds time elapsed\n";
        match parse(content) {
            Err(ParseError::ConfigurationTooShort {
                found, required, ..
            }) => {
                assert_eq!(found, 3);
                assert_eq!(required, 4);
            }
            other => panic!("expected ConfigurationTooShort, got {other:?}"),
        }
    }

    #[test]
    fn test_short_configuration_reported_before_missing_timing() {
        let content = "Run Configuration,Shamir,5,3\n";
        assert!(matches!(
            parse(content),
            Err(ParseError::ConfigurationTooShort { found: 3, .. })
        ));
    }

    #[test]
    fn test_empty_log_reports_configuration_first() {
        assert!(matches!(
            parse(""),
            Err(ParseError::MissingConfiguration { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let mut bytes = b"Run Configuration,Shamir,5,3,2\n\xff\xfe junk\n".to_vec();
        bytes.extend_from_slice(b"1.000 +- 0.100 seconds time elapsed\n");
        let row = parse_log(Cursor::new(bytes), &PathBuf::from("x.log")).unwrap();
        assert_eq!(row.avg, "1.000");
    }

    #[test]
    fn test_last_line_without_newline() {
        let content = "Run Configuration,Shamir,5,3,2\n1.000 +- 0.100 seconds time elapsed";
        assert_eq!(parse(content).unwrap().stddev, "0.100");
    }

    #[test]
    fn test_timing_regex_requires_fraction() {
        assert!(first_timing("1 +- 0 seconds time elapsed").is_none());
        assert!(first_timing("1.0 +- 2 seconds time elapsed").is_none());
    }

    #[test]
    fn test_timing_regex_requires_single_spaces() {
        assert!(first_timing("1.0  +- 0.1").is_none());
        assert!(first_timing("1.0 +-  0.1").is_none());
        assert_eq!(
            first_timing("x 12.50 +- 0.25 y"),
            Some(Timing {
                mean: "12.50".into(),
                stddev: "0.25".into()
            })
        );
    }
}
