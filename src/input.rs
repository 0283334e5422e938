//! Reading failure times from delimited text.
//!
//! Expects a header row and a comma-separated body. Only the named column
//! is read; other columns may hold anything. Blank lines are skipped.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum InputFileError {
    #[error("cannot read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("file has no header row")]
    MissingHeader,

    #[error("column `{column}` not found (available: {})", .available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("line {line}: cannot parse `{value}` as hours")]
    Parse { line: usize, value: String },

    #[error("line {line}: row has no field for column `{column}`")]
    ShortRow { line: usize, column: String },
}

/// Reads the `column` values of a CSV file.
pub fn read_lifetimes_csv(path: &Path, column: &str) -> Result<Vec<f64>, InputFileError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| InputFileError::Io(path.to_path_buf(), e))?;
    let values = parse_lifetimes_csv(&contents, column)?;
    debug!(path = %path.display(), column, rows = values.len(), "Read failure times");
    Ok(values)
}

/// Parses the `column` values of CSV text.
///
/// ```
/// use u_replacement::input::parse_lifetimes_csv;
/// let text = "pump,time_to_failure_hours\nA,812.5\nB,640\n";
/// let values = parse_lifetimes_csv(text, "time_to_failure_hours").unwrap();
/// assert_eq!(values, vec![812.5, 640.0]);
/// ```
pub fn parse_lifetimes_csv(contents: &str, column: &str) -> Result<Vec<f64>, InputFileError> {
    let mut lines = contents
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (_, header) = lines.next().ok_or(InputFileError::MissingHeader)?;
    let names: Vec<String> = header.split(',').map(unquote).map(str::to_string).collect();
    let index = names
        .iter()
        .position(|name| name == column)
        .ok_or_else(|| InputFileError::MissingColumn {
            column: column.to_string(),
            available: names.clone(),
        })?;

    lines
        .map(|(line, row)| {
            let field = row
                .split(',')
                .nth(index)
                .map(unquote)
                .ok_or_else(|| InputFileError::ShortRow {
                    line,
                    column: column.to_string(),
                })?;
            field.parse::<f64>().map_err(|_| InputFileError::Parse {
                line,
                value: field.to_string(),
            })
        })
        .collect()
}

fn unquote(field: &str) -> &str {
    let field = field.trim();
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_single_column() {
        let text = "time_to_failure_hours\n100\n250.5\n\n980\n";
        let values = parse_lifetimes_csv(text, "time_to_failure_hours").expect("valid csv");
        assert_eq!(values, vec![100.0, 250.5, 980.0]);
    }

    #[test]
    fn test_quoted_header_and_values() {
        let text = "\"id\",\"hours\"\n\"1\",\"512.25\"\n";
        assert_eq!(parse_lifetimes_csv(text, "hours").expect("valid csv"), vec![512.25]);
    }

    #[test]
    fn test_missing_column() {
        match parse_lifetimes_csv("a,b\n1,2\n", "hours") {
            Err(InputFileError::MissingColumn { column, available }) => {
                assert_eq!(column, "hours");
                assert_eq!(available, vec!["a", "b"]);
            }
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_value_reports_line() {
        let err = parse_lifetimes_csv("hours\n10\nabc\n", "hours").expect_err("bad value");
        assert!(matches!(err, InputFileError::Parse { line: 3, .. }), "{err}");
    }

    #[test]
    fn test_short_row() {
        let err = parse_lifetimes_csv("id,hours\n1,10\n2\n", "hours").expect_err("short row");
        assert!(matches!(err, InputFileError::ShortRow { line: 3, .. }));
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(
            parse_lifetimes_csv("\n\n", "hours"),
            Err(InputFileError::MissingHeader)
        ));
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "time_to_failure_hours\n700\n864\n1000").expect("write");
        let values = read_lifetimes_csv(file.path(), "time_to_failure_hours").expect("readable");
        assert_eq!(values.len(), 3);
        assert!(matches!(
            read_lifetimes_csv(Path::new("/nonexistent/data.csv"), "x"),
            Err(InputFileError::Io(..))
        ));
    }
}
