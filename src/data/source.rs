/// Column sources: where the loader gets each named series from
///
/// [`ColumnSource`] is the `lookup(column) -> sequence` capability the
/// loader depends on. [`HistoryFile`] is the implementation backed by a
/// MESA history log on disk.

use std::io::{BufRead, Cursor};
use std::path::{Path, PathBuf};

use super::header::{self, HEADER_SKIP_LINES};
use crate::error::LoadError;

/// Anything that can hand out a full numeric series by column name.
pub trait ColumnSource {
    fn column(&self, name: &str) -> Result<Vec<f64>, LoadError>;
}

/// A fully parsed history log: header attributes, column names and rows.
#[derive(Debug, Clone)]
pub struct HistoryFile {
    path: PathBuf,
    attributes: Vec<(String, String)>,
    names: Vec<String>,
    /// Row-major data, one `Vec` per model step
    rows: Vec<Vec<f64>>,
}

impl HistoryFile {
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, LoadError> {
        let attributes = header::parse_attributes(Cursor::new(content))?;
        let names = header::parse_column_names(Cursor::new(content))?;

        let mut rows = Vec::new();
        // Data starts right after the column-name line.
        for (idx, line) in Cursor::new(content)
            .lines()
            .enumerate()
            .skip(HEADER_SKIP_LINES + 1)
        {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            rows.push(parse_row(&line, idx + 1, &names)?);
        }

        log::debug!(
            "Parsed {}: {} attributes, {} columns, {} rows",
            path.display(),
            attributes.len(),
            names.len(),
            rows.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            attributes,
            names,
            rows,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl ColumnSource for HistoryFile {
    /// A name repeated in the header resolves to its last occurrence.
    fn column(&self, name: &str) -> Result<Vec<f64>, LoadError> {
        let idx = self
            .names
            .iter()
            .rposition(|n| n == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))?;
        Ok(self.rows.iter().map(|row| row[idx]).collect())
    }
}

fn parse_row(line: &str, line_number: usize, names: &[String]) -> Result<Vec<f64>, LoadError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != names.len() {
        return Err(LoadError::RaggedRow {
            line: line_number,
            expected: names.len(),
            found: tokens.len(),
        });
    }
    tokens
        .iter()
        .zip(names)
        .map(|(token, name)| {
            parse_number(token).ok_or_else(|| LoadError::BadNumber {
                line: line_number,
                column: name.clone(),
                token: token.to_string(),
            })
        })
        .collect()
}

/// Parse a numeric token, accepting Fortran `D` exponents.
fn parse_number(token: &str) -> Option<f64> {
    token
        .parse::<f64>()
        .ok()
        .or_else(|| token.replace(['D', 'd'], "E").parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(columns: &str, rows: &[&str]) -> String {
        let mut s = String::from("1 2\nversion_number compiler\n15140 \"gfortran\"\n\n1 2 3\n");
        s.push_str(columns);
        s.push('\n');
        for row in rows {
            s.push_str(row);
            s.push('\n');
        }
        s
    }

    #[test]
    fn test_parse_rows_and_lookup() {
        let content = history(
            "model_number star_age log_L",
            &["1 1.0E+03 0.5", "2 2.5D+03 0.6", "", "3 4.0e3 -0.1"],
        );
        let file = HistoryFile::parse(&content, Path::new("history.data")).unwrap();
        assert_eq!(file.row_count(), 3);
        assert_eq!(file.column_names().len(), 3);
        assert_eq!(file.attributes()[1].1, "gfortran");
        assert_eq!(file.column("star_age").unwrap(), vec![1000.0, 2500.0, 4000.0]);
        assert_eq!(file.column("log_L").unwrap(), vec![0.5, 0.6, -0.1]);
    }

    #[test]
    fn test_missing_column() {
        let content = history("a b", &["1 2"]);
        let file = HistoryFile::parse(&content, Path::new("h")).unwrap();
        let err = file.column("c").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref n) if n == "c"));
    }

    #[test]
    fn test_ragged_row_reports_line() {
        let content = history("a b", &["1 2", "3"]);
        let err = HistoryFile::parse(&content, Path::new("h")).unwrap_err();
        assert!(matches!(
            err,
            LoadError::RaggedRow { line: 8, expected: 2, found: 1 }
        ));
    }

    #[test]
    fn test_bad_number() {
        let content = history("a b", &["1 x2"]);
        let err = HistoryFile::parse(&content, Path::new("h")).unwrap_err();
        match err {
            LoadError::BadNumber { line, column, token } => {
                assert_eq!(line, 7);
                assert_eq!(column, "b");
                assert_eq!(token, "x2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_repeated_name_resolves_to_last() {
        let content = history("time time lum", &["1 10 100", "2 20 200"]);
        let file = HistoryFile::parse(&content, Path::new("h")).unwrap();
        assert_eq!(file.column("time").unwrap(), vec![10.0, 20.0]);
    }

    #[test]
    fn test_open_missing_file() {
        let err = HistoryFile::open(Path::new("/nonexistent/history.data")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    fn test_fortran_exponent() {
        assert_eq!(parse_number("1.5D+02"), Some(150.0));
        assert_eq!(parse_number("-2d-1"), Some(-0.2));
        assert_eq!(parse_number("NaN").map(f64::is_nan), Some(true));
        assert_eq!(parse_number("abc"), None);
    }
}
