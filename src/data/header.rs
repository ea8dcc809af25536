/// History log header parser
///
/// A MESA `history.data` (or `profile.data`) file opens with a fixed block:
///
///   line 1  global attribute column numbers
///   line 2  global attribute names
///   line 3  global attribute values
///   line 4  blank separator
///   line 5  per-column numbers
///   line 6  per-column names
///   line 7+ data rows, one per model step
///
/// The parser only needs lines 2, 3 and 6; data rows are read by
/// [`super::source::HistoryFile`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::LoadError;

/// Number of lines preceding the column-name line: the five-line global
/// header block MESA writes ahead of every history/profile log.
pub const HEADER_SKIP_LINES: usize = 5;

/// 1-based line numbers of the global attribute block.
const ATTRIBUTE_NAMES_LINE: usize = 2;
const ATTRIBUTE_VALUES_LINE: usize = 3;

/// Read the column names of the log at `path`.
pub fn read_column_names(path: &Path) -> Result<Vec<String>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_column_names(BufReader::new(file))
}

/// Skip the fixed header block and split the next line on whitespace.
///
/// Tokens are returned verbatim and in order, duplicates included.
pub fn parse_column_names<R: BufRead>(reader: R) -> Result<Vec<String>, LoadError> {
    let needed = HEADER_SKIP_LINES + 1;
    let mut lines = reader.lines();
    for found in 0..HEADER_SKIP_LINES {
        if lines.next().transpose()?.is_none() {
            return Err(LoadError::TruncatedHeader { needed, found });
        }
    }
    match lines.next().transpose()? {
        Some(line) => Ok(split_names(&line)),
        None => Err(LoadError::TruncatedHeader {
            needed,
            found: HEADER_SKIP_LINES,
        }),
    }
}

/// Global attributes as ordered `(name, value)` pairs from lines 2 and 3.
pub fn parse_attributes<R: BufRead>(reader: R) -> Result<Vec<(String, String)>, LoadError> {
    let mut lines = reader.lines();
    let mut names = Vec::new();
    let mut values = Vec::new();
    for number in 1..=ATTRIBUTE_VALUES_LINE {
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(LoadError::TruncatedHeader {
                    needed: ATTRIBUTE_VALUES_LINE,
                    found: number - 1,
                })
            }
        };
        if number == ATTRIBUTE_NAMES_LINE {
            names = split_names(&line);
        } else if number == ATTRIBUTE_VALUES_LINE {
            values = split_values(&line);
        }
    }
    if names.len() != values.len() {
        return Err(LoadError::AttributeMismatch {
            names: names.len(),
            values: values.len(),
        });
    }
    Ok(names.into_iter().zip(values).collect())
}

pub(crate) fn split_names(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Split an attribute value line. Quoted strings (e.g. `"gfortran 11.2"`)
/// may contain spaces and come back without their quotes.
fn split_values(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut chars = line.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '"' {
            chars.next();
            let mut value = String::new();
            for c in chars.by_ref() {
                if c == '"' {
                    break;
                }
                value.push(c);
            }
            values.push(value);
        } else {
            let mut value = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                value.push(c);
                chars.next();
            }
            values.push(value);
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const HEADER: &str = "\
                 1                 2                 3
    version_number          compiler       initial_mass
             15140        \"gfortran\"  1.0000000000000000E+00

                 1                 2                 3
              time              temp                lum
";

    #[test]
    fn test_column_names_in_order() {
        let names = parse_column_names(Cursor::new(HEADER)).unwrap();
        assert_eq!(names, vec!["time", "temp", "lum"]);
    }

    #[test]
    fn test_mixed_whitespace_and_duplicates_kept() {
        let content = "a\nb\nc\n\ne\n\ttime  \t time lum  \n1 2 3\n";
        let names = parse_column_names(Cursor::new(content)).unwrap();
        assert_eq!(names, vec!["time", "time", "lum"]);
    }

    #[test]
    fn test_truncated_header() {
        let err = parse_column_names(Cursor::new("1\n2\n3\n")).unwrap_err();
        match err {
            LoadError::TruncatedHeader { needed, found } => {
                assert_eq!(needed, 6);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = read_column_names(Path::new("/nonexistent/LOGS/history.data")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        let names = read_column_names(file.path()).unwrap();
        assert_eq!(names.len(), 3);
        assert_eq!(names[0], "time");
    }

    #[test]
    fn test_attributes_strip_quotes() {
        let attrs = parse_attributes(Cursor::new(HEADER)).unwrap();
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs[0], ("version_number".to_string(), "15140".to_string()));
        assert_eq!(attrs[1], ("compiler".to_string(), "gfortran".to_string()));
        assert_eq!(attrs[2].1, "1.0000000000000000E+00");
    }

    #[test]
    fn test_quoted_value_with_spaces() {
        let values = split_values(r#"  "a b c"  42 "x" "#);
        assert_eq!(values, vec!["a b c", "42", "x"]);
    }

    #[test]
    fn test_attribute_mismatch() {
        let content = "1 2\nname_a name_b\n7\n";
        let err = parse_attributes(Cursor::new(content)).unwrap_err();
        assert!(matches!(
            err,
            LoadError::AttributeMismatch { names: 2, values: 1 }
        ));
    }
}
