use crate::error::LoadError;

/// Column name → equal-length numeric series, in header order.
///
/// Rows keep the order of the log (one row per model step). Inserting a
/// name that already exists replaces its series in place, so for a header
/// with a repeated name the later occurrence wins and the column stays at
/// the position of the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnTable {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl ColumnTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a column. Fails if `values` does not match the row
    /// count of the columns already present.
    pub fn insert(&mut self, name: &str, values: Vec<f64>) -> Result<(), LoadError> {
        if let Some(expected) = self.row_count() {
            if values.len() != expected {
                return Err(LoadError::LengthMismatch {
                    name: name.to_string(),
                    expected,
                    found: values.len(),
                });
            }
        }
        match self.position(name) {
            Some(idx) => {
                log::debug!("Column '{}' repeated in header; keeping the later series", name);
                self.columns[idx] = values;
            }
            None => {
                self.names.push(name.to_string());
                self.columns.push(values);
            }
        }
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.position(name).map(|idx| self.columns[idx].as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Column names in insertion order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of rows, or `None` while the table has no columns.
    pub fn row_count(&self) -> Option<usize> {
        self.columns.first().map(Vec::len)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let mut table = ColumnTable::new();
        table.insert("time", vec![1.0, 2.0]).unwrap();
        table.insert("lum", vec![3.0, 4.0]).unwrap();
        assert_eq!(table.names(), &["time".to_string(), "lum".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.row_count(), Some(2));
        assert_eq!(table.column("lum"), Some(&[3.0, 4.0][..]));
        assert!(table.column("temp").is_none());
    }

    #[test]
    fn test_repeated_name_later_wins_first_position() {
        let mut table = ColumnTable::new();
        table.insert("time", vec![1.0]).unwrap();
        table.insert("lum", vec![2.0]).unwrap();
        table.insert("time", vec![9.0]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.names()[0], "time");
        assert_eq!(table.column("time"), Some(&[9.0][..]));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut table = ColumnTable::new();
        table.insert("time", vec![1.0, 2.0, 3.0]).unwrap();
        let err = table.insert("lum", vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            LoadError::LengthMismatch { expected: 3, found: 1, .. }
        ));
        assert!(!table.contains("lum"));
    }

    #[test]
    fn test_empty_table() {
        let table = ColumnTable::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), None);
    }
}
