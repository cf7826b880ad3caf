//! Records, the column accumulator, and the finalized output table.
//!
//! - [`Record`]: one extracted row, field name to value, in schema order
//! - [`Accumulator`]: column store owned by a single run; every column always has
//!   the same length
//! - [`Table`]: row-wise snapshot of an accumulator, ready to display or save

use crate::error::ShapeError;
use crate::schema::Schema;

/// Marker written to every column of an item that failed to fetch or extract.
pub const ERROR_MARKER: &str = "Error";

/// One row produced by the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }
}

/// Column-oriented store of every row seen during a run.
///
/// Rows are only ever added whole, through [`Accumulator::push`] or
/// [`Accumulator::push_error`], so all columns stay the same length.
#[derive(Debug, Clone)]
pub struct Accumulator {
    names: Vec<String>,
    primary: usize,
    columns: Vec<Vec<String>>,
}

impl Accumulator {
    pub fn new(schema: &Schema) -> Self {
        let names = schema.names();
        let columns = vec![Vec::new(); names.len()];
        Self {
            names,
            primary: schema.primary_index(),
            columns,
        }
    }

    /// Append one record. Its field names must match the columns exactly, in order.
    pub fn push(&mut self, record: Record) -> Result<(), ShapeError> {
        if !record.names().eq(self.names.iter().map(String::as_str)) {
            return Err(ShapeError {
                expected: self.names.clone(),
                got: record.names().map(str::to_string).collect(),
            });
        }
        for (column, (_, value)) in self.columns.iter_mut().zip(record.fields) {
            column.push(value);
        }
        Ok(())
    }

    /// Append a row with [`ERROR_MARKER`] in every column.
    pub fn push_error(&mut self) {
        for column in &mut self.columns {
            column.push(ERROR_MARKER.to_string());
        }
    }

    /// Number of rows accumulated so far.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[cfg(test)]
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }

    /// Every accumulated row, uncleaned.
    pub fn to_table(&self) -> Table {
        Table {
            columns: self.names.clone(),
            rows: (0..self.len()).map(|i| self.row(i)).collect(),
        }
    }

    /// Rows whose primary value is present. Empty strings count as missing.
    pub fn finalize(&self) -> Table {
        Table {
            columns: self.names.clone(),
            rows: (0..self.len())
                .filter(|&i| !self.columns[self.primary][i].is_empty())
                .map(|i| self.row(i))
                .collect(),
        }
    }

    fn row(&self, i: usize) -> Vec<String> {
        self.columns.iter().map(|c| c[i].clone()).collect()
    }
}

/// A read-only, row-wise table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::SelectorChain;
    use crate::schema::Field;

    fn schema() -> Schema {
        Schema::new(
            "test",
            vec![
                Field::new("title", "No Title Found", SelectorChain::new()),
                Field::new("date", "No Date Found", SelectorChain::new()),
            ],
            "title",
        )
        .unwrap()
    }

    fn record(title: &str, date: &str) -> Record {
        Record::new(vec![
            ("title".to_string(), title.to_string()),
            ("date".to_string(), date.to_string()),
        ])
    }

    #[test]
    fn test_columns_stay_equal_length() {
        let mut acc = Accumulator::new(&schema());
        assert!(acc.is_empty());

        acc.push(record("A", "2025-01-01")).unwrap();
        acc.push_error();
        acc.push(record("", "2025-01-03")).unwrap();

        assert_eq!(acc.len(), 3);
        assert_eq!(acc.column("title").unwrap().len(), 3);
        assert_eq!(acc.column("date").unwrap().len(), 3);
        assert_eq!(acc.column("date").unwrap()[1], ERROR_MARKER);
        assert_eq!(acc.column("missing"), None);
    }

    #[test]
    fn test_mismatched_record_rejected() {
        let mut acc = Accumulator::new(&schema());
        let swapped = Record::new(vec![
            ("date".to_string(), "x".to_string()),
            ("title".to_string(), "y".to_string()),
        ]);
        let err = acc.push(swapped).unwrap_err();
        assert_eq!(err.expected, vec!["title", "date"]);
        assert_eq!(err.got, vec!["date", "title"]);
        assert!(acc.is_empty());
    }

    #[test]
    fn test_finalize_drops_missing_primary() {
        let mut acc = Accumulator::new(&schema());
        acc.push(record("A", "")).unwrap();
        acc.push(record("", "2025-01-02")).unwrap();
        acc.push_error();

        assert_eq!(acc.to_table().len(), 3);

        let table = acc.finalize();
        assert_eq!(table.columns, vec!["title", "date"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["A".to_string(), String::new()],
                vec![ERROR_MARKER.to_string(), ERROR_MARKER.to_string()],
            ]
        );
    }

    #[test]
    fn test_record_lookup() {
        let r = record("A", "B");
        assert_eq!(r.get("date"), Some("B"));
        assert_eq!(r.get("nope"), None);
        assert_eq!(r.names().collect::<Vec<_>>(), vec!["title", "date"]);
    }
}
