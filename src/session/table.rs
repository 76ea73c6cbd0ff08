//! MIB table materialization.
//!
//! A walk of a table comes back column-major: every row of the first
//! column, then every row of the second, and so on. [`Table::from_subtree`]
//! reshapes that flat list into rows keyed by instance index.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::instrument;

use crate::error::{Error, ErrorKind, Result};
use crate::oid::leaf;
use crate::transport::Transport;
use crate::value::Value;
use crate::varbind::VarBind;

use super::Session;

/// Make column names unique and non-empty.
///
/// A name that is empty, starts with `_`, or repeats an earlier one is
/// replaced by `_<position>`.
pub(crate) fn column_names(raw: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .enumerate()
        .map(|(i, name)| {
            if name.is_empty() || name.starts_with('_') || !seen.insert(name.clone()) {
                format!("_{i}")
            } else {
                name
            }
        })
        .collect()
}

/// One table row: column name to value, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl TableRow {
    pub(crate) fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Value of the named column.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
    }

    /// Column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values, in column order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consume the row, returning its values.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl std::ops::Index<&str> for TableRow {
    type Output = Value;

    fn index(&self, column: &str) -> &Value {
        match self.get(column) {
            Some(value) => value,
            None => panic!("no column named {column:?}"),
        }
    }
}

impl std::ops::Index<usize> for TableRow {
    type Output = Value;

    fn index(&self, position: usize) -> &Value {
        &self.values[position]
    }
}

/// A materialized MIB table.
///
/// Rows are keyed by instance index and kept in first-appearance order.
/// Every row shares the same column list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Arc<[String]>,
    rows: Vec<(String, TableRow)>,
    positions: HashMap<String, usize>,
}

impl Table {
    /// Reshape a column-major walk result into rows.
    ///
    /// The row count is the length of the leading run of entries sharing
    /// the first entry's tag. Column names are the last component of each
    /// column's first tag. The input must be a true table: interleaved
    /// scalars or ragged columns produce wrong rows rather than an error,
    /// except when the entry count does not divide by the row count, which
    /// fails with [`ErrorKind::MalformedTable`].
    pub fn from_subtree(varbinds: &[VarBind]) -> Result<Self> {
        let Some(first) = varbinds.first() else {
            return Ok(Self::default());
        };

        let row_count = varbinds
            .iter()
            .take_while(|vb| vb.tag == first.tag)
            .count();
        if varbinds.len() % row_count != 0 {
            tracing::warn!(target: "snmp_tables::session", { entries = varbinds.len(), rows = row_count, first = %first.tag }, "walk result is not a rectangular table");
            return Err(Error::new(
                ErrorKind::MalformedTable,
                format!(
                    "{} entries cannot be split into columns of {} rows",
                    varbinds.len(),
                    row_count
                ),
            ));
        }
        let column_count = varbinds.len() / row_count;

        let columns: Arc<[String]> = column_names(
            (0..column_count)
                .map(|c| leaf(&varbinds[c * row_count].tag).to_owned())
                .collect(),
        )
        .into();

        let mut table = Self {
            columns: Arc::clone(&columns),
            ..Self::default()
        };
        for r in 0..row_count {
            let values = (0..column_count)
                .map(|c| varbinds[c * row_count + r].value.clone())
                .collect();
            table.insert(
                varbinds[r].index.clone(),
                TableRow::new(Arc::clone(&columns), values),
            );
        }
        Ok(table)
    }

    fn insert(&mut self, index: String, row: TableRow) {
        match self.positions.get(&index) {
            Some(&pos) => self.rows[pos].1 = row,
            None => {
                self.positions.insert(index.clone(), self.rows.len());
                self.rows.push((index, row));
            }
        }
    }

    /// Column names, in column order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row with the given index.
    pub fn get(&self, index: &str) -> Option<&TableRow> {
        self.positions.get(index).map(|&pos| &self.rows[pos].1)
    }

    /// Whether a row with the given index exists.
    pub fn contains_index(&self, index: &str) -> bool {
        self.positions.contains_key(index)
    }

    /// Row indices, in first-appearance order.
    pub fn indices(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(index, _)| index.as_str())
    }

    /// Rows, in first-appearance order.
    pub fn rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().map(|(_, row)| row)
    }

    /// `(index, row)` pairs, in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableRow)> {
        self.rows.iter().map(|(index, row)| (index.as_str(), row))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a str, &'a TableRow);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a TableRow)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TableRow {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Table {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<T: Transport> Session<T> {
    /// Walk the table at `oid` and reshape it into rows.
    ///
    /// Returns an empty table when nothing exists under the name.
    #[instrument(skip(self), err, fields(snmp.target = %self.transport.target()))]
    pub async fn table(&self, oid: &str) -> Result<Table> {
        let varbinds = self.walk(oid).await?;
        let table = Table::from_subtree(&varbinds)?;
        tracing::debug!(target: "snmp_tables::session", { snmp.oid = oid, rows = table.len(), columns = table.columns().len() }, "table materialized");
        Ok(table)
    }
}
