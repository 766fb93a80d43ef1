use std::{fmt::Display, path::Path};

use chrono::{Duration, NaiveDateTime, NaiveTime};

/// Comma-separated tables
pub mod delimited;

/// Spreadsheet workbooks
pub mod workbook;

/// A single table value
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    /// No value
    Empty,

    /// Text
    Text(String),

    /// Integer number
    Int(i64),

    /// Floating point number
    Float(f64),

    /// Boolean
    Bool(bool),

    /// Date and time
    DateTime(NaiveDateTime),

    /// Elapsed time
    Duration(Duration),
}

impl Cell {
    /// The text content, if this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(text) => write!(f, "{}", text),
            Cell::Int(value) => write!(f, "{}", value),
            Cell::Float(value) => write!(f, "{}", value),
            Cell::Bool(value) => write!(f, "{}", value),
            Cell::DateTime(value) if value.time() == NaiveTime::MIN => {
                write!(f, "{}", value.format("%Y-%m-%d"))
            }
            Cell::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
            Cell::Duration(value) => {
                let seconds = value.num_seconds();
                let sign = if seconds < 0 { "-" } else { "" };
                let seconds = seconds.abs();

                write!(
                    f,
                    "{}{}:{:02}:{:02}",
                    sign,
                    seconds / 3600,
                    seconds / 60 % 60,
                    seconds % 60
                )
            }
        }
    }
}

/// An in-memory table with named columns. Every row is as wide as the header.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    /// Column names, in order
    pub columns: Vec<String>,

    /// Rows, in order
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table, padding short rows with empty cells.
    ///
    /// Readers reject rows wider than the header before building it. Extra cells are dropped.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();

        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();

        Self { columns, rows }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Iterate over the values of a column
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &Cell>, DatasetError> {
        let index = self
            .column_index(name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))?;

        Ok(self.rows.iter().map(move |row| &row[index]))
    }

    /// Overwrite a column in place, or append it when the table does not have it yet
    pub fn set_column(&mut self, name: &str, values: Vec<Cell>) -> Result<(), DatasetError> {
        if values.len() != self.rows.len() {
            return Err(DatasetError::LengthMismatch {
                column: name.to_string(),
                expected: self.rows.len(),
                actual: values.len(),
            });
        }

        match self.column_index(name) {
            Some(index) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[index] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());

                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }

        Ok(())
    }
}

/// Name given to header cells left blank
pub fn unnamed_column(index: usize) -> String {
    format!("Unnamed: {}", index)
}

/// Supported table file formats
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Format {
    /// Comma-separated values
    Csv,

    /// Spreadsheet workbook (read: xlsx, xlsm, xlsb, xls, ods; write: xlsx)
    Workbook,
}

impl Format {
    /// Detect the format of a table to read from its file extension
    pub fn for_input(path: &Path) -> Result<Self, DatasetError> {
        match extension(path).as_str() {
            "csv" => Ok(Format::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Format::Workbook),
            other => Err(DatasetError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Detect the format of a table to write from its file extension
    pub fn for_output(path: &Path) -> Result<Self, DatasetError> {
        match extension(path).as_str() {
            "csv" => Ok(Format::Csv),
            "xlsx" => Ok(Format::Workbook),
            other => Err(DatasetError::UnsupportedFormat(other.to_string())),
        }
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Read a table, choosing the reader from the file extension
pub fn read_table(path: &Path) -> Result<Table, DatasetError> {
    match Format::for_input(path)? {
        Format::Csv => delimited::read(path),
        Format::Workbook => workbook::read(path),
    }
}

/// Write a table, choosing the writer from the file extension
pub fn write_table(path: &Path, table: &Table) -> Result<(), DatasetError> {
    match Format::for_output(path)? {
        Format::Csv => delimited::write(path, table),
        Format::Workbook => workbook::write(path, table),
    }
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The file extension does not map to a known table format
    #[error("unsupported table format: '{0}'")]
    UnsupportedFormat(String),

    /// The workbook holds no worksheet
    #[error("the workbook has no worksheet")]
    NoSheet,

    /// A required column is missing
    #[error("the table must contain the column '{0}'")]
    MissingColumn(String),

    /// A column replacement does not match the number of rows
    #[error("column '{column}' needs {expected} values, got {actual}")]
    LengthMismatch {
        /// The column being set
        column: String,
        /// The number of rows in the table
        expected: usize,
        /// The number of values given
        actual: usize,
    },

    /// A record holds more fields than the header
    #[error("record {record} has {actual} fields but the header has {expected}")]
    RecordTooWide {
        /// Position of the record, the header being record 0
        record: usize,
        /// The number of header fields
        expected: usize,
        /// The number of fields in the record
        actual: usize,
    },

    /// The table exceeds the worksheet limits
    #[error("the table does not fit in a worksheet")]
    TooLarge,

    /// CSV error
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Workbook read error
    #[error(transparent)]
    Workbook(#[from] calamine::Error),

    /// Workbook write error
    #[error(transparent)]
    WorkbookWrite(#[from] rust_xlsxwriter::XlsxError),

    /// IO error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            vec!["id".to_string(), "textos".to_string()],
            vec![
                vec![Cell::Int(1), Cell::Text("primeiro".to_string())],
                vec![Cell::Int(2)],
            ],
        )
    }

    #[test]
    fn short_rows_are_padded() {
        let table = sample();

        assert_eq!(table.rows[1], vec![Cell::Int(2), Cell::Empty]);
    }

    #[test]
    fn set_column_appends_then_overwrites() -> Result<(), DatasetError> {
        let mut table = sample();

        table.set_column("label", vec![Cell::Int(0), Cell::Int(1)])?;
        assert_eq!(table.columns, vec!["id", "textos", "label"]);

        table.set_column("label", vec![Cell::Int(1), Cell::Int(1)])?;
        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.rows[0][2], Cell::Int(1));
        Ok(())
    }

    #[test]
    fn set_column_checks_length() {
        let mut table = sample();

        let result = table.set_column("label", vec![Cell::Int(0)]);

        assert!(matches!(result, Err(DatasetError::LengthMismatch { .. })));
    }

    #[test]
    fn missing_column() {
        let table = sample();

        assert!(matches!(
            table.column("texto"),
            Err(DatasetError::MissingColumn(name)) if name == "texto"
        ));
    }

    #[test]
    fn dates_are_not_text() -> anyhow::Result<()> {
        let date: NaiveDateTime = "2024-01-15T00:00:00".parse()?;
        let moment: NaiveDateTime = "2024-01-15T09:30:00".parse()?;

        assert_eq!(Cell::DateTime(date).as_text(), None);
        assert_eq!(Cell::DateTime(date).to_string(), "2024-01-15");
        assert_eq!(Cell::DateTime(moment).to_string(), "2024-01-15 09:30:00");
        assert_eq!(Cell::Duration(Duration::seconds(93_784)).to_string(), "26:03:04");
        Ok(())
    }

    #[test]
    fn formats_from_extension() {
        assert_eq!(Format::for_input(Path::new("dados/textos.XLSX")).ok(), Some(Format::Workbook));
        assert_eq!(Format::for_input(Path::new("dados/textos.ods")).ok(), Some(Format::Workbook));
        assert_eq!(Format::for_output(Path::new("saida.csv")).ok(), Some(Format::Csv));
        assert!(Format::for_output(Path::new("saida.ods")).is_err());
        assert!(Format::for_input(Path::new("dados/textos")).is_err());
    }
}
