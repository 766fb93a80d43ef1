use std::path::Path;

use super::{unnamed_column, Cell, DatasetError, Table};

/// Read a CSV file whose first record is the header. Empty fields become empty cells.
pub fn read(path: &Path) -> Result<Table, DatasetError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(index, name)| {
            if name.is_empty() {
                unnamed_column(index)
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut rows: Vec<Vec<Cell>> = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let record = record?;

        if record.len() > columns.len() {
            return Err(DatasetError::RecordTooWide {
                record: index + 1,
                expected: columns.len(),
                actual: record.len(),
            });
        }

        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(Table::from_rows(columns, rows))
}

/// Write a table as CSV with a header record
pub fn write(path: &Path, table: &Table) -> Result<(), DatasetError> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(&table.columns)?;

    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }

    writer.flush()?;

    Ok(())
}
