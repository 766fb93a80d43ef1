use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::warn;
use rust_xlsxwriter::{Format, Workbook};

use super::{unnamed_column, Cell, DatasetError, Table};

const MILLISECONDS_PER_DAY: f64 = 86_400_000.0;

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::String(text) => Cell::Text(text.clone()),
            Data::Int(value) => Cell::Int(*value),
            Data::Float(value) => Cell::Float(*value),
            Data::Bool(value) => Cell::Bool(*value),
            Data::DateTime(date) if date.is_duration() => date
                .as_duration()
                .map_or(Cell::Float(date.as_f64()), Cell::Duration),
            Data::DateTime(date) => date
                .as_datetime()
                .map_or(Cell::Float(date.as_f64()), Cell::DateTime),
            Data::DateTimeIso(text) => match parse_iso_datetime(text) {
                Some(date) => Cell::DateTime(date),
                None => {
                    warn!("Unreadable date '{}' left empty", text);
                    Cell::Empty
                }
            },
            Data::DurationIso(text) => match value.as_duration() {
                Some(duration) => Cell::Duration(duration),
                None => {
                    warn!("Unreadable duration '{}' left empty", text);
                    Cell::Empty
                }
            },
        }
    }
}

/// OpenDocument stores dates with or without a time part
fn parse_iso_datetime(text: &str) -> Option<NaiveDateTime> {
    text.parse::<NaiveDateTime>().ok().or_else(|| {
        text.parse::<NaiveDate>()
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN))
    })
}

/// Read the first worksheet of a workbook, using its first row as the header
pub fn read(path: &Path) -> Result<Table, DatasetError> {
    let mut workbook = open_workbook_auto(path)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DatasetError::NoSheet)??;

    // The range starts at the first used cell. Leading blank columns are restored.
    let offset = range.start().map_or(0, |(_, col)| col as usize);

    let mut rows = range.rows();

    let columns: Vec<String> = match rows.next() {
        Some(header) => (0..offset)
            .map(unnamed_column)
            .chain(
                header
                    .iter()
                    .enumerate()
                    .map(|(index, cell)| match cell {
                        Data::Empty => unnamed_column(offset + index),
                        other => other.to_string(),
                    }),
            )
            .collect(),
        None => Vec::new(),
    };

    let rows: Vec<Vec<Cell>> = rows
        .map(|row| {
            std::iter::repeat(Cell::Empty)
                .take(offset)
                .chain(row.iter().map(Cell::from))
                .collect()
        })
        .collect();

    Ok(Table::from_rows(columns, rows))
}

/// Write a table to a single-worksheet xlsx file
pub fn write(path: &Path, table: &Table) -> Result<(), DatasetError> {
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
    let duration_format = Format::new().set_num_format("[h]:mm:ss");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in table.columns.iter().enumerate() {
        worksheet.write_string(0, column_number(col)?, name)?;
    }

    for (row_index, row) in table.rows.iter().enumerate() {
        let row_number = u32::try_from(row_index + 1).map_err(|_| DatasetError::TooLarge)?;

        for (col, cell) in row.iter().enumerate() {
            let col = column_number(col)?;

            match cell {
                Cell::Empty => {}
                Cell::Text(text) => {
                    worksheet.write_string(row_number, col, text)?;
                }
                Cell::Int(value) => {
                    worksheet.write_number(row_number, col, *value as f64)?;
                }
                Cell::Float(value) => {
                    worksheet.write_number(row_number, col, *value)?;
                }
                Cell::Bool(value) => {
                    worksheet.write_boolean(row_number, col, *value)?;
                }
                Cell::DateTime(value) => {
                    let format = if value.time() == NaiveTime::MIN {
                        &date_format
                    } else {
                        &datetime_format
                    };

                    worksheet.write_datetime_with_format(row_number, col, value, format)?;
                }
                Cell::Duration(value) => {
                    let days = value.num_milliseconds() as f64 / MILLISECONDS_PER_DAY;

                    worksheet.write_number_with_format(row_number, col, days, &duration_format)?;
                }
            }
        }
    }

    workbook.save(path)?;

    Ok(())
}

fn column_number(index: usize) -> Result<u16, DatasetError> {
    u16::try_from(index).map_err(|_| DatasetError::TooLarge)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn written_workbook_reads_back() -> Result<(), DatasetError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("textos_classificados.xlsx");
        let table = Table::from_rows(
            vec![
                "protocolo".to_string(),
                "textos".to_string(),
                "urgente".to_string(),
                "label".to_string(),
                "status".to_string(),
            ],
            vec![
                vec![
                    Cell::Int(10),
                    Cell::Text("Solicito a agenda do secretário".to_string()),
                    Cell::Bool(false),
                    Cell::Int(0),
                    Cell::Text("Público".to_string()),
                ],
                vec![
                    Cell::Int(11),
                    Cell::Empty,
                    Cell::Bool(true),
                    Cell::Int(0),
                    Cell::Text("Público".to_string()),
                ],
            ],
        );

        write(&path, &table)?;
        let read_back = read(&path)?;

        assert_eq!(read_back.columns, table.columns);
        assert_eq!(read_back.len(), 2);
        // Numbers are stored as floating point in xlsx
        assert_eq!(read_back.rows[0][0], Cell::Float(10.0));
        assert_eq!(read_back.rows[0][2], Cell::Bool(false));
        assert_eq!(read_back.rows[1][1], Cell::Empty);
        assert_eq!(read_back.rows[1][4], Cell::Text("Público".to_string()));
        Ok(())
    }

    #[test]
    fn dates_and_durations_read_back() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("prazos.xlsx");
        let opened: NaiveDateTime = "2024-01-15T00:00:00".parse()?;
        let answered: NaiveDateTime = "2024-02-01T14:30:00".parse()?;
        let table = Table::from_rows(
            vec![
                "abertura".to_string(),
                "resposta".to_string(),
                "atendimento".to_string(),
            ],
            vec![vec![
                Cell::DateTime(opened),
                Cell::DateTime(answered),
                Cell::Duration(chrono::Duration::minutes(90)),
            ]],
        );

        write(&path, &table)?;
        let read_back = read(&path)?;

        assert_eq!(read_back, table);
        Ok(())
    }

    #[test]
    fn leading_blank_columns_are_kept() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("textos.xlsx");
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 2, "textos")?;
        worksheet.write_string(1, 2, "Solicito o contrato")?;
        workbook.save(&path)?;

        let table = read(&path)?;

        assert_eq!(table.columns, vec!["Unnamed: 0", "Unnamed: 1", "textos"]);
        assert_eq!(
            table.rows,
            vec![vec![
                Cell::Empty,
                Cell::Empty,
                Cell::Text("Solicito o contrato".to_string()),
            ]]
        );
        Ok(())
    }
}
