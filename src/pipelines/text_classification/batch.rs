use std::path::Path;

use log::{debug, info};

use crate::{
    datasets::{read_table, write_table, Cell, DatasetError, Format, Table},
    utils::{files::ensure_parent, text::clean_text},
};

use super::Classify;

/// Column receiving the numeric class id
pub static LABEL_COLUMN: &str = "label";

/// Column receiving the status text
pub static STATUS_COLUMN: &str = "status";

/// Classify every row of `column` and set the `label` and `status` columns.
///
/// Rows are classified in order. The first failure aborts the whole table and leaves it untouched.
pub fn classify_table<C>(classifier: &C, table: &mut Table, column: &str) -> anyhow::Result<()>
where
    C: Classify + ?Sized,
{
    let texts: Vec<String> = table
        .column(column)?
        .map(|cell| clean_text(cell.as_text()))
        .collect();

    info!("Processing {} records...", texts.len());

    let mut classes = Vec::with_capacity(texts.len());

    for (index, text) in texts.iter().enumerate() {
        let class = classifier
            .classify(text)
            .map_err(|e| anyhow!("Unable to classify row {}: {}", index + 1, e))?;

        debug!("Row {}: {}", index + 1, class.status());

        classes.push(class);
    }

    table.set_column(
        LABEL_COLUMN,
        classes
            .iter()
            .map(|class| Cell::Int(class.id() as i64))
            .collect(),
    )?;

    table.set_column(
        STATUS_COLUMN,
        classes
            .iter()
            .map(|class| Cell::Text(class.status().to_string()))
            .collect(),
    )?;

    Ok(())
}

/// Classify a table file and write the augmented table to `output`, returning the number of rows.
///
/// The output is written only once every row has been classified.
pub fn classify_sheet<C>(
    classifier: &C,
    input: &Path,
    output: &Path,
    column: &str,
) -> anyhow::Result<usize>
where
    C: Classify + ?Sized,
{
    Format::for_output(output)?;

    let mut table =
        read_table(input).map_err(|e| anyhow!("Unable to read {}: {}", input.display(), e))?;

    if table.column_index(column).is_none() {
        return Err(DatasetError::MissingColumn(column.to_string()).into());
    }

    classify_table(classifier, &mut table, column)?;

    ensure_parent(output)?;
    write_table(output, &table)?;

    info!("Wrote {} classified rows to {}", table.len(), output.display());

    Ok(table.len())
}
