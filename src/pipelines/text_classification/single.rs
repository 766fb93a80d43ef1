use std::path::Path;

use log::info;

use crate::utils::{
    files::{read_text, write_text},
    text::clean_text,
};

use super::{ClassId, Classify};

/// Render the two-line report of a single-file classification
pub fn report(class: ClassId) -> String {
    format!(
        "RESULTADO: {}\nSTATUS: {}\n",
        class.id(),
        class.description()
    )
}

/// Classify the whole content of a text file and write the report to `output`.
///
/// Nothing is written when the input is missing or cannot be read.
pub async fn classify_file<C>(classifier: &C, input: &Path, output: &Path) -> anyhow::Result<ClassId>
where
    C: Classify + ?Sized,
{
    if !input.is_file() {
        return Err(anyhow!("File {} not found", input.display()));
    }

    let raw = read_text(input)
        .await
        .map_err(|e| anyhow!("Unable to read {}: {}", input.display(), e))?;

    let text = clean_text(Some(raw.as_str()));

    let class = classifier.classify(&text)?;

    write_text(output, &report(class))
        .await
        .map_err(|e| anyhow!("Unable to write {}: {}", output.display(), e))?;

    info!("Classified {} as {}", input.display(), class);

    Ok(class)
}
