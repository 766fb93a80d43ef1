use std::path::Path;

use tokio::{fs, io};

/// Read a whole UTF-8 text file
pub async fn read_text(path: &Path) -> io::Result<String> {
    fs::read_to_string(path).await
}

/// Write a text file, creating its parent directory first
pub async fn write_text(path: &Path, content: &str) -> io::Result<()> {
    ensure_parent(path)?;

    fs::write(path, content).await
}

/// Create the parent directory of a path if it does not exist yet
pub fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
