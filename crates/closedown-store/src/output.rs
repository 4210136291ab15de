//! Export file output.

use std::path::{Path, PathBuf};

use closedown_core::export::EXPORT_FILE_NAME;
use tracing::info;

use crate::StoreError;

/// Write exported CSV as UTF-8.
///
/// A directory target receives the standard `ea-closedown.csv` name.
/// Returns the path written.
pub fn write_export(target: &Path, csv: &str) -> Result<PathBuf, StoreError> {
    let path = if target.is_dir() {
        target.join(EXPORT_FILE_NAME)
    } else {
        target.to_path_buf()
    };
    std::fs::write(&path, csv.as_bytes())?;
    info!(path = %path.display(), bytes = csv.len(), "wrote export");
    Ok(path)
}
