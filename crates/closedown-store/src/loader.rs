//! Dataset loading.
//!
//! The register is published either as a plain JSON array of agreements or
//! as the data script the web page includes (`window.agreements = [...];`).
//! Both load into the same read-only [`Dataset`].

use std::path::Path;

use closedown_core::{Agreement, Dataset};
use tracing::{debug, info};

use crate::StoreError;

/// Load the register from a `.json` file or a `window.agreements` script.
pub fn load_dataset(path: &Path) -> Result<Dataset, StoreError> {
    if !path.exists() {
        return Err(StoreError::DatasetNotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    let dataset = parse_dataset(&text)?;
    info!(path = %path.display(), count = dataset.len(), "loaded agreements");
    Ok(dataset)
}

/// Parse register text: a JSON array, optionally wrapped in an assignment.
pub fn parse_dataset(text: &str) -> Result<Dataset, StoreError> {
    let json = strip_assignment(text)?;
    let records: Vec<Agreement> = serde_json::from_str(json)?;
    Ok(Dataset::new(records))
}

/// Reduce `window.agreements = [...];` to the array literal.
fn strip_assignment(text: &str) -> Result<&str, StoreError> {
    let trimmed = text.trim_start_matches('\u{feff}').trim();
    if trimmed.starts_with('[') {
        return Ok(trimmed);
    }
    let start = trimmed.find('[').ok_or(StoreError::MissingArray)?;
    let end = trimmed.rfind(']').ok_or(StoreError::MissingArray)?;
    if end < start {
        return Err(StoreError::MissingArray);
    }
    debug!(prefix = &trimmed[..start], "stripping data script assignment");
    Ok(&trimmed[start..=end])
}
