//! CSV export of the rows currently in view.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;
use tracing::info;

use crate::classify::{early_close_text, shutdown_status};
use crate::record::Agreement;
use crate::record::Dataset;
use crate::view::ViewState;

/// Download name for exported files.
pub const EXPORT_FILE_NAME: &str = "ea-closedown.csv";

pub const HEADER: [&str; 12] = [
    "Portfolio",
    "Entity Type",
    "Agency",
    "Listed as",
    "Website",
    "Enterprise Agreement URL",
    "Name",
    "Clause/s.",
    "Page # Start",
    "Shutdown?",
    "Early Close",
    "Description (HTML)",
];

const ROW_SEPARATOR: &[u8] = b"\r\n";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Collapse whitespace runs (including newlines) to single spaces and trim.
pub fn flatten_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The twelve export cells for one record, in [`HEADER`] order.
pub fn export_row(a: &Agreement) -> [String; 12] {
    [
        a.portfolio.clone(),
        a.entity_type.long_label().to_string(),
        a.agency.clone(),
        a.ea_heading.clone(),
        a.website.clone().unwrap_or_default(),
        a.ea_url.clone().unwrap_or_default(),
        a.name.clone().unwrap_or_default(),
        a.clauses.clone(),
        a.page_text(),
        shutdown_status(a).label().to_string(),
        early_close_text(a),
        flatten_whitespace(&a.description),
    ]
}

/// Serialise rows to CSV: every cell quoted, CRLF between rows, no trailing
/// newline.
pub fn to_csv<'a>(
    rows: impl IntoIterator<Item = &'a Agreement>,
) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for a in rows {
        writer.write_record(export_row(a))?;
    }
    let mut bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    if bytes.ends_with(ROW_SEPARATOR) {
        bytes.truncate(bytes.len() - ROW_SEPARATOR.len());
    }
    Ok(String::from_utf8(bytes)?)
}

/// Export exactly what the table shows for `state`, recomputed now.
pub fn export_csv(dataset: &Dataset, state: &ViewState) -> Result<String, ExportError> {
    let rows = state.visible(dataset);
    info!(rows = rows.len(), sort = %state.sort, "exporting csv");
    to_csv(rows)
}
