use crate::error::{IngestError, Result};
use calamine::{open_workbook_auto, Reader};
use lopdf::Document;
use std::path::Path;
use tracing::{error, warn};

/// Flattens one uploaded file to the text blob the extractor reads.
///
/// `.xlsx` and `.pdf` always yield a string: read failures are logged and
/// degrade to empty text so a bad file costs data, never the session. Any
/// other extension is skipped with a warning and returns `None`, so it
/// contributes nothing to the batch.
pub fn flatten_file(path: &Path) -> Option<String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    if extension.eq_ignore_ascii_case("xlsx") {
        Some(read_spreadsheet(path).unwrap_or_else(|error| {
            error!(file = %path.display(), %error, "error reading spreadsheet");
            String::new()
        }))
    } else if extension.eq_ignore_ascii_case("pdf") {
        Some(read_pdf(path).unwrap_or_else(|error| {
            error!(file = %path.display(), %error, "error reading pdf");
            String::new()
        }))
    } else {
        warn!(file = %path.display(), "unsupported file type");
        None
    }
}

/// Renders every sheet as a tab-separated table, one row per line, preceded
/// by the sheet name. Empty rows still emit a line, matching the tabular
/// layout the extractor is prompted to read.
fn read_spreadsheet(path: &Path) -> Result<String> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|error| IngestError::SpreadsheetParse(error.to_string()))?;

    let mut text = String::new();
    for (sheet, range) in workbook.worksheets() {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&sheet);
        text.push('\n');

        for row in range.rows() {
            let line = row
                .iter()
                .map(|cell| cell.to_string())
                .collect::<Vec<_>>()
                .join("\t");
            text.push_str(&line);
            text.push('\n');
        }
    }

    Ok(text)
}

fn read_pdf(path: &Path) -> Result<String> {
    let document =
        Document::load(path).map_err(|error| IngestError::PdfParse(error.to_string()))?;

    let mut text = String::new();
    for (page_no, _page_id) in document.get_pages() {
        let page = document
            .extract_text(&[page_no])
            .map_err(|error| IngestError::PdfParse(error.to_string()))?;
        text.push_str(&page);
    }

    Ok(text)
}
