use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::{DocumentMeta, Extracted};
use crate::error::ExtractError;

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// A sheet header followed by one tab-joined line per row; rows that are
/// blank once joined are dropped.
fn push_sheet<R, C>(lines: &mut Vec<String>, name: &str, rows: R)
where
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = String>,
{
    lines.push(format!("\n=== Sheet: {} ===", name));
    for row in rows {
        let row_text = row.into_iter().collect::<Vec<_>>().join("\t");
        if !row_text.trim().is_empty() {
            lines.push(row_text);
        }
    }
}

pub(super) fn extract(path: &Path) -> Result<Extracted, ExtractError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| ExtractError::Excel(e.to_string()))?;
    let names = workbook.sheet_names().to_vec();
    let mut lines = Vec::new();
    for name in &names {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| ExtractError::Excel(e.to_string()))?;
        push_sheet(
            &mut lines,
            name,
            range.rows().map(|row| row.iter().map(cell_text)),
        );
    }
    Ok(Extracted {
        text: lines.join("\n"),
        meta: DocumentMeta::Sheets(names.len()),
    })
}
