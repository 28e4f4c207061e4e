use std::fs::File;
use std::io::Read;
use std::path::Path;

use roxmltree::{Document, Node};
use zip::ZipArchive;

use super::{DocumentMeta, Extracted};
use crate::error::ExtractError;

const BODY_PART: &str = "word/document.xml";

fn word_err(e: impl std::fmt::Display) -> ExtractError {
    ExtractError::Word(e.to_string())
}

/// Concatenated `w:t` runs below `node`.
fn run_text(node: Node) -> String {
    node.descendants()
        .filter(|n| n.has_tag_name("t"))
        .filter_map(|n| n.text())
        .collect()
}

/// Body paragraphs first, then table rows with cells joined by tabs.
pub(super) fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>, ExtractError> {
    let doc = Document::parse(xml).map_err(word_err)?;
    let Some(body) = doc.descendants().find(|n| n.has_tag_name("body")) else {
        return Ok(Vec::new());
    };

    let mut paragraphs = Vec::new();
    let mut table_rows = Vec::new();
    for child in body.children().filter(|n| n.is_element()) {
        if child.has_tag_name("p") {
            let text = run_text(child);
            if !text.trim().is_empty() {
                paragraphs.push(text);
            }
        } else if child.has_tag_name("tbl") {
            // Nested tables are already part of their enclosing cell's text.
            for row in child.children().filter(|n| n.has_tag_name("tr")) {
                let cells: Vec<String> = row
                    .children()
                    .filter(|n| n.has_tag_name("tc"))
                    .map(run_text)
                    .collect();
                let row_text = cells.join("\t");
                if !row_text.trim().is_empty() {
                    table_rows.push(row_text);
                }
            }
        }
    }
    paragraphs.extend(table_rows);
    Ok(paragraphs)
}

pub(super) fn extract(path: &Path) -> Result<Extracted, ExtractError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file).map_err(word_err)?;
    let mut xml = String::new();
    archive
        .by_name(BODY_PART)
        .map_err(word_err)?
        .read_to_string(&mut xml)?;
    let paragraphs = paragraphs_from_xml(&xml)?;
    Ok(Extracted {
        meta: DocumentMeta::Paragraphs(paragraphs.len()),
        text: paragraphs.join("\n"),
    })
}
