use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

use crate::documents::{DocumentExtractor, Extracted};
use crate::error::{IndexError, Result};
use crate::indexer::model::DocumentKind;

/// Tried in order; the first clean decode wins.
pub fn encodings() -> [&'static Encoding; 2] {
    [UTF_8, WINDOWS_1252]
}

/// Decode raw bytes with the first encoding that accepts them.
pub fn decode(bytes: &[u8]) -> Option<String> {
    encodings().into_iter().find_map(|enc| {
        enc.decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
    })
}

pub fn read_code(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    decode(&bytes).ok_or_else(|| IndexError::Undecodable {
        path: path.to_path_buf(),
    })
}

/// What reading a document produced.
#[derive(Debug)]
pub enum DocumentRead {
    Text(Extracted),
    /// The parser for this kind is not available; nothing was read.
    Unsupported,
}

pub fn read_document(
    path: &Path,
    kind: DocumentKind,
    extractor: &dyn DocumentExtractor,
) -> Result<DocumentRead> {
    if !extractor.capabilities().supports(kind) {
        return Ok(DocumentRead::Unsupported);
    }
    let extracted = extractor.extract(path, kind)?;
    Ok(DocumentRead::Text(extracted))
}
