use std::path::Path;

use lopdf::Document;

use super::{DocumentMeta, Extracted};
use crate::error::ExtractError;

pub(super) fn extract(path: &Path) -> Result<Extracted, ExtractError> {
    let doc = Document::load(path).map_err(|e| ExtractError::Pdf(e.to_string()))?;
    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    let mut text = Vec::with_capacity(pages.len());
    for page in &pages {
        // A page without a text layer reads as empty rather than failing the file.
        text.push(doc.extract_text(&[*page]).unwrap_or_default());
    }
    Ok(Extracted {
        text: text.join("\n"),
        meta: DocumentMeta::Pages(pages.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    fn write_pdf(path: &Path, pages: &[&str]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }
        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn reads_every_page_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.pdf");
        write_pdf(&path, &["Invoice totals", "Settlement rules"]);

        let extracted = extract(&path).unwrap();
        assert_eq!(extracted.meta, DocumentMeta::Pages(2));
        let first = extracted.text.find("Invoice totals").unwrap();
        let second = extracted.text.find("Settlement rules").unwrap();
        assert!(first < second);
    }
}
