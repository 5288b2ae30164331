use lopdf::Document;

/// Trimmed text below this length is treated as "no usable text" and routes
/// the document to the visual path. Tuned for scanned-vs-native detection.
pub const MIN_TEXT_CHARS: usize = 50;

/// Extraction stops accumulating and truncates here (token-budget cap).
pub const MAX_TEXT_CHARS: usize = 3000;

const MAX_PAGES: usize = 2;

pub trait PdfTextExtractor {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Option<String>;
}

#[derive(Default)]
pub struct LopdfExtractor;

impl PdfTextExtractor for LopdfExtractor {
    /// Pulls machine-readable text from the first two pages of a PDF.
    ///
    /// Returns `None` when the document fails to parse or the trimmed text is
    /// shorter than [`MIN_TEXT_CHARS`]. Absence is a modeled outcome, not an
    /// error: the caller falls back to the visual path.
    fn extract_text(&self, pdf_bytes: &[u8]) -> Option<String> {
        let document = Document::load_mem(pdf_bytes).ok()?;

        let mut collected = String::new();
        for page_no in document.get_pages().into_keys().take(MAX_PAGES) {
            let page_text = document.extract_text(&[page_no]).ok()?;
            if !collected.is_empty() {
                collected.push('\n');
            }
            collected.push_str(&page_text);

            if collected.chars().count() >= MAX_TEXT_CHARS {
                break;
            }
        }

        let text = collected.trim();
        let char_count = text.chars().count();
        if char_count < MIN_TEXT_CHARS {
            return None;
        }

        if char_count > MAX_TEXT_CHARS {
            Some(text.chars().take(MAX_TEXT_CHARS).collect())
        } else {
            Some(text.to_string())
        }
    }
}

pub fn extract_text(pdf_bytes: &[u8]) -> Option<String> {
    LopdfExtractor::default().extract_text(pdf_bytes)
}

#[cfg(test)]
pub(crate) mod test_pdfs {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Builds a minimal in-memory PDF with one page per entry in
    /// `page_texts`. An empty entry produces a page without text operators,
    /// mimicking a scanned page.
    pub(crate) fn pdf_with_pages(page_texts: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in page_texts {
            let mut operations = Vec::new();
            if !text.is_empty() {
                operations.extend([
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![50.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ]);
            }
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("content stream should encode"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
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
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("pdf should serialize");
        bytes
    }
}
