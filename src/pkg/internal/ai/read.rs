use std::io::Cursor;

use standard_error::{Interpolate, StandardError};

use crate::prelude::Result;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub fn supported(content_type: &str) -> bool {
    matches!(content_type, PDF_CONTENT_TYPE | DOCX_CONTENT_TYPE)
}

pub fn extract_document(data: Vec<u8>, content_type: &str) -> Result<String> {
    match content_type {
        PDF_CONTENT_TYPE => extract_text_from_pdf(&data),
        DOCX_CONTENT_TYPE => extract_text_from_docx(&data),
        _ => Err(StandardError::new("ERR-FILE-001")),
    }
}

fn extract_text_from_pdf(data: &[u8]) -> Result<String> {
    use lopdf::Document;
    let cursor = Cursor::new(data);
    let doc = Document::load_from(cursor)
        .map_err(|e| StandardError::new("ERR-EXTRACT-001").interpolate_err(e.to_string()))?;

    // pages are keyed by page number, so iteration stays in page order
    let mut pages_text: Vec<String> = Vec::new();
    for page_num in doc.get_pages().keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(page_text) => {
                if !page_text.trim().is_empty() {
                    pages_text.push(page_text.trim_end().to_string());
                }
            }
            Err(e) => {
                tracing::warn!("no text extracted from page {}: {}", page_num, e);
            }
        }
    }
    Ok(pages_text.join("\n"))
}

fn extract_text_from_docx(data: &[u8]) -> Result<String> {
    use docx_rs::read_docx;
    let docx = read_docx(data)
        .map_err(|e| StandardError::new("ERR-EXTRACT-001").interpolate_err(e.to_string()))?;
    // every paragraph contributes a line, empty ones included
    let mut paragraphs: Vec<String> = Vec::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(p) = child {
            let mut text = String::new();
            for p_child in p.children {
                if let docx_rs::ParagraphChild::Run(run) = p_child {
                    for run_child in run.children {
                        if let docx_rs::RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            paragraphs.push(text);
        }
    }
    Ok(paragraphs.join("\n"))
}
