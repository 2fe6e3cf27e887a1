//! Raw-text extraction from uploaded résumé documents.
//! PDF via `pdf-extract`, DOCX by walking the document tree with `docx-rs`.

use crate::errors::AppError;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Maps an upload content type to a supported document kind.
    /// Anything else is rejected at the handler boundary.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            PDF_MIME => Some(DocumentKind::Pdf),
            DOCX_MIME => Some(DocumentKind::Docx),
            _ => None,
        }
    }
}

/// Extracts raw text from an uploaded document held in memory.
/// An unreadable document or one with no text at all is a 422.
pub fn extract_text(kind: DocumentKind, data: &[u8]) -> Result<String, AppError> {
    let text = match kind {
        DocumentKind::Pdf => extract_pdf(data)?,
        DocumentKind::Docx => extract_docx(data)?,
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No text could be extracted from the document".to_string(),
        ));
    }
    Ok(text)
}

fn extract_pdf(data: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(data)
        .map_err(|e| AppError::UnprocessableEntity(format!("Failed to read PDF: {e}")))
}

fn extract_docx(data: &[u8]) -> Result<String, AppError> {
    let docx = docx_rs::read_docx(data)
        .map_err(|e| AppError::UnprocessableEntity(format!("Failed to read DOCX: {e}")))?;

    let mut text = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            for para_child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = para_child {
                    for run_child in run.children {
                        if let docx_rs::RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_content_type_dispatch() {
        assert_eq!(
            DocumentKind::from_content_type(PDF_MIME),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::from_content_type(DOCX_MIME),
            Some(DocumentKind::Docx)
        );
        assert_eq!(DocumentKind::from_content_type("text/plain"), None);
        assert_eq!(DocumentKind::from_content_type("application/msword"), None);
    }

    #[test]
    fn test_garbage_pdf_is_unprocessable() {
        let result = extract_text(DocumentKind::Pdf, b"definitely not a pdf");
        assert!(matches!(result, Err(AppError::UnprocessableEntity(_))));
    }

    #[test]
    fn test_docx_round_trip_extracts_paragraph_text() {
        let mut buf = Cursor::new(Vec::new());
        docx_rs::Docx::new()
            .add_paragraph(
                docx_rs::Paragraph::new()
                    .add_run(docx_rs::Run::new().add_text("Senior Rust Engineer")),
            )
            .add_paragraph(
                docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text("Built things")),
            )
            .build()
            .pack(&mut buf)
            .unwrap();

        let text = extract_text(DocumentKind::Docx, buf.get_ref()).unwrap();
        assert!(text.contains("Senior Rust Engineer"));
        assert!(text.contains("Built things"));
    }

    #[test]
    fn test_empty_docx_is_unprocessable() {
        let mut buf = Cursor::new(Vec::new());
        docx_rs::Docx::new().build().pack(&mut buf).unwrap();

        let result = extract_text(DocumentKind::Docx, buf.get_ref());
        assert!(matches!(result, Err(AppError::UnprocessableEntity(_))));
    }
}
