//! Document Extractor: turns an uploaded PDF into plain text.

use thiserror::Error;
use tracing::debug;

use crate::models::document::{ExtractedText, RawDocument};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// The upload could not be turned into text. Never retried.
#[derive(Debug, Error)]
pub enum UnreadableDocument {
    #[error("The uploaded document is empty")]
    Empty,

    #[error("The uploaded document is not a PDF")]
    NotPdf,

    #[error("The PDF could not be parsed: {0}")]
    Malformed(String),

    #[error("The PDF has no extractable text layer (is it a scanned image?)")]
    NoTextLayer,
}

/// Extracts the text layer of a PDF.
///
/// Parsing is CPU-bound and the parser may panic on hostile input, so it runs
/// on the blocking pool; a panicked parse is reported as `Malformed`.
pub async fn extract_text(document: RawDocument) -> Result<ExtractedText, UnreadableDocument> {
    if document.is_empty() {
        return Err(UnreadableDocument::Empty);
    }
    if !document.bytes.starts_with(PDF_MAGIC) {
        return Err(UnreadableDocument::NotPdf);
    }

    let size = document.len();
    let bytes = document.bytes;
    let raw = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| UnreadableDocument::Malformed(format!("parser aborted: {e}")))?
        .map_err(|e| UnreadableDocument::Malformed(e.to_string()))?;

    let text = text_layer(&raw)?;

    debug!(
        file_name = ?document.file_name,
        bytes = size,
        chars = text.chars().count(),
        "Extracted CV text"
    );
    Ok(ExtractedText::new(text))
}

/// Tidies parser output; nothing left means the PDF carries no text layer.
fn text_layer(raw: &str) -> Result<String, UnreadableDocument> {
    let text = tidy_lines(raw);
    if text.is_empty() {
        return Err(UnreadableDocument::NoTextLayer);
    }
    Ok(text)
}

/// Trims trailing whitespace on every line and squeezes runs of blank lines
/// down to one. The parser emits a lot of vertical padding between pages.
fn tidy_lines(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blank_run = 0;
    for line in raw.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            blank_run += 1;
            continue;
        }
        if !out.is_empty() {
            out.push_str(if blank_run > 0 { "\n\n" } else { "\n" });
        }
        out.push_str(line);
        blank_run = 0;
    }
    out
}

#[cfg(test)]
pub(crate) mod testing {
    /// Builds a one-page PDF with a Helvetica text line, or an empty page.
    /// Cross-reference offsets are computed so strict parsers accept it.
    pub fn build_pdf(text: Option<&str>) -> Vec<u8> {
        let content = text
            .map(|t| format!("BT /F1 12 Tf 72 720 Td ({t}) Tj ET"))
            .unwrap_or_default();
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
                .to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
            format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref_offset = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        pdf.extend_from_slice(xref.as_bytes());
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_offset
            )
            .as_bytes(),
        );
        pdf
    }
}
