use std::io::Cursor;

use anyhow::{Result, anyhow};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use docx_rs::{Docx, Paragraph, Run};

/// Fixed, localized name of the downloadable artifact.
pub const DOCUMENT_FILENAME: &str = "Diagnóstico_e_Plano_de_Tratamento.docx";

const DOCUMENT_HEADING: &str = "Diagnóstico de saúde e recomendações de tratamento";

/// Build the .docx artifact: the fixed heading plus the result as a single
/// paragraph with line breaks collapsed to spaces. Deterministic for the
/// same input string.
pub fn generate_docx(result: &str) -> Result<Vec<u8>> {
    let body = result.replace("\r\n", " ").replace('\n', " ");

    let docx = Docx::new()
        .add_paragraph(
            Paragraph::new().add_run(Run::new().add_text(DOCUMENT_HEADING).size(40).bold()),
        )
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(body)));

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| anyhow!("failed to pack docx: {e}"))?;

    Ok(cursor.into_inner())
}

/// Encode the artifact for inline retrieval as a data URL payload.
pub fn download_payload(document: &[u8]) -> String {
    STANDARD.encode(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_generation_is_deterministic() {
        let text = "Diagnóstico: gripe.\nTratamento: repouso e\r\nhidratação.";
        let first = generate_docx(text).unwrap();
        let second = generate_docx(text).unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn generated_document_is_a_zip_archive() {
        let bytes = generate_docx("resultado").unwrap();
        // .docx files are zip containers; check the magic bytes.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn download_payload_is_pure_base64() {
        let payload = download_payload(b"hello");
        assert_eq!(payload, "aGVsbG8=");
        assert_eq!(payload, download_payload(b"hello"));
    }
}
