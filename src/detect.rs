//! Format detection: does this input belong to the PDF decomposer?
//!
//! The check is cheap by contract — an explicit mime type is trusted
//! outright, and otherwise only the first six bytes of the document are
//! inspected. It never loads the full body and has no side effects, so the
//! dispatch layer can call it against every registered decomposer.

use crate::input::InputDescriptor;

/// Leading bytes of every PDF 1.x file.
const PDF_MAGIC: &[u8] = b"%PDF-1";

/// Decide whether the input should be decomposed as a PDF.
///
/// Decision order:
/// 1. `mime_type == "application/pdf"` wins regardless of extension or
///    content.
/// 2. Otherwise, an absent extension or `"pdf"` defers to the magic number:
///    the first six bytes must be exactly `%PDF-1`. A short or unreadable
///    peek is a non-match.
/// 3. Any other extension is not ours.
pub fn is_target(data: &InputDescriptor) -> bool {
    if data.mime_type() == Some("application/pdf") {
        return true;
    }
    match data.extension().as_deref() {
        None | Some("pdf") => data.peek_bytes(PDF_MAGIC.len()) == PDF_MAGIC,
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf_body() -> Vec<u8> {
        b"%PDF-1.4\n1 0 obj\n".to_vec()
    }

    #[test]
    fn mime_type_overrides_everything() {
        let data = InputDescriptor::from_bytes("index.html", b"<html>".to_vec())
            .with_mime_type("application/pdf");
        assert!(is_target(&data));
    }

    #[test]
    fn other_mime_type_falls_through_to_extension_and_magic() {
        let data = InputDescriptor::from_bytes("index.pdf", pdf_body())
            .with_mime_type("application/octet-stream");
        assert!(is_target(&data));
    }

    #[test]
    fn pdf_extension_with_magic_matches() {
        let data = InputDescriptor::from_bytes("doc/index.pdf", pdf_body());
        assert!(is_target(&data));
    }

    #[test]
    fn pdf_extension_with_wrong_magic_does_not_match() {
        let data = InputDescriptor::from_bytes("index.pdf", b"<html></html>".to_vec());
        assert!(!is_target(&data));
    }

    #[test]
    fn absent_extension_defers_to_magic() {
        let data = InputDescriptor::from_bytes("download", pdf_body());
        assert!(is_target(&data));

        let data = InputDescriptor::from_bytes("download", b"PK\x03\x04".to_vec());
        assert!(!is_target(&data));
    }

    #[test]
    fn short_body_is_a_non_match() {
        let data = InputDescriptor::from_bytes("index.pdf", b"%PDF".to_vec());
        assert!(!is_target(&data));
    }

    #[test]
    fn html_extension_is_rejected_without_reading_content() {
        let data = InputDescriptor::from_bytes("index.html", pdf_body());
        assert!(!is_target(&data));
    }
}
