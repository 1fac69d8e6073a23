//! Error types for the pdf-decomposer library.
//!
//! The stable taxonomy the caller can act on is deliberately small:
//!
//! * [`DecomposeError::Encrypted`] — the document wants a password that was
//!   missing or wrong. Actionable: retry with a password.
//! * [`DecomposeError::InvalidData`] — the document could not be parsed for
//!   any other reason. Carries the native engine's message.
//!
//! Everything pdfium reports during a *successful* open is a non-fatal
//! diagnostic: captured by [`crate::capture`] and surfaced through `tracing`,
//! never raised. The remaining variants cover the environment rather than the
//! document — a descriptor with nothing to read, a missing pdfium library,
//! temp-file I/O. Detection misses (`is_target` returning false) are not
//! errors at all; they signal "not my format" to the dispatch layer.

use thiserror::Error;

/// All fatal errors returned by the pdf-decomposer library.
#[derive(Debug, Error)]
pub enum DecomposeError {
    // ── Document errors ───────────────────────────────────────────────────
    /// The document requires a password that was not supplied or was wrong.
    #[error("PDF '{uri}' is encrypted and requires a password.\nSupply one via DecomposerConfig::builder().password(…) or a password resolver.")]
    Encrypted { uri: String },

    /// The document could not be parsed for any non-encryption reason.
    #[error("PDF '{uri}' could not be parsed: {detail}")]
    InvalidData { uri: String, detail: String },

    // ── Input errors ──────────────────────────────────────────────────────
    /// The descriptor has neither body bytes nor an on-disk path to read.
    #[error("No readable source for '{uri}': descriptor has neither body bytes nor an existing file path")]
    MissingSource { uri: String },

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
You can:\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium to use an existing copy.\n\
  • Install pdfium system-wide so it is found on the library search path.\n"
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error (temp-file I/O, blocking-task join).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DecomposeError {
    /// True for the two document-level failures a dispatch layer may want to
    /// report back to the submitter rather than treat as infrastructure.
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            DecomposeError::Encrypted { .. } | DecomposeError::InvalidData { .. }
        )
    }
}
