//! Document loading: descriptor → live pdfium document handle.
//!
//! pdfium's random-access page model wants a real file — opening from an
//! in-memory buffer also probes encryption differently, which would make the
//! encrypted/invalid distinction depend on how the input arrived. So the
//! loader always opens a filesystem path: the descriptor's own path when it
//! exists on disk, otherwise the body materialized into a `NamedTempFile`.
//! The temp file is owned by the returned [`DocumentHandle`] and deleted when
//! the handle drops, on every exit path.
//!
//! The native open runs under [`crate::capture`] so pdfium's stderr chatter
//! becomes a structured log record instead of raw process output.

use crate::capture::with_captured_diagnostics;
use crate::error::DecomposeError;
use crate::input::InputDescriptor;
use pdfium_render::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Component tag on captured-diagnostics log records.
const COMPONENT: &str = "pdf-decomposer";

/// Bind to a pdfium library: `PDFIUM_LIB_PATH` first, then the platform
/// library next to the executable, then the system library.
pub(crate) fn bind_pdfium() -> Result<Pdfium, DecomposeError> {
    let bindings = if let Ok(path) = std::env::var("PDFIUM_LIB_PATH") {
        Pdfium::bind_to_library(&path)
    } else {
        Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
    }
    .map_err(|e| DecomposeError::PdfiumBindingFailed(format!("{e:?}")))?;

    Ok(Pdfium::new(bindings))
}

/// The filesystem path the engine will open — the descriptor's own file, or
/// the body written out to a scoped temp file.
#[derive(Debug)]
pub(crate) enum ResolvedSource {
    Local(PathBuf),
    /// Body materialized to disk; the file is deleted when this drops.
    Materialized(NamedTempFile),
}

impl ResolvedSource {
    pub(crate) fn path(&self) -> &Path {
        match self {
            ResolvedSource::Local(path) => path,
            ResolvedSource::Materialized(file) => file.path(),
        }
    }
}

/// Prefer the descriptor's on-disk path; otherwise write the body to a
/// private temp file in binary mode.
pub(crate) fn resolve_source(data: &InputDescriptor) -> Result<ResolvedSource, DecomposeError> {
    if let Some(path) = data.path() {
        if path.exists() {
            return Ok(ResolvedSource::Local(path.to_path_buf()));
        }
    }

    let Some(body) = data.body() else {
        return Err(DecomposeError::MissingSource {
            uri: data.uri().to_string(),
        });
    };

    let mut file = NamedTempFile::new()
        .map_err(|e| DecomposeError::Internal(format!("tempfile: {e}")))?;
    file.write_all(body)
        .and_then(|()| file.flush())
        .map_err(|e| DecomposeError::Internal(format!("tempfile write: {e}")))?;

    debug!("materialized {} body bytes for {}", body.len(), data.uri());
    Ok(ResolvedSource::Materialized(file))
}

/// Owns the open document and the materialized source backing it.
///
/// Field order matters: the document is dropped before the temp file it was
/// opened from is deleted.
pub(crate) struct DocumentHandle<'a> {
    document: PdfDocument<'a>,
    _source: ResolvedSource,
}

impl<'a> DocumentHandle<'a> {
    pub(crate) fn document(&self) -> &PdfDocument<'a> {
        &self.document
    }

    pub(crate) fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }
}

/// Open the descriptor's document, mapping native failures to the stable
/// error taxonomy: a password-shaped failure is [`DecomposeError::Encrypted`],
/// anything else [`DecomposeError::InvalidData`].
pub(crate) fn open_document<'a>(
    pdfium: &'a Pdfium,
    data: &InputDescriptor,
    password: Option<&'a str>,
) -> Result<DocumentHandle<'a>, DecomposeError> {
    let source = resolve_source(data)?;

    let open_result = with_captured_diagnostics(COMPONENT, || {
        pdfium.load_pdf_from_file(source.path(), password)
    });

    let document = open_result.map_err(|e| map_open_failure(&format!("{e:?}"), data))?;

    Ok(DocumentHandle {
        document,
        _source: source,
    })
}

fn map_open_failure(detail: &str, data: &InputDescriptor) -> DecomposeError {
    if is_password_failure(detail) {
        DecomposeError::Encrypted {
            uri: data.uri().to_string(),
        }
    } else {
        DecomposeError::InvalidData {
            uri: data.uri().to_string(),
            detail: detail.to_string(),
        }
    }
}

/// pdfium reports a missing or wrong password through its internal error
/// code; its debug rendering is the stable place that code surfaces.
fn is_password_failure(detail: &str) -> bool {
    detail.contains("Password") || detail.contains("password")
}
