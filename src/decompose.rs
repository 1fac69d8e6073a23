//! Decomposition entry points.
//!
//! One call decomposes one input: open the document, extract text and
//! attributes, optionally render the thumbnail, assemble the record. The
//! whole operation is synchronous and non-reentrant; the async entry point
//! exists because pdfium is not async-safe, so async hosts get the blocking
//! core moved onto `tokio::task::spawn_blocking` rather than run on a worker
//! thread of their runtime.
//!
//! Load failures propagate as [`DecomposeError`] — this crate never
//! log-and-skips a document-level failure, because an encryption error is
//! actionable by the caller and swallowing it would hide that. No timeout is
//! enforced here; a caller that needs one runs the call in a cancellable
//! worker.

use crate::config::DecomposerConfig;
use crate::error::DecomposeError;
use crate::input::InputDescriptor;
use crate::output::OutputRecord;
use crate::pipeline::{loader, metadata, text, thumbnail};
use tracing::{debug, info, warn};

/// Decompose one PDF input into its output record.
///
/// Async wrapper over [`decompose_sync`]; the work runs on the blocking
/// thread pool.
///
/// # Errors
/// [`DecomposeError::Encrypted`] when the document wants a password that the
/// configured policy did not produce (or produced wrong);
/// [`DecomposeError::InvalidData`] for any other parse failure. Environment
/// problems (no pdfium library, unreadable descriptor) use the remaining
/// variants.
pub async fn decompose(
    data: InputDescriptor,
    config: &DecomposerConfig,
) -> Result<OutputRecord, DecomposeError> {
    let config = config.clone();
    tokio::task::spawn_blocking(move || decompose_sync(&data, &config))
        .await
        .map_err(|e| DecomposeError::Internal(format!("decompose task panicked: {e}")))?
}

/// Synchronous decomposition core.
///
/// Safe to call concurrently for *different* inputs; each call gets its own
/// temp file, and the stderr capture scope serializes internally.
pub fn decompose_sync(
    data: &InputDescriptor,
    config: &DecomposerConfig,
) -> Result<OutputRecord, DecomposeError> {
    info!("decomposing PDF: {}", data.uri());

    // The policy is evaluated exactly once per attempt, before the open.
    let password = config.password.resolve(data);

    let pdfium = loader::bind_pdfium()?;
    let handle = loader::open_document(&pdfium, data, password.as_deref())?;
    debug!("document opened: {} pages", handle.page_count());

    let body = text::extract_text(&handle);
    let attributes = metadata::extract_attributes(&handle);

    let screenshot = if data.needs_screenshot() {
        let (width, height) = data.expected_screenshot_size();
        match thumbnail::render_thumbnail(&handle, width, height) {
            Ok(screenshot) => Some(screenshot),
            // A render glitch after a successful open costs the thumbnail,
            // not the record.
            Err(e) => {
                warn!("thumbnail rendering failed for {}: {}", data.uri(), e);
                None
            }
        }
    } else {
        None
    };

    info!(
        "decomposed {}: {} body bytes, {} attributes{}",
        data.uri(),
        body.len(),
        attributes.len(),
        if screenshot.is_some() {
            ", screenshot"
        } else {
            ""
        }
    );

    // Handle (and any materialized temp file) released here, as on every
    // earlier error return.
    Ok(OutputRecord {
        uri: data.uri().to_string(),
        body,
        attributes,
        screenshot,
    })
}
