//! Text extraction: page iteration and body assembly.
//!
//! Pages are visited in document order. Empty pages contribute nothing — no
//! placeholder, no separator. Every non-empty page ends up newline-terminated
//! in the body, so a two-page document reads `"Page1\nPage2\n"` with no
//! further synthesis between pages.

use super::loader::DocumentHandle;
use tracing::debug;

/// Concatenate the text of every page, in order.
///
/// A page whose native text extraction fails is treated like an empty page;
/// after a successful open there are no document-level errors left to raise
/// here.
pub(crate) fn extract_text(handle: &DocumentHandle) -> String {
    let mut body = String::new();
    for (index, page) in handle.document().pages().iter().enumerate() {
        match page.text() {
            Ok(text) => append_page_text(&mut body, &text.all()),
            Err(e) => debug!("page {index}: text extraction failed: {e:?}"),
        }
    }
    body
}

/// Append one page's text: skip empty pages, newline-terminate the rest.
fn append_page_text(body: &mut String, page_text: &str) {
    if page_text.is_empty() {
        return;
    }
    body.push_str(page_text);
    if !page_text.ends_with('\n') {
        body.push('\n');
    }
}
