//! Output types produced by a successful decomposition.
//!
//! One [`OutputRecord`] per input: the concatenated page text, the document
//! attributes already coerced to canonical string form, and — when the
//! descriptor asked for one — an embedded [`Screenshot`]. All types are
//! `Serialize` so the host pipeline can hand records straight to whatever
//! sink it feeds (JSON lines, queues, index writers).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An embedded page thumbnail.
///
/// `data` is the base64 rendering of the PNG bytes; `encoding` is the literal
/// tag `"base64"` so downstream consumers can dispatch without sniffing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screenshot {
    pub mime_type: String,
    pub data: String,
    pub encoding: String,
}

impl Screenshot {
    pub(crate) fn png_base64(data: String) -> Self {
        Self {
            mime_type: "image/png".to_string(),
            data,
            encoding: "base64".to_string(),
        }
    }
}

/// The single record a decomposition yields.
///
/// Immutable after construction; ownership passes to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct OutputRecord {
    /// URI of the source document, carried over from the descriptor.
    pub uri: String,
    /// Concatenated page text, one trailing newline per non-empty page.
    pub body: String,
    /// Document attributes keyed by canonical name (`title`, `author`,
    /// `subject`, `keywords`, `creator`, `producer`, `created-time`).
    /// Keys with no native value are absent, not empty.
    pub attributes: IndexMap<String, String>,
    /// Thumbnail of page 0, present only when the descriptor requested one
    /// and rendering succeeded.
    pub screenshot: Option<Screenshot>,
}
