//! The read-only view of a source document handed to the decomposer.
//!
//! An [`InputDescriptor`] arrives from the host pipeline with whichever of
//! `body` (full byte content) and `path` (on-disk location) the pipeline has;
//! at least one must be usable. The descriptor is immutable for the duration
//! of one decomposition — every accessor takes `&self` and nothing here
//! mutates after construction.
//!
//! [`InputDescriptor::peek_bytes`] exists so format detection can look at a
//! file's magic number without pulling the whole body into memory: when only
//! a path is available it reads at most `n` bytes from disk.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Default thumbnail box, in pixels, when the host does not specify one.
const DEFAULT_SCREENSHOT_SIZE: (u32, u32) = (100, 136);

/// Read-only description of one source document.
#[derive(Debug, Clone)]
pub struct InputDescriptor {
    uri: String,
    mime_type: Option<String>,
    extension: Option<String>,
    body: Option<Vec<u8>>,
    path: Option<PathBuf>,
    needs_screenshot: bool,
    expected_screenshot_size: (u32, u32),
}

impl InputDescriptor {
    /// Describe a document whose full content is already in memory.
    pub fn from_bytes(uri: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            uri: uri.into(),
            mime_type: None,
            extension: None,
            body: Some(body.into()),
            path: None,
            needs_screenshot: false,
            expected_screenshot_size: DEFAULT_SCREENSHOT_SIZE,
        }
    }

    /// Describe a document that lives on disk.
    pub fn from_path(uri: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            uri: uri.into(),
            mime_type: None,
            extension: None,
            body: None,
            path: Some(path.into()),
            needs_screenshot: false,
            expected_screenshot_size: DEFAULT_SCREENSHOT_SIZE,
        }
    }

    /// Set the mime-type hint (e.g. `"application/pdf"`).
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Override the extension instead of deriving it from the URI.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into().to_ascii_lowercase());
        self
    }

    /// Add an on-disk location for a descriptor that also carries its body.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Request a thumbnail of the given size alongside text and metadata.
    pub fn with_screenshot(mut self, width: u32, height: u32) -> Self {
        self.needs_screenshot = true;
        self.expected_screenshot_size = (width.max(1), height.max(1));
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// The explicit extension override, or the lowercased extension of the
    /// URI's basename. `None` when the basename has no extension.
    pub fn extension(&self) -> Option<String> {
        self.extension
            .clone()
            .or_else(|| extension_from_uri(&self.uri))
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn needs_screenshot(&self) -> bool {
        self.needs_screenshot
    }

    /// Requested thumbnail size as `(width, height)` in pixels.
    pub fn expected_screenshot_size(&self) -> (u32, u32) {
        self.expected_screenshot_size
    }

    /// Up to `n` leading bytes of the document, without loading the full body.
    ///
    /// Returns fewer than `n` bytes when the document is shorter, and an
    /// empty vector when nothing is readable.
    pub fn peek_bytes(&self, n: usize) -> Vec<u8> {
        if let Some(body) = &self.body {
            return body[..body.len().min(n)].to_vec();
        }
        if let Some(path) = &self.path {
            if let Ok(file) = File::open(path) {
                let mut buf = Vec::with_capacity(n);
                if file.take(n as u64).read_to_end(&mut buf).is_ok() {
                    return buf;
                }
            }
        }
        Vec::new()
    }
}

fn extension_from_uri(uri: &str) -> Option<String> {
    // Strip query/fragment before looking at the basename.
    let path = uri.split(['?', '#']).next().unwrap_or(uri);
    let name = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn extension_derived_from_uri() {
        let data = InputDescriptor::from_bytes("http://example.com/doc/index.PDF?x=1", vec![]);
        assert_eq!(data.extension().as_deref(), Some("pdf"));
    }

    #[test]
    fn extension_absent_for_bare_basename() {
        let data = InputDescriptor::from_bytes("http://example.com/README", vec![]);
        assert_eq!(data.extension(), None);
    }

    #[test]
    fn extension_override_wins() {
        let data =
            InputDescriptor::from_bytes("index.html", vec![]).with_extension("PDF");
        assert_eq!(data.extension().as_deref(), Some("pdf"));
    }

    #[test]
    fn peek_from_body_is_bounded() {
        let data = InputDescriptor::from_bytes("a.pdf", b"%PDF-1.4 rest".to_vec());
        assert_eq!(data.peek_bytes(6), b"%PDF-1");
        assert_eq!(data.peek_bytes(100), b"%PDF-1.4 rest");
    }

    #[test]
    fn peek_from_path_reads_leading_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.7\n...").unwrap();
        file.flush().unwrap();

        let data = InputDescriptor::from_path("a.pdf", file.path());
        assert_eq!(data.peek_bytes(6), b"%PDF-1");
    }

    #[test]
    fn peek_with_nothing_readable_is_empty() {
        let data = InputDescriptor::from_path("a.pdf", "/nonexistent/definitely-missing.pdf");
        assert!(data.peek_bytes(6).is_empty());
    }

    #[test]
    fn screenshot_defaults() {
        let data = InputDescriptor::from_bytes("a.pdf", vec![]);
        assert!(!data.needs_screenshot());
        assert_eq!(data.expected_screenshot_size(), (100, 136));

        let data = data.with_screenshot(640, 480);
        assert!(data.needs_screenshot());
        assert_eq!(data.expected_screenshot_size(), (640, 480));
    }
}
