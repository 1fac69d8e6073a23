//! Scoped capture of the native engine's stderr diagnostics.
//!
//! pdfium writes free-form warnings ("bogus xref", "unbalanced q/Q" and the
//! like) straight to the process's stderr file descriptor while parsing a
//! document. Left alone they interleave with the host's own output; captured
//! here they become one structured `tracing` warning instead.
//!
//! The redirect works at the fd level: fd 2 is duplicated, pointed at a
//! private unnamed temp file for the duration of the wrapped call, and
//! restored by a `Drop` guard so restoration also happens while unwinding
//! from a panic. Because fd 2 is process-global, concurrent captures MUST
//! serialize — a global mutex is held for the whole redirect scope. Windows
//! has no equivalent fd plumbing here, so the wrapper degrades to a
//! passthrough there.

#[cfg(unix)]
use once_cell::sync::Lazy;
#[cfg(unix)]
use std::fs::File;
#[cfg(unix)]
use std::io::{self, Read, Seek, SeekFrom, Write};
#[cfg(unix)]
use std::os::unix::io::{AsRawFd, RawFd};
#[cfg(unix)]
use std::sync::Mutex;
use tracing::warn;

/// Run `action` with stderr captured; report any captured diagnostics as a
/// single warning record tagged with `component`.
pub(crate) fn with_captured_diagnostics<T>(component: &str, action: impl FnOnce() -> T) -> T {
    let (result, diagnostics) = capture_diagnostics(action);
    if !diagnostics.trim().is_empty() {
        warn!(
            component = component,
            "native engine diagnostics: {}",
            diagnostics.trim_end()
        );
    }
    result
}

/// Run `action` with stderr redirected to a private sink; return the action's
/// result together with whatever the sink received.
#[cfg(unix)]
pub(crate) fn capture_diagnostics<T>(action: impl FnOnce() -> T) -> (T, String) {
    // fd 2 is process-global mutable state: one redirect scope at a time.
    static REDIRECT_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
    let _serial = REDIRECT_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let mut redirect = match StderrRedirect::install() {
        Ok(redirect) => redirect,
        // No capture is better than no decomposition; run unredirected.
        Err(_) => return (action(), String::new()),
    };

    let result = action();
    let diagnostics = redirect.finish();
    (result, diagnostics)
}

#[cfg(not(unix))]
pub(crate) fn capture_diagnostics<T>(action: impl FnOnce() -> T) -> (T, String) {
    (action(), String::new())
}

/// Guard holding the saved stderr fd while fd 2 points at `sink`.
#[cfg(unix)]
struct StderrRedirect {
    saved: Option<RawFd>,
    sink: File,
}

#[cfg(unix)]
impl StderrRedirect {
    fn install() -> io::Result<Self> {
        let sink = tempfile::tempfile()?;
        // Flush buffered Rust-side stderr before swapping the fd underneath it.
        let _ = io::stderr().flush();

        let saved = unsafe { libc::dup(libc::STDERR_FILENO) };
        if saved < 0 {
            return Err(io::Error::last_os_error());
        }
        if unsafe { libc::dup2(sink.as_raw_fd(), libc::STDERR_FILENO) } < 0 {
            let err = io::Error::last_os_error();
            unsafe { libc::close(saved) };
            return Err(err);
        }
        Ok(Self {
            saved: Some(saved),
            sink,
        })
    }

    /// Restore the original fd. Idempotent; also invoked from `Drop` so the
    /// redirect never outlives its scope, panic included.
    fn restore(&mut self) {
        if let Some(saved) = self.saved.take() {
            let _ = io::stderr().flush();
            unsafe {
                libc::dup2(saved, libc::STDERR_FILENO);
                libc::close(saved);
            }
        }
    }

    /// Restore stderr, then drain whatever the sink received.
    fn finish(&mut self) -> String {
        self.restore();
        let mut bytes = Vec::new();
        let mut sink = &self.sink;
        if sink.seek(SeekFrom::Start(0)).is_ok() {
            let _ = sink.read_to_end(&mut bytes);
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

#[cfg(unix)]
impl Drop for StderrRedirect {
    fn drop(&mut self) {
        self.restore();
    }
}
