//! # pdf-decomposer
//!
//! Extract plain text, bibliographic metadata, and an optional page
//! thumbnail from PDF documents, for ingestion by document-processing
//! pipelines that normalize heterogeneous file formats into text records.
//!
//! Parsing and rasterization are delegated to the pdfium native engine via
//! `pdfium-render`; this crate owns everything around it — format detection,
//! encrypted-document handling, the typed error taxonomy, text
//! normalization, metadata coercion, and aspect-preserving thumbnail
//! composition.
//!
//! ## Pipeline Overview
//!
//! ```text
//! InputDescriptor
//!  │
//!  ├─ 1. Detect    is_target: mime type, extension, %PDF-1 magic
//!  ├─ 2. Load      resolve path or materialize temp file; password; pdfium
//!  │               open under stderr capture; typed errors
//!  ├─ 3. Text      per-page extraction, newline-normalized concatenation
//!  ├─ 4. Metadata  title/author/… with created-time → ISO-8601 UTC
//!  ├─ 5. Thumbnail page 0 fitted onto a white canvas → PNG → base64
//!  └─ 6. Output    one OutputRecord
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf_decomposer::{decompose, is_target, DecomposerConfig, InputDescriptor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytes = std::fs::read("document.pdf")?;
//!     let data = InputDescriptor::from_bytes("document.pdf", bytes)
//!         .with_screenshot(100, 136);
//!
//!     if is_target(&data) {
//!         let config = DecomposerConfig::default();
//!         let record = decompose(data, &config).await?;
//!         println!("{}", record.body);
//!         if let Some(title) = record.attributes.get("title") {
//!             println!("title: {title}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Encrypted documents
//!
//! Supply a password as configuration — a fixed string or a per-document
//! resolver:
//!
//! ```rust
//! use pdf_decomposer::DecomposerConfig;
//!
//! let fixed = DecomposerConfig::builder().password("hunter2").build();
//! let per_doc = DecomposerConfig::builder()
//!     .password_resolver(|data| lookup_password(data.uri()))
//!     .build();
//! # fn lookup_password(_uri: &str) -> Option<String> { None }
//! ```
//!
//! Without a usable password an encrypted document fails with
//! [`DecomposeError::Encrypted`] — always propagated, never swallowed, since
//! the caller can retry with credentials.
//!
//! ## The pdfium library
//!
//! A pdfium shared library must be loadable at runtime: set
//! `PDFIUM_LIB_PATH`, place the platform library next to the executable, or
//! install it system-wide.

// ── Modules ──────────────────────────────────────────────────────────────

mod capture;
pub mod config;
pub mod decompose;
pub mod detect;
pub mod error;
pub mod input;
pub mod output;
mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{DecomposerConfig, DecomposerConfigBuilder, PasswordPolicy};
pub use decompose::{decompose, decompose_sync};
pub use detect::is_target;
pub use error::DecomposeError;
pub use input::InputDescriptor;
pub use output::{OutputRecord, Screenshot};
