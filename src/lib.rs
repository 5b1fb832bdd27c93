//! # pdftickle
//!
//! Build documents of positioned text in memory and write them as small,
//! uncompressed PDF files.
//!
//! - **Document model**: [`Document`], [`Page`], [`PageSize`], [`Metadata`]
//! - **Serialization**: catalog, page tree, one content stream per page,
//!   cross-reference table and trailer
//! - **Manifests**: describe a document in JSON and render it
//!
//! ## Quick Start
//!
//! ```rust
//! use pdftickle::{Document, PageSize};
//!
//! let mut doc = Document::with_title("My First PDF", Some("Jane Doe"));
//! doc.add_page()?.add_text("Welcome!", 100.0, 700.0)?;
//! doc.add_page_with_size(PageSize::custom(400.0, 600.0)?.rotate())?
//!     .add_text("A landscape page", 50.0, 350.0)?;
//!
//! let bytes = doc.to_bytes()?;
//! assert!(bytes.starts_with(b"%PDF-1.4"));
//! # Ok::<(), pdftickle::Error>(())
//! ```
//!
//! Text is drawn with the built-in Helvetica face at 12 pt. Fonts, images,
//! compression and encryption are out of scope.
//!
//! ## Modules
//!
//! - [`document`]: the aggregate root and its save/serialize operations
//! - [`page`]: pages and text fragments
//! - [`page_size`]: standard and custom page dimensions
//! - [`metadata`]: title, author, producer and timestamps
//! - [`pdf_generator`]: object numbering, xref table and trailer
//! - [`content_stream`]: text operators and string encoding
//! - [`manifest`]: JSON document descriptions

pub mod content_stream;
pub mod document;
pub mod error;
pub mod manifest;
pub mod metadata;
pub mod page;
pub mod page_size;
pub mod pdf_generator;

pub use document::{Document, DocumentId, DocumentSummary, PageSummary};
pub use error::{Error, Result};
pub use manifest::Manifest;
pub use metadata::Metadata;
pub use page::{Page, TextFragment};
pub use page_size::PageSize;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default `producer` recorded in new documents' metadata.
pub const PRODUCER: &str = concat!("pdftickle ", env!("CARGO_PKG_VERSION"));

/// Create an empty document with default settings.
pub fn create_document() -> Document {
    Document::new()
}
