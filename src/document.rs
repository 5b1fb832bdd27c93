use crate::error::{Error, Result};
use crate::metadata::Metadata;
use crate::page::Page;
use crate::page_size::PageSize;
use crate::pdf_generator;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a [`Document`], carried by its pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    pub(crate) fn next() -> Self {
        DocumentId(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}

/// An in-memory PDF document: metadata plus an ordered list of pages.
///
/// # Example
/// ```rust,no_run
/// use pdftickle::{Document, PageSize};
///
/// let mut doc = Document::with_title("My First PDF", Some("Jane Doe"));
/// doc.add_page()?.add_text("Hello World!", 100.0, 700.0)?;
/// doc.add_page_with_size(PageSize::LETTER)?
///     .add_text("A Letter-sized page", 100.0, 700.0)?;
/// doc.save("hello.pdf")?;
/// # Ok::<(), pdftickle::Error>(())
/// ```
#[derive(Debug)]
pub struct Document {
    id: DocumentId,
    metadata: Metadata,
    pages: Vec<Page>,
    default_page_size: PageSize,
    closed: bool,
}

impl Document {
    pub fn new() -> Self {
        Document {
            id: DocumentId::next(),
            metadata: Metadata::new(),
            pages: Vec::new(),
            default_page_size: PageSize::A4,
            closed: false,
        }
    }

    /// Create a document with its title and, optionally, author set.
    pub fn with_title(title: impl Into<String>, author: Option<&str>) -> Self {
        let mut doc = Self::new();
        doc.metadata.title = Some(title.into());
        doc.metadata.author = author.map(str::to_string);
        doc
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    pub fn default_page_size(&self) -> &PageSize {
        &self.default_page_size
    }

    /// Size used by [`add_page`](Self::add_page). Existing pages keep theirs.
    pub fn set_default_page_size(&mut self, size: PageSize) {
        self.default_page_size = size;
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Look up a page by its 1-based number.
    pub fn page(&self, number: u32) -> Option<&Page> {
        let index = (number as usize).checked_sub(1)?;
        self.pages.get(index)
    }

    /// Mutable lookup by 1-based number, for adding more text later.
    pub fn page_mut(&mut self, number: u32) -> Option<&mut Page> {
        let index = (number as usize).checked_sub(1)?;
        self.pages.get_mut(index)
    }

    /// Append a page of the default size.
    pub fn add_page(&mut self) -> Result<&mut Page> {
        let size = self.default_page_size.clone();
        self.add_page_with_size(size)
    }

    /// Append a page of the given size. Its number is `page_count() + 1`.
    pub fn add_page_with_size(&mut self, size: PageSize) -> Result<&mut Page> {
        self.ensure_open("add a page")?;

        let number = u32::try_from(self.pages.len() + 1)
            .map_err(|_| Error::invalid_state("page count exceeds u32::MAX"))?;
        self.pages.push(Page::new(size, number, self.id));
        self.metadata.update_modification_date();

        let index = self.pages.len() - 1;
        Ok(&mut self.pages[index])
    }

    /// Serialize the document to PDF bytes.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.ensure_open("serialize")?;
        self.metadata.update_modification_date();
        Ok(pdf_generator::generate_pdf_bytes(self))
    }

    /// Serialize the document and write it to `writer`.
    ///
    /// Nothing is written unless serialization completes.
    pub fn write_to<W: Write>(&mut self, mut writer: W) -> Result<()> {
        let bytes = self.to_bytes()?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize the document and write it to a file, replacing any existing one.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.ensure_open("save")?;
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::invalid_argument("output path is empty"));
        }
        let bytes = self.to_bytes()?;
        fs::write(path, &bytes)?;
        log::info!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Release all pages. Later mutating or serializing calls fail with
    /// [`Error::InvalidState`].
    pub fn close(&mut self) {
        if !self.closed {
            self.pages.clear();
            self.closed = true;
            log::debug!("{} closed", self.id);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Snapshot of the document for reporting.
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            title: self.metadata.title.clone(),
            author: self.metadata.author.clone(),
            producer: self.metadata.producer.clone(),
            created: self.metadata.creation_date,
            modified: self.metadata.modification_date,
            pages: self
                .pages
                .iter()
                .map(|page| PageSummary {
                    number: page.number(),
                    size: page.size().name().to_string(),
                    width: page.size().width(),
                    height: page.size().height(),
                    fragments: page.fragments().len(),
                })
                .collect(),
        }
    }

    fn ensure_open(&self, action: &str) -> Result<()> {
        if self.closed {
            Err(Error::invalid_state(format!(
                "cannot {}: document has been closed",
                action
            )))
        } else {
            Ok(())
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PDF Document - {} pages", self.page_count())
    }
}

/// Serializable overview of a document, as printed by `pdftickle info --json`.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub title: Option<String>,
    pub author: Option<String>,
    pub producer: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub pages: Vec<PageSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    pub number: u32,
    pub size: String,
    pub width: f64,
    pub height: f64,
    pub fragments: usize,
}
