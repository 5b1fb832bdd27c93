use crate::document::DocumentId;
use crate::error::{Error, Result};
use crate::page_size::PageSize;
use std::fmt;

/// A run of text placed at a point on the page.
///
/// Coordinates are in points from the bottom-left corner of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// A single page of a [`Document`](crate::Document).
///
/// Pages are created by [`Document::add_page`](crate::Document::add_page),
/// which assigns the page number. Text can only be appended.
#[derive(Debug, Clone)]
pub struct Page {
    size: PageSize,
    number: u32,
    document: DocumentId,
    fragments: Vec<TextFragment>,
}

impl Page {
    pub(crate) fn new(size: PageSize, number: u32, document: DocumentId) -> Self {
        Page {
            size,
            number,
            document,
            fragments: Vec::new(),
        }
    }

    /// Place `text` at (`x`, `y`).
    ///
    /// Positions outside the page box are accepted and simply fall outside
    /// the visible area. Coordinates must be finite.
    pub fn add_text(&mut self, text: impl Into<String>, x: f64, y: f64) -> Result<&mut Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::invalid_argument(format!(
                "text position must be finite, got ({}, {})",
                x, y
            )));
        }
        self.fragments.push(TextFragment {
            text: text.into(),
            x,
            y,
        });
        Ok(self)
    }

    pub fn size(&self) -> &PageSize {
        &self.size
    }

    /// 1-based position in the owning document.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Identifier of the document this page belongs to.
    pub fn document_id(&self) -> DocumentId {
        self.document
    }

    pub fn fragments(&self) -> &[TextFragment] {
        &self.fragments
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Page {} ({}) - {} content elements",
            self.number,
            self.size.name(),
            self.fragments.len()
        )
    }
}
