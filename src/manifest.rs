//! JSON document manifests.
//!
//! A manifest describes a whole document (metadata, page sizes, text) so it
//! can be rendered without writing Rust:
//!
//! ```json
//! {
//!   "title": "Quarterly Report",
//!   "author": "Finance",
//!   "default_size": "Letter",
//!   "pages": [
//!     { "text": [ { "text": "Summary", "x": 72, "y": 720 } ] },
//!     { "size": "A4 landscape", "text": [] }
//!   ]
//! }
//! ```

use crate::document::Document;
use crate::error::{Error, Result};
use crate::page_size::PageSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    /// Page size string, see [`PageSize`]'s `FromStr`. Defaults to A4.
    #[serde(default)]
    pub default_size: Option<String>,
    #[serde(default)]
    pub pages: Vec<PageManifest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageManifest {
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub text: Vec<TextManifest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextManifest {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::invalid_argument(format!("invalid manifest: {}", e)))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build the document the manifest describes.
    pub fn into_document(self) -> Result<Document> {
        let mut doc = Document::new();
        doc.metadata_mut().title = self.title;
        doc.metadata_mut().author = self.author;

        if let Some(size) = &self.default_size {
            doc.set_default_page_size(size.parse()?);
        }

        for (index, page_manifest) in self.pages.into_iter().enumerate() {
            let page = match &page_manifest.size {
                Some(size) => {
                    let size: PageSize = size.parse().map_err(|e| {
                        Error::invalid_argument(format!("page {}: {}", index + 1, e))
                    })?;
                    doc.add_page_with_size(size)?
                }
                None => doc.add_page()?,
            };
            for text in page_manifest.text {
                page.add_text(text.text, text.x, text.y)?;
            }
        }

        log::debug!("built {} from manifest", doc);
        Ok(doc)
    }
}
