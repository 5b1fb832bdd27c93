use crate::content_stream::{self, BASE_FONT, FONT_RESOURCE};
use crate::document::Document;
use crate::page::Page;

/// Leading bytes of every file: version line and a binary-marker comment.
pub const PDF_HEADER: &[u8] = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n";

// --- Low-level PDF object model ---

/// Collects numbered objects for one file and writes them out with a
/// cross-reference table. A generator lives for a single serialization.
pub struct PdfGenerator {
    objects: Vec<PdfObj>,
    next_id: u32,
    root: Option<u32>,
}

#[derive(Debug)]
pub struct PdfObj {
    pub id: u32,
    pub generation: u16,
    pub body: ObjBody,
}

#[derive(Debug)]
pub enum ObjBody {
    /// Number handed out by [`PdfGenerator::reserve_id`], not yet defined.
    Reserved,
    Dictionary(String),
    Stream { dictionary: String, data: Vec<u8> },
}

impl PdfGenerator {
    pub fn new() -> Self {
        PdfGenerator {
            objects: Vec::new(),
            next_id: 1,
            root: None,
        }
    }

    /// Allocate the next object number without content. The object keeps its
    /// place in the file and is defined later with [`set_object`](Self::set_object).
    pub fn reserve_id(&mut self) -> u32 {
        self.push(ObjBody::Reserved)
    }

    pub fn add_object(&mut self, content: String) -> u32 {
        self.push(ObjBody::Dictionary(content))
    }

    /// Add a stream object. `/Length` is filled in from `data`.
    pub fn add_stream_object(&mut self, data: Vec<u8>) -> u32 {
        let dictionary = format!("<< /Length {} >>\n", data.len());
        self.push(ObjBody::Stream { dictionary, data })
    }

    /// Define a previously reserved object. Returns false if `id` was never
    /// allocated by this generator.
    pub fn set_object(&mut self, id: u32, content: String) -> bool {
        match self.objects.iter_mut().find(|obj| obj.id == id) {
            Some(obj) => {
                obj.body = ObjBody::Dictionary(content);
                true
            }
            None => false,
        }
    }

    /// Object the trailer names as `/Root`.
    pub fn set_root(&mut self, id: u32) {
        self.root = Some(id);
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn push(&mut self, body: ObjBody) -> u32 {
        let id = self.next_id;
        self.objects.push(PdfObj {
            id,
            generation: 0,
            body,
        });
        self.next_id += 1;
        id
    }

    /// Write header, objects, xref table and trailer.
    pub fn generate(&self) -> Vec<u8> {
        let mut pdf = Vec::new();

        pdf.extend_from_slice(PDF_HEADER);

        // Offsets are taken right before each object header is appended.
        let mut offsets = Vec::with_capacity(self.objects.len());
        for obj in &self.objects {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} {} obj\n", obj.id, obj.generation).as_bytes());

            match &obj.body {
                ObjBody::Dictionary(content) => pdf.extend_from_slice(content.as_bytes()),
                ObjBody::Stream { dictionary, data } => {
                    pdf.extend_from_slice(dictionary.as_bytes());
                    pdf.extend_from_slice(b"stream\n");
                    pdf.extend_from_slice(data);
                    pdf.extend_from_slice(b"\nendstream\n");
                }
                ObjBody::Reserved => {
                    debug_assert!(false, "object {} reserved but never defined", obj.id);
                    pdf.extend_from_slice(b"null\n");
                }
            }

            pdf.extend_from_slice(b"endobj\n");
            log::trace!("object {} at offset {}", obj.id, offsets.last().copied().unwrap_or(0));
        }

        // xref table
        let xref_offset = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n", self.objects.len() + 1).as_bytes());
        pdf.extend_from_slice(b"0000000000 65535 f \n");

        for offset in offsets {
            pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }

        // trailer
        pdf.extend_from_slice(b"trailer\n");
        pdf.extend_from_slice(b"<<\n");
        pdf.extend_from_slice(format!("/Size {}\n", self.objects.len() + 1).as_bytes());
        if let Some(root) = self.root {
            pdf.extend_from_slice(format!("/Root {} 0 R\n", root).as_bytes());
        }
        pdf.extend_from_slice(b">>\n");
        pdf.extend_from_slice(b"startxref\n");
        pdf.extend_from_slice(format!("{}\n", xref_offset).as_bytes());
        pdf.extend_from_slice(b"%%EOF\n");

        pdf
    }
}

impl Default for PdfGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// --- Document object graph ---

/// Serialize a document into a complete PDF file.
///
/// Object layout: 1 is the catalog, 2 the page tree, then for each page its
/// content stream followed by the page object. The page tree is defined
/// once every page number is known.
pub fn generate_pdf_bytes(document: &Document) -> Vec<u8> {
    let mut generator = PdfGenerator::new();

    let catalog_id = generator.reserve_id();
    let pages_id = generator.reserve_id();

    let mut page_ids = Vec::with_capacity(document.page_count());
    for page in document.pages() {
        let content_id = generator.add_stream_object(content_stream::encode_page(page));
        let page_id = generator.add_object(page_dictionary(page, pages_id, content_id));
        page_ids.push(page_id);
    }

    let tree_defined = generator.set_object(pages_id, page_tree_dictionary(&page_ids));
    let catalog_defined = generator.set_object(catalog_id, catalog_dictionary(pages_id));
    debug_assert!(tree_defined && catalog_defined, "reserved objects must be defined");
    generator.set_root(catalog_id);

    let pdf = generator.generate();
    log::debug!(
        "serialized {} pages into {} objects ({} bytes)",
        page_ids.len(),
        generator.object_count(),
        pdf.len()
    );
    pdf
}

fn catalog_dictionary(pages_id: u32) -> String {
    format!(
        "<< /Type /Catalog\n\
         /Pages {} 0 R\n\
         >>\n",
        pages_id
    )
}

fn page_tree_dictionary(page_ids: &[u32]) -> String {
    let kids: Vec<String> = page_ids.iter().map(|id| format!("{} 0 R", id)).collect();
    format!(
        "<< /Type /Pages\n\
         /Kids [{}]\n\
         /Count {}\n\
         >>\n",
        kids.join(" "),
        page_ids.len()
    )
}

fn page_dictionary(page: &Page, parent_id: u32, content_id: u32) -> String {
    let size = page.size();
    format!(
        "<< /Type /Page\n\
         /Parent {} 0 R\n\
         /MediaBox [0 0 {} {}]\n\
         /Contents {} 0 R\n\
         /Resources << /Font << /{} {} >> >>\n\
         >>\n",
        parent_id,
        content_stream::format_number(size.width()),
        content_stream::format_number(size.height()),
        content_id,
        FONT_RESOURCE,
        font_dictionary()
    )
}

fn font_dictionary() -> String {
    format!(
        "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
        BASE_FONT
    )
}
