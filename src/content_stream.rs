//! Page content streams.
//!
//! Every page gets one text object using the document's single font. Each
//! fragment is positioned with a `Td`, shown with `Tj`, then the move is
//! undone with a second `Td` so the next fragment's coordinates are again
//! relative to the page origin.

use crate::page::{Page, TextFragment};

/// Resource name the content streams use to select the font.
pub const FONT_RESOURCE: &str = "F1";
/// The built-in Type1 face every page uses.
pub const BASE_FONT: &str = "Helvetica";
/// Font size in points.
pub const FONT_SIZE: u32 = 12;

/// Builds the operator sequence for one page's text object.
pub struct ContentStreamBuilder {
    current: Vec<u8>,
}

impl ContentStreamBuilder {
    /// Open a text object and select the font.
    pub fn new() -> Self {
        let mut current = Vec::new();
        current.extend_from_slice(b"BT\n");
        current.extend_from_slice(format!("/{} {} Tf\n", FONT_RESOURCE, FONT_SIZE).as_bytes());
        ContentStreamBuilder { current }
    }

    /// Show `text` with its baseline origin at (`x`, `y`), then move back.
    pub fn emit_fragment(&mut self, text: &str, x: f64, y: f64) {
        self.move_to(x, y);
        self.current.push(b'(');
        self.current.extend_from_slice(&escape_pdf_bytes(&encode_win_ansi(text)));
        self.current.extend_from_slice(b") Tj\n");
        self.move_to(-x, -y);
    }

    fn move_to(&mut self, dx: f64, dy: f64) {
        self.current
            .extend_from_slice(format!("{} {} Td\n", format_number(dx), format_number(dy)).as_bytes());
    }

    /// Close the text object and return the stream body.
    pub fn finish(mut self) -> Vec<u8> {
        self.current.extend_from_slice(b"ET\n");
        self.current
    }
}

impl Default for ContentStreamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a page's fragments, in insertion order, as a content stream body.
pub fn encode_page(page: &Page) -> Vec<u8> {
    encode_fragments(page.fragments())
}

pub fn encode_fragments(fragments: &[TextFragment]) -> Vec<u8> {
    let mut builder = ContentStreamBuilder::new();
    for fragment in fragments {
        builder.emit_fragment(&fragment.text, fragment.x, fragment.y);
    }
    builder.finish()
}

/// Format a coordinate with two decimals, never as `-0.00`.
pub fn format_number(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    if formatted == "-0.00" {
        "0.00".to_string()
    } else {
        formatted
    }
}

/// Escape a byte string for use inside a PDF literal string `( … )`.
pub fn escape_pdf_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'(' => out.extend_from_slice(b"\\("),
            b')' => out.extend_from_slice(b"\\)"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\t' => out.extend_from_slice(b"\\t"),
            _ => out.push(b),
        }
    }
    out
}

/// Map text onto WinAnsiEncoding, the encoding declared on the page font.
/// Characters with no WinAnsi code become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        '\u{0000}'..='\u{007F}' => c as u8,
        '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
        '\u{20AC}' => 0x80, // Euro sign
        '\u{201A}' => 0x82, // Single low-9 quotation mark
        '\u{0192}' => 0x83, // Latin small f with hook
        '\u{201E}' => 0x84, // Double low-9 quotation mark
        '\u{2026}' => 0x85, // Horizontal ellipsis
        '\u{2020}' => 0x86, // Dagger
        '\u{2021}' => 0x87, // Double dagger
        '\u{02C6}' => 0x88, // Modifier letter circumflex accent
        '\u{2030}' => 0x89, // Per mille sign
        '\u{0160}' => 0x8A, // Latin capital S with caron
        '\u{2039}' => 0x8B, // Single left-pointing angle quotation
        '\u{0152}' => 0x8C, // Latin capital ligature OE
        '\u{017D}' => 0x8E, // Latin capital Z with caron
        '\u{2018}' => 0x91, // Left single quotation mark
        '\u{2019}' => 0x92, // Right single quotation mark
        '\u{201C}' => 0x93, // Left double quotation mark
        '\u{201D}' => 0x94, // Right double quotation mark
        '\u{2022}' => 0x95, // Bullet
        '\u{2013}' => 0x96, // En dash
        '\u{2014}' => 0x97, // Em dash
        '\u{02DC}' => 0x98, // Small tilde
        '\u{2122}' => 0x99, // Trade mark sign
        '\u{0161}' => 0x9A, // Latin small s with caron
        '\u{203A}' => 0x9B, // Single right-pointing angle quotation
        '\u{0153}' => 0x9C, // Latin small ligature oe
        '\u{017E}' => 0x9E, // Latin small z with caron
        '\u{0178}' => 0x9F, // Latin capital Y with diaeresis
        _ => b'?',
    }
}
