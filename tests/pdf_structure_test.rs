use pdftickle::{Document, PageSize};
use proptest::prelude::*;

/// Parsed tail of a generated file.
struct XrefInfo {
    start: usize,
    offsets: Vec<usize>,
    size: usize,
    root: String,
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

/// Read the xref table and trailer the way a reader would: start from
/// `startxref` at the end of the file.
fn parse_xref(pdf: &[u8]) -> XrefInfo {
    let startxref = rfind(pdf, b"startxref\n").expect("startxref present");
    let tail = String::from_utf8_lossy(&pdf[startxref..]).to_string();
    let start: usize = tail.lines().nth(1).unwrap().trim().parse().unwrap();

    let table = String::from_utf8_lossy(&pdf[start..startxref]).to_string();
    let mut lines = table.lines();
    assert_eq!(lines.next(), Some("xref"));
    let header = lines.next().unwrap();
    let count: usize = header.split(' ').nth(1).unwrap().parse().unwrap();
    assert_eq!(lines.next(), Some("0000000000 65535 f "));

    let mut offsets = Vec::new();
    for _ in 1..count {
        let line = lines.next().unwrap();
        assert_eq!(line.len(), 19, "fixed-width entry: {:?}", line);
        assert!(line.ends_with(" 00000 n "));
        offsets.push(line[..10].parse().unwrap());
    }

    assert_eq!(lines.next(), Some("trailer"));
    assert_eq!(lines.next(), Some("<<"));
    let size: usize = lines.next().unwrap().strip_prefix("/Size ").unwrap().parse().unwrap();
    let root = lines.next().unwrap().strip_prefix("/Root ").unwrap().to_string();
    assert_eq!(lines.next(), Some(">>"));

    XrefInfo { start, offsets, size, root }
}

fn assert_offsets_valid(pdf: &[u8]) {
    let xref = parse_xref(pdf);
    assert_eq!(xref.size, xref.offsets.len() + 1);
    for (i, offset) in xref.offsets.iter().enumerate() {
        let expected = format!("{} 0 obj\n", i + 1);
        assert!(
            pdf[*offset..].starts_with(expected.as_bytes()),
            "object {} not at offset {}",
            i + 1,
            offset
        );
    }
    assert!(pdf[xref.start..].starts_with(b"xref\n"));
}

fn sample_document() -> Document {
    let mut doc = Document::with_title("Sample", Some("Tester"));
    doc.add_page()
        .unwrap()
        .add_text("Welcome to pdftickle!", 100.0, 700.0)
        .unwrap()
        .add_text("This is an A4 page", 100.0, 650.0)
        .unwrap();
    doc.add_page_with_size(PageSize::LETTER)
        .unwrap()
        .add_text("Parens (like these) and \\ slashes", 72.0, 720.0)
        .unwrap();
    doc.add_page_with_size(PageSize::custom(400.0, 600.0).unwrap())
        .unwrap()
        .add_text("Custom sized page", 50.0, 550.0)
        .unwrap();
    doc
}

#[test]
fn end_to_end_single_page() {
    let mut doc = Document::with_title("T", None);
    doc.add_page_with_size(PageSize::A4)
        .unwrap()
        .add_text("Hi", 10.0, 20.0)
        .unwrap();

    let pdf = doc.to_bytes().unwrap();
    let text = String::from_utf8_lossy(&pdf).to_string();

    assert!(pdf.starts_with(b"%PDF-1.4\n%"));
    assert_eq!(text.matches("/Type /Page\n").count(), 1);
    assert_eq!(text.matches("stream\n").count() - text.matches("endstream\n").count(), 1);
    assert!(text.contains("10.00 20.00 Td\n(Hi) Tj\n-10.00 -20.00 Td\n"));
    assert!(text.contains("/MediaBox [0 0 595.28 841.89]"));

    let xref = parse_xref(&pdf);
    assert_eq!(xref.root, "1 0 R");
    assert_eq!(xref.size, 5);
    assert_offsets_valid(&pdf);
    assert!(pdf.ends_with(b"%%EOF\n"));
}

#[test]
fn xref_offsets_match_objects() {
    let mut doc = sample_document();
    let pdf = doc.to_bytes().unwrap();
    assert_offsets_valid(&pdf);
    assert_eq!(parse_xref(&pdf).offsets.len(), 2 + 2 * 3);
}

#[test]
fn page_tree_count_matches_pages() {
    let mut doc = sample_document();
    let text = String::from_utf8_lossy(&doc.to_bytes().unwrap()).to_string();
    assert!(text.contains(&format!("/Count {}\n", doc.page_count())));
    assert!(text.contains("/Kids [4 0 R 6 0 R 8 0 R]"));
}

#[test]
fn stream_lengths_are_exact() {
    let mut doc = sample_document();
    let pdf = doc.to_bytes().unwrap();
    let text = String::from_utf8_lossy(&pdf).to_string();

    let mut search_from = 0;
    let mut streams = 0;
    while let Some(pos) = text[search_from..].find("<< /Length ") {
        let dict_start = search_from + pos + "<< /Length ".len();
        let dict_end = dict_start + text[dict_start..].find(" >>\n").unwrap();
        let length: usize = text[dict_start..dict_end].parse().unwrap();

        let data_start = dict_end + " >>\nstream\n".len();
        assert_eq!(&text[data_start + length..data_start + length + 11], "\nendstream\n");
        assert!(text[data_start..data_start + length].ends_with("ET\n"));

        streams += 1;
        search_from = data_start + length;
    }
    assert_eq!(streams, 3);
}

#[test]
fn a4_and_equivalent_custom_size_render_alike() {
    let mut a = Document::new();
    a.add_page().unwrap();
    let mut b = Document::new();
    b.add_page_with_size(PageSize::custom(595.28, 841.89).unwrap())
        .unwrap();

    assert_eq!(a.page(1).unwrap().size(), b.page(1).unwrap().size());
    assert_eq!(a.to_bytes().unwrap(), b.to_bytes().unwrap());
}

#[test]
fn serialization_is_repeatable() {
    let mut doc = sample_document();
    let first = doc.to_bytes().unwrap();
    let second = doc.to_bytes().unwrap();
    assert_eq!(first, second);
}

#[test]
fn escaped_text_in_output() {
    let mut doc = sample_document();
    let text = String::from_utf8_lossy(&doc.to_bytes().unwrap()).to_string();
    assert!(text.contains("(Parens \\(like these\\) and \\\\ slashes) Tj"));
}

#[test]
fn rotated_custom_size_in_media_box() {
    let size = PageSize::custom(400.0, 600.0).unwrap().rotate();
    assert_eq!(size.width(), 600.0);
    assert_eq!(size.height(), 400.0);

    let mut doc = Document::new();
    doc.add_page_with_size(size).unwrap();
    let text = String::from_utf8_lossy(&doc.to_bytes().unwrap()).to_string();
    assert!(text.contains("/MediaBox [0 0 600.00 400.00]"));
}

#[test]
fn page_numbers_follow_insertion() {
    let doc = sample_document();
    let numbers: Vec<u32> = doc.pages().iter().map(|p| p.number()).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn save_and_write_to_produce_same_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.pdf");

    let mut doc = sample_document();
    doc.save(&path).unwrap();
    let on_disk = std::fs::read(&path).unwrap();

    let mut streamed = Vec::new();
    doc.write_to(&mut streamed).unwrap();

    assert_eq!(on_disk, streamed);
    assert_offsets_valid(&on_disk);
}

#[test]
fn save_to_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.pdf");
    let mut doc = sample_document();
    assert!(matches!(doc.save(&path), Err(pdftickle::Error::Io(_))));
    assert!(!path.exists());
}

#[test]
fn non_ascii_text_uses_single_bytes() {
    let mut doc = Document::new();
    doc.add_page().unwrap().add_text("café €", 10.0, 10.0).unwrap();
    let pdf = doc.to_bytes().unwrap();
    assert!(find(&pdf, b"(caf\xE9 \x80) Tj").is_some());
    assert_offsets_valid(&pdf);
}

#[test]
fn huge_coordinates_and_sizes_stay_numeric() {
    let mut doc = Document::new();
    doc.add_page_with_size(PageSize::custom(1e307, 100.0).unwrap())
        .unwrap()
        .add_text("Hi", 1e307, 20.0)
        .unwrap();

    let pdf = doc.to_bytes().unwrap();
    let text = String::from_utf8_lossy(&pdf).to_string();
    assert!(!text.contains("inf"));
    assert!(!text.contains("NaN"));

    let huge = pdftickle::content_stream::format_number(1e307);
    assert!(text.contains(&format!("/MediaBox [0 0 {} 100.00]", huge)));
    assert!(text.contains(&format!("{} 20.00 Td\n(Hi) Tj\n-{} -20.00 Td\n", huge, huge)));
    assert_offsets_valid(&pdf);
}

proptest! {
    #[test]
    fn offsets_valid_for_any_content(
        pages in prop::collection::vec(
            prop::collection::vec((".{0,20}", -1000.0f64..2000.0, -1000.0f64..2000.0), 0..5),
            0..6,
        )
    ) {
        let mut doc = Document::new();
        for fragments in &pages {
            let page = doc.add_page().unwrap();
            for (text, x, y) in fragments {
                page.add_text(text.as_str(), *x, *y).unwrap();
            }
        }
        let pdf = doc.to_bytes().unwrap();
        assert_offsets_valid(&pdf);

        let text = String::from_utf8_lossy(&pdf).to_string();
        let count_marker = format!("/Count {}\n", pages.len());
        prop_assert!(text.contains(&count_marker));
    }
}
