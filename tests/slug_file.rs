use ai_rename::suggest::{SlugSuggester, Suggester};
use std::fs;
use tempfile::tempdir;

#[test]
fn text_file_slugs_from_leading_content() {
    let td = tempdir().unwrap();
    let f = td.path().join("untitled.txt");
    fs::write(&f, "Annual Performance Review 2024\n\nlots of body text").unwrap();

    let suggester = SlugSuggester::new(6, 2048);
    let stem = suggester.suggest(&f).unwrap();
    assert_eq!(stem, "annual-performance-review-2024-lots-of");
}

#[test]
fn read_budget_limits_how_far_we_look() {
    let td = tempdir().unwrap();
    let f = td.path().join("big.txt");
    let content = format!("{}interesting words at the end", "x".repeat(64));
    fs::write(&f, content).unwrap();

    // budget covers only the x-run, which is one giant word
    let suggester = SlugSuggester::new(6, 32);
    let stem = suggester.suggest(&f).unwrap();
    assert_eq!(stem, "x".repeat(32));
}

#[test]
fn non_utf8_bytes_do_not_break_the_slug() {
    let td = tempdir().unwrap();
    let f = td.path().join("mixed.txt");
    let mut bytes = b"Backup Log ".to_vec();
    bytes.extend([0xff, 0xfe, 0xc3]);
    bytes.extend(b" continued");
    fs::write(&f, bytes).unwrap();

    let suggester = SlugSuggester::new(6, 2048);
    let stem = suggester.suggest(&f).unwrap();
    assert!(stem.starts_with("backup-log"));
}

#[test]
fn pdf_gets_ascii_scraped() {
    let td = tempdir().unwrap();
    let f = td.path().join("doc.pdf");
    let mut bytes = b"%PDF-1.4\x00\x01\x02".to_vec();
    bytes.extend(b"Invoice March");
    bytes.extend([0x80, 0x81]);
    fs::write(&f, bytes).unwrap();

    let suggester = SlugSuggester::new(6, 2048);
    let stem = suggester.suggest(&f).unwrap();
    assert!(stem.contains("invoice-march"), "got: {stem}");
}

#[test]
fn missing_file_is_a_typed_error() {
    let td = tempdir().unwrap();
    let suggester = SlugSuggester::new(6, 2048);
    let err = suggester.suggest(&td.path().join("nope.txt")).unwrap_err();
    assert_eq!(err.code(), "source_not_found");
}
