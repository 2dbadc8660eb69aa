use std::fs;
use std::path::PathBuf;

use super::*;

fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("overlay-doc-test-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn pdf_with_magic_is_accepted() {
    let path = temp_file("paper.pdf", b"%PDF-1.7\n%...");
    assert!(check_file_type(&path).is_ok());
}

#[test]
fn uppercase_extension_is_accepted() {
    let path = temp_file("PAPER.PDF", b"%PDF-1.4\n");
    assert!(check_file_type(&path).is_ok());
}

#[test]
fn wrong_extension_is_unsupported() {
    let path = temp_file("notes.txt", b"%PDF-1.7\n");
    assert!(matches!(check_file_type(&path), Err(DocumentError::UnsupportedFileType(_))));
}

#[test]
fn missing_extension_is_unsupported() {
    let path = temp_file("paper", b"%PDF-1.7\n");
    assert!(matches!(check_file_type(&path), Err(DocumentError::UnsupportedFileType(_))));
}

#[test]
fn pdf_extension_without_magic_is_unsupported() {
    let path = temp_file("fake.pdf", b"GIF89a....");
    assert!(matches!(check_file_type(&path), Err(DocumentError::UnsupportedFileType(_))));
}

#[test]
fn truncated_pdf_is_unsupported() {
    let path = temp_file("short.pdf", b"%PD");
    assert!(matches!(check_file_type(&path), Err(DocumentError::UnsupportedFileType(_))));
}

#[test]
fn missing_file_is_io_error() {
    let path = std::env::temp_dir().join(format!("missing-{}.pdf", uuid::Uuid::new_v4()));
    assert!(matches!(check_file_type(&path), Err(DocumentError::Io(_))));
}

#[test]
fn error_messages_are_readable() {
    let err = DocumentError::InvalidPageIndex { page: 9, page_count: 3 };
    assert_eq!(err.to_string(), "page 9 is out of range (document has 3 pages)");
    assert_eq!(DocumentError::EmptyDocument.to_string(), "document has no pages");
}
