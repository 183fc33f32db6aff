//! Test fixtures: minimal document blobs and upload forms.

use axum_test::multipart::{MultipartForm, Part};

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// Small PDF-looking payload.
pub fn create_minimal_pdf() -> Vec<u8> {
    b"%PDF-1.4\n1 0 obj << /Type /Catalog >> endobj\ntrailer << /Root 1 0 R >>\n%%EOF\n".to_vec()
}

pub fn file_part(data: Vec<u8>, filename: &str, mime: &str) -> Part {
    Part::bytes(data).file_name(filename).mime_type(mime)
}

/// Form with uid and all three documents.
pub fn complete_form(uid: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("uid", uid.to_string())
        .add_part(
            "previousResults",
            file_part(create_minimal_pdf(), "results.pdf", "application/pdf"),
        )
        .add_part(
            "studentIdCopy",
            file_part(create_minimal_png(), "student id.PNG", "image/png"),
        )
        .add_part(
            "guardianIdCopy",
            file_part(create_minimal_png(), "guardian.jpeg", "image/jpeg"),
        )
}
