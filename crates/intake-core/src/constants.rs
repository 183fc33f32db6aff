//! Shared constants: path conventions and upload rules.

/// Public route prefix under which stored files are served.
pub const UPLOADS_ROUTE_PREFIX: &str = "/uploads/applications";

/// Default on-disk directory for stored uploads (relative to the working directory).
pub const DEFAULT_UPLOAD_DIR: &str = "uploads/applications";

/// Extensions accepted for uploaded documents (compared lowercase).
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

/// Parent path of every pending application record in the metadata store.
pub const PENDING_APPLICATIONS_PATH: &str = "application/pending";

/// Default Realtime Database endpoint used when `FIREBASE_DATABASE_URL` is unset.
pub const DEFAULT_FIREBASE_DATABASE_URL: &str =
    "https://ehlazeni-star-school-default-rtdb.firebaseio.com/";

/// Metadata store path holding the record for `uid`: `application/pending/{uid}`.
pub fn record_path(uid: &str) -> String {
    format!("{}/{}", PENDING_APPLICATIONS_PATH, uid)
}

/// Whether `filename` ends in one of [`ALLOWED_EXTENSIONS`].
///
/// Only the suffix after the last `.` is inspected, case-insensitively. A name
/// without any `.` is rejected.
pub fn has_allowed_extension(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_path_nests_uid_under_pending() {
        assert_eq!(record_path("abc123"), "application/pending/abc123");
    }

    #[test]
    fn allowed_extension_is_case_insensitive() {
        assert!(has_allowed_extension("results.PDF"));
        assert!(has_allowed_extension("id.JpEg"));
        assert!(has_allowed_extension("scan.tar.png"));
    }

    #[test]
    fn disallowed_or_missing_extension_is_rejected() {
        assert!(!has_allowed_extension("malware.exe"));
        assert!(!has_allowed_extension("pdf"));
        assert!(!has_allowed_extension("results.pdf.zip"));
        assert!(!has_allowed_extension("trailing."));
    }
}
