use std::collections::HashSet;

use bytes::Bytes;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::errors::AppError;

pub const MAX_FILES: usize = 10;
pub const MAX_FILE_BYTES: usize = 20 * 1024 * 1024;
/// Cap on the whole multipart body, applied as the route's body limit.
pub const MAX_REQUEST_BYTES: usize = 64 * 1024 * 1024;

const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "application/pdf"];

/// One contract page or document submitted for analysis.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Validates the declared content type (falling back to the file extension)
    /// and the size limit.
    pub fn new(
        file_name: String,
        content_type: Option<&str>,
        bytes: Bytes,
    ) -> Result<Self, AppError> {
        let mime_type = content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
            .filter(|ct| ACCEPTED_MIME_TYPES.contains(&ct.as_str()))
            .or_else(|| mime_from_extension(&file_name).map(String::from))
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Unsupported file type for '{file_name}' (expected PNG, JPG or PDF)"
                ))
            })?;

        if bytes.is_empty() {
            return Err(AppError::Validation(format!("File '{file_name}' is empty")));
        }
        if bytes.len() > MAX_FILE_BYTES {
            return Err(AppError::Validation(format!(
                "File '{file_name}' exceeds the {} MiB limit",
                MAX_FILE_BYTES / (1024 * 1024)
            )));
        }

        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}

fn mime_from_extension(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

/// Drops byte-identical re-uploads, keeping the first occurrence of each file.
/// Returns the kept files and how many duplicates were removed.
pub fn dedup_files(files: Vec<UploadedFile>) -> (Vec<UploadedFile>, usize) {
    let mut seen = HashSet::new();
    let total = files.len();
    let kept: Vec<UploadedFile> = files
        .into_iter()
        .filter(|f| seen.insert(f.digest()))
        .collect();
    let dropped = total - kept.len();
    if dropped > 0 {
        info!("Dropped {dropped} duplicate upload(s)");
    }
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, body: &'static [u8]) -> UploadedFile {
        UploadedFile::new(name.to_string(), None, Bytes::from_static(body)).unwrap()
    }

    #[test]
    fn test_mime_inferred_from_extension() {
        assert_eq!(file("page1.JPG", b"x").mime_type, "image/jpeg");
        assert_eq!(file("contract.pdf", b"x").mime_type, "application/pdf");
    }

    #[test]
    fn test_content_type_parameters_are_ignored() {
        let f = UploadedFile::new(
            "scan".to_string(),
            Some("image/png; charset=binary"),
            Bytes::from_static(b"x"),
        )
        .unwrap();
        assert_eq!(f.mime_type, "image/png");
    }

    #[test]
    fn test_unsupported_type_rejected() {
        let err = UploadedFile::new("notes.txt".to_string(), Some("text/plain"), Bytes::from_static(b"x"))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_file_size_limit() {
        let at_limit = UploadedFile::new("big.pdf".to_string(), None, Bytes::from(vec![0u8; MAX_FILE_BYTES]));
        assert!(at_limit.is_ok());

        let err = UploadedFile::new(
            "too-big.pdf".to_string(),
            None,
            Bytes::from(vec![0u8; MAX_FILE_BYTES + 1]),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("20 MiB")));
    }

    #[test]
    fn test_empty_file_rejected() {
        assert!(UploadedFile::new("a.png".to_string(), None, Bytes::new()).is_err());
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let files = vec![
            file("a.png", b"page-one"),
            file("b.png", b"page-two"),
            file("a-copy.png", b"page-one"),
        ];
        let (kept, dropped) = dedup_files(files);
        assert_eq!(dropped, 1);
        let names: Vec<_> = kept.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_digest_is_sha256_hex() {
        let f = file("a.png", b"abc");
        assert_eq!(
            f.digest(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
