use serde::{Deserialize, Serialize};

/// Upload size ceiling shared by every store implementation.
pub const MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

/// Content types accepted for supporting documents.
pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["application/pdf", "image/jpeg", "image/png"];

/// Stable reference handed back by a document store; the `stored_as` name is
/// what gets submitted with the loan application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub stored_as: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// Outbound storage hook for supporting documents (disk, object store, ...).
pub trait DocumentStore: Send + Sync {
    fn store(&self, original_name: &str, bytes: &[u8]) -> Result<StoredDocument, DocumentError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("empty upload")]
    Empty,
    #[error("document exceeds the {MAX_DOCUMENT_BYTES} byte limit")]
    TooLarge,
    #[error("unsupported document type '{detected}' (PDF, JPEG, or PNG required)")]
    UnsupportedType { detected: String },
    #[error("document storage unavailable: {0}")]
    Unavailable(String),
}

/// Normalize a client-supplied file name into something safe to store:
/// path components are stripped and whitespace collapses to hyphens.
pub fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original)
        .trim();

    let mut sanitized = String::with_capacity(base.len());
    let mut last_was_hyphen = false;
    for ch in base.chars() {
        let mapped = if ch.is_whitespace() { '-' } else { ch };
        if mapped == '-' && last_was_hyphen {
            continue;
        }
        last_was_hyphen = mapped == '-';
        sanitized.push(mapped);
    }

    if sanitized.is_empty() {
        "document".to_string()
    } else {
        sanitized
    }
}
