use passage_text_chunker::Document;
use sha2::{Digest, Sha256};

/// Metadata key carrying a document's content fingerprint.
pub const FINGERPRINT_KEY: &str = "fingerprint";

/// SHA-256 hex digest of the text, used as the deduplication key.
#[must_use]
pub fn content_fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Fingerprint salted by a caller-supplied scope (for example a session or
/// conversation id), so identical content can be re-ingested across scopes.
#[must_use]
pub fn salted_fingerprint(text: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b"\n");
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Read a document's fingerprint from its metadata, if present.
#[must_use]
pub fn fingerprint_of(document: &Document) -> Option<&str> {
    document.metadata_str(FINGERPRINT_KEY)
}

/// Stamp a document with the fingerprint of its own content.
#[must_use]
pub fn with_fingerprint(document: Document) -> Document {
    let fingerprint = content_fingerprint(&document.text);
    document.with_metadata(FINGERPRINT_KEY, fingerprint)
}
