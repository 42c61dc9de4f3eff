//! SHA-256 checksums in the `sha256:<hex>` form

use sha2::{Digest, Sha256};

const PREFIX: &str = "sha256:";

/// Checksum of string content.
pub fn compute_content_checksum(content: &str) -> String {
    compute_bytes_checksum(content.as_bytes())
}

/// Checksum of raw bytes.
pub fn compute_bytes_checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_known_value() {
        assert_eq!(
            compute_content_checksum("hello world"),
            "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn content_and_bytes_agree() {
        assert_eq!(
            compute_content_checksum("region: hidden"),
            compute_bytes_checksum(b"region: hidden")
        );
    }
}
