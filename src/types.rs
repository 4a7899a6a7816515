//! Core types for Merkle root computation.

use crate::error::ApiError;

/// Length in bytes of every digest produced by the supported hash functions.
pub const DIGEST_LEN: usize = 32;

/// Digest: 256-bit output of a leaf hash or a pair combination
pub type Digest = [u8; DIGEST_LEN];

/// Render a digest as lowercase hex.
pub fn to_hex(digest: &Digest) -> String {
    hex::encode(digest)
}

/// Parse a lowercase or uppercase hex string into a digest.
///
/// Fails unless the string decodes to exactly [`DIGEST_LEN`] bytes.
pub fn from_hex(s: &str) -> Result<Digest, ApiError> {
    let bytes = hex::decode(s.trim())
        .map_err(|e| ApiError::InvalidDigest(format!("{}: {}", s, e)))?;
    Digest::try_from(bytes.as_slice()).map_err(|_| {
        ApiError::InvalidDigest(format!(
            "expected {} bytes, got {}",
            DIGEST_LEN,
            bytes.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let digest: Digest = [0xab; DIGEST_LEN];
        let encoded = to_hex(&digest);
        assert_eq!(encoded.len(), 64);
        assert_eq!(from_hex(&encoded).unwrap(), digest);
    }

    #[test]
    fn test_from_hex_rejects_wrong_length() {
        let err = from_hex("abcd").unwrap_err();
        assert!(matches!(err, ApiError::InvalidDigest(_)));
    }

    #[test]
    fn test_from_hex_rejects_non_hex() {
        assert!(from_hex(&"zz".repeat(32)).is_err());
    }
}
