//! # Digest Computation
//!
//! Computes the commitment digest for each recognized algorithm and
//! renders it as lowercase hex, the canonical encoding every comparison
//! in the stack is performed against.

use hashlock_core::HashAlgorithm;
use sha2::{Digest, Sha256, Sha384, Sha512};

/// Compute the digest of `data` under `algorithm`, hex-encoded lowercase.
pub fn digest_hex(algorithm: HashAlgorithm, data: &[u8]) -> String {
    match algorithm {
        HashAlgorithm::Sha256 => hex_string(&Sha256::digest(data)),
        HashAlgorithm::Sha384 => hex_string(&Sha384::digest(data)),
        HashAlgorithm::Sha512 => hex_string(&Sha512::digest(data)),
    }
}

/// Render bytes as a lowercase hex string.
fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Vectors cross-checked against Python hashlib over the same inputs.

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            digest_hex(HashAlgorithm::Sha256, b"test_hash"),
            "6b70a820eb978882fa49b199c853a5676e5e1a4744371be5affd4b3af1f5dde6"
        );
    }

    #[test]
    fn test_sha384_known_vector() {
        assert_eq!(
            digest_hex(HashAlgorithm::Sha384, b"test_hash"),
            "708af8efbb882bb662a5a5f19d3164133621266903cec7ee0ce9eca950a7b7f8d09defedb4474da4257274741f2a07a8"
        );
    }

    #[test]
    fn test_sha512_known_vector() {
        assert_eq!(
            digest_hex(HashAlgorithm::Sha512, b"test_hash"),
            "5a32f0967623012cdd4c29257f808f3f209184e992c39dc6d931f89831e7b1eb9379f9e3a20da09eb06d0ca53bd9c0845dda91baed17a713c0cac8a24259c0b9"
        );
    }

    #[test]
    fn test_empty_preimage_digests() {
        assert_eq!(
            digest_hex(HashAlgorithm::Sha256, b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            digest_hex(HashAlgorithm::Sha512, b""),
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        );
    }

    #[test]
    fn test_digest_lengths() {
        assert_eq!(digest_hex(HashAlgorithm::Sha256, b"x").len(), 64);
        assert_eq!(digest_hex(HashAlgorithm::Sha384, b"x").len(), 96);
        assert_eq!(digest_hex(HashAlgorithm::Sha512, b"x").len(), 128);
    }

    #[test]
    fn test_digest_is_lowercase() {
        let hex = digest_hex(HashAlgorithm::Sha256, b"test_hash");
        assert_eq!(hex, hex.to_lowercase());
    }

    #[test]
    fn test_no_input_normalization() {
        // The bytes are hashed exactly as supplied; whitespace is significant.
        assert_ne!(
            digest_hex(HashAlgorithm::Sha256, b"test_hash"),
            digest_hex(HashAlgorithm::Sha256, b" test_hash"),
        );
        assert_ne!(
            digest_hex(HashAlgorithm::Sha256, b"test_hash"),
            digest_hex(HashAlgorithm::Sha256, b"test_hash\n"),
        );
    }
}
