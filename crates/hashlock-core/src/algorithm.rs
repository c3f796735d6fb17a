//! # Hash Algorithm Tokens
//!
//! The recognized digest algorithms for hash commitments, with parsing of
//! the exact wire tokens (`SHA256`, `SHA384`, `SHA512`).
//!
//! ## Security Invariant
//!
//! Token matching is exact and case-sensitive. `sha256` or `Sha-256` are
//! not aliases — accepting near-miss tokens would let two ledgers record
//! the same commitment under different verification rules.

use serde::{Deserialize, Serialize};

/// A digest algorithm recognized for hash commitments.
///
/// Serializes as the exact wire token (`"SHA256"`, `"SHA384"`, `"SHA512"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// SHA-256 (32-byte digest).
    #[serde(rename = "SHA256")]
    Sha256,
    /// SHA-384 (48-byte digest).
    #[serde(rename = "SHA384")]
    Sha384,
    /// SHA-512 (64-byte digest).
    #[serde(rename = "SHA512")]
    Sha512,
}

/// All recognized algorithms, in the order they are advertised to callers.
pub const RECOGNIZED_ALGORITHMS: [HashAlgorithm; 3] = [
    HashAlgorithm::Sha256,
    HashAlgorithm::Sha384,
    HashAlgorithm::Sha512,
];

impl HashAlgorithm {
    /// Returns the wire token for this algorithm (e.g. `"SHA256"`).
    pub fn token(&self) -> &'static str {
        match self {
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
        }
    }

    /// Parse a wire token. Exact, case-sensitive match only.
    pub fn parse(token: &str) -> Option<Self> {
        RECOGNIZED_ALGORITHMS
            .into_iter()
            .find(|alg| alg.token() == token)
    }

    /// The recognized tokens joined for error messages:
    /// `"SHA256, SHA384, SHA512"`.
    pub fn supported_tokens() -> String {
        RECOGNIZED_ALGORITHMS
            .iter()
            .map(|alg| alg.token())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}
