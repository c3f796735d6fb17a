//! # Pre-Image Verifier
//!
//! The acceptance decision for a disclosed secret: parse the recorded
//! algorithm token, digest the candidate pre-image, compare hex strings
//! case-insensitively.
//!
//! ## Security Invariant
//!
//! The comparison is not constant-time. The recorded hash is public by
//! construction (it is published on both ledgers to enable the swap) and
//! only the pre-image is secret, so a timing oracle over the comparison
//! reveals nothing an observer does not already have.

use hashlock_core::HashAlgorithm;
use thiserror::Error;

use crate::digest::digest_hex;

/// Why a pre-image was not accepted.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VerifyError {
    /// The recorded algorithm token is not recognized — the commitment
    /// cannot be verified at all. Distinct from a mismatch.
    #[error("the hash algorithm recorded in the proposal is not supported: {0:?}")]
    UnsupportedAlgorithm(String),

    /// The candidate pre-image's digest does not equal the recorded hash.
    #[error("invalid pre-image supplied")]
    Mismatch,
}

/// Decide whether `pre_image` is valid for a commitment recorded as
/// `stored_hash` under the algorithm named by `token`.
///
/// `token` is the string recorded in the stored entry; it is re-parsed
/// here so that an entry carrying a foreign token fails with
/// [`VerifyError::UnsupportedAlgorithm`] rather than being misread.
pub fn verify_preimage(token: &str, pre_image: &str, stored_hash: &str) -> Result<(), VerifyError> {
    let algorithm = HashAlgorithm::parse(token)
        .ok_or_else(|| VerifyError::UnsupportedAlgorithm(token.to_string()))?;
    if commitment_matches(algorithm, pre_image, stored_hash) {
        Ok(())
    } else {
        Err(VerifyError::Mismatch)
    }
}

/// Case-insensitive digest equality for an already-parsed algorithm.
pub fn commitment_matches(algorithm: HashAlgorithm, pre_image: &str, stored_hash: &str) -> bool {
    digest_hex(algorithm, pre_image.as_bytes()).eq_ignore_ascii_case(stored_hash)
}
