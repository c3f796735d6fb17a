//! # hashlock-crypto — Hash-Commitment Verification
//!
//! Decides whether a candidate pre-image is valid for a recorded
//! commitment. Pure functions over the pre-image bytes, the recorded hex
//! digest, and the recorded algorithm token — no state, no side effects.
//!
//! ## Acceptance Rule
//!
//! The digest is computed over the raw bytes of the candidate pre-image
//! exactly as supplied (no trimming, no normalization), hex-encoded in
//! lowercase, and compared **case-insensitively** against the recorded
//! hash string. Equality is the sole acceptance criterion.
//!
//! ## Failure Distinction
//!
//! An unrecognized algorithm token at verification time
//! ([`VerifyError::UnsupportedAlgorithm`]) is a distinct failure from a
//! mismatched digest ([`VerifyError::Mismatch`]) — callers must be able to
//! tell "cannot verify" apart from "verification failed".

pub mod digest;
pub mod verifier;

pub use digest::digest_hex;
pub use verifier::{commitment_matches, verify_preimage, VerifyError};
