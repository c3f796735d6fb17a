//! # Proposal Records
//!
//! The caller-supplied [`Proposal`] payload, the persisted [`ProposalEntry`]
//! record, and the [`ProposalStatus`] lifecycle states.
//!
//! ## Wire Format
//!
//! The persisted record is JSON with fixed field names and order:
//!
//! ```json
//! {"proposal":{"proposalId":"<id>","proposalHandler":"<handler>"},
//!  "status":"PENDING","hash":"<hex>","hashAlgorithm":"SHA256"}
//! ```
//!
//! Interoperability with the protocol's other participants depends on this
//! exact shape — every field is pinned with an explicit serde attribute.
//!
//! ## Security Invariant
//!
//! `hash` and `hashAlgorithm` are immutable once recorded; only `status`
//! mutates over an entry's lifetime. Deletion of the record is the third,
//! implicit terminal state — indistinguishable from "never existed".

use serde::{Deserialize, Serialize};

use crate::algorithm::HashAlgorithm;
use crate::error::ProposalError;

/// Prefix for proposal storage keys.
pub const PROPOSAL_KEY_PREFIX: &str = "_proposal_";

/// Compute the storage key for a proposal id.
pub fn proposal_key(proposal_id: &str) -> String {
    format!("{PROPOSAL_KEY_PREFIX}{proposal_id}")
}

// ─── Proposal ────────────────────────────────────────────────────────

/// The caller-supplied proposal payload.
///
/// Opaque to the protocol beyond its two required fields. Missing fields
/// deserialize as empty strings and are rejected by [`Proposal::validate`],
/// matching the lenient-parse / strict-validate split of the operation
/// contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Caller-chosen identifier; correlates the same commitment across
    /// independent ledgers.
    #[serde(rename = "proposalId", default)]
    pub proposal_id: String,

    /// The organization/role intended to consume the creation event.
    #[serde(rename = "proposalHandler", default)]
    pub handler: String,
}

impl Proposal {
    /// Parse a proposal from its JSON payload.
    ///
    /// Unknown fields are ignored; missing required fields surface through
    /// [`Proposal::validate`], not here.
    pub fn parse(payload: &str) -> Result<Self, ProposalError> {
        serde_json::from_str(payload).map_err(|e| {
            ProposalError::InvalidArgument(format!("error parsing provided proposal: {e}"))
        })
    }

    /// Check the two required fields are populated.
    pub fn validate(&self) -> Result<(), ProposalError> {
        if self.proposal_id.is_empty() {
            return Err(ProposalError::InvalidArgument(
                "no proposalId provided as part of proposal".into(),
            ));
        }
        if self.handler.is_empty() {
            // Anything beyond non-emptiness is a deployment policy concern,
            // enforced by transition guards rather than the record type.
            return Err(ProposalError::InvalidArgument(
                "no proposalHandler provided as part of proposal".into(),
            ));
        }
        Ok(())
    }

    /// The storage key this proposal's entry lives under.
    pub fn storage_key(&self) -> String {
        proposal_key(&self.proposal_id)
    }
}

// ─── ProposalStatus ──────────────────────────────────────────────────

/// Lifecycle status of a stored proposal entry.
///
/// Deletion of the entry is the third, implicit terminal state; it has no
/// variant here because an invalidated proposal has no record at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalStatus {
    /// Committed but not yet confirmed; the pre-image is still secret.
    Pending,
    /// The pre-image was disclosed and verified. Terminal.
    Confirmed,
}

impl ProposalStatus {
    /// Returns the canonical status name (`"PENDING"`, `"CONFIRMED"`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
        }
    }

    /// Whether this status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ─── ProposalEntry ───────────────────────────────────────────────────

/// The persisted record for one proposal on one ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalEntry {
    /// The caller-supplied payload, stored verbatim.
    pub proposal: Proposal,

    /// Current lifecycle status.
    pub status: ProposalStatus,

    /// Hex-encoded commitment digest, stored exactly as supplied (case
    /// preserved) and compared case-insensitively at confirmation time.
    pub hash: String,

    /// The algorithm token recorded at creation. Kept as a string at rest
    /// so entries with a foreign token remain readable; re-parsed at
    /// verification time.
    #[serde(rename = "hashAlgorithm")]
    pub hash_algorithm: String,
}

impl ProposalEntry {
    /// Build a fresh `PENDING` entry for a validated proposal.
    pub fn pending(proposal: Proposal, hash: impl Into<String>, algorithm: HashAlgorithm) -> Self {
        Self {
            proposal,
            status: ProposalStatus::Pending,
            hash: hash.into(),
            hash_algorithm: algorithm.token().to_string(),
        }
    }

    /// The storage key this entry lives under.
    pub fn storage_key(&self) -> String {
        self.proposal.storage_key()
    }

    /// Encode to the fixed JSON wire format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ProposalError> {
        serde_json::to_vec(self)
            .map_err(|e| ProposalError::Collaborator(format!("error encoding proposal entry: {e}")))
    }

    /// Decode a stored record.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProposalError> {
        serde_json::from_slice(bytes).map_err(|e| {
            ProposalError::Collaborator(format!("error parsing stored proposal entry: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> ProposalEntry {
        ProposalEntry::pending(
            Proposal {
                proposal_id: "prop1234".into(),
                handler: "Bob".into(),
            },
            "6b70a820eb978882fa49b199c853a5676e5e1a4744371be5affd4b3af1f5dde6",
            HashAlgorithm::Sha256,
        )
    }

    #[test]
    fn test_proposal_key_prefix() {
        assert_eq!(proposal_key("prop1234"), "_proposal_prop1234");
    }

    #[test]
    fn test_parse_valid_proposal() {
        let p = Proposal::parse(r#"{"proposalId":"p1","proposalHandler":"Bob"}"#).unwrap();
        assert_eq!(p.proposal_id, "p1");
        assert_eq!(p.handler, "Bob");
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let p = Proposal::parse(
            r#"{"proposalId":"p1","proposalHandler":"Bob","amount":100,"memo":"x"}"#,
        )
        .unwrap();
        assert_eq!(p.proposal_id, "p1");
    }

    #[test]
    fn test_parse_malformed_json_is_invalid_argument() {
        let err = Proposal::parse("not json").unwrap_err();
        assert!(matches!(err, ProposalError::InvalidArgument(_)));
    }

    #[test]
    fn test_validate_rejects_missing_id() {
        let p = Proposal::parse(r#"{"proposalHandler":"Bob"}"#).unwrap();
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("proposalId"));
    }

    #[test]
    fn test_validate_rejects_missing_handler() {
        let p = Proposal::parse(r#"{"proposalId":"p1"}"#).unwrap();
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("proposalHandler"));
    }

    #[test]
    fn test_status_names() {
        assert_eq!(ProposalStatus::Pending.name(), "PENDING");
        assert_eq!(ProposalStatus::Confirmed.name(), "CONFIRMED");
        assert!(!ProposalStatus::Pending.is_terminal());
        assert!(ProposalStatus::Confirmed.is_terminal());
    }

    #[test]
    fn test_entry_wire_format_field_order() {
        let entry = sample_entry();
        let json = String::from_utf8(entry.to_bytes().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"proposal":{"proposalId":"prop1234","proposalHandler":"Bob"},"status":"PENDING","hash":"6b70a820eb978882fa49b199c853a5676e5e1a4744371be5affd4b3af1f5dde6","hashAlgorithm":"SHA256"}"#
        );
    }

    #[test]
    fn test_entry_roundtrip() {
        let entry = sample_entry();
        let bytes = entry.to_bytes().unwrap();
        let decoded = ProposalEntry::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn test_entry_with_foreign_algorithm_token_still_decodes() {
        // An entry written by another implementation with a token we do not
        // recognize must remain readable; rejection happens at verification.
        let json = r#"{"proposal":{"proposalId":"p1","proposalHandler":"Bob"},"status":"PENDING","hash":"ab","hashAlgorithm":"BLAKE3"}"#;
        let entry = ProposalEntry::from_bytes(json.as_bytes()).unwrap();
        assert_eq!(entry.hash_algorithm, "BLAKE3");
    }

    #[test]
    fn test_corrupt_record_is_collaborator_failure() {
        let err = ProposalEntry::from_bytes(b"{garbage").unwrap_err();
        assert!(err.is_collaborator());
    }

    #[test]
    fn test_entry_hash_case_preserved() {
        let entry = ProposalEntry::pending(
            Proposal {
                proposal_id: "p1".into(),
                handler: "Bob".into(),
            },
            "6B70A820EB978882FA49B199C853A5676E5E1A4744371BE5AFFD4B3AF1F5DDE6",
            HashAlgorithm::Sha256,
        );
        let decoded = ProposalEntry::from_bytes(&entry.to_bytes().unwrap()).unwrap();
        assert!(decoded.hash.starts_with("6B70"));
    }
}
