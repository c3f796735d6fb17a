//! # Ledger Event Schemas
//!
//! Names and payloads of the events emitted as a side effect of proposal
//! transitions. Two consumers exist: the handler organization named in the
//! proposal (business-side handling and cross-ledger mirroring) and the
//! generic timeout watcher that invalidates proposals never confirmed.
//!
//! Delivery is best-effort: the state machine attempts emission and does
//! not block state commitment on the outcome.

use serde::{Deserialize, Serialize};

use crate::error::ProposalError;

/// Suffix of the handler-scoped creation event; the full name is the
/// handler string followed by this suffix (e.g. `Bob_PROPOSAL_CREATED`).
pub const CREATED_HANDLER_EVENT_SUFFIX: &str = "_PROPOSAL_CREATED";

/// Name of the generic creation event consumed by the timeout watcher.
pub const CREATED_TIMEOUT_EVENT: &str = "PROPOSAL_CREATED";

/// Name of the confirmation event that discloses the pre-image.
pub const CONFIRMED_EVENT: &str = "PROPOSAL_CONFIRMED";

/// Full name of the handler-scoped creation event for a handler.
pub fn created_event_name(handler: &str) -> String {
    format!("{handler}{CREATED_HANDLER_EVENT_SUFFIX}")
}

/// Payload of both creation events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalCreated {
    /// The proposal the event announces.
    #[serde(rename = "proposalId")]
    pub proposal_id: String,
}

/// Payload of the confirmation event.
///
/// Carries the disclosed pre-image in the clear: disclosure is the purpose
/// of the event — the relaying agent uses it to confirm the mirrored
/// commitment on the other ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalConfirmed {
    /// The proposal that was confirmed.
    #[serde(rename = "proposalId")]
    pub proposal_id: String,

    /// The disclosed secret whose digest equals the stored hash.
    #[serde(rename = "preImage")]
    pub pre_image: String,
}

impl ProposalCreated {
    /// Encode the payload to its JSON wire form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ProposalError> {
        serde_json::to_vec(self)
            .map_err(|e| ProposalError::Collaborator(format!("error encoding event payload: {e}")))
    }

    /// Decode a creation event payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProposalError> {
        serde_json::from_slice(bytes)
            .map_err(|e| ProposalError::Collaborator(format!("error parsing event payload: {e}")))
    }
}

impl ProposalConfirmed {
    /// Encode the payload to its JSON wire form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ProposalError> {
        serde_json::to_vec(self)
            .map_err(|e| ProposalError::Collaborator(format!("error encoding event payload: {e}")))
    }

    /// Decode a confirmation event payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProposalError> {
        serde_json::from_slice(bytes)
            .map_err(|e| ProposalError::Collaborator(format!("error parsing event payload: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_event_name_is_handler_prefixed() {
        assert_eq!(created_event_name("Bob"), "Bob_PROPOSAL_CREATED");
        assert_eq!(created_event_name("Charlie"), "Charlie_PROPOSAL_CREATED");
    }

    #[test]
    fn test_created_payload_wire_format() {
        let payload = ProposalCreated {
            proposal_id: "prop1234".into(),
        };
        let json = String::from_utf8(payload.to_bytes().unwrap()).unwrap();
        assert_eq!(json, r#"{"proposalId":"prop1234"}"#);
    }

    #[test]
    fn test_confirmed_payload_wire_format() {
        let payload = ProposalConfirmed {
            proposal_id: "prop1234".into(),
            pre_image: "test_hash".into(),
        };
        let json = String::from_utf8(payload.to_bytes().unwrap()).unwrap();
        assert_eq!(json, r#"{"proposalId":"prop1234","preImage":"test_hash"}"#);
    }

    #[test]
    fn test_confirmed_payload_roundtrip() {
        let payload = ProposalConfirmed {
            proposal_id: "p1".into(),
            pre_image: "secret".into(),
        };
        let decoded = ProposalConfirmed::from_bytes(&payload.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_malformed_payload_is_collaborator_failure() {
        assert!(ProposalCreated::from_bytes(b"nope").unwrap_err().is_collaborator());
        assert!(ProposalConfirmed::from_bytes(b"{}").is_err());
    }
}
