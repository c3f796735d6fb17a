//! # The Hash-Timelock State Machine
//!
//! [`HashTimelock`] enforces the proposal lifecycle on one ledger:
//! `create` records a `PENDING` commitment, `confirm` applies a disclosed
//! pre-image and moves it to `CONFIRMED`, `invalidate` removes a still-
//! pending commitment. Events are emitted best-effort as part of each
//! successful transition; persistence is delegated to the ledger's store.
//!
//! ## Security Invariant
//!
//! - A pre-image is accepted only if its digest, computed with the
//!   algorithm recorded at creation, equals the recorded hash
//!   (case-insensitively). There is no other acceptance path.
//! - `CONFIRMED` never regresses: confirm never rewrites a confirmed
//!   entry, and invalidate refuses anything that is not `PENDING`.
//! - No failed operation partially applies — every error return leaves
//!   the stored entry exactly as it was found.

use tracing::{debug, info, warn};

use hashlock_core::{
    created_event_name, proposal_key, HashAlgorithm, Proposal, ProposalConfirmed, ProposalCreated,
    ProposalEntry, ProposalError, ProposalStatus, CONFIRMED_EVENT, CREATED_TIMEOUT_EVENT,
};
use hashlock_crypto::{verify_preimage, VerifyError};

use crate::events::EventSink;
use crate::guard::{Operation, TransitionContext, TransitionGuard};
use crate::store::ProposalStore;

/// The proposal lifecycle state machine for a single ledger.
///
/// Holds the ledger's store, its event sink, and the deployment's
/// transition guards. Operations are synchronous and issue exactly one
/// read and at most one write against the store.
pub struct HashTimelock<S, E> {
    store: S,
    events: E,
    guards: Vec<Box<dyn TransitionGuard>>,
}

impl<S: ProposalStore, E: EventSink> HashTimelock<S, E> {
    /// Create a machine over the given store and event sink, with no
    /// transition guards.
    pub fn new(store: S, events: E) -> Self {
        Self {
            store,
            events,
            guards: Vec::new(),
        }
    }

    /// Add a transition guard. Guards run in registration order and
    /// compose by logical AND.
    pub fn with_guard(mut self, guard: impl TransitionGuard + 'static) -> Self {
        self.guards.push(Box::new(guard));
        self
    }

    /// Access the ledger's store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Access the ledger's event sink.
    pub fn events(&self) -> &E {
        &self.events
    }

    // ─── Operations ──────────────────────────────────────────────────

    /// Record a new commitment as `PENDING`.
    ///
    /// `proposal_json` must parse into a proposal with non-empty
    /// `proposalId` and `proposalHandler`; `hash` is stored exactly as
    /// supplied; `algorithm` must be one of the recognized tokens.
    ///
    /// Any prior entry under the same id is silently replaced — the
    /// overwrite is logged at WARN but not rejected. On success two
    /// creation events are emitted (handler-scoped and generic), each
    /// best-effort.
    ///
    /// Returns the proposal id as an acknowledgement; the caller chose it.
    pub fn create(
        &self,
        proposal_json: &str,
        hash: &str,
        algorithm: &str,
    ) -> Result<String, ProposalError> {
        let algorithm = HashAlgorithm::parse(algorithm).ok_or_else(|| {
            ProposalError::InvalidArgument(format!(
                "only these hashing algorithms are supported: {}",
                HashAlgorithm::supported_tokens()
            ))
        })?;
        if hash.is_empty() {
            return Err(ProposalError::InvalidArgument(
                "no hash provided for proposal".into(),
            ));
        }
        let proposal = Proposal::parse(proposal_json)?;
        proposal.validate()?;

        let entry = ProposalEntry::pending(proposal, hash, algorithm);
        self.run_guards(Operation::Create, &entry)?;

        let key = entry.storage_key();
        if let Ok(Some(_)) = self.store.get(&key) {
            warn!(
                proposal_id = %entry.proposal.proposal_id,
                "create is overwriting an existing proposal entry"
            );
        }
        self.store
            .put(&key, &entry.to_bytes()?)
            .map_err(|e| ProposalError::Collaborator(e.to_string()))?;

        let payload = ProposalCreated {
            proposal_id: entry.proposal.proposal_id.clone(),
        };
        // One event scoped to the declared handler, one for the generic
        // timeout-watcher channel; identical payloads, both best-effort.
        self.emit(&created_event_name(&entry.proposal.handler), payload.to_bytes());
        self.emit(CREATED_TIMEOUT_EVENT, payload.to_bytes());

        info!(
            proposal_id = %entry.proposal.proposal_id,
            handler = %entry.proposal.handler,
            algorithm = %entry.hash_algorithm,
            "proposal created"
        );
        Ok(entry.proposal.proposal_id)
    }

    /// Apply a disclosed pre-image to a pending commitment.
    ///
    /// Verifies the pre-image against the recorded hash and algorithm,
    /// then persists `status = CONFIRMED` and emits the confirmation
    /// event carrying the pre-image in the clear. Verification failure
    /// leaves the entry untouched.
    ///
    /// Confirming an entry that is already `CONFIRMED` re-verifies the
    /// pre-image and succeeds, but neither rewrites the entry nor
    /// re-emits the event — a replayed confirmation must not trigger a
    /// second round of external side effects.
    pub fn confirm(&self, proposal_id: &str, pre_image: &str) -> Result<(), ProposalError> {
        let key = proposal_key(proposal_id);
        let mut entry = self.load(proposal_id, &key)?;
        self.run_guards(Operation::Confirm, &entry)?;

        verify_preimage(&entry.hash_algorithm, pre_image, &entry.hash).map_err(|e| match e {
            VerifyError::UnsupportedAlgorithm(token) => {
                ProposalError::UnsupportedAlgorithm(token)
            }
            VerifyError::Mismatch => {
                debug!(proposal_id, "pre-image digest mismatch");
                ProposalError::VerificationFailed
            }
        })?;

        if entry.status == ProposalStatus::Confirmed {
            debug!(proposal_id, "already confirmed; suppressing duplicate confirmation event");
            return Ok(());
        }

        entry.status = ProposalStatus::Confirmed;
        self.store
            .put(&key, &entry.to_bytes()?)
            .map_err(|e| ProposalError::Collaborator(e.to_string()))?;

        let payload = ProposalConfirmed {
            proposal_id: proposal_id.to_string(),
            pre_image: pre_image.to_string(),
        };
        self.emit(CONFIRMED_EVENT, payload.to_bytes());

        info!(proposal_id, "proposal confirmed");
        Ok(())
    }

    /// Remove a still-pending commitment.
    ///
    /// This is the timeout path: a watcher that saw the creation event
    /// and never saw a confirmation calls this once the external window
    /// elapses. Confirmed commitments can never be invalidated.
    pub fn invalidate(&self, proposal_id: &str) -> Result<(), ProposalError> {
        let key = proposal_key(proposal_id);
        let entry = self.load(proposal_id, &key)?;
        self.run_guards(Operation::Invalidate, &entry)?;

        if entry.status != ProposalStatus::Pending {
            return Err(ProposalError::IllegalState {
                proposal_id: proposal_id.to_string(),
                status: entry.status.name().to_string(),
                reason: "only pending proposals can be invalidated".into(),
            });
        }

        self.store
            .delete(&key)
            .map_err(|e| ProposalError::Collaborator(e.to_string()))?;

        info!(proposal_id, "proposal invalidated");
        Ok(())
    }

    /// Read the stored entry for a proposal, if any.
    pub fn proposal(&self, proposal_id: &str) -> Result<Option<ProposalEntry>, ProposalError> {
        let key = proposal_key(proposal_id);
        match self
            .store
            .get(&key)
            .map_err(|e| ProposalError::Collaborator(e.to_string()))?
        {
            Some(bytes) => Ok(Some(ProposalEntry::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    // ─── Dispatch ────────────────────────────────────────────────────

    /// Route a positional string-argument invocation to an operation.
    ///
    /// `create` expects `[proposalJSON, hash, hashAlgorithm]`, `confirm`
    /// expects `[proposalId, preImage]`, `invalidate` expects
    /// `[proposalId]`. Wrong arity and unknown operation names are
    /// `InvalidArgument`. Returns the created proposal id for `create`,
    /// `None` otherwise.
    pub fn dispatch(
        &self,
        operation: &str,
        args: &[String],
    ) -> Result<Option<String>, ProposalError> {
        match (operation, args) {
            ("create", [proposal_json, hash, algorithm]) => {
                self.create(proposal_json, hash, algorithm).map(Some)
            }
            ("create", _) => Err(ProposalError::InvalidArgument(
                "invalid arguments to create, expected proposal, hash, hashAlgorithm".into(),
            )),
            ("confirm", [proposal_id, pre_image]) => {
                self.confirm(proposal_id, pre_image).map(|_| None)
            }
            ("confirm", _) => Err(ProposalError::InvalidArgument(
                "invalid arguments to confirm, expected proposalId, preImage".into(),
            )),
            ("invalidate", [proposal_id]) => self.invalidate(proposal_id).map(|_| None),
            ("invalidate", _) => Err(ProposalError::InvalidArgument(
                "invalid arguments to invalidate, expected proposalId".into(),
            )),
            (unknown, _) => Err(ProposalError::InvalidArgument(format!(
                "unknown operation {unknown:?}"
            ))),
        }
    }

    // ─── Internals ───────────────────────────────────────────────────

    fn load(&self, proposal_id: &str, key: &str) -> Result<ProposalEntry, ProposalError> {
        let bytes = self
            .store
            .get(key)
            .map_err(|e| ProposalError::Collaborator(e.to_string()))?
            .ok_or_else(|| ProposalError::not_found(proposal_id))?;
        ProposalEntry::from_bytes(&bytes)
    }

    fn run_guards(&self, operation: Operation, entry: &ProposalEntry) -> Result<(), ProposalError> {
        let ctx = TransitionContext { operation, entry };
        for guard in &self.guards {
            if let Err(veto) = guard.authorize(&ctx) {
                debug!(
                    proposal_id = %entry.proposal.proposal_id,
                    %operation,
                    reason = %veto.reason,
                    "transition vetoed by guard"
                );
                return Err(ProposalError::InvalidArgument(format!(
                    "{operation} vetoed: {}",
                    veto.reason
                )));
            }
        }
        Ok(())
    }

    /// Best-effort emission: failures (including payload encoding) are
    /// logged and swallowed; the state transition stands either way.
    fn emit(&self, name: &str, payload: Result<Vec<u8>, ProposalError>) {
        let payload = match payload {
            Ok(p) => p,
            Err(e) => {
                warn!(event = name, error = %e, "failed to encode event payload");
                return;
            }
        };
        if let Err(e) = self.events.emit(name, &payload) {
            warn!(event = name, error = %e, "failed to emit event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventError, RecordingSink};
    use crate::guard::GuardVeto;
    use crate::store::MemoryStore;

    const HASH_SHA256: &str = "6b70a820eb978882fa49b199c853a5676e5e1a4744371be5affd4b3af1f5dde6";

    fn machine() -> HashTimelock<MemoryStore, RecordingSink> {
        HashTimelock::new(MemoryStore::new(), RecordingSink::new())
    }

    fn proposal_json(id: &str, handler: &str) -> String {
        format!(r#"{{"proposalId":"{id}","proposalHandler":"{handler}"}}"#)
    }

    #[test]
    fn test_create_returns_the_supplied_id() {
        let m = machine();
        let id = m
            .create(&proposal_json("p1", "Bob"), HASH_SHA256, "SHA256")
            .unwrap();
        assert_eq!(id, "p1");
    }

    #[test]
    fn test_create_rejects_empty_hash() {
        let m = machine();
        let err = m
            .create(&proposal_json("p1", "Bob"), "", "SHA256")
            .unwrap_err();
        assert!(matches!(err, ProposalError::InvalidArgument(_)));
        assert!(m.store().is_empty());
    }

    #[test]
    fn test_create_rejects_unknown_algorithm_before_any_write() {
        let m = machine();
        let err = m
            .create(
                &proposal_json("p1", "Bob"),
                HASH_SHA256,
                "My-Awesome-Hashing-Alg",
            )
            .unwrap_err();
        assert!(err.to_string().contains("SHA256, SHA384, SHA512"));
        assert!(m.store().is_empty());
        assert!(m.events().events().is_empty());
    }

    #[test]
    fn test_create_rejects_malformed_proposal() {
        let m = machine();
        assert!(m.create("{not json", HASH_SHA256, "SHA256").is_err());
        assert!(m.store().is_empty());
    }

    #[test]
    fn test_confirm_unknown_id_is_not_found() {
        let m = machine();
        let err = m.confirm("ghost", "test_hash").unwrap_err();
        assert!(matches!(err, ProposalError::NotFound { .. }));
    }

    #[test]
    fn test_confirm_bad_preimage_leaves_entry_pending() {
        let m = machine();
        m.create(&proposal_json("p1", "Bob"), HASH_SHA256, "SHA256")
            .unwrap();
        let err = m.confirm("p1", "wrong_secret").unwrap_err();
        assert!(matches!(err, ProposalError::VerificationFailed));
        let entry = m.proposal("p1").unwrap().unwrap();
        assert_eq!(entry.status, ProposalStatus::Pending);
    }

    #[test]
    fn test_confirm_stored_foreign_algorithm_is_unsupported() {
        // Plant an entry carrying a token creation would have rejected,
        // as a foreign implementation could.
        let m = machine();
        let json = r#"{"proposal":{"proposalId":"p1","proposalHandler":"Bob"},"status":"PENDING","hash":"ab","hashAlgorithm":"BLAKE3"}"#;
        m.store().put("_proposal_p1", json.as_bytes()).unwrap();
        let err = m.confirm("p1", "anything").unwrap_err();
        assert!(matches!(err, ProposalError::UnsupportedAlgorithm(_)));
    }

    #[test]
    fn test_duplicate_confirm_succeeds_without_second_event() {
        let m = machine();
        m.create(&proposal_json("p1", "Bob"), HASH_SHA256, "SHA256")
            .unwrap();
        m.confirm("p1", "test_hash").unwrap();
        m.confirm("p1", "test_hash").unwrap();
        let confirmations = m
            .events()
            .names()
            .into_iter()
            .filter(|n| n == CONFIRMED_EVENT)
            .count();
        assert_eq!(confirmations, 1);
    }

    #[test]
    fn test_duplicate_confirm_still_requires_valid_preimage() {
        let m = machine();
        m.create(&proposal_json("p1", "Bob"), HASH_SHA256, "SHA256")
            .unwrap();
        m.confirm("p1", "test_hash").unwrap();
        let err = m.confirm("p1", "wrong_secret").unwrap_err();
        assert!(matches!(err, ProposalError::VerificationFailed));
    }

    #[test]
    fn test_invalidate_then_confirm_is_not_found() {
        let m = machine();
        m.create(&proposal_json("p1", "Bob"), HASH_SHA256, "SHA256")
            .unwrap();
        m.invalidate("p1").unwrap();
        let err = m.confirm("p1", "test_hash").unwrap_err();
        assert!(matches!(err, ProposalError::NotFound { .. }));
    }

    #[test]
    fn test_invalidate_confirmed_is_illegal_state() {
        let m = machine();
        m.create(&proposal_json("p1", "Bob"), HASH_SHA256, "SHA256")
            .unwrap();
        m.confirm("p1", "test_hash").unwrap();
        let err = m.invalidate("p1").unwrap_err();
        assert!(matches!(err, ProposalError::IllegalState { .. }));
        // The entry survives the attempt.
        assert!(m.proposal("p1").unwrap().is_some());
    }

    #[test]
    fn test_dispatch_arity_checks() {
        let m = machine();
        for (op, args) in [
            ("create", vec!["only-one-arg".to_string()]),
            ("confirm", vec!["p1".to_string()]),
            ("invalidate", vec![]),
            ("invalidate", vec!["p1".to_string(), "extra".to_string()]),
        ] {
            let err = m.dispatch(op, &args).unwrap_err();
            assert!(
                matches!(err, ProposalError::InvalidArgument(_)),
                "{op} with {} args should be rejected",
                args.len()
            );
        }
    }

    #[test]
    fn test_dispatch_unknown_operation() {
        let m = machine();
        let err = m.dispatch("upgrade", &[]).unwrap_err();
        assert!(err.to_string().contains("upgrade"));
    }

    #[test]
    fn test_dispatch_routes_create() {
        let m = machine();
        let args = vec![
            proposal_json("p1", "Bob"),
            HASH_SHA256.to_string(),
            "SHA256".to_string(),
        ];
        assert_eq!(m.dispatch("create", &args).unwrap(), Some("p1".into()));
    }

    #[test]
    fn test_guard_veto_aborts_with_no_state_change() {
        struct DenyAll;
        impl TransitionGuard for DenyAll {
            fn authorize(&self, _ctx: &TransitionContext<'_>) -> Result<(), GuardVeto> {
                Err(GuardVeto::new("policy says no"))
            }
        }
        let m = machine().with_guard(DenyAll);
        let err = m
            .create(&proposal_json("p1", "Bob"), HASH_SHA256, "SHA256")
            .unwrap_err();
        assert!(err.to_string().contains("policy says no"));
        assert!(m.store().is_empty());
        assert!(m.events().events().is_empty());
    }

    #[test]
    fn test_failing_sink_does_not_block_create() {
        struct FailingSink;
        impl EventSink for FailingSink {
            fn emit(&self, _name: &str, _payload: &[u8]) -> Result<(), EventError> {
                Err(EventError::Transport("bus is down".into()))
            }
        }
        let m = HashTimelock::new(MemoryStore::new(), FailingSink);
        m.create(&proposal_json("p1", "Bob"), HASH_SHA256, "SHA256")
            .unwrap();
        assert_eq!(
            m.proposal("p1").unwrap().unwrap().status,
            ProposalStatus::Pending
        );
    }

    #[test]
    fn test_failing_sink_does_not_block_confirm() {
        struct FailingSink;
        impl EventSink for FailingSink {
            fn emit(&self, _name: &str, _payload: &[u8]) -> Result<(), EventError> {
                Err(EventError::Transport("bus is down".into()))
            }
        }
        let m = HashTimelock::new(MemoryStore::new(), FailingSink);
        m.create(&proposal_json("p1", "Bob"), HASH_SHA256, "SHA256")
            .unwrap();
        m.confirm("p1", "test_hash").unwrap();
        assert_eq!(
            m.proposal("p1").unwrap().unwrap().status,
            ProposalStatus::Confirmed
        );
    }
}
