//! # Confirmation Relay and Creation Mirror
//!
//! The relaying party's two jobs: after a creation event, mirror the
//! commitment onto the second ledger; after a confirmation event, carry
//! the disclosed pre-image back to the first ledger and confirm there.
//!
//! The relay is deliberately dumb — it trusts nothing it cannot verify
//! and verifies nothing itself. The target ledger's own state machine
//! re-verifies the pre-image against its own stored hash, so a malicious
//! or buggy relay can at worst fail to relay; it can never force a false
//! confirmation.

use thiserror::Error;
use tracing::{debug, info};

use hashlock_core::{Proposal, ProposalConfirmed, ProposalError, CONFIRMED_EVENT};
use hashlock_state::{EmittedEvent, EventSink, HashTimelock, ProposalStore};

/// Failure in a relaying operation.
#[derive(Error, Debug)]
pub enum RelayError {
    /// A harvested event payload did not decode.
    #[error("malformed event payload for {event:?}: {detail}")]
    Payload {
        /// The event whose payload was unreadable.
        event: String,
        /// Decoder detail.
        detail: String,
    },

    /// The proposal to mirror has no entry on the source ledger.
    #[error("proposal {0:?} has no entry on the source ledger")]
    MissingSource(String),

    /// The target ledger rejected the relayed operation.
    #[error("target ledger rejected relayed operation: {0}")]
    Target(#[from] ProposalError),
}

/// Copy a pending commitment from one ledger to another.
///
/// Reads the entry for `proposal_id` on `source` and creates the same
/// commitment (same id, same hash, same algorithm) on `target`, addressed
/// to `handler` — the consuming organization on the target side, which
/// need not match the source side's handler.
pub fn mirror_creation<S1, E1, S2, E2>(
    source: &HashTimelock<S1, E1>,
    target: &HashTimelock<S2, E2>,
    proposal_id: &str,
    handler: &str,
) -> Result<(), RelayError>
where
    S1: ProposalStore,
    E1: EventSink,
    S2: ProposalStore,
    E2: EventSink,
{
    let entry = source
        .proposal(proposal_id)?
        .ok_or_else(|| RelayError::MissingSource(proposal_id.to_string()))?;

    let proposal = Proposal {
        proposal_id: proposal_id.to_string(),
        handler: handler.to_string(),
    };
    let payload = serde_json::to_string(&proposal)
        .map_err(|e| ProposalError::Collaborator(format!("error encoding proposal: {e}")))?;

    target.create(&payload, &entry.hash, &entry.hash_algorithm)?;
    info!(proposal_id, handler, "mirrored commitment onto target ledger");
    Ok(())
}

/// Harvests disclosed pre-images from one ledger's confirmation events
/// and replays them onto another ledger.
///
/// Feed it events with [`ConfirmationRelay::observe`] (non-confirmation
/// events are ignored), then drain the backlog onto a target with
/// [`ConfirmationRelay::replay`].
#[derive(Debug, Default)]
pub struct ConfirmationRelay {
    pending: Vec<ProposalConfirmed>,
}

impl ConfirmationRelay {
    /// Create a relay with no backlog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect one event; harvest it if it is a confirmation.
    ///
    /// Returns whether the event was harvested.
    pub fn observe(&mut self, event: &EmittedEvent) -> Result<bool, RelayError> {
        if event.name != CONFIRMED_EVENT {
            return Ok(false);
        }
        let disclosure =
            ProposalConfirmed::from_bytes(&event.payload).map_err(|e| RelayError::Payload {
                event: event.name.clone(),
                detail: e.to_string(),
            })?;
        debug!(proposal_id = %disclosure.proposal_id, "harvested disclosed pre-image");
        self.pending.push(disclosure);
        Ok(true)
    }

    /// Inspect a batch of events in order.
    pub fn observe_all<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a EmittedEvent>,
    ) -> Result<usize, RelayError> {
        let mut harvested = 0;
        for event in events {
            if self.observe(event)? {
                harvested += 1;
            }
        }
        Ok(harvested)
    }

    /// Number of harvested disclosures awaiting replay.
    pub fn backlog(&self) -> usize {
        self.pending.len()
    }

    /// Replay every harvested disclosure onto `target`, in harvest order.
    ///
    /// Stops at the first rejection, leaving the failed disclosure and
    /// everything after it in the backlog for a retry once the target is
    /// healthy. Returns the number of confirmations applied.
    pub fn replay<S, E>(&mut self, target: &HashTimelock<S, E>) -> Result<usize, RelayError>
    where
        S: ProposalStore,
        E: EventSink,
    {
        let mut applied = 0;
        while let Some(disclosure) = self.pending.first() {
            target.confirm(&disclosure.proposal_id, &disclosure.pre_image)?;
            info!(
                proposal_id = %disclosure.proposal_id,
                "replayed confirmation onto target ledger"
            );
            self.pending.remove(0);
            applied += 1;
        }
        Ok(applied)
    }
}
