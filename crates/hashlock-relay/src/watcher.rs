//! # Timeout Watcher
//!
//! The timelock half of the hash-timelock pattern. The core state machine
//! has no trusted clock, so expiry is an external policy: this agent
//! observes the generic creation events, records a deadline per proposal,
//! and invalidates any proposal still pending once its deadline passes.
//!
//! A proposal confirmed before its deadline is left alone — the ledger
//! answers the watcher's invalidate attempt with an illegal-state
//! rejection, which the watcher treats as "already settled".

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use hashlock_core::{ProposalCreated, ProposalError, CREATED_TIMEOUT_EVENT};
use hashlock_state::{EmittedEvent, EventSink, HashTimelock, ProposalStore};

/// Tracks commitment deadlines and invalidates expired proposals.
///
/// The caller supplies the clock: `now` is passed into [`observe`] and
/// [`expire_due`] so deployments control their time source and tests are
/// deterministic.
///
/// [`observe`]: TimeoutWatcher::observe
/// [`expire_due`]: TimeoutWatcher::expire_due
#[derive(Debug)]
pub struct TimeoutWatcher {
    window: Duration,
    deadlines: HashMap<String, DateTime<Utc>>,
}

impl TimeoutWatcher {
    /// Watch with the given confirmation window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadlines: HashMap::new(),
        }
    }

    /// Inspect one event; start the clock if it is a generic creation
    /// event. Handler-scoped creation events and confirmations are not
    /// the watcher's channel and are ignored, as is a payload that does
    /// not decode (logged — a broken producer must not wedge the watcher).
    pub fn observe(&mut self, event: &EmittedEvent, now: DateTime<Utc>) {
        if event.name != CREATED_TIMEOUT_EVENT {
            return;
        }
        let created = match ProposalCreated::from_bytes(&event.payload) {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "ignoring undecodable creation event");
                return;
            }
        };
        let deadline = now + self.window;
        debug!(proposal_id = %created.proposal_id, %deadline, "tracking proposal deadline");
        self.deadlines.insert(created.proposal_id, deadline);
    }

    /// Inspect a batch of events with a single observation time.
    pub fn observe_all<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a EmittedEvent>,
        now: DateTime<Utc>,
    ) {
        for event in events {
            self.observe(event, now);
        }
    }

    /// Number of proposals currently tracked.
    pub fn tracked(&self) -> usize {
        self.deadlines.len()
    }

    /// Invalidate every tracked proposal whose deadline has passed.
    ///
    /// Proposals the ledger reports as already settled (`NotFound`,
    /// `IllegalState` — invalidated elsewhere or confirmed in time) are
    /// dropped from tracking. Collaborator failures keep the proposal
    /// tracked for the next sweep. Returns the ids actually invalidated.
    pub fn expire_due<S, E>(
        &mut self,
        ledger: &HashTimelock<S, E>,
        now: DateTime<Utc>,
    ) -> Vec<String>
    where
        S: ProposalStore,
        E: EventSink,
    {
        let due: Vec<String> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, _)| id.clone())
            .collect();

        let mut invalidated = Vec::new();
        for proposal_id in due {
            match ledger.invalidate(&proposal_id) {
                Ok(()) => {
                    info!(proposal_id = %proposal_id, "invalidated expired proposal");
                    self.deadlines.remove(&proposal_id);
                    invalidated.push(proposal_id);
                }
                Err(ProposalError::NotFound { .. }) | Err(ProposalError::IllegalState { .. }) => {
                    debug!(proposal_id = %proposal_id, "proposal already settled; dropping from watch");
                    self.deadlines.remove(&proposal_id);
                }
                Err(e) => {
                    warn!(proposal_id = %proposal_id, error = %e, "could not invalidate; will retry");
                }
            }
        }
        invalidated
    }
}
