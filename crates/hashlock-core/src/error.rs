//! # Error Taxonomy for Proposal Operations
//!
//! Defines [`ProposalError`], the single error type returned by every
//! operation surface of the stack. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Every failure is detected locally and returned synchronously to the
//!   immediate caller; nothing is retried internally and nothing is fatal
//!   to the process. Each operation is independently retriable.
//! - A failed operation never partially applies: callers can rely on the
//!   stored entry being untouched whenever they receive an error.
//! - Collaborator failures (store I/O, record decoding, event transport)
//!   are kept distinct from protocol failures so operators can tell a
//!   broken deployment apart from a rejected request.

use thiserror::Error;

/// Failure classification for create/confirm/invalidate operations.
#[derive(Error, Debug)]
pub enum ProposalError {
    /// Malformed or missing input: wrong arity, unparseable proposal
    /// payload, empty required field, or an unrecognized hash algorithm
    /// token at creation time.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The referenced proposal has no stored entry. Indistinguishable by
    /// design from a proposal that was invalidated and removed.
    #[error("no such proposal {proposal_id:?}; it may have expired and been invalidated")]
    NotFound {
        /// The identifier that resolved to nothing.
        proposal_id: String,
    },

    /// The operation is not permitted from the entry's current status
    /// (e.g. invalidating a confirmed commitment).
    #[error("proposal {proposal_id:?} is {status}: {reason}")]
    IllegalState {
        /// The proposal whose status blocked the operation.
        proposal_id: String,
        /// The status the entry was found in.
        status: String,
        /// Why the operation is rejected from that status.
        reason: String,
    },

    /// The hash algorithm token recorded in the stored entry is not
    /// recognized. Defensive: creation validates the token, so this
    /// occurs only for entries written by a foreign implementation.
    #[error("the hash algorithm recorded in the proposal is not supported: {0:?}")]
    UnsupportedAlgorithm(String),

    /// The supplied pre-image does not digest to the stored hash.
    #[error("invalid pre-image supplied")]
    VerificationFailed,

    /// An external collaborator (store, event transport, codec) reported
    /// an error.
    #[error("collaborator failure: {0}")]
    Collaborator(String),
}

impl ProposalError {
    /// Shorthand for a [`ProposalError::NotFound`] for the given id.
    pub fn not_found(proposal_id: impl Into<String>) -> Self {
        Self::NotFound {
            proposal_id: proposal_id.into(),
        }
    }

    /// Whether this failure indicates a broken collaborator rather than a
    /// rejected request.
    pub fn is_collaborator(&self) -> bool {
        matches!(self, Self::Collaborator(_))
    }
}
