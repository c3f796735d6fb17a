//! # Transition Guards
//!
//! Pluggable pre-transition validation. A deployment supplies zero or more
//! [`TransitionGuard`]s to the state machine; before every transition each
//! guard is invoked with the operation kind and the entry the transition
//! concerns, and any guard may veto with a typed reason. Guards compose by
//! logical AND — the first veto aborts the operation with no state change.
//!
//! Access control and business validation belong here, not in the state
//! machine: the machine enforces the protocol's invariants, guards enforce
//! a deployment's policy.

use hashlock_core::ProposalEntry;
use thiserror::Error;

/// The operation a guard is asked to authorize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A new commitment is being recorded.
    Create,
    /// A disclosed pre-image is being applied.
    Confirm,
    /// A pending commitment is being removed.
    Invalidate,
}

impl Operation {
    /// The operation's wire name, as used on the dispatch surface.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Confirm => "confirm",
            Self::Invalidate => "invalidate",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a guard sees: the operation and the entry it would apply to.
///
/// For `create` this is the entry about to be written; for `confirm` and
/// `invalidate` it is the entry as currently stored.
#[derive(Debug)]
pub struct TransitionContext<'a> {
    /// The operation being authorized.
    pub operation: Operation,
    /// The proposal entry the operation concerns.
    pub entry: &'a ProposalEntry,
}

/// A guard's typed rejection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct GuardVeto {
    /// Why the transition is not permitted.
    pub reason: String,
}

impl GuardVeto {
    /// Veto with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A pre-transition validator.
///
/// Implementations must be cheap and synchronous — guards run inside the
/// operation, before the store write.
pub trait TransitionGuard: Send + Sync {
    /// Authorize or veto the proposed transition.
    fn authorize(&self, ctx: &TransitionContext<'_>) -> Result<(), GuardVeto>;
}

// ─── HandlerAllowList ────────────────────────────────────────────────

/// Guard that restricts which handler organizations may be named in a
/// proposal at creation time.
///
/// Confirm and invalidate pass through: the handler was vetted when the
/// entry was created.
#[derive(Debug, Clone)]
pub struct HandlerAllowList {
    allowed: Vec<String>,
}

impl HandlerAllowList {
    /// Allow exactly the given handlers.
    pub fn new(allowed: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }
}

impl TransitionGuard for HandlerAllowList {
    fn authorize(&self, ctx: &TransitionContext<'_>) -> Result<(), GuardVeto> {
        if ctx.operation != Operation::Create {
            return Ok(());
        }
        let handler = &ctx.entry.proposal.handler;
        if self.allowed.iter().any(|a| a == handler) {
            Ok(())
        } else {
            Err(GuardVeto::new(format!(
                "handler {handler:?} is not an allowed proposal handler"
            )))
        }
    }
}
