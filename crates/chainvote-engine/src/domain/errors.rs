//! # Mutation Error Taxonomy
//!
//! Every failure surfaced to a caller of the orchestrator carries a stable
//! machine-readable kind plus a human string. Local validation failures are
//! never retried automatically; `PendingConfirmation` is explicitly distinct
//! from failure and resolves by re-querying the ledger, never by
//! re-submitting.

use thiserror::Error;

use chainvote_types::{IdentityError, LedgerError, PollId, ProjectionError, TxHandle};

use super::eligibility::EligibilityError;

/// Why a mutation did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// Rejected locally by the rules engine; the ledger was never contacted.
    #[error("rejected: {0}")]
    Rejected(#[from] EligibilityError),

    /// The action requires a connected wallet and none is.
    #[error("no wallet connected")]
    NotConnected,

    /// The wallet layer failed to produce an account.
    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Another mutation against the same poll is still in flight.
    #[error("an operation on poll {poll} is already in progress")]
    OperationInProgress { poll: PollId },

    /// The ledger refused the submission, or it never got there.
    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    /// Submitted, but confirmation was not observed within the bound.
    /// The transaction may still land; re-query, do not re-submit.
    #[error("confirmation pending for transaction {tx}")]
    PendingConfirmation { tx: TxHandle },

    /// The ledger executed the transaction and rolled it back.
    #[error("reverted: {0}")]
    Reverted(String),

    /// A fetched raw record did not project; treated as a defect.
    #[error("projection error: {0}")]
    Projection(#[from] ProjectionError),

    /// A read-path ledger failure (fetch miss, transport).
    #[error("ledger error: {0}")]
    Ledger(LedgerError),
}

impl MutationError {
    /// Normalize a ledger error raised by a mutating submission.
    pub(crate) fn from_submission(err: LedgerError) -> Self {
        match err {
            LedgerError::Submission(reason) => Self::SubmissionFailed(reason),
            LedgerError::Reverted(reason) => Self::Reverted(reason),
            LedgerError::NotConnected => Self::NotConnected,
            other => Self::Ledger(other),
        }
    }
}
