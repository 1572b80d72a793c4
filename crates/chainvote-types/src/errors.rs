//! # Error Types
//!
//! Cross-crate error types. The ledger-adapter boundary normalizes the
//! collaborator's loosely-shaped failures into `LedgerError` before they
//! reach the rules engine or the orchestrator; malformed raw records are
//! `ProjectionError`s and are treated as defects, never silently coerced.

use thiserror::Error;

use crate::entities::{ContestantId, PollId, TxHandle};

/// An account literal that does not parse as a 20-byte address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid address literal: {literal}")]
pub struct InvalidAddress {
    /// The offending text, verbatim.
    pub literal: String,
}

/// Errors produced at the ledger gateway boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The transaction never reached durable submission (network failure,
    /// rejected signature, node refusal).
    #[error("submission failed: {0}")]
    Submission(String),

    /// The ledger executed the transaction and rolled it back.
    #[error("reverted: {0}")]
    Reverted(String),

    /// No poll with this id exists on the ledger.
    #[error("poll not found: {0}")]
    PollNotFound(PollId),

    /// No such contestant within the poll.
    #[error("contestant {contestant} not found in poll {poll}")]
    ContestantNotFound { poll: PollId, contestant: ContestantId },

    /// The gateway has no signer bound; nothing can be submitted.
    #[error("no signer connected")]
    NotConnected,

    /// The handle does not correspond to any submitted transaction.
    #[error("unknown transaction: {0}")]
    UnknownTransaction(TxHandle),
}

/// Errors from the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// The wallet refused the connection request.
    #[error("wallet connection rejected")]
    Rejected,

    /// No wallet provider is reachable at all.
    #[error("wallet unavailable: {0}")]
    Unavailable(String),
}

/// A raw ledger record that does not project into the canonical shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// A numeric field failed to parse.
    #[error("malformed numeric field {field}: {value:?}")]
    InvalidNumeric { field: &'static str, value: String },

    /// An address field failed to parse.
    #[error("malformed address field {field}: {value:?}")]
    InvalidAddress { field: &'static str, value: String },
}
