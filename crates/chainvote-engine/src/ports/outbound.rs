//! # Outbound Ports
//!
//! Driven-side abstractions the orchestrator depends on: the ledger
//! collaborator, the wallet/identity collaborator, and the time source.
//! Adapters normalize their collaborator's loosely-shaped failures into the
//! fixed error taxonomy before anything crosses these boundaries.

use async_trait::async_trait;

use chainvote_types::{
    Address, Confirmation, ContestantId, IdentityError, LedgerError, PollId, PollParams,
    RawContestant, RawPoll, Timestamp, TxHandle,
};

/// The ledger collaborator: durable, append-only source of truth.
///
/// Every mutating call returns a [`TxHandle`] that must be redeemed against
/// [`LedgerGateway::await_confirmation`]; no local state may be considered
/// changed before that confirmation arrives. Fetches return ledger-native
/// raw records for the projector to coerce.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    async fn create_poll(&self, params: &PollParams) -> Result<TxHandle, LedgerError>;

    async fn update_poll(&self, id: PollId, params: &PollParams) -> Result<TxHandle, LedgerError>;

    async fn delete_poll(&self, id: PollId) -> Result<TxHandle, LedgerError>;

    async fn register_contestant(
        &self,
        poll: PollId,
        name: &str,
        avatar: &str,
    ) -> Result<TxHandle, LedgerError>;

    async fn vote(&self, poll: PollId, contestant: ContestantId) -> Result<TxHandle, LedgerError>;

    async fn fetch_polls(&self) -> Result<Vec<RawPoll>, LedgerError>;

    async fn fetch_poll(&self, id: PollId) -> Result<RawPoll, LedgerError>;

    async fn fetch_contestants(&self, poll: PollId) -> Result<Vec<RawContestant>, LedgerError>;

    /// Wait until the ledger reports the transaction durably finalized or
    /// rolled back. Unbounded; callers bound it themselves.
    async fn await_confirmation(&self, tx: TxHandle) -> Result<Confirmation, LedgerError>;
}

/// The wallet collaborator resolving the acting account.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The currently connected account, if any. Stateless lookup.
    fn current_actor(&self) -> Option<Address>;

    /// Ask the wallet to connect and yield an account.
    async fn request_connection(&self) -> Result<Address, IdentityError>;
}

/// Provider of the current time, injected so the rules engine stays
/// deterministic and independently testable.
pub trait TimeSource: Send + Sync {
    /// Current unix time in milliseconds.
    fn now(&self) -> Timestamp;
}
