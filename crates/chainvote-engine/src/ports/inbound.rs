//! # Inbound Port
//!
//! The driving API consumers (UI, CLI, tests) use to operate the election
//! client. Implemented by `ElectionService`.

use async_trait::async_trait;

use chainvote_store::StoreReader;
use chainvote_types::{Address, ContestantId, PollId, PollParams};

use crate::domain::MutationError;

/// Entry points for every supported use case.
///
/// Mutating methods run the full orchestration sequence: local validation,
/// submission, bounded confirmation wait, re-fetch, and a single snapshot
/// publish. On any failure the cached snapshot stays at its last confirmed
/// state.
#[async_trait]
pub trait ElectionApi: Send + Sync {
    /// Subscribe to snapshot updates.
    fn subscribe(&self) -> StoreReader;

    /// Resolve the wallet and pull the full poll list into the snapshot.
    async fn load(&self) -> Result<(), MutationError>;

    /// Ask the wallet layer for a connection and publish the account.
    async fn connect_wallet(&self) -> Result<Address, MutationError>;

    /// Pull one poll and its contestants into the snapshot as the selection.
    async fn select_poll(&self, id: PollId) -> Result<(), MutationError>;

    /// Publish a new poll.
    async fn create_poll(&self, params: PollParams) -> Result<(), MutationError>;

    /// Rewrite an existing poll's text or schedule.
    async fn update_poll(&self, id: PollId, params: PollParams) -> Result<(), MutationError>;

    /// Delete a poll. Terminal.
    async fn delete_poll(&self, id: PollId) -> Result<(), MutationError>;

    /// Register the connected account as a contestant.
    async fn register_contestant(&self, poll: PollId, name: &str) -> Result<(), MutationError>;

    /// Cast the connected account's ballot for a contestant.
    async fn vote(&self, poll: PollId, contestant: ContestantId) -> Result<(), MutationError>;

    /// Re-query ledger state after an ambiguous confirmation timeout and
    /// publish whatever actually landed. Never re-submits.
    async fn resolve_pending(&self, poll: PollId) -> Result<(), MutationError>;
}
