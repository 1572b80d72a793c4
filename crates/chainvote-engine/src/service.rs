//! # Election Service (Mutation Orchestrator)
//!
//! Drives each state-changing use case to completion or a reported failure:
//!
//! 1. Resolve the actor and validate locally via the rules engine — a
//!    rejection returns immediately without contacting the ledger.
//! 2. Take the per-poll in-flight guard; a second mutation against the same
//!    poll from this client fails fast with `OperationInProgress`.
//! 3. Submit to the ledger gateway.
//! 4. Await durable confirmation under a bounded timeout. A timeout is
//!    `PendingConfirmation`, not failure: the transaction may still land,
//!    so the recovery path is `resolve_pending`, never a re-submit.
//! 5. Re-fetch the affected state through the projector and publish exactly
//!    one consistent snapshot to the observer store. Failures publish
//!    nothing; the cache stays at its last confirmed state.
//!
//! The ledger remains the sole serialization point for conflicting writes
//! from different clients; a rejection there surfaces as `Reverted`, not as
//! a local bug.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use chainvote_store::{ModalFlags, ObserverStore, StoreReader};
use chainvote_types::{
    Address, Confirmation, Contestant, ContestantId, Poll, PollId, PollParams, TxHandle,
};

use crate::domain::{
    avatar_url, can_create_poll, can_delete_poll, can_register_contestant, can_update_poll,
    can_vote, contestant_shortfall, project_contestants, project_poll, project_polls,
    MutationError,
};
use crate::ports::{ElectionApi, IdentityProvider, LedgerGateway, TimeSource};

/// Orchestrator tuning.
#[derive(Debug, Clone)]
pub struct ElectionConfig {
    /// Bound on the confirmation wait before reporting `PendingConfirmation`.
    pub confirmation_timeout: Duration,
}

impl Default for ElectionConfig {
    fn default() -> Self {
        Self {
            confirmation_timeout: Duration::from_secs(30),
        }
    }
}

/// The election client: rules engine in front, ledger behind, observer
/// store out the side. One instance per connected client.
pub struct ElectionService {
    gateway: Arc<dyn LedgerGateway>,
    identity: Arc<dyn IdentityProvider>,
    clock: Arc<dyn TimeSource>,
    config: ElectionConfig,
    store: ObserverStore,
    in_flight: Arc<Mutex<HashSet<PollId>>>,
}

impl ElectionService {
    /// Wire a service from its collaborators. The service owns the store,
    /// making it the single writer by construction.
    pub fn new(
        gateway: Arc<dyn LedgerGateway>,
        identity: Arc<dyn IdentityProvider>,
        clock: Arc<dyn TimeSource>,
        config: ElectionConfig,
    ) -> Self {
        Self {
            gateway,
            identity,
            clock,
            config,
            store: ObserverStore::new(),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Current snapshot, cloned out of the store.
    pub fn snapshot(&self) -> chainvote_store::AppSnapshot {
        self.store.snapshot()
    }

    /// Toggle the UI-transient dialog flags. Carried through the store so
    /// consumers keep a single subscription.
    pub fn set_modals<F>(&self, mutate: F)
    where
        F: FnOnce(&mut ModalFlags),
    {
        self.store.publish(|snapshot| mutate(&mut snapshot.modals));
    }

    fn now(&self) -> u64 {
        self.clock.now()
    }

    fn require_actor(&self) -> Result<Address, MutationError> {
        self.identity.current_actor().ok_or(MutationError::NotConnected)
    }

    /// Reserve `poll` for one in-flight mutation.
    fn try_begin(&self, poll: PollId) -> Result<InFlightGuard, MutationError> {
        let mut set = self.in_flight.lock();
        if !set.insert(poll) {
            return Err(MutationError::OperationInProgress { poll });
        }
        Ok(InFlightGuard {
            set: Arc::clone(&self.in_flight),
            poll,
        })
    }

    /// Bounded confirmation wait (orchestration step 4).
    async fn confirm(&self, tx: TxHandle) -> Result<(), MutationError> {
        match timeout(self.config.confirmation_timeout, self.gateway.await_confirmation(tx)).await
        {
            Err(_) => {
                warn!(%tx, "confirmation not observed within bound; transaction may still land");
                Err(MutationError::PendingConfirmation { tx })
            }
            Ok(Err(err)) => Err(MutationError::from_submission(err)),
            Ok(Ok(Confirmation::Confirmed)) => Ok(()),
            Ok(Ok(Confirmation::Reverted(reason))) => {
                warn!(%tx, %reason, "transaction reverted");
                Err(MutationError::Reverted(reason))
            }
        }
    }

    /// The poll the rules run against: cached context when available,
    /// fetched otherwise.
    async fn poll_context(&self, id: PollId) -> Result<Poll, MutationError> {
        let snapshot = self.store.snapshot();
        if let Some(selected) = &snapshot.selected {
            if selected.id == id {
                return Ok(selected.clone());
            }
        }
        if let Some(poll) = snapshot.poll(id) {
            return Ok(poll.clone());
        }
        let raw = self.gateway.fetch_poll(id).await.map_err(MutationError::Ledger)?;
        Ok(project_poll(&raw)?)
    }

    async fn contestant_context(&self, id: PollId) -> Result<Vec<Contestant>, MutationError> {
        let snapshot = self.store.snapshot();
        if snapshot.selected.as_ref().is_some_and(|p| p.id == id) {
            return Ok(snapshot.contestants);
        }
        let raw = self
            .gateway
            .fetch_contestants(id)
            .await
            .map_err(MutationError::Ledger)?;
        Ok(project_contestants(&raw)?)
    }

    /// Re-derive the whole poll list and publish it, keeping the selection
    /// consistent with the list in the same snapshot.
    async fn refresh_polls(&self) -> Result<(), MutationError> {
        let raw = self.gateway.fetch_polls().await.map_err(MutationError::Ledger)?;
        let polls = project_polls(&raw)?;
        debug!(count = polls.len(), "poll list refreshed from ledger");
        self.store.publish(|snapshot| {
            if let Some(selected) = &snapshot.selected {
                match polls.iter().find(|p| p.id == selected.id) {
                    Some(updated) => snapshot.selected = Some(updated.clone()),
                    None => {
                        snapshot.selected = None;
                        snapshot.contestants.clear();
                    }
                }
            }
            snapshot.polls = polls;
        });
        Ok(())
    }

    /// Re-derive one poll and its contestants and publish them together
    /// with the list entry, in a single snapshot.
    async fn refresh_poll(&self, id: PollId) -> Result<(), MutationError> {
        let raw = self.gateway.fetch_poll(id).await.map_err(MutationError::Ledger)?;
        let poll = project_poll(&raw)?;

        if poll.deleted {
            self.store.publish(|snapshot| {
                snapshot.polls.retain(|p| p.id != id);
                if snapshot.selected.as_ref().is_some_and(|p| p.id == id) {
                    snapshot.selected = None;
                    snapshot.contestants.clear();
                }
            });
            return Ok(());
        }

        let raw_contestants = self
            .gateway
            .fetch_contestants(id)
            .await
            .map_err(MutationError::Ledger)?;
        let contestants = project_contestants(&raw_contestants)?;
        debug!(poll = id, contestants = contestants.len(), "poll refreshed from ledger");

        self.store.publish(|snapshot| {
            match snapshot.polls.iter_mut().find(|p| p.id == id) {
                Some(slot) => *slot = poll.clone(),
                None => {
                    snapshot.polls.push(poll.clone());
                    snapshot.polls.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                }
            }
            snapshot.selected = Some(poll.clone());
            snapshot.contestants = contestants;
        });
        Ok(())
    }
}

#[async_trait]
impl ElectionApi for ElectionService {
    fn subscribe(&self) -> StoreReader {
        self.store.subscribe()
    }

    async fn load(&self) -> Result<(), MutationError> {
        let wallet = self.identity.current_actor();
        let raw = self.gateway.fetch_polls().await.map_err(MutationError::Ledger)?;
        let polls = project_polls(&raw)?;
        info!(polls = polls.len(), connected = wallet.is_some(), "initial state loaded");
        self.store.publish(|snapshot| {
            snapshot.wallet = wallet;
            snapshot.polls = polls;
        });
        Ok(())
    }

    async fn connect_wallet(&self) -> Result<Address, MutationError> {
        let account = self.identity.request_connection().await?;
        info!(%account, "wallet connected");
        self.store.publish(|snapshot| snapshot.wallet = Some(account));
        Ok(account)
    }

    async fn select_poll(&self, id: PollId) -> Result<(), MutationError> {
        self.refresh_poll(id).await
    }

    async fn create_poll(&self, params: PollParams) -> Result<(), MutationError> {
        let actor = self.require_actor()?;
        can_create_poll(&params, self.now())?;

        let tx = self
            .gateway
            .create_poll(&params)
            .await
            .map_err(MutationError::from_submission)?;
        self.confirm(tx).await?;
        info!(%actor, title = %params.title, "poll created");
        self.refresh_polls().await
    }

    async fn update_poll(&self, id: PollId, params: PollParams) -> Result<(), MutationError> {
        let actor = self.require_actor()?;
        let poll = self.poll_context(id).await?;
        can_update_poll(&poll, &actor, &params, self.now())?;

        let _guard = self.try_begin(id)?;
        let tx = self
            .gateway
            .update_poll(id, &params)
            .await
            .map_err(MutationError::from_submission)?;
        self.confirm(tx).await?;
        info!(poll = id, "poll updated");
        self.refresh_poll(id).await
    }

    async fn delete_poll(&self, id: PollId) -> Result<(), MutationError> {
        let actor = self.require_actor()?;
        let poll = self.poll_context(id).await?;
        can_delete_poll(&poll, &actor)?;

        let _guard = self.try_begin(id)?;
        let tx = self
            .gateway
            .delete_poll(id)
            .await
            .map_err(MutationError::from_submission)?;
        self.confirm(tx).await?;
        info!(poll = id, "poll deleted");
        self.refresh_polls().await
    }

    async fn register_contestant(&self, poll_id: PollId, name: &str) -> Result<(), MutationError> {
        let actor = self.require_actor()?;
        let poll = self.poll_context(poll_id).await?;
        let contestants = self.contestant_context(poll_id).await?;
        can_register_contestant(&poll, &contestants, &actor, self.now())?;

        let avatar = avatar_url(name);
        let _guard = self.try_begin(poll_id)?;
        let tx = self
            .gateway
            .register_contestant(poll_id, name, &avatar)
            .await
            .map_err(MutationError::from_submission)?;
        self.confirm(tx).await?;
        info!(poll = poll_id, %actor, name, "contestant registered");
        self.refresh_poll(poll_id).await
    }

    async fn vote(&self, poll_id: PollId, contestant: ContestantId) -> Result<(), MutationError> {
        let actor = self.identity.current_actor();
        let poll = self.poll_context(poll_id).await?;
        can_vote(&poll, actor.as_ref(), self.now())?;
        if contestant_shortfall(&poll) {
            warn!(poll = poll_id, "voting with fewer than two contestants");
        }

        let _guard = self.try_begin(poll_id)?;
        let tx = self
            .gateway
            .vote(poll_id, contestant)
            .await
            .map_err(MutationError::from_submission)?;
        self.confirm(tx).await?;
        info!(poll = poll_id, contestant, "vote cast");
        self.refresh_poll(poll_id).await
    }

    async fn resolve_pending(&self, poll: PollId) -> Result<(), MutationError> {
        info!(poll, "re-querying ledger to resolve pending mutation");
        self.refresh_poll(poll).await
    }
}

/// RAII reservation of a poll id; released on every exit path.
struct InFlightGuard {
    set: Arc<Mutex<HashSet<PollId>>>,
    poll: PollId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set.lock().remove(&self.poll);
    }
}
