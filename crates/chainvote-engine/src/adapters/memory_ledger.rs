//! # In-Memory Ledger Adapter
//!
//! The reference implementation of the ledger collaborator. It enforces the
//! election rules authoritatively — a client that skips its own validation
//! still gets the correct revert — and it is the mirror the client-side
//! rules engine is tested against.
//!
//! ## Transaction Model
//!
//! A submitted mutation executes immediately against the ledger tables and
//! its outcome is recorded under the returned [`TxHandle`].
//! `await_confirmation` serves that recorded outcome after the configured
//! confirmation delay. A submission whose confirmation the client never
//! observes has therefore still landed, exactly like a broadcast
//! transaction that cannot be recalled; `fetch_*` always reflects it.
//!
//! Raw records are returned with decimal-string numerics and
//! uppercase-hex addresses, so the projector's normalization is exercised
//! for real.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use chainvote_types::{
    Address, Confirmation, ContestantId, LedgerError, PollId, PollParams, RawContestant, RawPoll,
    Timestamp, TxHandle,
};

use crate::ports::{IdentityProvider, LedgerGateway, TimeSource};

struct StoredContestant {
    id: ContestantId,
    name: String,
    avatar: String,
    voter: Address,
    voters: Vec<Address>,
}

struct StoredPoll {
    id: PollId,
    title: String,
    description: String,
    director: Address,
    starts_at: Timestamp,
    ends_at: Timestamp,
    timestamp: Timestamp,
    deleted: bool,
    voters: Vec<Address>,
    avatars: Vec<String>,
    contestants: Vec<StoredContestant>,
}

impl StoredPoll {
    fn votes(&self) -> u64 {
        self.voters.len() as u64
    }
}

#[derive(Default)]
struct LedgerTables {
    next_poll_id: PollId,
    polls: BTreeMap<PollId, StoredPoll>,
    outcomes: HashMap<TxHandle, Confirmation>,
    fail_next_submission: Option<String>,
}

/// In-memory ledger sharing its tables across all signer-bound handles.
pub struct InMemoryLedger {
    tables: Arc<Mutex<LedgerTables>>,
    signer: Arc<dyn IdentityProvider>,
    clock: Arc<dyn TimeSource>,
    confirmation_delay: Duration,
}

impl InMemoryLedger {
    /// A fresh ledger bound to `signer`, confirming instantly.
    pub fn new(clock: Arc<dyn TimeSource>, signer: Arc<dyn IdentityProvider>) -> Self {
        Self {
            tables: Arc::new(Mutex::new(LedgerTables::default())),
            signer,
            clock,
            confirmation_delay: Duration::ZERO,
        }
    }

    /// Delay served confirmations by `delay` (to exercise bounded waits).
    #[must_use]
    pub fn with_confirmation_delay(mut self, delay: Duration) -> Self {
        self.confirmation_delay = delay;
        self
    }

    /// A handle onto the same ledger, signing as a different account.
    pub fn for_signer(&self, signer: Arc<dyn IdentityProvider>) -> Self {
        Self {
            tables: Arc::clone(&self.tables),
            signer,
            clock: Arc::clone(&self.clock),
            confirmation_delay: self.confirmation_delay,
        }
    }

    /// Make the next mutating submission fail in transport with `reason`.
    pub fn fail_next_submission(&self, reason: &str) {
        self.tables.lock().fail_next_submission = Some(reason.to_string());
    }

    fn actor(&self) -> Result<Address, LedgerError> {
        self.signer.current_actor().ok_or(LedgerError::NotConnected)
    }

    /// Run one mutation: execute `op` under the table lock and record the
    /// outcome under a fresh handle. `op` returns the revert reason on
    /// failure; the submission itself still succeeds.
    fn submit<F>(&self, op: F) -> Result<TxHandle, LedgerError>
    where
        F: FnOnce(&mut LedgerTables) -> Result<(), String>,
    {
        let mut tables = self.tables.lock();
        if let Some(reason) = tables.fail_next_submission.take() {
            return Err(LedgerError::Submission(reason));
        }

        let outcome = match op(&mut tables) {
            Ok(()) => Confirmation::Confirmed,
            Err(reason) => Confirmation::Reverted(reason),
        };
        let tx = TxHandle::new();
        debug!(%tx, ?outcome, "ledger transaction executed");
        tables.outcomes.insert(tx, outcome);
        Ok(tx)
    }

    fn raw_poll(poll: &StoredPoll) -> RawPoll {
        RawPoll {
            id: poll.id.to_string(),
            title: poll.title.clone(),
            description: poll.description.clone(),
            votes: poll.votes().to_string(),
            contestants: (poll.contestants.len() as u64).to_string(),
            deleted: poll.deleted,
            director: encode_address(&poll.director),
            starts_at: poll.starts_at.to_string(),
            ends_at: poll.ends_at.to_string(),
            timestamp: poll.timestamp.to_string(),
            voters: poll.voters.iter().map(encode_address).collect(),
            avatars: poll.avatars.clone(),
        }
    }

    fn raw_contestant(contestant: &StoredContestant) -> RawContestant {
        RawContestant {
            id: contestant.id.to_string(),
            name: contestant.name.clone(),
            avatar: contestant.avatar.clone(),
            voter: encode_address(&contestant.voter),
            votes: (contestant.voters.len() as u64).to_string(),
            voters: contestant.voters.iter().map(encode_address).collect(),
        }
    }
}

/// Ledger-native address rendering: uppercase hex, as many nodes emit.
fn encode_address(address: &Address) -> String {
    format!("0x{}", hex::encode_upper(address.as_bytes()))
}

fn check_params(params: &PollParams, now: Timestamp) -> Result<(), String> {
    if params.title.trim().is_empty() {
        return Err("title cannot be empty".into());
    }
    if params.description.trim().is_empty() {
        return Err("description cannot be empty".into());
    }
    if params.starts_at <= now {
        return Err("start date must be in the future".into());
    }
    if params.ends_at <= params.starts_at {
        return Err("end date must be after start date".into());
    }
    Ok(())
}

fn live_poll<'a>(
    tables: &'a mut LedgerTables,
    id: PollId,
) -> Result<&'a mut StoredPoll, String> {
    let poll = tables.polls.get_mut(&id).ok_or("poll not found")?;
    if poll.deleted {
        return Err("poll has been deleted".into());
    }
    Ok(poll)
}

#[async_trait]
impl LedgerGateway for InMemoryLedger {
    async fn create_poll(&self, params: &PollParams) -> Result<TxHandle, LedgerError> {
        let director = self.actor()?;
        let now = self.clock.now();
        let params = params.clone();
        self.submit(move |tables| {
            check_params(&params, now)?;
            tables.next_poll_id += 1;
            let id = tables.next_poll_id;
            tables.polls.insert(
                id,
                StoredPoll {
                    id,
                    title: params.title,
                    description: params.description,
                    director,
                    starts_at: params.starts_at,
                    ends_at: params.ends_at,
                    timestamp: now,
                    deleted: false,
                    voters: vec![],
                    avatars: vec![],
                    contestants: vec![],
                },
            );
            Ok(())
        })
    }

    async fn update_poll(&self, id: PollId, params: &PollParams) -> Result<TxHandle, LedgerError> {
        let actor = self.actor()?;
        let now = self.clock.now();
        let params = params.clone();
        self.submit(move |tables| {
            let poll = live_poll(tables, id)?;
            if poll.director != actor {
                return Err("only the director may update the poll".into());
            }
            if poll.votes() > 0 {
                return Err("voting has already started".into());
            }
            check_params(&params, now)?;
            poll.title = params.title;
            poll.description = params.description;
            poll.starts_at = params.starts_at;
            poll.ends_at = params.ends_at;
            Ok(())
        })
    }

    async fn delete_poll(&self, id: PollId) -> Result<TxHandle, LedgerError> {
        let actor = self.actor()?;
        self.submit(move |tables| {
            let poll = live_poll(tables, id)?;
            if poll.director != actor {
                return Err("only the director may delete the poll".into());
            }
            if poll.votes() > 0 {
                return Err("voting has already started".into());
            }
            poll.deleted = true;
            Ok(())
        })
    }

    async fn register_contestant(
        &self,
        poll_id: PollId,
        name: &str,
        avatar: &str,
    ) -> Result<TxHandle, LedgerError> {
        let actor = self.actor()?;
        let now = self.clock.now();
        let name = name.to_string();
        let avatar = avatar.to_string();
        self.submit(move |tables| {
            let poll = live_poll(tables, poll_id)?;
            if name.trim().is_empty() {
                return Err("name cannot be empty".into());
            }
            if poll.votes() > 0 {
                return Err("voting has already started".into());
            }
            if now > poll.ends_at {
                return Err("poll has ended".into());
            }
            if poll.contestants.iter().any(|c| c.voter == actor) {
                return Err("already registered for this poll".into());
            }
            let id = poll.contestants.len() as ContestantId + 1;
            poll.avatars.push(avatar.clone());
            poll.contestants.push(StoredContestant {
                id,
                name,
                avatar,
                voter: actor,
                voters: vec![],
            });
            Ok(())
        })
    }

    async fn vote(&self, poll_id: PollId, contestant: ContestantId) -> Result<TxHandle, LedgerError> {
        let actor = self.actor()?;
        let now = self.clock.now();
        self.submit(move |tables| {
            let poll = live_poll(tables, poll_id)?;
            if now < poll.starts_at {
                return Err("voting has not started".into());
            }
            if now >= poll.ends_at {
                return Err("voting has ended".into());
            }
            if poll.voters.contains(&actor) {
                return Err("already voted in this poll".into());
            }
            let entry = poll
                .contestants
                .iter_mut()
                .find(|c| c.id == contestant)
                .ok_or("contestant not found")?;
            entry.voters.push(actor);
            poll.voters.push(actor);
            Ok(())
        })
    }

    async fn fetch_polls(&self) -> Result<Vec<RawPoll>, LedgerError> {
        let tables = self.tables.lock();
        Ok(tables
            .polls
            .values()
            .filter(|p| !p.deleted)
            .map(Self::raw_poll)
            .collect())
    }

    async fn fetch_poll(&self, id: PollId) -> Result<RawPoll, LedgerError> {
        let tables = self.tables.lock();
        tables
            .polls
            .get(&id)
            .map(Self::raw_poll)
            .ok_or(LedgerError::PollNotFound(id))
    }

    async fn fetch_contestants(&self, poll: PollId) -> Result<Vec<RawContestant>, LedgerError> {
        let tables = self.tables.lock();
        let poll = tables.polls.get(&poll).ok_or(LedgerError::PollNotFound(poll))?;
        Ok(poll.contestants.iter().map(Self::raw_contestant).collect())
    }

    async fn await_confirmation(&self, tx: TxHandle) -> Result<Confirmation, LedgerError> {
        if !self.confirmation_delay.is_zero() {
            tokio::time::sleep(self.confirmation_delay).await;
        }
        let tables = self.tables.lock();
        tables
            .outcomes
            .get(&tx)
            .cloned()
            .ok_or(LedgerError::UnknownTransaction(tx))
    }
}
