//! # ChainVote Runtime
//!
//! Demo executable wiring the election engine to the in-memory reference
//! ledger and driving a complete election end to end:
//!
//! 1. Load configuration from the environment
//! 2. Initialize tracing
//! 3. Wire ledger, wallets, and per-actor services
//! 4. Create a poll, register two candidates
//! 5. Open the window and collect votes, including a duplicate ballot, a
//!    late ballot, and an ambiguous confirmation resolved by re-query
//! 6. Log the final tallies and dump the winning snapshot

mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chainvote_engine::{
    format_date, poll_status, short_address, ElectionApi, ElectionConfig, ElectionService,
    EligibilityError, InMemoryLedger, ManualClock, MutationError, StaticWallet, SystemClock,
    TimeSource,
};
use chainvote_store::AppSnapshot;
use chainvote_types::{Address, PollParams};

use crate::config::RuntimeConfig;

fn random_address() -> Address {
    Address(rand::random())
}

/// A service handle acting as `account`, sharing the demo ledger.
fn service_for(
    ledger: &InMemoryLedger,
    clock: &ManualClock,
    account: Address,
    confirmation_timeout: Duration,
) -> ElectionService {
    let wallet = Arc::new(StaticWallet::connected(account));
    ElectionService::new(
        Arc::new(ledger.for_signer(wallet.clone())),
        wallet,
        Arc::new(clock.clone()),
        ElectionConfig {
            confirmation_timeout,
        },
    )
}

fn print_results(snapshot: &AppSnapshot, now: u64) -> Result<()> {
    let poll = snapshot.selected.as_ref().context("no poll selected")?;
    info!(
        title = %poll.title,
        status = %poll_status(poll, now),
        window = %format!("{} - {}", format_date(poll.starts_at), format_date(poll.ends_at)),
        votes = poll.votes,
        "final standing"
    );
    for (rank, contestant) in snapshot.contestants.iter().enumerate() {
        info!(
            rank = rank + 1,
            name = %contestant.name,
            account = %short_address(&contestant.voter),
            votes = contestant.votes,
            "contestant"
        );
    }
    println!("{}", serde_json::to_string_pretty(snapshot)?);
    Ok(())
}

async fn run_election(config: RuntimeConfig) -> Result<()> {
    // The demo clock starts at wall time and is advanced by hand, so the
    // hour-long voting window plays out in milliseconds.
    let clock = ManualClock::starting_at(SystemClock.now());

    let director = random_address();
    let director_wallet = Arc::new(StaticWallet::connected(director));
    let ledger = InMemoryLedger::new(Arc::new(clock.clone()), director_wallet.clone())
        .with_confirmation_delay(config.confirmation_delay);

    let organizer = ElectionService::new(
        Arc::new(ledger.for_signer(director_wallet.clone())),
        director_wallet,
        Arc::new(clock.clone()),
        ElectionConfig {
            confirmation_timeout: config.confirmation_timeout,
        },
    );

    organizer.connect_wallet().await?;
    organizer.load().await?;

    let now = clock.now();
    organizer
        .create_poll(PollParams {
            title: "Community Board Election".into(),
            description: "Choose the next community board representative".into(),
            starts_at: now + 60_000,
            ends_at: now + 3_660_000,
        })
        .await
        .context("creating the demo poll")?;
    let poll_id = organizer
        .snapshot()
        .polls
        .first()
        .context("created poll missing from snapshot")?
        .id;
    info!(poll = poll_id, director = %short_address(&director), "poll published");

    // Two candidates register while the poll is still quiet.
    let alice = service_for(&ledger, &clock, random_address(), config.confirmation_timeout);
    alice.register_contestant(poll_id, "Alice").await?;
    let bob = service_for(&ledger, &clock, random_address(), config.confirmation_timeout);
    bob.register_contestant(poll_id, "Bob").await?;

    // Jump into the voting window.
    clock.advance(60_000);
    info!("voting window open");

    let first_voter = service_for(&ledger, &clock, random_address(), config.confirmation_timeout);
    first_voter.select_poll(poll_id).await?;
    first_voter.vote(poll_id, 1).await?;

    let second_voter = service_for(&ledger, &clock, random_address(), config.confirmation_timeout);
    second_voter.select_poll(poll_id).await?;
    second_voter.vote(poll_id, 2).await?;

    // A duplicate ballot is rejected locally, before any fee is spent.
    let duplicate = first_voter.vote(poll_id, 2).await.unwrap_err();
    ensure!(
        duplicate == MutationError::Rejected(EligibilityError::AlreadyVoted),
        "unexpected duplicate-ballot outcome: {duplicate}"
    );
    warn!(error = %duplicate, "duplicate ballot rejected");

    // A voter on a flaky connection: the confirmation wait times out, the
    // transaction lands anyway, and a re-query reconciles the cache.
    let impatient = service_for(
        &ledger,
        &clock,
        random_address(),
        config.confirmation_delay / 4,
    );
    impatient.select_poll(poll_id).await?;
    match impatient.vote(poll_id, 1).await {
        Err(MutationError::PendingConfirmation { tx }) => {
            warn!(%tx, "confirmation pending; re-querying ledger state");
            impatient.resolve_pending(poll_id).await?;
        }
        Ok(()) => info!("confirmation arrived within the bound after all"),
        Err(other) => return Err(other).context("impatient voter"),
    }

    // Close the window; a late ballot is rejected.
    clock.advance(3_600_000);
    let latecomer = service_for(&ledger, &clock, random_address(), config.confirmation_timeout);
    let late = latecomer.vote(poll_id, 1).await.unwrap_err();
    ensure!(
        late == MutationError::Rejected(EligibilityError::VotingEnded),
        "unexpected late-ballot outcome: {late}"
    );
    warn!(error = %late, "late ballot rejected");

    organizer.select_poll(poll_id).await?;
    print_results(&organizer.snapshot(), clock.now())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(true)
        .init();

    info!(?config, "starting ChainVote demo runtime");
    run_election(config).await
}
