//! # Reconciliation Flows
//!
//! The asynchronous, can-fail-after-broadcast reality of ledger writes:
//! bounded confirmation waits, re-query instead of re-submit, ledger-side
//! reverts winning over stale caches, and the per-poll in-flight guard.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chainvote_engine::{ElectionApi, ElectionConfig, MutationError};

    use crate::fixtures::{addr, poll_params, TestBench, HOUR_MS};

    const DIRECTOR: u8 = 0xD1;
    const ALICE: u8 = 0xA1;
    const BOB: u8 = 0xB0;

    /// Seeding config: wait out any simulated latency.
    fn patient() -> ElectionConfig {
        ElectionConfig {
            confirmation_timeout: Duration::from_secs(600),
        }
    }

    /// A confirmation timeout is ambiguous, not a failure: the cache stays
    /// put, the transaction lands anyway, and a re-query reconciles.
    #[tokio::test(start_paused = true)]
    async fn test_pending_confirmation_resolves_by_requery() {
        let bench = TestBench::at_with_delay(1_000, Duration::from_secs(60));
        bench
            .client_with_config(addr(DIRECTOR), patient())
            .create_poll(poll_params(HOUR_MS, 2 * HOUR_MS))
            .await
            .unwrap();
        bench
            .client_with_config(addr(ALICE), patient())
            .register_contestant(1, "Alice")
            .await
            .unwrap();

        bench.clock.set(HOUR_MS + 1);
        let voter = bench.client_with_config(
            addr(0xE1),
            ElectionConfig {
                confirmation_timeout: Duration::from_millis(50),
            },
        );
        voter.load().await.unwrap();
        assert_eq!(voter.snapshot().polls[0].votes, 0);

        let err = voter.vote(1, 1).await.unwrap_err();
        assert!(matches!(err, MutationError::PendingConfirmation { .. }));
        // No publish on the ambiguous outcome.
        assert_eq!(voter.snapshot().polls[0].votes, 0);

        // Never re-submit; re-query. The broadcast ballot landed.
        voter.resolve_pending(1).await.unwrap();
        let snapshot = voter.snapshot();
        assert_eq!(snapshot.polls[0].votes, 1);
        assert_eq!(snapshot.contestants[0].votes, 1);
    }

    /// A stale cache lets a doomed mutation through local validation; the
    /// ledger reverts it and the client surfaces that verdict unchanged.
    #[tokio::test]
    async fn test_ledger_revert_beats_stale_cache() {
        let bench = TestBench::at(1_000);
        bench
            .client(addr(DIRECTOR))
            .create_poll(poll_params(HOUR_MS, 2 * HOUR_MS))
            .await
            .unwrap();
        bench.client(addr(ALICE)).register_contestant(1, "Alice").await.unwrap();

        // Bob's client catches the pre-vote state.
        let bob = bench.client(addr(BOB));
        bob.load().await.unwrap();
        assert_eq!(bob.snapshot().polls[0].votes, 0);

        // Someone votes behind Bob's back.
        bench.clock.set(HOUR_MS + 1);
        bench.client(addr(0xE1)).vote(1, 1).await.unwrap();

        // Local validation passes on the stale snapshot; the ledger knows
        // better and the revert reason comes through verbatim.
        let err = bob.register_contestant(1, "Bob").await.unwrap_err();
        assert_eq!(
            err,
            MutationError::Reverted("voting has already started".into())
        );
        // Failed mutation: nothing published, cache still at last confirmed.
        assert_eq!(bob.snapshot().polls[0].votes, 0);
    }

    /// Transport failures are surfaced and retried only by explicit action.
    #[tokio::test]
    async fn test_submission_failure_retried_explicitly() {
        let bench = TestBench::at(1_000);
        let director = bench.client(addr(DIRECTOR));

        bench.ledger.fail_next_submission("connection reset");
        let err = director
            .create_poll(poll_params(HOUR_MS, 2 * HOUR_MS))
            .await
            .unwrap_err();
        assert_eq!(err, MutationError::SubmissionFailed("connection reset".into()));
        assert!(director.snapshot().polls.is_empty());

        // The caller decides to try again; this is the one retry path.
        director
            .create_poll(poll_params(HOUR_MS, 2 * HOUR_MS))
            .await
            .unwrap();
        assert_eq!(director.snapshot().polls.len(), 1);
    }

    /// The in-flight guard scopes per poll: same poll fails fast, different
    /// polls proceed concurrently.
    #[tokio::test(start_paused = true)]
    async fn test_guard_scopes_to_one_poll() {
        let bench = TestBench::at_with_delay(1_000, Duration::from_millis(200));
        let director = bench.client_with_config(addr(DIRECTOR), patient());
        director
            .create_poll(poll_params(HOUR_MS, 2 * HOUR_MS))
            .await
            .unwrap();
        director
            .create_poll(poll_params(HOUR_MS, 2 * HOUR_MS))
            .await
            .unwrap();
        bench
            .client_with_config(addr(ALICE), patient())
            .register_contestant(1, "Alice")
            .await
            .unwrap();
        bench
            .client_with_config(addr(BOB), patient())
            .register_contestant(2, "Bob")
            .await
            .unwrap();

        bench.clock.set(HOUR_MS + 1);
        let voter = Arc::new(bench.client_with_config(addr(0xE1), patient()));
        voter.load().await.unwrap();

        // Two flows against two different polls: both fine.
        let first = {
            let voter = Arc::clone(&voter);
            tokio::spawn(async move { voter.vote(1, 1).await })
        };
        let second = {
            let voter = Arc::clone(&voter);
            tokio::spawn(async move { voter.vote(2, 1).await })
        };
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        let snapshot = voter.snapshot();
        assert_eq!(snapshot.poll(1).unwrap().votes, 1);
        assert_eq!(snapshot.poll(2).unwrap().votes, 1);
    }

    /// A reader never sees the list and the selection disagree.
    #[tokio::test]
    async fn test_snapshot_updates_are_all_or_nothing() {
        let bench = TestBench::at(1_000);
        bench
            .client(addr(DIRECTOR))
            .create_poll(poll_params(HOUR_MS, 2 * HOUR_MS))
            .await
            .unwrap();
        bench.client(addr(ALICE)).register_contestant(1, "Alice").await.unwrap();

        bench.clock.set(HOUR_MS + 1);
        let voter = bench.client(addr(0xE1));
        voter.select_poll(1).await.unwrap();
        let mut reader = voter.subscribe();

        voter.vote(1, 1).await.unwrap();

        let snapshot = reader.changed().await.unwrap();
        let selected = snapshot.selected.as_ref().unwrap();
        assert_eq!(selected.votes, 1);
        assert_eq!(snapshot.poll(1).unwrap().votes, selected.votes);
        let total: u64 = snapshot.contestants.iter().map(|c| c.votes).sum();
        assert_eq!(total, selected.votes);
    }
}
