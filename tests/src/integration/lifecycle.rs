//! # Election Lifecycle Flows
//!
//! End-to-end scenarios across engine, store, and the reference ledger:
//! the canonical timeline (register → vote → closed), the tally-sum
//! invariant, and the director's update/delete gates.

#[cfg(test)]
mod tests {
    use chainvote_engine::{ElectionApi, EligibilityError, MutationError};

    use crate::fixtures::{addr, poll_params, TestBench, HOUR_MS};

    const DIRECTOR: u8 = 0xD1;
    const ALICE: u8 = 0xA1;
    const BOB: u8 = 0xB0;

    /// The canonical timeline: created before the window, one candidate,
    /// one ballot at the opening instant, registration closed by that
    /// ballot, voting closed at the end instant.
    #[tokio::test]
    async fn test_full_election_scenario() {
        let bench = TestBench::at(1_000);
        let director = bench.client(addr(DIRECTOR));
        director
            .create_poll(poll_params(HOUR_MS, 2 * HOUR_MS))
            .await
            .unwrap();

        // T+30m: registration is open while no ballots exist.
        bench.clock.set(HOUR_MS / 2);
        let alice = bench.client(addr(ALICE));
        alice.register_contestant(1, "Alice").await.unwrap();

        // T+1h: the boundary is inclusive; a non-candidate votes.
        bench.clock.set(HOUR_MS);
        let voter = bench.client(addr(0xE1));
        voter.select_poll(1).await.unwrap();
        voter.vote(1, 1).await.unwrap();

        let snapshot = voter.snapshot();
        let poll = snapshot.selected.as_ref().unwrap();
        assert_eq!(poll.votes, 1);
        assert_eq!(snapshot.contestants[0].name, "Alice");
        assert_eq!(snapshot.contestants[0].votes, 1);

        // The first ballot closes registration for good.
        let bob = bench.client(addr(BOB));
        let err = bob.register_contestant(1, "Bob").await.unwrap_err();
        assert_eq!(err, MutationError::Rejected(EligibilityError::VotingStarted));

        // T+2h: the end boundary is exclusive.
        bench.clock.set(2 * HOUR_MS);
        let late = bench.client(addr(0xE2));
        let err = late.vote(1, 1).await.unwrap_err();
        assert_eq!(err, MutationError::Rejected(EligibilityError::VotingEnded));
    }

    /// `poll.votes == Σ contestant.votes` after every confirmed ballot.
    #[tokio::test]
    async fn test_tally_sum_invariant_across_ballots() {
        let bench = TestBench::at(1_000);
        let director = bench.client(addr(DIRECTOR));
        director
            .create_poll(poll_params(HOUR_MS, 2 * HOUR_MS))
            .await
            .unwrap();
        bench.client(addr(ALICE)).register_contestant(1, "Alice").await.unwrap();
        bench.client(addr(BOB)).register_contestant(1, "Bob").await.unwrap();

        bench.clock.set(HOUR_MS + 1);
        let auditor = bench.client(addr(0xAD));
        for (i, choice) in [1u64, 2, 1, 1, 2].iter().enumerate() {
            let voter = bench.client(addr(0xE0 + i as u8));
            voter.vote(1, *choice).await.unwrap();

            auditor.select_poll(1).await.unwrap();
            let snapshot = auditor.snapshot();
            let poll = snapshot.selected.as_ref().unwrap();
            let total: u64 = snapshot.contestants.iter().map(|c| c.votes).sum();
            assert_eq!(poll.votes, total);
            assert_eq!(poll.votes, i as u64 + 1);
        }

        // Winner-first ranking after the dust settles: Alice 3, Bob 2.
        let snapshot = auditor.snapshot();
        assert_eq!(snapshot.contestants[0].name, "Alice");
        assert_eq!(snapshot.contestants[0].votes, 3);
        assert_eq!(snapshot.contestants[1].votes, 2);
    }

    /// One confirmed ballot per `(poll, account)`, ever.
    #[tokio::test]
    async fn test_one_ballot_per_account() {
        let bench = TestBench::at(1_000);
        bench
            .client(addr(DIRECTOR))
            .create_poll(poll_params(HOUR_MS, 2 * HOUR_MS))
            .await
            .unwrap();
        bench.client(addr(ALICE)).register_contestant(1, "Alice").await.unwrap();
        bench.client(addr(BOB)).register_contestant(1, "Bob").await.unwrap();

        bench.clock.set(HOUR_MS + 1);
        let voter = bench.client(addr(0xE1));
        voter.vote(1, 1).await.unwrap();

        // Same account, different contestant, fresh check: still rejected.
        let err = voter.vote(1, 2).await.unwrap_err();
        assert_eq!(err, MutationError::Rejected(EligibilityError::AlreadyVoted));
    }

    /// Delete is gated exactly like update: director-only, pre-ballot.
    #[tokio::test]
    async fn test_delete_gates_on_first_ballot() {
        let bench = TestBench::at(1_000);
        let director = bench.client(addr(DIRECTOR));
        director
            .create_poll(poll_params(HOUR_MS, 2 * HOUR_MS))
            .await
            .unwrap();
        bench.client(addr(ALICE)).register_contestant(1, "Alice").await.unwrap();

        bench.clock.set(HOUR_MS + 1);
        bench.client(addr(0xE1)).vote(1, 1).await.unwrap();

        director.select_poll(1).await.unwrap();
        let err = director.delete_poll(1).await.unwrap_err();
        assert_eq!(err, MutationError::Rejected(EligibilityError::VotingStarted));

        // A second, untouched poll deletes fine.
        bench.clock.set(1_000);
        director
            .create_poll(poll_params(HOUR_MS, 2 * HOUR_MS))
            .await
            .unwrap();
        director.delete_poll(2).await.unwrap();
        assert!(director.snapshot().polls.iter().all(|p| p.id != 2));
    }

    /// An update rewrites text and schedule and the snapshot reflects it.
    #[tokio::test]
    async fn test_update_rewrites_poll() {
        let bench = TestBench::at(1_000);
        let director = bench.client(addr(DIRECTOR));
        director
            .create_poll(poll_params(HOUR_MS, 2 * HOUR_MS))
            .await
            .unwrap();

        let mut params = poll_params(2 * HOUR_MS, 4 * HOUR_MS);
        params.title = "Board election (rescheduled)".into();
        director.update_poll(1, params).await.unwrap();

        let snapshot = director.snapshot();
        let poll = snapshot.selected.as_ref().unwrap();
        assert_eq!(poll.title, "Board election (rescheduled)");
        assert_eq!(poll.starts_at, 2 * HOUR_MS);
        assert_eq!(snapshot.polls[0].title, poll.title);
    }

    /// A deleted poll is inert for every actor and every action.
    #[tokio::test]
    async fn test_deleted_poll_is_inert() {
        let bench = TestBench::at(1_000);
        let director = bench.client(addr(DIRECTOR));
        director
            .create_poll(poll_params(HOUR_MS, 2 * HOUR_MS))
            .await
            .unwrap();
        director.delete_poll(1).await.unwrap();

        let err = bench
            .client(addr(ALICE))
            .register_contestant(1, "Alice")
            .await
            .unwrap_err();
        assert_eq!(err, MutationError::Rejected(EligibilityError::PollDeleted));

        bench.clock.set(HOUR_MS + 1);
        let err = bench.client(addr(0xE1)).vote(1, 1).await.unwrap_err();
        assert_eq!(err, MutationError::Rejected(EligibilityError::PollDeleted));

        let err = director.delete_poll(1).await.unwrap_err();
        assert_eq!(err, MutationError::Rejected(EligibilityError::PollDeleted));
    }

    /// Two independent clients see the same ledger truth after reload.
    #[tokio::test]
    async fn test_multi_client_visibility() {
        let bench = TestBench::at(1_000);
        bench
            .client(addr(DIRECTOR))
            .create_poll(poll_params(HOUR_MS, 2 * HOUR_MS))
            .await
            .unwrap();
        bench.client(addr(ALICE)).register_contestant(1, "Alice").await.unwrap();

        bench.clock.set(HOUR_MS + 1);
        bench.client(addr(0xE1)).vote(1, 1).await.unwrap();

        // A client that was never involved in the mutation.
        let observer = bench.client(addr(0x0B));
        observer.load().await.unwrap();
        observer.select_poll(1).await.unwrap();
        let snapshot = observer.snapshot();
        assert_eq!(snapshot.polls[0].votes, 1);
        assert_eq!(snapshot.contestants[0].votes, 1);
    }
}
