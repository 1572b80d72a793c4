//! Shared test bench: one in-memory ledger, a manual clock, and per-actor
//! service handles that all share the same ledger tables — the closest
//! thing to several browsers pointed at one contract.

use std::sync::Arc;
use std::time::Duration;

use chainvote_engine::{
    ElectionConfig, ElectionService, InMemoryLedger, ManualClock, StaticWallet,
};
use chainvote_types::{Address, PollParams, Timestamp};

/// Poll window used across most scenarios, relative to a `T` of zero:
/// voting opens at T+1h and closes at T+2h.
pub const HOUR_MS: u64 = 3_600_000;

pub fn addr(byte: u8) -> Address {
    Address([byte; 20])
}

pub fn poll_params(starts_at: Timestamp, ends_at: Timestamp) -> PollParams {
    PollParams {
        title: "Board election".into(),
        description: "Annual board election".into(),
        starts_at,
        ends_at,
    }
}

/// One ledger, many actors.
pub struct TestBench {
    pub ledger: Arc<InMemoryLedger>,
    pub clock: ManualClock,
}

impl TestBench {
    /// A bench whose clock starts at `now`.
    pub fn at(now: Timestamp) -> Self {
        let clock = ManualClock::starting_at(now);
        let ledger = Arc::new(InMemoryLedger::new(
            Arc::new(clock.clone()),
            Arc::new(StaticWallet::disconnected()),
        ));
        Self { ledger, clock }
    }

    /// Same, with simulated confirmation latency.
    pub fn at_with_delay(now: Timestamp, delay: Duration) -> Self {
        let bench = Self::at(now);
        let ledger = Arc::new(
            InMemoryLedger::new(
                Arc::new(bench.clock.clone()),
                Arc::new(StaticWallet::disconnected()),
            )
            .with_confirmation_delay(delay),
        );
        Self {
            ledger,
            clock: bench.clock,
        }
    }

    /// A client service signing as `account`.
    pub fn client(&self, account: Address) -> ElectionService {
        self.client_with_config(account, ElectionConfig::default())
    }

    /// A client service with a caller-chosen confirmation bound.
    pub fn client_with_config(&self, account: Address, config: ElectionConfig) -> ElectionService {
        let wallet = Arc::new(StaticWallet::connected(account));
        ElectionService::new(
            Arc::new(self.ledger.for_signer(wallet.clone())),
            wallet,
            Arc::new(self.clock.clone()),
            config,
        )
    }
}
