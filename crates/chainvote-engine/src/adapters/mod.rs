//! Adapters: reference implementations of the outbound ports.

pub mod clock;
pub mod memory_ledger;
pub mod wallet;

pub use clock::{ManualClock, SystemClock};
pub use memory_ledger::InMemoryLedger;
pub use wallet::StaticWallet;
