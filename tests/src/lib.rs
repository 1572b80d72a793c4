//! # ChainVote Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared bench: ledger + per-actor services
//! │
//! └── integration/      # Cross-crate flows
//!     ├── lifecycle.rs      # Full election scenarios and invariants
//!     └── reconciliation.rs # Pending confirmations, races, reverts
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p chainvote-tests
//!
//! # By category
//! cargo test -p chainvote-tests integration::lifecycle
//! cargo test -p chainvote-tests integration::reconciliation
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
