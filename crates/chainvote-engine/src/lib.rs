//! # ChainVote Engine
//!
//! The election subsystem: everything between a consumer's intent and the
//! ledger's confirmed truth.
//!
//! ## Role in System
//!
//! - **Rules Before Fees**: every mutation is validated locally against the
//!   cached context before a ledger transaction is spent on it.
//! - **Ledger Is Authoritative**: no local state is considered changed until
//!   the ledger confirms; the cache is a read-through view, never a source
//!   of truth.
//! - **Reconcile After Every Mutation**: confirmed mutations re-fetch the
//!   affected records and publish one consistent snapshot.
//!
//! ## Mutation Flow
//!
//! ```text
//! consumer ──→ [Rules Engine] ──reject──→ caller (no side effect)
//!                   │ permit
//!                   ↓
//!             [Orchestrator] ──submit──→ [Ledger Gateway] ──→ ledger
//!                   │                           │
//!                   │←────── confirmation ──────┘
//!                   ↓
//!             [State Projector] ──→ [Observer Store] ──→ readers
//! ```
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adapters/ - in-memory ledger, wallet, and clock adapters       │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - ElectionApi trait                          │
//! │  ports/outbound.rs - LedgerGateway, IdentityProvider,           │
//! │                      TimeSource traits                          │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/eligibility.rs - pure lifecycle & eligibility rules     │
//! │  domain/projector.rs   - raw records → canonical views          │
//! │  domain/format.rs      - display-only helpers                   │
//! │  domain/errors.rs      - MutationError taxonomy                 │
//! │  service.rs            - ElectionService orchestrator           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
pub use service::{ElectionConfig, ElectionService};
