//! # Shared Types Crate
//!
//! This crate contains the domain entities, raw ledger record shapes, and
//! error types shared across the ChainVote workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Ledger Owns Durability**: Canonical entities (`Poll`, `Contestant`)
//!   are projections of ledger state; the raw record types (`RawPoll`,
//!   `RawContestant`) carry the ledger-native string encodings that the
//!   projector coerces.
//! - **Typed Addresses**: `Address` wraps the 20-byte account form so that
//!   case-insensitive comparison is equality on bytes, not string games.

pub mod entities;
pub mod errors;
pub mod raw;

pub use entities::*;
pub use errors::*;
pub use raw::*;
