//! # Core Domain Entities
//!
//! Defines the canonical election entities used across the workspace.
//!
//! ## Clusters
//!
//! - **Elections**: `Poll`, `Contestant`, `PollParams`, `PollStatus`
//! - **Ledger Handles**: `TxHandle`, `Confirmation`
//! - **Accounts**: `Address`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::errors::InvalidAddress;

/// Unique identifier for a poll, assigned by the ledger.
pub type PollId = u64;

/// Identifier for a contestant, unique within its poll, assigned by the ledger.
pub type ContestantId = u64;

/// A unix timestamp in milliseconds.
pub type Timestamp = u64;

/// A 20-byte Ethereum-style account address.
///
/// Parsed case-insensitively from `0x`-prefixed hex and displayed as
/// lowercase `0x`-hex, so two renderings of the same account always compare
/// equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The raw 20 bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = InvalidAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|_| InvalidAddress {
            literal: s.to_string(),
        })?;
        let bytes: [u8; 20] = bytes.try_into().map_err(|_| InvalidAddress {
            literal: s.to_string(),
        })?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        literal.parse().map_err(serde::de::Error::custom)
    }
}

/// Opaque handle for a submitted ledger transaction.
///
/// Returned by every mutating gateway call and redeemed against
/// `await_confirmation`. The handle carries no ordering information; only
/// the ledger's confirmation is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHandle(pub Uuid);

impl TxHandle {
    /// Mint a fresh handle.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TxHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TxHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Terminal outcome of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confirmation {
    /// The mutation is durably finalized on the ledger.
    Confirmed,
    /// The ledger executed the transaction and rolled it back.
    Reverted(String),
}

/// An election with a fixed voting window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    /// Ledger-assigned identifier, immutable once created.
    pub id: PollId,
    /// Free text, immutable after votes exist.
    pub title: String,
    /// Free text, immutable after votes exist.
    pub description: String,
    /// Ballots cast so far. Monotonically non-decreasing.
    pub votes: u64,
    /// Registered candidates. Monotonically non-decreasing unless deleted.
    pub contestants: u64,
    /// Terminal flag; once set the poll is inert.
    pub deleted: bool,
    /// Creator of the poll; sole holder of update/delete rights.
    pub director: Address,
    /// Voting opens at this instant (inclusive).
    pub starts_at: Timestamp,
    /// Voting closes at this instant (exclusive).
    pub ends_at: Timestamp,
    /// Creation time; drives the newest-first default ordering.
    pub timestamp: Timestamp,
    /// Addresses that have voted. Membership matters, order does not.
    pub voters: Vec<Address>,
    /// Avatar URLs of registered contestants, in registration order.
    pub avatars: Vec<String>,
}

impl Poll {
    /// Whether `actor` has already cast a ballot in this poll.
    pub fn has_voted(&self, actor: &Address) -> bool {
        self.voters.contains(actor)
    }
}

/// A registered candidate within a poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contestant {
    /// Ledger-assigned identifier, unique within the poll.
    pub id: ContestantId,
    /// Display name supplied at registration.
    pub name: String,
    /// Generated avatar URL, seeded by the name.
    pub avatar: String,
    /// The candidate's own account.
    pub voter: Address,
    /// Ballots cast for this candidate.
    pub votes: u64,
    /// Addresses that voted for this candidate.
    pub voters: Vec<Address>,
}

/// Mutation payload for poll creation and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollParams {
    pub title: String,
    pub description: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

/// Where a poll sits relative to its voting window.
///
/// Independent of the `deleted` flag, which callers check separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollStatus {
    /// Voting has not opened yet.
    Upcoming,
    /// The window is open: `starts_at <= now < ends_at`.
    Active,
    /// The window has closed.
    Completed,
}

impl fmt::Display for PollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upcoming => write!(f, "upcoming"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}
