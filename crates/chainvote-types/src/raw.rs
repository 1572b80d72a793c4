//! # Raw Ledger Records
//!
//! Record shapes as the ledger collaborator returns them: numeric fields as
//! decimal strings, addresses as `0x`-hex in whatever casing the node emits.
//! The State Projector owns the coercion into canonical entities; nothing
//! else in the workspace should consume these directly.

use serde::{Deserialize, Serialize};

/// A poll as fetched from the ledger, before projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPoll {
    pub id: String,
    pub title: String,
    pub description: String,
    pub votes: String,
    pub contestants: String,
    pub deleted: bool,
    pub director: String,
    pub starts_at: String,
    pub ends_at: String,
    pub timestamp: String,
    pub voters: Vec<String>,
    pub avatars: Vec<String>,
}

/// A contestant as fetched from the ledger, before projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContestant {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub voter: String,
    pub votes: String,
    pub voters: Vec<String>,
}
