//! # Application Snapshot
//!
//! The one value the store publishes. Consumers render from this and
//! nothing else.

use serde::{Deserialize, Serialize};

use chainvote_types::{Address, Contestant, Poll};

/// Visibility flags for the four mutation dialogs.
///
/// Pure UI-transient state; carried in the snapshot so that consumers have
/// a single subscription, but with no business-rule significance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalFlags {
    pub create_poll: bool,
    pub update_poll: bool,
    pub delete_poll: bool,
    pub contest: bool,
}

/// The canonical in-memory view of election state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSnapshot {
    /// The connected account, if any.
    pub wallet: Option<Address>,
    /// All known polls, newest created first.
    pub polls: Vec<Poll>,
    /// The poll currently in focus, if any.
    pub selected: Option<Poll>,
    /// Contestants of the selected poll, ranked by votes.
    pub contestants: Vec<Contestant>,
    /// Dialog visibility flags.
    pub modals: ModalFlags,
}

impl AppSnapshot {
    /// Look up a poll in the cached list.
    pub fn poll(&self, id: u64) -> Option<&Poll> {
        self.polls.iter().find(|p| p.id == id)
    }
}
