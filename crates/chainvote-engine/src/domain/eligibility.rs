//! # Eligibility Rules Engine
//!
//! Pure predicates deciding whether a requested action is currently legal,
//! given a poll, its contestants, the acting address, and an explicit `now`.
//!
//! The engine never mutates state and never reads a clock of its own; it
//! only classifies a proposed action as permitted or rejected-with-reason.
//! The same rules are enforced authoritatively by the ledger — evaluating
//! them here first gives immediate feedback and avoids wasting a ledger
//! transaction that is bound to revert.
//!
//! ## Voting Window
//!
//! The window is half-open: `starts_at` is inclusive, `ends_at` exclusive.
//! A vote at exactly `starts_at` is permitted; a vote at exactly `ends_at`
//! is rejected with `VotingEnded`.

use thiserror::Error;

use chainvote_types::{Address, Contestant, Poll, PollParams, Timestamp};

/// Why an action is not currently legal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EligibilityError {
    /// No wallet is connected; the action has no actor.
    #[error("no wallet connected")]
    NotConnected,

    /// The actor is already registered as a contestant in this poll.
    #[error("already registered as a contestant")]
    AlreadyCandidate,

    /// The poll has been deleted and is permanently inert.
    #[error("poll has been deleted")]
    PollDeleted,

    /// Ballots exist; registration and poll edits are closed for good.
    #[error("voting has already begun")]
    VotingStarted,

    /// The poll's window is over; registration is pointless.
    #[error("poll has ended")]
    PollEnded,

    /// The voting window has not opened yet.
    #[error("voting has not started")]
    VotingNotStarted,

    /// The voting window has closed.
    #[error("voting has ended")]
    VotingEnded,

    /// The actor has already cast a ballot in this poll.
    #[error("already voted in this poll")]
    AlreadyVoted,

    /// Only the poll's director may do this.
    #[error("only the poll director may do this")]
    NotAuthorized,

    /// The proposed schedule is not a future, non-empty window.
    #[error("invalid schedule: start must be in the future and end after start")]
    InvalidSchedule,

    /// A required text field is blank.
    #[error("required field is empty: {field}")]
    EmptyField {
        /// Which field was blank.
        field: &'static str,
    },
}

/// Check the payload shared by create and update.
fn check_params(params: &PollParams, now: Timestamp) -> Result<(), EligibilityError> {
    if params.title.trim().is_empty() {
        return Err(EligibilityError::EmptyField { field: "title" });
    }
    if params.description.trim().is_empty() {
        return Err(EligibilityError::EmptyField { field: "description" });
    }
    if params.starts_at <= now || params.ends_at <= params.starts_at {
        return Err(EligibilityError::InvalidSchedule);
    }
    Ok(())
}

/// May `actor` publish a new poll with `params`?
///
/// Creation has no lifecycle constraints; only the payload is checked.
pub fn can_create_poll(params: &PollParams, now: Timestamp) -> Result<(), EligibilityError> {
    check_params(params, now)
}

/// May `actor` register as a contestant in `poll`?
pub fn can_register_contestant(
    poll: &Poll,
    contestants: &[Contestant],
    actor: &Address,
    now: Timestamp,
) -> Result<(), EligibilityError> {
    if contestants.iter().any(|c| c.voter == *actor) {
        return Err(EligibilityError::AlreadyCandidate);
    }
    if poll.deleted {
        return Err(EligibilityError::PollDeleted);
    }
    if poll.votes > 0 {
        return Err(EligibilityError::VotingStarted);
    }
    if now > poll.ends_at {
        return Err(EligibilityError::PollEnded);
    }
    Ok(())
}

/// May `actor` cast a ballot in `poll` right now?
///
/// `actor` is the resolved wallet account, absent when nothing is connected.
pub fn can_vote(
    poll: &Poll,
    actor: Option<&Address>,
    now: Timestamp,
) -> Result<(), EligibilityError> {
    let actor = actor.ok_or(EligibilityError::NotConnected)?;
    if poll.deleted {
        return Err(EligibilityError::PollDeleted);
    }
    if now < poll.starts_at {
        return Err(EligibilityError::VotingNotStarted);
    }
    if now >= poll.ends_at {
        return Err(EligibilityError::VotingEnded);
    }
    if poll.has_voted(actor) {
        return Err(EligibilityError::AlreadyVoted);
    }
    Ok(())
}

/// May `actor` rewrite `poll` with `params`?
pub fn can_update_poll(
    poll: &Poll,
    actor: &Address,
    params: &PollParams,
    now: Timestamp,
) -> Result<(), EligibilityError> {
    if *actor != poll.director {
        return Err(EligibilityError::NotAuthorized);
    }
    if poll.deleted {
        return Err(EligibilityError::PollDeleted);
    }
    if poll.votes > 0 {
        return Err(EligibilityError::VotingStarted);
    }
    check_params(params, now)
}

/// May `actor` delete `poll`?
pub fn can_delete_poll(poll: &Poll, actor: &Address) -> Result<(), EligibilityError> {
    if *actor != poll.director {
        return Err(EligibilityError::NotAuthorized);
    }
    if poll.deleted {
        return Err(EligibilityError::PollDeleted);
    }
    if poll.votes > 0 {
        return Err(EligibilityError::VotingStarted);
    }
    Ok(())
}

/// Advisory only: true when the poll has fewer than two contestants.
///
/// The ledger does not enforce a minimum field, so this is surfaced as a
/// warning by the orchestrator rather than a vote gate.
pub fn contestant_shortfall(poll: &Poll) -> bool {
    poll.contestants < 2
}
