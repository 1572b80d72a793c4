//! # State Projector
//!
//! Turns raw ledger records into the canonical, display-ready shape:
//! numeric coercion, address normalization, and the two stable orderings
//! (polls newest-first, contestants by votes).
//!
//! A record that fails to coerce is a defect in the ledger adapter, not
//! something to paper over; projection fails loudly with the offending
//! field.

use chainvote_types::{
    Address, Contestant, Poll, PollStatus, ProjectionError, RawContestant, RawPoll, Timestamp,
};

fn parse_u64(field: &'static str, value: &str) -> Result<u64, ProjectionError> {
    value.trim().parse().map_err(|_| ProjectionError::InvalidNumeric {
        field,
        value: value.to_string(),
    })
}

fn parse_address(field: &'static str, value: &str) -> Result<Address, ProjectionError> {
    value.parse().map_err(|_| ProjectionError::InvalidAddress {
        field,
        value: value.to_string(),
    })
}

fn parse_addresses(field: &'static str, values: &[String]) -> Result<Vec<Address>, ProjectionError> {
    values.iter().map(|v| parse_address(field, v)).collect()
}

/// Project a single raw poll.
pub fn project_poll(raw: &RawPoll) -> Result<Poll, ProjectionError> {
    Ok(Poll {
        id: parse_u64("id", &raw.id)?,
        title: raw.title.clone(),
        description: raw.description.clone(),
        votes: parse_u64("votes", &raw.votes)?,
        contestants: parse_u64("contestants", &raw.contestants)?,
        deleted: raw.deleted,
        director: parse_address("director", &raw.director)?,
        starts_at: parse_u64("startsAt", &raw.starts_at)?,
        ends_at: parse_u64("endsAt", &raw.ends_at)?,
        timestamp: parse_u64("timestamp", &raw.timestamp)?,
        voters: parse_addresses("voters", &raw.voters)?,
        avatars: raw.avatars.clone(),
    })
}

/// Project a poll list and order it newest created first.
///
/// The sort is stable, so equal timestamps keep their ledger return order,
/// and re-projecting an already-sorted list is a no-op on the ordering.
pub fn project_polls(raw: &[RawPoll]) -> Result<Vec<Poll>, ProjectionError> {
    let mut polls = raw.iter().map(project_poll).collect::<Result<Vec<_>, _>>()?;
    polls.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(polls)
}

/// Project a single raw contestant.
pub fn project_contestant(raw: &RawContestant) -> Result<Contestant, ProjectionError> {
    Ok(Contestant {
        id: parse_u64("id", &raw.id)?,
        name: raw.name.clone(),
        avatar: raw.avatar.clone(),
        voter: parse_address("voter", &raw.voter)?,
        votes: parse_u64("votes", &raw.votes)?,
        voters: parse_addresses("voters", &raw.voters)?,
    })
}

/// Project a contestant list and rank it by votes, descending.
///
/// This ordering is a display ranking only; ledger vote counts, not list
/// position, decide an election.
pub fn project_contestants(raw: &[RawContestant]) -> Result<Vec<Contestant>, ProjectionError> {
    let mut contestants = raw
        .iter()
        .map(project_contestant)
        .collect::<Result<Vec<_>, _>>()?;
    contestants.sort_by(|a, b| b.votes.cmp(&a.votes));
    Ok(contestants)
}

/// Where `poll` sits relative to its window at `now`.
///
/// Orthogonal to `deleted`, which callers check separately.
pub fn poll_status(poll: &Poll, now: Timestamp) -> PollStatus {
    if now < poll.starts_at {
        PollStatus::Upcoming
    } else if now < poll.ends_at {
        PollStatus::Active
    } else {
        PollStatus::Completed
    }
}
