//! # Display Formatting
//!
//! Pure formatting utilities with no business-rule significance: address
//! truncation, human-readable dates, and the generated contestant avatar
//! URL. Formatting never fails; a bad timestamp renders as a placeholder.

use chainvote_types::{Address, Timestamp};
use chrono::{DateTime, Utc};

/// Placeholder rendered when a timestamp does not map to a real date.
const INVALID_DATE: &str = "--";

/// Avatar service the contestant avatar is generated from, seeded by name.
const AVATAR_SERVICE: &str = "https://api.dicebear.com/6.x/initials/svg?seed=";

/// Shorten `text` to at most `max_length` visible characters: the first
/// `start_chars`, dot padding, then the last `end_chars`.
///
/// Text already within `max_length` passes through untouched. The head is
/// padded with `.` until head and tail together reach `max_length`, so the
/// result has a fixed total width for equal parameters.
pub fn truncate(text: &str, start_chars: usize, end_chars: usize, max_length: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_length {
        return text.to_string();
    }

    let mut head: String = chars.iter().take(start_chars).collect();
    let tail: String = chars[chars.len().saturating_sub(end_chars)..].iter().collect();
    while head.chars().count() + tail.chars().count() < max_length {
        head.push('.');
    }
    head + &tail
}

/// The conventional short rendering of an account, e.g. `0xd8...6045`.
pub fn short_address(address: &Address) -> String {
    truncate(&address.to_string(), 4, 4, 11)
}

fn as_utc(timestamp: Timestamp) -> Option<DateTime<Utc>> {
    i64::try_from(timestamp)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
}

/// Render a timestamp as `"Sun, Jan 1, 2023"` (UTC).
pub fn format_date(timestamp: Timestamp) -> String {
    match as_utc(timestamp) {
        Some(date) => date.format("%a, %b %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Render a timestamp as `"2023-01-01T12:30"` (UTC), the shape a
/// datetime-local form field expects.
pub fn format_timestamp(timestamp: Timestamp) -> String {
    match as_utc(timestamp) {
        Some(date) => date.format("%Y-%m-%dT%H:%M").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Deterministic initials-avatar URL for a contestant name.
pub fn avatar_url(name: &str) -> String {
    let mut url = String::with_capacity(AVATAR_SERVICE.len() + name.len());
    url.push_str(AVATAR_SERVICE);
    for byte in name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                url.push(byte as char);
            }
            _ => url.push_str(&format!("%{byte:02X}")),
        }
    }
    url
}
