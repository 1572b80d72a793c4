//! Cross-crate integration flows.

pub mod lifecycle;
pub mod reconciliation;
