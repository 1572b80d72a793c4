//! Domain layer: pure rules, projection, and formatting. No I/O.

pub mod eligibility;
pub mod errors;
pub mod format;
pub mod projector;

pub use eligibility::{
    can_create_poll, can_delete_poll, can_register_contestant, can_update_poll, can_vote,
    contestant_shortfall, EligibilityError,
};
pub use errors::MutationError;
pub use format::{avatar_url, format_date, format_timestamp, short_address, truncate};
pub use projector::{
    poll_status, project_contestant, project_contestants, project_poll, project_polls,
};
