//! Ports: the driving API and the driven collaborator abstractions.

pub mod inbound;
pub mod outbound;

pub use inbound::ElectionApi;
pub use outbound::{IdentityProvider, LedgerGateway, TimeSource};
