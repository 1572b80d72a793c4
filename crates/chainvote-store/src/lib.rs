//! # Observer Store - Snapshot Cache for Election State
//!
//! Process-wide, single-writer cache of the current election view: poll
//! list, selected poll, contestant list, connected wallet, and the
//! UI-transient modal flags.
//!
//! ## Write Discipline
//!
//! - Exactly two write paths exist: the initial load and the orchestrator's
//!   post-confirmation publish.
//! - `ObserverStore` is the writer handle and is deliberately not `Clone`;
//!   whoever owns it is the single writer.
//! - Every publish replaces the whole snapshot atomically, so a reader can
//!   never observe `polls` and `selected` referring to different versions
//!   of the same poll id.
//!
//! ## Read Side
//!
//! ```text
//! ┌──────────────┐  publish()   ┌──────────────┐  changed()/current()
//! │ Orchestrator │ ───────────→ │ ObserverStore│ ───────────→ readers
//! └──────────────┘              └──────────────┘      (cloneable)
//! ```
//!
//! Readers hold a [`StoreReader`], a cheap clone that yields the latest
//! snapshot at any time and can await the next publish. The cache is a
//! read-through view of ledger state; it is never authoritative for a
//! decision with real-world consequence.

pub mod snapshot;
pub mod store;

pub use snapshot::{AppSnapshot, ModalFlags};
pub use store::{ObserverStore, StoreClosed, StoreReader};
