//! Session subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound cookie jar
//!     → resolver.rs (first value of our session cookie)
//!     → store.rs lookup
//!         found   → Resolved
//!         missing → store.rs create → Created + Set-Cookie directive
//!     → orchestrator bumps call_counter via store.rs
//! ```
//!
//! # Design Decisions
//! - Sessions live for the whole process; there is no expiry or eviction
//! - Ids are `<host>-<n>` with a process-wide atomic counter, never reused
//! - Unknown or stale ids silently lead to a fresh session

pub mod resolver;
pub mod store;

pub use resolver::{Resolution, ResolvedSession, SessionResolver};
pub use store::{Session, SessionId, SessionStore};
