//! Relay subsystem: one hop of a request chain.
//!
//! # Data Flow
//! ```text
//! http/server.rs (axum handler)
//!     → orchestrator.rs (session, cookie stripping, merge)
//!     → downstream.rs (GET next hop, buffer body)
//!     → orchestrator.rs (RelayReply | RelayFailure)
//!     → http/response.rs (JSON + Set-Cookie headers)
//! ```
//!
//! # Design Decisions
//! - Each hop's session cookie stays private to that hop, in both directions
//! - Downstream failures become 502/504 JSON replies instead of dropped connections
//! - The transport sits behind the `Downstream` trait so the pipeline is testable in-process

pub mod chain;
pub mod downstream;
pub mod error;
pub mod orchestrator;

pub use chain::chain_url;
pub use downstream::{Downstream, DownstreamResponse, HttpDownstream};
pub use error::{RelayError, RelayResult};
pub use orchestrator::{
    call_target, InboundRequest, Relay, RelayBody, RelayFailure, RelayReply, CALL_PARAM,
};
