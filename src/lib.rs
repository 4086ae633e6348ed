//! Session-propagating HTTP relay library.
//!
//! Each relay hop resolves a server-side session from its own cookie,
//! optionally forwards the request to a `call=<url>` next hop without that
//! cookie, and merges the next hop's cookies (minus its own) into the reply.

pub mod config;
pub mod cookie;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;
pub mod session;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use relay::Relay;
