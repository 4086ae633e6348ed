//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route, middleware)
//!     → request.rs (request ID, span, raw Cookie header)
//!     → relay orchestrator
//!     → response.rs (JSON envelope, Set-Cookie headers, error mapping)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{build_relay, build_router, HttpServer, ServerError};
