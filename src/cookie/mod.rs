//! Cookie codec subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound `Cookie` header
//!     → jar.rs (parse into name → [values])
//!     → session resolver reads the session cookie
//!     → jar.rs (strip own session cookie, serialize for the next hop)
//!
//! Downstream `Set-Cookie` list
//!     → set_cookie.rs (drop directives naming our session cookie)
//!     → appended to our response after the session cookie
//! ```
//!
//! # Design Decisions
//! - Values are kept raw: no percent-decoding, no quoting rules
//! - Set-Cookie filtering matches by substring over the whole directive,
//!   so a cookie named `X_AB` is dropped when filtering `X_A`

pub mod jar;
pub mod set_cookie;

pub use jar::{parse, strip_and_serialize, CookieJar};
pub use set_cookie::{cookie_pair, filter_set_cookie, SessionCookie, SESSION_COOKIE_PREFIX};
