//! Per-request cookie trace.
//!
//! Every request gets a sequence number and up to four events:
//!
//! | stage | point                                  |
//! |-------|----------------------------------------|
//! | `1>`  | inbound request url and `Cookie`       |
//! | `2>`  | downstream url and forwarded `Cookie`  |
//! | `2<`  | downstream `Set-Cookie` list           |
//! | `1<`  | our final `Set-Cookie` list            |

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out request sequence numbers.
#[derive(Debug, Default)]
pub struct TraceLogger {
    next_seq: AtomicU64,
}

impl TraceLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracing a new request.
    pub fn begin(&self) -> RequestTrace {
        RequestTrace {
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
        }
    }
}

/// Trace handle of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTrace {
    seq: u64,
}

impl RequestTrace {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn inbound_request(&self, url: &str, cookie: Option<&str>) {
        tracing::info!(
            target: "session_relay::trace",
            seq = self.seq,
            stage = "1>",
            url = %url,
            cookie = ?cookie,
            "Inbound request"
        );
    }

    pub fn outbound_request(&self, url: &str, cookie: Option<&str>) {
        tracing::info!(
            target: "session_relay::trace",
            seq = self.seq,
            stage = "2>",
            url = %url,
            cookie = ?cookie,
            "Calling downstream"
        );
    }

    pub fn downstream_response(&self, set_cookie: Option<&[String]>) {
        tracing::info!(
            target: "session_relay::trace",
            seq = self.seq,
            stage = "2<",
            set_cookie = ?set_cookie,
            "Downstream responded"
        );
    }

    pub fn outbound_response(&self, set_cookie: &[String]) {
        tracing::info!(
            target: "session_relay::trace",
            seq = self.seq,
            stage = "1<",
            set_cookie = ?set_cookie,
            "Sending response"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic() {
        let logger = TraceLogger::new();
        let seqs: Vec<u64> = (0..3).map(|_| logger.begin().seq()).collect();
        assert_eq!(seqs, [0, 1, 2]);
    }
}
