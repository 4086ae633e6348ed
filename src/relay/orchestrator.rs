//! Request pipeline of a relay hop.
//!
//! ```text
//! trace 1> → parse cookies → resolve/create session → call_counter += 1
//!     no `call`  → reply
//!     `call=url` → strip own cookie → trace 2> → GET url → trace 2<
//!                → drop own cookie from Set-Cookie → merge → reply
//! trace 1< → reply
//! ```

use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use crate::cookie::{self, filter_set_cookie, CookieJar};
use crate::observability::{metrics, RequestTrace, TraceLogger};
use crate::relay::downstream::Downstream;
use crate::relay::error::{RelayError, RelayResult};
use crate::session::{Session, SessionId, SessionResolver};

/// Query parameter naming the next hop.
pub const CALL_PARAM: &str = "call";

/// The parts of an inbound request the relay looks at.
#[derive(Debug, Clone, Copy)]
pub struct InboundRequest<'a> {
    /// Request target as received (path and query).
    pub url: &'a str,
    /// Raw `Cookie` header.
    pub cookie: Option<&'a str>,
}

/// JSON envelope returned on success.
#[derive(Debug, Clone, Serialize)]
pub struct RelayBody {
    pub service_name: String,
    pub session_id: SessionId,
    pub session: Session,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

/// A successful reply: the body plus every `Set-Cookie` to send.
#[derive(Debug, Clone)]
pub struct RelayReply {
    pub set_cookies: Vec<String>,
    pub body: RelayBody,
}

/// A failed chaining request.
///
/// Carries the session cookie minted for the request, if any, so the client
/// keeps its session even when the next hop fails.
#[derive(Debug)]
pub struct RelayFailure {
    pub service_name: String,
    pub session_id: SessionId,
    pub set_cookies: Vec<String>,
    pub error: RelayError,
}

/// First non-empty `call` query parameter of a request target.
pub fn call_target(url: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == CALL_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// One relay hop.
pub struct Relay<D> {
    service_name: String,
    resolver: SessionResolver,
    downstream: D,
    trace: TraceLogger,
}

impl<D: Downstream> Relay<D> {
    pub fn new(service_name: impl Into<String>, resolver: SessionResolver, downstream: D) -> Self {
        Self {
            service_name: service_name.into(),
            resolver,
            downstream,
            trace: TraceLogger::new(),
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn resolver(&self) -> &SessionResolver {
        &self.resolver
    }

    /// Handle one inbound request.
    pub async fn handle(&self, request: InboundRequest<'_>) -> Result<RelayReply, RelayFailure> {
        let trace = self.trace.begin();
        trace.inbound_request(request.url, request.cookie);

        let jar = cookie::parse(request.cookie);
        let resolved = self.resolver.resolve(jar.as_ref());
        let session = self
            .resolver
            .store()
            .record_call(&resolved.id)
            .unwrap_or_else(|| Session {
                call_counter: resolved.session.call_counter + 1,
                ..resolved.session.clone()
            });

        let mut set_cookies: Vec<String> = resolved.set_cookie().map(str::to_string).into_iter().collect();

        let (mode, response) = match call_target(request.url) {
            None => ("leaf", None),
            Some(target) => {
                match self.call_downstream(&trace, &target, jar.as_ref(), &mut set_cookies).await {
                    Ok(body) => ("chain", Some(body)),
                    Err(error) => {
                        tracing::warn!(
                            seq = trace.seq(),
                            session_id = %resolved.id,
                            error = %error,
                            "Downstream call failed"
                        );
                        trace.outbound_response(&set_cookies);
                        metrics::record_request("chain", error.status_code().as_u16());
                        return Err(RelayFailure {
                            service_name: self.service_name.clone(),
                            session_id: resolved.id,
                            set_cookies,
                            error,
                        });
                    }
                }
            }
        };

        trace.outbound_response(&set_cookies);
        metrics::record_request(mode, 200);

        Ok(RelayReply {
            set_cookies,
            body: RelayBody {
                service_name: self.service_name.clone(),
                session_id: resolved.id,
                session,
                response,
            },
        })
    }

    /// Forward to `target` without our session cookie and merge what comes back.
    async fn call_downstream(
        &self,
        trace: &RequestTrace,
        target: &str,
        jar: Option<&CookieJar>,
        set_cookies: &mut Vec<String>,
    ) -> RelayResult<Value> {
        let own_cookie = self.resolver.cookie().name();
        let outbound_cookie = cookie::strip_and_serialize(jar, own_cookie);
        trace.outbound_request(target, outbound_cookie.as_deref());

        let started = Instant::now();
        let reply = match self.downstream.get(target, outbound_cookie.as_deref()).await {
            Ok(reply) => reply,
            Err(e) => {
                metrics::record_downstream(e.kind(), started);
                return Err(e);
            }
        };
        trace.downstream_response(reply.set_cookies.as_deref());

        if !(200..300).contains(&reply.status) {
            metrics::record_downstream("status", started);
            return Err(RelayError::Status {
                url: target.to_string(),
                status: reply.status,
            });
        }

        let body: Value = serde_json::from_slice(&reply.body).map_err(|e| {
            metrics::record_downstream("body", started);
            RelayError::Body {
                url: target.to_string(),
                reason: e.to_string(),
            }
        })?;
        metrics::record_downstream("ok", started);

        if let Some(kept) = filter_set_cookie(reply.set_cookies.as_deref(), own_cookie) {
            set_cookies.extend(kept);
        }

        Ok(body)
    }
}
