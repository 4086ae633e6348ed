//! Relay outcomes as HTTP responses.
//!
//! # Responsibilities
//! - Serialize the relay envelope as `application/json`
//! - Emit one `Set-Cookie` header per directive, in order
//! - Map downstream failures to 502/504 with a JSON error body

use axum::{
    http::{header::SET_COOKIE, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::relay::{RelayFailure, RelayReply};
use crate::session::SessionId;

/// Error envelope sent when the next hop could not be used.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub service_name: String,
    pub session_id: SessionId,
    pub error: String,
}

/// Append each directive as its own `Set-Cookie` header.
pub fn append_set_cookies(headers: &mut HeaderMap, set_cookies: &[String]) {
    for directive in set_cookies {
        match HeaderValue::from_str(directive) {
            Ok(value) => {
                headers.append(SET_COOKIE, value);
            }
            Err(_) => {
                tracing::warn!(directive = %directive, "Dropping Set-Cookie that is not a valid header value");
            }
        }
    }
}

impl IntoResponse for RelayReply {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::OK, Json(self.body)).into_response();
        append_set_cookies(response.headers_mut(), &self.set_cookies);
        response
    }
}

impl IntoResponse for RelayFailure {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            service_name: self.service_name,
            session_id: self.session_id,
            error: self.error.to_string(),
        };
        let mut response = (self.error.status_code(), Json(body)).into_response();
        append_set_cookies(response.headers_mut(), &self.set_cookies);
        response
    }
}
