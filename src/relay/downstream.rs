//! Outbound calls to the next hop.

use axum::body::Bytes;
use reqwest::header::{COOKIE, SET_COOKIE};
use std::future::Future;
use std::time::Duration;
use url::Url;

use crate::config::DownstreamConfig;
use crate::relay::error::{RelayError, RelayResult};

/// A fully buffered downstream reply.
#[derive(Debug, Clone, Default)]
pub struct DownstreamResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw `Set-Cookie` directives, `None` when the header was absent.
    pub set_cookies: Option<Vec<String>>,
    /// Response body.
    pub body: Bytes,
}

/// Transport used to reach the next hop.
pub trait Downstream: Send + Sync + 'static {
    /// Issue a GET to `url`, sending `cookie` as the `Cookie` header when present.
    fn get(
        &self,
        url: &str,
        cookie: Option<&str>,
    ) -> impl Future<Output = RelayResult<DownstreamResponse>> + Send;
}

/// [`Downstream`] over a pooled `reqwest` client.
#[derive(Clone)]
pub struct HttpDownstream {
    client: reqwest::Client,
}

impl HttpDownstream {
    /// Build a client honoring the configured timeouts.
    ///
    /// Redirects are never followed: a 3xx is the next hop's answer and goes
    /// through the non-success path like any other status.
    pub fn new(config: &DownstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    fn map_error(url: &str, err: reqwest::Error) -> RelayError {
        if err.is_timeout() {
            RelayError::Timeout { url: url.to_string() }
        } else {
            RelayError::Connect {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

/// Parse a `call` target, accepting only absolute http(s) URLs.
pub fn parse_target(url: &str) -> RelayResult<Url> {
    let parsed = Url::parse(url).map_err(|e| RelayError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(RelayError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {scheme:?}"),
        }),
    }
}

impl Downstream for HttpDownstream {
    async fn get(&self, url: &str, cookie: Option<&str>) -> RelayResult<DownstreamResponse> {
        let target = parse_target(url)?;

        let mut request = self.client.get(target);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await.map_err(|e| Self::map_error(url, e))?;
        let status = response.status().as_u16();

        let set_cookies: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect();
        let set_cookies = if set_cookies.is_empty() {
            None
        } else {
            Some(set_cookies)
        };

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                RelayError::Timeout { url: url.to_string() }
            } else {
                RelayError::Body {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        Ok(DownstreamResponse {
            status,
            set_cookies,
            body,
        })
    }
}
