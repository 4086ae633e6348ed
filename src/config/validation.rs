//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Service name must form a legal cookie name
//! - Validate value ranges (timeouts > 0, ports valid)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("service.name must not be empty")]
    EmptyServiceName,

    #[error("service.name {0:?} contains characters not allowed in a cookie name")]
    InvalidServiceName(String),

    #[error("service.port must not be 0")]
    ZeroPort,

    #[error("{0} must be greater than 0")]
    ZeroTimeout(&'static str),

    #[error(
        "downstream.timeout_secs ({downstream}) must be lower than timeouts.request_secs ({request})"
    )]
    DownstreamTimeoutNotBelowRequest { downstream: u64, request: u64 },

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Cookie names are RFC 6265 tokens: visible ASCII minus separators.
fn is_cookie_name_char(c: char) -> bool {
    c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?={}".contains(c)
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let name = &config.service.name;
    if name.is_empty() {
        errors.push(ValidationError::EmptyServiceName);
    } else if !name.chars().all(is_cookie_name_char) {
        errors.push(ValidationError::InvalidServiceName(name.clone()));
    }

    if config.service.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    if config.downstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("downstream.timeout_secs"));
    }
    if config.downstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("downstream.connect_timeout_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }
    if config.timeouts.request_secs > 0
        && config.downstream.timeout_secs >= config.timeouts.request_secs
    {
        errors.push(ValidationError::DownstreamTimeoutNotBelowRequest {
            downstream: config.downstream.timeout_secs,
            request: config.timeouts.request_secs,
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RelayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RelayConfig::default();
        config.service.name = "bad name;".to_string();
        config.service.port = 0;
        config.timeouts.request_secs = 0;
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nowhere".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidServiceName("bad name;".to_string()),
                ValidationError::ZeroPort,
                ValidationError::ZeroTimeout("timeouts.request_secs"),
                ValidationError::InvalidMetricsAddress("nowhere".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut config = RelayConfig::default();
        config.service.name.clear();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::EmptyServiceName]
        );
    }

    #[test]
    fn test_downstream_timeout_must_undercut_request_timeout() {
        let mut config = RelayConfig::default();
        config.downstream.timeout_secs = 60;
        config.timeouts.request_secs = 60;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::DownstreamTimeoutNotBelowRequest {
                downstream: 60,
                request: 60,
            }]
        );

        config.downstream.timeout_secs = 59;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = RelayConfig::default();
        config.observability.metrics_address = "nowhere".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
