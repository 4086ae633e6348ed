//! Startup helpers.
//!
//! # Responsibilities
//! - Resolve the host name used in session ids
//! - Bind the listener for the configured port
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use tokio::net::TcpListener;

use crate::config::RelayConfig;

/// Host name of this machine, `"localhost"` if it cannot be read.
pub fn local_hostname() -> String {
    match hostname::get() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(e) => {
            tracing::warn!(error = %e, "Could not resolve hostname, using localhost");
            "localhost".to_string()
        }
    }
}

/// Bind the relay listener.
pub async fn bind(config: &RelayConfig) -> std::io::Result<TcpListener> {
    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::debug!(address = %listener.local_addr()?, "Listener bound");
    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostname_is_not_empty() {
        assert!(!local_hostname().is_empty());
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let mut config = RelayConfig::default();
        config.service.bind_host = "127.0.0.1".to_string();
        config.service.port = 0;
        let listener = bind(&config).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }
}
