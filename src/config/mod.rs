//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! RelayConfig::default()
//!     → loader.rs (optional TOML file, --config)
//!     → loader.rs (SERVICE_NAME / SERVICE_PORT / SECURE_COOKIE_ATTRIBUTE)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::{
    DownstreamConfig, LogFormat, ObservabilityConfig, RelayConfig, ServiceConfig, SessionConfig,
    TimeoutConfig,
};
pub use validation::ValidationError;
